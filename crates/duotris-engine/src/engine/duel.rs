use std::time::Duration;

use tracing::{debug, info};

use super::{
    piece_sequence::PieceSequence,
    session::{PlayerSession, SessionEvent, SoundEvent},
    timing::TimingConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PlayerId {
    #[display("P1")]
    One,
    #[display("P2")]
    Two,
}

impl PlayerId {
    pub const ALL: [Self; 2] = [Self::One, Self::Two];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

/// Player input after key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    MoveLeft,
    MoveRight,
    Rotate,
    HardDrop,
    FastFallOn,
    FastFallOff,
    /// Start when idle, restart after game over.
    StartOrRestart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelEvent {
    Sound { player: PlayerId, sound: SoundEvent },
    Started(PlayerId),
    LinesCleared {
        player: PlayerId,
        lines: usize,
        points: usize,
    },
    GameOver(PlayerId),
    /// `winner` met their quota first; both players move to `level`.
    LevelUp { winner: PlayerId, level: u32 },
}

/// Two player sessions sharing one piece stream and one level.
///
/// The duel owns everything the players have in common and lends the piece
/// sequence to a session for each operation that may spawn. The first player
/// to meet the quota advances the level for both.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use duotris_engine::{Duel, PlayerCommand, PlayerId, TimingConfig};
///
/// let mut duel = Duel::new(TimingConfig::default());
/// duel.apply(PlayerId::One, PlayerCommand::StartOrRestart);
/// duel.apply(PlayerId::Two, PlayerCommand::StartOrRestart);
/// duel.tick(Duration::from_secs(1));
///
/// let p1 = duel.player(PlayerId::One).falling_piece().unwrap().kind();
/// let p2 = duel.player(PlayerId::Two).falling_piece().unwrap().kind();
/// assert_eq!(p1, p2);
/// ```
#[derive(Debug, Clone)]
pub struct Duel {
    players: [PlayerSession; 2],
    sequence: PieceSequence,
    level: u32,
    events: Vec<DuelEvent>,
}

impl Duel {
    pub const FIRST_LEVEL: u32 = 1;

    #[must_use]
    pub fn new(timing: TimingConfig) -> Self {
        Self::with_sequence(timing, PieceSequence::new())
    }

    /// # Panics
    ///
    /// Panics if `timing` does not pass [`TimingConfig::validate`].
    #[must_use]
    pub fn with_sequence(timing: TimingConfig, sequence: PieceSequence) -> Self {
        Self {
            players: [
                PlayerSession::new(timing, Self::FIRST_LEVEL),
                PlayerSession::new(timing, Self::FIRST_LEVEL),
            ],
            sequence,
            level: Self::FIRST_LEVEL,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &PlayerSession {
        &self.players[id.index()]
    }

    #[must_use]
    pub fn sequence(&self) -> &PieceSequence {
        &self.sequence
    }

    /// Takes the events produced since the last call.
    pub fn drain_events(&mut self) -> impl Iterator<Item = DuelEvent> + '_ {
        self.events.drain(..)
    }

    /// Routes a command to one player's session.
    pub fn apply(&mut self, player: PlayerId, command: PlayerCommand) {
        let session = &mut self.players[player.index()];
        match command {
            PlayerCommand::MoveLeft => _ = session.try_move_left(),
            PlayerCommand::MoveRight => _ = session.try_move_right(),
            PlayerCommand::Rotate => _ = session.try_rotate(),
            PlayerCommand::HardDrop => session.hard_drop(&mut self.sequence),
            PlayerCommand::FastFallOn => session.set_fast_fall(true),
            PlayerCommand::FastFallOff => session.set_fast_fall(false),
            PlayerCommand::StartOrRestart => session.start_or_restart(self.level),
        }
        if self.collect_events(player) {
            self.level_up(player);
        }
    }

    /// Advances both sessions by `delta`.
    pub fn tick(&mut self, delta: Duration) {
        for player in PlayerId::ALL {
            self.players[player.index()].tick(delta, &mut self.sequence);
            if self.collect_events(player) {
                self.level_up(player);
                break;
            }
        }
    }

    /// Back to level 1 with a fresh piece stream; both players go idle with
    /// empty boards.
    pub fn reset_all(&mut self) {
        info!("resetting both players");
        self.sequence.reshuffle();
        self.level = Self::FIRST_LEVEL;
        for player in PlayerId::ALL {
            self.players[player.index()].reset(self.level);
            self.collect_events(player);
        }
    }

    /// Moves `player`'s session events into the duel queue; returns `true`
    /// if the player met the quota.
    fn collect_events(&mut self, player: PlayerId) -> bool {
        let mut won = false;
        for event in self.players[player.index()].drain_events() {
            let event = match event {
                SessionEvent::Sound(sound) => DuelEvent::Sound { player, sound },
                SessionEvent::Started => DuelEvent::Started(player),
                SessionEvent::LinesCleared { lines, points } => DuelEvent::LinesCleared {
                    player,
                    lines,
                    points,
                },
                SessionEvent::GameOver => DuelEvent::GameOver(player),
                SessionEvent::QuotaMet => {
                    won = true;
                    continue;
                }
            };
            self.events.push(event);
        }
        won
    }

    fn level_up(&mut self, winner: PlayerId) {
        self.level += 1;
        debug!(%winner, level = self.level, "quota met, reshuffling sequence");
        self.sequence.reshuffle();
        self.events.push(DuelEvent::LevelUp {
            winner,
            level: self.level,
        });
        for player in PlayerId::ALL {
            self.players[player.index()].begin_level_up(self.level);
            self.collect_events(player);
        }
    }

    #[cfg(test)]
    fn player_mut(&mut self, id: PlayerId) -> &mut PlayerSession {
        &mut self.players[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, PieceKind, Quota, core::board::tests::board_from_bottom};

    use super::*;

    fn started(kinds: &[PieceKind]) -> Duel {
        let mut duel = Duel::with_sequence(TimingConfig::default(), PieceSequence::from_kinds(kinds));
        duel.apply(PlayerId::One, PlayerCommand::StartOrRestart);
        duel.apply(PlayerId::Two, PlayerCommand::StartOrRestart);
        duel.tick(Duration::from_secs(1));
        duel.drain_events().for_each(drop);
        duel
    }

    #[test]
    #[should_panic(expected = "wipe_step_ms")]
    fn test_zero_timing_is_rejected_on_creation() {
        let timing = TimingConfig {
            wipe_step_ms: 0,
            ..TimingConfig::default()
        };
        _ = Duel::new(timing);
    }

    #[test]
    fn test_players_draw_same_pieces_independently() {
        let mut duel = started(&[PieceKind::O, PieceKind::T, PieceKind::L]);

        duel.apply(PlayerId::One, PlayerCommand::HardDrop);
        duel.apply(PlayerId::One, PlayerCommand::HardDrop);
        assert_eq!(duel.player(PlayerId::One).spawn_index(), 3);
        assert_eq!(
            duel.player(PlayerId::One).falling_piece().unwrap().kind(),
            PieceKind::L
        );

        assert_eq!(duel.player(PlayerId::Two).spawn_index(), 1);
        assert_eq!(
            duel.player(PlayerId::Two).falling_piece().unwrap().kind(),
            PieceKind::O
        );
        duel.apply(PlayerId::Two, PlayerCommand::HardDrop);
        assert_eq!(
            duel.player(PlayerId::Two).falling_piece().unwrap().kind(),
            PieceKind::T
        );
    }

    #[test]
    fn test_commands_only_touch_their_player() {
        let mut duel = started(&[PieceKind::T]);
        duel.apply(PlayerId::Two, PlayerCommand::MoveLeft);
        duel.apply(PlayerId::Two, PlayerCommand::FastFallOn);

        assert_eq!(duel.player(PlayerId::One).falling_piece().unwrap().x(), 3);
        assert_eq!(duel.player(PlayerId::Two).falling_piece().unwrap().x(), 2);
        assert!(duel.player(PlayerId::Two).fall_speed().unwrap().is_fast());
        assert!(duel.player(PlayerId::One).fall_speed().unwrap().is_normal());
    }

    #[test]
    fn test_quota_met_levels_up_both_players() {
        let mut duel = started(&[PieceKind::I, PieceKind::O]);
        let p1 = duel.player_mut(PlayerId::One);
        p1.set_board(board_from_bottom(&["###....###"]));
        p1.set_quota(Quota::from_buckets([1, 0, 0, 0]));
        let before = duel.sequence().generated_len();
        assert!(before >= 1);

        duel.apply(PlayerId::One, PlayerCommand::HardDrop);

        assert_eq!(duel.level(), 2);
        assert_eq!(duel.sequence().generated_len(), 0);
        for player in PlayerId::ALL {
            let session = duel.player(player);
            assert!(session.state().is_level_up(), "{player}");
            assert_eq!(session.quota(), &Quota::for_level(2));
        }
        let events: Vec<_> = duel.drain_events().collect();
        assert!(events.contains(&DuelEvent::LevelUp {
            winner: PlayerId::One,
            level: 2
        }));

        // Wipe, then banner.
        duel.tick(Duration::from_secs(1));
        duel.tick(Duration::from_secs(2));
        for player in PlayerId::ALL {
            let session = duel.player(player);
            assert!(session.state().is_playing());
            assert_eq!(session.board(), &Board::EMPTY);
            assert_eq!(session.spawn_index(), 1);
        }
        assert_eq!(duel.player(PlayerId::One).stats().score(), 100);
    }

    #[test]
    fn test_level_up_pulls_game_over_player_back_in() {
        let mut duel = started(&[PieceKind::O, PieceKind::O, PieceKind::I]);
        let mut column = Board::EMPTY;
        for y in 2..Board::HEIGHT {
            column.fill_block_at(4, y, crate::Block::Piece(PieceKind::Z));
        }
        duel.player_mut(PlayerId::Two).set_board(column);
        duel.apply(PlayerId::Two, PlayerCommand::HardDrop);
        assert!(duel.player(PlayerId::Two).state().is_game_over());
        assert!(
            duel.drain_events()
                .any(|event| event == DuelEvent::GameOver(PlayerId::Two))
        );

        let p1 = duel.player_mut(PlayerId::One);
        p1.set_board(board_from_bottom(&["####..####"]));
        p1.set_quota(Quota::from_buckets([1, 0, 0, 0]));
        duel.apply(PlayerId::One, PlayerCommand::HardDrop);

        assert_eq!(duel.level(), 2);
        assert!(duel.player(PlayerId::Two).state().is_level_up());
    }

    #[test]
    fn test_reset_all() {
        let mut duel = started(&[PieceKind::O, PieceKind::T]);
        duel.apply(PlayerId::One, PlayerCommand::FastFallOn);
        duel.apply(PlayerId::Two, PlayerCommand::HardDrop);
        duel.drain_events().for_each(drop);

        duel.reset_all();
        assert_eq!(duel.level(), 1);
        assert_eq!(duel.sequence().generated_len(), 0);
        for player in PlayerId::ALL {
            let session = duel.player(player);
            assert!(session.state().is_idle());
            assert_eq!(session.board(), &Board::EMPTY);
            assert_eq!(session.spawn_index(), 0);
        }
        assert_eq!(
            duel.drain_events().collect::<Vec<_>>(),
            [DuelEvent::Sound {
                player: PlayerId::One,
                sound: SoundEvent::StopLoop(crate::SoundCue::FastFall)
            }]
        );
    }

    #[test]
    fn test_start_events_are_tagged_with_player() {
        let mut duel = Duel::with_sequence(
            TimingConfig::default(),
            PieceSequence::from_kinds(&[PieceKind::S]),
        );
        duel.apply(PlayerId::Two, PlayerCommand::StartOrRestart);
        duel.tick(Duration::from_secs(1));

        assert!(duel.player(PlayerId::One).state().is_idle());
        assert_eq!(
            duel.drain_events().collect::<Vec<_>>(),
            [DuelEvent::Started(PlayerId::Two)]
        );
    }
}
