use std::time::Duration;

use tracing::debug;

use crate::{
    MoveError, PieceCollisionError,
    core::{Board, Piece},
};

use super::{
    game_stats::GameStats,
    piece_sequence::PieceSequence,
    quota::Quota,
    timing::{Blink, FallSpeed, FallTimer, ScreenWipe, TimingConfig},
};

/// Sound cues emitted by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// A piece settled without clearing a line.
    Touchdown,
    /// Fast fall in progress (looped).
    FastFall,
    /// A rotation succeeded.
    Rotate,
    /// One or more lines were cleared.
    LineClear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    Play(SoundCue),
    StartLoop(SoundCue),
    StopLoop(SoundCue),
}

/// Something observable that happened inside a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Sound(SoundEvent),
    /// The first piece of a game or level has spawned.
    Started,
    LinesCleared {
        lines: usize,
        points: usize,
    },
    /// Every quota bucket reached zero; the session stopped itself.
    QuotaMet,
    GameOver,
}

/// Lifecycle of a player session.
///
/// Each variant owns the timers it runs, so leaving a state cancels them.
///
/// ```text
/// Idle ──start──▶ Starting (wipe) ──▶ Playing ──top out──▶ GameOver (blink)
///  ▲                                  │   │                    │
///  └──────────stop / quota met────────┘   │                    │
///  └───────────────────reset──────────────┼──────restart───────┘
///                                         ▼
///                 LevelUp (wipe, then banner) ──▶ Playing
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Waiting for the start gesture. The board keeps its last contents.
    Idle,
    /// Screen wipe running before a fresh game.
    Starting { wipe: ScreenWipe },
    Playing { piece: Piece, timer: FallTimer },
    /// Screen wipe, then the level banner, before the next level starts.
    LevelUp {
        wipe: ScreenWipe,
        banner: Duration,
        level: u32,
    },
    GameOver { blink: Blink },
}

/// One player's game: board, falling piece, score, quota and timers.
///
/// The piece stream is shared between players and is passed in by the caller
/// on every operation that may spawn a piece.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use duotris_engine::{PieceSequence, PlayerSession, TimingConfig};
///
/// let timing = TimingConfig::default();
/// let mut sequence = PieceSequence::new();
/// let mut session = PlayerSession::new(timing, 1);
///
/// session.start(1);
/// session.tick(Duration::from_secs(1), &mut sequence); // let the wipe finish
/// assert!(session.state().is_playing());
///
/// session.hard_drop(&mut sequence);
/// assert_eq!(session.stats().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PlayerSession {
    timing: TimingConfig,
    board: Board,
    state: SessionState,
    stats: GameStats,
    quota: Quota,
    spawn_index: usize,
    events: Vec<SessionEvent>,
}

impl PlayerSession {
    /// # Panics
    ///
    /// Panics if `timing` does not pass [`TimingConfig::validate`]; a zero
    /// period would never let a timer settle.
    #[must_use]
    pub fn new(timing: TimingConfig, level: u32) -> Self {
        if let Err(err) = timing.validate() {
            panic!("{err}");
        }
        Self {
            timing,
            board: Board::EMPTY,
            state: SessionState::Idle,
            stats: GameStats::new(),
            quota: Quota::for_level(level),
            spawn_index: 0,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn quota(&self) -> &Quota {
        &self.quota
    }

    /// Index into the shared sequence of the next piece to spawn.
    #[must_use]
    pub fn spawn_index(&self) -> usize {
        self.spawn_index
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        match &self.state {
            SessionState::Playing { piece, .. } => Some(piece),
            _ => None,
        }
    }

    #[must_use]
    pub fn fall_speed(&self) -> Option<FallSpeed> {
        match &self.state {
            SessionState::Playing { timer, .. } => Some(timer.speed()),
            _ => None,
        }
    }

    /// Takes the events produced since the last call.
    pub fn drain_events(&mut self) -> impl Iterator<Item = SessionEvent> + '_ {
        self.events.drain(..)
    }

    /// Clears board, score, quota and spawn counter, and returns to idle.
    pub fn reset(&mut self, level: u32) {
        self.leave_fast_fall();
        self.board = Board::EMPTY;
        self.state = SessionState::Idle;
        self.stats = GameStats::new();
        self.quota = Quota::for_level(level);
        self.spawn_index = 0;
    }

    /// Starts a fresh game on `level` behind a screen wipe.
    ///
    /// Only valid while idle; otherwise this does nothing.
    pub fn start(&mut self, level: u32) {
        if !self.state.is_idle() {
            return;
        }
        debug!(level, "starting session");
        self.stats = GameStats::new();
        self.quota = Quota::for_level(level);
        self.state = SessionState::Starting {
            wipe: ScreenWipe::new(&self.timing),
        };
    }

    /// Leaves game over: resets the session and starts again.
    pub fn restart(&mut self, level: u32) {
        if !self.state.is_game_over() {
            return;
        }
        self.reset(level);
        self.start(level);
    }

    /// The per-player start key: starts when idle, restarts after game over.
    pub fn start_or_restart(&mut self, level: u32) {
        match self.state {
            SessionState::Idle => self.start(level),
            SessionState::GameOver { .. } => self.restart(level),
            _ => {}
        }
    }

    /// Cancels whatever is running and goes idle, keeping the board.
    ///
    /// Game over is left alone; only [`Self::restart`] or [`Self::reset`]
    /// leave it.
    pub fn stop(&mut self) {
        if self.state.is_idle() || self.state.is_game_over() {
            return;
        }
        self.leave_fast_fall();
        self.state = SessionState::Idle;
    }

    /// Stops the session and plays the level transition towards `level`.
    ///
    /// Once the wipe and banner are over, play resumes on an empty board
    /// with the new level's quota, keeping the score.
    pub fn begin_level_up(&mut self, level: u32) {
        self.leave_fast_fall();
        self.quota = Quota::for_level(level);
        self.state = SessionState::LevelUp {
            wipe: ScreenWipe::new(&self.timing),
            banner: self.timing.level_banner(),
            level,
        };
    }

    /// Advances timers and animations by `delta`.
    pub fn tick(&mut self, delta: Duration, sequence: &mut PieceSequence) {
        match &mut self.state {
            SessionState::Idle => {}
            SessionState::Starting { wipe } => {
                if wipe.advance(delta) {
                    self.begin_play(sequence);
                }
            }
            SessionState::Playing { timer, .. } => {
                let steps = timer.advance(delta);
                for _ in 0..steps {
                    if !self.step_down(sequence) {
                        break;
                    }
                }
            }
            SessionState::LevelUp { wipe, banner, .. } => {
                if !wipe.is_finished() {
                    wipe.advance(delta);
                    return;
                }
                *banner = banner.saturating_sub(delta);
                if banner.is_zero() {
                    self.spawn_index = 0;
                    self.begin_play(sequence);
                }
            }
            SessionState::GameOver { blink } => blink.advance(delta),
        }
    }

    pub fn try_move_left(&mut self) -> Result<(), MoveError> {
        self.update_falling_piece(Piece::left)
    }

    pub fn try_move_right(&mut self) -> Result<(), MoveError> {
        self.update_falling_piece(Piece::right)
    }

    /// Moves the piece one row down without locking it.
    pub fn try_soft_drop(&mut self) -> Result<(), MoveError> {
        self.update_falling_piece(Piece::down)
    }

    /// Turns the piece a quarter clockwise; a colliding rotation is dropped
    /// entirely.
    pub fn try_rotate(&mut self) -> Result<(), MoveError> {
        self.update_falling_piece(Piece::rotated)?;
        self.events
            .push(SessionEvent::Sound(SoundEvent::Play(SoundCue::Rotate)));
        Ok(())
    }

    /// One fall step: moves down, or locks the piece when it cannot.
    pub fn move_down(&mut self, sequence: &mut PieceSequence) {
        self.step_down(sequence);
    }

    /// Drops the piece as far as it goes and locks it.
    pub fn hard_drop(&mut self, sequence: &mut PieceSequence) {
        if !self.state.is_playing() {
            return;
        }
        while self.try_soft_drop().is_ok() {}
        self.complete_piece_drop(sequence);
    }

    /// Switches between normal and fast fall.
    ///
    /// The fall timer is replaced only when the speed actually changes.
    pub fn set_fast_fall(&mut self, fast: bool) {
        let SessionState::Playing { timer, .. } = &mut self.state else {
            return;
        };
        let speed = if fast {
            FallSpeed::Fast
        } else {
            FallSpeed::Normal
        };
        if timer.speed() == speed {
            return;
        }
        *timer = FallTimer::new(speed, &self.timing);
        let sound = if fast {
            SoundEvent::StartLoop(SoundCue::FastFall)
        } else {
            SoundEvent::StopLoop(SoundCue::FastFall)
        };
        self.events.push(SessionEvent::Sound(sound));
    }

    fn update_falling_piece(&mut self, update: impl FnOnce(&Piece) -> Piece) -> Result<(), MoveError> {
        let SessionState::Playing { piece, .. } = &mut self.state else {
            return Err(MoveError::NotPlaying);
        };
        let moved = update(piece);
        if self.board.is_colliding(&moved) {
            return Err(MoveError::Collision(PieceCollisionError));
        }
        *piece = moved;
        Ok(())
    }

    /// Returns `true` while the same piece keeps falling.
    fn step_down(&mut self, sequence: &mut PieceSequence) -> bool {
        match self.try_soft_drop() {
            Ok(()) => true,
            Err(MoveError::Collision(_)) => {
                self.complete_piece_drop(sequence);
                false
            }
            Err(MoveError::NotPlaying) => false,
        }
    }

    fn complete_piece_drop(&mut self, sequence: &mut PieceSequence) {
        let Some(piece) = self.falling_piece().copied() else {
            return;
        };
        self.board.fill_piece(&piece);
        let lines = self.board.clear_lines();
        let points = self.stats.complete_piece_drop(lines);

        if lines == 0 {
            self.push_sound(SoundEvent::Play(SoundCue::Touchdown));
        } else {
            debug!(lines, points, "lines cleared");
            self.push_sound(SoundEvent::Play(SoundCue::LineClear));
            self.events
                .push(SessionEvent::LinesCleared { lines, points });
            self.quota.credit(lines);
            if self.quota.is_satisfied() {
                self.leave_fast_fall();
                self.state = SessionState::Idle;
                self.events.push(SessionEvent::QuotaMet);
                return;
            }
        }
        self.spawn_piece(sequence);
    }

    fn begin_play(&mut self, sequence: &mut PieceSequence) {
        self.board = Board::EMPTY;
        self.state = SessionState::Idle;
        self.spawn_piece(sequence);
        if self.state.is_playing() {
            self.events.push(SessionEvent::Started);
        }
    }

    /// Spawns the next piece from the shared sequence, or tops out.
    ///
    /// Fall speed is back to normal for every new piece; a normal-speed timer
    /// keeps running across spawns.
    fn spawn_piece(&mut self, sequence: &mut PieceSequence) {
        let kind = sequence.get(self.spawn_index);
        self.spawn_index += 1;
        let piece = Piece::spawn(kind);

        self.leave_fast_fall();
        if self.board.is_colliding(&piece) {
            debug!(?kind, spawn_index = self.spawn_index, "top out");
            self.state = SessionState::GameOver {
                blink: Blink::new(&self.timing),
            };
            self.events.push(SessionEvent::GameOver);
            return;
        }

        let timer = match self.state {
            SessionState::Playing { timer, .. } if timer.speed().is_normal() => timer,
            _ => FallTimer::new(FallSpeed::Normal, &self.timing),
        };
        self.state = SessionState::Playing { piece, timer };
    }

    /// Emits the end of the fast-fall loop if it is running.
    fn leave_fast_fall(&mut self) {
        if self.fall_speed().is_some_and(|speed| speed.is_fast()) {
            self.push_sound(SoundEvent::StopLoop(SoundCue::FastFall));
        }
    }

    fn push_sound(&mut self, sound: SoundEvent) {
        self.events.push(SessionEvent::Sound(sound));
    }

    #[cfg(test)]
    pub(crate) fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    #[cfg(test)]
    pub(crate) fn set_quota(&mut self, quota: Quota) {
        self.quota = quota;
    }
}

#[cfg(test)]
mod tests {
    use crate::{Block, PieceKind, core::board::tests::board_from_bottom};

    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn playing(kinds: &[PieceKind]) -> (PlayerSession, PieceSequence) {
        let timing = TimingConfig::default();
        let mut sequence = PieceSequence::from_kinds(kinds);
        let mut session = PlayerSession::new(timing, 1);
        session.start(1);
        session.tick(Duration::from_secs(5), &mut sequence);
        assert!(session.state().is_playing());
        session.drain_events().for_each(drop);
        (session, sequence)
    }

    fn events(session: &mut PlayerSession) -> Vec<SessionEvent> {
        session.drain_events().collect()
    }

    #[test]
    #[should_panic(expected = "fall_interval_ms")]
    fn test_zero_timing_is_rejected_on_creation() {
        let timing = TimingConfig {
            fall_interval_ms: 0,
            ..TimingConfig::default()
        };
        _ = PlayerSession::new(timing, 1);
    }

    #[test]
    fn test_commands_are_noops_when_idle() {
        let mut sequence = PieceSequence::from_kinds(&[PieceKind::T]);
        let mut session = PlayerSession::new(TimingConfig::default(), 1);

        assert!(session.try_move_left().unwrap_err().is_not_playing());
        assert!(session.try_rotate().unwrap_err().is_not_playing());
        session.hard_drop(&mut sequence);
        session.move_down(&mut sequence);
        session.set_fast_fall(true);

        assert!(session.state().is_idle());
        assert_eq!(session.board(), &Board::EMPTY);
        assert_eq!(session.spawn_index(), 0);
        assert!(events(&mut session).is_empty());
    }

    #[test]
    fn test_start_waits_for_wipe() {
        let timing = TimingConfig::default();
        let mut sequence = PieceSequence::from_kinds(&[PieceKind::I]);
        let mut session = PlayerSession::new(timing, 1);

        session.start(1);
        assert!(session.state().is_starting());
        session.tick(timing.wipe_step() * 21, &mut sequence);
        assert!(session.state().is_starting());
        session.tick(timing.wipe_step(), &mut sequence);
        assert!(session.state().is_playing());
        assert_eq!(events(&mut session), [SessionEvent::Started]);

        let piece = session.falling_piece().unwrap();
        assert_eq!(piece.kind(), PieceKind::I);
        assert_eq!((piece.x(), piece.y()), (3, 0));
        assert_eq!(session.spawn_index(), 1);
        assert_eq!(session.fall_speed(), Some(FallSpeed::Normal));
    }

    #[test]
    fn test_moves_roll_back_at_walls() {
        let (mut session, _) = playing(&[PieceKind::O]);
        for _ in 0..4 {
            session.try_move_left().unwrap();
        }
        assert!(session.try_move_left().unwrap_err().is_collision());
        assert_eq!(session.falling_piece().unwrap().x(), 0);

        for _ in 0..8 {
            session.try_move_right().unwrap();
        }
        assert!(session.try_move_right().is_err());
        assert_eq!(session.falling_piece().unwrap().x(), 8);
    }

    #[test]
    fn test_rotation_emits_sound_or_rolls_back() {
        let (mut session, _) = playing(&[PieceKind::I]);
        // Upright I would reach row -1 at spawn.
        assert!(session.try_rotate().is_err());
        assert_eq!(session.falling_piece().unwrap().shape(), PieceKind::I.shape());
        assert!(events(&mut session).is_empty());

        session.try_soft_drop().unwrap();
        session.try_rotate().unwrap();
        let piece = session.falling_piece().unwrap();
        assert_eq!((piece.x(), piece.y()), (4, 0));
        assert_eq!(
            events(&mut session),
            [SessionEvent::Sound(SoundEvent::Play(SoundCue::Rotate))]
        );
    }

    #[test]
    fn test_fall_timer_moves_piece_down() {
        let (mut session, mut sequence) = playing(&[PieceKind::T]);
        session.tick(499 * MS, &mut sequence);
        assert_eq!(session.falling_piece().unwrap().y(), 0);
        session.tick(MS, &mut sequence);
        assert_eq!(session.falling_piece().unwrap().y(), 1);
    }

    #[test]
    fn test_fall_timer_locks_landed_piece() {
        let (mut session, mut sequence) = playing(&[PieceKind::O, PieceKind::T]);
        session.tick(500 * MS * 18, &mut sequence);
        assert_eq!(session.falling_piece().unwrap().y(), 18);
        session.tick(500 * MS, &mut sequence);

        assert_eq!(session.falling_piece().unwrap().kind(), PieceKind::T);
        assert_eq!(session.board().block_at(4, 19), Some(Block::Piece(PieceKind::O)));
        assert_eq!(
            events(&mut session),
            [SessionEvent::Sound(SoundEvent::Play(SoundCue::Touchdown))]
        );
    }

    #[test]
    fn test_fast_fall_swaps_timer_and_loops_sound() {
        let (mut session, mut sequence) = playing(&[PieceKind::T, PieceKind::T]);
        session.set_fast_fall(true);
        session.set_fast_fall(true);
        assert_eq!(session.fall_speed(), Some(FallSpeed::Fast));
        assert_eq!(
            events(&mut session),
            [SessionEvent::Sound(SoundEvent::StartLoop(SoundCue::FastFall))]
        );

        session.tick(100 * MS, &mut sequence);
        assert_eq!(session.falling_piece().unwrap().y(), 2);

        session.set_fast_fall(false);
        assert_eq!(session.fall_speed(), Some(FallSpeed::Normal));
        assert_eq!(
            events(&mut session),
            [SessionEvent::Sound(SoundEvent::StopLoop(SoundCue::FastFall))]
        );
    }

    #[test]
    fn test_spawn_resets_fast_fall() {
        let (mut session, mut sequence) = playing(&[PieceKind::T, PieceKind::O]);
        session.set_fast_fall(true);
        session.hard_drop(&mut sequence);

        assert_eq!(session.falling_piece().unwrap().kind(), PieceKind::O);
        assert_eq!(session.fall_speed(), Some(FallSpeed::Normal));
        assert_eq!(
            events(&mut session),
            [
                SessionEvent::Sound(SoundEvent::StartLoop(SoundCue::FastFall)),
                SessionEvent::Sound(SoundEvent::Play(SoundCue::Touchdown)),
                SessionEvent::Sound(SoundEvent::StopLoop(SoundCue::FastFall)),
            ]
        );
    }

    #[test]
    fn test_hard_drop_completes_bottom_row() {
        let (mut session, mut sequence) = playing(&[PieceKind::I, PieceKind::T]);
        session.set_board(board_from_bottom(&["####.#####"]));

        session.try_soft_drop().unwrap();
        session.try_rotate().unwrap();
        session.hard_drop(&mut sequence);

        assert_eq!(session.stats().score(), 100);
        assert_eq!(session.stats().total_cleared_lines(), 1);
        assert_eq!(session.quota().buckets(), [9, 0, 0, 0]);
        assert_eq!(
            session.board(),
            &{
                let mut expected = Board::EMPTY;
                for y in 17..20 {
                    expected.fill_block_at(4, y, Block::Piece(PieceKind::I));
                }
                expected
            }
        );
        assert!(session.board().rows().next().unwrap().iter().all(|b| b.is_empty()));
        assert_eq!(
            events(&mut session),
            [
                SessionEvent::Sound(SoundEvent::Play(SoundCue::Rotate)),
                SessionEvent::Sound(SoundEvent::Play(SoundCue::LineClear)),
                SessionEvent::LinesCleared {
                    lines: 1,
                    points: 100
                },
            ]
        );
    }

    #[test]
    fn test_tetris_scores_escalating_points() {
        let (mut session, mut sequence) = playing(&[PieceKind::I, PieceKind::T]);
        session.set_board(board_from_bottom(&[
            "####.#####",
            "####.#####",
            "####.#####",
            "####.#####",
        ]));
        session.try_soft_drop().unwrap();
        session.try_rotate().unwrap();
        session.hard_drop(&mut sequence);

        assert_eq!(session.stats().score(), 1000);
        assert_eq!(session.board(), &Board::EMPTY);
    }

    #[test]
    fn test_quota_met_stops_session() {
        let (mut session, mut sequence) = playing(&[PieceKind::I, PieceKind::T]);
        session.set_board(board_from_bottom(&["###....###"]));
        session.set_quota(Quota::from_buckets([1, 0, 0, 0]));
        session.hard_drop(&mut sequence);

        assert!(session.quota().is_satisfied());
        assert!(session.state().is_idle());
        assert_eq!(session.spawn_index(), 1);
        assert_eq!(events(&mut session).last(), Some(&SessionEvent::QuotaMet));
    }

    #[test]
    fn test_top_out_and_blink_then_restart() {
        let (mut session, mut sequence) = playing(&[PieceKind::O, PieceKind::O, PieceKind::T]);
        let mut column = Board::EMPTY;
        for y in 2..20 {
            column.fill_block_at(4, y, Block::Piece(PieceKind::L));
        }
        session.set_board(column);
        session.hard_drop(&mut sequence);

        assert!(session.state().is_game_over());
        assert!(session.falling_piece().is_none());
        assert_eq!(
            events(&mut session),
            [
                SessionEvent::Sound(SoundEvent::Play(SoundCue::Touchdown)),
                SessionEvent::GameOver
            ]
        );

        // Game over ignores the plain start gesture and stop.
        session.start(1);
        session.stop();
        assert!(session.state().is_game_over());

        let timing = TimingConfig::default();
        session.tick(timing.blink_interval(), &mut sequence);
        let SessionState::GameOver { blink } = session.state() else {
            panic!("expected game over");
        };
        assert!(blink.message().is_restart_hint());

        session.start_or_restart(1);
        assert!(session.state().is_starting());
        assert_eq!(session.spawn_index(), 0);
        assert_eq!(session.stats().score(), 0);
        session.tick(Duration::from_secs(5), &mut sequence);
        assert_eq!(session.falling_piece().unwrap().kind(), PieceKind::O);
        assert_eq!(session.board(), &Board::EMPTY);
    }

    #[test]
    fn test_stop_keeps_board_and_cancels_timer() {
        let (mut session, mut sequence) = playing(&[PieceKind::O, PieceKind::T]);
        session.hard_drop(&mut sequence);
        let board = session.board().clone();
        session.set_fast_fall(true);
        events(&mut session);

        session.stop();
        assert!(session.state().is_idle());
        assert_eq!(session.board(), &board);
        assert_eq!(
            events(&mut session),
            [SessionEvent::Sound(SoundEvent::StopLoop(SoundCue::FastFall))]
        );

        session.tick(Duration::from_secs(10), &mut sequence);
        assert_eq!(session.board(), &board);
        assert_eq!(session.spawn_index(), 2);
    }

    #[test]
    fn test_level_up_waits_for_wipe_and_banner() {
        let timing = TimingConfig::default();
        let (mut session, mut sequence) = playing(&[PieceKind::O, PieceKind::T]);
        session.hard_drop(&mut sequence);
        let score = session.stats().score();

        session.begin_level_up(2);
        assert_eq!(session.quota(), &Quota::for_level(2));
        session.tick(timing.wipe_step() * 22, &mut sequence);
        let SessionState::LevelUp { wipe, level, .. } = session.state() else {
            panic!("expected level up");
        };
        assert!(wipe.is_finished());
        assert_eq!(*level, 2);

        session.tick(timing.level_banner() - MS, &mut sequence);
        assert!(session.state().is_level_up());
        session.tick(MS, &mut sequence);

        assert!(session.state().is_playing());
        assert_eq!(session.board(), &Board::EMPTY);
        assert_eq!(session.spawn_index(), 1);
        assert_eq!(session.stats().score(), score);
        assert_eq!(session.falling_piece().unwrap().kind(), PieceKind::O);
    }

    #[test]
    fn test_reset_clears_everything() {
        let (mut session, mut sequence) = playing(&[PieceKind::O, PieceKind::T]);
        session.set_board(board_from_bottom(&["#########."]));
        session.hard_drop(&mut sequence);
        session.reset(3);

        assert!(session.state().is_idle());
        assert_eq!(session.board(), &Board::EMPTY);
        assert_eq!(session.stats(), &GameStats::new());
        assert_eq!(session.quota(), &Quota::for_level(3));
        assert_eq!(session.spawn_index(), 0);
    }
}
