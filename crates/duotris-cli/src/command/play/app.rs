use std::time::Duration;

use crossterm::event::Event;
use duotris_engine::{BlinkMessage, Duel, DuelEvent, MusicEvent, MusicPlayer, PlayerId, SessionState};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    text::{Line, Span},
    widgets::Block as BlockWidget,
};
use ratatui_runtime::{App, RenderMode, Runtime};
use tracing::{debug, info};

use crate::{
    command::play::{audio::Audio, input::Input},
    view::widgets::{BoardDisplay, KeyBindingDisplay, Palette, PanelData, PlayerPanel, style},
};

const FPS: f64 = 60.0;

/// The two-player screen: both boards, their panels and the key help.
pub(crate) struct DuelApp {
    duel: Duel,
    music: MusicPlayer,
    audio: Audio,
    /// Latest game milestone, shown in the header.
    news: Option<String>,
    is_exiting: bool,
}

impl DuelApp {
    pub(crate) fn new(duel: Duel, music: MusicPlayer, audio: Audio) -> Self {
        Self {
            duel,
            music,
            audio,
            news: None,
            is_exiting: false,
        }
    }

    fn apply(&mut self, input: Input) {
        match input {
            Input::Player(player, command) => self.duel.apply(player, command),
            Input::ResetAll => self.duel.reset_all(),
            Input::ToggleMusic => self.music.toggle(),
            Input::SkipTrack => self.music.skip(),
            Input::Quit => self.is_exiting = true,
        }
        self.route_events();
    }

    /// Dispatches pending duel and music events: sounds go to the audio sink,
    /// game milestones to the log and the header.
    fn route_events(&mut self) {
        let duel_events: Vec<_> = self.duel.drain_events().collect();
        for event in duel_events {
            match event {
                DuelEvent::Sound { player, sound } => self.audio.play_sound(player, sound),
                DuelEvent::Started(player) => {
                    info!(%player, level = self.duel.level(), "game started");
                    self.news = Some(format!("{player} STARTED"));
                }
                DuelEvent::LinesCleared {
                    player,
                    lines,
                    points,
                } => {
                    debug!(%player, lines, points, "lines cleared");
                    self.news = Some(format!("{player} +{points}"));
                }
                DuelEvent::GameOver(player) => {
                    info!(%player, level = self.duel.level(), "game over");
                    self.news = Some(format!("{player} GAME OVER"));
                }
                DuelEvent::LevelUp { winner, level } => {
                    info!(%winner, level, "quota met, advancing level");
                    self.news = Some(format!("{winner} WINS, LEVEL {level}"));
                }
            }
        }

        let music_events: Vec<_> = self.music.drain_events().collect();
        for event in music_events {
            let track = match event {
                MusicEvent::Play(index) => self.music.tracks().get(index),
                MusicEvent::Stop => None,
            };
            self.audio.play_music(track);
        }
    }

    fn board_display(&self, player: PlayerId) -> BoardDisplay<'_> {
        let session = self.duel.player(player);
        let start_key = match player {
            PlayerId::One => "1",
            PlayerId::Two => "2",
        };
        let display = BoardDisplay::new(session.board(), Palette::for_player(player))
            .block(BlockWidget::bordered().title(Line::from(format!(" {player} ")).centered()));

        match session.state() {
            SessionState::Idle => display.message(format!("PRESS {start_key}\nTO START")),
            SessionState::Starting { wipe } => display.wipe(*wipe),
            SessionState::Playing { piece, .. } => display.falling_piece(*piece),
            SessionState::LevelUp { wipe, level, .. } => {
                let display = display.wipe(*wipe);
                if wipe.is_finished() {
                    display.message(format!("LEVEL {level}"))
                } else {
                    display
                }
            }
            SessionState::GameOver { blink } => match blink.message() {
                BlinkMessage::GameOver => display.message("GAME OVER"),
                BlinkMessage::RestartHint => {
                    display.message(format!("PRESS {start_key}\nTO RESTART"))
                }
            },
        }
    }

    fn header(&self) -> Line<'_> {
        let music = match self.music.now_playing() {
            Some(track) => format!("♪ {}", track.title),
            None if !self.music.is_enabled() => "♪ off".to_owned(),
            None => String::new(),
        };
        Line::from(vec![
            Span::styled("DUOTRIS", style::MESSAGE),
            Span::styled(format!("   LEVEL {}   ", self.duel.level()), style::DEFAULT),
            Span::styled(music, style::HINT),
            Span::styled(
                self.news.as_deref().map_or_else(String::new, |news| format!("   {news}")),
                style::DEFAULT,
            ),
        ])
        .centered()
    }
}

impl App for DuelApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(FPS));
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
        runtime.set_key_release_events(true);
        self.music.start();
        self.route_events();
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_event()
            && let Some(input) = Input::from_key_event(&key)
        {
            self.apply(input);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let help = KeyBindingDisplay::new(Input::bindings())
            .block(BlockWidget::bordered().title(Line::from(" KEYS ").centered()));
        let [p1_board, p2_board] = PlayerId::ALL.map(|player| self.board_display(player));
        let [p1_panel, p2_panel] = PlayerId::ALL.map(|player| {
            PlayerPanel::new(PanelData {
                player,
                session: self.duel.player(player),
                level: self.duel.level(),
            })
            .block(BlockWidget::bordered())
        });

        let [header_area, main_area, help_area] = frame.area().layout(
            &Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(p1_board.height()),
                Constraint::Length(help.height()),
            ])
            .flex(Flex::Center)
            .spacing(1),
        );
        let [p1_panel_area, p1_board_area, p2_board_area, p2_panel_area] = main_area.layout(
            &Layout::horizontal([
                Constraint::Length(p1_panel.width()),
                Constraint::Length(p1_board.width()),
                Constraint::Length(p2_board.width()),
                Constraint::Length(p2_panel.width()),
            ])
            .flex(Flex::Center)
            .spacing(2),
        );
        let panel_height = p1_panel.height();
        let top = |area: ratatui::layout::Rect| {
            let [area] = area.layout(&Layout::vertical([Constraint::Length(panel_height)]));
            area
        };

        frame.render_widget(self.header(), header_area);
        frame.render_widget(p1_panel, top(p1_panel_area));
        frame.render_widget(p1_board, p1_board_area);
        frame.render_widget(p2_board, p2_board_area);
        frame.render_widget(p2_panel, top(p2_panel_area));
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
        self.duel.tick(elapsed);
        self.music.tick(elapsed);
        self.route_events();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use duotris_engine::{PieceSeed, PieceSequence, TimingConfig, Track};

    use super::*;
    use crate::command::play::audio::SilentSink;

    fn app() -> DuelApp {
        let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
        let duel = Duel::with_sequence(TimingConfig::default(), PieceSequence::with_seed(seed));
        let tracks = vec![
            Track {
                title: "a".into(),
                length_secs: 60,
            },
            Track {
                title: "b".into(),
                length_secs: 60,
            },
        ];
        let music = MusicPlayer::with_seed(tracks, true, 0);
        DuelApp::new(duel, music, Audio::with_sink(Box::new(SilentSink)))
    }

    fn press(app: &mut DuelApp, code: KeyCode) {
        let mut runtime = Runtime::new();
        app.handle_event(
            &mut runtime,
            Event::Key(KeyEvent::new(code, KeyModifiers::NONE)),
        );
    }

    #[test]
    fn test_start_keys_start_each_player() {
        let mut app = app();
        let mut runtime = Runtime::new();
        press(&mut app, KeyCode::Char('1'));
        app.update(&mut runtime, Runtime::MAX_TICK_ELAPSED);
        app.update(&mut runtime, Runtime::MAX_TICK_ELAPSED);
        app.update(&mut runtime, Runtime::MAX_TICK_ELAPSED);
        app.update(&mut runtime, Runtime::MAX_TICK_ELAPSED);

        assert!(app.duel.player(PlayerId::One).state().is_playing());
        assert!(app.duel.player(PlayerId::Two).state().is_idle());

        press(&mut app, KeyCode::Char('2'));
        assert!(app.duel.player(PlayerId::Two).state().is_starting());
    }

    #[test]
    fn test_duel_events_update_header_news() {
        let mut app = app();
        let mut runtime = Runtime::new();
        assert_eq!(app.news, None);

        press(&mut app, KeyCode::Char('2'));
        for _ in 0..4 {
            app.update(&mut runtime, Runtime::MAX_TICK_ELAPSED);
        }
        assert_eq!(app.news.as_deref(), Some("P2 STARTED"));
        assert!(app.header().to_string().contains("P2 STARTED"));

        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('1'));
        for _ in 0..4 {
            app.update(&mut runtime, Runtime::MAX_TICK_ELAPSED);
        }
        assert_eq!(app.news.as_deref(), Some("P1 STARTED"));
    }

    #[test]
    fn test_music_keys() {
        let mut app = app();
        let mut runtime = Runtime::new();
        app.init(&mut runtime);
        let first = app.music.now_playing().cloned();
        assert!(first.is_some());

        press(&mut app, KeyCode::Char('n'));
        assert_ne!(app.music.now_playing().cloned(), first);

        press(&mut app, KeyCode::Char('m'));
        assert!(app.music.now_playing().is_none());
    }

    #[test]
    fn test_quit_and_reset() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('p'));
        assert!(app.duel.player(PlayerId::One).state().is_idle());
        assert!(!app.should_exit());

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit());
    }
}
