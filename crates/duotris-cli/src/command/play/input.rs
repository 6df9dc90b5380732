use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use duotris_engine::{PlayerCommand, PlayerId};

use crate::view::widgets::KeyBindingGroup;

/// What a key stroke means to the duel screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Input {
    Player(PlayerId, PlayerCommand),
    ResetAll,
    ToggleMusic,
    SkipTrack,
    Quit,
}

impl Input {
    /// Maps a key event; letters are matched case-insensitively.
    ///
    /// Releases only end fast fall. Auto-repeat is honoured for movement,
    /// rotation and fast fall, and ignored for everything else.
    pub(crate) fn from_key_event(event: &KeyEvent) -> Option<Self> {
        use PlayerCommand as C;
        use PlayerId::{One, Two};

        let code = match event.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            code => code,
        };

        if event.kind == KeyEventKind::Release {
            return match code {
                KeyCode::Char('s') => Some(Self::Player(One, C::FastFallOff)),
                KeyCode::Down => Some(Self::Player(Two, C::FastFallOff)),
                _ => None,
            };
        }

        let repeatable = match code {
            KeyCode::Char('a') => Some(Self::Player(One, C::MoveLeft)),
            KeyCode::Char('d') => Some(Self::Player(One, C::MoveRight)),
            KeyCode::Char('w') => Some(Self::Player(One, C::Rotate)),
            KeyCode::Char('s') => Some(Self::Player(One, C::FastFallOn)),
            KeyCode::Left => Some(Self::Player(Two, C::MoveLeft)),
            KeyCode::Right => Some(Self::Player(Two, C::MoveRight)),
            KeyCode::Up => Some(Self::Player(Two, C::Rotate)),
            KeyCode::Down => Some(Self::Player(Two, C::FastFallOn)),
            _ => None,
        };
        if repeatable.is_some() {
            return repeatable;
        }
        if event.kind == KeyEventKind::Repeat {
            return None;
        }

        match code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Self::Quit)
            }
            KeyCode::Char(' ') => Some(Self::Player(One, C::HardDrop)),
            KeyCode::Char('1') => Some(Self::Player(One, C::StartOrRestart)),
            KeyCode::Enter => Some(Self::Player(Two, C::HardDrop)),
            KeyCode::Char('2') => Some(Self::Player(Two, C::StartOrRestart)),
            KeyCode::Char('p') => Some(Self::ResetAll),
            KeyCode::Char('m') => Some(Self::ToggleMusic),
            KeyCode::Char('n') => Some(Self::SkipTrack),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }

    pub(crate) fn bindings() -> &'static [KeyBindingGroup<'static>] {
        &[
            (
                "P1",
                &[
                    (&["a", "d"], "Move"),
                    (&["w"], "Rotate"),
                    (&["s"], "Fast fall"),
                    (&["Space"], "Drop"),
                    (&["1"], "Start"),
                ],
            ),
            (
                "P2",
                &[
                    (&["←", "→"], "Move"),
                    (&["↑"], "Rotate"),
                    (&["↓"], "Fast fall"),
                    (&["Enter"], "Drop"),
                    (&["2"], "Start"),
                ],
            ),
            (
                "  ",
                &[
                    (&["p"], "Reset all"),
                    (&["m"], "Music on/off"),
                    (&["n"], "Next track"),
                    (&["q", "Esc"], "Quit"),
                ],
            ),
        ]
    }
}
