use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Board;

/// Timer and animation settings, in milliseconds.
///
/// Missing fields in a configuration file fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Normal fall step.
    pub fall_interval_ms: u64,
    /// Fall step while fast fall is held.
    pub fast_fall_interval_ms: u64,
    /// One row of the screen wipe.
    pub wipe_step_ms: u64,
    /// Game-over message toggle.
    pub blink_interval_ms: u64,
    /// How long the level banner stays up before play resumes.
    pub level_banner_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fall_interval_ms: 500,
            fast_fall_interval_ms: 50,
            wipe_step_ms: 40,
            blink_interval_ms: 700,
            level_banner_ms: 2000,
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("timing setting `{name}` must be greater than zero")]
pub struct TimingConfigError {
    #[error(not(source))]
    name: &'static str,
}

impl TimingConfig {
    /// Rejects zero periods, which would make a periodic timer fire forever.
    pub fn validate(&self) -> Result<(), TimingConfigError> {
        let periods = [
            ("fall_interval_ms", self.fall_interval_ms),
            ("fast_fall_interval_ms", self.fast_fall_interval_ms),
            ("wipe_step_ms", self.wipe_step_ms),
            ("blink_interval_ms", self.blink_interval_ms),
        ];
        match periods.into_iter().find(|(_, ms)| *ms == 0) {
            Some((name, _)) => Err(TimingConfigError { name }),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn fall_interval(&self, speed: FallSpeed) -> Duration {
        match speed {
            FallSpeed::Normal => Duration::from_millis(self.fall_interval_ms),
            FallSpeed::Fast => Duration::from_millis(self.fast_fall_interval_ms),
        }
    }

    #[must_use]
    pub fn wipe_step(&self) -> Duration {
        Duration::from_millis(self.wipe_step_ms)
    }

    #[must_use]
    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }

    #[must_use]
    pub fn level_banner(&self) -> Duration {
        Duration::from_millis(self.level_banner_ms)
    }
}

/// Periodic trigger fed with elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticker {
    period: Duration,
    elapsed: Duration,
}

impl Ticker {
    /// `period` is non-zero for any validated [`TimingConfig`].
    fn new(period: Duration) -> Self {
        assert!(!period.is_zero(), "ticker period must be non-zero");
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    /// Adds `delta` and returns how many periods completed.
    fn advance(&mut self, delta: Duration) -> u32 {
        self.elapsed += delta;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum FallSpeed {
    Normal,
    Fast,
}

/// The fall step of one player.
///
/// There is exactly one per playing session; changing speed replaces it, which
/// also discards the time accumulated towards the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallTimer {
    speed: FallSpeed,
    ticker: Ticker,
}

impl FallTimer {
    #[must_use]
    pub fn new(speed: FallSpeed, timing: &TimingConfig) -> Self {
        Self {
            speed,
            ticker: Ticker::new(timing.fall_interval(speed)),
        }
    }

    #[must_use]
    pub fn speed(&self) -> FallSpeed {
        self.speed
    }

    /// Returns the number of fall steps due after `delta`.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.ticker.advance(delta)
    }
}

/// Colour band painted by the screen wipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipeShade {
    /// Front row of the sweep.
    Leading,
    Middle,
    /// Last painted row of the sweep.
    Trailing,
    /// Row the sweep has already passed.
    Cleared,
}

/// Bottom-to-top sweep of three colour bands across the board.
///
/// The sweep row starts at the bottom and moves up one row per step. The
/// leading band is at the sweep row with the middle and trailing bands below
/// it; rows further below are cleared. The wipe finishes once the trailing
/// band has left the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenWipe {
    ticker: Ticker,
    sweep: i32,
}

impl ScreenWipe {
    const BOTTOM: i32 = Board::HEIGHT as i32 - 1;

    #[must_use]
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            ticker: Ticker::new(timing.wipe_step()),
            sweep: Self::BOTTOM,
        }
    }

    #[must_use]
    pub fn sweep(&self) -> i32 {
        self.sweep
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.sweep + 2 < 0
    }

    /// Moves the sweep by the steps due after `delta`; returns `true` once
    /// the wipe has finished.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let steps = self.ticker.advance(delta);
        for _ in 0..steps {
            if self.is_finished() {
                break;
            }
            self.sweep -= 1;
        }
        self.is_finished()
    }

    /// Shade for board row `row`, or `None` if the sweep has not reached it.
    #[must_use]
    pub fn shade_at(&self, row: usize) -> Option<WipeShade> {
        let row = i32::try_from(row).ok()?;
        match row - self.sweep {
            ..0 => None,
            0 => Some(WipeShade::Leading),
            1 => Some(WipeShade::Middle),
            2 => Some(WipeShade::Trailing),
            _ => Some(WipeShade::Cleared),
        }
    }
}

/// Message shown by the game-over blink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum BlinkMessage {
    GameOver,
    RestartHint,
}

/// Periodic toggle between the game-over message and the restart hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blink {
    ticker: Ticker,
    message: BlinkMessage,
}

impl Blink {
    #[must_use]
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            ticker: Ticker::new(timing.blink_interval()),
            message: BlinkMessage::GameOver,
        }
    }

    #[must_use]
    pub fn message(&self) -> BlinkMessage {
        self.message
    }

    pub fn advance(&mut self, delta: Duration) {
        let toggles = self.ticker.advance(delta);
        if toggles % 2 == 1 {
            self.message = match self.message {
                BlinkMessage::GameOver => BlinkMessage::RestartHint,
                BlinkMessage::RestartHint => BlinkMessage::GameOver,
            };
        }
    }
}
