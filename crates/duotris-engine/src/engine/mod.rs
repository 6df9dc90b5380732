//! Game rules and state on top of the [`core`](crate::core) primitives.
//!
//! - [`PlayerSession`] - One player's game: falling piece, locking, scoring,
//!   quota and the timers of the current state
//! - [`Duel`] - Two sessions sharing a piece stream and a level
//! - [`PieceSequence`] - Shared, lazily generated piece stream
//! - [`Quota`] - Line clears required to finish a level
//! - [`GameStats`] - Score and line counters
//! - [`TimingConfig`] - Fall, wipe, blink and banner timings
//! - [`MusicPlayer`] - Background playlist
//!
//! Nothing here reads a clock. Callers feed elapsed time through `tick` and
//! collect what happened with `drain_events`.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use duotris_engine::{Duel, DuelEvent, PlayerCommand, PlayerId, TimingConfig};
//!
//! let mut duel = Duel::new(TimingConfig::default());
//! duel.apply(PlayerId::One, PlayerCommand::StartOrRestart);
//! duel.tick(Duration::from_secs(1));
//!
//! duel.apply(PlayerId::One, PlayerCommand::HardDrop);
//! for event in duel.drain_events() {
//!     if let DuelEvent::GameOver(player) = event {
//!         println!("{player} topped out");
//!     }
//! }
//! ```

pub use self::{duel::*, game_stats::*, music::*, piece_sequence::*, quota::*, session::*, timing::*};

mod duel;
mod game_stats;
mod music;
mod piece_sequence;
mod quota;
mod session;
mod timing;
