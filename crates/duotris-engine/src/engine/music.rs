use std::time::Duration;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One entry of the background playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    /// Track length in seconds; `0` means unknown, and the track never
    /// advances on its own.
    #[serde(default)]
    pub length_secs: u64,
}

impl Track {
    #[must_use]
    pub fn length(&self) -> Duration {
        Duration::from_secs(self.length_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicEvent {
    /// Start playing the track at this playlist index.
    Play(usize),
    Stop,
}

/// Background music: random tracks from a playlist, independent of the game.
///
/// # Example
///
/// ```
/// use duotris_engine::{MusicEvent, MusicPlayer, Track};
///
/// let tracks = vec![
///     Track { title: "one".into(), length_secs: 90 },
///     Track { title: "two".into(), length_secs: 120 },
/// ];
/// let mut music = MusicPlayer::with_seed(tracks, true, 42);
/// music.start();
/// assert!(music.now_playing().is_some());
///
/// music.toggle();
/// assert!(music.now_playing().is_none());
/// assert_eq!(music.drain_events().last(), Some(MusicEvent::Stop));
/// ```
#[derive(Debug, Clone)]
pub struct MusicPlayer {
    tracks: Vec<Track>,
    enabled: bool,
    current: Option<usize>,
    position: Duration,
    rng: Pcg32,
    events: Vec<MusicEvent>,
}

impl MusicPlayer {
    #[must_use]
    pub fn new(tracks: Vec<Track>, enabled: bool) -> Self {
        Self::with_seed(tracks, enabled, rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(tracks: Vec<Track>, enabled: bool, seed: u64) -> Self {
        Self {
            tracks,
            enabled,
            current: None,
            position: Duration::ZERO,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn now_playing(&self) -> Option<&Track> {
        self.current.map(|index| &self.tracks[index])
    }

    /// Takes the events produced since the last call.
    pub fn drain_events(&mut self) -> impl Iterator<Item = MusicEvent> + '_ {
        self.events.drain(..)
    }

    /// Starts a random track if music is on and nothing is playing.
    pub fn start(&mut self) {
        if self.enabled && self.current.is_none() {
            self.play_random();
        }
    }

    /// Turns music on (with a random track) or off.
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        if self.enabled {
            self.play_random();
        } else if self.current.take().is_some() {
            self.events.push(MusicEvent::Stop);
        }
    }

    /// Jumps to a different random track.
    pub fn skip(&mut self) {
        if self.enabled {
            self.play_random();
        }
    }

    /// Moves to the next random track when the current one has ended.
    pub fn tick(&mut self, delta: Duration) {
        let Some(track) = self.now_playing() else {
            return;
        };
        let length = track.length();
        self.position += delta;
        if !length.is_zero() && self.position >= length {
            self.play_random();
        }
    }

    fn play_random(&mut self) {
        let len = self.tracks.len();
        let index = match (len, self.current) {
            (0, _) => return,
            (1, _) | (_, None) => self.rng.random_range(0..len),
            // Pick among the other tracks.
            (_, Some(current)) => {
                let index = self.rng.random_range(0..len - 1);
                if index >= current { index + 1 } else { index }
            }
        };
        debug!(title = %self.tracks[index].title, "playing track");
        self.current = Some(index);
        self.position = Duration::ZERO;
        self.events.push(MusicEvent::Play(index));
    }
}
