use std::{f32::consts::TAU, time::Duration};

use duotris_engine::{PlayerId, SoundCue, Track};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

pub(crate) const SAMPLE_RATE: u32 = 48_000;

const ATTACK: Duration = Duration::from_millis(5);
const RELEASE: Duration = Duration::from_millis(20);

/// A minor pentatonic, two octaves.
const SCALE_HZ: [f32; 8] = [
    220.0, 261.63, 293.66, 329.63, 392.0, 440.0, 523.25, 587.33,
];

const TRACK_NOTES: usize = 16;
const TRACK_NOTE_LEN: Duration = Duration::from_millis(250);

/// Sine notes with a soft second harmonic, played one after another.
///
/// A note of `0.0` Hz is a rest. Every note is shaped by a short attack and
/// release so consecutive notes do not click.
#[derive(Debug, Clone)]
pub(crate) struct Melody {
    notes: Vec<f32>,
    note_frames: u64,
    looping: bool,
    frame: u64,
}

impl Melody {
    pub(crate) fn new(notes: Vec<f32>, note_len: Duration) -> Self {
        Self {
            notes,
            note_frames: frames(note_len).max(1),
            looping: false,
            frame: 0,
        }
    }

    /// Repeats the melody until the sink playing it is dropped.
    pub(crate) fn looping(self) -> Self {
        Self {
            looping: true,
            ..self
        }
    }

    fn len_frames(&self) -> u64 {
        self.note_frames * self.notes.len() as u64
    }
}

fn frames(duration: Duration) -> u64 {
    let frames = duration.as_nanos() * u128::from(SAMPLE_RATE) / 1_000_000_000;
    u64::try_from(frames).unwrap_or(u64::MAX)
}

#[expect(clippy::cast_precision_loss)]
fn sample(freq_hz: f32, pos: u64, note_frames: u64) -> f32 {
    if freq_hz <= 0.0 {
        return 0.0;
    }
    let attack = frames(ATTACK).min(note_frames / 2).max(1);
    let release = frames(RELEASE).min(note_frames / 2).max(1);
    let remaining = note_frames - pos;
    let envelope = if pos < attack {
        pos as f32 / attack as f32
    } else if remaining < release {
        remaining as f32 / release as f32
    } else {
        1.0
    };
    let phase = TAU * freq_hz * pos as f32 / SAMPLE_RATE as f32;
    (phase.sin() + (phase * 2.0).sin() * 0.3) / 1.3 * envelope
}

impl Iterator for Melody {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.len_frames();
        if total == 0 || (!self.looping && self.frame >= total) {
            return None;
        }
        let frame = self.frame % total;
        self.frame += 1;
        let note = self.notes[usize::try_from(frame / self.note_frames).ok()?];
        Some(sample(note, frame % self.note_frames, self.note_frames))
    }
}

impl rodio::Source for Melody {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        let nanos = self.len_frames().saturating_mul(1_000_000_000) / u64::from(SAMPLE_RATE);
        (!self.looping).then(|| Duration::from_nanos(nanos))
    }
}

/// Sound of one cue. Player 2 is pitched a fifth lower.
pub(crate) fn cue_melody(player: PlayerId, cue: SoundCue) -> Melody {
    let (notes, note_ms): (&[f32], u64) = match cue {
        SoundCue::Touchdown => (&[110.0], 60),
        SoundCue::Rotate => (&[880.0], 30),
        SoundCue::FastFall => (&[196.0, 0.0], 40),
        SoundCue::LineClear => (&[523.25, 659.25, 783.99, 1046.5], 70),
    };
    let pitch = match player {
        PlayerId::One => 1.0,
        PlayerId::Two => 2.0 / 3.0,
    };
    Melody::new(
        notes.iter().map(|freq| freq * pitch).collect(),
        Duration::from_millis(note_ms),
    )
}

/// Looping tune for a playlist entry; the same title always gets the same
/// tune.
pub(crate) fn track_melody(track: &Track) -> Melody {
    // FNV-1a
    let seed = track
        .title
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
        });
    let mut rng = Pcg32::seed_from_u64(seed);
    let notes = (0..TRACK_NOTES)
        .map(|_| SCALE_HZ[rng.random_range(0..SCALE_HZ.len())])
        .collect();
    Melody::new(notes, TRACK_NOTE_LEN).looping()
}
