use std::io;

use duotris_engine::{PlayerId, SoundCue, SoundEvent, Track};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use self::synth::{cue_melody, track_melody};

mod synth;

const SFX_VOLUME: f32 = 0.35;
const MUSIC_VOLUME: f32 = 0.12;

/// Where sound cues go, selected with `--audio`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum AudioBackend {
    /// Synthesized cues and music on the default output device.
    #[default]
    Rodio,
    /// Log cues only.
    Silent,
    /// Ring the terminal bell on line clears.
    Bell,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub(crate) enum AudioError {
    #[display("failed to ring the terminal bell")]
    Bell { source: io::Error },
    #[display("no audio output device")]
    Stream { source: rodio::StreamError },
    #[display("failed to open an audio channel")]
    Play { source: rodio::PlayError },
}

/// Output for sound effects and background music.
pub(crate) trait AudioSink {
    fn play_sound(&mut self, player: PlayerId, sound: SoundEvent) -> Result<(), AudioError>;

    /// Switches the music channel to `track`, or stops it on `None`.
    fn play_music(&mut self, track: Option<&Track>) -> Result<(), AudioError>;
}

#[derive(Debug, Default)]
pub(crate) struct SilentSink;

impl AudioSink for SilentSink {
    fn play_sound(&mut self, player: PlayerId, sound: SoundEvent) -> Result<(), AudioError> {
        debug!(%player, ?sound, "sound");
        Ok(())
    }

    fn play_music(&mut self, track: Option<&Track>) -> Result<(), AudioError> {
        match track {
            Some(track) => debug!(title = %track.title, "music"),
            None => debug!("music stopped"),
        }
        Ok(())
    }
}

/// Terminal bell for line clears; every other cue is silent.
#[derive(Debug)]
pub(crate) struct BellSink<W> {
    out: W,
}

impl<W> BellSink<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W> AudioSink for BellSink<W>
where
    W: io::Write,
{
    fn play_sound(&mut self, _player: PlayerId, sound: SoundEvent) -> Result<(), AudioError> {
        if sound == SoundEvent::Play(SoundCue::LineClear) {
            self.out
                .write_all(b"\x07")
                .and_then(|()| self.out.flush())
                .map_err(|source| AudioError::Bell { source })?;
        }
        Ok(())
    }

    fn play_music(&mut self, _track: Option<&Track>) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Cues and music synthesized on the default output device.
///
/// One-shot cues get a detached channel each. The fast-fall loop and the
/// music hold their channel, and dropping it stops playback.
pub(crate) struct RodioSink {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    loops: [Option<Sink>; 2],
    music: Option<Sink>,
}

impl RodioSink {
    pub(crate) fn new() -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|source| AudioError::Stream { source })?;
        Ok(Self {
            _stream: stream,
            handle,
            loops: [None, None],
            music: None,
        })
    }

    fn open<S>(&self, volume: f32, source: S) -> Result<Sink, AudioError>
    where
        S: rodio::Source<Item = f32> + Send + 'static,
    {
        let sink = Sink::try_new(&self.handle).map_err(|source| AudioError::Play { source })?;
        sink.set_volume(volume);
        sink.append(source);
        Ok(sink)
    }
}

impl AudioSink for RodioSink {
    fn play_sound(&mut self, player: PlayerId, sound: SoundEvent) -> Result<(), AudioError> {
        let index = player.index();
        match sound {
            SoundEvent::Play(cue) => self.open(SFX_VOLUME, cue_melody(player, cue))?.detach(),
            SoundEvent::StartLoop(cue) => {
                self.loops[index] = None;
                let sink = self.open(SFX_VOLUME, cue_melody(player, cue).looping())?;
                self.loops[index] = Some(sink);
            }
            SoundEvent::StopLoop(_) => self.loops[index] = None,
        }
        Ok(())
    }

    fn play_music(&mut self, track: Option<&Track>) -> Result<(), AudioError> {
        self.music = None;
        if let Some(track) = track {
            self.music = Some(self.open(MUSIC_VOLUME, track_melody(track))?);
        }
        Ok(())
    }
}

/// Forwards cues to a sink, and falls back to silence after its first
/// failure so a broken device never interrupts the game.
pub(crate) struct Audio {
    sink: Box<dyn AudioSink>,
}

impl Audio {
    pub(crate) fn new(backend: AudioBackend) -> Self {
        let sink: Box<dyn AudioSink> = match backend {
            AudioBackend::Rodio => match RodioSink::new() {
                Ok(sink) => Box::new(sink),
                Err(err) => {
                    warn!(%err, "audio disabled");
                    Box::new(SilentSink)
                }
            },
            AudioBackend::Silent => Box::new(SilentSink),
            AudioBackend::Bell => Box::new(BellSink::new(io::stdout())),
        };
        Self::with_sink(sink)
    }

    pub(crate) fn with_sink(sink: Box<dyn AudioSink>) -> Self {
        Self { sink }
    }

    pub(crate) fn play_sound(&mut self, player: PlayerId, sound: SoundEvent) {
        let result = self.sink.play_sound(player, sound);
        self.check(result);
    }

    pub(crate) fn play_music(&mut self, track: Option<&Track>) {
        let result = self.sink.play_music(track);
        self.check(result);
    }

    fn check(&mut self, result: Result<(), AudioError>) {
        if let Err(err) = result {
            warn!(%err, "audio disabled");
            self.sink = Box::new(SilentSink);
        }
    }
}
