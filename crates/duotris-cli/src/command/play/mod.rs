use std::path::PathBuf;

use duotris_engine::{Duel, MusicPlayer, PieceSeed, PieceSequence};
use ratatui_runtime::Runtime;
use tracing::{Level, info};

use crate::{
    command::play::{
        app::DuelApp,
        audio::{Audio, AudioBackend},
    },
    config::Config,
    logging,
};

mod app;
mod audio;
mod input;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the shared piece sequence (32 hex digits)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// JSON file with timings and the music playlist
    #[clap(long)]
    config: Option<PathBuf>,
    /// Write logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
    /// Log level used with --log-file
    #[clap(long, default_value = "info")]
    log_level: Level,
    /// Where sound cues and music go (rodio, silent, bell)
    #[clap(long, default_value = "rodio")]
    audio: AudioBackend,
    /// Start with background music turned off
    #[clap(long, default_value_t = false)]
    no_music: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        config,
        log_file,
        log_level,
        audio,
        no_music,
    } = arg;

    if let Some(path) = log_file {
        logging::init(path, *log_level)?;
    }

    let config = match config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    info!(seed = ?seed, audio = ?audio, "starting duotris");

    let sequence = seed.map_or_else(PieceSequence::new, PieceSequence::with_seed);
    let duel = Duel::with_sequence(config.timing, sequence);
    let music = MusicPlayer::new(config.playlist, !*no_music);
    let mut app = DuelApp::new(duel, music, Audio::new(*audio));

    Runtime::new().run(&mut app)?;
    Ok(())
}
