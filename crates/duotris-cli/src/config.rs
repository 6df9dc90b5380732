use std::{fs::File, io, path::Path};

use anyhow::Context as _;
use duotris_engine::{TimingConfig, Track};
use serde::{Deserialize, Serialize};

/// Settings read from `--config`; anything missing keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) timing: TimingConfig,
    pub(crate) playlist: Vec<Track>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            playlist: default_playlist(),
        }
    }
}

fn default_playlist() -> Vec<Track> {
    [("Theme A", 84), ("Theme B", 112), ("Theme C", 97)]
        .into_iter()
        .map(|(title, length_secs)| Track {
            title: title.to_owned(),
            length_secs,
        })
        .collect()
}

impl Config {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = io::BufReader::new(file);
        let config = Self::from_reader(reader)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    fn from_reader<R>(reader: R) -> anyhow::Result<Self>
    where
        R: io::Read,
    {
        let config: Self = serde_json::from_reader(reader).context("Failed to parse JSON")?;
        config.timing.validate()?;
        Ok(config)
    }
}
