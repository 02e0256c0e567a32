use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    compose::theme::StripConfig,
    effects::filter::FilterMode,
    foundation::error::{PhotoStripError, PhotoStripResult},
    session::sequencer::SequencerSettings,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Everything a booth needs besides the camera. Loaded from JSON; every field is optional.
pub struct BoothConfig {
    /// Filter applied to the next capture run.
    pub filter: FilterMode,
    /// Composition settings.
    pub strip: StripConfig,
    /// Countdown and retry timing.
    pub sequencer: SequencerSettings,
    /// Directory overlay assets are resolved from.
    pub asset_dir: Option<PathBuf>,
    /// Extra font directory for the date stamp.
    pub font_dir: Option<PathBuf>,
}

impl BoothConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> PhotoStripResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse and validate JSON from `r`.
    pub fn from_reader(r: impl Read) -> PhotoStripResult<Self> {
        let cfg: BoothConfig = serde_json::from_reader(r).context("parse booth config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every nested section.
    pub fn validate(&self) -> PhotoStripResult<()> {
        self.sequencer.validate()?;
        self.strip.validate()?;
        if let Some(dir) = &self.asset_dir
            && dir.as_os_str().is_empty()
        {
            return Err(PhotoStripError::validation("asset_dir must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/booth/config.rs"]
mod tests;
