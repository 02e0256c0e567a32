use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::{
    assets::store::AssetStore,
    booth::config::BoothConfig,
    capture::device::{CaptureDevice, StreamConstraints, VideoSource},
    compose::{
        layout::LayoutMode,
        strip::{CompositeStrip, StripCompositor},
        text::FontBook,
        theme::ColorTheme,
    },
    effects::filter::FilterMode,
    foundation::error::{PhotoStripError, PhotoStripResult},
    session::{
        driver::{Pacer, RunOutcome, run_sequence},
        record::Session,
        sequencer::{Sequencer, SequencerState, Step},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which screen a UI layer should show.
pub enum BoothView {
    /// Live preview, waiting for the user to start.
    Camera,
    /// A capture run is counting down or shooting.
    Countdown,
    /// Four stills captured; the strip is (or is about to be) shown.
    Strip,
}

/// Command surface of one booth: camera, capture run, composition and download.
///
/// Holds at most one session and one composite. Settings can change at any time; the filter is
/// read when a run starts and the strip settings when a strip is composed.
pub struct PhotoBooth {
    config: BoothConfig,
    constraints: StreamConstraints,
    source: Option<Box<dyn VideoSource>>,
    sequencer: Sequencer,
    compositor: StripCompositor,
    strip: Option<CompositeStrip>,
}

impl std::fmt::Debug for PhotoBooth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoBooth")
            .field("config", &self.config)
            .field("camera", &self.source.is_some())
            .field("state", &self.sequencer.state())
            .field("strip", &self.strip.is_some())
            .finish()
    }
}

impl PhotoBooth {
    /// Booth using system fonts plus `config.font_dir`.
    pub fn new(config: BoothConfig) -> PhotoStripResult<Self> {
        let fonts = FontBook::with_font_dir(config.font_dir.as_deref());
        Self::with_fonts(config, fonts)
    }

    /// Booth with an explicit font book.
    pub fn with_fonts(config: BoothConfig, fonts: FontBook) -> PhotoStripResult<Self> {
        config.validate()?;
        let sequencer = Sequencer::new(config.sequencer.clone());
        Ok(Self {
            config,
            constraints: StreamConstraints::default(),
            source: None,
            sequencer,
            compositor: StripCompositor::new(fonts),
            strip: None,
        })
    }

    /// Current settings.
    pub fn config(&self) -> &BoothConfig {
        &self.config
    }

    /// Capture state machine (labels, state, session).
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Screen to show.
    pub fn view(&self) -> BoothView {
        match self.sequencer.state() {
            SequencerState::Idle => BoothView::Camera,
            SequencerState::Countdown { .. } => BoothView::Countdown,
            SequencerState::Complete => BoothView::Strip,
        }
    }

    /// Whether a camera stream is open and no run is in progress.
    pub fn capture_enabled(&self) -> bool {
        self.source.is_some() && !matches!(self.sequencer.state(), SequencerState::Countdown { .. })
    }

    /// Completed session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.sequencer.session()
    }

    /// Last composed strip, if any.
    pub fn strip(&self) -> Option<&CompositeStrip> {
        self.strip.as_ref()
    }

    /// Request a stream from `device`.
    ///
    /// On failure the previous stream (if any) is dropped and capture stays disabled until a
    /// later call succeeds. There is no automatic retry.
    pub fn start_camera(&mut self, device: &mut dyn CaptureDevice) -> PhotoStripResult<()> {
        self.sequencer.retake();
        self.source = None;
        match device.open(&self.constraints) {
            Ok(source) => {
                let (width, height) = source.native_size();
                tracing::info!(width, height, "camera stream started");
                self.source = Some(source);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "camera unavailable");
                Err(match err {
                    PhotoStripError::DeviceUnavailable(_) => err,
                    other => PhotoStripError::device_unavailable(other.to_string()),
                })
            }
        }
    }

    /// Start a four-shot run with the current filter. Any previous session and strip are
    /// discarded.
    pub fn take_photos(&mut self) -> PhotoStripResult<()> {
        if self.source.is_none() {
            return Err(PhotoStripError::device_unavailable("camera not started"));
        }
        self.strip = None;
        self.sequencer.start(self.config.filter)
    }

    /// Advance the running capture by one step.
    pub fn tick(&mut self) -> PhotoStripResult<Step> {
        let source = self
            .source
            .as_deref_mut()
            .ok_or_else(|| PhotoStripError::device_unavailable("camera not started"))?;
        self.sequencer.tick(source)
    }

    /// Start a run and drive it to the end with `pacer`.
    pub fn run_capture(&mut self, pacer: &mut dyn Pacer) -> PhotoStripResult<RunOutcome> {
        self.take_photos()?;
        let source = self
            .source
            .as_deref_mut()
            .ok_or_else(|| PhotoStripError::device_unavailable("camera not started"))?;
        run_sequence(&mut self.sequencer, source, pacer)
    }

    /// Drop the run (in progress or complete) and its strip; back to the camera view.
    pub fn retake(&mut self) {
        self.strip = None;
        self.sequencer.retake();
    }

    /// Compose the completed session with the current strip settings.
    pub fn compose(&mut self, assets: &dyn AssetStore) -> PhotoStripResult<&CompositeStrip> {
        let session = self.sequencer.session().ok_or(PhotoStripError::IncompleteSession {
            got: self.sequencer.captured_count(),
        })?;
        let strip = self.compositor.compose(session, &self.config.strip, assets)?;
        Ok(self.strip.insert(strip))
    }

    /// Write the composed strip into `dir` as `photobooth-<millis>.png`.
    pub fn download(&self, dir: &Path, now: DateTime<Utc>) -> PhotoStripResult<PathBuf> {
        let strip = self
            .strip
            .as_ref()
            .ok_or_else(|| PhotoStripError::validation("no strip to download; compose first"))?;
        strip.write_to_dir(dir, now)
    }

    /// Filter for the next run. A run already in progress keeps its filter.
    pub fn set_filter(&mut self, filter: FilterMode) {
        self.config.filter = filter;
    }

    /// Background for the next composition.
    pub fn set_theme(&mut self, theme: ColorTheme) {
        self.config.strip.theme = theme;
    }

    /// Layout for the next composition.
    pub fn set_layout(&mut self, layout: LayoutMode) {
        self.config.strip.layout = layout;
    }

    /// Toggle overlays for the next composition.
    pub fn set_include_overlays(&mut self, include: bool) {
        self.config.strip.include_overlays = include;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/booth/controller.rs"]
mod tests;
