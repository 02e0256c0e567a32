//! Photostrip is the capture and compositing core of a four-shot photo booth.
//!
//! A live camera feed is sampled four times, each still is mirrored and run through a cosmetic
//! color filter, and the stills are stacked onto a themed vertical strip with optional character
//! overlays and a date stamp. The strip is exported as a lossless PNG.
//!
//! # Pipeline overview
//!
//! 1. **Capture**: [`CaptureDevice`] opens a [`VideoSource`]; [`capture_still`] mirrors,
//!    filters ([`apply_filter`]) and encodes one frame into a [`CapturedStill`].
//! 2. **Sequence**: [`Sequencer`] runs `Idle -> Countdown(0..=3) -> Complete`, absorbing
//!    not-ready frames as retries, and freezes four stills into a [`Session`].
//! 3. **Compose**: [`StripCompositor`] lays the session out per [`LayoutMode`] and
//!    [`ColorTheme`], loading overlays from an [`AssetStore`], into a [`CompositeStrip`].
//! 4. **Export**: [`encode_png`] and [`export_file_name`] produce `photobooth-<millis>.png`.
//!
//! [`PhotoBooth`] ties the steps together behind the command surface a UI layer needs.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Fail loudly**: a strip is never produced from fewer than four stills or with a missing
//!   overlay.
//! - **Straight RGBA8** everywhere except the text layer, which is unpremultiplied on blend.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod booth;
mod capture;
mod compose;
mod effects;
mod encode;
mod foundation;
mod session;

pub use assets::decode::decode_image;
pub use assets::store::{
    AssetStore, DEFAULT_OVERLAY_ASSETS, DecorativeAsset, FsAssetStore, MAX_OVERLAY_ASPECT,
    MemoryAssetStore, load_all, normalize_rel_path,
};
pub use booth::config::BoothConfig;
pub use booth::controller::{BoothView, PhotoBooth};
pub use capture::device::{
    CaptureDevice, Facing, ImageSequenceDevice, ImageSequenceSource, SolidColorSource,
    StreamConstraints, VideoSource,
};
pub use capture::frame::capture_still;
pub use capture::still::{CapturedStill, StillFormat};
pub use compose::layout::{
    BORDER_PX, DATE_BASELINE_INSET_PX, LayoutMode, LayoutPreset, OVERLAY_DROP_PX,
};
pub use compose::raster::{
    Rgba8, blend_over, blend_premul_layer, draw_image_stretched, fill_rect, over,
};
pub use compose::strip::{CompositeStrip, StripCompositor};
pub use compose::text::{
    DATE_FONT_FAMILY, DATE_FONT_SIZE_PX, FontBook, format_strip_date, render_text_layer,
};
pub use compose::theme::{ColorTheme, StripConfig};
pub use effects::filter::{FilterMode, apply_filter, filter_pixel, luma};
pub use encode::png::{
    EXPORT_PREFIX, decode_rgba, encode_png, ensure_parent_dir, export_file_name, to_data_url,
    write_export,
};
pub use foundation::core::{Point, RawFrame, Rect, Rgb8, Size};
pub use foundation::error::{PhotoStripError, PhotoStripResult};
pub use session::driver::{Flow, InstantPacer, Pacer, RunOutcome, ThreadPacer, run_sequence};
pub use session::record::{STILLS_PER_SESSION, Session};
pub use session::sequencer::{Sequencer, SequencerEvent, SequencerSettings, SequencerState, Step};
