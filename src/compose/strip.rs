use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use image::{RgbaImage, imageops::FilterType};

use crate::{
    assets::store::{AssetStore, load_all},
    capture::still::CapturedStill,
    compose::{
        layout::LayoutMode,
        raster::{blend_premul_layer, draw_image_stretched, fill_rect},
        text::{DATE_FONT_SIZE_PX, FontBook, format_strip_date, render_text_layer},
        theme::{ColorTheme, StripConfig},
    },
    encode::png::{encode_png, export_file_name, to_data_url, write_export},
    foundation::{
        core::Rgb8,
        error::{PhotoStripError, PhotoStripResult},
    },
    session::record::{STILLS_PER_SESSION, Session},
};

#[derive(Clone, Debug)]
/// Finished strip: the composited raster and its PNG encoding. Never mutated after creation.
pub struct CompositeStrip {
    image: RgbaImage,
    png: Vec<u8>,
    date_label: String,
    theme: ColorTheme,
    layout: LayoutMode,
}

impl CompositeStrip {
    /// Composited pixels (straight RGBA8).
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// PNG export payload.
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// Canvas width.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Canvas height.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Date text drawn in the footer.
    pub fn date_label(&self) -> &str {
        &self.date_label
    }

    /// Theme the strip was composed with.
    pub fn theme(&self) -> ColorTheme {
        self.theme
    }

    /// Layout the strip was composed with.
    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    /// `data:` URL of the PNG payload.
    pub fn to_data_url(&self) -> String {
        to_data_url(&self.png)
    }

    /// Suggested download name for `now`.
    pub fn file_name(&self, now: DateTime<Utc>) -> String {
        export_file_name(now)
    }

    /// Write the PNG into `dir` and return its path.
    pub fn write_to_dir(
        &self,
        dir: &Path,
        now: DateTime<Utc>,
    ) -> PhotoStripResult<PathBuf> {
        write_export(&self.png, dir, now)
    }
}

/// Lays out four stills, overlays and a date stamp onto one strip raster.
#[derive(Clone, Debug, Default)]
pub struct StripCompositor {
    fonts: FontBook,
}

impl StripCompositor {
    /// Compositor drawing text with `fonts`.
    pub fn new(fonts: FontBook) -> Self {
        Self { fonts }
    }

    /// Fonts used for the date stamp.
    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Compose a completed session, stamped with the session's capture date.
    pub fn compose(
        &self,
        session: &Session,
        config: &StripConfig,
        assets: &dyn AssetStore,
    ) -> PhotoStripResult<CompositeStrip> {
        self.compose_stills(
            session.stills(),
            session.captured_at().date_naive(),
            config,
            assets,
        )
    }

    /// Compose raw stills.
    ///
    /// Fails with [`PhotoStripError::IncompleteSession`] unless exactly four stills are given,
    /// and with [`PhotoStripError::AssetLoad`] if overlays are enabled and any overlay cannot be
    /// loaded. No partial strip is ever returned. The asset store is not touched when overlays
    /// are disabled.
    #[tracing::instrument(
        skip_all,
        fields(
            stills = stills.len(),
            theme = %config.theme,
            layout = %config.layout,
            overlays = config.include_overlays
        )
    )]
    pub fn compose_stills(
        &self,
        stills: &[CapturedStill],
        date: NaiveDate,
        config: &StripConfig,
        assets: &dyn AssetStore,
    ) -> PhotoStripResult<CompositeStrip> {
        if stills.len() != STILLS_PER_SESSION {
            return Err(PhotoStripError::IncompleteSession { got: stills.len() });
        }
        config.validate()?;

        let overlays = if config.include_overlays {
            let names: Vec<String> = (0..STILLS_PER_SESSION)
                .filter_map(|i| config.overlay_for(i).map(str::to_string))
                .collect();
            load_all(assets, &names)?
        } else {
            Vec::new()
        };

        let decoded = stills
            .iter()
            .map(CapturedStill::decode)
            .collect::<PhotoStripResult<Vec<_>>>()?;

        let preset = config.layout.preset();
        let (width, height) = preset.canvas_size();
        let mut canvas = RgbaImage::from_pixel(width, height, config.theme.background().to_rgba());

        let white = Rgb8::new(0xff, 0xff, 0xff).to_rgba();
        for (i, still) in decoded.iter().enumerate() {
            fill_rect(&mut canvas, preset.border_rect(i), white);
            draw_image_stretched(&mut canvas, still, preset.still_rect(i), FilterType::Triangle);
            if let Some(asset) = overlays.get(i) {
                let rect = preset.overlay_rect(i, asset.aspect());
                draw_image_stretched(&mut canvas, &asset.image, rect, FilterType::CatmullRom);
            }
        }

        let date_label = format_strip_date(date);
        let layer = render_text_layer(
            &self.fonts,
            &date_label,
            preset.date_anchor(),
            DATE_FONT_SIZE_PX,
            config.theme.date_color(),
            (width, height),
        )?;
        blend_premul_layer(&mut canvas, &layer);

        let png = encode_png(&canvas)?;
        tracing::info!(width, height, bytes = png.len(), date = %date_label, "strip composed");
        Ok(CompositeStrip {
            image: canvas,
            png,
            date_label,
            theme: config.theme,
            layout: config.layout,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/strip.rs"]
mod tests;
