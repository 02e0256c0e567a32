use std::{path::Path, sync::Arc};

use anyhow::Context as _;
use chrono::NaiveDate;

use crate::foundation::{
    core::{Point, Rgb8},
    error::{PhotoStripError, PhotoStripResult},
};

/// Font stack requested for the date stamp. Falls back to any available face.
pub const DATE_FONT_FAMILY: &str = "'DM Sans', sans-serif";
/// Date stamp size in pixels.
pub const DATE_FONT_SIZE_PX: f64 = 12.0;

/// `"Jan 5, 2024"`: short month, day without padding, four-digit year.
pub fn format_strip_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Shared font database used to rasterize strip text.
#[derive(Clone, Debug)]
pub struct FontBook {
    db: Arc<usvg::fontdb::Database>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::system()
    }
}

impl FontBook {
    /// System fonts only.
    pub fn system() -> Self {
        Self::with_font_dir(None)
    }

    /// System fonts plus every `.ttf`/`.otf`/`.ttc` file in `dir`.
    pub fn with_font_dir(dir: Option<&Path>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = dir {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "font database ready");
        Self { db: Arc::new(db) }
    }

    /// No fonts at all; text renders as nothing.
    pub fn empty() -> Self {
        Self {
            db: Arc::new(usvg::fontdb::Database::new()),
        }
    }

    /// Number of loaded font faces.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }
}

/// Rasterize one line of centered text into a premultiplied RGBA8 layer of `canvas` size.
///
/// `anchor` is the horizontal center and baseline of the text.
pub fn render_text_layer(
    fonts: &FontBook,
    text: &str,
    anchor: Point,
    size_px: f64,
    color: Rgb8,
    canvas: (u32, u32),
) -> PhotoStripResult<Vec<u8>> {
    let (w, h) = canvas;
    let svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><text x="{x}" y="{y}" font-family="{family}" font-size="{size_px}" fill="{fill}" text-anchor="middle">{body}</text></svg>"#,
        x = anchor.x,
        y = anchor.y,
        family = DATE_FONT_FAMILY,
        fill = color.to_hex(),
        body = escape_xml(text),
    );

    let opts = usvg::Options {
        fontdb: fonts.db.clone(),
        font_resolver: make_font_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts).context("parse text svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| PhotoStripError::validation(format!("cannot allocate {w}x{h} text layer")))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap.take())
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                ..Default::default()
            };

            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/text.rs"]
mod tests;
