use image::{RgbaImage, imageops::FilterType};

use crate::foundation::core::Rect;

/// Straight RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Source-over for straight (non-premultiplied) RGBA8.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255 - sa;
    let da = u32::from(dst[3]);
    let out_a = sa + mul_div255(da, inv);
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    // Channels are weighted by coverage, then divided back out of the combined alpha.
    let denom = out_a * 255;
    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = u32::from(src[i]) * sa * 255 + u32::from(dst[i]) * da * inv;
        out[i] = ((num + denom / 2) / denom).min(255) as u8;
    }
    out[3] = out_a.min(255) as u8;
    out
}

/// Fill the pixel-snapped area of `rect` (clipped to the canvas) with `color`.
pub fn fill_rect(dst: &mut RgbaImage, rect: Rect, color: image::Rgba<u8>) {
    let Some((x0, y0, x1, y1)) = snap_clip(dst, rect) else {
        return;
    };
    for y in y0..y1 {
        for x in x0..x1 {
            dst.put_pixel(x, y, color);
        }
    }
}

/// Draw `src` over `dst` with its top-left corner at `(x, y)`. Negative and out-of-range
/// offsets are clipped.
pub fn blend_over(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + sw).min(dw);
    let y_end = (y + sh).min(dh);
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    for dy in y_start..y_end {
        for dx in x_start..x_end {
            let s = src.get_pixel((dx - x) as u32, (dy - y) as u32).0;
            let d = dst.get_pixel_mut(dx as u32, dy as u32);
            d.0 = over(d.0, s);
        }
    }
}

/// Stretch `src` to fill the pixel-snapped `rect` and draw it over `dst`.
///
/// Only the source pixels that land on the canvas are resampled, so a rect far larger than
/// `dst` costs no more than the visible part of it.
pub fn draw_image_stretched(dst: &mut RgbaImage, src: &RgbaImage, rect: Rect, filter: FilterType) {
    let w = rect.width().round();
    let h = rect.height().round();
    if !(w >= 1.0 && h >= 1.0) || src.width() == 0 || src.height() == 0 {
        return;
    }
    let x = rect.x0.round();
    let y = rect.y0.round();

    // Visible span of the rect, relative to its top-left corner.
    let vx0 = (-x).max(0.0);
    let vy0 = (-y).max(0.0);
    let vx1 = (f64::from(dst.width()) - x).min(w);
    let vy1 = (f64::from(dst.height()) - y).min(h);
    if vx0 >= vx1 || vy0 >= vy1 {
        return;
    }

    let (x, y) = (x as i64, y as i64);
    if vx0 == 0.0 && vy0 == 0.0 && vx1 == w && vy1 == h {
        let (w, h) = (w as u32, h as u32);
        if src.dimensions() == (w, h) {
            blend_over(dst, src, x, y);
        } else {
            let scaled = image::imageops::resize(src, w, h, filter);
            blend_over(dst, &scaled, x, y);
        }
        return;
    }

    // Source pixels per destination pixel.
    let (sw, sh) = (f64::from(src.width()), f64::from(src.height()));
    let (kx, ky) = (sw / w, sh / h);
    let sx0 = (vx0 * kx).floor();
    let sy0 = (vy0 * ky).floor();
    let sx1 = (vx1 * kx).ceil().min(sw);
    let sy1 = (vy1 * ky).ceil().min(sh);

    let ox = (sx0 / kx).round();
    let oy = (sy0 / ky).round();
    let cw = ((sx1 / kx).round() - ox) as u32;
    let ch = ((sy1 / ky).round() - oy) as u32;
    if cw == 0 || ch == 0 {
        return;
    }
    let crop = image::imageops::crop_imm(
        src,
        sx0 as u32,
        sy0 as u32,
        (sx1 - sx0) as u32,
        (sy1 - sy0) as u32,
    )
    .to_image();
    let scaled = image::imageops::resize(&crop, cw, ch, filter);
    blend_over(dst, &scaled, x + ox as i64, y + oy as i64);
}

/// Composite a premultiplied RGBA8 layer of the same size as `dst` (as produced by
/// `tiny_skia`) over `dst`.
pub fn blend_premul_layer(dst: &mut RgbaImage, layer_premul: &[u8]) {
    if layer_premul.len() != dst.as_raw().len() {
        tracing::warn!(
            layer = layer_premul.len(),
            canvas = dst.as_raw().len(),
            "premultiplied layer size mismatch, skipping"
        );
        return;
    }
    for (d, s) in dst.pixels_mut().zip(layer_premul.chunks_exact(4)) {
        let a = u32::from(s[3]);
        if a == 0 {
            continue;
        }
        let unpremul = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
        d.0 = over(d.0, [unpremul(s[0]), unpremul(s[1]), unpremul(s[2]), s[3]]);
    }
}

fn snap_clip(dst: &RgbaImage, rect: Rect) -> Option<(u32, u32, u32, u32)> {
    let w = f64::from(dst.width());
    let h = f64::from(dst.height());
    let x0 = rect.x0.round().clamp(0.0, w) as u32;
    let y0 = rect.y0.round().clamp(0.0, h) as u32;
    let x1 = rect.x1.round().clamp(0.0, w) as u32;
    let y1 = rect.y1.round().clamp(0.0, h) as u32;
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0, y0, x1, y1))
}

fn mul_div255(x: u32, y: u32) -> u32 {
    (x * y + 127) / 255
}

#[cfg(test)]
#[path = "../../tests/unit/compose/raster.rs"]
mod tests;
