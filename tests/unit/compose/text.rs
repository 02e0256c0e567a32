use super::*;

#[test]
fn strip_date_is_short_month_day_year() {
    let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    assert_eq!(format_strip_date(d), "Jan 5, 2024");
    let d = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
    assert_eq!(format_strip_date(d), "Dec 25, 2023");
}

#[test]
fn xml_specials_are_escaped() {
    assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
}

#[test]
fn empty_font_book_renders_blank_layer() {
    let fonts = FontBook::empty();
    assert_eq!(fonts.face_count(), 0);
    let layer = render_text_layer(
        &fonts,
        "Jan 5, 2024",
        Point::new(50.0, 20.0),
        DATE_FONT_SIZE_PX,
        Rgb8::new(0x66, 0x66, 0x66),
        (100, 30),
    )
    .unwrap();
    assert_eq!(layer.len(), 100 * 30 * 4);
    assert!(layer.iter().all(|&b| b == 0));
}

#[test]
fn system_fonts_draw_centered_text_when_available() {
    let fonts = FontBook::system();
    if fonts.face_count() == 0 {
        eprintln!("no system fonts; skipping glyph coverage check");
        return;
    }
    let (w, h) = (200u32, 40u32);
    let layer = render_text_layer(
        &fonts,
        "Jan 5, 2024",
        Point::new(100.0, 30.0),
        DATE_FONT_SIZE_PX,
        Rgb8::new(0, 0, 0),
        (w, h),
    )
    .unwrap();

    let mut min_x = u32::MAX;
    let mut max_x = 0u32;
    for (i, px) in layer.chunks_exact(4).enumerate() {
        if px[3] > 0 {
            let x = (i as u32) % w;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
        }
    }
    assert!(min_x <= max_x, "no glyph pixels drawn");
    let center = f64::from(min_x + max_x) / 2.0;
    assert!((center - 100.0).abs() <= 6.0, "text center {center}");
}
