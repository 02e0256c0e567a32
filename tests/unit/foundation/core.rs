use super::*;

#[test]
fn raw_frame_rejects_mismatched_length() {
    assert!(RawFrame::new(2, 2, vec![0; 15]).is_err());
    assert!(RawFrame::new(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn mirror_swaps_columns_and_keeps_rows() {
    let data = vec![
        1, 1, 1, 255, 2, 2, 2, 255, 3, 3, 3, 255, //
        4, 4, 4, 255, 5, 5, 5, 255, 6, 6, 6, 255,
    ];
    let mut f = RawFrame::new(3, 2, data).unwrap();
    f.mirror_horizontal();
    assert_eq!(f.pixel(0, 0), Some([3, 3, 3, 255]));
    assert_eq!(f.pixel(1, 0), Some([2, 2, 2, 255]));
    assert_eq!(f.pixel(2, 0), Some([1, 1, 1, 255]));
    assert_eq!(f.pixel(0, 1), Some([6, 6, 6, 255]));
    assert_eq!(f.pixel(2, 1), Some([4, 4, 4, 255]));
}

#[test]
fn mirror_twice_is_identity() {
    let data: Vec<u8> = (0..(5 * 3 * 4)).map(|v| v as u8).collect();
    let orig = RawFrame::new(5, 3, data).unwrap();
    let mut f = orig.clone();
    f.mirror_horizontal();
    assert_ne!(f, orig);
    f.mirror_horizontal();
    assert_eq!(f, orig);
}

#[test]
fn pixel_out_of_bounds_is_none() {
    let f = RawFrame::solid(2, 2, [9, 9, 9, 9]).unwrap();
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 2), None);
}

#[test]
fn hex_colors_parse_and_print() {
    let c = Rgb8::from_hex("#b19cd9").unwrap();
    assert_eq!(c, Rgb8::new(0xb1, 0x9c, 0xd9));
    assert_eq!(c.to_hex(), "#b19cd9");
    assert_eq!(Rgb8::from_hex("1a1a1a").unwrap(), Rgb8::new(26, 26, 26));
    assert!(Rgb8::from_hex("#fff").is_err());
    assert!(Rgb8::from_hex("#gggggg").is_err());
}
