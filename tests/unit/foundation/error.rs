use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PhotoStripError::device_unavailable("x")
            .to_string()
            .contains("camera unavailable:")
    );
    assert!(
        PhotoStripError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PhotoStripError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        PhotoStripError::asset_load("teddy.png", "missing")
            .to_string()
            .contains("asset load failed for 'teddy.png'")
    );
}

#[test]
fn incomplete_session_reports_count() {
    let err = PhotoStripError::IncompleteSession { got: 3 };
    assert_eq!(err.to_string(), "incomplete session: expected 4 stills, got 3");
}

#[test]
fn capture_aborted_is_one_based_for_humans() {
    let err = PhotoStripError::CaptureAborted {
        slot: 1,
        attempts: 20,
    };
    assert_eq!(err.to_string(), "capture aborted at photo 2 after 20 attempts");
}

#[test]
fn only_frame_not_ready_is_retryable() {
    assert!(
        PhotoStripError::FrameNotReady {
            width: 0,
            height: 0
        }
        .is_retryable()
    );
    assert!(!PhotoStripError::device_unavailable("denied").is_retryable());
    assert!(!PhotoStripError::IncompleteSession { got: 0 }.is_retryable());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PhotoStripError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
