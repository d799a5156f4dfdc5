use either::Either::{Left, Right};
use ulanding::sans::{ProtocolVersion, VersionDetector, detect::Detected};

/// Feed bytes until a version is detected.
fn detect(bytes: &[u8]) -> Option<Detected> {
    let mut state = VersionDetector::new();

    for &b in bytes {
        state = match state.advance(b) {
            Left(state) => state,
            Right(detected) => return Some(detected),
        };
    }

    None
}

#[test]
fn detect_standard() {
    let detected = detect(&[0x00, 0x13, 0xFE, 0x01, 0x64]).unwrap();
    assert_eq!(detected.version, ProtocolVersion::Standard { firmware: 1 });
    assert_eq!(detected.replay(), &[0xFE, 0x01]);
}

#[test]
fn detect_legacy() {
    let detected = detect(&[0x48, 0x0A, 0x05, 0x48]).unwrap();
    assert_eq!(detected.version, ProtocolVersion::Legacy);
    assert_eq!(detected.replay(), &[0x48, 0x0A, 0x05, 0x48]);
}

#[test]
fn undecided_without_enough_bytes() {
    assert!(detect(&[]).is_none());
    assert!(detect(&[0x01, 0x02, 0x03]).is_none());
    assert!(detect(&[0xFE]).is_none());
    assert!(detect(&[0x48, 0x8A, 0x85]).is_none());
}

#[test]
fn legacy_rejection_resumes_after_candidate() {
    // The window after a failed legacy header holds a standard frame start.
    let detected = detect(&[0x48, 0xFE, 0x02, 0x99]).unwrap();
    assert_eq!(detected.version, ProtocolVersion::Standard { firmware: 2 });
    assert_eq!(detected.replay(), &[0xFE, 0x02, 0x99]);
}

#[test]
fn legacy_rejection_keeps_later_header() {
    // The header at position three becomes the next candidate.
    assert!(detect(&[0x48, 0x81, 0x48, 0x82]).is_none());

    let detected = detect(&[0x48, 0x81, 0x48, 0x82, 0x83, 0x48]).unwrap();
    assert_eq!(detected.version, ProtocolVersion::Legacy);
    assert_eq!(detected.replay(), &[0x48, 0x82, 0x83, 0x48]);
}

#[test]
fn standard_rejected_by_legacy_data_byte() {
    assert!(detect(&[0xFE, 0x85, 0x01]).is_none());

    // A second standard header is itself a candidate.
    let detected = detect(&[0xFE, 0xFE, 0x03]).unwrap();
    assert_eq!(detected.version, ProtocolVersion::Standard { firmware: 3 });
    assert_eq!(detected.replay(), &[0xFE, 0x03]);
}

#[test]
fn standard_rejected_by_legacy_header() {
    // A legacy data byte equal to 0xFE, followed by the legacy header.
    let detected = detect(&[0x81, 0xFE, 0x48, 0x81, 0x82, 0x48]).unwrap();
    assert_eq!(detected.version, ProtocolVersion::Legacy);
    assert_eq!(detected.replay(), &[0x48, 0x81, 0x82, 0x48]);
}

#[test]
fn resolved_version_is_kept() {
    let mut version = ProtocolVersion::default();
    assert!(!version.is_known());
    assert_eq!(version.protocol(), None);

    version.resolve(ProtocolVersion::Standard { firmware: 7 });
    assert_eq!(version.firmware(), Some(7));
    assert_eq!(version.protocol().unwrap().frame_len(), 6);
}
