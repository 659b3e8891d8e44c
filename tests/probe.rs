mod util;

use rmid3tag::{probe_path, Error};
use util::{frames, id3v1, id3v2, write_file};

#[test]
fn untagged_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "plain.mp3", &[&frames(4000)]);

    let stat = probe_path(&path).unwrap();
    assert!(!stat.v1_tag_present());
    assert!(!stat.v2_tag_present());
    assert_eq!(stat.frame_offset(), 0);
    assert_eq!(stat.frame_size(), 4000);
}

#[test]
fn both_tags_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "tagged.mp3",
        &[&id3v2(1024, 1024), &frames(4000), &id3v1("Song", "Band")],
    );

    let stat = probe_path(&path).unwrap();
    assert!(stat.v1_tag_present());
    assert!(stat.v2_tag_present());
    assert_eq!(stat.total_size(), 1034 + 4000 + 128);
    assert_eq!(stat.frame_offset(), 1034);
    assert_eq!(stat.frame_size(), 4000);
}

#[test]
fn over_padded_tag_larger_than_scan_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "padded.mp3",
        &[&id3v2(100, 100 + 10_000), &frames(2000)],
    );

    let stat = probe_path(&path).unwrap();
    assert_eq!(stat.frame_offset(), 10_110);
    assert_eq!(stat.frame_size(), 2000);
}

#[test]
fn stray_byte_before_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "stray.mp3", &[&[0x00], &id3v2(50, 50), &frames(500)]);

    let stat = probe_path(&path).unwrap();
    assert!(stat.v2_tag_present());
    assert_eq!(stat.frame_offset(), 61);
}

#[test]
fn truncated_audio_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "broken.mp3", &[&id3v2(300, 300), &[0u8; 500]]);

    match probe_path(&path) {
        Err(Error::Format(msg)) => assert_eq!(msg, "mpeg frame not found"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        probe_path(dir.path().join("nope.mp3")),
        Err(Error::Io(_))
    ));
}
