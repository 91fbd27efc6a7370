//! Integration tests for infrastructure_archive crate
//!
//! These tests pack archives to disk with the writer and read them back
//! through locations, handles and open archives.

use infrastructure_archive::*;

#[test]
fn test_pack_and_enumerate_through_file_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lib.jar");

    let mut writer = ArchiveWriter::new();
    writer
        .add_directory("org/example")
        .add_file("org/example/Main.class", b"main", Compression::Deflated)
        .add_file("org/example/util/Strings.class", b"strings", Compression::Stored);
    writer.write_to(&path).unwrap();

    let url = url::Url::from_file_path(&path).unwrap();
    let location = ArchiveLocation::parse(url.as_str()).unwrap();
    assert_eq!(location.path(), path.as_path());

    let archive = ArchiveHandle::open(location).unwrap().read().unwrap();
    let classes = archive.class_entries().unwrap();
    assert_eq!(classes.len(), 2);
    assert_eq!(classes[0].name.as_str(), "org.example.Main");
    assert_eq!(classes[1].name.as_str(), "org.example.util.Strings");
    assert_eq!(archive.read_entry(&classes[1].entry).unwrap(), b"strings");
}

#[test]
fn test_validation_is_eager() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.jar");

    let mut writer = ArchiveWriter::new();
    writer.add_file("a/A.class", b"aaaa", Compression::Stored);
    let bytes = writer.finish();
    std::fs::write(&path, &bytes[..bytes.len() - 10]).unwrap();

    let err = ArchiveHandle::open(ArchiveLocation::from_path(&path)).unwrap_err();
    assert!(matches!(err, ArchiveError::Malformed { .. }));
    assert_eq!(err.location(), path.display().to_string());
}

#[test]
fn test_large_deflated_entry_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.jar");
    let payload: Vec<u8> = (0..64 * 1024).map(|i| (i % 251) as u8).collect();

    let mut writer = ArchiveWriter::new();
    writer.add_file("big/Blob.class", &payload, Compression::Deflated);
    writer.write_to(&path).unwrap();

    let archive = ArchiveHandle::open(path.as_path().into()).unwrap().read().unwrap();
    let classes = archive.class_entries().unwrap();
    assert_eq!(archive.read_entry(&classes[0].entry).unwrap(), payload);
}
