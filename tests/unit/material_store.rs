//! Unit tests for the filesystem material store.

#![allow(clippy::expect_used)]

use cert_deploy::application::ports::MaterialStore;
use cert_deploy::domain::{StoreError, TargetLayout};
use cert_deploy::infra::fs::{FsMaterialStore, sha256_hex, write_material};

use crate::helpers::{FULLCHAIN, KEY, NoopReporter, combined_layout, issued_request};

#[test]
fn test_split_layout_writes_chain_and_key_separately() {
    let src = tempfile::tempdir().expect("tempdir");
    let target = tempfile::tempdir().expect("tempdir");
    let request = issued_request(src.path(), "example.com");
    let layout =
        TargetLayout::split(target.path(), "{domain}.crt", "private/{domain}.key").expect("layout");

    let written = write_material(&request, &layout).expect("write");

    let crt = target.path().join("example.com.crt");
    let key = target.path().join("private").join("example.com.key");
    assert_eq!(
        written.iter().map(|(p, _)| p.clone()).collect::<Vec<_>>(),
        vec![crt.clone(), key.clone()]
    );
    assert_eq!(std::fs::read(&crt).expect("crt"), FULLCHAIN);
    assert_eq!(std::fs::read(&key).expect("key"), KEY);
    assert_eq!(written[1].1, sha256_hex(KEY));
}

#[test]
fn test_unavailable_directory_commits_nothing() {
    let src = tempfile::tempdir().expect("tempdir");
    let target = tempfile::tempdir().expect("tempdir");
    let request = issued_request(src.path(), "example.com");
    // A regular file where the key directory should be.
    std::fs::write(target.path().join("private"), b"").expect("blocker");
    let layout =
        TargetLayout::split(target.path(), "{domain}.crt", "private/{domain}.key").expect("layout");

    let err = write_material(&request, &layout).expect_err("must fail");

    assert!(matches!(err, StoreError::DirectoryUnavailable { .. }));
    assert!(!target.path().join("example.com.crt").exists());
}

#[test]
fn test_missing_key_leaves_previous_material() {
    let src = tempfile::tempdir().expect("tempdir");
    let target = tempfile::tempdir().expect("tempdir");
    let request = issued_request(src.path(), "example.com");
    let pem = target.path().join("example.com.pem");
    std::fs::write(&pem, b"previous").expect("seed");
    std::fs::remove_file(request.key_path()).expect("remove key");

    let err = write_material(&request, &combined_layout(target.path())).expect_err("must fail");

    assert_eq!(err.reason_code(), "source_unreadable");
    assert_eq!(std::fs::read(&pem).expect("read"), b"previous");
}

#[test]
fn test_existing_file_is_replaced() {
    let src = tempfile::tempdir().expect("tempdir");
    let target = tempfile::tempdir().expect("tempdir");
    let request = issued_request(src.path(), "example.com");
    let pem = target.path().join("example.com.pem");
    std::fs::write(&pem, b"previous").expect("seed");

    write_material(&request, &combined_layout(target.path())).expect("write");

    let content = std::fs::read(&pem).expect("read");
    assert!(content.starts_with(FULLCHAIN));
    assert!(content.ends_with(KEY));
}

#[tokio::test]
async fn test_store_returns_written_paths() {
    let src = tempfile::tempdir().expect("tempdir");
    let target = tempfile::tempdir().expect("tempdir");
    let request = issued_request(src.path(), "example.com");

    let written = FsMaterialStore
        .write(&request, &combined_layout(target.path()), &NoopReporter)
        .await
        .expect("write");

    assert_eq!(written.len(), 1);
    assert!(written.contains(&target.path().join("example.com.pem")));
}
