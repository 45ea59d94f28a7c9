use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use picpickr::error::Error;
use picpickr::photos::PhotoList;
use picpickr::scan::{ScanOptions, scan_dir};
use tempfile::tempdir;

fn names(paths: &[PathBuf]) -> BTreeSet<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn keeps_only_recognised_extensions() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    for name in ["a.jpg", "b.txt", "c.PNG", "notes"] {
        fs::write(root.join(name), b"x").unwrap();
    }

    let photos = scan_dir(root, &ScanOptions::default()).unwrap();
    assert_eq!(photos.len(), 2);
    assert_eq!(
        names(&photos),
        BTreeSet::from(["a.jpg".to_string(), "c.PNG".to_string()])
    );
    for p in &photos {
        assert_eq!(p.parent(), Some(root), "path should be root joined with name");
    }
}

#[test]
fn skips_hidden_extensionless_names_and_directories() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::write(root.join(".png"), b"x").unwrap();
    fs::write(root.join("real.jpeg"), b"x").unwrap();
    fs::create_dir_all(root.join("album.jpg")).unwrap();
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("deep.png"), b"x").unwrap();

    let photos = scan_dir(root, &ScanOptions::default()).unwrap();
    assert_eq!(names(&photos), BTreeSet::from(["real.jpeg".to_string()]));
}

#[test]
fn all_supported_extensions_match_case_insensitively() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    let files = ["1.JPG", "2.jpeg", "3.Png", "4.raw", "5.BMP", "6.tiff", "7.gif", "8.tif"];
    for name in files {
        fs::write(root.join(name), b"x").unwrap();
    }
    let photos = scan_dir(root, &ScanOptions::default()).unwrap();
    assert_eq!(photos.len(), 6);
    assert!(!names(&photos).contains("7.gif"));
    assert!(!names(&photos).contains("8.tif"));
}

#[test]
fn empty_directory_yields_nothing() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("readme.md"), b"x").unwrap();
    let photos = scan_dir(tmp.path(), &ScanOptions::default()).unwrap();
    assert!(photos.is_empty());
}

#[test]
fn sort_by_name_orders_results() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    for name in ["c.jpg", "a.jpg", "b.png"] {
        fs::write(root.join(name), b"x").unwrap();
    }
    let opts = ScanOptions {
        sort_by_name: true,
        ..ScanOptions::default()
    };
    let photos = scan_dir(root, &opts).unwrap();
    let ordered: Vec<_> = photos
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(ordered, vec!["a.jpg", "b.png", "c.jpg"]);
}

#[test]
fn missing_directory_is_bad_dir() {
    let bogus = PathBuf::from("/this/path/does/not/exist/for_picpickr_test");
    let err = scan_dir(&bogus, &ScanOptions::default()).expect_err("scan should fail");
    assert!(matches!(err, Error::BadDir { .. }), "unexpected error: {err:?}");
    assert!(err.to_string().contains("for_picpickr_test"));
}

#[test]
fn file_is_not_a_directory() {
    let tmp = tempdir().unwrap();
    let file = tmp.path().join("a.jpg");
    fs::write(&file, b"x").unwrap();
    let err = scan_dir(&file, &ScanOptions::default()).expect_err("scan should fail");
    assert!(matches!(err, Error::BadDir { .. }));
}

#[test]
fn lenient_load_reports_and_returns_empty() {
    let bogus = PathBuf::from("/this/path/does/not/exist/for_picpickr_test");
    let photos = PhotoList::<()>::load(&bogus, &ScanOptions::default());
    assert!(photos.is_empty());
}

#[cfg(unix)]
#[test]
fn non_utf8_names_with_photo_extension_are_listed() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::write(root.join("ok.jpg"), b"x").unwrap();
    let odd = OsStr::from_bytes(b"caf\xe9.jpg");
    fs::write(root.join(odd), b"x").unwrap();
    fs::write(root.join(OsStr::from_bytes(b"caf\xe9.txt")), b"x").unwrap();

    let found = scan_dir(root, &ScanOptions::default()).unwrap();
    assert_eq!(found.len(), 2, "got {found:?}");
    assert!(found.iter().any(|p| p.file_name() == Some(odd)));
}
