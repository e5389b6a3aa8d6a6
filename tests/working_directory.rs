use std::env;
use std::fs;

use file_manager::FileManager;
use serial_test::serial;
use tempfile::tempdir;

/// The root is captured at construction; later chdir calls do not move it.
#[test]
#[serial]
fn root_is_fixed_at_construction() {
    let original = env::current_dir().unwrap();
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    let first_real = fs::canonicalize(first.path()).unwrap();

    env::set_current_dir(&first_real).unwrap();
    let mut fm = FileManager::new().unwrap();
    env::set_current_dir(second.path()).unwrap();

    let res = fm.create_file("here.txt");
    env::set_current_dir(&original).unwrap();

    assert!(res.is_success(), "{res}");
    assert_eq!(fm.root(), first_real.as_path());
    assert!(first_real.join("here.txt").exists());
    assert!(!second.path().join("here.txt").exists());
}

#[test]
#[serial]
fn missing_root_is_rejected() {
    let td = tempdir().unwrap();
    let err = FileManager::with_root(td.path().join("absent")).unwrap_err();
    assert_eq!(err.outcome(), file_manager::Outcome::NotFound);
}
