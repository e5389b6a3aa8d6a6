#![cfg(unix)]

use std::fs;
use std::os::unix::fs::symlink;

use file_manager::{FileManager, Outcome};
use tempfile::tempdir;

/// A link whose target is gone is still a listed entry and can be removed.
#[test]
fn dangling_link_can_be_deleted() {
    let td = tempdir().unwrap();
    symlink(td.path().join("gone"), td.path().join("link")).unwrap();
    let mut fm = FileManager::with_root(td.path()).unwrap();
    assert_eq!(fm.list_files(), vec!["link"]);

    let res = fm.delete_file("link");
    assert_eq!(res.outcome, Outcome::Success, "{res}");
    assert!(fs::symlink_metadata(td.path().join("link")).is_err());
    assert!(fm.list_files().is_empty());
}

#[test]
fn dangling_link_can_be_renamed() {
    let td = tempdir().unwrap();
    symlink(td.path().join("gone"), td.path().join("link")).unwrap();
    let mut fm = FileManager::with_root(td.path()).unwrap();

    let res = fm.rename_file("link", "pointer");
    assert_eq!(res.outcome, Outcome::Success, "{res}");
    assert!(fs::symlink_metadata(td.path().join("pointer")).unwrap().file_type().is_symlink());
    assert_eq!(fm.list_files(), vec!["pointer"]);
}

#[test]
fn dangling_link_is_not_a_directory() {
    let td = tempdir().unwrap();
    symlink(td.path().join("gone"), td.path().join("link")).unwrap();
    let mut fm = FileManager::with_root(td.path()).unwrap();

    assert_eq!(fm.delete_directory("link").outcome, Outcome::InvalidInput);
    assert!(fs::symlink_metadata(td.path().join("link")).is_ok());
}

/// Deleting a link to a directory removes the link, never the target's contents.
#[test]
fn directory_link_delete_keeps_target() {
    let td = tempdir().unwrap();
    let outside = tempdir().unwrap();
    fs::write(outside.path().join("keep.txt"), "x").unwrap();
    symlink(outside.path(), td.path().join("shortcut")).unwrap();
    let mut fm = FileManager::with_root(td.path()).unwrap();

    assert_eq!(fm.delete_file("shortcut").outcome, Outcome::InvalidInput);
    let res = fm.delete_directory("shortcut");
    assert_eq!(res.outcome, Outcome::Success, "{res}");
    assert!(outside.path().join("keep.txt").exists());
    assert!(fm.list_files().is_empty());
}
