use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use assert_fs::prelude::*;
use file_manager::{FileManager, Outcome};

fn on_disk(dir: &Path) -> Vec<String> {
    let set: BTreeSet<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    set.into_iter().collect()
}

#[test]
fn create_list_and_delete_directory() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("notes.txt").touch().unwrap();
    let mut fm = FileManager::with_root(dir.path()).unwrap();

    assert!(fm.create_directory("photos").is_success());
    assert_eq!(fm.list_directories(), vec!["photos"]);
    assert_eq!(fm.list_files(), vec!["notes.txt", "photos"]);

    assert_eq!(fm.create_directory("photos").outcome, Outcome::Conflict);
    assert_eq!(fm.create_directory("..").message, "Directory name cannot be empty.");

    dir.child("photos/2024/img.jpg").touch().unwrap();
    assert!(fm.delete_directory("photos").is_success());
    assert!(!dir.path().join("photos").exists());
    assert_eq!(fm.list_files(), on_disk(dir.path()));
}

#[test]
fn delete_directory_refuses_files() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("notes.txt").touch().unwrap();
    let mut fm = FileManager::with_root(dir.path()).unwrap();

    assert_eq!(fm.delete_directory("notes.txt").outcome, Outcome::InvalidInput);
    assert_eq!(fm.delete_directory("ghost").outcome, Outcome::NotFound);
    assert!(dir.path().join("notes.txt").is_file());
}

#[test]
fn rename_directory_keeps_contents() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("old/inner.txt").write_str("inner").unwrap();
    let mut fm = FileManager::with_root(dir.path()).unwrap();

    let res = fm.rename_directory("old", "new");
    assert!(res.is_success(), "{res}");
    dir.child("new/inner.txt").assert("inner");
    assert_eq!(fm.list_directories(), vec!["new"]);
}

#[test]
fn copy_directory_onto_itself_gets_suffix() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("src.d/a.txt").write_str("a").unwrap();
    dir.child("src.d/nested/b.txt").write_str("b").unwrap();
    let mut fm = FileManager::with_root(dir.path()).unwrap();

    let res = fm.copy_directory("src.d", ".");
    assert!(res.is_success(), "{res}");
    // Directories have no extension concept.
    assert_eq!(res.payload.as_deref(), Some("src.d_copy1"));
    dir.child("src.d_copy1/a.txt").assert("a");
    dir.child("src.d_copy1/nested/b.txt").assert("b");
    assert_eq!(fm.list_files(), on_disk(dir.path()));
}

#[test]
fn copy_directory_into_itself_is_rejected() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("tree/leaf.txt").touch().unwrap();
    let mut fm = FileManager::with_root(dir.path()).unwrap();

    let res = fm.copy_directory("tree", "tree");
    assert_eq!(res.outcome, Outcome::InvalidInput);
    assert_eq!(on_disk(&dir.path().join("tree")), vec!["leaf.txt"]);

    let res = fm.move_directory("tree", "tree");
    assert_eq!(res.outcome, Outcome::InvalidInput);
    assert!(dir.path().join("tree/leaf.txt").exists());
}

#[test]
fn move_directory_into_sibling() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("project/main.rs").write_str("fn main() {}").unwrap();
    dir.child("archive").create_dir_all().unwrap();
    let mut fm = FileManager::with_root(dir.path()).unwrap();

    let res = fm.move_directory("project", "archive");
    assert!(res.is_success(), "{res}");
    dir.child("archive/project/main.rs").assert("fn main() {}");
    assert_eq!(fm.list_files(), vec!["archive"]);
}

#[test]
fn move_directory_out_of_root() {
    let dir = assert_fs::TempDir::new().unwrap();
    let outside = assert_fs::TempDir::new().unwrap();
    dir.child("project/a.txt").touch().unwrap();
    let mut fm = FileManager::with_root(dir.path()).unwrap();

    let dest = outside.path().join("moved");
    let res = fm.move_directory("project", &dest.to_string_lossy());
    assert!(res.is_success(), "{res}");
    assert!(outside.path().join("moved/a.txt").exists());
    assert!(fm.list_files().is_empty());
}

#[test]
fn directory_copies_count_up() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("docs/readme").touch().unwrap();
    dir.child("docs_copy1").create_dir_all().unwrap();
    let mut fm = FileManager::with_root(dir.path()).unwrap();

    let res = fm.copy_directory_with_limit("docs", ".", 3);
    assert_eq!(res.payload.as_deref(), Some("docs_copy2"));
    assert!(dir.path().join("docs_copy2/readme").exists());
}
