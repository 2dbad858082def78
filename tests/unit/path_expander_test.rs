//! Unit tests for path expansion.

use std::path::{Path, PathBuf};

use keyweb::services::path_expander::{expand, expand_with, file_url};

#[test]
fn test_home_relative_path() {
    let expanded = expand_with("~/docs/a.txt", Path::new("/home/ada"), Path::new("/work"));
    assert_eq!(expanded, "/home/ada/docs/a.txt");
}

#[test]
fn test_relative_path_uses_cwd() {
    let expanded = expand_with("rel.txt", Path::new("/home/ada"), Path::new("/work"));
    assert_eq!(expanded, "/work/rel.txt");
}

#[test]
fn test_absolute_path_ignores_cwd() {
    let expanded = expand_with("/etc/hosts", Path::new("/home/ada"), Path::new("/work"));
    assert_eq!(expanded, "/etc/hosts");
}

#[test]
fn test_dot_segments_are_normalized() {
    let expanded = expand_with("./a/../b/./c.txt", Path::new("/home/ada"), Path::new("/work/x"));
    assert_eq!(expanded, "/work/x/b/c.txt");

    let expanded = expand_with("~/../shared", Path::new("/home/ada"), Path::new("/work"));
    assert_eq!(expanded, "/home/shared");
}

#[test]
fn test_parent_of_root_stays_at_root() {
    let expanded = expand_with("../../..", Path::new("/home/ada"), Path::new("/a"));
    assert_eq!(expanded, "/");
}

#[test]
fn test_expand_uses_process_cwd() {
    let cwd = std::env::current_dir().unwrap();
    let expanded = PathBuf::from(expand("rel.txt"));
    assert!(expanded.is_absolute());
    assert!(expanded.starts_with(&cwd));
    assert!(expanded.ends_with("rel.txt"));
}

#[test]
fn test_expand_home_relative_ends_with_remainder() {
    let expanded = expand("~/docs/a.txt");
    assert!(expanded.starts_with('/'));
    assert!(expanded.ends_with("/docs/a.txt"));
}

#[test]
fn test_file_url_prefix() {
    assert_eq!(file_url("/tmp/x.html"), "file:///tmp/x.html");
}
