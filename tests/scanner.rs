use elisp_deps::core::scanner::{package_name, FileScanner};
use elisp_deps::error::ScanError;
use std::fs;
use std::path::Path;

fn touch<P: AsRef<Path>>(p: P) {
    fs::write(p, ";; test\n").unwrap();
}

#[test]
fn scanner_selects_main_file_per_package() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("citar")).unwrap();
    fs::create_dir_all(root.join("single")).unwrap();
    fs::create_dir_all(root.join("dash.el")).unwrap();

    touch(root.join("citar/citar.el"));
    touch(root.join("citar/citar-file.el"));
    touch(root.join("citar/README.org")); // ignored
    touch(root.join("single/whatever.el"));
    touch(root.join("dash.el/dash.el"));
    touch(root.join("dash.el/dash-functional.el"));

    let scan = FileScanner::new().scan_packages(root).unwrap();

    let names: Vec<_> = scan.packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["citar", "dash", "single"]);
    assert!(scan.skipped.is_empty());

    for package in &scan.packages {
        assert_eq!(package.files.len(), 1, "{}", package.name);
    }
    assert!(scan.packages[0].files[0].ends_with("citar/citar.el"));
    assert!(scan.packages[2].files[0].ends_with("single/whatever.el"));
}

#[test]
fn scanner_reads_all_files_when_requested() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("citar")).unwrap();
    touch(root.join("citar/citar.el"));
    touch(root.join("citar/citar-file.el"));

    let scan = FileScanner::new()
        .with_only_main_file(false)
        .scan_packages(root)
        .unwrap();
    assert_eq!(scan.packages[0].files.len(), 2);
}

#[test]
fn packages_without_main_file_are_skipped_not_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("ambiguous")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::create_dir_all(root.join("ok")).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    touch(root.join("ambiguous/a.el"));
    touch(root.join("ambiguous/b.el"));
    touch(root.join("ok/ok.el"));
    touch(root.join("stray.el")); // files at the root are not packages

    let scan = FileScanner::new().scan_packages(root).unwrap();

    assert_eq!(scan.packages.len(), 1);
    assert_eq!(scan.packages[0].name, "ok");

    let skipped: Vec<_> = scan.skipped.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(skipped, vec!["ambiguous", "empty"]);
    assert!(scan.skipped[0].reason.contains("no source file found"));
}

#[test]
fn missing_root_is_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = FileScanner::new()
        .scan_packages(&dir.path().join("missing"))
        .unwrap_err();
    assert!(matches!(err, ScanError::RootNotFound(_)));
}

#[test]
fn package_name_drops_el_suffix_and_lowercases() {
    assert_eq!(package_name(Path::new("/repos/Dash.el")).as_deref(), Some("dash"));
    assert_eq!(package_name(Path::new("/repos/magit")).as_deref(), Some("magit"));
    assert_eq!(package_name(Path::new("/repos/.el")).as_deref(), Some(".el"));
}

#[test]
fn same_package_in_two_directories_is_not_also_skipped() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("foo")).unwrap();
    fs::create_dir_all(root.join("foo.el")).unwrap();
    touch(root.join("foo/foo.el"));
    // no main file here
    touch(root.join("foo.el/a.el"));
    touch(root.join("foo.el/b.el"));

    let scan = FileScanner::new().scan_packages(root).unwrap();

    let names: Vec<_> = scan.packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["foo"]);
    assert!(scan.skipped.is_empty(), "{:?}", scan.skipped);
    assert_eq!(scan.packages[0].files.len(), 1);
    assert!(scan.packages[0].files[0].ends_with("foo/foo.el"));
}

#[test]
fn same_package_in_two_directories_merges_all_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("foo")).unwrap();
    fs::create_dir_all(root.join("foo.el")).unwrap();
    touch(root.join("foo/foo.el"));
    touch(root.join("foo.el/foo-extra.el"));

    let scan = FileScanner::new()
        .with_only_main_file(false)
        .scan_packages(root)
        .unwrap();

    assert_eq!(scan.packages.len(), 1);
    assert_eq!(scan.packages[0].files.len(), 2);
    assert!(scan.skipped.is_empty());
}
