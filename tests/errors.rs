use elisp_deps::error::{RenderError, ScanError};
use std::io;
use std::path::PathBuf;

#[test]
fn only_missing_root_is_fatal() {
    assert!(!ScanError::RootNotFound(PathBuf::from("repos")).is_recoverable());
    assert!(ScanError::PackageFileNotFound {
        package: "foo".to_string(),
        dir: PathBuf::from("repos/foo"),
    }
    .is_recoverable());
    assert!(ScanError::Read {
        path: PathBuf::from("repos/foo/foo.el"),
        source: io::Error::from(io::ErrorKind::PermissionDenied),
    }
    .is_recoverable());
}

#[test]
fn messages_name_the_offending_path() {
    let err = ScanError::PackageFileNotFound {
        package: "foo".to_string(),
        dir: PathBuf::from("repos/foo"),
    };
    assert_eq!(
        err.to_string(),
        "no source file found for package 'foo' in repos/foo"
    );
    assert!(ScanError::RootNotFound(PathBuf::from("nowhere"))
        .to_string()
        .contains("'nowhere' does not exist"));
}

#[test]
fn missing_tool_message_names_graphviz() {
    let message = RenderError::ToolUnavailable {
        tool: "dot".to_string(),
    }
    .to_string();
    assert!(message.contains("Graphviz `dot`"));
    assert!(message.contains("--dot-only"));
}
