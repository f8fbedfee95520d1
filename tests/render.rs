use elisp_deps::error::RenderError;
use elisp_deps::render::{append_extension, GraphvizRenderer};
use std::fs;
use std::path::{Path, PathBuf};

const DOT: &str = "digraph emacs_dependencies {\n  \"a\" -> \"b\";\n}\n";

#[test]
fn append_extension_keeps_dotted_stems() {
    assert_eq!(
        append_extension(Path::new("out/emacs_deps_29.1"), "png"),
        PathBuf::from("out/emacs_deps_29.1.png")
    );
    assert_eq!(append_extension(Path::new("graph"), "dot"), PathBuf::from("graph.dot"));
}

#[test]
fn write_source_adds_dot_extension() {
    let dir = tempfile::TempDir::new().unwrap();
    let written = GraphvizRenderer::new()
        .write_source(DOT, &dir.path().join("out"))
        .unwrap();

    assert_eq!(written, dir.path().join("out.dot"));
    assert_eq!(fs::read_to_string(&written).unwrap(), DOT);
}

#[test]
fn versioned_stem_is_not_truncated() {
    let dir = tempfile::TempDir::new().unwrap();
    let written = GraphvizRenderer::new()
        .write_source(DOT, &dir.path().join("emacs_deps_29.1"))
        .unwrap();

    assert_eq!(written, dir.path().join("emacs_deps_29.1.dot"));
    assert!(!dir.path().join("emacs_deps_29.dot").exists());
}

#[test]
fn missing_tool_keeps_the_description() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = GraphvizRenderer::new()
        .with_tool("elisp-deps-no-such-graphviz-binary")
        .with_image_format("svg")
        .render(DOT, &dir.path().join("graph"))
        .unwrap_err();

    assert!(matches!(err, RenderError::ToolUnavailable { .. }));
    assert!(dir.path().join("graph.dot").exists());
    assert!(!dir.path().join("graph.svg").exists());
}

#[test]
fn unwritable_output_is_an_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = GraphvizRenderer::new()
        .write_source(DOT, &dir.path().join("missing-dir").join("out"))
        .unwrap_err();
    assert!(matches!(err, RenderError::Io { .. }));
}
