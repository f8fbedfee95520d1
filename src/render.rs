use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use crate::error::RenderError;

/// Hands DOT sources to the Graphviz `dot` executable for layout.
pub struct GraphvizRenderer {
    tool: String,
    image_format: String,
}

impl GraphvizRenderer {
    pub fn new() -> Self {
        Self {
            tool: "dot".to_string(),
            image_format: "png".to_string(),
        }
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    pub fn with_image_format(mut self, image_format: impl Into<String>) -> Self {
        self.image_format = image_format.into();
        self
    }

    /// Writes `<stem>.dot` and returns its path.
    pub fn write_source(&self, dot_source: &str, output_stem: &Path) -> Result<PathBuf, RenderError> {
        let dot_path = append_extension(output_stem, "dot");
        fs::write(&dot_path, dot_source).map_err(|source| RenderError::Io {
            path: dot_path.clone(),
            source,
        })?;
        debug!("wrote graph description to {}", dot_path.display());
        Ok(dot_path)
    }

    /// Writes the DOT source and renders `<stem>.<format>`; returns the image path.
    pub fn render(&self, dot_source: &str, output_stem: &Path) -> Result<PathBuf, RenderError> {
        let dot_path = self.write_source(dot_source, output_stem)?;
        let image_path = append_extension(output_stem, &self.image_format);

        info!("rendering {} with {}", image_path.display(), self.tool);
        let output = Command::new(&self.tool)
            .arg(format!("-T{}", self.image_format))
            .arg("-o")
            .arg(&image_path)
            .arg(&dot_path)
            .output()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => RenderError::ToolUnavailable {
                    tool: self.tool.clone(),
                },
                _ => RenderError::Io {
                    path: PathBuf::from(&self.tool),
                    source: err,
                },
            })?;

        if !output.status.success() {
            return Err(RenderError::Failed {
                tool: self.tool.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(image_path)
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// `<stem>.<extension>`, keeping any dots already in the stem.
pub fn append_extension(stem: &Path, extension: &str) -> PathBuf {
    let mut path = stem.as_os_str().to_owned();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}
