//! Dependency edges between generated targets and their sources.
//!
//! The embedder reports every target-depends-on-source relation it processes
//! so the invoking orchestrator can schedule rebuilds. Edges are collected in
//! job order and can be serialized as a Makefile-style depfile.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Collects target-depends-on-source edges in the order they are recorded.
#[derive(Debug, Default)]
pub struct DepRecorder {
    edges: Vec<(PathBuf, PathBuf)>,
}

impl DepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `target` depends on `source`.
    pub fn record(&mut self, target: &Path, source: &Path) {
        self.edges.push((target.to_path_buf(), source.to_path_buf()));
    }

    pub fn edges(&self) -> &[(PathBuf, PathBuf)] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Render all edges as `target: source` lines, one per edge.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (target, source) in &self.edges {
            let _ = writeln!(out, "{}: {}", target.display(), source.display());
        }
        out
    }

    /// Write the rendered depfile to `path`, creating parent directories as
    /// needed.
    pub fn write_depfile(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create depfile directory {}", parent.display())
                })?;
            }
        }
        std::fs::write(path, self.render())
            .with_context(|| format!("failed to write depfile {}", path.display()))
    }
}
