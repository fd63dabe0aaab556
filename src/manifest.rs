//! TOML job manifests.
//!
//! An orchestrator that embeds more than a handful of files hands the job
//! list over as a manifest instead of command-line pairs:
//!
//! ```toml
//! [[job]]
//! source = "images/icon.png"
//! target = "gen/icon.h"
//! ```
//!
//! Relative paths resolve against the manifest's parent directory, so the
//! working directory of the invocation does not change which files get
//! embedded. An empty manifest is a misconfiguration, not a no-op.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::embed::EmbedJob;

/// On-disk manifest shape: a list of `[[job]]` tables.
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    job: Vec<JobEntry>,
}

#[derive(Debug, Deserialize)]
struct JobEntry {
    source: PathBuf,
    target: PathBuf,
}

/// Load embedding jobs from the manifest at `path`.
pub fn load_jobs(path: &Path) -> Result<Vec<EmbedJob>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let manifest: Manifest = toml::from_str(&contents)
        .with_context(|| format!("failed to parse manifest {}", path.display()))?;

    if manifest.job.is_empty() {
        bail!("manifest {} declares no jobs", path.display());
    }

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(manifest
        .job
        .into_iter()
        .map(|entry| EmbedJob {
            source: resolve(base, entry.source),
            target: resolve(base, entry.target),
        })
        .collect())
}

/// Resolve a manifest path against the manifest's directory; absolute paths
/// pass through unchanged.
fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Write `contents` as a manifest file in a fresh temp dir.
    fn manifest_in_tempdir(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("embed.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn relative_paths_resolve_against_manifest_dir() {
        let (dir, path) = manifest_in_tempdir(
            "[[job]]\nsource = \"images/icon.png\"\ntarget = \"gen/icon.h\"\n",
        );

        let jobs = load_jobs(&path).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].source, dir.path().join("images/icon.png"));
        assert_eq!(jobs[0].target, dir.path().join("gen/icon.h"));
    }

    #[test]
    fn absolute_paths_pass_through() {
        let (_dir, path) = manifest_in_tempdir(
            "[[job]]\nsource = \"/abs/in.bin\"\ntarget = \"/abs/out.h\"\n",
        );

        let jobs = load_jobs(&path).unwrap();
        assert_eq!(jobs[0].source, PathBuf::from("/abs/in.bin"));
        assert_eq!(jobs[0].target, PathBuf::from("/abs/out.h"));
    }

    #[test]
    fn jobs_keep_manifest_order() {
        let (_dir, path) = manifest_in_tempdir(
            "[[job]]\nsource = \"b.bin\"\ntarget = \"b.h\"\n\n\
             [[job]]\nsource = \"a.bin\"\ntarget = \"a.h\"\n",
        );

        let jobs = load_jobs(&path).unwrap();
        let sources: Vec<_> = jobs
            .iter()
            .map(|j| j.source.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(sources, ["b.bin", "a.bin"]);
    }

    #[test]
    fn empty_manifest_is_an_error() {
        let (_dir, path) = manifest_in_tempdir("");
        let err = load_jobs(&path).unwrap_err();
        assert!(err.to_string().contains("declares no jobs"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let (_dir, path) = manifest_in_tempdir("this is not valid toml {{{");
        let err = load_jobs(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse manifest"));
    }

    #[test]
    fn missing_field_is_an_error() {
        let (_dir, path) = manifest_in_tempdir("[[job]]\nsource = \"a.bin\"\n");
        assert!(load_jobs(&path).is_err());
    }

    #[test]
    fn missing_manifest_file_is_an_error() {
        let err = load_jobs(Path::new("/nonexistent/embed.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read manifest"));
    }
}
