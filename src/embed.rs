//! Binary-to-header embedding.
//!
//! Turns a binary file into a C header declaring a `static const unsigned
//! char` array with the same byte values, wrapped in an include guard derived
//! from the source file's base name. The generated array always has exactly
//! as many elements as the source has bytes, in source order; an empty source
//! yields a zero-length array (callers targeting strict C89 must not embed
//! empty files).
//!
//! Bytes are streamed one at a time through buffered handles -- source files
//! are never loaded into memory wholesale.

use anyhow::{Context, Result, anyhow};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::deps::DepRecorder;
use crate::output;

/// Hex literals emitted per array line before wrapping.
pub const BYTES_PER_LINE: u32 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One unit of work: read `source`, write the generated header to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedJob {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// The identifiers baked into a generated header.
///
/// Both are deterministic functions of the source file's base name only --
/// neither the file's content nor its directory affects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderNames {
    /// C identifier for the array, e.g. `logo_png`.
    pub symbol: String,
    /// Include-guard token, e.g. `LOGO_PNG_DATA_C`.
    pub guard: String,
}

impl HeaderNames {
    /// Derive the array symbol and include guard from a source path.
    ///
    /// Every character of the base name that is not ASCII alphanumeric is
    /// replaced with `_` so the symbol is a valid C identifier; the guard is
    /// the upper-cased symbol with a `_DATA_C` suffix.
    pub fn for_source(source: &Path) -> Result<Self> {
        let base = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("source path {} has no usable file name", source.display()))?;

        let symbol: String = base
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let guard = format!("{}_DATA_C", symbol.to_uppercase());

        Ok(Self { symbol, guard })
    }
}

// ---------------------------------------------------------------------------
// Header generation
// ---------------------------------------------------------------------------

/// Stream `source` into `target` as a guarded C byte-array declaration.
///
/// Returns the number of bytes embedded. Callers should hand in buffered
/// handles; this function reads and writes a byte at a time.
///
/// Layout contract: the first literal follows the opening brace's newline
/// with no separator; consecutive literals are joined with `", "`; a newline
/// is written after every 12th literal on a line, so continuation lines start
/// with `", "`.
pub fn write_header<R: Read, W: Write>(
    names: &HeaderNames,
    source: R,
    mut target: W,
) -> Result<u64> {
    let HeaderNames { symbol, guard } = names;

    writeln!(target, "#ifndef {guard}")?;
    writeln!(target, "#define {guard}")?;
    writeln!(target)?;
    writeln!(target, "static const unsigned char {symbol}[] = {{")?;

    let mut total: u64 = 0;
    let mut on_line: u32 = 0;
    for byte in source.bytes() {
        let byte = byte.context("failed to read source byte")?;
        if total > 0 {
            target.write_all(b", ")?;
        }
        write!(target, "0x{byte:02x}")?;
        total += 1;
        on_line += 1;
        if on_line == BYTES_PER_LINE {
            target.write_all(b"\n")?;
            on_line = 0;
        }
    }

    writeln!(target, "}};")?;
    writeln!(target)?;
    writeln!(target, "#endif")?;

    Ok(total)
}

/// Embed a single job: open both files, generate the header, flush.
///
/// The target's parent directory is created if missing. Both handles close on
/// every exit path, error paths included.
pub fn embed_file(job: &EmbedJob) -> Result<u64> {
    let names = HeaderNames::for_source(&job.source)?;

    let source = File::open(&job.source)
        .with_context(|| format!("failed to open source {}", job.source.display()))?;

    if let Some(parent) = job.target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create target directory {}", parent.display())
            })?;
        }
    }
    let target = File::create(&job.target)
        .with_context(|| format!("failed to create target {}", job.target.display()))?;

    let mut writer = BufWriter::new(target);
    let total = write_header(&names, BufReader::new(source), &mut writer)
        .with_context(|| format!("failed to write {}", job.target.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", job.target.display()))?;

    Ok(total)
}

/// Run a batch of embedding jobs in order, recording a target-depends-on-
/// source edge for each before it is processed. The first failing job aborts
/// the batch.
pub fn run_jobs(jobs: &[EmbedJob], deps: &mut DepRecorder) -> Result<()> {
    for job in jobs {
        deps.record(&job.target, &job.source);
        let total = embed_file(job)
            .with_context(|| format!("failed to embed {}", job.source.display()))?;
        output::detail(&format!(
            "{} -> {} ({total} bytes)",
            job.source.display(),
            job.target.display()
        ));
        if total == 0 {
            output::note(&format!(
                "{} is empty; emitted a zero-length array",
                job.source.display()
            ));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Generate a header for `bytes` under the given source name, in memory.
    fn header_for(bytes: &[u8], name: &str) -> String {
        let names = HeaderNames::for_source(Path::new(name)).unwrap();
        let mut out = Vec::new();
        write_header(&names, bytes, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn symbol_replaces_dots_and_dashes() {
        let names = HeaderNames::for_source(Path::new("foo.bar-baz.data")).unwrap();
        assert_eq!(names.symbol, "foo_bar_baz_data");
        assert_eq!(names.guard, "FOO_BAR_BAZ_DATA_DATA_C");
    }

    #[test]
    fn symbol_ignores_leading_directories() {
        let flat = HeaderNames::for_source(Path::new("logo.png")).unwrap();
        let nested = HeaderNames::for_source(Path::new("assets/deep/logo.png")).unwrap();
        assert_eq!(flat, nested);
    }

    #[test]
    fn symbol_underscores_other_punctuation() {
        let names = HeaderNames::for_source(Path::new("odd name+v2.bin")).unwrap();
        assert_eq!(names.symbol, "odd_name_v2_bin");
    }

    #[test]
    fn directory_path_is_rejected() {
        // `..` has no file name component.
        let err = HeaderNames::for_source(Path::new("..")).unwrap_err();
        assert!(err.to_string().contains("no usable file name"));
    }

    #[test]
    fn three_byte_example_matches_contract() {
        let header = header_for(&[0x00, 0xff, 0x10], "sample.bin");
        assert_eq!(
            header,
            "#ifndef SAMPLE_BIN_DATA_C\n\
             #define SAMPLE_BIN_DATA_C\n\
             \n\
             static const unsigned char sample_bin[] = {\n\
             0x00, 0xff, 0x10};\n\
             \n\
             #endif\n"
        );
    }

    #[test]
    fn empty_input_yields_zero_length_array() {
        let header = header_for(&[], "empty.bin");
        assert_eq!(
            header,
            "#ifndef EMPTY_BIN_DATA_C\n\
             #define EMPTY_BIN_DATA_C\n\
             \n\
             static const unsigned char empty_bin[] = {\n\
             };\n\
             \n\
             #endif\n"
        );
    }

    #[test]
    fn twelve_bytes_fill_exactly_one_line() {
        let bytes: Vec<u8> = (0..12).collect();
        let header = header_for(&bytes, "twelve.bin");
        let body: Vec<&str> = header
            .lines()
            .skip_while(|line| !line.ends_with('{'))
            .skip(1)
            .take_while(|line| *line != "};")
            .collect();
        assert_eq!(body.len(), 1);
        assert_eq!(
            body[0],
            "0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b"
        );
    }

    #[test]
    fn thirteenth_byte_starts_a_continuation_line() {
        let bytes: Vec<u8> = (0..13).collect();
        let header = header_for(&bytes, "thirteen.bin");
        // The wrap lands after the 12th literal; the continuation line keeps
        // the leading separator so literals stay ", "-joined.
        assert!(header.contains("0x0b\n, 0x0c};\n"));
    }

    #[test]
    fn write_header_reports_byte_count() {
        let names = HeaderNames::for_source(Path::new("count.bin")).unwrap();
        let mut out = Vec::new();
        let total = write_header(&names, &[1u8, 2, 3, 4, 5][..], &mut out).unwrap();
        assert_eq!(total, 5);
    }
}
