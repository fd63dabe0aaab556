use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

use datac::deps::DepRecorder;
use datac::embed::EmbedJob;
use datac::{manifest, output, probe, registry};

/// datac: embed binary files as C byte-array headers and probe the local
/// toolchain for build capabilities.
///
/// Invoked by a build orchestrator; `embed` writes one guarded header per
/// source/target job, `check` answers a yes/no capability question through
/// its exit code.
#[derive(Parser, Debug)]
#[command(
    name = "datac",
    version,
    about,
    after_help = "Examples:\n  datac embed images/logo.png=gen/logo.h\n  datac embed --manifest embed.toml --depfile gen/embed.d\n  datac check long-long\n  datac check wx-config --major 3 --minor 0\n  datac check wx"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate C byte-array headers from binary files.
    Embed {
        /// Jobs as SOURCE=TARGET pairs, processed in order.
        pairs: Vec<String>,

        /// Read jobs from a TOML manifest instead of positional pairs.
        #[arg(long, conflicts_with = "pairs")]
        manifest: Option<PathBuf>,

        /// Write a Makefile-style depfile recording `target: source` edges.
        #[arg(long)]
        depfile: Option<PathBuf>,
    },

    /// Probe the local toolchain for a capability (exit 0 = yes, 1 = no).
    Check {
        #[command(subcommand)]
        probe_command: ProbeCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ProbeCommand {
    /// C++ compiler support for the `long long` type.
    LongLong,

    /// Installed wx-config reports at least the given version.
    WxConfig {
        /// Minimum required major version.
        #[arg(long)]
        major: u64,

        /// Minimum required minor version.
        #[arg(long, default_value_t = 0)]
        minor: u64,
    },

    /// A minimal wxWidgets application compiles and links.
    Wx,
}

// ---------------------------------------------------------------------------
// Subcommand handlers
// ---------------------------------------------------------------------------

/// Parse `SOURCE=TARGET` command-line pairs into embedding jobs.
fn parse_pairs(pairs: &[String]) -> Result<Vec<EmbedJob>> {
    if pairs.is_empty() {
        bail!("no jobs given: pass SOURCE=TARGET pairs or --manifest");
    }
    pairs
        .iter()
        .map(|raw| {
            let (source, target) = raw
                .split_once('=')
                .ok_or_else(|| anyhow!("invalid job '{raw}': expected SOURCE=TARGET"))?;
            if source.is_empty() || target.is_empty() {
                bail!("invalid job '{raw}': source and target must both be non-empty");
            }
            Ok(EmbedJob {
                source: source.into(),
                target: target.into(),
            })
        })
        .collect()
}

/// The embed subcommand: resolve the job list, route it through the builder
/// registry, and optionally emit a depfile for the orchestrator.
fn run_embed(
    pairs: &[String],
    manifest_path: Option<&Path>,
    depfile: Option<&Path>,
) -> Result<()> {
    let jobs = match manifest_path {
        Some(path) => manifest::load_jobs(path)?,
        None => parse_pairs(pairs)?,
    };

    output::action("Embedding", &format!("{} job(s)", jobs.len()));

    let registry = registry::default_registry();
    let mut deps = DepRecorder::new();
    registry.run(registry::DATA_BUILDER, &jobs, &mut deps)?;

    if let Some(path) = depfile {
        deps.write_depfile(path)?;
        output::detail(&format!("wrote depfile {}", path.display()));
    }

    output::success("Embedded", &format!("{} file(s)", jobs.len()));
    Ok(())
}

/// The check subcommand: run one probe; a negative result exits 1 so shell
/// orchestrators can branch on it.
fn run_check(probe_command: ProbeCommand) -> Result<()> {
    let ok = match probe_command {
        ProbeCommand::LongLong => probe::check_long_long()?,
        ProbeCommand::WxConfig { major, minor } => probe::check_wx_config(major, minor)?,
        ProbeCommand::Wx => probe::check_wx()?,
    };
    if !ok {
        process::exit(1);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Embed {
            pairs,
            manifest,
            depfile,
        } => run_embed(&pairs, manifest.as_deref(), depfile.as_deref()),
        Command::Check { probe_command } => run_check(probe_command),
    };

    if let Err(e) = result {
        eprintln!("[datac] error: {e:#}");
        process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
