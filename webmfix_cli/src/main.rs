use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use webmfix_core::format::{DURATION_ID, TIMECODE_SCALE_ID};
use webmfix_core::{inspect, patch, InfoReport, Logger, PatchOutcome};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "webmfix",
    about = "Write the real Duration into WebM files produced by live recorders",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set Duration (and a 1 ms TimecodeScale) in a recorded WebM file
    Patch {
        /// Source WebM file ("-" reads stdin)
        input: PathBuf,
        /// Destination file ("-" writes to stdout)
        output: PathBuf,
        /// Recording length in milliseconds
        #[arg(short, long)]
        duration_ms: f64,
        /// Do not log patch progress messages
        #[arg(short, long)]
        quiet: bool,
        /// Exit with an error instead of copying the input when it cannot be patched
        #[arg(long)]
        strict: bool,
    },
    /// Print Segment/Info layout and the current TimecodeScale and Duration
    Inspect {
        /// WebM file to inspect ("-" reads stdin)
        file: PathBuf,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

// ── Helpers ────────────────────────────────────────────────────────────────

const LOG_PREFIX: &str = "[WebmDurationPatch]";

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path.to_str() == Some("-") {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf).context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read(path).with_context(|| format!("reading input file {:?}", path))
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if path.to_str() == Some("-") {
        let mut out = io::stdout().lock();
        out.write_all(bytes)?;
        out.flush()?;
        Ok(())
    } else {
        std::fs::write(path, bytes).with_context(|| format!("creating output file {:?}", path))
    }
}

fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut v = n as f64;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", v, UNITS[unit])
    }
}

fn element_name(id: u32) -> &'static str {
    match id {
        TIMECODE_SCALE_ID => "TimecodeScale",
        DURATION_ID => "Duration",
        0x4D80 => "MuxingApp",
        0x5741 => "WritingApp",
        0x73A4 => "SegmentUUID",
        0x7BA9 => "Title",
        0x4461 => "DateUTC",
        _ => "?",
    }
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_patch(
    input: PathBuf,
    output: PathBuf,
    duration_ms: f64,
    quiet: bool,
    strict: bool,
) -> anyhow::Result<()> {
    if !duration_ms.is_finite() || duration_ms < 0.0 {
        anyhow::bail!("duration must be a finite, non-negative number of milliseconds");
    }

    let raw = read_input(&input)?;

    let sink = |msg: &str| tracing::info!("{} {}", LOG_PREFIX, msg);
    let logger: Option<&dyn Logger> = if quiet { None } else { Some(&sink as &dyn Logger) };

    let outcome = patch(&raw, duration_ms, logger);
    let status = match &outcome {
        PatchOutcome::Patched(_) => "patched".to_string(),
        PatchOutcome::Unchanged { reason, .. } => {
            if strict {
                anyhow::bail!("{:?} was not patched: {}", input, reason);
            }
            tracing::warn!(%reason, "writing input unchanged");
            format!("unchanged ({})", reason)
        }
    };

    write_output(&output, outcome.as_bytes())?;

    eprintln!("  status      : {}", status);
    eprintln!("  duration    : {} ms", duration_ms);
    eprintln!("  input size  : {}", human_bytes(raw.len() as u64));
    eprintln!("  output size : {}", human_bytes(outcome.as_bytes().len() as u64));
    Ok(())
}

fn print_report(file: &Path, report: &InfoReport) {
    println!("=== WebM File: {:?} ===", file);
    println!();
    println!("  EBML header    : {} bytes", report.header_len);
    match report.segment_size {
        Some(size) => println!(
            "  Segment        : offset {}, {}",
            report.segment_offset,
            human_bytes(size)
        ),
        None => println!("  Segment        : offset {}, unknown size", report.segment_offset),
    }
    println!(
        "  Info           : offset {}, {} bytes",
        report.info_offset, report.info_size
    );
    match report.timecode_scale {
        Some(scale) => println!("  TimecodeScale  : {} ns", scale),
        None => println!("  TimecodeScale  : (missing, 1000000 implied)"),
    }
    match (report.duration, report.duration_ms()) {
        (Some(_), Some(ms)) => println!("  Duration       : {:.3} ms", ms),
        (Some(ticks), None) => println!("  Duration       : {} ticks", ticks),
        (None, _) => println!("  Duration       : (missing)"),
    }
    for id in &report.other_children {
        println!("  child          : 0x{:X} {}", id, element_name(*id));
    }
}

fn run_inspect(file: PathBuf, json: bool) -> anyhow::Result<()> {
    let raw = read_input(&file)?;
    let report = inspect(&raw).with_context(|| format!("inspecting {:?}", file))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&file, &report);
    }
    Ok(())
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Patch {
            input,
            output,
            duration_ms,
            quiet,
            strict,
        } => run_patch(input, output, duration_ms, quiet, strict),
        Commands::Inspect { file, json } => run_inspect(file, json),
    }
}
