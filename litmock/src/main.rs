use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use litmock::{generate_unified_diff, persist, MockConfig, MockEditor};

#[derive(Parser)]
#[command(name = "litmock")]
#[command(about = "Turn a Go request/event struct literal into a mock expectation", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the Go file
    #[arg(short, long)]
    file: PathBuf,

    /// 1-based line the literal starts on (or spans)
    #[arg(short, long)]
    line: usize,

    /// Output format: "default", "diff", or "json"
    #[arg(long, default_value = "default")]
    format: String,

    /// Show added/removed line counts after diff output
    #[arg(long)]
    summary: bool,

    /// Output path (if specified, writes there instead of modifying in place; implies --apply)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the rewritten source back (default prints it to stdout)
    #[arg(long)]
    apply: bool,

    /// Identifier of the mock the expectation is registered on
    #[arg(long, default_value = "m")]
    expect_ident: String,

    /// Package identifier providing RequestEqualTo / EventMatching
    #[arg(long, default_value = "test")]
    matcher_ident: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Logs go to stderr so stdout stays the rewritten source. `RUST_LOG`
/// takes precedence over the flags.
fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if !matches!(cli.format.as_str(), "default" | "diff" | "json") {
        bail!("Unknown format '{}': expected default, diff or json", cli.format);
    }

    let file_path = &cli.file;
    let source = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;

    let config = MockConfig::new(cli.expect_ident, cli.matcher_ident);
    let editor = MockEditor::with_config(&source, config)
        .with_context(|| format!("Failed to parse {}", file_path.display()))?;

    let mut rewrite = match editor.rewrite_line(cli.line) {
        Ok(rewrite) => rewrite,
        Err(e) if e.is_no_match() => {
            if cli.format == "default" && !cli.apply && cli.output.is_none() {
                print!("{}", source);
            }
            eprintln!("Error: {}: {}", file_path.display(), e);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to rewrite {}:{}", file_path.display(), cli.line)
            })
        }
    };
    rewrite.report.file = Some(file_path.display().to_string());

    if !rewrite.report.discarded.is_empty() {
        eprintln!(
            "Warning: assigned names dropped with the replaced statement: {}",
            rewrite.report.discarded.join(", ")
        );
    }

    match cli.format.as_str() {
        "diff" => {
            let (diff, stats) = generate_unified_diff(file_path, &source, &rewrite.output, 3);
            print!("{}", diff);
            if cli.summary {
                stats.print_summary();
            }
        }
        "json" => {
            let json = serde_json::to_string_pretty(&rewrite.report)
                .context("Failed to serialize rewrite report")?;
            println!("{}", json);
        }
        _ if !cli.apply && cli.output.is_none() => print!("{}", rewrite.output),
        _ => {}
    }

    if cli.apply || cli.output.is_some() {
        let write_path = cli.output.as_ref().unwrap_or(file_path);
        persist::write_atomic(write_path, &rewrite.output)
            .with_context(|| format!("Failed to write {}", write_path.display()))?;
        if cli.format == "default" {
            match &cli.output {
                Some(out) => println!("✓ Written to: {}", out.display()),
                None => println!("✓ Modified: {}", file_path.display()),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
