//! `voicestats` — prints the voiced proportion of mono 16-bit WAV files.
//!
//! Files are processed one at a time in argument order. Each per-file line is
//! printed as soon as that file is done; the first fatal error stops the run
//! with exit code 1.

mod args;
mod output;

use anyhow::Context;
use tracing::{error, info};
use voicestats_core::{Report, TotalStats, VoiceStatsEngine};

use args::{parse_args, CliArgs, Command, USAGE};

fn main() {
    // ── Tracing (stderr, so stdout carries only the report) ──────────────
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("voicestats=warn,voicestats_core=warn")),
        )
        .init();

    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Help) => {
            println!("{USAGE}");
            return;
        }
        Ok(Command::Run(cli)) => cli,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        error!("{e:#}");
        eprintln!("voicestats: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: CliArgs) -> anyhow::Result<()> {
    let engine = VoiceStatsEngine::new(cli.config).context("invalid analysis settings")?;
    info!(
        files = cli.files.len(),
        config = ?engine.config(),
        "voicestats starting"
    );

    let mut totals = TotalStats::default();
    let mut analysed = Vec::with_capacity(cli.files.len());

    for path in &cli.files {
        let stats = engine
            .analyze_file(path)
            .with_context(|| format!("failed to analyse {}", path.display()))?;
        if !cli.json {
            println!("{}", output::file_line(&stats));
        }
        totals.add(&stats);
        analysed.push(stats);
    }

    let report = Report::new(analysed).context("failed to total results")?;
    if cli.json {
        println!("{}", report.to_json()?);
    } else if let Some(total) = &report.total {
        println!("{}", output::total_line(total));
    }

    info!(
        files = totals.files,
        total_duration = totals.total_duration,
        total_voiced = totals.total_voiced,
        "voicestats finished"
    );
    Ok(())
}
