//! Command-line parsing.
//!
//! Positional form: `<aggressiveness> <wav> [<wav> ...]`. Options may appear
//! anywhere; anything not starting with `--` (other than `-h`) is positional,
//! so a negative aggressiveness still reaches the classifier's range check.

use std::path::PathBuf;

use voicestats_core::AnalysisConfig;

pub const USAGE: &str = "\
Usage: voicestats [--frame-ms <n>] [--padding-ms <n>] [--json] <aggressiveness> <path to wav file> [<path> ...]";

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub config: AnalysisConfig,
    pub files: Vec<PathBuf>,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Run(CliArgs),
}

pub fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut config = AnalysisConfig::default();
    let mut json = false;
    let mut positional = Vec::new();

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--frame-ms" => {
                let Some(v) = it.next() else {
                    return Err("missing value for --frame-ms".into());
                };
                config.frame_duration_ms = parse_ms("--frame-ms", &v)?;
            }
            "--padding-ms" => {
                let Some(v) = it.next() else {
                    return Err("missing value for --padding-ms".into());
                };
                config.padding_duration_ms = parse_ms("--padding-ms", &v)?;
            }
            "--json" => json = true,
            "--help" | "-h" => return Ok(Command::Help),
            other if other.starts_with("--") => {
                return Err(format!("unknown argument: {other}"));
            }
            _ => positional.push(arg),
        }
    }

    if positional.len() < 2 {
        return Err("expected an aggressiveness and at least one WAV file".into());
    }

    let mut positional = positional.into_iter();
    let aggressiveness = positional.next().unwrap_or_default();
    config.aggressiveness = aggressiveness
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid aggressiveness: {aggressiveness}"))?;

    Ok(Command::Run(CliArgs {
        config,
        files: positional.map(PathBuf::from).collect(),
        json,
    }))
}

fn parse_ms(flag: &str, value: &str) -> Result<u32, String> {
    value
        .parse::<u32>()
        .map_err(|_| format!("invalid value for {flag}: {value}"))
}
