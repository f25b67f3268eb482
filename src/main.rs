use anyhow::{Context, Result};
use batchrun::{BatchConfig, Completion, Step, logging};
use clap::Parser;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// Plan a batched run over `[0, count)` and print every batch
#[derive(Parser, Debug)]
#[command(name = "batchrun", version, about)]
struct Cli {
    /// Total number of items to cover
    #[arg(long)]
    count: usize,

    /// Maximum items per batch (overrides the config file)
    #[arg(long)]
    batch_size: Option<usize>,

    /// JSON config file with a `batch_size` field
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abort the run after this many batches
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    stop_after: Option<u64>,

    /// Print batches as `start..=last` instead of `start..end`
    #[arg(long)]
    inclusive: bool,

    /// Emit one JSON object per batch plus a summary
    #[arg(long)]
    json: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct BatchRecord {
    index: usize,
    start: usize,
    end: usize,
}

/// `--batch-size` beats the config file, which beats the default
fn resolve_config(cli: &Cli) -> Result<BatchConfig> {
    let mut config = match &cli.config {
        Some(path) => BatchConfig::load(path)?,
        None => BatchConfig::default(),
    };
    if let Some(batch_size) = cli.batch_size {
        config.batch_size = batch_size;
    }
    Ok(config)
}

fn render_batch(cli: &Cli, index: usize, start: usize, end: usize) -> Result<String> {
    if cli.json {
        serde_json::to_string(&BatchRecord { index, start, end })
            .context("Failed to serialize batch record")
    } else if cli.inclusive {
        Ok(format!("{}..={}", start, end - 1))
    } else {
        Ok(format!("{}..{}", start, end))
    }
}

/// Decide whether to keep going once `delivered` batches are out
fn next_step<E>(cli: &Cli, delivered: usize) -> Step<E> {
    match cli.stop_after {
        Some(limit) if delivered as u64 >= limit => Step::Abort,
        _ => Step::Continue,
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<Completion> {
    let batcher = resolve_config(cli)?.batcher()?;

    info!(
        count = cli.count,
        batch_size = batcher.batch_size(),
        batches = batcher.batch_count(cli.count),
        "Planning batch run"
    );

    let mut index = 0;
    let completion = batcher.run_all(cli.count, |start, end| {
        let emitted = render_batch(cli, index, start, end).and_then(|line| {
            writeln!(out, "{}", line).context("Failed to write batch")
        });
        if let Err(err) = emitted {
            return Step::Fail(err);
        }

        index += 1;
        next_step(cli, index)
    })?;

    if cli.json {
        let summary = serde_json::to_string(&completion).context("Failed to serialize summary")?;
        writeln!(out, "{}", summary).context("Failed to write summary")?;
    }

    info!(
        cursor = completion.cursor,
        batches = completion.batches,
        aborted = completion.aborted,
        "Batch run finished"
    );

    Ok(completion)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchrun::DEFAULT_BATCH_SIZE;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["batchrun"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn run_to_lines(cli: &Cli) -> (Completion, Vec<String>) {
        let mut out = Vec::new();
        let completion = run(cli, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        (completion, text.lines().map(str::to_string).collect())
    }

    fn write_config(batch_size: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"batch_size": {}}}"#, batch_size).unwrap();
        file
    }

    #[test]
    fn test_default_batch_size() {
        let config = resolve_config(&cli(&["--count", "5"])).unwrap();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_config_file_overrides_default() {
        let file = write_config(7);
        let path = file.path().to_str().unwrap();

        let config = resolve_config(&cli(&["--count", "5", "--config", path])).unwrap();
        assert_eq!(config.batch_size, 7);
    }

    #[test]
    fn test_flag_overrides_config_file() {
        let file = write_config(7);
        let path = file.path().to_str().unwrap();

        let config =
            resolve_config(&cli(&["--count", "5", "--config", path, "--batch-size", "3"])).unwrap();
        assert_eq!(config.batch_size, 3);
    }

    #[test]
    fn test_render_exclusive_and_inclusive() {
        let plain = cli(&["--count", "20"]);
        assert_eq!(render_batch(&plain, 1, 10, 20).unwrap(), "10..20");

        let inclusive = cli(&["--count", "20", "--inclusive"]);
        assert_eq!(render_batch(&inclusive, 1, 10, 20).unwrap(), "10..=19");
    }

    #[test]
    fn test_render_json_record() {
        let json = cli(&["--count", "20", "--json"]);
        let line = render_batch(&json, 1, 10, 20).unwrap();

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["index"], 1);
        assert_eq!(value["start"], 10);
        assert_eq!(value["end"], 20);
    }

    #[test]
    fn test_full_run_prints_every_batch() {
        let (completion, lines) = run_to_lines(&cli(&["--count", "25", "--batch-size", "10"]));

        assert_eq!(lines, vec!["0..10", "10..20", "20..25"]);
        assert_eq!(
            completion,
            Completion {
                cursor: 25,
                batches: 3,
                aborted: false
            }
        );
    }

    #[test]
    fn test_stop_after_aborts_with_json_summary() {
        let (completion, lines) = run_to_lines(&cli(&[
            "--count",
            "25",
            "--batch-size",
            "10",
            "--stop-after",
            "2",
            "--json",
        ]));

        let expected = Completion {
            cursor: 20,
            batches: 2,
            aborted: true,
        };
        assert_eq!(completion, expected);

        // Two batch records, then the summary
        assert_eq!(lines.len(), 3);
        let summary: serde_json::Value = serde_json::from_str(&lines[2]).unwrap();
        assert_eq!(summary, serde_json::to_value(expected).unwrap());
    }

    #[test]
    fn test_stop_after_zero_rejected() {
        let result = Cli::try_parse_from(["batchrun", "--count", "5", "--stop-after", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_batch_size_fails_run() {
        let mut out = Vec::new();
        let result = run(&cli(&["--count", "5", "--batch-size", "0"]), &mut out);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid batch size"));
        assert!(out.is_empty());
    }
}
