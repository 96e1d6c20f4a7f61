//! Batch command - parse message files in bulk.
//!
//! Input is a glob pattern of text files with one message per line;
//! blank lines are skipped.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, warn};

use pesasms_core::{ParseError, ParsedSms, SmsParser};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (one message per line)
    #[arg(required = true)]
    input: String,

    /// Write per-message results as JSON lines to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a summary CSV
    #[arg(long)]
    summary: Option<PathBuf>,
}

/// One row of the summary CSV.
#[derive(Serialize)]
struct SummaryRow {
    file: String,
    line: usize,
    status: &'static str,
    transaction_type: Option<String>,
    amount: Option<String>,
    timestamp: Option<String>,
    reason: Option<String>,
}

pub fn run(args: BatchArgs) -> anyhow::Result<()> {
    let files: Vec<PathBuf> = glob(&args.input)?.filter_map(|entry| entry.ok()).collect();

    if files.is_empty() {
        anyhow::bail!("no matching files found for pattern: {}", args.input);
    }

    println!("{} Found {} file(s) to process", style("ℹ").blue(), files.len());

    let parser = SmsParser::new()?;

    let mut messages: Vec<(String, usize, String)> = Vec::new();
    for path in &files {
        let content = fs::read_to_string(path)?;
        let name = path.display().to_string();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if !line.is_empty() {
                messages.push((name.clone(), idx + 1, line.to_string()));
            }
        }
    }

    let pb = ProgressBar::new(messages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} messages")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut success = 0usize;
    let mut failed = 0usize;
    let mut unrecognized = 0usize;
    let mut jsonl = String::new();
    let mut rows = Vec::with_capacity(messages.len());

    for (file, line, message) in &messages {
        let result = parser.parse(message);

        match &result {
            Ok(ParsedSms::Success(record)) => {
                success += 1;
                debug!(file = %file, line = *line, ty = %record.transaction_type(), "parsed");
            }
            Ok(ParsedSms::Failed(notice)) => {
                failed += 1;
                debug!(file = %file, line = *line, reason = %notice.reason, "classified failure");
            }
            Err(err) => {
                unrecognized += 1;
                warn!(file = %file, line = *line, %err, "message not recognized");
            }
        }

        if args.output.is_some() {
            jsonl.push_str(&jsonl_entry(file, *line, &result)?);
            jsonl.push('\n');
        }
        rows.push(summary_row(file.clone(), *line, &result));

        pb.inc(1);
    }

    pb.finish_with_message("Done");

    if let Some(output_path) = &args.output {
        fs::write(output_path, jsonl)?;
        println!(
            "{} Results written to {}",
            style("✓").green(),
            output_path.display()
        );
    }

    if let Some(summary_path) = &args.summary {
        let mut writer = csv::Writer::from_path(summary_path)?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!("{} {} successful", style("✓").green(), success);
    println!("{} {} failed transactions", style("✗").red(), failed);
    println!("{} {} unrecognized", style("?").yellow(), unrecognized);

    Ok(())
}

fn jsonl_entry(
    file: &str,
    line: usize,
    result: &Result<ParsedSms, ParseError>,
) -> anyhow::Result<String> {
    let value = match result {
        Ok(parsed) => serde_json::json!({
            "file": file,
            "line": line,
            "result": parsed,
        }),
        Err(err) => serde_json::json!({
            "file": file,
            "line": line,
            "error": err.to_string(),
        }),
    };
    Ok(serde_json::to_string(&value)?)
}

fn summary_row(
    file: String,
    line: usize,
    result: &Result<ParsedSms, ParseError>,
) -> SummaryRow {
    match result {
        Ok(ParsedSms::Success(record)) => SummaryRow {
            file,
            line,
            status: "SUCCESS",
            transaction_type: Some(record.transaction_type().to_string()),
            amount: Some(record.amount.to_string()),
            timestamp: record.timestamp.map(|ts| ts.to_string()),
            reason: None,
        },
        Ok(ParsedSms::Failed(notice)) => SummaryRow {
            file,
            line,
            status: "FAILED",
            transaction_type: None,
            amount: None,
            timestamp: None,
            reason: Some(notice.reason.clone()),
        },
        Err(err) => SummaryRow {
            file,
            line,
            status: "UNRECOGNIZED",
            transaction_type: None,
            amount: None,
            timestamp: None,
            reason: Some(err.to_string()),
        },
    }
}
