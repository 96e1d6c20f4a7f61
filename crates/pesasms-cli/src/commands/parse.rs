//! Parse command - extract data from a single notification message.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use pesasms_core::{ParsedSms, SmsParser, TransactionDetails};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Message text (omit when using --file)
    message: Option<String>,

    /// Read the message from a file instead
    #[arg(short = 'i', long)]
    file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let message = match (&args.message, &args.file) {
        (Some(text), None) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)?.trim().to_string(),
        _ => anyhow::bail!("provide either a message argument or --file"),
    };

    info!("Parsing {} characters of message text", message.len());

    let parser = SmsParser::new()?;
    let parsed = match parser.parse(&message) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{} {}", style("✗").red(), err);
            std::process::exit(1);
        }
    };

    let output = format_parsed(&parsed, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

pub(crate) fn format_parsed(parsed: &ParsedSms, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(parsed)?),
        OutputFormat::Text => Ok(format_text(parsed)),
    }
}

fn format_text(parsed: &ParsedSms) -> String {
    let mut output = String::new();

    match parsed {
        ParsedSms::Failed(notice) => {
            output.push_str(&format!("Status:   {}\n", style("FAILED").red()));
            output.push_str(&format!("Language: {}\n", notice.language));
            output.push_str(&format!("Reason:   {}\n", notice.reason));
        }
        ParsedSms::Success(record) => {
            output.push_str(&format!("Status:   {}\n", style("SUCCESS").green()));
            output.push_str(&format!("Language: {}\n", record.language));
            output.push_str(&format!("Type:     {}\n", record.transaction_type()));
            if let Some(id) = &record.transaction_id {
                output.push_str(&format!("Code:     {}\n", id));
            }
            output.push_str(&format!("Amount:   Ksh{}\n", record.amount));

            if let Some(line) = format_counterparty(&record.details) {
                output.push_str(&line);
            }

            if let Some(ts) = record.timestamp {
                output.push_str(&format!("When:     {}\n", ts.format("%d %b %Y %H:%M")));
            } else if let (Some(date), Some(time)) = (&record.raw_date, &record.raw_time) {
                output.push_str(&format!("When:     {} {} (unparsed)\n", date, time));
            }

            if let Some(balance) = record.mpesa_balance {
                output.push_str(&format!("Balance:  Ksh{}\n", balance));
            }
            if let Some(cost) = record.transaction_cost {
                output.push_str(&format!("Cost:     Ksh{}\n", cost));
            }
            if let Some(limit) = record.daily_limit {
                output.push_str(&format!("Limit:    Ksh{}\n", limit));
            }
        }
    }

    output
}

fn format_counterparty(details: &TransactionDetails) -> Option<String> {
    let line = match details {
        TransactionDetails::Received { sender, phone } => match phone {
            Some(phone) => format!("From:     {} ({})\n", sender, phone),
            None => format!("From:     {}\n", sender),
        },
        TransactionDetails::Paid { payee } => format!("To:       {}\n", payee),
        TransactionDetails::Sent { recipient, account, .. } => match account {
            Some(account) => format!("To:       {} (account {})\n", recipient, account),
            None => format!("To:       {}\n", recipient),
        },
        TransactionDetails::Withdraw { agent } => format!("Agent:    {}\n", agent),
        TransactionDetails::Kutuma { recipient, phone } => {
            format!("To:       {} ({})\n", recipient, phone)
        }
        TransactionDetails::Kupokea { sender, phone } => {
            format!("From:     {} ({})\n", sender, phone)
        }
        TransactionDetails::KulipaTill { merchant } => format!("To:       {}\n", merchant),
        TransactionDetails::Paybill { name, account } => {
            format!("To:       {} (account {})\n", name, account)
        }
        TransactionDetails::KupokeaBank { bank, account } => {
            format!("From:     {} ({})\n", bank, account)
        }
        TransactionDetails::PochiLaBiashara { recipient } => format!("To:       {}\n", recipient),
        _ => return None,
    };
    Some(line)
}
