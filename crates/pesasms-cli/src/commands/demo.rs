//! Demo command - run the parser over a built-in sample corpus.

use clap::Args;
use console::style;

use pesasms_core::SmsParser;

use super::parse::{OutputFormat, format_parsed};

/// Sample notifications covering both languages, a failure, and an
/// unsupported shape.
const SAMPLE_MESSAGES: &[&str] = &[
    // English
    "TA22OI958I Confirmed.Ksh50.00 transferred from M-Shwari account on 2/1/25 at 11:00 AM. \
     M-Shwari balance is Ksh925.46 .M-PESA balance is Ksh359.50 .Transaction cost Ksh.0.00",
    "TA27OIFCSZ Confirmed.on 2/1/25 at 11:01 AMWithdraw Ksh300.00 from 343595 - Anzal Express \
     Ltdlongonot farm along moi south lake Agg New M-PESA balance is Ksh30.50. Transaction \
     cost, Ksh29.00. Amount you can transact within the day is 498,710.00. To move money from \
     bank to M-PESA, dial *334#>Withdraw>From Bank to MPESA",
    "TA22OPE6TO confirmed.You bought Ksh10.00 of airtime for 0113169506 on 2/1/25 at 11:54 \
     AM.New  balance is Ksh20.50. Transaction cost, Ksh0.00. Amount you can transact within \
     the day is 498,700.00.You can now access M-PESA via *334#Failed. You do not have enough \
     money in your M-PESA account to pay Ksh50.00 to Juddy Atieno Wandere. Your M-PESA balance \
     is Ksh20.50.  Dial *334# to register for the M-PESA overdraw Services Fuliza.",
    // Swahili
    "TAD62EDKVQ Imethibitishwa Ksh1.00 imetumwa kwa John Doe 0769641937 tarehe 13/1/25 saa \
     5:44 PM. Baki yako ya M-PESA ni Ksh263.47. Gharama ya kutuma ni Ksh0.00.",
    "TAD72CZ6J3 Imethibitishwa. Baki yako ni: Akaunti ya M-PESA : Ksh263.47 Tarehe 13/1/25 \
     saa 5:36 PM. Gharama ya matumizi ni Ksh0.00.",
    "TAF5BV0XRN Umenunua Ksh5.00 ya mjazo siku 15/1/25 saa 8:44 PM.Baki mpya ya M-PESA ni \
     Ksh38.47.",
    "Hakuna pesa za kutosha katika akaunti yako ya M-PESA kuweza kutuma Ksh3,251.00.",
];

/// Arguments for the demo command.
#[derive(Args)]
pub struct DemoArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub fn run(args: DemoArgs) -> anyhow::Result<()> {
    let parser = SmsParser::new()?;

    for (index, message) in SAMPLE_MESSAGES.iter().enumerate() {
        println!(
            "{} Message {}/{}",
            style("→").cyan(),
            index + 1,
            SAMPLE_MESSAGES.len()
        );
        println!("{}", style(message).dim());
        println!();

        match parser.parse(message) {
            Ok(parsed) => println!("{}", format_parsed(&parsed, args.format)?),
            Err(err) => println!("{} {}\n", style("✗").red(), err),
        }
    }

    Ok(())
}
