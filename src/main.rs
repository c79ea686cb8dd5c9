mod tui;

use std::io::{self, BufRead};

use anyhow::{ensure, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use iiccrc::batch::{evaluate_batch, SlotResult};
use iiccrc::config::AppConfig;
use iiccrc::panel::render_result;

#[derive(Parser)]
#[command(
    name = "iiccrc",
    about = "CRC-16/CCITT (poly 0x8408, init 0xFFFF) calculator for IIC commands"
)]
struct Cli {
    /// Hex texts to evaluate, one per slot (e.g. "34 1E 08 AC 0D")
    inputs: Vec<String>,

    /// Run the interactive terminal form
    #[arg(long, conflicts_with_all = ["inputs", "stdin"])]
    tui: bool,

    /// Read one slot per line from standard input
    #[arg(long, conflicts_with = "inputs")]
    stdin: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Evaluate slots in parallel
    #[arg(long)]
    parallel: bool,

    /// Number of slots (overrides the config file)
    #[arg(long)]
    slots: Option<usize>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Serialize)]
struct SlotReport<'a> {
    slot: usize,
    input: &'a str,
    crc: Option<String>,
    wire: Option<String>,
    status: &'static str,
    error: Option<String>,
}

impl<'a> SlotReport<'a> {
    fn new(slot: usize, input: &'a str, result: &SlotResult) -> Self {
        match result {
            Ok(crc) => {
                let [lsb, msb] = crc.wire_bytes();
                Self {
                    slot,
                    input,
                    crc: Some(format!("0x{:04X}", crc.value())),
                    wire: Some(format!("{:02X} {:02X}", lsb, msb)),
                    status: "ok",
                    error: None,
                }
            }
            Err(e) => Self {
                slot,
                input,
                crc: None,
                wire: None,
                status: if e.is_empty() { "empty" } else { "invalid" },
                error: Some(e.to_string()),
            },
        }
    }
}

/// Only as many slots as were supplied, up to the configured limit.
fn batch_size(slot_count: usize, supplied: usize) -> usize {
    slot_count.min(supplied)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive("iiccrc=info".parse()?);

    // In TUI mode, write logs to a file to avoid corrupting the terminal
    if cli.tui {
        let log_file = std::fs::File::create(std::env::temp_dir().join("iiccrc.log"))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(log_file)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
    }

    let mut config = AppConfig::load();
    if let Some(slots) = cli.slots {
        ensure!(slots > 0, "--slots must be at least 1");
        config.slot_count = slots;
    }
    if cli.parallel {
        config.parallel = true;
    }

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    if cli.tui {
        info!("iiccrc starting in TUI mode");
        return tui::run(&config);
    }

    let inputs = if cli.stdin {
        io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?
    } else if cli.inputs.is_empty() {
        vec![config.default_text.clone()]
    } else {
        cli.inputs
    };

    let mut options = config.batch_options();
    options.slot_count = batch_size(options.slot_count, inputs.len());

    let results = evaluate_batch(&inputs, &options);

    if cli.json {
        let reports: Vec<SlotReport> = inputs
            .iter()
            .zip(&results)
            .enumerate()
            .map(|(i, (input, result))| SlotReport::new(i, input, result))
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (i, (input, result)) in inputs.iter().zip(&results).enumerate() {
            match result {
                Ok(crc) => {
                    let [lsb, msb] = crc.wire_bytes();
                    println!(
                        "#{} {:<30} {}  (wire: {:02X} {:02X})",
                        i,
                        input,
                        render_result(result),
                        lsb,
                        msb
                    );
                }
                Err(_) => println!("#{} {:<30} {}", i, input, render_result(result)),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use iiccrc::codec::{Crc16, DecodeError, FormatError};

    #[test]
    fn test_report_ok() {
        let report = SlotReport::new(0, "34 1E 08 AC 0D", &Ok(Crc16(0xBFD2)));
        assert_eq!(report.status, "ok");
        assert_eq!(report.crc.as_deref(), Some("0xBFD2"));
        // LSB first
        assert_eq!(report.wire.as_deref(), Some("D2 BF"));
        assert_eq!(report.error, None);
    }

    #[test]
    fn test_report_empty() {
        let report = SlotReport::new(1, "  ", &Err(DecodeError::Empty));
        assert_eq!(report.status, "empty");
        assert_eq!(report.crc, None);
        assert_eq!(report.wire, None);
        assert_eq!(report.error.as_deref(), Some("no hex data"));
    }

    #[test]
    fn test_report_invalid() {
        let err = DecodeError::InvalidFormat(FormatError::OddLength { digits: 3 });
        let report = SlotReport::new(2, "123", &Err(err));
        assert_eq!(report.status, "invalid");
        assert_eq!(
            report.error.as_deref(),
            Some("hex string length must be even, got 3 digits")
        );
    }

    #[test]
    fn test_report_json_fields() {
        let report = SlotReport::new(0, "00", &Ok(Crc16(0x0F87)));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "slot": 0,
                "input": "00",
                "crc": "0x0F87",
                "wire": "87 0F",
                "status": "ok",
                "error": null,
            })
        );
    }

    #[test]
    fn test_batch_size_clamps_to_supplied_inputs() {
        assert_eq!(batch_size(10, 3), 3);
        assert_eq!(batch_size(2, 5), 2);
        assert_eq!(batch_size(10, 0), 0);
    }
}
