// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for plaForge.

use std::io;

use clap::Parser;
use serde_json::json;

use plaforge::cli::{validate_cli, Action, Cli, Command, OutputFormat};
use plaforge::error::{default_diagnostic_code, ToolError};
use plaforge::table::{load_opcode_table, load_pla_table};
use plaforge::{clocks, generator, which};

fn diagnostics_format(cli: &Cli) -> OutputFormat {
    match &cli.command {
        Command::Which { format, .. } | Command::Clocks { format, .. } => *format,
        Command::Generator { .. } => OutputFormat::Text,
    }
}

fn report_error(err: &ToolError, format: OutputFormat) {
    match format {
        OutputFormat::Text => eprintln!("plaForge: {err}"),
        OutputFormat::Json => eprintln!(
            "{}",
            json!({
                "severity": "error",
                "code": default_diagnostic_code(err.kind()),
                "message": err.message(),
            })
        ),
    }
}

fn run(action: &Action) -> Result<(), ToolError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match action {
        Action::Which {
            query,
            table,
            format,
        } => {
            let entries = load_opcode_table(table)?;
            which::run(query, &entries, *format, &mut out)?;
        }
        Action::Clocks {
            opcode,
            table,
            format,
        } => {
            let entries = load_pla_table(table)?;
            clocks::run(*opcode, &entries, *format, &mut out)?;
        }
        Action::Generator { table } => {
            let entries = load_pla_table(table)?;
            generator::run(&entries, &mut out)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let format = diagnostics_format(&cli);
    let action = match validate_cli(&cli) {
        Ok(action) => action,
        Err(err) => {
            report_error(&err, format);
            std::process::exit(1);
        }
    };
    if let Err(err) = run(&action) {
        report_error(&err, format);
        std::process::exit(1);
    }
}
