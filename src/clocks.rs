// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Clock matcher: list the PLA rows that fire for one opcode per time step.

use std::io::{self, Write};

use serde_json::json;

use crate::cli::OutputFormat;
use crate::table::PlaEntry;

/// Cycle count of the longest instruction on the emulated core.
pub const TIME_STEPS: u8 = 6;

fn fires(entry: &PlaEntry, opcode: u8, step: u8) -> bool {
    entry.masks.matches(opcode) && entry.time.matches(step) && entry.group.matches(opcode)
}

/// Prints, for each time step 0-5, the rows matching the opcode's bit
/// pattern and group. Each `T=<n>` block ends with a blank line, matched
/// rows or not.
pub fn run(
    opcode: u8,
    entries: &[PlaEntry],
    format: OutputFormat,
    out: &mut impl Write,
) -> io::Result<()> {
    for step in 0..TIME_STEPS {
        match format {
            OutputFormat::Text => {
                writeln!(out, "T={step}")?;
                for entry in entries.iter().filter(|entry| fires(entry, opcode, step)) {
                    writeln!(
                        out,
                        "{} {} {} {}",
                        entry.pattern, entry.group, entry.time, entry.name
                    )?;
                }
                writeln!(out)?;
            }
            OutputFormat::Json => {
                let rows: Vec<_> = entries
                    .iter()
                    .filter(|entry| fires(entry, opcode, step))
                    .map(|entry| {
                        json!({
                            "pattern": entry.pattern,
                            "group": entry.group.symbol(),
                            "time": entry.time.to_string(),
                            "name": entry.name,
                        })
                    })
                    .collect();
                writeln!(out, "{}", json!({ "time": step, "rows": rows }))?;
            }
        }
    }
    Ok(())
}
