// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Opcode filter: match opcode-table rows against masks, cycles, and group.

use std::io::{self, Write};

use serde_json::json;

use crate::cli::OutputFormat;
use crate::mask::{group_flags, MaskPair};
use crate::table::OpcodeEntry;

/// Row-selection criteria for the `which` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhichQuery {
    pub masks: MaskPair,
    /// Minimum cycle count; `None` disables the threshold.
    pub min_cycles: Option<u32>,
    /// Index 0-3 into the opcode's group tuple.
    pub group: usize,
}

impl WhichQuery {
    fn selects(&self, entry: &OpcodeEntry) -> bool {
        if let (Some(cycles), Some(min)) = (entry.cycles, self.min_cycles) {
            if cycles < min {
                return false;
            }
        }
        if !group_flags(entry.opcode)[self.group] {
            return false;
        }
        self.masks.matches(entry.opcode)
    }
}

/// Prints every table row the query selects, one line per match.
pub fn run(
    query: &WhichQuery,
    entries: &[OpcodeEntry],
    format: OutputFormat,
    out: &mut impl Write,
) -> io::Result<()> {
    for entry in entries.iter().filter(|entry| query.selects(entry)) {
        match format {
            OutputFormat::Text => writeln!(out, "{:#x} {}", entry.opcode, entry.name)?,
            OutputFormat::Json => {
                let row = json!({
                    "opcode": format!("{:#04x}", entry.opcode),
                    "name": entry.name,
                    "address_mode": entry.address_mode,
                    "cycles": entry.cycles,
                });
                writeln!(out, "{row}")?;
            }
        }
    }
    Ok(())
}
