// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Readers for the opcode/cycle table and the PLA decode table.
//!
//! Both readers skip blank lines and lines starting with `#`. Parse errors
//! name the 1-based line number; any malformed row aborts the load.

use std::fmt;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{ToolError, ToolErrorKind};
use crate::mask::{Group, MaskPair};

/// Row shape of the opcode table: `XX NAME [modeflags] [cycles]`.
const OPCODE_ROW_PATTERN: &str = r"^([0-9A-Fa-f]{2})\s+([A-Za-z*]+)(?:\s+([aimpxz]+))?(?:\s+(\d+))?";

/// One row of the opcode/cycle table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeEntry {
    pub opcode: u8,
    pub name: String,
    pub address_mode: Option<String>,
    pub cycles: Option<u32>,
}

/// Time-step field of a PLA row: a cycle index 0-5, or a wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeStep {
    Step(u8),
    Any,
}

impl TimeStep {
    pub fn from_symbol(symbol: &str) -> Result<Self, ToolError> {
        if symbol == "X" {
            return Ok(Self::Any);
        }
        match symbol.parse::<u8>() {
            Ok(step) if step <= 5 => Ok(Self::Step(step)),
            _ => Err(ToolError::new(
                ToolErrorKind::Table,
                "time step must be 0-5 or X",
                Some(symbol),
            )),
        }
    }

    /// True at cycle `step`; `Any` is true at every cycle.
    pub fn matches(self, step: u8) -> bool {
        match self {
            Self::Step(at) => at == step,
            Self::Any => true,
        }
    }
}

impl fmt::Display for TimeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step(step) => write!(f, "{step}"),
            Self::Any => f.write_str("X"),
        }
    }
}

/// One row of the PLA decode table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaEntry {
    /// Original ternary pattern text, kept for echoing rows back out.
    pub pattern: String,
    pub masks: MaskPair,
    pub group: Group,
    pub time: TimeStep,
    pub name: String,
}

fn row_error(line_no: usize, msg: &str, line: &str) -> ToolError {
    ToolError::new(
        ToolErrorKind::Table,
        &format!("line {line_no}: {msg}"),
        Some(line),
    )
}

fn skip_line(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

/// Parses the opcode table from text. Row fields beyond the opcode and
/// mnemonic are optional.
pub fn parse_opcode_table(text: &str) -> Result<Vec<OpcodeEntry>, ToolError> {
    let row_re = Regex::new(OPCODE_ROW_PATTERN).map_err(|err| {
        ToolError::new(
            ToolErrorKind::Table,
            "opcode row pattern failed to compile",
            Some(&err.to_string()),
        )
    })?;
    let mut entries = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if skip_line(line) {
            continue;
        }
        let caps = row_re
            .captures(line)
            .ok_or_else(|| row_error(idx + 1, "malformed opcode row", line))?;
        let opcode = u8::from_str_radix(&caps[1], 16)
            .map_err(|_| row_error(idx + 1, "bad opcode value", line))?;
        let cycles = match caps.get(4) {
            Some(m) => Some(
                m.as_str()
                    .parse::<u32>()
                    .map_err(|_| row_error(idx + 1, "cycle count out of range", line))?,
            ),
            None => None,
        };
        entries.push(OpcodeEntry {
            opcode,
            name: caps[2].to_string(),
            address_mode: caps.get(3).map(|m| m.as_str().to_string()),
            cycles,
        });
    }
    Ok(entries)
}

/// Parses the PLA table from text. Every row needs exactly four fields:
/// pattern, group, time, name.
pub fn parse_pla_table(text: &str) -> Result<Vec<PlaEntry>, ToolError> {
    let mut entries = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if skip_line(line) {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let &[pattern, group, time, name] = fields.as_slice() else {
            return Err(row_error(idx + 1, "PLA row needs 4 fields", line));
        };
        let masks = MaskPair::from_pattern(pattern)
            .map_err(|err| row_error(idx + 1, err.message(), line))?;
        let group = Group::from_symbol(group)
            .map_err(|err| row_error(idx + 1, err.message(), line))?;
        let time = TimeStep::from_symbol(time)
            .map_err(|err| row_error(idx + 1, err.message(), line))?;
        entries.push(PlaEntry {
            pattern: pattern.to_string(),
            masks,
            group,
            time,
            name: name.to_string(),
        });
    }
    Ok(entries)
}

fn read_table(path: &Path) -> Result<String, ToolError> {
    fs::read_to_string(path).map_err(|err| {
        ToolError::new(
            ToolErrorKind::Io,
            "cannot read table",
            Some(&format!("{}: {err}", path.display())),
        )
    })
}

pub fn load_opcode_table(path: &Path) -> Result<Vec<OpcodeEntry>, ToolError> {
    parse_opcode_table(&read_table(path)?)
}

pub fn load_pla_table(path: &Path) -> Result<Vec<PlaEntry>, ToolError> {
    parse_pla_table(&read_table(path)?)
}
