// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface parsing and argument validation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::error::{ToolError, ToolErrorKind};
use crate::mask::MaskPair;
use crate::which::WhichQuery;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const LONG_ABOUT: &str = "Decode-table tooling for a 6502-family CPU emulator core.

which filters the opcode/cycle table by a required-one/required-zero bitmask
pair, a cycle-count threshold, and an instruction-group selector.
clocks lists the PLA decode rows that fire for one opcode at each of the six
time steps of an instruction.
generator emits one conditional dispatch stub per unique PLA rule, ready to
paste into the CPU core's decode loop.";

#[derive(Parser, Debug)]
#[command(
    name = "plaForge",
    version = VERSION,
    about = "Opcode and PLA decode-table query/codegen tools for a 6502-family core",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter the opcode table by bitmask pair, cycle threshold, and group.
    Which {
        #[arg(
            value_name = "POS_MASK",
            long_help = "Required-one bitmask, hexadecimal. A 0x or $ prefix is accepted."
        )]
        pos_mask: String,
        #[arg(
            value_name = "NEG_MASK",
            long_help = "Required-zero bitmask, hexadecimal. A 0x or $ prefix is accepted."
        )]
        neg_mask: String,
        #[arg(
            value_name = "TIME",
            long_help = "Cycle-count threshold. Rows with fewer cycles are skipped; X disables the threshold."
        )]
        time: String,
        #[arg(
            value_name = "GROUP",
            long_help = "Instruction-group selector, 0-3, indexing the group tuple derived from opcode bits 0 and 1."
        )]
        group: String,
        #[arg(
            long = "table",
            value_name = "FILE",
            default_value = "ops_table.txt",
            long_help = "Opcode/cycle table to read instead of ops_table.txt."
        )]
        table: PathBuf,
        #[arg(
            long = "format",
            value_enum,
            default_value_t = OutputFormat::Text,
            long_help = "Select output format. text is default; json emits one object per matching row."
        )]
        format: OutputFormat,
    },
    /// List the PLA rows that fire for one opcode at each time step 0-5.
    Clocks {
        #[arg(
            value_name = "OPCODE",
            long_help = "Opcode to decode: an 8-bit integer, decimal or hex with a 0x or $ prefix."
        )]
        opcode: String,
        #[arg(
            long = "table",
            value_name = "FILE",
            default_value = "pla.txt",
            long_help = "PLA decode table to read instead of pla.txt."
        )]
        table: PathBuf,
        #[arg(
            long = "format",
            value_enum,
            default_value_t = OutputFormat::Text,
            long_help = "Select output format. text is default; json emits one object per time step."
        )]
        format: OutputFormat,
    },
    /// Emit one conditional dispatch stub per unique PLA rule.
    Generator {
        #[arg(
            long = "table",
            value_name = "FILE",
            default_value = "pla.txt",
            long_help = "PLA decode table to read instead of pla.txt."
        )]
        table: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Validated work order produced from the raw CLI arguments.
#[derive(Debug)]
pub enum Action {
    Which {
        query: WhichQuery,
        table: PathBuf,
        format: OutputFormat,
    },
    Clocks {
        opcode: u8,
        table: PathBuf,
        format: OutputFormat,
    },
    Generator {
        table: PathBuf,
    },
}

fn cli_error(msg: &str, param: &str) -> ToolError {
    ToolError::new(ToolErrorKind::Cli, msg, Some(param))
}

fn strip_radix_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix('$'))
}

/// Parses a hexadecimal bitmask argument. The 0x/$ prefix is optional.
pub fn parse_mask(text: &str) -> Result<u8, ToolError> {
    let digits = strip_radix_prefix(text).unwrap_or(text);
    u8::from_str_radix(digits, 16)
        .map_err(|_| cli_error("mask must be an 8-bit hexadecimal value", text))
}

/// Parses the cycle-count threshold: a non-negative integer, or X for none.
pub fn parse_time_threshold(text: &str) -> Result<Option<u32>, ToolError> {
    if text == "X" {
        return Ok(None);
    }
    text.parse::<u32>()
        .map(Some)
        .map_err(|_| cli_error("time threshold must be an integer or X", text))
}

/// Parses the group selector, an index 0-3 into the group tuple.
pub fn parse_group_index(text: &str) -> Result<usize, ToolError> {
    match text.parse::<usize>() {
        Ok(index) if index <= 3 => Ok(index),
        _ => Err(cli_error("group selector must be 0-3", text)),
    }
}

/// Parses an opcode argument strictly: decimal, or hex with a 0x/$ prefix.
/// Anything else, including expressions, is rejected.
pub fn parse_opcode(text: &str) -> Result<u8, ToolError> {
    let parsed = match strip_radix_prefix(text) {
        Some(digits) => u8::from_str_radix(digits, 16),
        None => text.parse::<u8>(),
    };
    parsed.map_err(|_| cli_error("opcode must be an 8-bit decimal or 0x/$-prefixed hex integer", text))
}

/// Validates argument values and builds the action to run. Fails before any
/// table file is opened.
pub fn validate_cli(cli: &Cli) -> Result<Action, ToolError> {
    match &cli.command {
        Command::Which {
            pos_mask,
            neg_mask,
            time,
            group,
            table,
            format,
        } => Ok(Action::Which {
            query: WhichQuery {
                masks: MaskPair {
                    pos: parse_mask(pos_mask)?,
                    neg: parse_mask(neg_mask)?,
                },
                min_cycles: parse_time_threshold(time)?,
                group: parse_group_index(group)?,
            },
            table: table.clone(),
            format: *format,
        }),
        Command::Clocks {
            opcode,
            table,
            format,
        } => Ok(Action::Clocks {
            opcode: parse_opcode(opcode)?,
            table: table.clone(),
            format: *format,
        }),
        Command::Generator { table } => Ok(Action::Generator {
            table: table.clone(),
        }),
    }
}
