// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error types and reporting for the decode-table tools.

use std::fmt;
use std::io;

/// Categories of tool errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    Cli,
    Io,
    Table,
    Group,
}

/// A tool error with a kind and message.
#[derive(Debug, Clone)]
pub struct ToolError {
    kind: ToolErrorKind,
    message: String,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, msg: &str, param: Option<&str>) -> Self {
        Self {
            kind,
            message: format_error(msg, param),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> ToolErrorKind {
        self.kind
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ToolError {}

impl From<io::Error> for ToolError {
    fn from(err: io::Error) -> Self {
        Self::new(ToolErrorKind::Io, "i/o error", Some(&err.to_string()))
    }
}

pub fn format_error(msg: &str, param: Option<&str>) -> String {
    match param {
        Some(p) => format!("{msg}: {p}"),
        None => msg.to_string(),
    }
}

/// Stable diagnostic code per error kind, used by the JSON error output.
pub fn default_diagnostic_code(kind: ToolErrorKind) -> &'static str {
    match kind {
        ToolErrorKind::Cli => "plf001",
        ToolErrorKind::Io => "plf002",
        ToolErrorKind::Table => "plf003",
        ToolErrorKind::Group => "plf004",
    }
}
