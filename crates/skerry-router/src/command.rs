//! The client line protocol.
//!
//! A request is one line of space-separated tokens:
//!
//! ```text
//! get <key>
//! set <key> <value>
//! put <key>
//! del <key>
//! ```
//!
//! Surrounding whitespace is trimmed and tokens are split on single spaces,
//! so doubled spaces produce empty tokens and make the line invalid.

use std::fmt;

use crate::error::CommandError;

/// A validated key-level command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read a key.
    Get {
        /// Target key.
        key: String,
    },
    /// Write a value under a key.
    Set {
        /// Target key.
        key: String,
        /// Value token.
        value: String,
    },
    /// Create a key.
    Put {
        /// Target key.
        key: String,
    },
    /// Delete a key.
    Del {
        /// Target key.
        key: String,
    },
}

impl Command {
    /// Parse and validate one request line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let tokens: Vec<&str> = line.trim().split(' ').collect();

        let key = |expected: usize| -> Result<String, CommandError> {
            match tokens.get(1) {
                Some(k) if tokens.len() == expected && !k.is_empty() => Ok((*k).to_owned()),
                _ => Err(CommandError::Malformed),
            }
        };

        match tokens[0] {
            "get" => Ok(Self::Get { key: key(2)? }),
            "put" => Ok(Self::Put { key: key(2)? }),
            "del" => Ok(Self::Del { key: key(2)? }),
            "set" => Ok(Self::Set {
                key: key(3)?,
                value: tokens[2].to_owned(),
            }),
            other => Err(CommandError::UnknownVerb(other.to_owned())),
        }
    }

    /// The key this command operates on; its owner is resolved from it.
    pub fn key(&self) -> &str {
        match self {
            Self::Get { key } | Self::Set { key, .. } | Self::Put { key } | Self::Del { key } => {
                key
            }
        }
    }

    /// The protocol verb.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Get { .. } => "get",
            Self::Set { .. } => "set",
            Self::Put { .. } => "put",
            Self::Del { .. } => "del",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { key, value } => write!(f, "set {key} {value}"),
            other => write!(f, "{} {}", other.verb(), other.key()),
        }
    }
}
