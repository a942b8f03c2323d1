//! Hard error types.
//!
//! Rule violations during play are not errors; they are reported as
//! [`MoveRejection`](crate::rules::MoveRejection) values. The types here
//! cover setup and input problems that never reach the rule engine.

use std::path::PathBuf;

use crate::board::{Position, TokenId};

/// Errors raised when a layout cannot be placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("token '{id}' placed at {position} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        id: TokenId,
        position: Position,
        rows: usize,
        cols: usize,
    },

    #[error("duplicate token id '{0}'")]
    DuplicateId(TokenId),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}

/// Errors produced while parsing a protocol command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: '{0}'")]
    UnknownCommand(String),

    #[error("missing {argument} for '{command}'")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("unknown direction: '{0}' (expected UP, DOWN, LEFT or RIGHT)")]
    UnknownDirection(String),

    #[error("invalid coordinate: '{0}'")]
    InvalidCoordinate(String),
}
