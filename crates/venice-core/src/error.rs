// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Venice AI tool adapters.

use strum::{Display, EnumString};
use thiserror::Error;

/// The primary error type shared by adapters, transports, and the runner.
#[derive(Debug, Error)]
pub enum VeniceError {
    /// A required parameter is missing or unusable. Raised before any network call.
    #[error("{message}")]
    Validation { message: String },

    /// The item does not carry the binary attachment an adapter needs.
    #[error("{message}")]
    BinaryMissing { message: String },

    /// Network or HTTP-level failure while talking to the provider.
    #[error("{message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider answered with a non-success status or a malformed payload.
    #[error("{message}")]
    Upstream { status: Option<u16>, message: String },

    /// Configuration or credential resolution errors.
    #[error("configuration error: {0}")]
    Config(String),

    /// A per-item failure that aborted the whole run.
    #[error("item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: Box<VeniceError>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`VeniceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    BinaryMissing,
    Transport,
    Upstream,
    Config,
    Internal,
}

impl VeniceError {
    /// Shorthand for a [`VeniceError::Validation`] error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for an [`VeniceError::Upstream`] error without a status code.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Upstream {
            status: None,
            message: message.into(),
        }
    }

    /// Attaches the index of the item that produced this error.
    pub fn at_item(self, index: usize) -> Self {
        match self {
            Self::Item { .. } => self,
            other => Self::Item {
                index,
                source: Box::new(other),
            },
        }
    }

    /// Returns the kind of the underlying failure. `Item` reports its inner kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::BinaryMissing { .. } => ErrorKind::BinaryMissing,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Upstream { .. } => ErrorKind::Upstream,
            Self::Config(_) => ErrorKind::Config,
            Self::Item { source, .. } => source.kind(),
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// True for failures detected from the input alone, before any HTTP call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Validation | ErrorKind::BinaryMissing
        )
    }

    /// Index of the offending item, if this error was raised for one.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Self::Item { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// The innermost error, with item wrappers stripped.
    pub fn root(&self) -> &VeniceError {
        match self {
            Self::Item { source, .. } => source.root(),
            other => other,
        }
    }
}
