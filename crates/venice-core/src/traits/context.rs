// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host runtime boundary.

use serde_json::{Map, Value};

use crate::error::VeniceError;
use crate::types::{Credentials, Item};

/// What the host supplies for one run of a tool.
pub trait ExecutionContext: Send + Sync {
    /// The input items, in order.
    fn input_items(&self) -> &[Item];

    /// Raw parameter values for the item at `index`, with any per-item
    /// expressions already evaluated. Declared defaults are applied later.
    fn parameters(&self, index: usize) -> Result<Map<String, Value>, VeniceError>;

    /// Credentials for this run.
    fn credentials(&self) -> Result<Credentials, VeniceError>;

    /// Whether per-item failures are recorded instead of aborting the run.
    fn continue_on_fail(&self) -> bool;
}
