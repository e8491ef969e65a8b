// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Venice AI tool adapters.
//!
//! - [`MockTransport`] - transport with queued responses that records every request
//! - [`fixtures`] - item and credential builders

pub mod fixtures;
pub mod mock_transport;

pub use mock_transport::{MockReply, MockTransport, RecordedRequest};
