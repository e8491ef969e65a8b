// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the host, adapter, and provider boundaries.

pub mod context;
pub mod tool;
pub mod transport;

pub use context::ExecutionContext;
pub use tool::ToolAdapter;
pub use transport::HttpTransport;
