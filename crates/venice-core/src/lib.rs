// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Venice AI tool adapters.
//!
//! This crate holds the item model, the declarative tool descriptor types,
//! the transport-neutral request descriptors, the shared error type, and the
//! traits at the three seams: host ([`ExecutionContext`]), adapter
//! ([`ToolAdapter`]), and provider ([`HttpTransport`]).

pub mod descriptor;
pub mod error;
pub mod params;
pub mod request;
pub mod traits;
pub mod types;

pub use descriptor::{
    CredentialRequirement, OptionValue, ParameterKind, ParameterSpec, ToolDescriptor,
};
pub use error::{ErrorKind, VeniceError};
pub use params::ParameterSet;
pub use request::{
    FormField, HttpMethod, ProviderResponse, RequestBody, RequestDescriptor, ResponseFormat,
};
pub use traits::{ExecutionContext, HttpTransport, ToolAdapter};
pub use types::{
    BinaryData, CREDENTIAL_NAME, Credentials, DEFAULT_BASE_URL, Item, OutputItem, PairedItem,
};
