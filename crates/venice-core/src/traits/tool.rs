// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The tool adapter trait implemented once per provider endpoint.

use crate::descriptor::ToolDescriptor;
use crate::error::VeniceError;
use crate::params::ParameterSet;
use crate::request::{ProviderResponse, RequestDescriptor};
use crate::types::{Item, OutputItem};

/// One provider-endpoint binding: a static descriptor plus the two pure
/// halves of per-item execution.
///
/// The runner owns the loop, the HTTP call, and the failure policy. An
/// adapter only turns resolved parameters into a request and a response into
/// an output item.
pub trait ToolAdapter: Send + Sync {
    /// Returns the static schema of this tool.
    fn descriptor(&self) -> ToolDescriptor;

    /// Builds the request for one item. Errors here prevent any HTTP call.
    fn build_request(
        &self,
        params: &ParameterSet,
        item: &Item,
    ) -> Result<RequestDescriptor, VeniceError>;

    /// Reshapes the provider response for one item. `index` is the item's
    /// position in the input.
    fn shape_response(
        &self,
        params: &ParameterSet,
        item: &Item,
        index: usize,
        response: ProviderResponse,
    ) -> Result<OutputItem, VeniceError>;
}
