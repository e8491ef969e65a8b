// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport trait for talking to the provider.

use async_trait::async_trait;

use crate::error::VeniceError;
use crate::request::{ProviderResponse, RequestDescriptor};
use crate::types::Credentials;

/// Issues exactly one HTTP call per request. No retries.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(
        &self,
        credentials: &Credentials,
        request: RequestDescriptor,
    ) -> Result<ProviderResponse, VeniceError>;
}
