// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Venice AI tool adapters.
//!
//! Seven adapters, one per Venice endpoint, each exposing a static
//! descriptor and pure request/response halves:
//!
//! - [`ChatTool`] - chat completion with a single user message
//! - [`EmbeddingsTool`] - text embeddings
//! - [`ImageGenerateTool`] - text-to-image generation
//! - [`ImageUpscaleTool`] - upscaling of an image attachment
//! - [`ListCharactersTool`] - character persona listing
//! - [`ListModelsTool`] - model listing with a type filter
//! - [`TextToSpeechTool`] - speech synthesis to an audio attachment
//!
//! [`runner::execute`] drives an adapter over a run's items with the
//! continue-on-fail policy; [`RunContext`] is an in-process host context.

pub mod context;
pub mod registry;
pub mod runner;
pub mod tools;

pub use context::RunContext;
pub use registry::ToolRegistry;
pub use runner::execute;
pub use tools::{
    ChatTool, EmbeddingsTool, ImageGenerateTool, ImageUpscaleTool, ListCharactersTool,
    ListModelsTool, TextToSpeechTool, register_all,
};
