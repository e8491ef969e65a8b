// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry of tool adapters, indexed by descriptor name.
//!
//! Hosts look adapters up by name and can render agent-style tool
//! definitions (name, description, JSON Schema) for every registered tool.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Value, json};
use venice_core::{ToolAdapter, ToolDescriptor};

struct Entry {
    descriptor: ToolDescriptor,
    adapter: Arc<dyn ToolAdapter>,
}

/// Registry of available tool adapters.
pub struct ToolRegistry {
    tools: HashMap<String, Entry>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// A registry holding every Venice adapter.
    pub fn with_venice_tools() -> Self {
        let mut registry = Self::new();
        crate::tools::register_all(&mut registry);
        registry
    }

    /// Registers an adapter under its descriptor name. A later registration
    /// with the same name replaces the earlier one.
    pub fn register(&mut self, adapter: Arc<dyn ToolAdapter>) {
        let descriptor = adapter.descriptor();
        self.tools.insert(
            descriptor.name.clone(),
            Entry {
                descriptor,
                adapter,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolAdapter>> {
        self.tools.get(name).map(|e| Arc::clone(&e.adapter))
    }

    pub fn descriptor(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name).map(|e| &e.descriptor)
    }

    /// Returns (name, description) pairs sorted by name.
    pub fn list(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .tools
            .values()
            .map(|e| (e.descriptor.name.as_str(), e.descriptor.description.as_str()))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }

    /// Tool definitions for agent hosts, sorted by name:
    /// `{ "name", "description", "input_schema" }`.
    pub fn tool_definitions(&self) -> Vec<Value> {
        let mut entries: Vec<&Entry> = self.tools.values().collect();
        entries.sort_by(|a, b| a.descriptor.name.cmp(&b.descriptor.name));
        entries
            .into_iter()
            .map(|e| {
                json!({
                    "name": e.descriptor.name,
                    "description": e.descriptor.description,
                    "input_schema": e.descriptor.input_schema(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
