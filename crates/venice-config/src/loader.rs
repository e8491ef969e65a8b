// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./venice.toml` > `~/.config/venice/venice.toml` > `/etc/venice/venice.toml`
//! with environment variable overrides via `VENICE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::VeniceConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/venice/venice.toml` (system-wide)
/// 3. `~/.config/venice/venice.toml` (user XDG config)
/// 4. `./venice.toml` (local directory)
/// 5. `VENICE_*` environment variables
pub fn load_config() -> Result<VeniceConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<VeniceConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VeniceConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VeniceConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VeniceConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(VeniceConfig::default()))
        .merge(Toml::file("/etc/venice/venice.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("venice/venice.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("venice.toml"))
        .merge(env_provider())
}

/// Environment provider with explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `VENICE_CREDENTIALS_API_KEY` must become
/// `credentials.api_key`. `VENICE_API_KEY` and `VENICE_BASE_URL` are accepted
/// as shorthands for the credential keys.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("VENICE_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a prefix-stripped env key to its config path. Env keys arrive in
/// their original case, so matching is done on the lowercased form.
fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    if key == "api_key" || key == "base_url" {
        return format!("credentials.{key}");
    }
    for section in ["credentials", "run", "logging"] {
        if let Some(field) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{field}");
        }
    }
    key
}
