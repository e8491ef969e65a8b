// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `venice run` command: read items, execute a tool, write results.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use serde_json::{Map, Value};
use tracing::{debug, info};
use venice_client::VeniceClient;
use venice_config::VeniceConfig;
use venice_core::{Credentials, Item, OutputItem, VeniceError};
use venice_tools::{RunContext, ToolRegistry, execute};

/// Errors surfaced by the command-line host.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("unknown tool `{0}`; run `venice tools` to list available tools")]
    UnknownTool(String),

    #[error("invalid --param `{0}`: expected key=value")]
    InvalidParam(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} must contain {expected}")]
    Shape { path: String, expected: &'static str },

    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Venice(#[from] VeniceError),
}

/// Arguments for `venice run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Tool name, e.g. `veniceChatTool`.
    pub tool: String,

    /// JSON array of input items (`-` reads stdin). Defaults to one empty item.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// JSON object of node parameters.
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// A single parameter as key=value. Dotted keys address collection
    /// fields; values parse as JSON, falling back to plain strings.
    #[arg(long)]
    pub param: Vec<String>,

    /// Record per-item failures as error items instead of aborting.
    #[arg(long)]
    pub continue_on_fail: bool,

    /// Write output items here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Also write binary attachments to this directory as `<index>_<fileName>`.
    #[arg(long)]
    pub binary_dir: Option<PathBuf>,
}

pub async fn run(
    registry: &ToolRegistry,
    config: &VeniceConfig,
    args: RunArgs,
) -> Result<(), CliError> {
    let adapter = registry
        .get(&args.tool)
        .ok_or_else(|| CliError::UnknownTool(args.tool.clone()))?;

    let items = match &args.input {
        Some(path) => parse_items(read_json(path)?, path)?,
        None => vec![Item::default()],
    };
    let parameters = build_parameters(args.params.as_deref(), &args.param)?;
    let credentials = config.credentials()?;
    let continue_on_fail = args.continue_on_fail || config.run.continue_on_fail;

    info!(tool = %args.tool, items = items.len(), continue_on_fail, "starting run");
    let outputs = run_with(
        adapter.as_ref(),
        items,
        parameters,
        credentials,
        continue_on_fail,
    )
    .await?;

    if let Some(dir) = &args.binary_dir {
        write_binaries(&outputs, dir)?;
    }

    let rendered = serde_json::to_string_pretty(&outputs).map_err(CliError::Encode)?;
    match &args.output {
        Some(path) => std::fs::write(path, rendered).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        })?,
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Executes one adapter over `items` with the real HTTP client.
pub async fn run_with(
    adapter: &dyn venice_core::ToolAdapter,
    items: Vec<Item>,
    parameters: Map<String, Value>,
    credentials: Credentials,
    continue_on_fail: bool,
) -> Result<Vec<OutputItem>, VeniceError> {
    let ctx = RunContext::new(items)
        .with_parameters(parameters)
        .with_credentials(credentials)
        .with_continue_on_fail(continue_on_fail);
    execute(adapter, &ctx, &VeniceClient::new()).await
}

fn read_json(path: &Path) -> Result<Value, CliError> {
    let display = path.display().to_string();
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Read {
                path: "stdin".into(),
                source,
            })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: display.clone(),
            source,
        })?
    };
    serde_json::from_str(&content).map_err(|source| CliError::Parse {
        path: display,
        source,
    })
}

/// Accepts either full items (`{"json": {...}, "binary": {...}}`) or bare
/// JSON objects, which become the item payload.
fn parse_items(value: Value, path: &Path) -> Result<Vec<Item>, CliError> {
    let Value::Array(entries) = value else {
        return Err(CliError::Shape {
            path: path.display().to_string(),
            expected: "a JSON array of items",
        });
    };
    entries
        .into_iter()
        .map(|entry| match entry {
            Value::Object(map) if map.contains_key("json") || map.contains_key("binary") => {
                serde_json::from_value(Value::Object(map)).map_err(|source| CliError::Parse {
                    path: path.display().to_string(),
                    source,
                })
            }
            Value::Object(map) => Ok(Item::from_json(map)),
            _ => Err(CliError::Shape {
                path: path.display().to_string(),
                expected: "only JSON objects in the items array",
            }),
        })
        .collect()
}

fn build_parameters(file: Option<&Path>, pairs: &[String]) -> Result<Map<String, Value>, CliError> {
    let mut parameters = match file {
        Some(path) => match read_json(path)? {
            Value::Object(map) => map,
            _ => {
                return Err(CliError::Shape {
                    path: path.display().to_string(),
                    expected: "a JSON object of parameters",
                });
            }
        },
        None => Map::new(),
    };
    for pair in pairs {
        let (key, value) = parse_param(pair)?;
        insert_dotted(&mut parameters, &key, value);
    }
    debug!(keys = parameters.len(), "parameters assembled");
    Ok(parameters)
}

fn parse_param(pair: &str) -> Result<(String, Value), CliError> {
    let (key, raw) = pair
        .split_once('=')
        .filter(|(k, _)| !k.trim().is_empty())
        .ok_or_else(|| CliError::InvalidParam(pair.to_string()))?;
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.trim().to_string(), value))
}

fn insert_dotted(target: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            target.insert(key.to_string(), value);
        }
        Some((head, rest)) => {
            let slot = target
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(inner) = slot {
                insert_dotted(inner, rest, value);
            }
        }
    }
}

fn write_binaries(outputs: &[OutputItem], dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(dir).map_err(|source| CliError::Write {
        path: dir.display().to_string(),
        source,
    })?;
    for output in outputs {
        let Some(binary) = &output.binary else {
            continue;
        };
        for (key, data) in binary {
            let name = data.file_name.as_deref().unwrap_or(key.as_str());
            let path = dir.join(format!("{}_{name}", output.paired_item.item));
            std::fs::write(&path, &data.data).map_err(|source| CliError::Write {
                path: path.display().to_string(),
                source,
            })?;
            info!(path = %path.display(), bytes = data.data.len(), "wrote attachment");
        }
    }
    Ok(())
}
