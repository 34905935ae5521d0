//! Boundary between the analysis collaborator's JSON and the node store.
//!
//! The top-level shape is checked strictly (a node list must be an array);
//! individual records are repaired or skipped so one bad node never costs the
//! whole map.

use crate::diagnostics::Diagnostic;
use crate::errors::{AppError, AppResult};
use crate::model::{MindMapNode, NodeId, NodeStore};
use regex::Regex;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Field of the analysis response that carries the node list.
const MINDMAP_FIELD: &str = "mindmap";

pub fn load_file(path: &Path) -> AppResult<NodeStore> {
    let content = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "loaded analysis file");
    parse_document(&content)
}

/// Accepts either a bare node array or an analysis response envelope.
pub fn parse_document(content: &str) -> AppResult<NodeStore> {
    match serde_json::from_str::<Value>(content)? {
        Value::Object(map) if map.contains_key(MINDMAP_FIELD) => nodes_from_envelope(map),
        other => nodes_from_value(other),
    }
}

/// Parses a JSON array of nodes.
pub fn parse_nodes(content: &str) -> AppResult<NodeStore> {
    let value: Value = serde_json::from_str(content)?;
    nodes_from_value(value)
}

/// Parses the analysis endpoint's response object and returns its mind map.
/// A missing or null `mindmap` field means the analysis produced no map.
pub fn parse_analysis_response(content: &str) -> AppResult<NodeStore> {
    match serde_json::from_str::<Value>(content)? {
        Value::Object(map) => nodes_from_envelope(map),
        other => Err(AppError::InvalidInput(format!(
            "expected an analysis response object, found {}",
            describe(&other)
        ))),
    }
}

/// Recovers the node array from free-form model output, which often wraps
/// the JSON in prose or code fences.
pub fn extract_node_array(raw: &str) -> AppResult<NodeStore> {
    let pattern = Regex::new(r"(?s)\[.*\]")
        .map_err(|e| AppError::InvalidInput(format!("array pattern: {}", e)))?;

    let found = pattern
        .find(raw)
        .ok_or_else(|| AppError::InvalidInput("no JSON array found in text".to_string()))?;

    parse_nodes(found.as_str().trim())
}

pub fn nodes_from_value(value: Value) -> AppResult<NodeStore> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(AppError::InvalidInput(format!(
                "expected a JSON array of nodes, found {}",
                describe(&other)
            )))
        }
    };

    let mut nodes = Vec::with_capacity(items.len());
    let mut diagnostics = Vec::new();

    for (index, item) in items.into_iter().enumerate() {
        match parse_record(item) {
            Ok(node) => nodes.push(node),
            Err(reason) => {
                warn!(index, %reason, "skipping mind map record");
                diagnostics.push(Diagnostic::RejectedRecord { index, reason });
            }
        }
    }

    Ok(NodeStore::with_diagnostics(nodes, diagnostics))
}

fn nodes_from_envelope(mut map: Map<String, Value>) -> AppResult<NodeStore> {
    match map.remove(MINDMAP_FIELD) {
        None | Some(Value::Null) => Ok(NodeStore::default()),
        Some(value) => nodes_from_value(value),
    }
}

fn parse_record(item: Value) -> Result<MindMapNode, String> {
    let map = match item {
        Value::Object(map) => map,
        other => return Err(format!("expected an object, found {}", describe(&other))),
    };

    let id = map
        .get("id")
        .and_then(id_from_value)
        .ok_or_else(|| "missing or unusable id".to_string())?;

    let parent_id = match map.get("parent_id") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => {
            let parent = id_from_value(value);
            if parent.is_none() {
                warn!(id = %id, "unusable parent_id, treating node as a root");
            }
            parent
        }
    };

    let text = match map.get("text") {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    };

    let level = match map.get("level").and_then(level_from_value) {
        Some(level) => level,
        None => {
            let fallback = if parent_id.is_some() { 2 } else { 1 };
            warn!(id = %id, fallback, "missing or invalid level");
            fallback
        }
    };

    // The backend also sends a `children` list; `parent_id` is authoritative.
    Ok(MindMapNode {
        id,
        text,
        level,
        parent_id,
    })
}

fn id_from_value(value: &Value) -> Option<NodeId> {
    match value {
        Value::String(s) => Some(NodeId::Text(s.clone())),
        Value::Number(n) => n.as_i64().map(NodeId::Number),
        _ => None,
    }
}

fn level_from_value(value: &Value) -> Option<u32> {
    let raw = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;

    (raw >= 1).then(|| raw.min(u32::MAX as u64) as u32)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
