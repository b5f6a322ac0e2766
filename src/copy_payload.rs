//! Clipboard payloads built from blocks.

use crate::types::Block;
use crate::util_text::fees_to_sol;
use serde_json::{json, Value};

/// Block in the upstream wire shape plus a human-readable fee.
pub fn block_json(block: &Block) -> Value {
    let mut v = serde_json::to_value(block).unwrap_or(Value::Null);
    if let Some(obj) = v.as_object_mut() {
        obj.insert(
            "human".into(),
            json!({ "total_fees": format!("{} SOL", fees_to_sol(block.metrics.total_fees_lamports)) }),
        );
    }
    v
}

/// Pretty-print JSON value, without a trailing newline.
pub fn pretty_no_newline(v: &Value) -> String {
    match serde_json::to_string_pretty(v) {
        Ok(mut s) => {
            if s.ends_with('\n') {
                s.pop();
            }
            s
        }
        Err(_) => String::new(),
    }
}
