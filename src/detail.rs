//! Expanded, field-by-field view of a single block.

use crate::types::Block;
use crate::util_text::{fees_to_sol, relative_time, truncate_hash};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
    /// Full text placed on the clipboard; `None` for display-only fields.
    pub copy: Option<String>,
}

impl DetailField {
    fn shown(label: &'static str, value: String) -> Self {
        Self { label, value, copy: None }
    }

    fn copyable(label: &'static str, value: String, copy: String) -> Self {
        Self { label, value, copy: Some(copy) }
    }

    pub fn is_copyable(&self) -> bool {
        self.copy.is_some()
    }
}

/// Project every field of `block` through the formatters. `now` is Unix seconds.
pub fn present(block: &Block, now: i64) -> Vec<DetailField> {
    let m = &block.metrics;
    vec![
        DetailField::copyable(
            "Block",
            format!("#{}", block.block_number),
            block.block_number.to_string(),
        ),
        DetailField::copyable(
            "Hash",
            truncate_hash(&block.block_hash, 8, 4),
            block.block_hash.clone(),
        ),
        DetailField::copyable(
            "Previous Block Hash",
            truncate_hash(&block.previous_block_hash, 4, 4),
            block.previous_block_hash.clone(),
        ),
        DetailField::shown("Timestamp", relative_time(block.block_time.absolute, now)),
        DetailField::shown("Transactions", m.tx_count.to_string()),
        DetailField::shown("Failed Transactions", m.failed_txs.to_string()),
        DetailField::shown("Successful Transactions", m.successful_txs.to_string()),
        DetailField::shown("Total Fees", format!("{} SOL", fees_to_sol(m.total_fees_lamports))),
        DetailField::copyable(
            "Proposer",
            truncate_hash(&block.proposer, 8, 4),
            block.proposer.clone(),
        ),
        DetailField::copyable(
            "Previous Slot",
            block.parent_slot.to_string(),
            block.parent_slot.to_string(),
        ),
    ]
}
