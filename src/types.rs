use serde::{Deserialize, Serialize};

use crate::error::FeedError;

/// One block as served by the `latest-blocks` endpoint.
///
/// Read-only once received; field names follow the upstream lowercase keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "blocknumber")]
    pub block_number: u64,
    #[serde(rename = "blockhash")]
    pub block_hash: String,
    #[serde(rename = "previousblockhash")]
    pub previous_block_hash: String,
    #[serde(rename = "blocktime")]
    pub block_time: BlockTime,
    #[serde(rename = "parentslot")]
    pub parent_slot: u64,
    pub proposer: String,
    pub metrics: BlockMetrics,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTime {
    /// Unix seconds.
    pub absolute: i64,
}

/// `failed_txs + successful_txs == tx_count` is assumed, never checked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMetrics {
    #[serde(rename = "txcount")]
    pub tx_count: u64,
    #[serde(rename = "failedtxs")]
    pub failed_txs: u64,
    // upstream spells it "sucessfultxs"
    #[serde(rename = "sucessfultxs", alias = "successfultxs")]
    pub successful_txs: u64,
    #[serde(rename = "totalfees")]
    pub total_fees_lamports: u64,
}

impl Block {
    /// Rejects records that decode but cannot be displayed meaningfully.
    pub fn validate(&self) -> Result<(), String> {
        if self.block_hash.trim().is_empty() {
            return Err(format!("block {} has an empty blockhash", self.block_number));
        }
        if self.proposer.trim().is_empty() {
            return Err(format!("block {} has an empty proposer", self.block_number));
        }
        Ok(())
    }
}

/// A single page fetch handed to the feed worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub id: u64,
    pub limit: u32,
    pub cursor: Option<u64>,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    PageLoaded {
        request: PageRequest,
        result: Result<Vec<Block>, FeedError>,
    },
    Quit,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn block(number: u64, hash: &str, parent_slot: u64) -> Block {
        Block {
            block_number: number,
            block_hash: hash.to_string(),
            previous_block_hash: format!("prev{hash}"),
            block_time: BlockTime { absolute: 1_700_000_000 },
            parent_slot,
            proposer: "ProposerIdentity1111111111111111111111111".to_string(),
            metrics: BlockMetrics {
                tx_count: 10,
                failed_txs: 3,
                successful_txs: 7,
                total_fees_lamports: 123_456_789,
            },
        }
    }
}
