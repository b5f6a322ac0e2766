//! Search filtering for the block list.
//!
//! A block matches when the query is a case-sensitive substring of its
//! decimal block number or of its block hash. The empty query matches
//! everything. Filtering is a view: the underlying list is never touched.

use crate::types::Block;

pub fn block_matches(block: &Block, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    block.block_number.to_string().contains(query) || block.block_hash.contains(query)
}

/// Borrowing view over `blocks`, server order preserved.
pub fn filter_blocks<'a>(blocks: &'a [Block], query: &str) -> Vec<&'a Block> {
    blocks.iter().filter(|b| block_matches(b, query)).collect()
}
