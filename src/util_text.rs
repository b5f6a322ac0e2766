//! Display formatting for block fields.

const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
const ELLIPSIS: &str = "...";

/// Shorten `hash` to `prefix` leading chars + "..." + `suffix` trailing chars.
///
/// Hashes that would not get shorter (`len <= prefix + suffix + 3`) are
/// returned unchanged.
pub fn truncate_hash(hash: &str, prefix: usize, suffix: usize) -> String {
    let len = hash.chars().count();
    if len <= prefix + suffix + ELLIPSIS.len() {
        return hash.to_string();
    }
    let head: String = hash.chars().take(prefix).collect();
    let tail: String = hash.chars().skip(len - suffix).collect();
    format!("{head}{ELLIPSIS}{tail}")
}

/// "17m ago" style age of `timestamp` relative to `now` (both Unix seconds).
///
/// Timestamps in the future clamp to "0s ago".
pub fn relative_time(timestamp: i64, now: i64) -> String {
    let diff = now.saturating_sub(timestamp).max(0);
    if diff < 60 {
        format!("{diff}s ago")
    } else if diff < 3_600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86_400 {
        format!("{}h ago", diff / 3_600)
    } else {
        format!("{}d ago", diff / 86_400)
    }
}

/// Lamports as SOL with exactly four decimals, rounded half-up.
/// Examples: 1_000_000_000 -> "1.0000", 123_456_789 -> "0.1235"
pub fn fees_to_sol(lamports: u64) -> String {
    const STEP: u128 = (LAMPORTS_PER_SOL / 10_000) as u128;
    let ten_thousandths = (lamports as u128 + STEP / 2) / STEP;
    format!("{}.{:04}", ten_thousandths / 10_000, ten_thousandths % 10_000)
}
