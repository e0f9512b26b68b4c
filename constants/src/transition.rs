/// Per-point transition durations are drawn uniformly from this range.
pub const MIN_DURATION_MS: u64 = 1_000;
pub const MAX_DURATION_MS: u64 = 4_000;

/// Idle time after which the engine moves on to the next shape by itself.
pub const AUTO_CYCLE_INTERVAL_MS: u64 = 6_000;

pub const AUTO_CYCLE_ENABLED: bool = true;
