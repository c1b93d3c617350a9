//! Cosmetic pacing for the automated opponent's moves

use std::time::Duration;

/// Default ceiling on how long a move appears to take
pub const DEFAULT_CEILING: Duration = Duration::from_secs(2);

/// How much longer to wait before showing a move that took `elapsed` to find.
///
/// Quick searches are stretched to twice their length, slow ones are padded
/// up to `ceiling`, and searches already past the ceiling are shown at once.
pub fn thinking_delay(elapsed: Duration, ceiling: Duration) -> Duration {
    ceiling.saturating_sub(elapsed).min(elapsed)
}
