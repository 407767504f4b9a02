use std::time::Duration;

/// How many times a transient failure is retried when the caller doesn't say.
pub const DEFAULT_RETRY_BUDGET: u32 = 3;

/// The unit of backoff between attempts.
pub const RETRY_DELAY_STEP: Duration = Duration::from_millis(100);

/// The wait before retrying, given the budget still remaining before this retry.
///
/// With the default budget of three this waits one, two, then three steps.
/// Larger budgets would go to zero or below, so they are held at one step until
/// the remaining budget drops into the default range.
pub fn retry_delay(remaining: u32) -> Duration {
    let steps = (DEFAULT_RETRY_BUDGET + 1).saturating_sub(remaining).max(1);
    RETRY_DELAY_STEP * steps
}
