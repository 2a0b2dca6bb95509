//! Bounded retry-polling.
//!
//! The carousel image extraction needs to re-check the DOM until a value
//! appears or an overall budget runs out. This is modelled as an explicit
//! outcome type rather than an open-ended loop: each tick either produces
//! a value (done), produces nothing (keep polling), or the deadline fires
//! (timed out).

use std::time::Duration;

/// Terminal state of a bounded poll.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome<T> {
    /// An attempt produced a value before the deadline.
    Completed(T),
    /// The overall budget elapsed with every attempt empty-handed.
    TimedOut,
}

/// Run `attempt` at a fixed interval until it yields a value or `timeout`
/// elapses.
///
/// The first attempt runs immediately; subsequent attempts follow every
/// `interval`. The timeout is enforced around the whole loop, so a poll
/// never outlives its budget regardless of how long individual attempts
/// take.
pub async fn poll_until<T, F, Fut>(interval: Duration, timeout: Duration, mut attempt: F) -> PollOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Option<T>>,
{
    let run = async {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if let Some(value) = attempt().await {
                return value;
            }
        }
    };

    match tokio::time::timeout(timeout, run).await {
        Ok(value) => PollOutcome::Completed(value),
        Err(_) => PollOutcome::TimedOut,
    }
}
