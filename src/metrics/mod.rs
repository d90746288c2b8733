//! Observability events.
//!
//! Events record `metrics` counters through whatever recorder the host
//! process installs; without one they only produce `trace!` lines.

pub mod events;

/// Emit an internal event.
///
/// This macro calls the `InternalEvent::emit()` method on the given event.
///
/// # Example
///
/// ```ignore
/// use flurry::metrics::events::RowsAnalyzed;
///
/// emit!(RowsAnalyzed { count: 1, emoji_runs: 2 });
/// ```
#[macro_export]
macro_rules! emit {
    ($event:expr) => {
        $crate::metrics::events::InternalEvent::emit($event)
    };
}
