//! Course completion percentage computation.
//!
//! Progress is never maintained incrementally: it is recomputed from scratch
//! after every mark/unmark operation, against the lecture set the course has
//! *now*. If lectures were added to the course after earlier completions the
//! percentage can drop, and completed-lecture ids whose lecture has since
//! been deleted simply stop counting. Both are accepted catalog-drift
//! behaviour.

use std::collections::HashSet;

use crate::types::DbId;

/// Compute the completion percentage of a course.
///
/// Only completed ids that still belong to the course's live lecture set are
/// counted. The result is `round(100 * |completed ∩ live| / |live|)`,
/// clamped to `[0, 100]`. A course with no lectures is 0% complete.
pub fn completion_percent(completed: &[DbId], live_lectures: &[DbId]) -> i32 {
    if live_lectures.is_empty() {
        return 0;
    }

    let live: HashSet<DbId> = live_lectures.iter().copied().collect();
    let done = completed
        .iter()
        .filter(|id| live.contains(id))
        .collect::<HashSet<_>>()
        .len();

    let percent = (100.0 * done as f64 / live.len() as f64).round() as i32;
    percent.clamp(0, 100)
}
