//! Ordering engine for a client's task list.
//!
//! `order` is a zero-based display position. Appending takes the current
//! task count, reordering renumbers the whole list, and deleting leaves gaps.
//! Display order sorts by `order`, then creation time, then identifier, which
//! is a total order even when positions collide or have gaps.

use super::{OnboardingDomainError, Task};
use std::cmp::Ordering;

/// A drag-and-drop move inside one client's task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderRequest {
    from: usize,
    to: usize,
}

impl ReorderRequest {
    /// Moves the task displayed at `from` so it is displayed at `to`.
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Returns the source index.
    #[must_use]
    pub const fn source(self) -> usize {
        self.from
    }

    /// Returns the target index.
    #[must_use]
    pub const fn target(self) -> usize {
        self.to
    }
}

/// Returns the position for a task appended to `current`.
#[must_use]
pub fn next_order(current: &[Task]) -> u32 {
    u32::try_from(current.len()).unwrap_or(u32::MAX)
}

/// Display-order comparison of two tasks.
#[must_use]
pub fn compare_tasks(left: &Task, right: &Task) -> Ordering {
    left.order()
        .cmp(&right.order())
        .then_with(|| left.created_at().cmp(&right.created_at()))
        .then_with(|| left.id().cmp(right.id()))
}

/// Sorts tasks into display order.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(compare_tasks);
}

/// Applies a move to a displayed task list and renumbers every task by its
/// new position.
///
/// `tasks` is taken as displayed; it is not re-sorted first.
///
/// # Errors
///
/// Returns [`OnboardingDomainError::ReorderOutOfRange`] when either index is
/// outside the list.
pub fn reorder(tasks: &[Task], request: ReorderRequest) -> Result<Vec<Task>, OnboardingDomainError> {
    let len = tasks.len();
    if request.from >= len || request.to >= len {
        return Err(OnboardingDomainError::ReorderOutOfRange {
            from: request.from,
            to: request.to,
            len,
        });
    }

    let mut moved = tasks.to_vec();
    let task = moved.remove(request.from);
    moved.insert(request.to, task);
    Ok(renumber(moved))
}

/// Assigns every task its position in `tasks` as its `order`.
#[must_use]
pub fn renumber(tasks: Vec<Task>) -> Vec<Task> {
    tasks
        .into_iter()
        .zip(0_u32..)
        .map(|(task, order)| task.with_order(order))
        .collect()
}

/// Returns `true` when the positions are exactly `0..tasks.len()`.
#[must_use]
pub fn is_dense(tasks: &[Task]) -> bool {
    let mut orders: Vec<u32> = tasks.iter().map(Task::order).collect();
    orders.sort_unstable();
    orders.into_iter().zip(0_u32..).all(|(order, expected)| order == expected)
}
