// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Cooperative Scheduler
//!
//! Tasks are explicit state machines. Each [`Task::run`] call performs one bounded slice of work
//! and returns; the [`Scheduler`] decides which ready task gets the next slice. Nothing is ever
//! preempted, so a task only gives up the CPU between two `run` calls.
//!
//! ## Modules
//!
//! - [`scheduler`] - Priority-ordered, period-driven task table.

pub mod scheduler;

pub use scheduler::{Scheduler, TaskId, TaskStats};

/// Millisecond timestamp used throughout the scheduler and tasks.
pub type Instant = fugit::TimerInstantU32<1000>;

/// Millisecond duration.
pub type Duration = fugit::MillisDurationU32;

/// Monotonic millisecond time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// A resumable unit of work driven by the [`Scheduler`].
pub trait Task {
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Advance the state machine by one slice. `now` is the time of the current scheduler pass.
    fn run(&mut self, now: Instant);
}
