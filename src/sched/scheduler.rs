// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Priority-ordered, period-driven cooperative scheduler.
//!
//! Every registered task has a static priority (lower number runs first) and a nominal period.
//! A task is *ready* once its period has elapsed since its previous release, or if it has never
//! run. One [`run_pass`](Scheduler::run_pass) repeatedly picks the most urgent ready task that has
//! not yet run in this pass and runs it once, until no ready task is left. Ties between equal
//! priorities go to the task that ran least recently, which rotates them round-robin.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let mut sched: Scheduler<4> = Scheduler::new();
//! sched.add(&mut acquisition, 1, 20.millis())?;
//! sched.add(&mut fire, 3, 20.millis())?;
//!
//! sched.run(&clock, &SHARES.stop);
//! ```

use heapless::Vec;
use log::{info, warn};

use crate::sched::{Clock, Duration, Instant, Task};
use crate::share::SharedCell;
use crate::Error;

/// Handle returned by [`Scheduler::add`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TaskId(usize);

/// Per-task run counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of completed slices.
    pub runs: u32,
    /// Releases that were already in the past when the task finished its slice.
    pub overruns: u32,
}

struct Entry<'a> {
    task: &'a mut dyn Task,
    priority: u8,
    period: Duration,
    next_release: Option<Instant>,
    /// Dispatch sequence number of the last run, for round-robin ties.
    last_dispatch: u32,
    stats: TaskStats,
}

impl Entry<'_> {
    #[inline]
    fn is_ready(&self, now: Instant) -> bool {
        self.next_release.map_or(true, |release| now >= release)
    }

    /// True if `self` should run before `other`.
    #[inline]
    fn precedes(&self, other: &Entry<'_>) -> bool {
        (self.priority, self.last_dispatch) < (other.priority, other.last_dispatch)
    }
}

/// Fixed-capacity task table for up to `N` tasks.
pub struct Scheduler<'a, const N: usize> {
    entries: Vec<Entry<'a>, N>,
    dispatches: u32,
}

impl<'a, const N: usize> Scheduler<'a, N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            dispatches: 0,
        }
    }

    /// Register a task. It becomes ready immediately and then every `period`.
    pub fn add(
        &mut self,
        task: &'a mut dyn Task,
        priority: u8,
        period: Duration,
    ) -> Result<TaskId, Error> {
        let id = TaskId(self.entries.len());
        self.entries
            .push(Entry {
                task,
                priority,
                period,
                next_release: None,
                last_dispatch: 0,
                stats: TaskStats::default(),
            })
            .map_err(|_| Error::SchedulerFull)?;
        Ok(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self, id: TaskId) -> TaskStats {
        self.entries[id.0].stats
    }

    /// Run every ready task once, most urgent first. Returns the number of slices run.
    pub fn run_pass(&mut self, now: Instant) -> usize {
        let mut done = [false; N];
        let mut count = 0;

        loop {
            let mut pick: Option<usize> = None;
            for (i, entry) in self.entries.iter().enumerate() {
                if done[i] || !entry.is_ready(now) {
                    continue;
                }
                match pick {
                    Some(j) if !entry.precedes(&self.entries[j]) => {}
                    _ => pick = Some(i),
                }
            }

            let Some(i) = pick else {
                break;
            };

            done[i] = true;
            self.dispatch(i, now);
            count += 1;
        }

        count
    }

    /// Run passes until `stop` reads true. Tasks are abandoned in whatever state they are in.
    pub fn run<C: Clock>(&mut self, clock: &C, stop: &SharedCell<bool>) {
        info!("Scheduler running {} tasks", self.entries.len());

        while !stop.get() {
            self.run_pass(clock.now());
        }

        info!("Scheduler stopped");
        self.log_stats();
    }

    /// Dump per-task counters at info level.
    pub fn log_stats(&self) {
        for entry in self.entries.iter() {
            info!(
                "{}: pri {} period {} ms, {} runs, {} overruns",
                entry.task.name(),
                entry.priority,
                entry.period.ticks(),
                entry.stats.runs,
                entry.stats.overruns,
            );
        }
    }

    fn dispatch(&mut self, i: usize, now: Instant) {
        self.dispatches = self.dispatches.wrapping_add(1);
        let entry = &mut self.entries[i];

        entry.task.run(now);
        entry.last_dispatch = self.dispatches;
        entry.stats.runs += 1;

        let mut next = match entry.next_release {
            Some(release) => release + entry.period,
            None => now + entry.period,
        };
        if entry.period.ticks() > 0 && next <= now {
            entry.stats.overruns += 1;
            warn!("{} overran its {} ms period", entry.task.name(), entry.period.ticks());
            next = now + entry.period;
        }
        entry.next_release = Some(next);
    }
}

impl<const N: usize> Default for Scheduler<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
