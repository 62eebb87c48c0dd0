// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Interrupt-safe shared state for inter-task communication.
//!
//! Every value that crosses a task boundary lives in exactly one [`SharedCell`]. Reads and writes
//! run inside a critical section, so a timer interrupt landing in the middle of a multi-byte
//! access can never observe a torn value. Cells are updated one at a time; readers must not
//! assume that two cells form a consistent snapshot.
//!
//! The whole set of cells is bundled in [`Shares`], which is `const`-constructible and meant to
//! live in a `static`. Tasks receive a `&Shares` at construction.

use core::cell::Cell;
use core::fmt::Debug;

use critical_section::Mutex;
use log::trace;

/// Single-slot cell holding one `Copy` value.
pub struct SharedCell<T: Copy> {
    name: &'static str,
    value: Mutex<Cell<T>>,
}

impl<T: Copy> SharedCell<T> {
    /// Create a cell with an explicit initial value.
    pub const fn new(name: &'static str, initial: T) -> Self {
        Self {
            name,
            value: Mutex::new(Cell::new(initial)),
        }
    }

    /// Most recently published value.
    #[inline]
    pub fn get(&self) -> T {
        critical_section::with(|cs| self.value.borrow(cs).get())
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: Copy + Debug> SharedCell<T> {
    /// Publish a new value.
    #[inline]
    pub fn put(&self, value: T) {
        trace!("{} <- {:?}", self.name, value);
        critical_section::with(|cs| self.value.borrow(cs).set(value));
    }
}

/// All cells shared between the turret tasks.
///
/// | Cell | Writer | Readers |
/// | ---- | ------ | ------- |
/// | `start` | the one axis task with a startup sweep (yaw) | acquisition |
/// | `target_x`, `target_y` | acquisition | yaw, pitch axis tasks |
/// | `targ_acquired` | acquisition sets, fire sequencer clears (re-arm only) | all |
/// | `yaw_curr`, `at_yaw` | yaw axis task | fire sequencer, acquisition, pitch |
/// | `pitch_curr`, `at_pitch` | pitch axis task | fire sequencer, acquisition, yaw |
/// | `stop` | operator stop | scheduler loop |
pub struct Shares {
    /// Startup sweep still pending.
    pub start: SharedCell<bool>,
    /// Horizontal target displacement, encoder ticks (yaw).
    pub target_x: SharedCell<f32>,
    /// Vertical target displacement, encoder ticks (pitch).
    pub target_y: SharedCell<f32>,
    pub targ_acquired: SharedCell<bool>,
    pub yaw_curr: SharedCell<f32>,
    pub at_yaw: SharedCell<bool>,
    pub pitch_curr: SharedCell<f32>,
    pub at_pitch: SharedCell<bool>,
    /// Process-wide cancellation for the scheduler loop.
    pub stop: SharedCell<bool>,
}

impl Shares {
    /// Power-up state: flags cleared, targets and positions zero, startup sweep requested.
    pub const fn new() -> Self {
        Self {
            start: SharedCell::new("start", true),
            target_x: SharedCell::new("target_x", 0.0),
            target_y: SharedCell::new("target_y", 0.0),
            targ_acquired: SharedCell::new("targ_acquired", false),
            yaw_curr: SharedCell::new("yaw_curr", 0.0),
            at_yaw: SharedCell::new("at_yaw", false),
            pitch_curr: SharedCell::new("pitch_curr", 0.0),
            at_pitch: SharedCell::new("at_pitch", false),
            stop: SharedCell::new("stop", false),
        }
    }

    /// Cells owned or read by the yaw axis.
    pub fn yaw(&self) -> AxisShares<'_> {
        AxisShares {
            target: &self.target_x,
            current: &self.yaw_curr,
            on_target: &self.at_yaw,
            acquired: &self.targ_acquired,
            start: &self.start,
        }
    }

    /// Cells owned or read by the pitch axis.
    pub fn pitch(&self) -> AxisShares<'_> {
        AxisShares {
            target: &self.target_y,
            current: &self.pitch_curr,
            on_target: &self.at_pitch,
            acquired: &self.targ_acquired,
            start: &self.start,
        }
    }

    /// True when both axes have released their on-target flags.
    pub fn axes_released(&self) -> bool {
        !self.at_yaw.get() && !self.at_pitch.get()
    }
}

impl Default for Shares {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles one axis task needs, borrowed from [`Shares`].
#[derive(Copy, Clone)]
pub struct AxisShares<'a> {
    pub target: &'a SharedCell<f32>,
    pub current: &'a SharedCell<f32>,
    pub on_target: &'a SharedCell<bool>,
    pub acquired: &'a SharedCell<bool>,
    pub start: &'a SharedCell<bool>,
}
