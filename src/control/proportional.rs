// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Proportional controller for closed-loop position control.
//!
//! Works in `no_std` and does not allocate memory. The measurement history is a fixed-size ring
//! buffer kept for diagnostics only; it never feeds back into the control law.

use heapless::HistoryBuffer;
use log::debug;

/// Number of measurements retained for [`ProportionalController::history`].
pub const HISTORY_LEN: usize = 128;

/// P controller with a tunable gain and a stored setpoint.
pub struct ProportionalController {
    /// Proportional gain
    kp: f32,
    /// Last configured setpoint
    setpoint: f32,
    /// Recent measurements, newest last
    history: HistoryBuffer<f32, HISTORY_LEN>,
}

impl ProportionalController {
    /// Create a new controller with gain `kp` and an initial setpoint.
    pub fn new(kp: f32, setpoint: f32) -> Self {
        Self {
            kp,
            setpoint,
            history: HistoryBuffer::new(),
        }
    }

    /// Compute `kp * (setpoint - measured)` and record `measured`.
    pub fn run(&mut self, setpoint: f32, measured: f32) -> f32 {
        self.history.write(measured);
        self.kp * (setpoint - measured)
    }

    pub fn set_setpoint(&mut self, setpoint: f32) {
        self.setpoint = setpoint;
    }

    pub fn set_gain(&mut self, kp: f32) {
        self.kp = kp;
    }

    #[inline]
    pub fn setpoint(&self) -> f32 {
        self.setpoint
    }

    #[inline]
    pub fn gain(&self) -> f32 {
        self.kp
    }

    /// Most recent measurement passed to [`run`](Self::run).
    #[inline]
    pub fn last_measurement(&self) -> Option<f32> {
        self.history.recent().copied()
    }

    /// Recorded measurements, oldest first.
    pub fn history(&self) -> impl Iterator<Item = f32> + '_ {
        self.history.oldest_ordered().copied()
    }

    /// Forget all recorded measurements.
    pub fn clear_history(&mut self) {
        self.history = HistoryBuffer::new();
    }

    /// Dump the recorded step response at debug level.
    pub fn log_response(&self) {
        if self.history.len() == 0 {
            debug!("No response recorded.");
            return;
        }

        for (step, position) in self.history().enumerate() {
            debug!("{}, {}", step, position);
        }
    }
}

impl Default for ProportionalController {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_gain_times_error() {
        let mut p = ProportionalController::new(0.5, 0.0);
        assert_eq!(p.run(100.0, 80.0), 10.0);
        assert_eq!(p.run(-20.0, 20.0), -20.0);
    }

    #[test]
    fn zero_error_gives_zero_output() {
        let mut p = ProportionalController::new(0.5, 0.0);
        assert_eq!(p.run(42.0, 42.0), 0.0);
    }

    #[test]
    fn gain_and_setpoint_are_reconfigurable() {
        let mut p = ProportionalController::default();
        assert_eq!(p.gain(), 1.0);

        p.set_gain(2.0);
        p.set_setpoint(300.0);
        assert_eq!(p.gain(), 2.0);
        assert_eq!(p.setpoint(), 300.0);
        assert_eq!(p.run(10.0, 4.0), 12.0);
    }

    #[test]
    fn history_records_measurements_in_order() {
        let mut p = ProportionalController::new(1.0, 0.0);
        assert_eq!(p.last_measurement(), None);

        for m in [1.0, 2.0, 3.0] {
            p.run(0.0, m);
        }

        let seen: Vec<f32> = p.history().collect();
        assert_eq!(seen, vec![1.0, 2.0, 3.0]);
        assert_eq!(p.last_measurement(), Some(3.0));

        p.clear_history();
        assert_eq!(p.history().count(), 0);
    }

    #[test]
    fn history_keeps_only_the_newest_entries() {
        let mut p = ProportionalController::new(1.0, 0.0);
        for m in 0..(HISTORY_LEN + 10) {
            p.run(0.0, m as f32);
        }

        let seen: Vec<f32> = p.history().collect();
        assert_eq!(seen.len(), HISTORY_LEN);
        assert_eq!(seen[0], 10.0);
        assert_eq!(p.last_measurement(), Some((HISTORY_LEN + 9) as f32));
    }
}
