// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Crate-wide error type.
//!
//! Hardware collaborators each bring their own error type. The drivers collapse those into the
//! variants below so that tasks can log a failure and move on without being generic over every
//! pin's error.

use core::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A PWM channel rejected a duty-cycle update.
    Pwm,
    /// The motor driver enable gate could not be driven.
    Gate,
    /// A digital output (trigger motor, solenoid) could not be driven.
    Output,
    /// The camera failed to deliver a frame.
    Camera,
    /// The scheduler task table is full.
    SchedulerFull,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pwm => f.write_str("PWM duty update failed"),
            Error::Gate => f.write_str("motor enable gate failed"),
            Error::Output => f.write_str("digital output failed"),
            Error::Camera => f.write_str("camera capture failed"),
            Error::SchedulerFull => f.write_str("scheduler task table full"),
        }
    }
}
