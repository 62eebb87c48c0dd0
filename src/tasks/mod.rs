// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Turret Tasks
//!
//! The three kinds of task the scheduler drives. They never call each other; everything they
//! exchange goes through [`Shares`](crate::share::Shares).
//!
//! ## Modules
//!
//! - [`acquisition`] - Picks a target from a thermal frame.
//! - [`axis`] - Closed-loop positioning of one axis (instantiated for yaw and pitch).
//! - [`fire`] - Trigger motor and solenoid sequencing.

pub mod acquisition;
pub mod axis;
pub mod fire;

pub use acquisition::{AcquisitionState, AcquisitionTask};
pub use axis::{AxisControlTask, AxisState};
pub use fire::{FireSequencerTask, FireState};
