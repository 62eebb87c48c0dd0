// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Algorithms
//!
//! This module provides reusable building blocks for closed-loop motor control.
//!
//! ## Modules
//!
//! - [`proportional`] - Proportional position controller with a diagnostic history.

pub mod proportional;

pub use proportional::ProportionalController;
