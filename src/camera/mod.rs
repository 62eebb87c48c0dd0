// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Thermal Camera Interface
//!
//! The sensor driver itself lives outside this crate. The rest of the firmware sees the camera
//! only through [`ThermalCamera`], which fills a [`Frame`] of intensity samples.
//!
//! ## Modules
//!
//! - [`frame`] - Fixed-size intensity grid.
//! - [`hotspot`] - Hottest-window search and pixel-to-encoder conversion.

pub mod frame;
pub mod hotspot;

pub use frame::Frame;
pub use hotspot::{aim_at, find_hotspot, AimPoint, Window};

/// Source of thermal frames with fixed dimensions.
pub trait ThermalCamera<const ROWS: usize, const COLS: usize> {
    type Error: core::fmt::Debug;

    /// Capture one frame into `frame`.
    fn capture(&mut self, frame: &mut Frame<ROWS, COLS>) -> Result<(), Self::Error>;
}
