// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Level Drivers
//!
//! This module contains the drivers that sit between the raw `hw/` layer (or any other
//! `embedded-hal` implementation) and the control tasks.
//!
//! ## Existing drivers
//!
//! - [`encoder_counter`] – wrap-corrected position from a 16-bit quadrature counter
//! - [`motor_driver`] – two-channel PWM H-bridge drive with an enable gate

pub mod encoder_counter;
pub mod motor_driver;

pub use encoder_counter::{EncoderCounter, QuadratureCounter};
pub use motor_driver::MotorDriver;
