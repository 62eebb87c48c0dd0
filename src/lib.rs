// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Turret Firmware
//!
//! This crate contains the control firmware for a two-axis, camera-aimed turret (pitch/yaw with a
//! trigger mechanism), written in Rust, targeting an STM32F777 MCU.
//!
//! A thermal camera picks a target, two closed-loop axes drive onto it, and a fire sequencer
//! pulls the trigger once both axes report on-target. All of it runs as cooperative tasks on a
//! single thread.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`share`] | Interrupt-safe single-slot cells for inter-task state |
//! | [`drivers`] | Encoder position tracking and H-bridge motor drive |
//! | [`control`] | Control algorithms (proportional position control) |
//! | [`camera`] | Thermal frames and hot-spot target search |
//! | [`sched`] | Cooperative, priority-ordered task scheduler |
//! | [`tasks`] | Acquisition, axis control and fire sequencing tasks |
//! | [`config`] | Fixed constants and per-task configuration |
//! | `hw` | MCU-level wrappers around timers, GPIO, USART (feature `board`) |
//!
//! Everything outside `hw` is hardware-agnostic and talks to the board through `embedded-hal`
//! traits and the small collaborator traits defined here, so it builds and tests on the host.
//!
//! ## Getting Started
//!
//! Build docs:
//!
//! ```bash
//! cargo doc --no-deps --open
//! ```
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features board --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod camera;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod sched;
pub mod share;
pub mod tasks;

#[cfg(feature = "board")]
pub mod hw;

#[cfg(test)]
pub(crate) mod mock;

pub use error::Error;
