// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Operator stop on the user button.

use log::warn;
use stm32f7xx_hal::gpio::{self, Floating, Input};

use crate::sched::{Instant, Task};
use crate::share::SharedCell;

/// Consecutive pressed samples needed before the stop is raised.
const DEBOUNCE: u8 = 3;

/// Polls an active-high button and raises `stop` once it has been held for [`DEBOUNCE`] slices.
pub struct OperatorStop<'a, const P: char, const N: u8> {
    button: gpio::Pin<P, N, Input<Floating>>,
    stop: &'a SharedCell<bool>,
    pressed_for: u8,
}

impl<'a, const P: char, const N: u8> OperatorStop<'a, P, N> {
    pub fn new<MODE>(button: gpio::Pin<P, N, MODE>, stop: &'a SharedCell<bool>) -> Self {
        Self {
            button: button.into_floating_input(),
            stop,
            pressed_for: 0,
        }
    }
}

impl<const P: char, const N: u8> Task for OperatorStop<'_, P, N> {
    fn name(&self) -> &'static str {
        "operator stop"
    }

    fn run(&mut self, _now: Instant) {
        if !self.button.is_high() {
            self.pressed_for = 0;
            return;
        }

        self.pressed_for = self.pressed_for.saturating_add(1);
        if self.pressed_for == DEBOUNCE {
            warn!("Operator stop");
            self.stop.put(true);
        }
    }
}
