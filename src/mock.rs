// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Test doubles for the hardware collaborators.
//!
//! Each double writes through to a `Cell` the test keeps, so state stays observable after the
//! double has been moved into a driver.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};

use crate::drivers::QuadratureCounter;
use crate::sched::{Clock, Instant};

pub const PWM_MAX: u16 = 1000;

pub struct MockPwm<'a>(pub &'a Cell<u16>);

impl PwmErrorType for MockPwm<'_> {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm<'_> {
    fn max_duty_cycle(&self) -> u16 {
        PWM_MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        assert!(duty <= PWM_MAX);
        self.0.set(duty);
        Ok(())
    }
}

pub struct MockPin<'a>(pub &'a Cell<bool>);

impl PinErrorType for MockPin<'_> {
    type Error = Infallible;
}

impl OutputPin for MockPin<'_> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.set(true);
        Ok(())
    }
}

pub struct MockCounter<'a>(pub &'a Cell<u16>);

impl QuadratureCounter for MockCounter<'_> {
    fn count(&mut self) -> u16 {
        self.0.get()
    }
}

pub struct MockClock(pub Cell<u32>);

impl MockClock {
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.0.get())
    }
}

/// Percent of full scale currently commanded on a mock channel.
pub fn percent(duty: &Cell<u16>) -> u16 {
    (u32::from(duty.get()) * 100 / u32::from(PWM_MAX)) as u16
}

/// Shorthand for a millisecond instant.
pub fn ms(t: u32) -> Instant {
    Instant::from_ticks(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_covers_full_scale() {
        for (raw, pct) in [(0, 0), (655, 65), (990, 99), (PWM_MAX, 100)] {
            assert_eq!(percent(&Cell::new(raw)), pct);
        }
    }
}
