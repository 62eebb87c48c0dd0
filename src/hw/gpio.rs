// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Push-pull GPIO outputs behind `embedded_hal::digital::OutputPin`.
//!
//! Used for the bridge nSLEEP gates and the trigger/solenoid drivers, all of which are active
//! high.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use stm32f7xx_hal::gpio::{self, Output, PinState, PushPull};

/// Active-high output, generic over any GPIO pin.
pub struct DigitalOut<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> DigitalOut<P, N> {
    /// Take a pin, make it a push-pull output and drive it low.
    pub fn new<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        let mut pin = pin.into_push_pull_output();
        pin.set_state(PinState::Low);
        Self { pin }
    }

    #[inline]
    pub fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }

    pub fn free(self) -> gpio::Pin<P, N, Output<PushPull>> {
        self.pin
    }
}

impl<const P: char, const N: u8> ErrorType for DigitalOut<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for DigitalOut<P, N> {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low();
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high();
        Ok(())
    }
}
