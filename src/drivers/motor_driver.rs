// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bidirectional PWM drive for a brushed DC motor behind an H-bridge.
//!
//! Wiring (IN/IN mode, e.g. DRV8873 or L298):
//! - IN1: forward PWM channel
//! - IN2: reverse PWM channel
//! - EN / nSLEEP: master gate, high to drive
//!
//! At most one of IN1/IN2 carries a non-zero duty at any instant. Driving both at once shorts the
//! bridge, so every direction change zeroes the idle channel before the active one is raised.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::MAX_DUTY;
use crate::Error;

/// H-bridge motor driver with an enable gate.
pub struct MotorDriver<F, R, EN> {
    forward: F,
    reverse: R,
    enable: EN,
    duty: i16,
    enabled: bool,
}

impl<F, R, EN> MotorDriver<F, R, EN>
where
    F: SetDutyCycle,
    R: SetDutyCycle,
    EN: OutputPin,
{
    /// Take ownership of both channels and the gate, leaving the motor off.
    pub fn new(forward: F, reverse: R, enable: EN) -> Result<Self, Error> {
        let mut driver = Self {
            forward,
            reverse,
            enable,
            duty: 0,
            enabled: false,
        };
        driver.disable()?;
        Ok(driver)
    }

    /// Command a signed duty level in percent.
    ///
    /// Positive levels drive forward, negative levels reverse. The level is capped at
    /// [`MAX_DUTY`] from above only; callers bound the magnitude of negative levels.
    pub fn set_duty_cycle(&mut self, level: i16) -> Result<(), Error> {
        let level = level.min(MAX_DUTY);
        let percent = level.unsigned_abs().min(100);

        if level >= 0 {
            self.reverse.set_duty_cycle_fully_off().map_err(|_| Error::Pwm)?;
            self.forward
                .set_duty_cycle_fraction(percent, 100)
                .map_err(|_| Error::Pwm)?;
        } else {
            self.forward.set_duty_cycle_fully_off().map_err(|_| Error::Pwm)?;
            self.reverse
                .set_duty_cycle_fraction(percent, 100)
                .map_err(|_| Error::Pwm)?;
        }

        self.duty = level;
        Ok(())
    }

    /// Raise the master gate. The PWM level is left as is.
    pub fn enable(&mut self) -> Result<(), Error> {
        self.enable.set_high().map_err(|_| Error::Gate)?;
        self.enabled = true;
        Ok(())
    }

    /// Zero the duty cycle and drop the master gate.
    pub fn disable(&mut self) -> Result<(), Error> {
        self.set_duty_cycle(0)?;
        self.enable.set_low().map_err(|_| Error::Gate)?;
        self.enabled = false;
        Ok(())
    }

    /// Last commanded duty level, after clamping.
    #[inline]
    pub fn duty(&self) -> i16 {
        self.duty
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Tear down the driver and return its pins.
    pub fn free(self) -> (F, R, EN) {
        (self.forward, self.reverse, self.enable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{percent, MockPin, MockPwm};
    use core::cell::Cell;

    struct Rig {
        fwd: Cell<u16>,
        rev: Cell<u16>,
        en: Cell<bool>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                fwd: Cell::new(0),
                rev: Cell::new(0),
                en: Cell::new(true),
            }
        }

        fn driver(&self) -> MotorDriver<MockPwm<'_>, MockPwm<'_>, MockPin<'_>> {
            MotorDriver::new(MockPwm(&self.fwd), MockPwm(&self.rev), MockPin(&self.en)).unwrap()
        }
    }

    #[test]
    fn starts_disabled_and_idle() {
        let rig = Rig::new();
        let drv = rig.driver();
        assert!(!rig.en.get());
        assert!(!drv.is_enabled());
        assert_eq!(drv.duty(), 0);
        assert_eq!(rig.fwd.get(), 0);
        assert_eq!(rig.rev.get(), 0);
    }

    #[test]
    fn overdrive_is_capped_at_99() {
        let rig = Rig::new();
        let mut drv = rig.driver();

        drv.set_duty_cycle(150).unwrap();
        let over = (rig.fwd.get(), rig.rev.get(), drv.duty());

        drv.set_duty_cycle(0).unwrap();
        drv.set_duty_cycle(99).unwrap();
        let at_cap = (rig.fwd.get(), rig.rev.get(), drv.duty());

        assert_eq!(over, at_cap);
        assert_eq!(percent(&rig.fwd), 99);
        assert_eq!(drv.duty(), 99);
    }

    #[test]
    fn negative_level_drives_reverse_only() {
        let rig = Rig::new();
        let mut drv = rig.driver();

        drv.set_duty_cycle(60).unwrap();
        assert_eq!(percent(&rig.fwd), 60);

        drv.set_duty_cycle(-40).unwrap();
        assert_eq!(rig.fwd.get(), 0);
        assert_eq!(percent(&rig.rev), 40);
    }

    #[test]
    fn no_lower_clamp_but_hardware_saturates() {
        let rig = Rig::new();
        let mut drv = rig.driver();

        drv.set_duty_cycle(-150).unwrap();
        assert_eq!(drv.duty(), -150);
        assert_eq!(percent(&rig.rev), 100);
        assert_eq!(rig.fwd.get(), 0);
    }

    #[test]
    fn channels_are_never_both_driven() {
        let rig = Rig::new();
        let mut drv = rig.driver();

        for level in [-99, 50, -1, 0, 1, 99, -50, 20] {
            drv.set_duty_cycle(level).unwrap();
            assert!(rig.fwd.get() == 0 || rig.rev.get() == 0, "level {level}");
        }
    }

    #[test]
    fn disable_zeroes_duty_and_drops_gate() {
        let rig = Rig::new();
        let mut drv = rig.driver();

        drv.enable().unwrap();
        assert!(rig.en.get());
        drv.set_duty_cycle(-70).unwrap();

        drv.disable().unwrap();
        assert!(!rig.en.get());
        assert!(!drv.is_enabled());
        assert_eq!(drv.duty(), 0);
        assert_eq!(rig.fwd.get(), 0);
        assert_eq!(rig.rev.get(), 0);
    }

    #[test]
    fn enable_leaves_pwm_untouched() {
        let rig = Rig::new();
        let mut drv = rig.driver();

        drv.set_duty_cycle(30).unwrap();
        drv.enable().unwrap();
        assert_eq!(percent(&rig.fwd), 30);
        assert!(drv.is_enabled());
    }
}
