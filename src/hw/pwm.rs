// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! TIM4 four-channel PWM for the two H-bridges.
//!
//! CH1/CH2 drive the pitch bridge (PD12/PD13) and CH3/CH4 the yaw bridge (PD14/PD15). Each channel
//! is handed out as its own [`PwmChannel`] implementing `embedded_hal::pwm::SetDutyCycle`, so the
//! motor drivers never see the timer.

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use stm32f7xx_hal::{
    gpio::{gpiod, Alternate},
    pac,
    rcc::Clocks,
};

/// PD12..PD15 in AF2 (TIM4_CH1..CH4).
pub type Tim4Pins = (
    gpiod::PD12<Alternate<2>>,
    gpiod::PD13<Alternate<2>>,
    gpiod::PD14<Alternate<2>>,
    gpiod::PD15<Alternate<2>>,
);

/// One output-compare channel of TIM4.
pub struct PwmChannel<const C: u8> {
    max: u16,
}

pub struct Tim4Pwm {
    pub ch1: PwmChannel<1>,
    pub ch2: PwmChannel<2>,
    pub ch3: PwmChannel<3>,
    pub ch4: PwmChannel<4>,
}

impl Tim4Pwm {
    /// Start TIM4 in edge-aligned PWM mode 1 at `freq_hz` with all duties at zero.
    pub fn new(tim: pac::TIM4, _pins: Tim4Pins, clocks: &Clocks, freq_hz: u32) -> Self {
        // SAFETY: single read-modify-write of the TIM4 enable bit during init.
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

        let period = (clocks.timclk1().raw() / freq_hz).clamp(2, 0xFFFF);
        let arr = period - 1;

        tim.cr1.write(|w| unsafe { w.bits(0) });
        tim.psc.write(|w| unsafe { w.bits(0) });
        tim.arr.write(|w| unsafe { w.bits(arr) });

        // OCxM = PWM mode 1, OCxPE = preload, on all four channels
        tim.ccmr1_output().write(|w| unsafe { w.bits(0x6868) });
        tim.ccmr2_output().write(|w| unsafe { w.bits(0x6868) });

        tim.ccr1.write(|w| unsafe { w.bits(0) });
        tim.ccr2.write(|w| unsafe { w.bits(0) });
        tim.ccr3.write(|w| unsafe { w.bits(0) });
        tim.ccr4.write(|w| unsafe { w.bits(0) });

        // CC1E..CC4E, active high
        tim.ccer.write(|w| unsafe { w.bits(0x1111) });

        // Latch PSC/ARR, then start with auto-reload preload
        tim.egr.write(|w| w.ug().set_bit());
        tim.cr1.write(|w| unsafe { w.bits(0x81) });

        let max = period as u16;
        Self {
            ch1: PwmChannel { max },
            ch2: PwmChannel { max },
            ch3: PwmChannel { max },
            ch4: PwmChannel { max },
        }
    }
}

impl<const C: u8> ErrorType for PwmChannel<C> {
    type Error = Infallible;
}

impl<const C: u8> SetDutyCycle for PwmChannel<C> {
    #[inline]
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let duty = u32::from(duty.min(self.max));
        // SAFETY: each channel owns exactly one CCR register.
        let tim = unsafe { &*pac::TIM4::ptr() };
        match C {
            1 => tim.ccr1.write(|w| unsafe { w.bits(duty) }),
            2 => tim.ccr2.write(|w| unsafe { w.bits(duty) }),
            3 => tim.ccr3.write(|w| unsafe { w.bits(duty) }),
            _ => tim.ccr4.write(|w| unsafe { w.bits(duty) }),
        }
        Ok(())
    }
}
