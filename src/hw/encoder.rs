// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Quadrature encoder support via STM32F7 timers in encoder mode.
//!
//! Pitch reads through TIM3 and yaw through TIM8, both as free-running 16-bit counters. Wrap
//! handling and the signed position live in [`EncoderCounter`](crate::drivers::EncoderCounter);
//! this module only configures the timers and exposes the raw count.

use stm32f7xx_hal::pac;

use crate::drivers::QuadratureCounter;

pub struct Encoder<TIM> {
    tim: TIM,
}

impl<TIM> Encoder<TIM> {
    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> TIM {
        self.tim
    }
}

macro_rules! encoder_16bit {
    ($TIM:ident, $ctor:ident, $enr:ident, $en:ident) => {
        impl Encoder<pac::$TIM> {
            /// Clock the timer and configure it as a 16-bit quadrature counter on CH1/CH2.
            pub fn $ctor(tim: pac::$TIM) -> Self {
                // SAFETY: single read-modify-write of this timer's enable bit during init.
                let rcc = unsafe { &*pac::RCC::ptr() };
                rcc.$enr.modify(|_, w| w.$en().set_bit());

                // Disable counter while configuring
                tim.cr1.modify(|_, w| w.cen().clear_bit());

                tim.arr.write(|w| unsafe { w.bits(0xFFFF) });

                // Encoder mode 3: count on both TI1 and TI2 edges
                tim.smcr.modify(|_, w| unsafe { w.sms().bits(0b011) });

                tim.ccmr1_input().modify(|_, w| w.cc1s().ti1().cc2s().ti2());

                tim.ccer.modify(|_, w| {
                    w.cc1p()
                        .clear_bit()
                        .cc2p()
                        .clear_bit()
                        .cc1e()
                        .set_bit()
                        .cc2e()
                        .set_bit()
                });

                tim.cnt.write(|w| unsafe { w.bits(0) });
                tim.cr1.modify(|_, w| w.cen().set_bit());

                Self { tim }
            }

            /// Read the raw 16-bit counter value.
            #[inline]
            pub fn raw(&self) -> u16 {
                self.tim.cnt.read().bits() as u16
            }
        }

        impl QuadratureCounter for Encoder<pac::$TIM> {
            #[inline]
            fn count(&mut self) -> u16 {
                self.raw()
            }
        }
    };
}

encoder_16bit!(TIM3, tim3, apb1enr, tim3en);
encoder_16bit!(TIM8, tim8, apb2enr, tim8en);
