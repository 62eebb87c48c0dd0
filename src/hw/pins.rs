// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 turret controller.

use stm32f7xx_hal::{
    gpio::{gpioa, gpioc, gpiod, gpioe, Alternate, Floating, Input, Output, Pin, PushPull},
    pac,
    prelude::*,
};

use super::pwm::Tim4Pins;

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub usart1: Usart1Pins,
    pub usart3: Usart3Pins,
    pub encoders: EncoderPins,
    pub pwm: Tim4Pins,
    pub pitch: BridgePins<'A', 4, 'A', 3>,
    pub yaw: BridgePins<'D', 2, 'D', 1>,
    pub fire: FirePins,
    pub button: gpioc::PC13<Input<Floating>>,
}

/// Debug console (ST-LINK VCP)
pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// Thermal camera link
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// Quadrature inputs: TIM3 for pitch, TIM8 for yaw
pub struct EncoderPins {
    pub tim3_ch1: gpioa::PA6<Alternate<2>>,
    pub tim3_ch2: gpioa::PA7<Alternate<2>>,

    pub tim8_ch1: gpioc::PC6<Alternate<3>>,
    pub tim8_ch2: gpioc::PC7<Alternate<3>>,
}

/// H-bridge control lines besides the PWM inputs.
///
/// `nsleep` is the enable gate handed to the motor driver; `disable` is held low for the life of
/// the program.
pub struct BridgePins<const SP: char, const SN: u8, const DP: char, const DN: u8> {
    pub nsleep: Pin<SP, SN, Output<PushPull>>,
    pub disable: Pin<DP, DN, Output<PushPull>>,
}

/// Trigger motor and feed solenoid drivers
pub struct FirePins {
    pub trigger: gpioe::PE2<Output<PushPull>>,
    pub solenoid: gpioe::PE3<Output<PushPull>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals. Every output starts low.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD, gpioe: pac::GPIOE) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        let mut pins = Self {
            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            encoders: EncoderPins {
                tim3_ch1: gpioa.pa6.into_alternate::<2>(),
                tim3_ch2: gpioa.pa7.into_alternate::<2>(),
                tim8_ch1: gpioc.pc6.into_alternate::<3>(),
                tim8_ch2: gpioc.pc7.into_alternate::<3>(),
            },

            pwm: (
                gpiod.pd12.into_alternate::<2>(),
                gpiod.pd13.into_alternate::<2>(),
                gpiod.pd14.into_alternate::<2>(),
                gpiod.pd15.into_alternate::<2>(),
            ),

            pitch: BridgePins {
                nsleep: gpioa.pa4.into_push_pull_output(),
                disable: gpioa.pa3.into_push_pull_output(),
            },

            yaw: BridgePins {
                nsleep: gpiod.pd2.into_push_pull_output(),
                disable: gpiod.pd1.into_push_pull_output(),
            },

            fire: FirePins {
                trigger: gpioe.pe2.into_push_pull_output(),
                solenoid: gpioe.pe3.into_push_pull_output(),
            },

            button: gpioc.pc13.into_floating_input(),
        };

        pins.pitch.nsleep.set_low();
        pins.pitch.disable.set_low();
        pins.yaw.nsleep.set_low();
        pins.yaw.disable.set_low();
        pins.fire.trigger.set_low();
        pins.fire.solenoid.set_low();

        pins
    }
}
