// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! STM32F777 peripheral wrappers. Everything here adapts a HAL or PAC type to the traits the
//! rest of the crate is written against.

pub mod button;
pub mod camera_link;
pub mod encoder;
pub mod gpio;
pub mod logger;
pub mod pins;
pub mod pwm;
pub mod systick;
pub mod usart;

pub use button::OperatorStop;
pub use camera_link::CameraLink;
pub use encoder::Encoder;
pub use gpio::DigitalOut;
pub use pins::BoardPins;
pub use pwm::{PwmChannel, Tim4Pwm};
pub use systick::SysTickClock;
pub use usart::Usart;
