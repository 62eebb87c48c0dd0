// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! `log` backend that prints to the USART1 debug console.
//!
//! Every record is written as `[<ms>] <LEVEL> <target>: <message>\r\n`. The USART is taken out of
//! its slot for the duration of the write, so interrupts stay enabled while bytes go out and a
//! record logged from an interrupt mid-line is dropped rather than interleaved.

use core::cell::RefCell;
use core::fmt::Write;

use critical_section::Mutex;
use log::{LevelFilter, Log, Metadata, Record};
use stm32f7xx_hal::pac::USART1;

use super::systick;
use super::usart::Usart;

struct SerialLogger {
    usart: Mutex<RefCell<Option<Usart<USART1>>>>,
}

static LOGGER: SerialLogger = SerialLogger {
    usart: Mutex::new(RefCell::new(None)),
};

/// Install the console logger. Only the first call has any effect.
pub fn init(usart: Usart<USART1>, level: LevelFilter) {
    critical_section::with(|cs| {
        LOGGER.usart.borrow_ref_mut(cs).replace(usart);
    });

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let Some(mut usart) = critical_section::with(|cs| self.usart.borrow_ref_mut(cs).take())
        else {
            return;
        };

        let _ = write!(
            usart,
            "[{:>8}] {:<5} {}: {}\r\n",
            systick::millis(),
            record.level(),
            record.target(),
            record.args()
        );

        critical_section::with(|cs| {
            self.usart.borrow_ref_mut(cs).replace(usart);
        });
    }

    fn flush(&self) {
        critical_section::with(|cs| {
            if let Some(usart) = self.usart.borrow_ref_mut(cs).as_mut() {
                usart.flush();
            }
        });
    }
}
