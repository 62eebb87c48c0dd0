// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Thermal camera frames over a USART.
//!
//! The camera module streams frames as two sync bytes (`0xA5 0x5A`) followed by `ROWS * COLS`
//! unsigned 8-bit samples in row-major order. [`CameraLink`] resynchronises on every capture, so
//! a dropped byte costs at most one frame.

use nb::block;
use stm32f7xx_hal::{
    prelude::*,
    serial::{self, Instance, Pins, Rx, Serial},
};

use crate::camera::{Frame, ThermalCamera};

pub const SYNC: [u8; 2] = [0xA5, 0x5A];

/// Bytes to scan for a sync marker before giving up on this capture.
const MAX_SYNC_SCAN: usize = 4096;

#[derive(Debug)]
pub enum LinkError {
    Serial(serial::Error),
    NoSync,
}

impl From<serial::Error> for LinkError {
    fn from(e: serial::Error) -> Self {
        LinkError::Serial(e)
    }
}

pub struct CameraLink<U: Instance> {
    rx: Rx<U>,
}

impl<U: Instance> CameraLink<U> {
    /// Keep the receiver and drop the transmitter.
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (_tx, rx) = serial.split();
        Self { rx }
    }

    #[inline]
    fn read_byte(&mut self) -> Result<u8, LinkError> {
        Ok(block!(self.rx.read())?)
    }

    fn sync(&mut self) -> Result<(), LinkError> {
        let mut prev = 0u8;
        for _ in 0..MAX_SYNC_SCAN {
            let b = self.read_byte()?;
            if prev == SYNC[0] && b == SYNC[1] {
                return Ok(());
            }
            prev = b;
        }
        Err(LinkError::NoSync)
    }
}

impl<U, const ROWS: usize, const COLS: usize> ThermalCamera<ROWS, COLS> for CameraLink<U>
where
    U: Instance,
{
    type Error = LinkError;

    fn capture(&mut self, frame: &mut Frame<ROWS, COLS>) -> Result<(), LinkError> {
        self.sync()?;
        for row in 0..ROWS {
            for col in 0..COLS {
                let sample = self.read_byte()?;
                frame.set(row, col, u16::from(sample));
            }
        }
        Ok(())
    }
}
