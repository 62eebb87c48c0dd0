// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Unbounded position tracking on top of a wrapping 16-bit quadrature counter.
//!
//! Timers in encoder mode count modulo 65536. [`EncoderCounter`] samples the raw count, folds the
//! difference since the previous sample back into `[-32768, 32768]` and accumulates it into a
//! signed 64-bit position, so the position keeps counting across any number of wraps in either
//! direction.
//!
//! The correction only works if the counter moves less than half its range between two
//! [`read`](EncoderCounter::read) calls. A faster move aliases onto the opposite direction and
//! cannot be detected here.

/// Source of raw 16-bit encoder counts (a timer in encoder mode).
pub trait QuadratureCounter {
    fn count(&mut self) -> u16;
}

const WRAP: i32 = 1 << 16;
const HALF_WRAP: i32 = WRAP / 2;

/// Signed, wrap-corrected position in encoder ticks.
pub struct EncoderCounter<C> {
    counter: C,
    position: i64,
    previous_raw: u16,
}

impl<C: QuadratureCounter> EncoderCounter<C> {
    /// Wrap a counter, taking its current count as the origin.
    pub fn new(mut counter: C) -> Self {
        let previous_raw = counter.count();
        Self {
            counter,
            position: 0,
            previous_raw,
        }
    }

    /// Sample the hardware and return the accumulated position.
    pub fn read(&mut self) -> i64 {
        let raw = self.counter.count();
        let mut delta = raw as i32 - self.previous_raw as i32;

        if delta > HALF_WRAP {
            delta -= WRAP;
        }
        if delta < -HALF_WRAP {
            delta += WRAP;
        }

        self.position += delta as i64;
        self.previous_raw = raw;
        self.position
    }

    /// Make the current hardware count the new zero.
    pub fn zero(&mut self) {
        self.previous_raw = self.counter.count();
        self.position = 0;
    }

    /// Position from the last [`read`](Self::read), without sampling.
    #[inline]
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Release the underlying counter.
    pub fn free(self) -> C {
        self.counter
    }
}
