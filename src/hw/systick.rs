// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Millisecond time base from the Cortex-M SysTick.
//!
//! The binary owns the `SysTick` exception handler and calls [`tick`] from it; everything else
//! reads the count through [`SysTickClock`] or [`millis`]. The count wraps after ~49 days, which
//! `fugit` instants compare correctly across.

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::{syst::SystClkSource, SYST};

use crate::sched::{Clock, Instant};

static MILLIS: AtomicU32 = AtomicU32::new(0);

/// Advance the millisecond count. Call once per SysTick exception.
#[inline]
pub fn tick() {
    MILLIS.fetch_add(1, Ordering::Relaxed);
}

/// Milliseconds since [`SysTickClock::start`].
#[inline]
pub fn millis() -> u32 {
    MILLIS.load(Ordering::Relaxed)
}

pub struct SysTickClock {
    _syst: SYST,
}

impl SysTickClock {
    /// Program SysTick for a 1 kHz interrupt from the core clock and start counting.
    pub fn start(mut syst: SYST, sysclk_hz: u32) -> Self {
        syst.disable_counter();
        syst.set_clock_source(SystClkSource::Core);
        syst.set_reload(sysclk_hz / 1_000 - 1);
        syst.clear_current();
        MILLIS.store(0, Ordering::Relaxed);
        syst.enable_interrupt();
        syst.enable_counter();
        Self { _syst: syst }
    }
}

impl Clock for SysTickClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::from_ticks(millis())
    }
}
