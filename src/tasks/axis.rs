// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Closed-loop position control for one turret axis.
//!
//! The task owns the axis' [`MotorDriver`], [`EncoderCounter`] and [`ProportionalController`],
//! and talks to the rest of the system only through its [`AxisShares`].
//!
//! ```text
//!  Sweeping ──(sweep done)──> Idle ──(acquired && !on_target)──> Seeking
//!                              ^                                   │
//!                              └──(!acquired)── OnTarget <──(|err| < tol)
//! ```
//!
//! Entering `Seeking` zeroes the encoder, so the published target is a displacement from where
//! the axis pointed when the frame was taken.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::{debug, info, warn};
#[cfg(not(test))]
use micromath::F32Ext;

use crate::config::AxisConfig;
use crate::control::ProportionalController;
use crate::drivers::{EncoderCounter, MotorDriver, QuadratureCounter};
use crate::sched::{Instant, Task};
use crate::share::AxisShares;
use crate::Error;

/// Operating state of an axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AxisState {
    /// Open-loop startup sweep; `until` is set once the sweep has begun.
    Sweeping { until: Option<Instant> },
    /// Waiting for a target.
    Idle,
    /// Driving toward the published target.
    Seeking,
    /// Within tolerance, driver disabled.
    OnTarget,
}

pub struct AxisControlTask<'a, F, R, EN, C> {
    name: &'static str,
    driver: MotorDriver<F, R, EN>,
    encoder: EncoderCounter<C>,
    controller: ProportionalController,
    shares: AxisShares<'a>,
    config: AxisConfig,
    state: AxisState,
}

impl<'a, F, R, EN, C> AxisControlTask<'a, F, R, EN, C>
where
    F: SetDutyCycle,
    R: SetDutyCycle,
    EN: OutputPin,
    C: QuadratureCounter,
{
    pub fn new(
        name: &'static str,
        driver: MotorDriver<F, R, EN>,
        encoder: EncoderCounter<C>,
        shares: AxisShares<'a>,
        config: AxisConfig,
    ) -> Self {
        let state = match config.startup_sweep {
            Some(_) => AxisState::Sweeping { until: None },
            None => AxisState::Idle,
        };

        Self {
            name,
            driver,
            encoder,
            controller: ProportionalController::new(config.kp, 0.0),
            shares,
            config,
            state,
        }
    }

    #[inline]
    pub fn state(&self) -> AxisState {
        self.state
    }

    #[inline]
    pub fn driver(&self) -> &MotorDriver<F, R, EN> {
        &self.driver
    }

    #[inline]
    pub fn controller(&self) -> &ProportionalController {
        &self.controller
    }

    /// Zero the drive and put the bridge to sleep. Used once the scheduler has stopped.
    pub fn park(&mut self) -> Result<(), Error> {
        self.driver.set_duty_cycle(0)?;
        self.driver.disable()
    }

    fn sweep(&mut self, now: Instant, until: Option<Instant>) {
        let Some(sweep) = self.config.startup_sweep else {
            self.state = AxisState::Idle;
            return;
        };

        if !self.shares.start.get() {
            // Cleared elsewhere mid-sweep: stop driving before releasing the axis.
            if until.is_some() {
                if let Err(e) = self.driver.disable() {
                    warn!("{}: disable failed: {}", self.name, e);
                }
                self.encoder.zero();
            }
            self.state = AxisState::Idle;
            return;
        }

        match until {
            None => {
                if let Err(e) = self
                    .driver
                    .enable()
                    .and_then(|_| self.driver.set_duty_cycle(sweep.duty))
                {
                    warn!("{}: sweep drive failed: {}", self.name, e);
                }
                self.state = AxisState::Sweeping {
                    until: Some(now + sweep.duration),
                };
            }
            Some(deadline) if now >= deadline => {
                if let Err(e) = self.driver.disable() {
                    warn!("{}: disable failed: {}", self.name, e);
                }
                self.encoder.zero();
                self.shares.start.put(false);
                self.state = AxisState::Idle;
                info!("Turret started");
            }
            Some(_) => {}
        }
    }

    fn begin_seeking(&mut self) {
        self.encoder.zero();
        self.controller.clear_history();
        if let Err(e) = self.driver.enable() {
            warn!("{}: enable failed: {}", self.name, e);
        }
        self.state = AxisState::Seeking;
        debug!("{}: seeking {}", self.name, self.shares.target.get());
    }

    fn seek(&mut self) {
        let target = self.shares.target.get();
        self.controller.set_setpoint(target);

        let position = self.encoder.read() as f32;
        let output = self.controller.run(target, position);

        // Float-to-int casts truncate toward zero and saturate.
        let max = self.config.max_duty.saturating_abs();
        let duty = (output as i16).clamp(-max, max);
        if let Err(e) = self.driver.set_duty_cycle(duty) {
            warn!("{}: duty update failed: {}", self.name, e);
        }

        self.shares.current.put(position);

        if (position - target).abs() < self.config.tolerance {
            self.shares.on_target.put(true);
            if let Err(e) = self.driver.disable() {
                warn!("{}: disable failed: {}", self.name, e);
            }
            self.state = AxisState::OnTarget;
            info!("{} angle positioned", self.name);
            self.controller.log_response();
        }
    }

    fn release(&mut self) {
        self.shares.on_target.put(false);
        self.state = AxisState::Idle;
        debug!("{}: released", self.name);
    }
}

impl<F, R, EN, C> Task for AxisControlTask<'_, F, R, EN, C>
where
    F: SetDutyCycle,
    R: SetDutyCycle,
    EN: OutputPin,
    C: QuadratureCounter,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn run(&mut self, now: Instant) {
        match self.state {
            AxisState::Sweeping { until } => self.sweep(now, until),

            AxisState::Idle => {
                if self.shares.acquired.get() && !self.shares.on_target.get() {
                    self.begin_seeking();
                    self.seek();
                }
            }

            AxisState::Seeking => self.seek(),

            AxisState::OnTarget => {
                if !self.shares.acquired.get() {
                    self.release();
                }
            }
        }
    }
}
