// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fire sequencing.
//!
//! Once a target is acquired and both axes report on-target, the sequencer spins up the trigger
//! motor, extends the solenoid after the spin-up hold, and drops both outputs after the solenoid
//! hold. The holds are deadlines checked on each slice, so the scheduler keeps running the other
//! tasks while a shot is in progress.

use embedded_hal::digital::OutputPin;
use log::{info, warn};

use crate::config::{FireConfig, RearmPolicy};
use crate::sched::{Instant, Task};
use crate::share::Shares;
use crate::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FireState {
    /// Waiting for all three gating flags.
    Waiting,
    /// Trigger motor running; solenoid extends at `until`.
    SpinningUp { until: Instant },
    /// Solenoid extended; both outputs drop at `until`.
    Feeding { until: Instant },
    /// Shot done; re-arms once `targ_acquired` drops. The axes only release after that flag
    /// clears, so a new shot needs all three flags set again.
    Spent,
}

pub struct FireSequencerTask<'a, T, S> {
    trigger: T,
    solenoid: S,
    shares: &'a Shares,
    config: FireConfig,
    state: FireState,
    shots: u32,
}

impl<'a, T, S> FireSequencerTask<'a, T, S>
where
    T: OutputPin,
    S: OutputPin,
{
    /// Take both outputs and drive them low.
    pub fn new(trigger: T, solenoid: S, shares: &'a Shares, config: FireConfig) -> Self {
        let mut task = Self {
            trigger,
            solenoid,
            shares,
            config,
            state: FireState::Waiting,
            shots: 0,
        };
        if let Err(e) = task.safe_outputs() {
            warn!("fire: {}", e);
        }
        task
    }

    #[inline]
    pub fn state(&self) -> FireState {
        self.state
    }

    /// Completed shots since power-up.
    #[inline]
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Drop both outputs and abandon any shot in progress.
    pub fn disarm(&mut self) -> Result<(), Error> {
        self.state = FireState::Waiting;
        self.safe_outputs()
    }

    fn armed(&self) -> bool {
        self.shares.targ_acquired.get() && self.shares.at_yaw.get() && self.shares.at_pitch.get()
    }

    fn safe_outputs(&mut self) -> Result<(), Error> {
        self.trigger.set_low().map_err(|_| Error::Output)?;
        self.solenoid.set_low().map_err(|_| Error::Output)?;
        Ok(())
    }

    fn finish_shot(&mut self) {
        if let Err(e) = self.safe_outputs() {
            warn!("fire: {}", e);
        }
        self.shots += 1;
        info!("Shot fired.");

        match self.config.rearm {
            RearmPolicy::Never => self.state = FireState::Spent,
            RearmPolicy::AfterShot => {
                self.shares.targ_acquired.put(false);
                self.state = FireState::Waiting;
            }
        }
    }
}

impl<T, S> Task for FireSequencerTask<'_, T, S>
where
    T: OutputPin,
    S: OutputPin,
{
    fn name(&self) -> &'static str {
        "fire"
    }

    fn run(&mut self, now: Instant) {
        match self.state {
            FireState::Waiting => {
                if self.armed() {
                    if self.trigger.set_high().is_err() {
                        warn!("fire: {}", Error::Output);
                    }
                    self.state = FireState::SpinningUp {
                        until: now + self.config.spin_up,
                    };
                    info!("Firing");
                }
            }

            FireState::SpinningUp { until } if now >= until => {
                if self.solenoid.set_high().is_err() {
                    warn!("fire: {}", Error::Output);
                }
                self.state = FireState::Feeding {
                    until: now + self.config.solenoid_hold,
                };
            }

            FireState::Feeding { until } if now >= until => self.finish_shot(),

            FireState::Spent => {
                if !self.shares.targ_acquired.get() {
                    self.state = FireState::Waiting;
                }
            }

            FireState::SpinningUp { .. } | FireState::Feeding { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{ms, MockPin};
    use core::cell::Cell;

    struct Outputs {
        trigger: Cell<bool>,
        solenoid: Cell<bool>,
    }

    impl Outputs {
        fn new() -> Self {
            Self {
                trigger: Cell::new(true),
                solenoid: Cell::new(true),
            }
        }

        fn task<'a>(
            &'a self,
            shares: &'a Shares,
            config: FireConfig,
        ) -> FireSequencerTask<'a, MockPin<'a>, MockPin<'a>> {
            FireSequencerTask::new(MockPin(&self.trigger), MockPin(&self.solenoid), shares, config)
        }

        fn levels(&self) -> (bool, bool) {
            (self.trigger.get(), self.solenoid.get())
        }
    }

    fn arm(shares: &Shares) {
        shares.targ_acquired.put(true);
        shares.at_yaw.put(true);
        shares.at_pitch.put(true);
    }

    #[test]
    fn outputs_start_low() {
        let out = Outputs::new();
        let shares = Shares::new();
        let _task = out.task(&shares, FireConfig::default());
        assert_eq!(out.levels(), (false, false));
    }

    #[test]
    fn silent_unless_all_three_flags_are_set() {
        for mask in 0..7u8 {
            let out = Outputs::new();
            let shares = Shares::new();
            shares.targ_acquired.put(mask & 1 != 0);
            shares.at_yaw.put(mask & 2 != 0);
            shares.at_pitch.put(mask & 4 != 0);

            let mut task = out.task(&shares, FireConfig::default());
            for t in (0..2000).step_by(10) {
                task.run(ms(t));
                assert_eq!(out.levels(), (false, false), "mask {mask:03b}");
            }
            assert_eq!(task.state(), FireState::Waiting);
            assert_eq!(task.shots(), 0);
        }
    }

    #[test]
    fn sequence_order_and_holds() {
        let out = Outputs::new();
        let shares = Shares::new();
        arm(&shares);
        let mut task = out.task(&shares, FireConfig::default());

        task.run(ms(1000));
        assert_eq!(out.levels(), (true, false));

        task.run(ms(1199));
        assert_eq!(out.levels(), (true, false));

        task.run(ms(1200));
        assert_eq!(out.levels(), (true, true));

        task.run(ms(1699));
        assert_eq!(out.levels(), (true, true));

        task.run(ms(1700));
        assert_eq!(out.levels(), (false, false));
        assert_eq!(task.shots(), 1);
        assert_eq!(task.state(), FireState::Spent);
    }

    #[test]
    fn fires_once_per_satisfied_condition() {
        let out = Outputs::new();
        let shares = Shares::new();
        arm(&shares);
        let mut task = out.task(&shares, FireConfig::default());

        let mut rising = 0;
        let mut was_high = false;
        for t in 0..5000 {
            task.run(ms(t));
            let high = out.trigger.get();
            if high && !was_high {
                rising += 1;
            }
            was_high = high;
        }
        assert_eq!(rising, 1);
        assert_eq!(task.shots(), 1);
        // Never clears the flags itself.
        assert!(shares.targ_acquired.get());
    }

    #[test]
    fn rearms_after_condition_drops() {
        let out = Outputs::new();
        let shares = Shares::new();
        arm(&shares);
        let mut task = out.task(&shares, FireConfig::default());

        for t in 0..=700 {
            task.run(ms(t));
        }
        assert_eq!(task.state(), FireState::Spent);

        shares.targ_acquired.put(false);
        task.run(ms(800));
        assert_eq!(task.state(), FireState::Waiting);

        shares.targ_acquired.put(true);
        task.run(ms(900));
        assert_eq!(out.levels(), (true, false));
    }

    #[test]
    fn axis_flag_flicker_does_not_rearm() {
        let out = Outputs::new();
        let shares = Shares::new();
        arm(&shares);
        let mut task = out.task(&shares, FireConfig::default());

        for t in 0..=700 {
            task.run(ms(t));
        }
        assert_eq!(task.state(), FireState::Spent);

        shares.at_yaw.put(false);
        task.run(ms(800));
        shares.at_yaw.put(true);
        task.run(ms(900));

        assert_eq!(task.state(), FireState::Spent);
        assert_eq!(out.levels(), (false, false));
        assert_eq!(task.shots(), 1);
    }

    #[test]
    fn after_shot_policy_clears_acquisition() {
        let out = Outputs::new();
        let shares = Shares::new();
        arm(&shares);
        let config = FireConfig::default().with_rearm(RearmPolicy::AfterShot);
        let mut task = out.task(&shares, config);

        for t in 0..=700 {
            task.run(ms(t));
        }
        assert_eq!(task.shots(), 1);
        assert!(!shares.targ_acquired.get());
        assert_eq!(task.state(), FireState::Waiting);
        // The axes own their flags.
        assert!(shares.at_yaw.get());
    }

    #[test]
    fn disarm_drops_outputs_mid_shot() {
        let out = Outputs::new();
        let shares = Shares::new();
        arm(&shares);
        let mut task = out.task(&shares, FireConfig::default());

        task.run(ms(0));
        task.run(ms(200));
        assert_eq!(out.levels(), (true, true));

        task.disarm().unwrap();
        assert_eq!(out.levels(), (false, false));
        assert_eq!(task.shots(), 0);
    }

    #[test]
    fn sequence_completes_even_if_flags_drop_mid_shot() {
        let out = Outputs::new();
        let shares = Shares::new();
        arm(&shares);
        let mut task = out.task(&shares, FireConfig::default());

        task.run(ms(0));
        shares.targ_acquired.put(false);
        task.run(ms(200));
        assert_eq!(out.levels(), (true, true));
        task.run(ms(700));
        assert_eq!(out.levels(), (false, false));
        assert_eq!(task.shots(), 1);
    }
}
