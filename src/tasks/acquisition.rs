// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Target acquisition from the thermal camera.
//!
//! While no target is held, each slice captures one frame, finds the hottest window and publishes
//! its centre as per-axis encoder displacements. Publishing `targ_acquired` last means an axis
//! task that sees the flag also sees the new targets.

use log::{debug, info, warn};

use crate::camera::{aim_at, find_hotspot, Frame, ThermalCamera};
use crate::config::AcquisitionConfig;
use crate::sched::{Instant, Task};
use crate::share::Shares;
use crate::Error;

/// What the last slice did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AcquisitionState {
    /// Waiting for the startup sweep or for the axes to release the previous target.
    Blocked,
    /// Ready to capture on the next slice.
    Searching,
    /// A target is published and held.
    Acquired,
}

pub struct AcquisitionTask<'a, CAM, const ROWS: usize, const COLS: usize> {
    camera: CAM,
    shares: &'a Shares,
    config: AcquisitionConfig,
    frame: Frame<ROWS, COLS>,
    state: AcquisitionState,
}

impl<'a, CAM, const ROWS: usize, const COLS: usize> AcquisitionTask<'a, CAM, ROWS, COLS>
where
    CAM: ThermalCamera<ROWS, COLS>,
{
    pub fn new(camera: CAM, shares: &'a Shares, config: AcquisitionConfig) -> Self {
        Self {
            camera,
            shares,
            config,
            frame: Frame::new(),
            state: AcquisitionState::Searching,
        }
    }

    #[inline]
    pub fn state(&self) -> AcquisitionState {
        self.state
    }

    /// The most recently captured frame.
    #[inline]
    pub fn frame(&self) -> &Frame<ROWS, COLS> {
        &self.frame
    }

    fn may_search(&self) -> bool {
        !self.shares.start.get() && self.shares.axes_released()
    }

    fn acquire(&mut self) {
        if let Err(e) = self.camera.capture(&mut self.frame) {
            warn!("{}: {:?}", Error::Camera, e);
            return;
        }

        let Some(window) = find_hotspot(&self.frame) else {
            warn!("Frame smaller than the search window");
            return;
        };

        let aim = aim_at::<ROWS, COLS>(&window, &self.config);
        debug!(
            "Hot spot at ({}, {}) sum {}",
            window.row, window.col, window.sum
        );

        self.shares.target_x.put(aim.x_ticks);
        self.shares.target_y.put(aim.y_ticks);
        self.shares.targ_acquired.put(true);
        self.state = AcquisitionState::Acquired;

        info!("Target acquired: x {} ticks, y {} ticks", aim.x_ticks, aim.y_ticks);
    }
}

impl<CAM, const ROWS: usize, const COLS: usize> Task for AcquisitionTask<'_, CAM, ROWS, COLS>
where
    CAM: ThermalCamera<ROWS, COLS>,
{
    fn name(&self) -> &'static str {
        "acquisition"
    }

    fn run(&mut self, _now: Instant) {
        if self.shares.targ_acquired.get() {
            self.state = AcquisitionState::Acquired;
            return;
        }

        if !self.may_search() {
            self.state = AcquisitionState::Blocked;
            return;
        }

        self.state = AcquisitionState::Searching;
        self.acquire();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::ms;

    /// Hands out a fixed frame and counts captures.
    struct StillCamera {
        image: Frame<10, 10>,
        captures: u32,
        fail: bool,
    }

    impl StillCamera {
        fn with_block(row: usize, col: usize) -> Self {
            let mut image = Frame::new();
            image.fill_block(row, col, 5, 5, 80);
            Self {
                image,
                captures: 0,
                fail: false,
            }
        }
    }

    impl ThermalCamera<10, 10> for &mut StillCamera {
        type Error = ();

        fn capture(&mut self, frame: &mut Frame<10, 10>) -> Result<(), ()> {
            self.captures += 1;
            if self.fail {
                return Err(());
            }
            *frame = self.image.clone();
            Ok(())
        }
    }

    fn ready_shares() -> Shares {
        let shares = Shares::new();
        shares.start.put(false);
        shares
    }

    #[test]
    fn publishes_targets_then_flag() {
        let shares = ready_shares();
        let mut cam = StillCamera::with_block(5, 0);
        let mut task = AcquisitionTask::<_, 10, 10>::new(
            &mut cam,
            &shares,
            AcquisitionConfig::default(),
        );

        task.run(ms(0));

        assert_eq!(task.state(), AcquisitionState::Acquired);
        assert!(shares.targ_acquired.get());
        // Centre (7, 2) of a 10x10 frame.
        let y = 27.5 * (2.0 / 5.0) * (16384.0 / 360.0);
        let x = 17.5 * (-3.0 / 5.0) * (16384.0 / 360.0);
        assert!((shares.target_y.get() - y).abs() < 1e-3);
        assert!((shares.target_x.get() - x).abs() < 1e-3);
    }

    #[test]
    fn idles_while_target_is_held() {
        let shares = ready_shares();
        let mut cam = StillCamera::with_block(0, 0);
        {
            let mut task = AcquisitionTask::<_, 10, 10>::new(
                &mut cam,
                &shares,
                AcquisitionConfig::default(),
            );
            task.run(ms(0));
            let first = shares.target_x.get();

            shares.target_x.put(123.0);
            task.run(ms(20));
            task.run(ms(40));
            assert_eq!(shares.target_x.get(), 123.0);
            assert_ne!(first, 123.0);
        }
        assert_eq!(cam.captures, 1);
    }

    #[test]
    fn waits_for_startup_sweep_and_axis_release() {
        let shares = Shares::new();
        let mut cam = StillCamera::with_block(0, 0);
        {
            let mut task = AcquisitionTask::<_, 10, 10>::new(
                &mut cam,
                &shares,
                AcquisitionConfig::default(),
            );

            task.run(ms(0));
            assert_eq!(task.state(), AcquisitionState::Blocked);

            shares.start.put(false);
            shares.at_yaw.put(true);
            task.run(ms(20));
            assert_eq!(task.state(), AcquisitionState::Blocked);
            assert!(!shares.targ_acquired.get());

            shares.at_yaw.put(false);
            task.run(ms(40));
            assert_eq!(task.state(), AcquisitionState::Acquired);
        }
        assert_eq!(cam.captures, 1);
    }

    #[test]
    fn camera_error_leaves_state_untouched() {
        let shares = ready_shares();
        let mut cam = StillCamera::with_block(0, 0);
        cam.fail = true;
        {
            let mut task = AcquisitionTask::<_, 10, 10>::new(
                &mut cam,
                &shares,
                AcquisitionConfig::default(),
            );
            task.run(ms(0));
            assert_eq!(task.state(), AcquisitionState::Searching);
        }
        assert!(!shares.targ_acquired.get());
        assert_eq!(shares.target_x.get(), 0.0);

        cam.fail = false;
        let mut task = AcquisitionTask::<_, 10, 10>::new(
            &mut cam,
            &shares,
            AcquisitionConfig::default(),
        );
        task.run(ms(20));
        assert!(shares.targ_acquired.get());
    }
}
