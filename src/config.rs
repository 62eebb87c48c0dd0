// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fixed constants and per-component configuration.
//!
//! The constants describe the mechanical and optical setup of the turret. The structs bundle the
//! tunables for each task; all of them implement [`Default`] with the values below and can be
//! adjusted with the `with_*` builders.

use fugit::MillisDurationU32;

/// Encoder ticks per full output revolution.
pub const TICKS_PER_REV: f32 = 16384.0;

/// Camera field of view along the row (vertical) axis, degrees.
pub const FOV_VERTICAL_DEG: f32 = 55.0;

/// Camera field of view along the column (horizontal) axis, degrees.
pub const FOV_HORIZONTAL_DEG: f32 = 35.0;

/// Side length of the square window used for the hot-spot search.
pub const BLOCK_SIZE: usize = 5;

/// Absolute position error, in ticks, below which an axis counts as settled.
pub const ON_TARGET_TOLERANCE: f32 = 5.0;

/// Largest duty level accepted by the motor driver.
pub const MAX_DUTY: i16 = 99;

/// Trigger motor spin-up before the solenoid extends.
pub const TRIGGER_SPIN_UP: MillisDurationU32 = MillisDurationU32::from_ticks(200);

/// Solenoid hold before both fire outputs drop.
pub const SOLENOID_HOLD: MillisDurationU32 = MillisDurationU32::from_ticks(500);

/// Proportional gain used by both axes.
pub const DEFAULT_KP: f32 = 0.01;

/// MLX90640 thermal sensor geometry.
pub const CAMERA_ROWS: usize = 24;
pub const CAMERA_COLS: usize = 32;

// Task table: lower number runs first within a pass.
pub const ACQUISITION_PRIORITY: u8 = 1;
pub const AXIS_PRIORITY: u8 = 2;
pub const FIRE_PRIORITY: u8 = 3;
pub const OPERATOR_STOP_PRIORITY: u8 = 4;

pub const ACQUISITION_PERIOD: MillisDurationU32 = MillisDurationU32::from_ticks(20);
pub const PITCH_PERIOD: MillisDurationU32 = MillisDurationU32::from_ticks(10);
pub const YAW_PERIOD: MillisDurationU32 = MillisDurationU32::from_ticks(20);
pub const FIRE_PERIOD: MillisDurationU32 = MillisDurationU32::from_ticks(20);
pub const OPERATOR_STOP_PERIOD: MillisDurationU32 = MillisDurationU32::from_ticks(50);

/// H-bridge PWM carrier frequency.
pub const PWM_FREQUENCY_HZ: u32 = 20_000;

/// Open-loop rotation performed once at power-up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sweep {
    /// Signed duty level held for the whole sweep.
    pub duty: i16,
    pub duration: MillisDurationU32,
}

impl Sweep {
    /// Half a turn of the yaw stage at full reverse drive.
    pub const fn half_turn() -> Self {
        Self {
            duty: -MAX_DUTY,
            duration: MillisDurationU32::from_ticks(1100),
        }
    }
}

/// Tunables for one [`AxisControlTask`](crate::tasks::AxisControlTask).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisConfig {
    pub kp: f32,
    pub tolerance: f32,
    /// Bound applied to the controller output before it reaches the driver.
    pub max_duty: i16,
    /// Sweep run while the `start` cell is set. `None` ignores the cell. The sweeping axis owns
    /// `start`, so give a sweep to one axis only.
    pub startup_sweep: Option<Sweep>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            kp: DEFAULT_KP,
            tolerance: ON_TARGET_TOLERANCE,
            max_duty: MAX_DUTY,
            startup_sweep: None,
        }
    }
}

impl AxisConfig {
    pub fn with_kp(mut self, kp: f32) -> Self {
        self.kp = kp;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Only the magnitude is kept.
    pub fn with_max_duty(mut self, max_duty: i16) -> Self {
        self.max_duty = max_duty.saturating_abs();
        self
    }

    pub fn with_startup_sweep(mut self, sweep: Sweep) -> Self {
        self.startup_sweep = Some(sweep);
        self
    }
}

/// Tunables for the [`AcquisitionTask`](crate::tasks::AcquisitionTask).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AcquisitionConfig {
    pub fov_vertical_deg: f32,
    pub fov_horizontal_deg: f32,
    pub ticks_per_rev: f32,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            fov_vertical_deg: FOV_VERTICAL_DEG,
            fov_horizontal_deg: FOV_HORIZONTAL_DEG,
            ticks_per_rev: TICKS_PER_REV,
        }
    }
}

impl AcquisitionConfig {
    pub fn with_fov(mut self, vertical_deg: f32, horizontal_deg: f32) -> Self {
        self.fov_vertical_deg = vertical_deg;
        self.fov_horizontal_deg = horizontal_deg;
        self
    }

    pub fn with_ticks_per_rev(mut self, ticks_per_rev: f32) -> Self {
        self.ticks_per_rev = ticks_per_rev;
        self
    }
}

/// Who resets the acquisition cycle after a shot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RearmPolicy {
    /// Fire once; the flags stay set until something outside the sequencer clears them.
    Never,
    /// The sequencer clears `targ_acquired` after the shot, starting a new cycle.
    AfterShot,
}

/// Tunables for the [`FireSequencerTask`](crate::tasks::FireSequencerTask).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FireConfig {
    pub spin_up: MillisDurationU32,
    pub solenoid_hold: MillisDurationU32,
    pub rearm: RearmPolicy,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            spin_up: TRIGGER_SPIN_UP,
            solenoid_hold: SOLENOID_HOLD,
            rearm: RearmPolicy::Never,
        }
    }
}

impl FireConfig {
    pub fn with_holds(
        mut self,
        spin_up: MillisDurationU32,
        solenoid_hold: MillisDurationU32,
    ) -> Self {
        self.spin_up = spin_up;
        self.solenoid_hold = solenoid_hold;
        self
    }

    pub fn with_rearm(mut self, rearm: RearmPolicy) -> Self {
        self.rearm = rearm;
        self
    }
}
