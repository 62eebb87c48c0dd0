// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use cortex_m_rt::{entry, exception};
use log::{error, info, warn, LevelFilter};
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use turret::config::{
    AcquisitionConfig, AxisConfig, FireConfig, Sweep, ACQUISITION_PERIOD, ACQUISITION_PRIORITY,
    AXIS_PRIORITY, CAMERA_COLS, CAMERA_ROWS, FIRE_PERIOD, FIRE_PRIORITY, OPERATOR_STOP_PERIOD,
    OPERATOR_STOP_PRIORITY, PITCH_PERIOD, PWM_FREQUENCY_HZ, YAW_PERIOD,
};
use turret::drivers::{EncoderCounter, MotorDriver};
use turret::hw::{
    self, BoardPins, CameraLink, DigitalOut, Encoder, OperatorStop, SysTickClock, Tim4Pwm, Usart,
};
use turret::sched::{Duration, Scheduler, Task};
use turret::share::Shares;
use turret::tasks::{AcquisitionTask, AxisControlTask, FireSequencerTask};

static SHARES: Shares = Shares::new();

const TASKS: usize = 5;

#[exception]
fn SysTick() {
    hw::systick::tick();
}

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.sysclk(216.MHz()).freeze();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);

    // USART1 (DBG) carries the log
    let console = Serial::new(
        dp.USART1,
        (pins.usart1.tx, pins.usart1.rx),
        &clocks,
        Config {
            baud_rate: 115_200.bps(),
            ..Default::default()
        },
    );
    hw::logger::init(Usart::new(console), LevelFilter::Info);

    let clock = SysTickClock::start(cp.SYST, clocks.sysclk().raw());
    info!("Turret booting, sysclk {} Hz", clocks.sysclk().raw());

    // USART3 thermal camera
    let camera_serial = Serial::new(
        dp.USART3,
        (pins.usart3.tx, pins.usart3.rx),
        &clocks,
        Config {
            baud_rate: 921_600.bps(),
            ..Default::default()
        },
    );
    let camera = CameraLink::new(camera_serial);

    // Bridges: TIM4 PWM, nSLEEP as enable, DISABLE held low
    let _encoder_pins = pins.encoders;
    let _bridge_disable = (pins.pitch.disable, pins.yaw.disable);
    let pwm = Tim4Pwm::new(dp.TIM4, pins.pwm, &clocks, PWM_FREQUENCY_HZ);

    let pitch_driver = MotorDriver::new(pwm.ch1, pwm.ch2, DigitalOut::new(pins.pitch.nsleep));
    let yaw_driver = MotorDriver::new(pwm.ch3, pwm.ch4, DigitalOut::new(pins.yaw.nsleep));
    let (pitch_driver, yaw_driver) = match (pitch_driver, yaw_driver) {
        (Ok(pitch), Ok(yaw)) => (pitch, yaw),
        (Err(e), _) | (_, Err(e)) => halt("motor driver init", e),
    };

    let pitch_encoder = EncoderCounter::new(Encoder::tim3(dp.TIM3));
    let yaw_encoder = EncoderCounter::new(Encoder::tim8(dp.TIM8));

    // Tasks
    let mut acquisition: AcquisitionTask<_, CAMERA_ROWS, CAMERA_COLS> =
        AcquisitionTask::new(camera, &SHARES, AcquisitionConfig::default());

    let mut pitch = AxisControlTask::new(
        "pitch",
        pitch_driver,
        pitch_encoder,
        SHARES.pitch(),
        AxisConfig::default(),
    );

    let mut yaw = AxisControlTask::new(
        "yaw",
        yaw_driver,
        yaw_encoder,
        SHARES.yaw(),
        AxisConfig::default().with_startup_sweep(Sweep::half_turn()),
    );

    let mut fire = FireSequencerTask::new(
        DigitalOut::new(pins.fire.trigger),
        DigitalOut::new(pins.fire.solenoid),
        &SHARES,
        FireConfig::default(),
    );

    let mut operator_stop = OperatorStop::new(pins.button, &SHARES.stop);

    {
        let mut sched: Scheduler<TASKS> = Scheduler::new();
        let table: [(&mut dyn Task, u8, Duration); TASKS] = [
            (&mut acquisition, ACQUISITION_PRIORITY, ACQUISITION_PERIOD),
            (&mut pitch, AXIS_PRIORITY, PITCH_PERIOD),
            (&mut yaw, AXIS_PRIORITY, YAW_PERIOD),
            (&mut fire, FIRE_PRIORITY, FIRE_PERIOD),
            (&mut operator_stop, OPERATOR_STOP_PRIORITY, OPERATOR_STOP_PERIOD),
        ];
        for (task, priority, period) in table {
            if let Err(e) = sched.add(task, priority, period) {
                halt("task registration", e);
            }
        }

        sched.run(&clock, &SHARES.stop);
    }

    // Stopped: leave the hardware safe.
    for result in [pitch.park(), yaw.park(), fire.disarm()] {
        if let Err(e) = result {
            warn!("Shutdown: {}", e);
        }
    }
    info!("Turret stopped");

    loop {
        cortex_m::asm::wfi();
    }
}

fn halt(stage: &str, e: turret::Error) -> ! {
    error!("{} failed: {}", stage, e);
    loop {
        cortex_m::asm::nop();
    }
}
