//! PineTime watch face firmware
//!
//! Hosts the watch face library: keeps the clock, samples the battery,
//! owns the LCD label and delivers ticks. The side button toggles ambient
//! mode, which dims the backlight and redraws once a minute.

#![no_std]
#![no_main]

mod peripherals;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    config::{Config, HfclkSource, LfclkSource},
    gpio::{Input, Level, Output, OutputDrive, Pin as _, Pull},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_futures::select::{select, Either};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Duration, Instant, Timer};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    backlight::Backlight,
    battery::{BatteryMonitor, BatterySample},
    button::Button,
    display::LcdLabel,
};
use pinetime_watchface::{
    config::WatchConfig,
    time::{TimeManager, TimeReference, TimeSnapshot},
    ui::{should_render, DefaultWatchface},
    BatteryStatus, RenderMode, WatchApp, WatchLifecycle,
};

// Include UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

/// Seconds between two battery measurements
const BATTERY_SAMPLE_SECS: u64 = 10;

type App = WatchApp<LcdLabel, BatteryStatus>;

// Communication channels
static BATTERY_SAMPLE: Signal<ThreadModeRawMutex, BatterySample> = Signal::new();
static AMBIENT: Signal<ThreadModeRawMutex, bool> = Signal::new();

/// Measure the battery periodically
#[embassy_executor::task(pool_size = 1)]
async fn sample_battery(mut battery: BatteryMonitor<'static>) {
    loop {
        BATTERY_SAMPLE.signal(battery.sample().await);

        Timer::after(Duration::from_secs(BATTERY_SAMPLE_SECS)).await;
    }
}

/// Polls the button every 10ms, toggling ambient mode on each press
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(mut button: Button<'static>) {
    let mut ambient = false;
    loop {
        if button.pressed().await {
            ambient = !ambient;
            AMBIENT.signal(ambient);
        }

        Timer::after(Duration::from_millis(10)).await;
    }
}

/// Deliver ticks to the watch face.
///
/// Sleeps until the next tick boundary of the current mode: the next second
/// when active, the next minute in ambient mode. A button press wakes it early.
#[embassy_executor::task(pool_size = 1)]
async fn run_watchface(
    mut app: App,
    mut backlight: Backlight<'static>,
    clock: TimeManager,
    config: WatchConfig,
) {
    let mut shown: Option<TimeSnapshot> = None;
    let mut ambient_request: Option<bool> = None;
    loop {
        if BATTERY_SAMPLE.signaled() {
            let sample = BATTERY_SAMPLE.wait().await;
            let status = app.renderer_mut().battery_mut();
            match status.update(sample.raw, sample.charging) {
                Ok(true) => defmt::info!("Battery status updated: {}", sample),
                Ok(false) => {}
                Err(err) => defmt::warn!("Battery sample rejected: {}", err),
            }
        }

        if let Some(ambient) = ambient_request.take() {
            app.on_ambient_changed(ambient);
            backlight.apply_mode(RenderMode::from_ambient(ambient));
            defmt::info!("Backlight level {}", backlight.brightness());
            // Mode change always redraws
            shown = None;
        }

        let mode = app.context().mode();
        let uptime_secs = Instant::now().as_secs();
        let wait_secs = match clock.snapshot(uptime_secs, config.timezone_offset_secs) {
            Ok(snapshot) => {
                if should_render(shown.as_ref(), &snapshot, mode) {
                    app.on_tick(&snapshot, mode);
                    shown = Some(snapshot);
                }
                mode.secs_until_next_tick(&snapshot)
            }
            Err(err) => {
                defmt::error!("Failed to get current time: {}", err);
                mode.tick_period_secs()
            }
        };

        // Wake on the whole-second boundary so the clock reads the new second
        let deadline = Instant::from_secs(uptime_secs + wait_secs);
        if let Either::Second(ambient) = select(Timer::at(deadline), AMBIENT.wait()).await {
            ambient_request = Some(ambient);
        }
    }
}

/// Clock and regulator setup
fn system_config() -> Config {
    // Generate default config, required because Config is set as
    // `non_exhaustive`
    let mut config = Config::default();

    // Set high-frequency and low-frequency clock sources to external
    config.hfclk_source = HfclkSource::ExternalXtal;
    config.lfclk_source = LfclkSource::ExternalXtal;

    // Enable DC/DC regulator to massively reduce runtime current consumption
    config.dcdc.reg1 = true;

    config
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut p = embassy_nrf::init(system_config());
    defmt::info!("Initializing");

    let config = WatchConfig::default();

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(&mut p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Pin P0.12: High = battery, Low = charging
    let mut monitor = BatteryMonitor::new(saadc, Input::new(p.P0_12.degrade(), Pull::None));
    let mut battery = BatteryStatus::new();
    let first = monitor.sample().await;
    if let Err(err) = battery.update(first.raw, first.charging) {
        defmt::warn!("Initial battery sample rejected: {}", err);
    }

    // Initialize Backlight
    let backlight = Backlight::init(
        Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
        RenderMode::Active,
    );

    // Initialize Button
    let button = Button::new(
        Input::new(p.P0_13.degrade(), Pull::None),
        Output::new(p.P0_15.degrade(), Level::Low, OutputDrive::Standard),
    );

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let label = LcdLabel::init(
        spim,
        Output::new(p.P0_25.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26.degrade(), Level::Low, OutputDrive::Standard),
    );

    // Wall clock starts at build time
    let reference = TimeReference::from_timestamp(UTC_EPOCH, Instant::now().as_secs())
        .unwrap_or_else(|err| {
            defmt::error!("Invalid build time: {}", err);
            TimeReference::default()
        });
    let clock = TimeManager::new(reference);

    let mut app: App = WatchApp::new(DefaultWatchface::with_locale(
        battery,
        Default::default(),
        config,
    ));
    app.on_create(
        label,
        clock.snapshot(Instant::now().as_secs(), config.timezone_offset_secs),
    );

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(sample_battery(monitor)));
    unwrap!(spawner.spawn(poll_button(button)));
    unwrap!(spawner.spawn(run_watchface(app, backlight, clock, config)));
}
