//! Balloon Game Controller — Main Entry Point
//!
//! Hexagonal layout: the game loop only sees port traits, the adapters
//! below wire them to the ESP32 peripherals and the MQTT broker.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  BalloonRig        LogEventSink   SystemClock   MQTT client    │
//! │  (ActuatorPort)    (EventSink)    (Clock)       (→ EdgeBus)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │  GameRunner · ModeController (Easy | Medium | Hard)    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  InputRouter (EdgeBus consumer) · input-line tasks             │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;

use anyhow::{Context, Result};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{IOPin, OutputPin, PinDriver, Pull};
use esp_idf_svc::hal::ledc::{LedcDriver, LedcTimerDriver, Resolution, config::TimerConfig};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::FromValueType;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{error, info, warn};

use balloongame::adapters::hardware::BalloonRig;
use balloongame::adapters::log_sink::LogEventSink;
use balloongame::adapters::mqtt::{self, TopicMap};
use balloongame::adapters::time::SystemClock;
use balloongame::adapters::wifi;
use balloongame::app::router::InputRouter;
use balloongame::app::runner::GameRunner;
use balloongame::app::switcher::ModeSwitcher;
use balloongame::config::GameConfig;
use balloongame::drivers::input_task::{self, InputLine, LineRole};
use balloongame::drivers::relay::{Polarity, Relay};
use balloongame::drivers::rgb_led::RgbLed;
use balloongame::drivers::servo::Servo;
use balloongame::drivers::task_pin::{Core, spawn_on_core};
use balloongame::events::EDGE_BUS;
use balloongame::game::input::{ExplodeToggle, InputAggregator};
use balloongame::game::modes::ModeKind;
use balloongame::game::tools::SharedTools;
use balloongame::pins;

/// Build-time override document, e.g. `BALLOONGAME_CONFIG='{"rng_seed": 7}'`.
fn load_config() -> GameConfig {
    let Some(doc) = option_env!("BALLOONGAME_CONFIG") else {
        return GameConfig::default();
    };
    match GameConfig::from_json(doc) {
        Ok(cfg) => {
            info!("Config override applied");
            cfg
        }
        Err(e) => {
            warn!("Config override rejected ({}), using defaults", e);
            GameConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Ballongame v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = load_config();
    config.validate().context("invalid game config")?;

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // ── 2. Actuators ──────────────────────────────────────────
    let pump = Relay::new(
        PinDriver::output(peripherals.pins.gpio17.downgrade_output())?,
        Polarity::ActiveHigh,
    )?;
    let valve = Relay::new(
        PinDriver::output(peripherals.pins.gpio27.downgrade_output())?,
        Polarity::ActiveHigh,
    )?;
    info!("Relays: pump=GPIO{} valve=GPIO{}", pins::PUMP_GPIO, pins::VALVE_GPIO);

    let led_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new().frequency(pins::LED_PWM_FREQ_HZ.Hz().into()),
    )?;
    let led = RgbLed::new(
        LedcDriver::new(peripherals.ledc.channel0, &led_timer, peripherals.pins.gpio18)?,
        LedcDriver::new(peripherals.ledc.channel1, &led_timer, peripherals.pins.gpio19)?,
        LedcDriver::new(peripherals.ledc.channel2, &led_timer, peripherals.pins.gpio21)?,
    );

    let servo_timer = LedcTimerDriver::new(
        peripherals.ledc.timer1,
        &TimerConfig::new()
            .frequency(pins::SERVO_PWM_FREQ_HZ.Hz().into())
            .resolution(Resolution::Bits14),
    )?;
    let servo = Servo::new(
        LedcDriver::new(peripherals.ledc.channel3, &servo_timer, peripherals.pins.gpio22)?,
        config.servo_normal_deg,
        config.servo_eject_deg,
        config.servo_settle_ms,
    );

    let rig = BalloonRig::new(pump, valve, led, servo, FreeRtos);

    // ── 3. Shared game state ──────────────────────────────────
    let inputs = Arc::new(InputAggregator::new());
    let explode = Arc::new(ExplodeToggle::new());
    let switcher = Arc::new(ModeSwitcher::new());

    // ── 4. Network + MQTT (optional: local lines still work) ──
    let network = match wifi::connect(peripherals.modem, sysloop, nvs, &config.wifi) {
        Ok(w) => Some(w),
        Err(e) => {
            error!("WiFi unavailable ({}), player stations offline", e);
            None
        }
    };
    let _mqtt = if network.is_some() {
        match mqtt::start_client(&config.mqtt, TopicMap::from_config(&config.mqtt), &EDGE_BUS) {
            Ok(c) => Some(c),
            Err(e) => {
                error!("MQTT unavailable ({})", e);
                None
            }
        }
    } else {
        None
    };

    // ── 5. Input router thread ────────────────────────────────
    let router = InputRouter::new(
        &config,
        Arc::clone(&inputs),
        Arc::clone(&explode),
        Arc::clone(&switcher),
        LogEventSink::new(),
    );
    spawn_on_core(Core::Pro, 5, 8, "router\0", move || {
        futures_lite::future::block_on(router.run(&EDGE_BUS));
    })?;

    // ── 6. Input-line tasks ───────────────────────────────────
    let mut mode_button = PinDriver::input(peripherals.pins.gpio26.downgrade())?;
    mode_button.set_pull(Pull::Up)?;
    info!("Mode button on GPIO{}", pins::MODE_BUTTON_GPIO);
    let lines = vec![InputLine {
        pin: mode_button,
        role: LineRole::ModeButton,
    }];
    let debounce_ms = config.button_debounce_ms;
    let poll = core::time::Duration::from_millis(u64::from(config.input_poll_ms));
    spawn_on_core(Core::App, 4, 8, "inputs\0", move || {
        input_task::run_input_lines(lines, debounce_ms, poll, &EDGE_BUS);
    })?;

    // ── 7. Game loop ──────────────────────────────────────────
    let mut sink = LogEventSink::new();
    let tools = SharedTools::new(rig, SystemClock::new(), inputs, explode, config);
    let mut runner = GameRunner::new(tools, ModeKind::Easy, switcher, &mut sink);

    info!("System ready. Entering game loop.");
    if let Err(e) = runner.run(&mut sink) {
        error!("Game loop stopped: {}", e);
        runner.shutdown(&mut sink);
        return Err(e.into());
    }
    Ok(())
}
