//! Game configuration parameters.
//!
//! All tunable parameters for the balloon game. Defaults match the rig
//! as installed; a JSON override document can replace any subset of them
//! (see [`GameConfig::from_json`]).

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::game::input::TriggerKind;

/// Core game configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // --- Scoring ---
    /// Balloon time (seconds) above which a win ejects the balloon.
    pub balloon_threshold_secs: f32,
    /// Divisor applied to valve open time when computing balloon time.
    pub valve_damping: f32,

    // --- Mode pacing ---
    /// Length of each mode's one-shot intro animation (milliseconds).
    pub intro_ms: u32,
    /// Pump hold / visual cue on an Easy win (milliseconds).
    pub easy_cue_ms: u32,
    /// Pump hold / visual cue on a Medium win (milliseconds).
    pub medium_cue_ms: u32,
    /// Pump hold / visual cue on a Hard win (milliseconds).
    pub hard_cue_ms: u32,
    /// How long the chosen Hard-mode player has to react (milliseconds).
    pub hard_wait_window_ms: u32,

    // --- Game loop ---
    /// Idle time between two `run_cycle` calls (milliseconds).
    pub cycle_interval_ms: u32,
    /// Grace interval after a mode switch before the loop resumes.
    pub switch_grace_ms: u32,
    /// Poll interval while the loop is paused.
    pub pause_poll_ms: u32,

    // --- Inputs ---
    /// Trigger condition per player, indexed by player number − 1.
    pub triggers: [TriggerKind; 4],
    /// Debounce window for local digital input lines.
    pub button_debounce_ms: u32,
    /// Poll interval of the input-line tasks.
    pub input_poll_ms: u32,

    // --- Servo ---
    /// Resting angle (degrees) holding the balloon.
    pub servo_normal_deg: u8,
    /// Angle (degrees) that releases the balloon.
    pub servo_eject_deg: u8,
    /// Settle time after each servo move (milliseconds).
    pub servo_settle_ms: u32,

    // --- Randomness ---
    /// Fixed seed for Hard-mode player picks; `None` seeds from uptime.
    pub rng_seed: Option<u64>,

    // --- Connectivity ---
    pub mqtt: MqttConfig,
    pub wifi: WifiConfig,
}

/// MQTT broker and topic layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    pub broker_url: String<64>,
    pub client_id: String<32>,
    pub username: String<32>,
    pub password: String<64>,
    /// Player topics are `{prefix}{n}{suffix}`, e.g. `Pico3/Eingabe`.
    pub player_topic_prefix: String<24>,
    pub player_topic_suffix: String<24>,
    /// Topic carrying the explode toggle (`"1"` = explode mode on).
    pub explode_topic: String<48>,
}

/// Station credentials for the game network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiConfig {
    pub ssid: String<32>,
    pub password: String<64>,
}

fn fixed<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    // Defaults are compile-time literals well under capacity.
    let _ = out.push_str(s);
    out
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_url: fixed("mqtt://192.168.0.127:1883"),
            client_id: fixed("ballongame"),
            username: fixed("PicoNet"),
            password: String::new(),
            player_topic_prefix: fixed("Pico"),
            player_topic_suffix: fixed("/Eingabe"),
            explode_topic: fixed("Ballongame/Explode"),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Scoring
            balloon_threshold_secs: 40.0,
            valve_damping: 1.5,

            // Mode pacing
            intro_ms: 3_000,
            easy_cue_ms: 1_000,
            medium_cue_ms: 2_000,
            hard_cue_ms: 3_000,
            hard_wait_window_ms: 2_000,

            // Game loop
            cycle_interval_ms: 100,
            switch_grace_ms: 3_000,
            pause_poll_ms: 50,

            // Inputs
            triggers: [TriggerKind::FallingEdge; 4],
            button_debounce_ms: 50,
            input_poll_ms: 5,

            // Servo
            servo_normal_deg: 0,
            servo_eject_deg: 90,
            servo_settle_ms: 500,

            rng_seed: None,

            mqtt: MqttConfig::default(),
            wifi: WifiConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a JSON override document on top of the defaults and validate it.
    pub fn from_json(doc: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(doc).map_err(|_| Error::Config("malformed config document"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would make the game unplayable or the rig unsafe.
    pub fn validate(&self) -> Result<()> {
        if !(self.balloon_threshold_secs > 0.0) {
            return Err(Error::Config("balloon_threshold_secs must be positive"));
        }
        if !(self.valve_damping > 0.0) {
            return Err(Error::Config("valve_damping must be positive"));
        }
        if self.easy_cue_ms == 0 || self.medium_cue_ms == 0 || self.hard_cue_ms == 0 {
            return Err(Error::Config("cue durations must be non-zero"));
        }
        if self.hard_wait_window_ms == 0 {
            return Err(Error::Config("hard_wait_window_ms must be non-zero"));
        }
        if self.cycle_interval_ms == 0 || self.pause_poll_ms == 0 || self.input_poll_ms == 0 {
            return Err(Error::Config("loop intervals must be non-zero"));
        }
        if self.input_poll_ms >= self.button_debounce_ms {
            return Err(Error::Config("input_poll_ms must be shorter than the debounce window"));
        }
        if self.servo_normal_deg > 180 || self.servo_eject_deg > 180 {
            return Err(Error::Config("servo angles must be within 0-180 degrees"));
        }
        if self.servo_normal_deg == self.servo_eject_deg {
            return Err(Error::Config("servo eject angle equals the normal angle"));
        }
        if self.mqtt.broker_url.is_empty() {
            return Err(Error::Config("mqtt.broker_url is empty"));
        }
        Ok(())
    }
}
