//! GPIO / peripheral pin assignments for the balloon rig controller board.
//!
//! Single source of truth: `main` references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Air path
// ---------------------------------------------------------------------------

/// Digital output: pump relay (HIGH = pump running).
pub const PUMP_GPIO: i32 = 17;
/// Digital output: release valve solenoid (HIGH = valve open, venting).
pub const VALVE_GPIO: i32 = 27;

// ---------------------------------------------------------------------------
// Status LED (discrete RGB, common cathode)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 18;
pub const LED_G_GPIO: i32 = 19;
pub const LED_B_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// Eject servo
// ---------------------------------------------------------------------------

/// LEDC PWM output for the balloon eject servo (50 Hz).
pub const SERVO_GPIO: i32 = 22;

// ---------------------------------------------------------------------------
// Mode button (active-low with internal pull-up)
// ---------------------------------------------------------------------------

pub const MODE_BUTTON_GPIO: i32 = 26;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC frequency for the RGB status LED.
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
/// Hobby servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
