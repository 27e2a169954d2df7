//! Actuator and input drivers, plus thread helpers.
//!
//! Drivers are generic over `embedded-hal` 1.0 traits, so the same code
//! runs against esp-idf-hal peripherals on target and fakes on the host.

pub mod button;
pub mod input_task;
pub mod led_patterns;
pub mod relay;
pub mod rgb_led;
pub mod servo;
pub mod task_pin;

#[cfg(test)]
pub(crate) mod testing;
