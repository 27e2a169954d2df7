//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                   |
//! |------------|---------------|-------------------------------|
//! | `hardware` | ActuatorPort  | Relays, RGB LED, servo        |
//! | `log_sink` | EventSink     | Serial log output             |
//! | `mqtt`     | —             | Broker → EdgeBus              |
//! | `time`     | Clock         | ESP32 system timer / Instant  |
//! | `wifi`     | —             | ESP-IDF WiFi STA              |

pub mod hardware;
pub mod log_sink;
pub mod mqtt;
pub mod time;
#[cfg(feature = "espidf")]
pub mod wifi;
