//! Wi-Fi station bring-up (ESP-IDF only).
//!
//! Connects once at boot and blocks until the network interface has an
//! address. Reconnection is left to the ESP-IDF driver.

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::{error, info};

use crate::config::WifiConfig;
use crate::error::{CommsError, Error, Result};

fn comms(e: impl core::fmt::Display) -> Error {
    error!("wifi: {}", e);
    CommsError::WifiConnectFailed.into()
}

/// Join the configured network and wait for an IP.
pub fn connect(
    modem: Modem,
    sysloop: EspSystemEventLoop,
    nvs: EspDefaultNvsPartition,
    cfg: &WifiConfig,
) -> Result<BlockingWifi<EspWifi<'static>>> {
    let esp_wifi = EspWifi::new(modem, sysloop.clone(), Some(nvs)).map_err(comms)?;
    let mut wifi = BlockingWifi::wrap(esp_wifi, sysloop).map_err(comms)?;

    let auth_method = if cfg.password.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPA2Personal
    };
    let client = ClientConfiguration {
        ssid: cfg
            .ssid
            .as_str()
            .try_into()
            .map_err(|()| comms("ssid too long"))?,
        password: cfg
            .password
            .as_str()
            .try_into()
            .map_err(|()| comms("password too long"))?,
        auth_method,
        ..Default::default()
    };
    wifi.set_configuration(&Configuration::Client(client))
        .map_err(comms)?;

    wifi.start().map_err(comms)?;
    info!("wifi: connecting to '{}'", cfg.ssid);
    wifi.connect().map_err(comms)?;
    wifi.wait_netif_up().map_err(comms)?;
    info!("wifi: up");
    Ok(wifi)
}
