//! MQTT inbound adapter.
//!
//! Player stations publish `"1"`/`"0"` on `{prefix}{n}{suffix}`
//! (default `Pico{n}/Eingabe`); an operator panel publishes the explode
//! toggle on its own topic. [`TopicMap`] turns those messages into
//! [`InputEdge`]s; on ESP-IDF the subscription callback pushes them onto
//! the [`EdgeBus`](crate::events::EdgeBus).
//!
//! ## Reconnection
//!
//! None. The ESP-IDF client reconnects to the broker on its own; if the
//! broker is unreachable at boot the subscribe retries below give up and
//! the game runs on local input lines only.

use core::fmt::Write;

use heapless::String;
use log::warn;

use crate::config::MqttConfig;
use crate::error::{CommsError, Result};
use crate::events::InputEdge;
use crate::game::input::Level;
use crate::game::player::PlayerId;

/// Capacity of a formatted topic.
pub const TOPIC_CAP: usize = 64;

pub type Topic = String<TOPIC_CAP>;

/// Topic layout for player stations and the explode toggle.
#[derive(Debug, Clone)]
pub struct TopicMap {
    prefix: String<24>,
    suffix: String<24>,
    explode: String<48>,
}

impl TopicMap {
    pub fn from_config(cfg: &MqttConfig) -> Self {
        Self {
            prefix: cfg.player_topic_prefix.clone(),
            suffix: cfg.player_topic_suffix.clone(),
            explode: cfg.explode_topic.clone(),
        }
    }

    pub fn player_topic(&self, player: PlayerId) -> Result<Topic> {
        let mut topic = Topic::new();
        write!(topic, "{}{}{}", self.prefix, player.number(), self.suffix)
            .map_err(|_| CommsError::TopicTooLong)?;
        Ok(topic)
    }

    pub fn explode_topic(&self) -> &str {
        &self.explode
    }

    /// Every topic the controller subscribes to.
    pub fn subscriptions(&self) -> Result<heapless::Vec<Topic, 5>> {
        let mut all = heapless::Vec::new();
        for player in PlayerId::ALL {
            // Capacity is PlayerId::COUNT + 1.
            let _ = all.push(self.player_topic(player)?);
        }
        let mut explode = Topic::new();
        explode
            .push_str(&self.explode)
            .map_err(|()| CommsError::TopicTooLong)?;
        let _ = all.push(explode);
        Ok(all)
    }

    /// Which player a topic belongs to.
    ///
    /// `Ok(None)` when the topic does not follow the player layout at all;
    /// `Err(UnknownPlayer)` when it does but names a station outside 1–4.
    pub fn parse_player(&self, topic: &str) -> Result<Option<PlayerId>> {
        let Some(number) = topic
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_suffix(self.suffix.as_str()))
        else {
            return Ok(None);
        };
        match number.parse::<u8>() {
            Ok(n) => PlayerId::from_number(n).map(Some),
            Err(_) => Ok(None),
        }
    }

    /// Translate one inbound message.
    pub fn on_message(&self, topic: &str, payload: &[u8]) -> Result<Option<InputEdge>> {
        if topic == self.explode.as_str() {
            return Ok(Level::from_payload(payload).map(|l| InputEdge::Explode(l == Level::High)));
        }
        let Some(player) = self.parse_player(topic)? else {
            return Ok(None);
        };
        match Level::from_payload(payload) {
            Some(level) => Ok(Some(InputEdge::Player { player, level })),
            None => {
                warn!("mqtt: {} sent unparseable payload {:?}", player, payload);
                Ok(None)
            }
        }
    }
}

// ── ESP-IDF client ────────────────────────────────────────────

#[cfg(feature = "espidf")]
pub use esp::start_client;

#[cfg(feature = "espidf")]
mod esp {
    use core::time::Duration;

    use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS};
    use log::{error, info, warn};

    use super::TopicMap;
    use crate::config::MqttConfig;
    use crate::error::{CommsError, Error, Result};
    use crate::events::EdgeBus;

    const SUBSCRIBE_ATTEMPTS: u32 = 20;
    const SUBSCRIBE_RETRY: Duration = Duration::from_millis(500);

    /// Connect, subscribe to every game topic and forward messages to `bus`.
    pub fn start_client(
        cfg: &MqttConfig,
        topics: TopicMap,
        bus: &'static EdgeBus,
    ) -> Result<EspMqttClient<'static>> {
        let conf = MqttClientConfiguration {
            client_id: Some(cfg.client_id.as_str()),
            username: (!cfg.username.is_empty()).then_some(cfg.username.as_str()),
            password: (!cfg.password.is_empty()).then_some(cfg.password.as_str()),
            ..Default::default()
        };

        let router_topics = topics.clone();
        let mut client = EspMqttClient::new_cb(cfg.broker_url.as_str(), &conf, move |event| {
            match event.payload() {
                EventPayload::Connected(_) => info!("mqtt: connected"),
                EventPayload::Disconnected => warn!("mqtt: disconnected"),
                EventPayload::Received {
                    topic: Some(topic),
                    data,
                    ..
                } => match router_topics.on_message(topic, data) {
                    Ok(Some(edge)) => {
                        bus.push(edge);
                    }
                    Ok(None) => {}
                    Err(e) => error!("mqtt: {} on {}", e, topic),
                },
                _ => {}
            }
        })
        .map_err(|e| {
            error!("mqtt: client init failed: {}", e);
            Error::from(CommsError::MqttConnectFailed)
        })?;

        for topic in topics.subscriptions()? {
            subscribe_with_retry(&mut client, &topic)?;
        }
        info!("mqtt: subscribed to player and explode topics");
        Ok(client)
    }

    fn subscribe_with_retry(client: &mut EspMqttClient<'static>, topic: &str) -> Result<()> {
        for attempt in 1..=SUBSCRIBE_ATTEMPTS {
            match client.subscribe(topic, QoS::AtMostOnce) {
                Ok(_) => return Ok(()),
                Err(e) => {
                    warn!("mqtt: subscribe {} attempt {} failed: {}", topic, attempt, e);
                    std::thread::sleep(SUBSCRIBE_RETRY);
                }
            }
        }
        Err(CommsError::MqttSubscribeFailed.into())
    }
}
