//! Publishing domain events to the broker.
//!
//! One [`FutureProducer`] is created at startup and shared by every handler;
//! librdkafka multiplexes all sends over its own connections, so per-request
//! producers would only add handshake latency.
//!
//! Events go to a single events topic keyed by routing key (`order.created`,
//! `payment.success`), which keeps ordering per event type while letting one
//! consumer group fan out by key. Raw order messages go to a dedicated
//! unkeyed orders topic.

use std::time::Duration;

use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use serde::Serialize;

use crate::config::KafkaConfig;
use crate::error::Result;

pub fn create_producer(config: &KafkaConfig) -> Result<FutureProducer> {
    let producer: FutureProducer = ClientConfig::new()
        .set("bootstrap.servers", &config.brokers)
        .set("message.timeout.ms", config.message_timeout_ms.to_string())
        .create()?;

    Ok(producer)
}

#[derive(Clone)]
pub struct EventPublisher {
    producer: FutureProducer,
    events_topic: String,
    orders_topic: String,
    send_timeout: Duration,
}

impl EventPublisher {
    pub fn new(producer: FutureProducer, config: &KafkaConfig) -> Self {
        Self {
            producer,
            events_topic: config.events_topic.clone(),
            orders_topic: config.orders_topic.clone(),
            send_timeout: config.message_timeout(),
        }
    }

    /// Publish a typed event to the events topic under the given routing key.
    pub async fn publish<T: Serialize>(&self, routing_key: &str, event: &T) -> Result<()> {
        let payload = serde_json::to_vec(event)?;
        self.send(&self.events_topic, Some(routing_key), &payload)
            .await
    }

    /// Publish a raw order message to the orders topic, unkeyed.
    pub async fn publish_order<T: Serialize>(&self, message: &T) -> Result<()> {
        let payload = serde_json::to_vec(message)?;
        self.send(&self.orders_topic, None, &payload).await
    }

    async fn send(&self, topic: &str, key: Option<&str>, payload: &[u8]) -> Result<()> {
        let mut record = FutureRecord::to(topic).payload(payload);

        if let Some(k) = key {
            record = record.key(k);
        }

        match self
            .producer
            .send(record, Timeout::After(self.send_timeout))
            .await
        {
            Ok((partition, offset)) => {
                tracing::debug!(topic, key, partition, offset, "message published");
                Ok(())
            }
            Err((e, _message)) => {
                tracing::error!(topic, key, error = %e, "failed to publish message");
                Err(e.into())
            }
        }
    }
}
