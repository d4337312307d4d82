use opentelemetry::metrics::{Counter, Gauge, Meter};
use opentelemetry::KeyValue;

/// Core OTel metrics for the broker. Created once during engine init and
/// recorded on each operation.
pub struct Metrics {
    pub messages_sent: Counter<u64>,
    pub messages_received: Counter<u64>,
    pub messages_deleted: Counter<u64>,
    pub queue_depth: Gauge<u64>,
    pub messages_in_flight: Gauge<u64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create metrics from the global meter provider. If no meter provider
    /// is configured (OTel disabled), the instruments are no-op.
    pub fn new() -> Self {
        let meter = opentelemetry::global::meter("courier");
        Self::from_meter(&meter)
    }

    /// Create metrics from a specific meter (used in tests with in-memory exporter).
    pub fn from_meter(meter: &Meter) -> Self {
        Self {
            messages_sent: meter
                .u64_counter("courier.messages.sent")
                .with_description("Total messages accepted by send")
                .build(),
            messages_received: meter
                .u64_counter("courier.messages.received")
                .with_description("Total messages handed to consumers")
                .build(),
            messages_deleted: meter
                .u64_counter("courier.messages.deleted")
                .with_description("Total messages deleted by receipt handle")
                .build(),
            queue_depth: meter
                .u64_gauge("courier.queue.depth")
                .with_description("Current live messages per queue")
                .build(),
            messages_in_flight: meter
                .u64_gauge("courier.messages.in_flight")
                .with_description("Current messages inside their visibility window")
                .build(),
        }
    }

    pub fn record_send(&self, queue_name: &str) {
        self.messages_sent
            .add(1, &[KeyValue::new("queue_name", queue_name.to_string())]);
    }

    pub fn record_receive(&self, queue_name: &str) {
        self.messages_received
            .add(1, &[KeyValue::new("queue_name", queue_name.to_string())]);
    }

    pub fn record_delete(&self, queue_name: &str) {
        self.messages_deleted
            .add(1, &[KeyValue::new("queue_name", queue_name.to_string())]);
    }

    pub fn set_queue_depth(&self, queue_name: &str, depth: u64) {
        self.queue_depth
            .record(depth, &[KeyValue::new("queue_name", queue_name.to_string())]);
    }

    pub fn set_messages_in_flight(&self, queue_name: &str, count: u64) {
        self.messages_in_flight
            .record(count, &[KeyValue::new("queue_name", queue_name.to_string())]);
    }
}
