//! Measurement sinks

use std::fmt;
use std::sync::Arc;

use sen44_types::{Channel, Measurement};
use tracing::trace;

/// Receiver of one channel's values
pub trait Sink: Send + Sync {
    /// Publish a freshly decoded value
    fn publish(&self, value: f32);
}

impl<F> Sink for F
where
    F: Fn(f32) + Send + Sync,
{
    fn publish(&self, value: f32) {
        self(value)
    }
}

/// One optional sink per channel
#[derive(Clone, Default)]
pub struct Sinks {
    slots: [Option<Arc<dyn Sink>>; Channel::COUNT],
}

impl Sinks {
    /// Create an empty set with no channel attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a sink, replacing any previous one
    pub fn set(&mut self, channel: Channel, sink: Arc<dyn Sink>) {
        self.slots[channel.index()] = Some(sink);
    }

    /// Detach a channel's sink
    pub fn remove(&mut self, channel: Channel) -> Option<Arc<dyn Sink>> {
        self.slots[channel.index()].take()
    }

    pub fn get(&self, channel: Channel) -> Option<&Arc<dyn Sink>> {
        self.slots[channel.index()].as_ref()
    }

    pub fn is_attached(&self, channel: Channel) -> bool {
        self.slots[channel.index()].is_some()
    }

    /// Channels with a sink attached
    pub fn attached(&self) -> impl Iterator<Item = Channel> + '_ {
        Channel::ALL
            .into_iter()
            .filter(|&channel| self.is_attached(channel))
    }

    /// Publish every value whose channel has a sink; returns how many were published
    pub fn dispatch(&self, measurement: &Measurement) -> usize {
        let mut published = 0;

        for (channel, value) in measurement.iter() {
            if let Some(sink) = self.get(channel) {
                trace!("Publishing {} = {}", channel, value);
                sink.publish(value);
                published += 1;
            }
        }

        published
    }
}

impl fmt::Debug for Sinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.attached()).finish()
    }
}
