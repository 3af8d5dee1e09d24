//! High-level sensor interface

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use sen44_core::{
    constants::{BAUD_RATE, DEFAULT_LOOP_INTERVAL, DEFAULT_UPDATE_INTERVAL},
    AssemblyMode, FrameAssembler, RequestFrame, ResponseFrame,
};
use sen44_transport::Transport;
use sen44_types::{Channel, Measurement};

use crate::error::Result;
use crate::sink::{Sink, Sinks};

/// SEN44 sensor on a UART link
///
/// Requests a measurement on every [`update`](Self::update) and decodes
/// whatever the sensor sent back on every [`loop_once`](Self::loop_once).
/// [`run`](Self::run) drives both on tokio intervals.
///
/// # Examples
///
/// ```
/// use sen44::{Channel, MemoryTransport, ResponseFrame, Sen44};
///
/// let transport = MemoryTransport::new();
/// let sensor_side = transport.handle();
///
/// let mut sensor = Sen44::new(transport)
///     .with_sink(Channel::Humidity, |value: f32| assert_eq!(value, 45.0));
///
/// sensor.update().unwrap();
/// assert_eq!(sensor_side.take_written().len(), 8);
///
/// sensor_side.inject(&ResponseFrame::new([123, 45, 67, 89, 10, 4500, 4500]).encode());
/// sensor.loop_once();
/// ```
pub struct Sen44<T: Transport> {
    transport: T,
    assembler: FrameAssembler,
    sinks: Sinks,
    update_interval: Duration,
    loop_interval: Duration,
}

impl<T: Transport> Sen44<T> {
    /// Create a new sensor with no sinks attached
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            assembler: FrameAssembler::new(AssemblyMode::default()),
            sinks: Sinks::new(),
            update_interval: DEFAULT_UPDATE_INTERVAL,
            loop_interval: DEFAULT_LOOP_INTERVAL,
        }
    }

    /// Set interval between measurement requests (default: 60s)
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Set interval between receive drains (default: 16ms)
    pub fn with_loop_interval(mut self, interval: Duration) -> Self {
        self.loop_interval = interval;
        self
    }

    /// Set how received bytes are grouped into frames
    pub fn with_assembly_mode(mut self, mode: AssemblyMode) -> Self {
        self.assembler = FrameAssembler::new(mode);
        self
    }

    /// Attach a sink to a channel
    pub fn with_sink(mut self, channel: Channel, sink: impl Sink + 'static) -> Self {
        self.sinks.set(channel, Arc::new(sink));
        self
    }

    /// Attach a shared sink to a channel
    pub fn set_sink(&mut self, channel: Channel, sink: Arc<dyn Sink>) {
        self.sinks.set(channel, sink);
    }

    /// Detach a channel's sink
    pub fn remove_sink(&mut self, channel: Channel) -> Option<Arc<dyn Sink>> {
        self.sinks.remove(channel)
    }

    /// Sinks currently attached
    pub fn sinks(&self) -> &Sinks {
        &self.sinks
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Underlying transport, mutably
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Interval between measurement requests
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Assembly mode in use
    pub fn assembly_mode(&self) -> AssemblyMode {
        self.assembler.mode()
    }

    /// One-time startup log
    pub fn setup(&self) {
        info!("Setting up SEN44 UART...");
    }

    /// Log the configuration
    pub fn dump_config(&self) {
        info!("SEN44 UART:");
        info!("  Transport: {}", self.transport.name());
        info!("  Update interval: {:?}", self.update_interval);
        info!("  Assembly mode: {:?}", self.assembler.mode());
        for channel in self.sinks.attached() {
            info!("  Channel: {} [{}]", channel, channel.unit());
        }
        self.check_uart_settings();
    }

    /// Check that the link runs at the sensor's baud rate
    ///
    /// Informational only; a mismatch is logged, never enforced.
    pub fn check_uart_settings(&self) -> bool {
        match self.transport.baud_rate() {
            Some(BAUD_RATE) => true,
            Some(actual) => {
                warn!(
                    "  Baud rate {} does not match the {} baud the sensor expects",
                    actual, BAUD_RATE
                );
                false
            }
            None => {
                warn!("  Baud rate unknown, the sensor expects {} baud", BAUD_RATE);
                false
            }
        }
    }

    /// Drain received bytes and decode any complete frames
    ///
    /// Never blocks: only bytes already buffered by the transport are read.
    /// Invalid frames are logged and dropped.
    pub fn loop_once(&mut self) {
        let mut drained = 0usize;

        loop {
            match self.transport.available() {
                Ok(0) => break,
                Ok(_) => match self.transport.read_byte() {
                    Ok(byte) => {
                        self.assembler.push(byte);
                        drained += 1;
                    }
                    Err(e) => {
                        warn!("Read failed after {} bytes: {}", drained, e);
                        break;
                    }
                },
                Err(e) => {
                    warn!("Failed to poll {}: {}", self.transport.name(), e);
                    break;
                }
            }
        }

        if drained > 0 {
            trace!("Drained {} bytes", drained);
        }

        for frame in self.assembler.take_frames() {
            if let Err(e) = self.handle_frame(&frame) {
                warn!("Discarding frame {}: {}", hex::encode(&frame), e);
            }
        }
    }

    /// Decode a raw frame and publish its values to the attached sinks
    ///
    /// Nothing is published unless the whole frame is valid.
    pub fn handle_frame(&self, frame: &[u8]) -> Result<Measurement> {
        let measurement = ResponseFrame::decode(frame)?;

        let published = self.sinks.dispatch(&measurement);
        debug!("Received {} ({} channels published)", measurement, published);

        Ok(measurement)
    }

    /// Send a measurement request
    ///
    /// The response is picked up by a later [`loop_once`](Self::loop_once).
    pub fn update(&mut self) -> Result<()> {
        let request = RequestFrame.encode();
        trace!("Requesting measurement: {}", hex::encode(&request));

        self.transport.write_all(&request)?;
        Ok(())
    }

    /// Poll the sensor forever
    pub async fn run(&mut self) {
        self.run_until(std::future::pending()).await
    }

    /// Poll the sensor until `shutdown` completes
    ///
    /// Requests a measurement immediately and then every update interval,
    /// and drains the transport every loop interval.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        self.setup();
        self.dump_config();

        let mut update = interval(self.update_interval.max(Duration::from_millis(1)));
        update.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut poll = interval(self.loop_interval.max(Duration::from_millis(1)));
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("Stopping SEN44 polling");
                    break;
                }
                _ = update.tick() => {
                    if let Err(e) = self.update() {
                        warn!("Failed to request measurement: {}", e);
                    }
                }
                _ = poll.tick() => self.loop_once(),
            }
        }
    }
}
