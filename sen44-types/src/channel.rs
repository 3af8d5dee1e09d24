//! Measurement channels reported by the SEN44
//!
//! Each channel maps to a 16-bit big-endian word in the response frame and a
//! fixed-point scale. Adding or removing a channel is an edit to this table.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A single measurement channel
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Mass concentration PM1.0
    Pm1_0,
    /// Mass concentration PM2.5
    Pm2_5,
    /// Mass concentration PM4.0
    Pm4_0,
    /// Mass concentration PM10.0
    Pm10_0,
    /// VOC index
    Voc,
    /// Relative humidity
    Humidity,
    /// Ambient temperature
    Temperature,
}

impl Channel {
    /// Number of channels
    pub const COUNT: usize = 7;

    /// All channels, in dispatch order
    pub const ALL: [Channel; Self::COUNT] = [
        Self::Pm1_0,
        Self::Pm2_5,
        Self::Pm4_0,
        Self::Pm10_0,
        Self::Voc,
        Self::Humidity,
        Self::Temperature,
    ];

    /// Position of this channel in `ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Byte offset of the big-endian word within a response frame
    pub fn offset(self) -> usize {
        match self {
            Self::Pm1_0 => 3,
            Self::Pm2_5 => 5,
            Self::Pm4_0 => 7,
            Self::Pm10_0 => 9,
            Self::Voc => 11,
            Self::Humidity => 13,
            Self::Temperature => 15,
        }
    }

    /// Fixed-point divisor applied to the raw word
    pub fn scale(self) -> f32 {
        match self {
            Self::Pm1_0 | Self::Pm2_5 | Self::Pm4_0 | Self::Pm10_0 => 10.0,
            Self::Voc => 10.0,
            Self::Humidity => 100.0,
            Self::Temperature => 200.0,
        }
    }

    /// Unit of measurement (empty for the dimensionless VOC index)
    pub fn unit(self) -> &'static str {
        match self {
            Self::Pm1_0 | Self::Pm2_5 | Self::Pm4_0 | Self::Pm10_0 => "µg/m³",
            Self::Voc => "",
            Self::Humidity => "%",
            Self::Temperature => "°C",
        }
    }

    /// Configuration name of the channel
    pub fn name(self) -> &'static str {
        match self {
            Self::Pm1_0 => "pm_1_0",
            Self::Pm2_5 => "pm_2_5",
            Self::Pm4_0 => "pm_4_0",
            Self::Pm10_0 => "pm_10_0",
            Self::Voc => "voc",
            Self::Humidity => "humidity",
            Self::Temperature => "temperature",
        }
    }

    /// Convert a raw frame word into the channel's value
    pub fn convert(self, raw: u16) -> f32 {
        f32::from(raw) / self.scale()
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|channel| channel.name() == name)
            .ok_or_else(|| Error::UnknownChannel(s.to_string()))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
