//! Decoded measurement readings

use std::fmt;

use crate::channel::Channel;

/// One set of readings decoded from a response frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    values: [f32; Channel::COUNT],
}

impl Measurement {
    /// Build a measurement from the raw frame words, in `Channel::ALL` order
    pub fn from_raw(raw: [u16; Channel::COUNT]) -> Self {
        let mut values = [0.0; Channel::COUNT];
        for channel in Channel::ALL {
            values[channel.index()] = channel.convert(raw[channel.index()]);
        }
        Self { values }
    }

    /// Value of a single channel
    pub fn get(&self, channel: Channel) -> f32 {
        self.values[channel.index()]
    }

    /// Iterate `(channel, value)` pairs in dispatch order
    pub fn iter(&self) -> impl Iterator<Item = (Channel, f32)> + '_ {
        Channel::ALL.into_iter().map(|channel| (channel, self.get(channel)))
    }

    /// PM1.0 mass concentration in µg/m³
    pub fn pm_1_0(&self) -> f32 {
        self.get(Channel::Pm1_0)
    }

    /// PM2.5 mass concentration in µg/m³
    pub fn pm_2_5(&self) -> f32 {
        self.get(Channel::Pm2_5)
    }

    /// PM4.0 mass concentration in µg/m³
    pub fn pm_4_0(&self) -> f32 {
        self.get(Channel::Pm4_0)
    }

    /// PM10.0 mass concentration in µg/m³
    pub fn pm_10_0(&self) -> f32 {
        self.get(Channel::Pm10_0)
    }

    /// VOC index
    pub fn voc(&self) -> f32 {
        self.get(Channel::Voc)
    }

    /// Relative humidity in %
    pub fn humidity(&self) -> f32 {
        self.get(Channel::Humidity)
    }

    /// Temperature in °C
    pub fn temperature(&self) -> f32 {
        self.get(Channel::Temperature)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Measurement[PM1.0: {:.1}, PM2.5: {:.1}, PM4.0: {:.1}, PM10.0: {:.1}, VOC: {:.1}, RH: {:.2}%, T: {:.2}°C]",
            self.pm_1_0(),
            self.pm_2_5(),
            self.pm_4_0(),
            self.pm_10_0(),
            self.voc(),
            self.humidity(),
            self.temperature(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Measurement {
        Measurement::from_raw([123, 45, 67, 89, 10, 4500, 4500])
    }

    #[test]
    fn test_from_raw_scales_each_channel() {
        let m = sample();
        assert_eq!(m.pm_1_0(), 12.3);
        assert_eq!(m.pm_2_5(), 4.5);
        assert_eq!(m.pm_4_0(), 6.7);
        assert_eq!(m.pm_10_0(), 8.9);
        assert_eq!(m.voc(), 1.0);
        assert_eq!(m.humidity(), 45.0);
        assert_eq!(m.temperature(), 22.5);
    }

    #[test]
    fn test_iter_covers_all_channels() {
        let pairs: Vec<(Channel, f32)> = sample().iter().collect();
        assert_eq!(pairs.len(), Channel::COUNT);
        assert_eq!(pairs[0], (Channel::Pm1_0, 12.3));
        assert_eq!(pairs[6], (Channel::Temperature, 22.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "Measurement[PM1.0: 12.3, PM2.5: 4.5, PM4.0: 6.7, PM10.0: 8.9, VOC: 1.0, RH: 45.00%, T: 22.50°C]"
        );
    }
}
