use core::fmt;

/// Number of data bits in one sensor frame.
pub const FRAME_BITS: u8 = 40;

/// The 5 bytes sent by the sensor in one response.
///
/// Layout: `[humidity, humidity_fraction, temperature, temperature_fraction, checksum]`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame([u8; 5]);

impl Frame {
    /// Wraps raw frame bytes without validating them.
    pub const fn from_bytes(bytes: [u8; 5]) -> Self {
        Frame(bytes)
    }

    pub const fn bytes(&self) -> [u8; 5] {
        self.0
    }

    /// Low 8 bits of the sum of the four payload bytes.
    pub fn expected_checksum(&self) -> u8 {
        self.0[..4].iter().fold(0u8, |sum, v| sum.wrapping_add(*v))
    }

    pub fn checksum_ok(&self) -> bool {
        self.expected_checksum() == self.0[4]
    }

    pub fn reading(&self) -> Reading {
        let [hum, hum_frac, temp, temp_frac, _] = self.0;
        Reading {
            relative_humidity: hum,
            relative_humidity_fraction: hum_frac,
            temperature: temp,
            temperature_fraction: temp_frac,
        }
    }

    /// Shifts `bit` into the frame at bit position `index` (MSB first).
    ///
    /// Positions past the end of the frame are ignored.
    pub(crate) fn push_bit(&mut self, index: u8, bit: bool) {
        if let Some(byte) = self.0.get_mut(usize::from(index / 8)) {
            *byte = (*byte << 1) | u8::from(bit);
        }
    }
}

impl From<Frame> for Reading {
    fn from(frame: Frame) -> Self {
        frame.reading()
    }
}

/// Reading returned by the DHT11 sensor.
///
/// Values are the raw sensor bytes. The fractional bytes are tenths by
/// convention and are zero on most DHT11 parts.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reading {
    /// Integral part of the relative humidity in percent.
    pub relative_humidity: u8,
    /// Fractional byte of the relative humidity.
    pub relative_humidity_fraction: u8,
    /// Integral part of the temperature in degrees Celsius.
    pub temperature: u8,
    /// Fractional byte of the temperature.
    pub temperature_fraction: u8,
}

impl Reading {
    /// Integral temperature converted to degrees Fahrenheit.
    pub fn fahrenheit(&self) -> f32 {
        f32::from(self.temperature) * 9.0 / 5.0 + 32.0
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}.{} °C ({:.1} °F)",
            self.temperature,
            self.temperature_fraction,
            self.fahrenheit()
        )?;
        write!(
            f,
            "{}.{} % relative humidity",
            self.relative_humidity, self.relative_humidity_fraction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_law() {
        let frame = Frame::from_bytes([0x32, 0x00, 0x18, 0x00, 0x4A]);
        assert_eq!(frame.expected_checksum(), 0x4A);
        assert!(frame.checksum_ok());

        let frame = Frame::from_bytes([0x32, 0x00, 0x18, 0x00, 0x4B]);
        assert!(!frame.checksum_ok());
    }

    #[test]
    fn test_checksum_wraps() {
        // 0xFF + 0xFF + 0x02 + 0x01 = 0x201
        let frame = Frame::from_bytes([0xFF, 0xFF, 0x02, 0x01, 0x01]);
        assert!(frame.checksum_ok());
    }

    #[test]
    fn test_push_bit() {
        let mut frame = Frame::default();
        for (i, bit) in [true, false, true, true, false, false, true, false]
            .into_iter()
            .enumerate()
        {
            frame.push_bit(i as u8 + 8, bit);
        }
        assert_eq!(frame.bytes(), [0, 0b1011_0010, 0, 0, 0]);

        // Out of range positions leave the frame alone.
        frame.push_bit(40, true);
        frame.push_bit(255, true);
        assert_eq!(frame.bytes(), [0, 0b1011_0010, 0, 0, 0]);
    }

    #[test]
    fn test_reading_from_frame() {
        let reading: Reading = Frame::from_bytes([0x32, 0x01, 0x18, 0x02, 0x4D]).into();
        assert_eq!(
            reading,
            Reading {
                relative_humidity: 50,
                relative_humidity_fraction: 1,
                temperature: 24,
                temperature_fraction: 2,
            }
        );
    }

    #[test]
    fn test_fahrenheit() {
        let reading = |temperature| Reading {
            temperature,
            ..Default::default()
        };
        assert_eq!(reading(0).fahrenheit(), 32.0);
        assert_eq!(reading(100).fahrenheit(), 212.0);
        assert!((reading(24).fahrenheit() - 75.2).abs() < 1e-4);
    }

    #[test]
    fn test_console_format() {
        let reading = Frame::from_bytes([0x32, 0x00, 0x18, 0x00, 0x4A]).reading();
        assert_eq!(
            reading.to_string(),
            "24.0 °C (75.2 °F)\n50.0 % relative humidity"
        );
    }

    #[test]
    fn test_console_format_prints_fraction_byte_verbatim() {
        let reading = Reading {
            relative_humidity: 41,
            relative_humidity_fraction: 12,
            temperature: 21,
            temperature_fraction: 3,
        };
        assert_eq!(
            reading.to_string(),
            "21.3 °C (69.8 °F)\n41.12 % relative humidity"
        );
    }
}
