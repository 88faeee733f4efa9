use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

use crate::config::{RetryPolicy, Timing};
use crate::error::DhtError;
use crate::frame::{FRAME_BITS, Frame, Reading};

/// Pulses sent before the first data bit: the host release, then the
/// sensor's 80us low and 80us high acknowledgement, then the low separator
/// of the first bit.
const PREAMBLE_TRANSITIONS: u8 = 4;

/// A pulse measured on the data line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pulse {
    /// Duration in ticks (one `delay_us(1)` per tick).
    ticks: u8,
    /// Level that ended the pulse.
    level_high: bool,
}

/// Driver for the DHT11 temperature and humidity sensor.
///
/// The pin must be usable as open-drain: driving it low pulls the line
/// down, driving it high releases the line to the pull-up so the sensor
/// can answer.
pub struct Dht11<PIN, D> {
    pin: PIN,
    delay: D,
    timing: Timing,
}

impl<PIN, DELAY, E> Dht11<PIN, DELAY>
where
    PIN: InputPin<Error = E> + OutputPin<Error = E>,
    DELAY: DelayNs,
{
    /// Creates a new instance of the DHT11 driver with default timing.
    ///
    /// # Arguments
    ///
    /// * `pin` - The GPIO pin connected to the DHT11 data line. Must support both input and output.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    pub fn new(pin: PIN, delay: DELAY) -> Self {
        Self::with_timing(pin, delay, Timing::default())
    }

    /// Creates a driver with timing recalibrated for the platform.
    pub fn with_timing(pin: PIN, delay: DELAY, timing: Timing) -> Self {
        Dht11 { pin, delay, timing }
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Gives back the pin and the delay provider.
    pub fn release(self) -> (PIN, DELAY) {
        (self.pin, self.delay)
    }

    /// Reads the sensor, retrying failed attempts according to `policy`.
    ///
    /// At least one attempt is always made. The driver sleeps for
    /// `policy.pause_ms` between attempts.
    ///
    /// # Returns
    ///
    /// * `Ok(Reading)` from the first valid frame.
    /// * `Err(DhtError::PinError)` as soon as the pin fails.
    /// * The last transient error once `policy.max_attempts` is exhausted.
    pub fn read(&mut self, policy: &RetryPolicy) -> Result<Reading, DhtError<E>> {
        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            match self.attempt_read() {
                Ok(frame) => return Ok(frame.reading()),
                Err(err) if err.is_transient() && policy.allows(attempt) => {
                    debug!("attempt {} failed, retrying", attempt);
                    self.delay.delay_ms(policy.pause_ms);
                }
                Err(err) => {
                    if err.is_transient() {
                        warn!("giving up after {} attempts", attempt);
                    }
                    return Err(err);
                }
            }
        }
    }

    /// Performs one complete acquisition of a sensor frame.
    ///
    /// Wakes the sensor, times every pulse on the line and decodes the
    /// data pulses into 40 bits. Sampling ends after
    /// `timing.max_transitions` pulses or at the first pulse reaching
    /// `timing.stall_ticks`.
    ///
    /// # Returns
    ///
    /// * `Ok(Frame)` if 40 bits were captured and the checksum is valid.
    /// * `Err(DhtError)` otherwise. No partial frame is ever returned.
    pub fn attempt_read(&mut self) -> Result<Frame, DhtError<E>> {
        self.start()?;

        let mut frame = Frame::default();
        let mut bits: u8 = 0;
        let mut level_high = true;

        for i in 0..self.timing.max_transitions {
            let Some(pulse) = self.measure_pulse(level_high)? else {
                trace!("line stalled at transition {}", i);
                break;
            };
            level_high = pulse.level_high;

            // Only the high half of each bit carries data.
            if i >= PREAMBLE_TRANSITIONS && i % 2 == 0 && bits < FRAME_BITS {
                frame.push_bit(bits, pulse.ticks > self.timing.one_threshold);
                bits += 1;
            }
        }

        match bits {
            0 => Err(DhtError::Timeout),
            bits if bits < FRAME_BITS => {
                debug!("short frame: {} bits", bits);
                Err(DhtError::Incomplete { bits })
            }
            _ if !frame.checksum_ok() => {
                debug!(
                    "checksum mismatch: got {=u8:#x}, expected {=u8:#x}",
                    frame.bytes()[4],
                    frame.expected_checksum()
                );
                Err(DhtError::ChecksumMismatch)
            }
            _ => Ok(frame),
        }
    }

    /// Sends the start signal and releases the line for the response.
    ///
    /// The line is held low for at least 18 ms so the sensor registers the
    /// request, then driven high for ~40us. Leaving an open-drain pin high
    /// hands the line over to the sensor.
    fn start(&mut self) -> Result<(), DhtError<E>> {
        self.pin.set_low()?;
        self.delay.delay_ms(self.timing.start_low_ms);
        self.pin.set_high()?;
        self.delay.delay_us(self.timing.start_high_us);
        Ok(())
    }

    /// Counts ticks while the line stays at the given level.
    ///
    /// Returns `None` once the count reaches `timing.stall_ticks`.
    fn measure_pulse(&mut self, level_high: bool) -> Result<Option<Pulse>, DhtError<E>> {
        let mut ticks: u8 = 0;
        loop {
            let now_high = self.pin.is_high()?;
            if now_high != level_high {
                return Ok(Some(Pulse {
                    ticks,
                    level_high: now_high,
                }));
            }
            ticks += 1;
            self.delay.delay_us(1);
            if ticks >= self.timing.stall_ticks {
                return Ok(None);
            }
        }
    }
}
