//! Runtime configuration for the driver.

/// Protocol timing used by the decoder.
///
/// The tick-based values assume one `delay_us(1)` plus one pin read takes
/// roughly one microsecond. Platforms with slower GPIO access should lower
/// `one_threshold` and `stall_ticks` accordingly.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// How long the host holds the line low to wake the sensor (ms).
    pub start_low_ms: u32,
    /// How long the host drives the line high before releasing it (us).
    pub start_high_us: u32,
    /// Pulses longer than this many ticks decode as a `1` bit.
    pub one_threshold: u8,
    /// A pulse reaching this many ticks ends sampling.
    pub stall_ticks: u8,
    /// Upper bound on the number of pulses sampled per attempt.
    pub max_transitions: u8,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            start_low_ms: 18,
            start_high_us: 40,
            one_threshold: 16,
            stall_ticks: 255,
            max_transitions: 85,
        }
    }
}

/// How [`Dht11::read`](crate::Dht11::read) retries failed attempts.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Give up after this many attempts. `None` retries forever.
    pub max_attempts: Option<u32>,
    /// Pause between attempts (ms).
    pub pause_ms: u32,
}

impl RetryPolicy {
    /// Retry until a valid frame arrives.
    pub const fn forever() -> Self {
        RetryPolicy {
            max_attempts: None,
            pause_ms: 10,
        }
    }

    /// Retry at most `attempts` times in total.
    pub const fn bounded(attempts: u32) -> Self {
        RetryPolicy {
            max_attempts: Some(attempts),
            pause_ms: 10,
        }
    }

    pub const fn with_pause_ms(mut self, pause_ms: u32) -> Self {
        self.pause_ms = pause_ms;
        self
    }

    pub(crate) fn allows(&self, attempt: u32) -> bool {
        self.max_attempts.is_none_or(|max| attempt < max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::forever()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = Timing::default();
        assert_eq!(timing.start_low_ms, 18);
        assert_eq!(timing.one_threshold, 16);
        assert_eq!(timing.stall_ticks, 255);
        assert_eq!(timing.max_transitions, 85);
    }

    #[test]
    fn test_retry_policy_allows() {
        let bounded = RetryPolicy::bounded(3);
        assert!(bounded.allows(0));
        assert!(bounded.allows(2));
        assert!(!bounded.allows(3));

        let forever = RetryPolicy::default();
        assert!(forever.allows(u32::MAX - 1));
        assert_eq!(forever.pause_ms, 10);
        assert_eq!(RetryPolicy::bounded(1).with_pause_ms(250).pause_ms, 250);
    }
}
