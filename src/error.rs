use core::fmt;

/// Possible errors from the DHT11 driver.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum DhtError<E> {
    /// The line stalled before the sensor sent a single data bit.
    Timeout,
    /// The line stalled after fewer than 40 data bits.
    Incomplete {
        /// Number of data bits captured before the stall.
        bits: u8,
    },
    /// Checksum did not match the received data.
    ChecksumMismatch,
    /// Error from the GPIO pin (input/output).
    PinError(E),
}

impl<E> DhtError<E> {
    /// Whether another attempt may succeed.
    ///
    /// Framing failures come from electrical noise or a sensor that was not
    /// ready yet; pin errors come from the platform and are returned as-is.
    pub fn is_transient(&self) -> bool {
        !matches!(self, DhtError::PinError(_))
    }
}

impl<E> From<E> for DhtError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}

impl<E: fmt::Debug> fmt::Display for DhtError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DhtError::Timeout => f.write_str("no response from sensor"),
            DhtError::Incomplete { bits } => write!(f, "frame cut short after {bits} of 40 bits"),
            DhtError::ChecksumMismatch => f.write_str("checksum mismatch"),
            DhtError::PinError(e) => write!(f, "pin error: {e:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pin_errors_are_fatal() {
        assert!(DhtError::<()>::Timeout.is_transient());
        assert!(DhtError::<()>::Incomplete { bits: 12 }.is_transient());
        assert!(DhtError::<()>::ChecksumMismatch.is_transient());
        assert!(!DhtError::PinError(()).is_transient());
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            DhtError::<()>::Incomplete { bits: 33 }.to_string(),
            "frame cut short after 33 of 40 bits"
        );
        assert_eq!(DhtError::PinError(7u8).to_string(), "pin error: 7");
    }
}
