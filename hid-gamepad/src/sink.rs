//! Report sink trait and error types.

use core::future::Future;
use hid_gamepad_proto::GamepadReport;

/// Error type for report transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not enumerated).
    NotReady,
    /// Report rejected by the transport and will not be delivered.
    Dropped,
    /// Endpoint busy.
    Busy,
}

impl SinkError {
    /// Whether the same report may succeed if sent again a little later.
    #[inline]
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Io | Self::NotReady | Self::Busy)
    }
}

impl core::fmt::Display for SinkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "I/O error"),
            Self::NotReady => write!(f, "device not ready"),
            Self::Dropped => write!(f, "report dropped"),
            Self::Busy => write!(f, "endpoint busy"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SinkError {}

/// Async trait for the transport that carries gamepad reports to the host.
///
/// This is the only capability the encoder needs from the transport: device
/// discovery and descriptor registration happen elsewhere.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ReportSink {
    /// Send one 9-byte report.
    ///
    /// May block until the previous report has been sent.
    fn send_report(&mut self, report: &GamepadReport)
        -> impl Future<Output = Result<(), SinkError>>;
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn send_report(
        &mut self,
        report: &GamepadReport,
    ) -> impl Future<Output = Result<(), SinkError>> {
        (**self).send_report(report)
    }
}
