// src/common/error.rs

use super::frame::FrameFault;

#[derive(Debug, thiserror::Error)]
pub enum Tof10Error<E = ()>
where
    E: core::fmt::Debug, // Debug is enough for the Io format string in no_std
{
    /// Underlying bus error from the HAL implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// A single-byte transfer or the whole acquisition ran past its deadline.
    #[error("Operation timed out")]
    Timeout,

    /// Every allowed attempt produced a rejected frame.
    #[error("No valid frame after {attempts} attempts (last fault: {last:?})")]
    AcquireFailed { last: FrameFault, attempts: u32 },

    /// Acquisition deadline passed before a valid frame arrived.
    #[error("Acquisition timed out after {attempts} attempts")]
    AcquireTimeout { attempts: u32 },

    /// `search` consumed its whole byte budget without seeing the marker.
    #[error("Marker {marker:#04x} not found in {scanned} bytes")]
    SearchExhausted { marker: u8, scanned: usize },

    /// Rejected driver configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

impl<E: core::fmt::Debug> From<E> for Tof10Error<E> {
    fn from(e: E) -> Self {
        Tof10Error::Io(e)
    }
}
