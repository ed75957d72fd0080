// src/common/timing.rs

use core::time::Duration;

// === Bus (fixed by the device) ===

/// SPI clock the device expects. MSB first, mode 3.
pub const BUS_CLOCK_HZ: u32 = 8_000_000;

/// Nominal time to shift one byte at `BUS_CLOCK_HZ`.
pub const BYTE_DURATION: Duration = Duration::from_nanos(8 * 1_000_000_000 / BUS_CLOCK_HZ as u64);

// === Settling ===

/// Time the device needs after a mode or configuration command before it
/// accepts the next one.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

// === Driver defaults ===

/// Time allowed for one non-blocking single-byte transfer to complete.
pub const BYTE_TIMEOUT_DEFAULT: Duration = Duration::from_millis(5);

/// Wall-clock budget for one acquisition, resynchronizations included.
/// A resync costs at least three settle delays.
pub const ACQUIRE_TIMEOUT_DEFAULT: Duration = Duration::from_secs(10);

/// Attempts (full-frame transfers) allowed for one acquisition.
pub const MAX_ATTEMPTS_DEFAULT: u32 = 16;

/// Back-off between polls of a pending single-byte transfer.
pub const POLL_INTERVAL_US: u32 = 10;
