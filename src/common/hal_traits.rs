// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// A point in time as seen by the driver's timer.
pub trait Tof10Instant: Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration> {}

impl<T> Tof10Instant for T where
    T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for timer/delay operations required by the sensor.
pub trait Tof10Timer {
    type Instant: Tof10Instant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Current time, monotonic.
    fn now(&self) -> Self::Instant;
}

/// Abstraction for the duplex, byte-clocked bus the sensor sits on.
///
/// The bus must already be configured for 8 MHz, MSB first, SPI mode 3.
pub trait Tof10Bus {
    /// Associated error type for bus errors.
    type Error: Debug;

    /// Shifts `byte` out and returns the byte shifted in.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if the transfer has not completed yet.
    /// The driver polls until it completes or the per-byte timeout passes.
    fn transfer_byte(&mut self, byte: u8) -> nb::Result<u8, Self::Error>;

    /// Shifts `buffer` out while overwriting it with the bytes shifted in.
    /// Blocks until the whole buffer has been exchanged.
    fn transfer_in_place(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error>;
}

#[cfg(feature = "impl-native")]
pub use native::{AccumulatedInstant, NativeInterface};

#[cfg(feature = "impl-native")]
mod native {
    use super::{Tof10Bus, Tof10Timer};
    use crate::common::timing;
    use core::cell::Cell;
    use core::ops::{Add, Sub};
    use core::time::Duration;
    use embedded_hal::delay::DelayNs;
    use embedded_hal::spi::SpiBus;

    /// Microseconds of bus time and delays issued through a [`NativeInterface`].
    ///
    /// `embedded-hal` has no clock trait, so time spent outside the driver is
    /// not counted. Good enough to bound an acquisition.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
    pub struct AccumulatedInstant(pub u64);

    impl Add<Duration> for AccumulatedInstant {
        type Output = Self;
        fn add(self, rhs: Duration) -> Self {
            AccumulatedInstant(self.0.saturating_add(rhs.as_micros() as u64))
        }
    }

    impl Sub<AccumulatedInstant> for AccumulatedInstant {
        type Output = Duration;
        fn sub(self, rhs: AccumulatedInstant) -> Duration {
            Duration::from_micros(self.0.saturating_sub(rhs.0))
        }
    }

    /// Adapts any `embedded_hal` 1.0 `SpiBus` + `DelayNs` pair to the driver traits.
    #[derive(Debug)]
    pub struct NativeInterface<SPI, D> {
        spi: SPI,
        delay: D,
        elapsed_us: Cell<u64>,
    }

    impl<SPI, D> NativeInterface<SPI, D>
    where
        SPI: SpiBus<u8>,
        D: DelayNs,
    {
        pub fn new(spi: SPI, delay: D) -> Self {
            NativeInterface {
                spi,
                delay,
                elapsed_us: Cell::new(0),
            }
        }

        /// Gives back the bus and the delay provider.
        pub fn release(self) -> (SPI, D) {
            (self.spi, self.delay)
        }

        fn advance(&self, us: u64) {
            self.elapsed_us.set(self.elapsed_us.get().saturating_add(us));
        }
    }

    impl<SPI, D> Tof10Timer for NativeInterface<SPI, D>
    where
        SPI: SpiBus<u8>,
        D: DelayNs,
    {
        type Instant = AccumulatedInstant;

        fn delay_us(&mut self, us: u32) {
            self.delay.delay_us(us);
            self.advance(u64::from(us));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.delay.delay_ms(ms);
            self.advance(u64::from(ms) * 1000);
        }

        fn now(&self) -> Self::Instant {
            AccumulatedInstant(self.elapsed_us.get())
        }
    }

    impl<SPI, D> Tof10Bus for NativeInterface<SPI, D>
    where
        SPI: SpiBus<u8>,
        D: DelayNs,
    {
        type Error = SPI::Error;

        fn transfer_byte(&mut self, byte: u8) -> nb::Result<u8, Self::Error> {
            let mut buf = [byte];
            self.spi.transfer_in_place(&mut buf).map_err(nb::Error::Other)?;
            self.spi.flush().map_err(nb::Error::Other)?;
            self.advance(timing::BYTE_DURATION.as_micros() as u64);
            Ok(buf[0])
        }

        fn transfer_in_place(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error> {
            self.spi.transfer_in_place(buffer)?;
            self.spi.flush()?;
            self.advance(timing::BYTE_DURATION.as_micros() as u64 * buffer.len() as u64);
            Ok(())
        }
    }

}
