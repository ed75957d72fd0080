// src/driver/sync_driver/io_helpers.rs

use super::SyncDriver;
use crate::common::{
    command::Command,
    error::Tof10Error,
    frame::FRAME_SIZE,
    hal_traits::{Tof10Bus, Tof10Timer},
    timing,
};
use core::time::Duration;
use log::debug;

/// Byte shifted out while discarding.
const FILL_BYTE: u8 = 0x00;

impl<IF> SyncDriver<IF>
where
    IF: Tof10Bus + Tof10Timer,
{
    /// Executes a non-blocking bus operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a timeout error.
    pub(super) fn execute_blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout: Duration,
        mut f: FN,
    ) -> Result<T, Tof10Error<IF::Error>>
    where
        FN: FnMut(&mut IF) -> nb::Result<T, IF::Error>,
    {
        let deadline = self.interface.now() + timeout;

        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(Tof10Error::Timeout);
                    }
                    self.interface.delay_us(timing::POLL_INTERVAL_US);
                }
                Err(nb::Error::Other(e)) => return Err(Tof10Error::Io(e)),
            }
        }
    }

    /// One single-byte duplex transfer.
    pub(super) fn transfer_byte(&mut self, out: u8) -> Result<u8, Tof10Error<IF::Error>> {
        let timeout = self.config.byte_timeout;
        self.execute_blocking_io_with_timeout(timeout, |iface| iface.transfer_byte(out))
    }

    /// Clocks one full frame of fill bytes and keeps what the device sent.
    pub(super) fn read_frame_raw(&mut self) -> Result<(), Tof10Error<IF::Error>> {
        self.buffer.clear();
        self.interface.transfer_in_place(self.buffer.as_mut_bytes())?;
        Ok(())
    }

    /// Waits out the device's settle time, down to the microsecond.
    pub(super) fn settle(&mut self) {
        let delay = self.config.settle_delay;
        let ms = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        if ms > 0 {
            self.interface.delay_ms(ms);
        }
        let us = delay.subsec_micros() % 1_000;
        if us > 0 {
            self.interface.delay_us(us);
        }
    }

    /// Encodes `command` as a full frame and sends it. The received bytes
    /// replace the buffer contents and are not inspected.
    pub fn send(&mut self, command: Command) -> Result<(), Tof10Error<IF::Error>> {
        debug!("Sending {}", command);
        command.encode_into(self.buffer.as_mut_bytes());
        self.interface.transfer_in_place(self.buffer.as_mut_bytes())?;
        Ok(())
    }

    /// Discards `count` bytes with single-byte transfers.
    pub fn skip(&mut self, count: usize) -> Result<(), Tof10Error<IF::Error>> {
        for _ in 0..count {
            self.transfer_byte(FILL_BYTE)?;
        }
        Ok(())
    }

    /// Discards one full frame.
    pub fn skip_frame(&mut self) -> Result<(), Tof10Error<IF::Error>> {
        self.skip(FRAME_SIZE)
    }

    /// Reads a length byte, then discards that many bytes.
    ///
    /// Returns the length read.
    pub fn skip_filler(&mut self) -> Result<usize, Tof10Error<IF::Error>> {
        let count = usize::from(self.transfer_byte(FILL_BYTE)?);
        debug!("Skipping {} filler bytes", count);
        self.skip(count)?;
        Ok(count)
    }

    /// Discards bytes until `marker` is received, scanning at most `budget` bytes.
    ///
    /// Returns how many bytes preceded the marker.
    pub fn search(&mut self, marker: u8, budget: usize) -> Result<usize, Tof10Error<IF::Error>> {
        for scanned in 0..budget {
            if self.transfer_byte(FILL_BYTE)? == marker {
                debug!("Found marker {:#04x} after {} bytes", marker, scanned);
                return Ok(scanned);
            }
        }
        Err(Tof10Error::SearchExhausted {
            marker,
            scanned: budget,
        })
    }
}
