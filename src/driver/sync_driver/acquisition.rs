// src/driver/sync_driver/acquisition.rs

use super::SyncDriver;
use crate::common::{
    error::Tof10Error,
    frame::{FrameBuffer, FrameFault},
    hal_traits::{Tof10Bus, Tof10Timer},
};
use log::{debug, error, warn};

impl<IF> SyncDriver<IF>
where
    IF: Tof10Bus + Tof10Timer,
{
    /// Reads frames until one passes validation.
    ///
    /// A wrong magic byte means host and device lost frame alignment: the
    /// driver resynchronizes and restores the last session before the next
    /// attempt. A sequence mismatch means a torn frame: the driver just reads
    /// again. Bus errors end the acquisition immediately.
    ///
    /// Bounded by `Config::max_attempts` frame reads and, if set,
    /// `Config::acquire_timeout`. A magic fault on the final attempt, or
    /// once the deadline has passed, fails without resynchronizing.
    pub fn acquire(&mut self) -> Result<&FrameBuffer, Tof10Error<IF::Error>> {
        let deadline = self.config.acquire_timeout.map(|t| self.interface.now() + t);
        let mut last_fault: Option<FrameFault> = None;

        for attempt in 1..=self.config.max_attempts {
            if let Some(deadline) = deadline {
                if self.interface.now() >= deadline {
                    error!("Acquisition timed out after {} attempts", attempt - 1);
                    return Err(Tof10Error::AcquireTimeout { attempts: attempt - 1 });
                }
            }

            self.read_frame_raw()?;

            let fault = match self.buffer.validate() {
                Ok(()) => {
                    debug!(
                        "Frame accepted on attempt {} (sequence {:#04x})",
                        attempt,
                        self.buffer.sequence_lead()
                    );
                    return Ok(&self.buffer);
                }
                Err(fault) => fault,
            };
            last_fault = Some(fault);

            if !fault.needs_resync() {
                debug!("Sequence id error {:?} on attempt {}", fault, attempt);
                continue;
            }
            warn!("Magic error {:?} on attempt {}", fault, attempt);

            // Nothing reads after the last attempt or past the deadline.
            let out_of_time = deadline.is_some_and(|d| self.interface.now() >= d);
            if attempt < self.config.max_attempts && !out_of_time {
                let session = self.session;
                self.recover(session)?;
            }
        }

        match last_fault {
            Some(last) => {
                error!(
                    "No valid frame after {} attempts (last fault: {:?})",
                    self.config.max_attempts, last
                );
                Err(Tof10Error::AcquireFailed {
                    last,
                    attempts: self.config.max_attempts,
                })
            }
            None => Err(Tof10Error::InvalidConfig("max_attempts must be at least 1")),
        }
    }
}
