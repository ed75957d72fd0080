// src/driver/sync_driver/mod.rs

use crate::common::{
    config::{Config, SessionState},
    error::Tof10Error,
    frame::FrameBuffer,
    hal_traits::{Tof10Bus, Tof10Timer},
};

mod acquisition;
mod configuration;
mod io_helpers;
mod measurement;

#[cfg(test)]
mod mock;

/// Blocking driver for one MM-ToF10 sensor on a dedicated bus.
///
/// Every bus operation takes `&mut self`; share a driver between threads
/// only behind a mutex held for a whole acquire-and-decode call.
#[derive(Debug)]
pub struct SyncDriver<IF>
where
    IF: Tof10Bus + Tof10Timer,
{
    interface: IF,
    config: Config,
    session: SessionState,
    buffer: FrameBuffer,
}

impl<IF> SyncDriver<IF>
where
    IF: Tof10Bus + Tof10Timer,
{
    /// Creates a driver without touching the bus.
    ///
    /// The device is assumed to be in sync mode; call [`init`](Self::init)
    /// before reading measurements.
    pub fn new(interface: IF, config: Config) -> Result<Self, Tof10Error<IF::Error>> {
        config.validate::<IF::Error>()?;
        Ok(SyncDriver {
            interface,
            session: SessionState::from(&config),
            config,
            buffer: FrameBuffer::new(),
        })
    }

    /// Current session state.
    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Contents of the most recent transfer.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Gives back the interface.
    pub fn release(self) -> IF {
        self.interface
    }
}
