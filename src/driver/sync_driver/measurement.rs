// src/driver/sync_driver/measurement.rs

use super::SyncDriver;
use crate::common::{
    decode,
    error::Tof10Error,
    hal_traits::{Tof10Bus, Tof10Timer},
    types::{Measurement, PixelGrid},
};

// Every read performs its own acquisition. Use `read_measurement` to get
// all fields from a single frame.
impl<IF> SyncDriver<IF>
where
    IF: Tof10Bus + Tof10Timer,
{
    /// Scalar range. Same as [`read_range`](Self::read_range).
    pub fn read(&mut self) -> Result<f32, Tof10Error<IF::Error>> {
        self.read_range()
    }

    /// Scalar range from a fresh frame.
    pub fn read_range(&mut self) -> Result<f32, Tof10Error<IF::Error>> {
        let frame = self.acquire()?;
        Ok(decode::range(frame.as_bytes()))
    }

    /// Scalar reflected intensity from a fresh frame.
    pub fn read_intensity(&mut self) -> Result<f32, Tof10Error<IF::Error>> {
        let frame = self.acquire()?;
        Ok(decode::intensity(frame.as_bytes()))
    }

    /// Per-pixel range from a fresh frame.
    pub fn read_range_grid(&mut self) -> Result<PixelGrid<f32>, Tof10Error<IF::Error>> {
        let frame = self.acquire()?;
        Ok(PixelGrid::from_cells(decode::range_grid(frame.as_bytes())))
    }

    /// Per-pixel intensity from a fresh frame, decoded like the scalar intensity.
    pub fn read_intensity_grid(&mut self) -> Result<PixelGrid<f32>, Tof10Error<IF::Error>> {
        let frame = self.acquire()?;
        Ok(PixelGrid::from_cells(decode::intensity_grid(frame.as_bytes())))
    }

    /// Per-pixel intensity words with the padding nibble removed (`raw / 16`),
    /// without splitting off the fractional part.
    pub fn read_intensity_grid_raw(&mut self) -> Result<PixelGrid<u16>, Tof10Error<IF::Error>> {
        let frame = self.acquire()?;
        Ok(PixelGrid::from_cells(decode::intensity_grid_raw(frame.as_bytes())))
    }

    /// Per-pixel status bytes from a fresh frame.
    pub fn read_status_grid(&mut self) -> Result<PixelGrid<u8>, Tof10Error<IF::Error>> {
        let frame = self.acquire()?;
        Ok(PixelGrid::from_cells(decode::status_grid(frame.as_bytes())))
    }

    /// Every field of one fresh frame.
    pub fn read_measurement(&mut self) -> Result<Measurement, Tof10Error<IF::Error>> {
        let frame = self.acquire()?;
        Ok(Measurement::from_frame(frame.as_bytes()))
    }
}
