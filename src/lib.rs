// src/lib.rs

#![cfg_attr(not(test), no_std)]

pub mod common;
pub mod driver;

// Re-export key types for convenience
pub use common::{Config, Distance, Measurement, PixelGrid, Rate, Tof10Error};
pub use driver::SyncDriver;
