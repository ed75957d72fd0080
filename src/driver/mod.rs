// src/driver/mod.rs

// Host-side blocking driver
pub mod sync_driver;

// Re-export the public SyncDriver struct
pub use sync_driver::SyncDriver;
