// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod config;
pub mod decode;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From command.rs
pub use command::{encode, Command, CommandId, Distance, Mode, Power, Rate};

// From config.rs
pub use config::{Config, SessionState};

// From decode.rs
pub use decode::{decode_intensity, decode_range, intensity_raw};

// From error.rs
pub use error::Tof10Error;

// From frame.rs
pub use frame::{validate, FrameBuffer, FrameFault, FRAME_SIZE, PIXELS};

// From hal_traits.rs
pub use hal_traits::{Tof10Bus, Tof10Instant, Tof10Timer};

#[cfg(feature = "impl-native")]
pub use hal_traits::{AccumulatedInstant, NativeInterface};

// From types.rs
pub use types::{Measurement, PixelGrid};
