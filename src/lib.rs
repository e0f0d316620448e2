mod aircon;
mod client;
mod error;
mod protocol;
mod types;

pub use aircon::{Aircon, AirconBuilder, DEFAULT_THRESHOLD_C};
pub use client::DeviceClient;
pub use error::{Error, Result};
pub use types::*;
