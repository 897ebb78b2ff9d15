// src/lib.rs

pub mod adapter;
pub mod error;
pub mod mock_exchange;
pub mod model;
pub mod openrtb;

pub use adapter::platformio::{PlatformioAdapter, UsersyncInfo};
pub use error::AdapterError;
