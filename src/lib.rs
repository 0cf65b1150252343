#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod cursor;
pub mod display;
pub mod error;
pub mod leds;
pub mod mapper;
pub mod render;
pub mod scene;
pub mod toggle;

pub use error::Error;
