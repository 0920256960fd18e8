//! PineTime watch face library
//!
//! Formats the time, date and battery charge into label markup and drives
//! it through the watch application lifecycle. Everything here is free of
//! hardware dependencies; the firmware binary (`main.rs`, `device` feature)
//! provides the clock, battery, LCD label and tick scheduling.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), the firmware runs as `no_std`.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

pub mod app;
pub mod battery;
pub mod config;
pub mod locale;
pub mod markup;
pub mod text;
pub mod time;
pub mod ui;

pub use app::{WatchApp, WatchLifecycle};
pub use battery::{BatteryError, BatteryProvider, BatteryStatus};
pub use text::DisplayText;
pub use time::{TimeError, TimeSnapshot};
pub use ui::{
    should_render, OutputSurface, RenderContext, RenderMode, SurfaceError, WatchFace,
    WatchRenderer,
};
