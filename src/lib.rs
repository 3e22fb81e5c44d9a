//! Averaging of an analog Hall-effect sensor for small displays.
//!
//! Two independent pipelines read the sensor through an `embedded-hal`
//! [`OneShot`](embedded_hal::adc::OneShot) ADC:
//!
//! - [`BatchSampler`] takes a batch of samples spaced by a read interval
//!   without ever blocking, averages them and feeds a scrolling graph
//!   through a [`GraphRenderer`] whenever the average changes.
//! - [`RollingAverager`] takes a burst of samples with a short blocking
//!   delay between them, suppresses the sensor's noise floor and reports
//!   the mean both in ADC units and in volts for a [`MeterRenderer`].
//!
//! Drawing is left to the board. [`GraphLayout`] and [`MeterZones`] only
//! compute where things go.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

mod batch;
mod config;
mod graph;
mod history;
mod interpolate;
mod interval;
mod meter;
mod render;
mod rolling;
#[cfg(test)]
mod testing;
mod window;

pub use batch::{BatchSampler, Event, State, Step};
pub use config::{AdcConfig, AveragerConfig, BatchConfig, BATCH_LEN, HISTORY_LEN, ROLLING_LEN};
pub use graph::{GraphLayout, Point};
pub use history::GraphHistory;
pub use interpolate::{map, map_f32};
pub use interval::Interval;
pub use meter::{MeterZones, Zone, ZoneKind, MAX_ZONES};
pub use render::{GraphRenderer, MeterRenderer};
pub use rolling::{clamp_noise, Reading, RollingAverager};
pub use window::{mean, SampleWindow};
