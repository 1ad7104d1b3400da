//! canvas-charts: layout, scale fitting and animated elements for 2D charts.
//!
//! The crate covers the parts every chart type shares: fitting a "nice"
//! value range to the available pixels, sizing rectangular and radial axes
//! around their labels, and the point/arc/bar elements that animate between
//! saved and target states and answer hit tests. Drawing goes through the
//! [`render::DrawingContext`] trait, so layout runs headless and a Cairo
//! backend is available behind the `cairo-backend` feature.

pub mod api;
pub mod core;
pub mod element;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ConfigOverrides, resolve_config};
pub use error::{ChartError, ChartResult};
