//! Host-facing configuration: global defaults, chart-type layers and the
//! merge that turns them into scale and element options.

mod config;

pub use config::{ChartConfig, ConfigOverrides, resolve_config};
