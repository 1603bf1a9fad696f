//! Aggregates the “business logic” layer.

pub mod color;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod geometry;
pub mod numeric;
pub mod partition;
pub mod pass;
pub mod range;

// re-export frequently-used items for convenience
pub use color::{PaletteCycle, Rgba};
pub use config::{Config, ConfigBuilder, ConfigFile, StyleOverrides};
pub use data::{Cell, Table, TableSource};
pub use error::{ConfigError, DatabarError, EmptyRangeError, MalformedTableError};
pub use geometry::{BarSpec, compute_bar};
pub use numeric::{CellValue, extract};
pub use partition::{ColumnGroup, GroupConfig, partition};
pub use pass::{GroupOutcome, PassReport, run_pass};
pub use range::{RangeMetrics, compute_range};
