pub mod config;
pub mod engine;
mod error;
pub mod model;
pub mod provider;

#[cfg(test)]
pub(crate) mod testdata;

pub use config::{
    AccumulationMode, BoundEdge, CellCornerConfigs, CornerConfig, DateBound, FilterMode,
    RoundSelection, Scope, UserFilter,
};
pub use engine::hole_stats::{HoleStats, VenueStats};
pub use engine::{
    compute_cell_corner_values, compute_corner_value, compute_total_corner_values,
    CellCornerValues, CornerContext, CornerValue, DisplayValue,
};
pub use error::Error;
pub use provider::{DatasetProvider, MemoryDataset};
