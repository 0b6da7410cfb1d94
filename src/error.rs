#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("Percentile is required when accumulating by percentile")]
    MissingPercentile,
    #[error("Percentile must be between 0 and 99, got {0}")]
    PercentileOutOfRange(u8),
    #[error("Selection count {count} outside supported range {min}..={max}")]
    SelectionCountOutOfRange { count: u8, min: u8, max: u8 },
    #[error("Hole scope requires a hole number")]
    MissingHoleNumber,
    #[error("Dataset provider failure: {0}")]
    Provider(String),
}
