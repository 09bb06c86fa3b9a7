use thiserror::Error;

pub type VizResult<T> = Result<T, VizError>;

/// Failure reported by a [`crate::api::DataSource`] while fetching a resource.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("resource not found: {path}")]
    NotFound { path: String },

    #[error("failed to read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request for `{path}` failed: {reason}")]
    Network { path: String, reason: String },
}

#[derive(Debug, Error)]
pub enum VizError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("dataset manifest `{path}` is unavailable")]
    ManifestUnavailable {
        path: String,
        #[source]
        source: FetchError,
    },

    #[error("dataset manifest `{path}` is malformed")]
    ManifestInvalid {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("data resource `{path}` is unavailable")]
    DataUnavailable {
        path: String,
        #[source]
        source: FetchError,
    },

    #[error("CSV parse error at byte offset {offset}")]
    CsvParse {
        offset: u64,
        #[source]
        source: csv::Error,
    },

    #[error("invalid region geometry: {0}")]
    InvalidGeometry(String),

    #[error("value `{value}` is not an option of the `{attribute}` filter")]
    InvalidSelection { attribute: String, value: String },

    #[error("no data is loaded into the view")]
    NoDataBound,
}
