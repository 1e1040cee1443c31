use clima_core::GeoPoint;
use time::Date;

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}: {1}")]
    NetworkRequest(String, #[source] reqwest_middleware::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Download or decompression failed for {0}: {1}")]
    DownloadIo(String, #[source] std::io::Error),

    #[error("Failed to parse station list: {0}")]
    StationParse(#[from] serde_json::Error),

    #[error("Failed to parse daily data for station '{station}': {source}")]
    CsvParse {
        station: String,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid period: start {start} is after end {end}")]
    InvalidPeriod { start: Date, end: Date },

    #[error("No station with daily data within {radius_km} km of {point}")]
    NoStationsNearby { point: GeoPoint, radius_km: f64 },

    #[error("No daily data between {start} and {end} near {point}")]
    NoData {
        point: GeoPoint,
        start: Date,
        end: Date,
    },
}
