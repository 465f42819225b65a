pub mod series_client;

pub use series_client::SeriesClient;
