pub mod docx_writer;
pub mod http_fetcher;

pub use docx_writer::{write_docx, DocBlock, ImageData};
pub use http_fetcher::HttpFetcher;
