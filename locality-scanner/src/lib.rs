pub mod error;
pub mod extractor;
pub mod report;
pub mod resolve;
pub mod result;
pub mod scanner;
pub mod site;

pub use error::ScanError;
pub use result::{DocumentResult, LinkRecord, LocalityCounts, UnclassifiedReference};
pub use scanner::{ProgressCallback, SiteScanner};
