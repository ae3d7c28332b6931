mod http;
mod traits;

pub use http::HttpAnalysisClient;
pub use traits::*;
