pub mod dataset;
pub mod loader;
pub mod reader;
pub mod response;
pub mod store;

pub use dataset::Dataset;
pub use loader::{GraphLoader, LoadReport};
pub use reader::AnalyticsReader;
pub use store::GraphStore;
