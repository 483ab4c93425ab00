pub mod generation;
pub mod segmentation;
pub mod server;
pub mod storage;

pub use generation::GenerationConfig;
pub use segmentation::SegmentationConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;
