pub mod area;
pub mod engine;
pub mod file;
pub mod memory;

pub use area::{EXTERNAL_WRITER, ListenerGuard, StorageArea, StorageEvent, ViewId};
pub use engine::StorageBackend;
pub use file::FileStorage;
pub use memory::InMemoryStorage;
