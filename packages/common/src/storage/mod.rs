mod error;
mod traits;

pub mod filesystem;
pub mod key;
pub mod memory;

pub use error::StorageError;
pub use filesystem::FilesystemObjectStore;
pub use memory::MemoryObjectStore;
pub use traits::{BoxReader, HttpMetadata, ObjectInfo, ObjectStore, PutOptions, reader_from_bytes};
