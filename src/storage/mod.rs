mod blob;
mod errors;
mod types;

pub use blob::FileStore;
pub use errors::StorageError;
pub use types::{DataStore, connect};
