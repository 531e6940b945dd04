mod config;
mod persistence;
mod storage;

pub use config::{Configuration, DEFAULT_CANVAS_SIZE};
pub use persistence::{ConfigSnapshot, PersistenceError, PersistenceResult};
pub use storage::Storage;
