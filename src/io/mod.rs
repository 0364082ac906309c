pub mod fs;
pub mod reader;
pub mod writer;

pub use fs::{remove_file_if_exists, write_atomic, StagedFile};
pub use reader::{DocumentReader, ReaderConfig};
pub use writer::{DocumentWriter, WriteResult};
