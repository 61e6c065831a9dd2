/// Filesystem adapters for file I/O operations
mod file_writer;
mod image_reader;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use image_reader::ImageFileReader;
