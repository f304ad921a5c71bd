// src/file/mod.rs
use std::path::Path;

pub mod dataset;

pub use dataset::{DatasetError, DatasetLoader};

// Core trait for file operations
pub trait FileHandler<T> {
    type Error;

    fn load(&self, path: &Path) -> Result<T, Self::Error>;
}
