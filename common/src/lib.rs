pub mod audio;
pub mod config;
pub mod games;
pub mod input;
pub mod logger;
pub mod records;
mod defaults;

pub use defaults::*;
