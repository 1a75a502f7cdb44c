pub mod console;
pub mod export;
pub mod service;
pub mod summary;
