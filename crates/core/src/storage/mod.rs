pub mod json_file;
pub mod manager;
pub mod memory;
pub mod repository;
