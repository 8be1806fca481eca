pub mod file_store;
pub mod index;
pub mod store;
