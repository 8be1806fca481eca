pub mod audit;
pub mod config;
pub mod court;
pub mod determinism;
pub mod storage;

pub mod error;
