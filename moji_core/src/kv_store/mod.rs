pub mod handler;
pub mod storage;
