pub mod file;
pub mod location;
pub mod navigation;
pub mod storage;
