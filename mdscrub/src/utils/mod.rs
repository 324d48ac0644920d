// mdscrub/src/utils/mod.rs
pub mod discovery;
pub mod fs_write;
