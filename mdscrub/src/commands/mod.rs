// mdscrub/src/commands/mod.rs
pub mod prep;
