pub mod archive;
pub mod jpeg;
