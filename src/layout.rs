pub mod cover;
pub mod fit;
pub mod region;
