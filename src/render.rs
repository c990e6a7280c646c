pub mod composer;
pub mod gradient;
pub mod preview;
pub mod surface;
