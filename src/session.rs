pub mod gestures;
pub mod intake;
pub mod state;
