pub mod fonts;
pub mod shaper;
