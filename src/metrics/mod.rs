pub mod band;
pub mod definitions;

pub use band::{band, Band, BandCutoffs, Directionality};
pub use definitions::*;
