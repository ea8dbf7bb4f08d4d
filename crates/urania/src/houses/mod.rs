pub mod calculator;
pub mod system;

pub use calculator::{compute_houses, whole_sign_cusps, ChartAngles, HouseCalculation, HouseCusps, HouseError};
pub use system::HouseSystem;
