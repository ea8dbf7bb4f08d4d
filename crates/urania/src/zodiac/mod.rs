pub mod house;
pub mod labels;
pub mod sign;

pub use house::{house_midpoint, house_of, in_circular_interval};
pub use labels::Language;
pub use sign::{normalize_degrees, sign_of, ZodiacPosition, SIGN_SPAN};
