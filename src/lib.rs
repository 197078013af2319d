pub mod axes;
pub mod controller;
pub mod gains;

// Reduced-term update paths (P, PI, PD and their feedforward composites)
// extend the controller type from their own file.
mod reduced;

pub use axes::AxisBank;
pub use controller::Pidf;
pub use gains::{ErrorTerms, Gains};
