//! Analytic test models backing the catalog.

mod exponential;
mod forward_backward;
mod legendre;

pub use exponential::{
    Exponential2D, KINEMATICS_DESCRIPTION_T, PARAMETER_C, PARAMETER_TAU, TimeInterval,
};
pub use forward_backward::{ForwardBackward1D, PARAMETER_A_FB};
pub use legendre::Legendre1D;

/// Description of the helicity-angle cosine shared by the angular models.
pub const KINEMATICS_DESCRIPTION_Z: &str = "cosine of the helicity angle";
