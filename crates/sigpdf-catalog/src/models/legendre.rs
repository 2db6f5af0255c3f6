//! Second-order Legendre polynomial in one angle.

use sigpdf_kernel::{DecayModel, Options, Parameters, Result};

/// `f(z) = 9 + 8 z + 9 z²`, i.e. `24 (1/2 L0 + 1/3 L1 + 1/4 L2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Legendre1D;

impl DecayModel for Legendre1D {
    const DESCRIPTION: &'static str = "1D PDF up to 2nd order in z; used for unit tests only.";

    fn new(_parameters: &Parameters, _options: &Options) -> Result<Self> {
        Ok(Self)
    }
}

impl Legendre1D {
    pub fn pdf(&self, z: f64) -> f64 {
        9.0 + 8.0 * z + 9.0 * z * z
    }

    pub fn norm(&self, z_min: f64, z_max: f64) -> f64 {
        9.0 * (z_max - z_min)
            + 4.0 * (z_max.powi(2) - z_min.powi(2))
            + 3.0 * (z_max.powi(3) - z_min.powi(3))
    }
}
