//! Angular distribution with a forward-backward asymmetry.

use sigpdf_kernel::{DecayModel, Options, Parameters, Result, SignalPdfError};

/// Parameter holding the forward-backward asymmetry.
pub const PARAMETER_A_FB: &str = "Test::A_FB";

/// `f(z) = 3/8 (1 + z²) + A_FB z`, unit-normalized on `[-1, 1]`.
///
/// Option `cp-conjugate` (`false` by default) flips the sign of `A_FB`.
#[derive(Debug, Clone, Copy)]
pub struct ForwardBackward1D {
    a_fb: f64,
}

impl DecayModel for ForwardBackward1D {
    const DESCRIPTION: &'static str =
        "Angular distribution 3/8 (1 + z^2) + A_FB z; used for unit tests only.";

    fn new(parameters: &Parameters, options: &Options) -> Result<Self> {
        let a_fb = parameters.get_or(PARAMETER_A_FB, 0.0);
        let sign = match options.get_or("cp-conjugate", "false") {
            "false" => 1.0,
            "true" => -1.0,
            other => {
                return Err(SignalPdfError::InvalidOption {
                    key: "cp-conjugate".to_string(),
                    value: other.to_string(),
                    reason: "expected 'true' or 'false'".to_string(),
                });
            }
        };
        Ok(Self { a_fb: sign * a_fb })
    }
}

impl ForwardBackward1D {
    pub fn a_fb(&self) -> f64 {
        self.a_fb
    }

    pub fn differential_decay_width(&self, z: f64) -> f64 {
        3.0 / 8.0 * (1.0 + z * z) + self.a_fb * z
    }

    pub fn integrated_decay_width(&self, z_min: f64, z_max: f64) -> f64 {
        3.0 / 8.0 * ((z_max - z_min) + (z_max.powi(3) - z_min.powi(3)) / 3.0)
            + 0.5 * self.a_fb * (z_max.powi(2) - z_min.powi(2))
    }
}
