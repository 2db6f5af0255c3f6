//! Exponential decay time with a linear angular modulation.

use sigpdf_kernel::{DecayModel, Options, Parameters, Result, SignalPdfError};

pub const PARAMETER_TAU: &str = "Test::tau";
pub const PARAMETER_C: &str = "Test::c";

pub const KINEMATICS_DESCRIPTION_T: &str = "decay time in units of the lifetime scale";

/// `f(t, z) = exp(-t / tau) (1 + c z)`.
///
/// Option `model` selects `SM` (default, `c` from [`PARAMETER_C`]) or `Flat`
/// (`c = 0`). `tau` is read from [`PARAMETER_TAU`] and must be positive for
/// the normalization to make sense; that is not checked here.
#[derive(Debug, Clone, Copy)]
pub struct Exponential2D {
    tau: f64,
    c: f64,
}

/// Decay-time integral prepared once per normalization interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeInterval {
    pub weight: f64,
}

impl DecayModel for Exponential2D {
    const DESCRIPTION: &'static str =
        "Exponential decay time times 1 + c z in one angle; used for unit tests only.";

    fn new(parameters: &Parameters, options: &Options) -> Result<Self> {
        let tau = parameters.get_or(PARAMETER_TAU, 1.0);
        let c = match options.get_or("model", "SM") {
            "SM" => parameters.get_or(PARAMETER_C, 0.0),
            "Flat" => 0.0,
            other => {
                return Err(SignalPdfError::InvalidOption {
                    key: "model".to_string(),
                    value: other.to_string(),
                    reason: "expected 'SM' or 'Flat'".to_string(),
                });
            }
        };
        Ok(Self { tau, c })
    }
}

impl Exponential2D {
    pub fn double_differential_decay_width(&self, t: f64, z: f64) -> f64 {
        (-t / self.tau).exp() * (1.0 + self.c * z)
    }

    /// Integrate the time dependence over `[t_min, t_max]`.
    pub fn prepare(&self, t_min: f64, t_max: f64) -> TimeInterval {
        TimeInterval {
            weight: self.tau * ((-t_min / self.tau).exp() - (-t_max / self.tau).exp()),
        }
    }

    pub fn integrated_decay_width(&self, interval: TimeInterval, z_min: f64, z_max: f64) -> f64 {
        interval.weight * ((z_max - z_min) + 0.5 * self.c * (z_max.powi(2) - z_min.powi(2)))
    }
}
