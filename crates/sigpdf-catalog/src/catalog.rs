//! The registration table of all known signal PDFs.

use crate::models::{
    Exponential2D, ForwardBackward1D, KINEMATICS_DESCRIPTION_T, KINEMATICS_DESCRIPTION_Z,
    Legendre1D,
};
use sigpdf_kernel::{
    KinematicRange, Options, QualifiedName, Result, SignalPdfEntry, make_signal_pdf,
};
use std::sync::Arc;

/// Register every known signal PDF.
///
/// Any registration error aborts the whole table; a partial catalog is never
/// returned.
pub fn signal_pdf_entries() -> Result<Vec<(QualifiedName, Arc<dyn SignalPdfEntry>)>> {
    let exponential_norm =
        |decay: &Exponential2D, t_min: f64, t_max: f64, z_min: f64, z_max: f64| {
            decay.integrated_decay_width(decay.prepare(t_min, t_max), z_min, z_max)
        };

    Ok(vec![
        /* Internal tests */
        make_signal_pdf(
            "Test::Legendre1D",
            Options::new(),
            Legendre1D::pdf,
            [KinematicRange::new("z", -1.0, 1.0, "")],
            Legendre1D::norm,
            ["z_min", "z_max"],
        )?,
        make_signal_pdf(
            "Test::ForwardBackward1D",
            Options::new().with("cp-conjugate", "false"),
            ForwardBackward1D::differential_decay_width,
            [KinematicRange::new("cos(theta_l)", -1.0, 1.0, KINEMATICS_DESCRIPTION_Z)],
            ForwardBackward1D::integrated_decay_width,
            ["cos(theta_l)_min", "cos(theta_l)_max"],
        )?,
        make_signal_pdf(
            "Test::Exponential2D@Factorized",
            Options::new().with("model", "SM"),
            Exponential2D::double_differential_decay_width,
            [
                KinematicRange::new("t", 0.0, 10.0, KINEMATICS_DESCRIPTION_T),
                KinematicRange::new("cos(theta_l)", -1.0, 1.0, KINEMATICS_DESCRIPTION_Z),
            ],
            exponential_norm,
            ["t_min", "t_max", "cos(theta_l)_min", "cos(theta_l)_max"],
        )?,
        make_signal_pdf(
            "Test::Exponential2D@Flat",
            Options::new().with("model", "Flat"),
            Exponential2D::double_differential_decay_width,
            [
                KinematicRange::new("t", 0.0, 10.0, KINEMATICS_DESCRIPTION_T),
                KinematicRange::new("cos(theta_l)", -1.0, 1.0, KINEMATICS_DESCRIPTION_Z),
            ],
            exponential_norm,
            ["t_min", "t_max", "cos(theta_l)_min", "cos(theta_l)_max"],
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn every_entry_registers() {
        let entries = signal_pdf_entries().unwrap();
        assert_eq!(entries.len(), 4);
        let names: BTreeSet<String> = entries.iter().map(|(qn, _)| qn.to_string()).collect();
        assert_eq!(names.len(), entries.len(), "duplicate registration names");
    }

    #[test]
    fn registration_is_deterministic() {
        let first = signal_pdf_entries().unwrap();
        let second = signal_pdf_entries().unwrap();
        for ((qa, ea), (qb, eb)) in first.iter().zip(second.iter()) {
            assert_eq!(qa, qb);
            assert_eq!(ea.kinematic_ranges(), eb.kinematic_ranges());
            assert_eq!(ea.normalization_bounds(), eb.normalization_bounds());
            assert_eq!(ea.default_options(), eb.default_options());
            assert_eq!(ea.description(), eb.description());
        }
    }
}
