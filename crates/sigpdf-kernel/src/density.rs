//! Evaluation of a bound signal PDF.
//!
//! A [`SignalPdf`] owns one model instance and reads its arguments from the
//! live [`Kinematics`] by name, in declared order. The probability density
//! itself is `evaluate() / normalization()`; that division is left to the
//! caller.

use crate::error::Result;
use crate::kinematics::{KinematicRange, Kinematics};
use crate::options::Options;
use crate::qualified_name::QualifiedName;
use std::fmt;
use std::sync::Arc;

/// The two bound functions of one model instance, with the model type erased.
pub(crate) trait BoundFunctions: Send {
    fn differential(&self, args: &[f64]) -> f64;

    fn normalization(&self, args: &[f64]) -> f64;
}

/// A ready-to-evaluate signal PDF.
///
/// Each instance exclusively owns its model; use it from one thread at a time.
pub struct SignalPdf {
    name: QualifiedName,
    options: Options,
    kinematics: Kinematics,
    kinematic_ranges: Arc<[KinematicRange]>,
    normalization_bounds: Arc<[String]>,
    functions: Box<dyn BoundFunctions>,
}

impl SignalPdf {
    pub(crate) fn new(
        name: QualifiedName,
        options: Options,
        kinematics: Kinematics,
        kinematic_ranges: Arc<[KinematicRange]>,
        normalization_bounds: Arc<[String]>,
        functions: Box<dyn BoundFunctions>,
    ) -> Self {
        Self {
            name,
            options,
            kinematics,
            kinematic_ranges,
            normalization_bounds,
            functions,
        }
    }

    /// Registration name of the entry this PDF was made from.
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// The merged options the model was constructed with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Handle to the kinematics this PDF reads from.
    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    pub fn kinematic_ranges(&self) -> &[KinematicRange] {
        &self.kinematic_ranges
    }

    pub fn normalization_bounds(&self) -> &[String] {
        &self.normalization_bounds
    }

    /// Evaluate the differential function at the current kinematics.
    ///
    /// Fails with `UnknownKinematicVariable` if a declared variable is absent;
    /// the PDF stays usable once the caller supplies it.
    pub fn evaluate(&self) -> Result<f64> {
        let args = self
            .kinematics
            .values_of(self.kinematic_ranges.iter().map(|range| range.name.as_str()))?;
        Ok(self.functions.differential(&args))
    }

    /// Evaluate the normalization function at the current bound values.
    pub fn normalization(&self) -> Result<f64> {
        let args = self
            .kinematics
            .values_of(self.normalization_bounds.iter().map(String::as_str))?;
        Ok(self.functions.normalization(&args))
    }
}

impl fmt::Debug for SignalPdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalPdf")
            .field("name", &self.name.to_string())
            .field("options", &self.options.to_string())
            .field("kinematic_ranges", &self.kinematic_ranges)
            .field("normalization_bounds", &self.normalization_bounds)
            .finish_non_exhaustive()
    }
}
