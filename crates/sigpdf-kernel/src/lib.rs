//! # sigpdf kernel
//!
//! A registry of named, parameterized signal PDFs over decay kinematics.
//!
//! The kernel does not know any decay model. It knows how to bind a model's
//! differential function and normalization function, together with the
//! ordered names of their arguments, into a uniform entry that can later be
//! turned into a ready-to-evaluate density.
//!
//! ## Architecture
//!
//! ```text
//! QualifiedName         ← prefix::name@suffix;key=value,...
//!     │
//! Options               ← defaults ⊕ name options ⊕ caller options
//!     │
//! KinematicRange        ← declared argument names and domains
//!     │
//! make_signal_pdf       ← binder: model functions + names → entry
//!     │
//! SignalPdfEntry        ← type-erased factory, one per observable
//!     │
//! SignalPdf             ← one model instance reading live Kinematics
//!     │
//! SignalPdfs            ← name → entry registry, built once
//! ```

pub mod density;
pub mod entry;
pub mod error;
pub mod kinematics;
pub mod options;
pub mod parameters;
pub mod qualified_name;
pub mod registry;

pub use density::SignalPdf;
pub use entry::{DecayModel, EMPTY_DESCRIPTION, KinematicFn, SignalPdfEntry, make_signal_pdf};
pub use error::{BoundRole, Result, SignalPdfError};
pub use kinematics::{KinematicRange, Kinematics};
pub use options::Options;
pub use parameters::Parameters;
pub use qualified_name::QualifiedName;
pub use registry::{EntrySummary, SignalPdfs};
