//! Signal PDF entries and the generic binder that produces them.
//!
//! A decay model contributes two functions: a differential function of `k`
//! kinematic arguments and a normalization function of `m` bound arguments.
//! [`make_signal_pdf`] pairs each function with its ordered list of names,
//! checks the counts against the function arities, and erases the model type
//! behind [`SignalPdfEntry`].

use crate::density::{BoundFunctions, SignalPdf};
use crate::error::{BoundRole, Result, SignalPdfError};
use crate::kinematics::{KinematicRange, Kinematics};
use crate::options::Options;
use crate::parameters::Parameters;
use crate::qualified_name::QualifiedName;
use std::fmt::Write as _;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, error};

/// Description used when a model does not provide one.
pub const EMPTY_DESCRIPTION: &str = "<empty signal PDF description>";

/// A physics model that can back a signal PDF.
///
/// Construction failures (bad option values, unresolvable parameters) belong
/// to the model and are passed through to the caller of `make` unchanged.
pub trait DecayModel: Sized + Send + 'static {
    /// Human-readable description of the model.
    const DESCRIPTION: &'static str = "";

    fn new(parameters: &Parameters, options: &Options) -> Result<Self>;
}

/// A function of a model and a fixed number of positional `f64` arguments.
///
/// Implemented for every `Fn(&M, f64, ..., f64) -> f64` up to eight
/// arguments, which covers both method paths such as `Model::pdf` and
/// closures. `Args` is the tuple of argument types and only serves to keep
/// the implementations apart.
pub trait KinematicFn<M, Args>: Send + Sync + 'static {
    /// Number of positional arguments.
    const ARITY: usize;

    /// Call the function with `args` as its positional arguments.
    ///
    /// # Panics
    ///
    /// Panics if `args.len() != Self::ARITY`. Entries built by
    /// [`make_signal_pdf`] check the count at registration, so their
    /// densities never hit this.
    fn call(&self, model: &M, args: &[f64]) -> f64;
}

macro_rules! f64_of {
    ($arg:ident) => {
        f64
    };
}

macro_rules! impl_kinematic_fn {
    ($arity:expr; $($arg:ident),*) => {
        impl<M, F> KinematicFn<M, ($(f64_of!($arg),)*)> for F
        where
            F: Fn(&M $(, f64_of!($arg))*) -> f64 + Send + Sync + 'static,
        {
            const ARITY: usize = $arity;

            fn call(&self, model: &M, args: &[f64]) -> f64 {
                match *args {
                    [$($arg),*] => self(model $(, $arg)*),
                    _ => unreachable!(
                        "called a {}-argument function with {} arguments",
                        $arity,
                        args.len()
                    ),
                }
            }
        }
    };
}

impl_kinematic_fn!(0;);
impl_kinematic_fn!(1; a0);
impl_kinematic_fn!(2; a0, a1);
impl_kinematic_fn!(3; a0, a1, a2);
impl_kinematic_fn!(4; a0, a1, a2, a3);
impl_kinematic_fn!(5; a0, a1, a2, a3, a4);
impl_kinematic_fn!(6; a0, a1, a2, a3, a4, a5);
impl_kinematic_fn!(7; a0, a1, a2, a3, a4, a5, a6);
impl_kinematic_fn!(8; a0, a1, a2, a3, a4, a5, a6, a7);

/// A registered, reusable factory for one named signal PDF.
///
/// Entries are immutable after registration and shared between the registry
/// and any caller holding one.
pub trait SignalPdfEntry: Send + Sync {
    /// The option-free registration name.
    fn name(&self) -> &QualifiedName;

    fn description(&self) -> &str;

    /// Registration-time options, the lowest-precedence layer.
    fn default_options(&self) -> &Options;

    /// Ranges of the differential function's arguments, in positional order.
    fn kinematic_ranges(&self) -> &[KinematicRange];

    /// Names of the normalization function's arguments, in positional order.
    fn normalization_bounds(&self) -> &[String];

    /// Construct a model from `parameters` and the entry defaults overlaid
    /// with `options`, and return a density reading from `kinematics`.
    fn make(
        &self,
        parameters: &Parameters,
        kinematics: &Kinematics,
        options: &Options,
    ) -> Result<SignalPdf>;

    /// Multi-line human-readable summary.
    fn describe(&self) -> String {
        let mut out = String::new();
        let description = if self.description().is_empty() {
            EMPTY_DESCRIPTION
        } else {
            self.description()
        };
        let _ = writeln!(out, "{}", self.name());
        let _ = writeln!(out, "    {description}");
        for range in self.kinematic_ranges() {
            if range.description.is_empty() {
                let _ = writeln!(out, "    {range}");
            } else {
                let _ = writeln!(out, "    {range}: {}", range.description);
            }
        }
        if !self.normalization_bounds().is_empty() {
            let _ = writeln!(
                out,
                "    normalized over {}",
                self.normalization_bounds().join(", ")
            );
        }
        if !self.default_options().is_empty() {
            let _ = writeln!(out, "    default options {}", self.default_options());
        }
        out
    }
}

impl std::fmt::Debug for dyn SignalPdfEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalPdfEntry")
            .field("name", &self.name().to_string())
            .field("kinematic_ranges", &self.kinematic_ranges())
            .field("normalization_bounds", &self.normalization_bounds())
            .finish()
    }
}

/// Bind a decay model's differential and normalization functions into an entry.
///
/// `kinematic_ranges` names the differential function's arguments and
/// `normalization_bounds` the normalization function's arguments, both in
/// positional order. A count that differs from the function's arity is an
/// [`SignalPdfError::ArityMismatch`]; a name embedding options is a
/// [`SignalPdfError::NameFormat`].
pub fn make_signal_pdf<M, P, PA, N, NA, R, B>(
    name: &str,
    default_options: Options,
    differential: P,
    kinematic_ranges: R,
    normalization: N,
    normalization_bounds: B,
) -> Result<(QualifiedName, Arc<dyn SignalPdfEntry>)>
where
    M: DecayModel,
    P: KinematicFn<M, PA>,
    N: KinematicFn<M, NA>,
    PA: 'static,
    NA: 'static,
    R: IntoIterator<Item = KinematicRange>,
    B: IntoIterator,
    B::Item: Into<String>,
{
    let qn = QualifiedName::parse(name)?;
    if !qn.options().is_empty() {
        return Err(SignalPdfError::NameFormat {
            name: name.to_string(),
            reason: "registration names must not embed options".to_string(),
        });
    }

    let kinematic_ranges: Arc<[KinematicRange]> = kinematic_ranges.into_iter().collect();
    let normalization_bounds: Arc<[String]> =
        normalization_bounds.into_iter().map(Into::into).collect();

    check_arity(
        &qn,
        BoundRole::Differential,
        kinematic_ranges.len(),
        <P as KinematicFn<M, PA>>::ARITY,
    )?;
    check_arity(
        &qn,
        BoundRole::Normalization,
        normalization_bounds.len(),
        <N as KinematicFn<M, NA>>::ARITY,
    )?;

    debug!(
        domain = "signal_pdf",
        name = %qn,
        kinematic_variables = kinematic_ranges.len(),
        normalization_bounds = normalization_bounds.len(),
        "registered signal PDF"
    );

    let entry = ConcreteSignalPdfEntry {
        name: qn.clone(),
        description: M::DESCRIPTION.to_string(),
        default_options,
        kinematic_ranges,
        normalization_bounds,
        differential: Arc::new(differential),
        normalization: Arc::new(normalization),
        _marker: PhantomData,
    };
    Ok((qn, Arc::new(entry)))
}

fn check_arity(qn: &QualifiedName, role: BoundRole, declared: usize, arity: usize) -> Result<()> {
    if declared == arity {
        return Ok(());
    }
    error!(
        domain = "signal_pdf",
        name = %qn,
        %role,
        declared,
        arity,
        "declared names do not match function arity"
    );
    Err(SignalPdfError::ArityMismatch {
        name: qn.to_string(),
        role,
        declared,
        arity,
    })
}

struct ConcreteSignalPdfEntry<M, P, PA, N, NA> {
    name: QualifiedName,
    description: String,
    default_options: Options,
    kinematic_ranges: Arc<[KinematicRange]>,
    normalization_bounds: Arc<[String]>,
    differential: Arc<P>,
    normalization: Arc<N>,
    _marker: PhantomData<fn() -> (M, PA, NA)>,
}

impl<M, P, PA, N, NA> SignalPdfEntry for ConcreteSignalPdfEntry<M, P, PA, N, NA>
where
    M: DecayModel,
    P: KinematicFn<M, PA>,
    N: KinematicFn<M, NA>,
    PA: 'static,
    NA: 'static,
{
    fn name(&self) -> &QualifiedName {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn default_options(&self) -> &Options {
        &self.default_options
    }

    fn kinematic_ranges(&self) -> &[KinematicRange] {
        &self.kinematic_ranges
    }

    fn normalization_bounds(&self) -> &[String] {
        &self.normalization_bounds
    }

    fn make(
        &self,
        parameters: &Parameters,
        kinematics: &Kinematics,
        options: &Options,
    ) -> Result<SignalPdf> {
        let options = self.default_options.merge(options);
        let model = M::new(parameters, &options)?;
        debug!(
            domain = "signal_pdf",
            name = %self.name,
            options = %options,
            "constructed signal PDF"
        );
        let functions = BoundModel::<M, P, PA, N, NA> {
            model,
            differential: Arc::clone(&self.differential),
            normalization: Arc::clone(&self.normalization),
            _marker: PhantomData,
        };
        Ok(SignalPdf::new(
            self.name.clone(),
            options,
            kinematics.clone(),
            Arc::clone(&self.kinematic_ranges),
            Arc::clone(&self.normalization_bounds),
            Box::new(functions),
        ))
    }
}

/// One model instance plus the two shared function references.
struct BoundModel<M, P, PA, N, NA> {
    model: M,
    differential: Arc<P>,
    normalization: Arc<N>,
    _marker: PhantomData<fn() -> (PA, NA)>,
}

impl<M, P, PA, N, NA> BoundFunctions for BoundModel<M, P, PA, N, NA>
where
    M: DecayModel,
    P: KinematicFn<M, PA>,
    N: KinematicFn<M, NA>,
    PA: 'static,
    NA: 'static,
{
    fn differential(&self, args: &[f64]) -> f64 {
        self.differential.call(&self.model, args)
    }

    fn normalization(&self, args: &[f64]) -> f64 {
        self.normalization.call(&self.model, args)
    }
}
