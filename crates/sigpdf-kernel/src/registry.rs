//! The name -> entry registry of signal PDFs.
//!
//! A [`SignalPdfs`] is built once from a complete set of entries and is
//! read-only afterwards. Keys are option-free qualified names; options
//! embedded in a looked-up name are merged between the entry defaults and
//! the caller's options.

use crate::density::SignalPdf;
use crate::entry::SignalPdfEntry;
use crate::error::{Result, SignalPdfError};
use crate::kinematics::{KinematicRange, Kinematics};
use crate::options::Options;
use crate::parameters::Parameters;
use crate::qualified_name::QualifiedName;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;
use tracing::{debug, info};

pub const SIGNAL_PDF_REGISTRY_KIND: &str = "sigpdf.signal_pdf_registry.v1";
pub const SIGNAL_PDF_REGISTRY_SCHEMA: u32 = 1;

/// Enumeration row: what external tooling needs to know about one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    pub name: QualifiedName,
    pub description: String,
    pub kinematic_ranges: Vec<KinematicRange>,
    pub normalization_bounds: Vec<String>,
    pub default_options: Options,
}

impl EntrySummary {
    fn of(entry: &dyn SignalPdfEntry) -> Self {
        Self {
            name: entry.name().clone(),
            description: entry.description().to_string(),
            kinematic_ranges: entry.kinematic_ranges().to_vec(),
            normalization_bounds: entry.normalization_bounds().to_vec(),
            default_options: entry.default_options().clone(),
        }
    }
}

/// Registry of signal PDF entries, keyed and iterated in name order.
#[derive(Debug, Default)]
pub struct SignalPdfs {
    entries: BTreeMap<QualifiedName, Arc<dyn SignalPdfEntry>>,
}

impl SignalPdfs {
    /// Build a registry from a complete set of entries.
    ///
    /// Fails on the first duplicated name; no partial registry is returned.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (QualifiedName, Arc<dyn SignalPdfEntry>)>,
    {
        let mut map = BTreeMap::new();
        for (name, entry) in entries {
            let key = name.without_options();
            match map.entry(key) {
                Entry::Occupied(occupied) => {
                    return Err(SignalPdfError::DuplicateEntry(occupied.key().to_string()));
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(entry);
                }
            }
        }
        info!(
            domain = "signal_pdf",
            entries = map.len(),
            "signal PDF registry built"
        );
        Ok(Self { entries: map })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the entry for `name`, ignoring any options embedded in it.
    pub fn get(&self, name: &QualifiedName) -> Option<&Arc<dyn SignalPdfEntry>> {
        if name.options().is_empty() {
            self.entries.get(name)
        } else {
            self.entries.get(&name.without_options())
        }
    }

    /// Make a signal PDF for `name`.
    ///
    /// Returns `Ok(None)` when no entry is registered under `name`. Options
    /// are layered as entry defaults, then `name.options()`, then `options`.
    /// Errors come only from the model's construction.
    pub fn make(
        &self,
        name: &QualifiedName,
        parameters: &Parameters,
        kinematics: &Kinematics,
        options: &Options,
    ) -> Result<Option<SignalPdf>> {
        let Some(entry) = self.get(name) else {
            debug!(domain = "signal_pdf", name = %name, "no signal PDF registered");
            return Ok(None);
        };
        let layered = name.options().merge(options);
        entry.make(parameters, kinematics, &layered).map(Some)
    }

    /// Parse `raw` and make the signal PDF it names.
    ///
    /// A malformed name fails before any lookup takes place.
    pub fn make_str(
        &self,
        raw: &str,
        parameters: &Parameters,
        kinematics: &Kinematics,
        options: &Options,
    ) -> Result<Option<SignalPdf>> {
        let name = QualifiedName::parse(raw)?;
        self.make(&name, parameters, kinematics, options)
    }

    /// All entries in name order. Each call starts a fresh traversal.
    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedName, &Arc<dyn SignalPdfEntry>)> {
        self.entries.iter()
    }

    /// Names in registry order.
    pub fn names(&self) -> impl Iterator<Item = &QualifiedName> {
        self.entries.keys()
    }

    /// Enumeration rows for documentation and listing tools.
    pub fn summaries(&self) -> Vec<EntrySummary> {
        self.entries
            .values()
            .map(|entry| EntrySummary::of(entry.as_ref()))
            .collect()
    }

    /// The whole registry as a versioned JSON document.
    pub fn to_json(&self) -> Value {
        json!({
            "schema": SIGNAL_PDF_REGISTRY_SCHEMA,
            "registryKind": SIGNAL_PDF_REGISTRY_KIND,
            "entries": self.summaries(),
        })
    }
}

impl<'a> IntoIterator for &'a SignalPdfs {
    type Item = (&'a QualifiedName, &'a Arc<dyn SignalPdfEntry>);
    type IntoIter = std::collections::btree_map::Iter<'a, QualifiedName, Arc<dyn SignalPdfEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
