//! # sigpdf catalog
//!
//! The registered signal PDFs and the process-wide registry built from them.
//!
//! [`build`] constructs a fresh [`SignalPdfs`] context; [`global`] builds one
//! exactly once per process and hands out shared references to it.

pub mod catalog;
pub mod listing;
pub mod models;

pub use catalog::signal_pdf_entries;
pub use listing::{ListingRow, catalog_listing, catalog_listing_json, render_listing};

use sigpdf_kernel::{Result, SignalPdfs};
use std::sync::OnceLock;

static SIGNAL_PDFS: OnceLock<SignalPdfs> = OnceLock::new();

/// Build a fresh registry from the full catalog.
pub fn build() -> Result<SignalPdfs> {
    SignalPdfs::from_entries(signal_pdf_entries()?)
}

/// The process-wide registry, built on first access.
///
/// Concurrent first accesses race to a single build. A catalog that fails to
/// register is a defect in this crate, so this panics rather than serving a
/// partial registry.
pub fn global() -> &'static SignalPdfs {
    SIGNAL_PDFS.get_or_init(|| {
        tracing::debug!(domain = "signal_pdf", "building process-wide signal PDF registry");
        build().unwrap_or_else(|err| panic!("signal PDF catalog is malformed: {err}"))
    })
}
