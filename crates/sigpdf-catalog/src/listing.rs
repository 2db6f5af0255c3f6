//! Documentation listing of the registry.
//!
//! One row per entry, in registry order, with an anchor key suitable for
//! generated reference pages.

use serde::Serialize;
use serde_json::{Value, json};
use sigpdf_kernel::{EMPTY_DESCRIPTION, SignalPdfs};
use std::fmt::Write as _;

pub const CATALOG_LISTING_KIND: &str = "sigpdf.catalog_listing.v1";
pub const CATALOG_LISTING_SCHEMA: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRow {
    pub qualified_name: String,
    pub description: String,
    pub kinematics: String,
    pub link_key: String,
}

pub fn catalog_listing(registry: &SignalPdfs) -> Vec<ListingRow> {
    registry
        .iter()
        .map(|(name, entry)| {
            let description = if entry.description().is_empty() {
                EMPTY_DESCRIPTION.to_string()
            } else {
                entry.description().to_string()
            };
            let kinematics = entry
                .kinematic_ranges()
                .iter()
                .map(|range| format!("``{}``", range.name))
                .collect::<Vec<_>>()
                .join(", ");
            ListingRow {
                qualified_name: name.to_string(),
                description,
                kinematics,
                link_key: name.link_key(),
            }
        })
        .collect()
}

pub fn catalog_listing_json(registry: &SignalPdfs) -> Value {
    json!({
        "schema": CATALOG_LISTING_SCHEMA,
        "listingKind": CATALOG_LISTING_KIND,
        "rows": catalog_listing(registry),
    })
}

/// Plain-text rendering, one block per entry.
pub fn render_listing(rows: &[ListingRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(out, "{} [{}]", row.qualified_name, row.link_key);
        let _ = writeln!(out, "    {}", row.description);
        if !row.kinematics.is_empty() {
            let _ = writeln!(out, "    kinematics: {}", row.kinematics);
        }
    }
    out
}
