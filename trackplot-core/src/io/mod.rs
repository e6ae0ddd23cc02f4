//! Feature file readers
//!
//! Converts annotation files into [`Feature`] lists ready to be added to a track.

pub mod gff3;

pub use gff3::{features_from_records, Gff3Filter, Gff3Reader, Gff3Record};

use crate::error::Result;
use crate::feature::Feature;
use std::path::Path;

/// Read a GFF3 file and convert the matching records into features.
///
/// With `group_by_parent`, records sharing a `Parent` become one feature whose
/// segments are the children (exons of a transcript).
pub fn load_gff3_features<P: AsRef<Path>>(
    path: P,
    filter: &Gff3Filter,
    group_by_parent: bool,
) -> Result<Vec<Feature>> {
    let path = path.as_ref();
    let records = Gff3Reader::open(path)?.read_records()?;
    let features = features_from_records(&records, filter, group_by_parent);
    log::info!(
        "Loaded {} features from {} ({} records)",
        features.len(),
        path.display(),
        records.len()
    );
    Ok(features)
}
