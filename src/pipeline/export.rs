//! Fixed-schema export of the merged store.

use std::path::Path;

use crate::error::Result;
use crate::pipeline::combine::zip_columns;
use crate::store::{AgentRecord, RecordStore};
use crate::tabular::TableWriter;

/// Output columns in their required order. `roles` appears twice because
/// the downstream import schema lists it twice; both copies carry the same
/// value.
pub const OUTPUT_FIELDS: &[&str] = &[
    "id",
    "q",
    "type",
    "name",
    "description",
    "born",
    "died",
    "P21",
    "P496",
    "P214",
    "P245",
    "P586",
    "url",
    "activeFrom",
    "activeTo",
    "roles",
    "specialities",
    "otherIdentifiers",
    "associatedParties",
    "roles",
    "nationality",
    "iwiEthnicGroup",
    "culturalInfluences",
    "locations",
    "synonyms",
];

/// Write every record in creation order. Returns the number of rows
/// written. Reads the store without mutating it.
pub fn export_store(store: &RecordStore, path: &Path) -> Result<usize> {
    let mut writer = TableWriter::create(path, OUTPUT_FIELDS)?;

    let mut written = 0;
    for record in store.iter() {
        writer.write_row(|field| resolve_field(record, field))?;
        written += 1;
    }

    writer.finish()?;
    Ok(written)
}

/// Resolve one output column for a record; `None` renders as an empty cell.
fn resolve_field(record: &AgentRecord, field: &str) -> Option<String> {
    match field {
        "id" => Some(record.key.clone()),
        "q" => record.qid.clone(),
        "type" => record.entity_type.clone(),
        "name" => record.name.clone(),
        "description" => record.description.clone(),
        "born" => record.born.clone(),
        "died" => record.died.clone(),
        "P21" => record.gender.clone(),
        "P496" => record.orcid.clone(),
        "P214" => record.viaf.clone(),
        "P245" => record.ulan.clone(),
        "P586" => record.ipni.clone(),
        "url" => record.url.clone(),
        "activeFrom" => record.active_from.clone(),
        "activeTo" => record.active_to.clone(),
        "roles" => record.roles.clone(),
        "specialities" => record.specialities.clone(),
        "otherIdentifiers" => record.other_identifiers.clone(),
        "associatedParties" => {
            zipped_or_names(record.associated_names.as_deref(), record.associated_ids.as_deref())
        }
        "nationality" => record.nationality.clone(),
        "iwiEthnicGroup" => record.ethnicity.clone(),
        "culturalInfluences" => record.cultural_influences.clone(),
        "locations" => record.locations.clone(),
        "synonyms" => {
            zipped_or_names(record.synonym_names.as_deref(), record.synonym_ids.as_deref())
        }
        _ => None,
    }
}

/// Names and ids combine pairwise when both are present; names stand alone
/// when the id list is missing.
fn zipped_or_names(names: Option<&str>, ids: Option<&str>) -> Option<String> {
    match (names, ids) {
        (Some(names), Some(ids)) => zip_columns(names, ids),
        (Some(names), None) => Some(names.to_string()),
        _ => None,
    }
}
