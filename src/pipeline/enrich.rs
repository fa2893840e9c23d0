//! Registry export enrichment: the second pipeline pass. Updates records
//! the catalog pass created and classifies external identifiers into their
//! canonical fields. Never creates records.

use crate::constants;
use crate::pipeline::combine::zip_columns;
use crate::pipeline::RowError;
use crate::store::{AgentRecord, RecordStore};
use crate::tabular::{Row, Table};

// Column names in the registry parties export
const COL_IRN: &str = "PartiesIrn";
const COL_MIDDLE: &str = "Middle";
const COL_ROLE: &str = "Role";
const COL_SPECIALITIES: &str = "Specialities";
const COL_LABEL: &str = "Label";
const COL_IDENTIFIER_TYPE: &str = "Type";
const COL_IDENTIFIER: &str = "NumberIdentifier";
const COL_DATE_FROM: &str = "DateFrom";
const COL_DATE_TO: &str = "DateTo";
const COL_ASSOCIATED_IRN: &str = "AssociatedWithIrn";
const COL_ASSOCIATED_NAME: &str = "AssociatedWithDisplayName";
const COL_ASSOCIATED_ROLE: &str = "AssociatedWithRole";
const COL_WEB_LINKS: &str = "WebAssociationsWeb";
const COL_WEB_TEXT: &str = "WebAssociationsDisplayText";
// The declared registry schema spells this PlaceOfActivity, but exports in
// the wild also carry the lowercase-o variant; accept both
const COL_ACTIVITY_PLACE: &str = "PlaceOfActivity";
const COL_ACTIVITY_PLACE_ALT: &str = "PlaceofActivity";
const COL_CULTURAL_INFLUENCES: &str = "CulturalInfluences";
const COL_LOCATION: &str = "Location";
const COL_SYNONYM_IRN: &str = "SynonymsIrn";
const COL_SYNONYM_NAME: &str = "SynonymsDisplayName";

/// Counters and per-row failures from the enrichment pass.
#[derive(Debug, Default)]
pub struct EnrichmentSummary {
    pub registry_rows: usize,
    pub enriched: usize,
    pub row_errors: Vec<RowError>,
}

/// Merge the registry export into `store`. Rows keyed to an IRN the catalog
/// pass never stored are dropped without any observable effect; that is the
/// agreed join semantics, not an error.
pub fn enrich_from_registry(store: &mut RecordStore, registry: &Table) -> EnrichmentSummary {
    let mut summary = EnrichmentSummary::default();

    for row in registry.rows() {
        summary.registry_rows += 1;

        let Some(key) = row.raw(COL_IRN) else {
            continue;
        };
        let Some(record) = store.get_mut(key) else {
            continue;
        };
        summary.enriched += 1;

        if let Some(identifiers) = row.get(COL_IDENTIFIER) {
            let types = row.raw(COL_IDENTIFIER_TYPE).unwrap_or_default();
            if let Some(error) = classify_identifiers(record, identifiers, types) {
                summary.row_errors.push(error);
            }
            record.other_identifiers = zip_columns(identifiers, types);
        }

        merge_fields(record, &row);
    }

    summary
}

/// Additive merge of the remaining registry columns: present values are
/// set, absent values never clear what an earlier row stored.
fn merge_fields(record: &mut AgentRecord, row: &Row<'_>) {
    merge_field(&mut record.middle_name, row.get(COL_MIDDLE));
    merge_field(&mut record.roles, row.get(COL_ROLE));
    merge_field(&mut record.specialities, row.get(COL_SPECIALITIES));
    merge_field(&mut record.label, row.get(COL_LABEL));
    merge_field(&mut record.identifier_types, row.get(COL_IDENTIFIER_TYPE));
    merge_field(&mut record.identifiers, row.get(COL_IDENTIFIER));
    merge_field(&mut record.active_from, row.get(COL_DATE_FROM));
    merge_field(&mut record.active_to, row.get(COL_DATE_TO));
    merge_field(&mut record.associated_ids, row.get(COL_ASSOCIATED_IRN));
    merge_field(&mut record.associated_names, row.get(COL_ASSOCIATED_NAME));
    merge_field(&mut record.associated_roles, row.get(COL_ASSOCIATED_ROLE));
    merge_field(&mut record.web_links, row.get(COL_WEB_LINKS));
    merge_field(&mut record.web_text, row.get(COL_WEB_TEXT));
    merge_field(
        &mut record.activity_location,
        row.get(COL_ACTIVITY_PLACE)
            .or_else(|| row.get(COL_ACTIVITY_PLACE_ALT)),
    );
    merge_field(
        &mut record.cultural_influences,
        row.get(COL_CULTURAL_INFLUENCES),
    );
    merge_field(&mut record.locations, row.get(COL_LOCATION));
    merge_field(&mut record.synonym_ids, row.get(COL_SYNONYM_IRN));
    merge_field(&mut record.synonym_names, row.get(COL_SYNONYM_NAME));
}

fn merge_field(slot: &mut Option<String>, value: Option<&str>) {
    if let Some(value) = value {
        *slot = Some(value.to_string());
    }
}

/// Walk the parallel value/type lists positionally and route each pair to
/// its canonical field. When the value list outruns the type list,
/// classification stops at the first out-of-range position and a row error
/// is returned; assignments made before the mismatch are kept.
fn classify_identifiers(
    record: &mut AgentRecord,
    identifiers: &str,
    identifier_types: &str,
) -> Option<RowError> {
    let values: Vec<&str> = identifiers.split('|').collect();
    let type_list: Vec<&str> = identifier_types.split('|').collect();

    for (position, &value) in values.iter().enumerate() {
        let Some(&type_label) = type_list.get(position) else {
            return Some(RowError {
                key: record.key.clone(),
                identifiers: identifiers.to_string(),
                identifier_types: identifier_types.to_string(),
                reason: "identifier value list is longer than the type list".to_string(),
            });
        };
        classify_identifier(record, value, type_label);
    }

    None
}

/// Exact-label routing for a single identifier value. Unrecognized labels
/// set no canonical field; their values still reach the aggregate display
/// string built by the caller.
fn classify_identifier(record: &mut AgentRecord, value: &str, type_label: &str) {
    match type_label {
        constants::ULAN_TYPE_LABEL => record.ulan = Some(value.to_string()),
        constants::IPNI_TYPE_LABEL => record.ipni = Some(normalize_ipni(value)),
        constants::VIAF_TYPE_LABEL => record.viaf = Some(value.to_string()),
        _ => {}
    }
}

/// IPNI identifiers are sometimes exported as URNs
/// (`urn:lsid:ipni.org:names:12345-1`); keep only the segment after the
/// last `:`. Plain values pass through unchanged.
fn normalize_ipni(value: &str) -> String {
    if value.starts_with("urn:") {
        value.rsplit(':').next().unwrap_or(value).to_string()
    } else {
        value.to_string()
    }
}
