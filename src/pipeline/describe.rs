//! Description synthesis: collates merged fields into one readable
//! sentence-like summary per record.

use crate::pipeline::combine::relist;
use crate::store::{AgentRecord, RecordStore};

/// Attach a synthesized description to every record that yields at least
/// one fragment. Records with nothing to say keep an unset description.
pub fn synthesize_descriptions(store: &mut RecordStore) {
    for record in store.iter_mut() {
        record.description = build_description(record);
    }
}

/// Build the description from the available fields, in fixed order: full
/// name, synonyms, label, birth and death places, roles, nationality,
/// iwi/hapū or ethnicity, and the aggregate identifier string. Fragments
/// are joined with `". "`; no fragments means no description.
pub fn build_description(record: &AgentRecord) -> Option<String> {
    let mut fragments: Vec<String> = Vec::new();

    let name_parts: Vec<&str> = [
        &record.given_name,
        &record.middle_name,
        &record.family_name,
    ]
    .iter()
    .filter_map(|part| part.as_deref())
    .collect();
    if !name_parts.is_empty() {
        fragments.push(name_parts.join(" "));
    }

    if let Some(synonyms) = &record.synonym_names {
        fragments.push(format!("Also known as: {}", relist(synonyms)));
    }

    if let Some(label) = &record.label {
        fragments.push(label.clone());
    }

    if let Some(place) = &record.birth_place {
        fragments.push(format!("Born {place}"));
    }
    if let Some(place) = &record.death_place {
        fragments.push(format!("Died {place}"));
    }

    if let Some(roles) = &record.roles {
        fragments.push(relist(roles));
    }

    if let Some(nationality) = &record.nationality {
        fragments.push(format!("Nationality: {}", relist(nationality)));
    }
    if let Some(ethnicity) = &record.ethnicity {
        fragments.push(format!("Iwi or hapū/ethnicity: {}", relist(ethnicity)));
    }

    if let Some(other) = &record.other_identifiers {
        fragments.push(format!("Other identifiers: {other}"));
    }

    if fragments.is_empty() {
        None
    } else {
        Some(fragments.join(". "))
    }
}
