//! Catalog export ingest: the first pipeline pass, and the only one that
//! creates records.

use tracing::debug;

use crate::constants;
use crate::store::{AgentRecord, RecordStore};
use crate::tabular::Table;

// Column names in the collections API agent export
const COL_PID: &str = "pid";
const COL_QID: &str = "wikidataQID";
const COL_TITLE: &str = "title";
const COL_GIVEN_NAME: &str = "givenName";
const COL_FAMILY_NAME: &str = "familyName";
const COL_GENDER: &str = "gender";
const COL_BIRTH_DATE: &str = "birthDate";
const COL_DEATH_DATE: &str = "deathDate";
const COL_BIRTH_PLACE: &str = "birthPlace";
const COL_DEATH_PLACE: &str = "deathPlace";
const COL_ORCID: &str = "orcidID";
const COL_ETHNICITY: &str = "ethnicity";
const COL_NATIONALITY: &str = "nationality";
const COL_REFERENCED_BY: &str = "isReferencedBy";

/// Final segment of a `/`-separated path; the whole value when there is no
/// separator. The catalog export publishes identifiers as full URIs but
/// every downstream consumer wants the bare trailing id.
fn path_tail(value: &str) -> &str {
    value.rsplit('/').next().unwrap_or(value)
}

/// Substitute the record key into the canonical entity URL template.
fn entity_url(template: &str, key: &str) -> String {
    template.replacen("{}", key, 1)
}

/// Populate `store` from the catalog export. Returns the number of data
/// rows read. A key that appears twice is fully replaced by the later row;
/// missing fields are never an error and stay unset.
pub fn ingest_catalog(store: &mut RecordStore, catalog: &Table, url_template: &str) -> usize {
    let mut rows = 0;

    for row in catalog.rows() {
        rows += 1;

        // Without the pid column there is nothing to key the record by
        let Some(pid) = row.raw(COL_PID) else {
            debug!("catalog row {} has no pid column, skipped", rows);
            continue;
        };
        let key = path_tail(pid).to_string();

        let record = AgentRecord {
            url: Some(entity_url(url_template, &key)),
            qid: row.get(COL_QID).map(path_tail).map(str::to_string),
            entity_type: Some(constants::ENTITY_TYPE_QID.to_string()),
            name: row.get(COL_TITLE).map(str::to_string),
            given_name: row.get(COL_GIVEN_NAME).map(str::to_string),
            family_name: row.get(COL_FAMILY_NAME).map(str::to_string),
            gender: row
                .get(COL_GENDER)
                .and_then(constants::gender_qid)
                .map(str::to_string),
            born: row.get(COL_BIRTH_DATE).map(str::to_string),
            died: row.get(COL_DEATH_DATE).map(str::to_string),
            birth_place: row.get(COL_BIRTH_PLACE).map(str::to_string),
            death_place: row.get(COL_DEATH_PLACE).map(str::to_string),
            orcid: row.get(COL_ORCID).map(path_tail).map(str::to_string),
            ethnicity: row.get(COL_ETHNICITY).map(str::to_string),
            nationality: row.get(COL_NATIONALITY).map(str::to_string),
            referenced_by: row.get(COL_REFERENCED_BY).map(str::to_string),
            key,
            ..AgentRecord::default()
        };

        store.upsert(record);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const URL_TEMPLATE: &str = "https://collections.example.org/agent/{}";

    fn read_table(content: &str) -> Table {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        fs::write(&path, content).unwrap();
        Table::read(&path).unwrap()
    }

    #[test]
    fn test_key_and_ids_are_path_tails() {
        let table = read_table(
            "pid,wikidataQID,title,orcidID\n\
             https://api.example.org/agent/42,https://www.wikidata.org/wiki/Q123,Jane Doe,https://orcid.org/0000-0001\n",
        );
        let mut store = RecordStore::new();
        let rows = ingest_catalog(&mut store, &table, URL_TEMPLATE);

        assert_eq!(rows, 1);
        let record = store.get("42").unwrap();
        assert_eq!(record.qid.as_deref(), Some("Q123"));
        assert_eq!(record.orcid.as_deref(), Some("0000-0001"));
        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
        assert_eq!(record.entity_type.as_deref(), Some("Q5"));
        assert_eq!(
            record.url.as_deref(),
            Some("https://collections.example.org/agent/42")
        );
    }

    #[test]
    fn test_pid_without_separator_is_used_whole() {
        let table = read_table("pid,title\n42,Solo\n");
        let mut store = RecordStore::new();
        ingest_catalog(&mut store, &table, URL_TEMPLATE);
        assert!(store.contains("42"));
    }

    #[test]
    fn test_gender_outside_table_stays_unset() {
        let table = read_table(
            "pid,gender\nhttps://api.example.org/agent/1,Female\nhttps://api.example.org/agent/2,unknown\nhttps://api.example.org/agent/3,\n",
        );
        let mut store = RecordStore::new();
        ingest_catalog(&mut store, &table, URL_TEMPLATE);

        assert_eq!(store.get("1").unwrap().gender.as_deref(), Some("Q6581072"));
        assert_eq!(store.get("2").unwrap().gender, None);
        assert_eq!(store.get("3").unwrap().gender, None);
    }

    #[test]
    fn test_duplicate_key_last_row_wins() {
        let table = read_table(
            "pid,title,birthPlace\n\
             https://api.example.org/agent/7,First Title,Wellington\n\
             https://api.example.org/agent/7,Second Title,\n",
        );
        let mut store = RecordStore::new();
        let rows = ingest_catalog(&mut store, &table, URL_TEMPLATE);

        assert_eq!(rows, 2);
        assert_eq!(store.len(), 1);
        let record = store.get("7").unwrap();
        assert_eq!(record.name.as_deref(), Some("Second Title"));
        // Replacement is whole-row, not per-field
        assert_eq!(record.birth_place, None);
    }

    #[test]
    fn test_missing_fields_stay_unset() {
        let table = read_table("pid\nhttps://api.example.org/agent/9\n");
        let mut store = RecordStore::new();
        ingest_catalog(&mut store, &table, URL_TEMPLATE);

        let record = store.get("9").unwrap();
        assert_eq!(record.name, None);
        assert_eq!(record.qid, None);
        assert_eq!(record.gender, None);
        // The url is derived from the key, so it is always present
        assert!(record.url.is_some());
    }
}
