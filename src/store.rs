use std::collections::HashMap;

/// Merged view of one agent across both source exports.
///
/// Every attribute except the key is optional; an absent or empty source
/// field stays `None` so downstream formatting can check presence
/// explicitly. Multi-valued attributes keep their raw `|`-delimited form.
#[derive(Debug, Clone, Default)]
pub struct AgentRecord {
    /// Stable identifier (IRN) shared by both exports
    pub key: String,

    // Catalog-sourced attributes
    pub qid: Option<String>,
    pub entity_type: Option<String>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub gender: Option<String>,
    pub born: Option<String>,
    pub died: Option<String>,
    pub birth_place: Option<String>,
    pub death_place: Option<String>,
    pub orcid: Option<String>,
    pub ethnicity: Option<String>,
    pub nationality: Option<String>,
    pub url: Option<String>,
    pub referenced_by: Option<String>,

    // Registry-sourced attributes
    pub middle_name: Option<String>,
    pub roles: Option<String>,
    pub specialities: Option<String>,
    pub label: Option<String>,
    pub identifier_types: Option<String>,
    pub identifiers: Option<String>,
    pub active_from: Option<String>,
    pub active_to: Option<String>,
    pub associated_ids: Option<String>,
    pub associated_names: Option<String>,
    pub associated_roles: Option<String>,
    pub web_links: Option<String>,
    pub web_text: Option<String>,
    pub activity_location: Option<String>,
    pub cultural_influences: Option<String>,
    pub locations: Option<String>,
    pub synonym_ids: Option<String>,
    pub synonym_names: Option<String>,

    // Derived attributes
    pub viaf: Option<String>,
    pub ulan: Option<String>,
    pub ipni: Option<String>,
    pub other_identifiers: Option<String>,
    pub description: Option<String>,
}

/// Insertion-ordered store of merged agent records.
///
/// Records are created by the catalog ingest pass and only updated in place
/// afterwards; they are never deleted. Export iterates in first-creation
/// order, and a key that is written twice keeps its original position.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: HashMap<String, AgentRecord>,
    order: Vec<String>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Insert the record at its key, fully replacing any earlier record
    /// stored there.
    pub fn upsert(&mut self, record: AgentRecord) {
        if !self.records.contains_key(&record.key) {
            self.order.push(record.key.clone());
        }
        self.records.insert(record.key.clone(), record);
    }

    pub fn get(&self, key: &str) -> Option<&AgentRecord> {
        self.records.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut AgentRecord> {
        self.records.get_mut(key)
    }

    /// Iterate records in first-creation order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentRecord> {
        self.order.iter().filter_map(|key| self.records.get(key))
    }

    /// Mutable iteration for derivation passes; order is not significant.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut AgentRecord> {
        self.records.values_mut()
    }
}
