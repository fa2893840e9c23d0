/// Domain constants shared across the merge pipeline.
/// QID values follow the Wikidata items the downstream matching catalog
/// expects; the identifier labels are the literal strings the registry
/// export uses in its identifier type column.

/// Every exported record is a person.
pub const ENTITY_TYPE_QID: &str = "Q5";

// Gender items used by the catalog export mapping
pub const GENDER_MALE_QID: &str = "Q6581097";
pub const GENDER_FEMALE_QID: &str = "Q6581072";
pub const GENDER_DIVERSE_QID: &str = "Q48270";

// Identifier type labels as they appear in the registry export
pub const ULAN_TYPE_LABEL: &str = "ULAN (Union List of Artists Names)";
pub const IPNI_TYPE_LABEL: &str = "IPNI (International Plant Names Index)";
pub const VIAF_TYPE_LABEL: &str = "VIAF (Virtual International Authority File)";

/// Convert a catalog gender value to its QID. Anything outside the known
/// table is left unmapped rather than passed through.
pub fn gender_qid(gender: &str) -> Option<&'static str> {
    match gender {
        "Male" => Some(GENDER_MALE_QID),
        "Female" => Some(GENDER_FEMALE_QID),
        "Gender Diverse" => Some(GENDER_DIVERSE_QID),
        _ => None,
    }
}
