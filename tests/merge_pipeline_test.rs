use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use agent_merger::config::Config;
use agent_merger::pipeline;

fn write_config(dir: &std::path::Path, catalog: &str, registry: &str) -> Config {
    let mut config = Config::default();
    config.inputs.catalog = dir.join(catalog);
    config.inputs.registry = dir.join(registry);
    config.output.path = dir.join("combined.csv");
    config.output.report_dir = dir.join("reports");
    config.entity.url_template = "https://collections.example.org/agent/{}".to_string();
    config
}

fn split_row(line: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(line.as_bytes());
    let record = reader.records().next().unwrap().unwrap();
    record.iter().map(|cell| cell.to_string()).collect()
}

#[test]
fn test_merge_end_to_end() -> Result<()> {
    let temp_dir = tempdir()?;
    let dir = temp_dir.path();

    fs::write(
        dir.join("catalog.csv"),
        "pid,wikidataQID,title,givenName,familyName,gender,birthDate,deathDate,birthPlace,deathPlace,orcidID,ethnicity,nationality,isReferencedBy\n\
         https://api.example.org/agent/42,,Jane Doe,Jane,Doe,Female,1901,1980,Wellington,,,,New Zealand,\n",
    )?;
    fs::write(
        dir.join("registry.csv"),
        "PartiesIrn,Middle,Role,Specialities,Label,Type,NumberIdentifier,DateFrom,DateTo,AssociatedWithIrn,AssociatedWithDisplayName,AssociatedWithRole,WebAssociationsWeb,WebAssociationsDisplayText,PlaceOfActivity,CulturalInfluences,Location,SynonymsIrn,SynonymsDisplayName\n\
         42,,Curator|Writer,,,VIAF (Virtual International Authority File),12345,1920,1960,,,,,,Wellington,,,,\n\
         99,,Ignored,,,,,,,,,,,,,,,,\n",
    )?;

    let config = write_config(dir, "catalog.csv", "registry.csv");
    let outcome = pipeline::run(&config)?;

    assert_eq!(outcome.catalog_rows, 1);
    assert_eq!(outcome.records, 1);
    assert_eq!(outcome.registry_rows, 2);
    assert_eq!(outcome.enriched_records, 1);
    assert_eq!(outcome.exported_records, 1);
    assert!(outcome.row_errors.is_empty());

    let content = fs::read_to_string(&config.output.path)?;
    let mut lines = content.lines();
    let header = split_row(lines.next().unwrap());
    let row = split_row(lines.next().unwrap());
    assert!(lines.next().is_none());

    let column = |name: &str| header.iter().position(|h| h == name).unwrap();

    assert_eq!(row[column("id")], "42");
    assert_eq!(row[column("P21")], "Q6581072");
    assert_eq!(row[column("P214")], "12345");
    assert_eq!(row[column("url")], "https://collections.example.org/agent/42");
    assert_eq!(row[column("activeFrom")], "1920");
    assert_eq!(row[column("activeTo")], "1960");
    // roles is listed twice; position() finds the first copy
    assert_eq!(row[column("roles")], "Curator|Writer");

    let description = &row[column("description")];
    assert!(description.contains("Jane Doe"), "description: {description}");
    assert!(description.contains("Curator; Writer"), "description: {description}");
    assert!(description.contains("Born Wellington"), "description: {description}");
    assert!(
        description.contains("Nationality: New Zealand"),
        "description: {description}"
    );

    Ok(())
}

#[test]
fn test_registry_only_keys_never_create_records() -> Result<()> {
    let temp_dir = tempdir()?;
    let dir = temp_dir.path();

    fs::write(
        dir.join("catalog.csv"),
        "pid,title\nhttps://api.example.org/agent/1,Known Agent\n",
    )?;
    fs::write(
        dir.join("registry.csv"),
        "PartiesIrn,Role\n2,Curator\n3,Writer\n",
    )?;

    let config = write_config(dir, "catalog.csv", "registry.csv");
    let outcome = pipeline::run(&config)?;

    assert_eq!(outcome.records, 1);
    assert_eq!(outcome.enriched_records, 0);
    assert_eq!(outcome.exported_records, 1);

    let content = fs::read_to_string(&config.output.path)?;
    assert_eq!(content.lines().count(), 2); // header + the one known agent

    Ok(())
}

#[test]
fn test_misaligned_identifier_lists_are_reported_not_fatal() -> Result<()> {
    let temp_dir = tempdir()?;
    let dir = temp_dir.path();

    fs::write(
        dir.join("catalog.csv"),
        "pid,title\n\
         https://api.example.org/agent/1,Broken Row\n\
         https://api.example.org/agent/2,Good Row\n",
    )?;
    fs::write(
        dir.join("registry.csv"),
        "PartiesIrn,Type,NumberIdentifier,Role\n\
         1,VIAF (Virtual International Authority File),11111|22222,Painter\n\
         2,VIAF (Virtual International Authority File),33333,Sculptor\n",
    )?;

    let config = write_config(dir, "catalog.csv", "registry.csv");
    let outcome = pipeline::run(&config)?;

    assert_eq!(outcome.row_errors.len(), 1);
    assert_eq!(outcome.row_errors[0].key, "1");
    assert_eq!(outcome.exported_records, 2);

    let content = fs::read_to_string(&config.output.path)?;
    let lines: Vec<&str> = content.lines().collect();
    let header = split_row(lines[0]);
    let column = |name: &str| header.iter().position(|h| h == name).unwrap();

    // The faulted row keeps its in-range classification and falls back to
    // the whole-string aggregate
    let broken = split_row(lines[1]);
    assert_eq!(broken[column("P214")], "11111");
    assert_eq!(
        broken[column("otherIdentifiers")],
        "11111|22222: VIAF (Virtual International Authority File)"
    );
    assert_eq!(broken[column("roles")], "Painter");

    let good = split_row(lines[2]);
    assert_eq!(good[column("P214")], "33333");

    Ok(())
}

#[test]
fn test_run_report_is_written() -> Result<()> {
    let temp_dir = tempdir()?;
    let dir = temp_dir.path();

    fs::write(dir.join("catalog.csv"), "pid\nhttps://api.example.org/agent/1\n")?;
    fs::write(dir.join("registry.csv"), "PartiesIrn\n1\n")?;

    let config = write_config(dir, "catalog.csv", "registry.csv");
    let outcome = pipeline::run(&config)?;
    let report_path: PathBuf = pipeline::persist_report(&outcome, &config.output.report_dir)?;

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(report_path)?)?;
    assert_eq!(report["catalog_rows"], 1);
    assert_eq!(report["registry_rows"], 1);
    assert_eq!(report["enriched_records"], 1);
    assert_eq!(report["row_errors"], serde_json::json!([]));

    Ok(())
}
