use std::fs;
use std::path::Path;

use tempfile::TempDir;
use zone_content::{ContentFactory, ContentIssue, LootTableLoader, SpawnTableLoader};
use zone_core::{ContentKind, GenerationConfig};

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write fixture");
}

fn minimal_dir() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "config.toml", "");
    write(
        dir.path(),
        "definitions.ron",
        r#"(entities: {"rabbit": (name: Some("Rabbit"), lootTableId: Some("rabbit_basic"))})"#,
    );
    write(
        dir.path(),
        "spawn_tables.ron",
        r#"(byTemplate: {"meadow": (entities: Some((count: Some(2), entries: [(defId: "rabbit", w: 1.0), (defId: "fox")])))})"#,
    );
    write(dir.path(), "loot_tables.ron", "{}");
    write(
        dir.path(),
        "zones.ron",
        r######"(zones: [(id: "meadow", layout: Static(rows: ["#####", "#...#", "#####"]))])"######,
    );
    dir
}

#[test]
fn test_minimal_directory_loads_with_defaults() {
    let dir = minimal_dir();
    let bundle = ContentFactory::new(dir.path())
        .load_all()
        .expect("minimal content should load");

    assert_eq!(bundle.config, GenerationConfig::default());
    let table = bundle.spawn_tables.template("meadow").expect("meadow table");
    let entities = table.entry_set(ContentKind::Entities).expect("entities");
    assert_eq!(entities.count, Some(2));
    assert_eq!(entities.entries[0].weight, 1.0);
    // Weight defaults to 1 when omitted.
    assert_eq!(entities.entries[1].weight, 1.0);
}

#[test]
fn test_validation_flags_dangling_ids() {
    let dir = minimal_dir();
    let report = ContentFactory::new(dir.path())
        .load_all()
        .expect("minimal content should load")
        .validate();

    assert_eq!(report.len(), 2, "{:#?}", report.issues);
    assert!(report.issues.contains(&ContentIssue::UnknownDefinition {
        table: "template:meadow".into(),
        kind: ContentKind::Entities,
        def_id: "fox".into(),
    }));
    assert!(report.issues.contains(&ContentIssue::UnknownLootTable {
        kind: ContentKind::Entities,
        def_id: "rabbit".into(),
        loot_table_id: "rabbit_basic".into(),
    }));
}

#[test]
fn test_missing_file_names_the_path() {
    let dir = TempDir::new().expect("temp dir");
    let err = ContentFactory::new(dir.path())
        .load_definitions()
        .expect_err("missing file");
    assert!(err.to_string().contains("definitions.ron"));
}

#[test]
fn test_inverted_count_range_loads_and_is_reported() {
    let dir = minimal_dir();
    write(
        dir.path(),
        "spawn_tables.ron",
        r#"(byTemplate: {"bad": (pois: Some((countRange: Some((3, 1)))))})"#,
    );
    let tables = SpawnTableLoader::load(&dir.path().join("spawn_tables.ron"))
        .expect("inverted range still loads");
    let pois = tables
        .template("bad")
        .and_then(|table| table.entry_set(ContentKind::Pois))
        .expect("pois entry set");
    assert_eq!(pois.count_range, Some((3, 1)));

    let report = ContentFactory::new(dir.path())
        .load_all()
        .expect("content should load")
        .validate();
    assert!(report.issues.contains(&ContentIssue::InvertedCountRange {
        table: "template:bad".into(),
        kind: ContentKind::Pois,
        min: 3,
        max: 1,
    }));
}

#[test]
fn test_empty_loot_table_loads_and_is_reported() {
    let dir = minimal_dir();
    write(
        dir.path(),
        "loot_tables.ron",
        r#"{"nothing": (rolls: 1, entries: [])}"#,
    );
    let loot = LootTableLoader::load(&dir.path().join("loot_tables.ron"))
        .expect("empty table still loads");
    assert!(loot.contains("nothing"));

    let report = ContentFactory::new(dir.path())
        .load_all()
        .expect("content should load")
        .validate();
    assert!(report.issues.contains(&ContentIssue::EmptyLootTable {
        loot_table_id: "nothing".into(),
    }));
}

#[test]
fn test_duplicate_zone_ids_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "zones.ron",
        r###"(zones: [
            (id: "a", layout: Static(rows: ["#"])),
            (id: "a", layout: Static(rows: ["."])),
        ])"###,
    );
    let err = ContentFactory::new(dir.path())
        .load_zones()
        .expect_err("duplicate id");
    assert!(err.to_string().contains("Duplicate zone definition"));
}
