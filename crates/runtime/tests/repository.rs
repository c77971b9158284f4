use serde_json::json;
use tempfile::TempDir;
use zone_core::{WorldSlot, WorldSlotTable, ZoneDelta};
use zone_runtime::{
    FileSaveRepository, InMemorySaveRepo, RepositoryError, SaveData, SaveRepository,
};

fn sample_save() -> SaveData {
    let mut slots = WorldSlotTable::new();
    slots.insert(WorldSlot::new("tutorial_zone", "1234").with_template("tutorial_zone"));
    let mut save = SaveData::new(slots);
    save.zone_deltas
        .mark_harvested("tutorial_zone", "resourceNodes_oak_tree_3_4");
    save.zone_deltas.mark_tile_explored("tutorial_zone", 2, 5);
    save
}

#[test]
fn test_file_repository_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let repo = FileSaveRepository::new(dir.path()).expect("repo");
    let save = sample_save();

    assert!(!repo.exists("main"));
    repo.save("main", &save).expect("save");
    repo.save("backup", &save).expect("save");
    assert!(repo.exists("main"));
    assert_eq!(repo.list_slots().expect("list"), vec!["backup", "main"]);

    let loaded = repo.load("main").expect("load").expect("slot exists");
    assert_eq!(loaded, save);

    repo.delete("main").expect("delete");
    assert!(repo.load("main").expect("load").is_none());
}

#[test]
fn test_file_repository_repairs_legacy_saves() {
    let dir = TempDir::new().expect("temp dir");
    let repo = FileSaveRepository::new(dir.path()).expect("repo");
    let legacy = json!({
        "version": 0,
        "worldSlots": {},
        "zoneDeltas": {
            "tutorial_zone": {
                "version": 2,
                "harvested": null,
                "defeated": { "entities_wolf_4_4": true },
                "opened": {},
                "inspected": {},
                "discoveredLocations": {}
            }
        }
    });
    std::fs::write(
        repo.save_path("legacy").expect("valid slot"),
        legacy.to_string(),
    )
    .expect("write fixture");

    let mut loaded = repo.load("legacy").expect("load").expect("slot exists");
    let delta = loaded.zone_deltas.get_zone_delta("tutorial_zone");
    assert_eq!(delta.version, ZoneDelta::CURRENT_VERSION);
    assert!(delta.harvested.is_empty());
    assert!(delta.explored_tiles.is_empty());
    assert_eq!(delta.defeated.get("entities_wolf_4_4"), Some(&true));
}

#[test]
fn test_memory_repository_matches_file_behavior() {
    let repo = InMemorySaveRepo::new();
    repo.insert_raw("raw", r#"{"zoneDeltas": null}"#).expect("insert");
    let loaded = repo.load("raw").expect("load").expect("slot exists");
    assert!(loaded.zone_deltas.is_empty());

    repo.insert_raw("broken", r#"{"zoneDeltas": []}"#).expect("insert");
    assert!(repo.load("broken").is_err());
    assert_eq!(repo.list_slots().expect("list"), vec!["broken", "raw"]);
}

#[test]
fn test_both_repositories_reject_the_same_slot_names() {
    let dir = TempDir::new().expect("temp dir");
    let file = FileSaveRepository::new(dir.path()).expect("repo");
    let memory = InMemorySaveRepo::new();
    let repos: [&dyn SaveRepository; 2] = [&file, &memory];
    let save = sample_save();

    for repo in repos {
        for slot in ["../outside", "", "two words", "slot.json"] {
            assert!(
                matches!(repo.save(slot, &save), Err(RepositoryError::InvalidSlot(_))),
                "slot {slot:?} should be rejected"
            );
            assert!(matches!(repo.load(slot), Err(RepositoryError::InvalidSlot(_))));
            assert!(matches!(repo.delete(slot), Err(RepositoryError::InvalidSlot(_))));
            assert!(!repo.exists(slot));
        }
        repo.save("autosave-1", &save).expect("valid slot");
        assert!(repo.exists("autosave-1"));
    }
    assert!(memory.insert_raw("../raw", "{}").is_err());
}
