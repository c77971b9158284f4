use zone_content::ContentFactory;
use zone_core::{ContentKind, CoreError, FogState};
use zone_runtime::{
    InMemorySaveRepo, InteractionOutcome, RuntimeError, SaveData, SaveRepository, ZoneSession,
};

const WORLD_SEED: &str = "1234";

fn new_session() -> ZoneSession {
    let factory = ContentFactory::bundled();
    let bundle = factory.load_all().expect("bundled content should load");
    let world = factory.load_world(WORLD_SEED).expect("world should load");
    ZoneSession::from_bundle(&bundle, SaveData::new(world)).expect("session should build")
}

fn first_instance(session: &ZoneSession, kind: ContentKind) -> String {
    session
        .active_zone()
        .expect("active zone")
        .content
        .of(kind)
        .first()
        .expect("instance of kind")
        .id
        .clone()
}

#[test]
fn test_enter_zone_marks_slot_generated_and_visited() {
    let mut session = new_session();
    session.enter_zone("tutorial_zone_north").expect("enter");

    let slot = session
        .state()
        .world_slots
        .get("tutorial_zone_north")
        .expect("slot");
    assert!(slot.zone_generated);
    assert_eq!(slot.fog, FogState::Visited);
    assert!(session.population_summary().is_some());
}

#[test]
fn test_unknown_zone_is_an_error() {
    let mut session = new_session();
    let err = session.enter_zone("nowhere").expect_err("no slot");
    assert!(matches!(err, RuntimeError::UnknownZone(ref id) if id == "nowhere"));
    assert_eq!(err.error_code(), "RUNTIME_UNKNOWN_ZONE");
}

#[test]
fn test_harvest_survives_leave_and_reenter() {
    let mut session = new_session();
    session.enter_zone("tutorial_zone").expect("enter");
    let tree = first_instance(&session, ContentKind::ResourceNodes);

    assert_eq!(session.harvest(&tree).expect("harvest"), InteractionOutcome::Applied);
    assert_eq!(session.harvest(&tree).expect("harvest"), InteractionOutcome::Unchanged);

    session.leave_zone().expect("zone was active");
    assert!(session.active_zone().is_none());

    let zone = session.enter_zone("tutorial_zone").expect("re-enter");
    let instance = zone
        .content
        .find(ContentKind::ResourceNodes, &tree)
        .expect("same id after regeneration");
    assert!(instance.flag("harvested"));
}

#[test]
fn test_interactions_check_the_target_kind() {
    let mut session = new_session();
    session.enter_zone("tutorial_zone").expect("enter");
    let rabbit = first_instance(&session, ContentKind::Entities);
    let stash = first_instance(&session, ContentKind::Pois);

    assert!(matches!(
        session.harvest(&rabbit),
        Err(RuntimeError::UnknownInstance { .. })
    ));
    session.defeat(&rabbit).expect("rabbit is an entity");
    session.open(&stash).expect("stash is a poi");
    // Inspection targets any kind.
    session.inspect(&rabbit).expect("inspect entity");
    session.inspect(&stash).expect("inspect poi");
    assert!(session.discover_location(&stash).is_err());

    let zone = session.active_zone().expect("active zone");
    let rabbit = zone.content.find(ContentKind::Entities, &rabbit).expect("rabbit");
    assert!(rabbit.flag("defeated"));
    assert!(rabbit.flag("inspected"));
}

#[test]
fn test_exploration_progress() {
    let mut session = new_session();
    let zone = session.enter_zone("tutorial_zone").expect("enter");
    let total = zone.exploration_stats().total_explorable_tiles;
    assert!(total > 0);

    session.explore_tile(1, 1).expect("walkable");
    assert_eq!(session.explore_tile(1, 1).expect("walkable"), InteractionOutcome::Unchanged);
    assert!(matches!(
        session.explore_tile(0, 0),
        Err(RuntimeError::TileNotExplorable { .. })
    ));
    assert!(session.explore_tile(500, 500).is_err());

    let stats = session.exploration_stats().expect("active zone");
    assert_eq!(stats.explored_tiles, 1);
    assert_eq!(stats.total_explorable_tiles, total);
    assert!(!stats.is_complete);
}

#[test]
fn test_interaction_without_active_zone_fails() {
    let mut session = new_session();
    assert!(matches!(session.harvest("x"), Err(RuntimeError::NoActiveZone)));
    assert!(matches!(session.exploration_stats(), Err(RuntimeError::NoActiveZone)));
}

#[test]
fn test_saved_progress_reproduces_the_zone() {
    let mut session = new_session();
    session.enter_zone("tutorial_zone_west").expect("enter");
    let tree = first_instance(&session, ContentKind::ResourceNodes);
    session.harvest(&tree).expect("harvest");
    let entry = session
        .active_zone()
        .and_then(|zone| zone.entry_spawn)
        .expect("zone has an entry");
    session.explore_tile(entry.x, entry.y).expect("entry is walkable");
    let before = session.active_zone().expect("active zone").clone();

    let repo = InMemorySaveRepo::new();
    repo.save("slot1", &session.into_state()).expect("save");
    let restored = repo.load("slot1").expect("load").expect("slot exists");

    let factory = ContentFactory::bundled();
    let bundle = factory.load_all().expect("bundled content should load");
    let mut session = ZoneSession::from_bundle(&bundle, restored).expect("session should build");
    let after = session.enter_zone("tutorial_zone_west").expect("enter");
    assert_eq!(*after, before);
}
