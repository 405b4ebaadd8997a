//! Integration tests for entity handles
//!
//! Tests the public handle surface against the default world.

use deluge_engine::{Entity, install, reset, with_world};
use deluge_foundation::{EntityId, ErrorKind};
use deluge_storage::{Component, StorageConfig, Velocity, World};

#[derive(Clone, Debug, PartialEq)]
struct Health(i32);
impl Component for Health {}

#[derive(Clone, Debug, PartialEq, Default)]
struct Follower {
    owner: Option<EntityId>,
}

impl Component for Follower {
    fn attach(&mut self, owner: EntityId) {
        self.owner = Some(owner);
    }
}

// =============================================================================
// Handle Surface
// =============================================================================

#[test]
fn scenario_velocity() {
    reset();
    let a = Entity::create();
    a.set(Velocity::new(1.0, 2.0)).unwrap();

    assert!(a.has::<Velocity>());
    assert_eq!(a.get::<Velocity>().unwrap().x, 1.0);
}

#[test]
fn scenario_overwrite() {
    reset();
    let a = Entity::create();
    a.set(Velocity::new(1.0, 1.0)).unwrap();
    a.set(Velocity::new(2.0, 3.0)).unwrap();

    assert_eq!(a.get::<Velocity>().unwrap(), Velocity::new(2.0, 3.0));
}

#[test]
fn handles_compare_by_id() {
    reset();
    let a = Entity::create();
    assert_eq!(a, Entity::from_id(a.id()));
    assert_ne!(a, Entity::create());
}

#[test]
fn set_chains() {
    reset();
    let e = Entity::create()
        .set(Health(10))
        .and_then(|e| e.set(Velocity::default()))
        .unwrap();

    assert!(e.has::<Health>());
    assert!(e.has::<Velocity>());
}

#[test]
fn set_hands_payload_its_owner() {
    reset();
    Entity::create();
    let e = Entity::create().set(Follower::default()).unwrap();

    assert_eq!(e.get::<Follower>().unwrap().owner, Some(EntityId::new(1)));
}

#[test]
fn get_missing_fails() {
    reset();
    let e = Entity::create();
    let err = e.get::<Health>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ComponentNotFound { .. }));
}

#[test]
fn destroy_clears_components() {
    reset();
    let ids: Vec<_> = (0..6).map(|_| Entity::create()).collect();
    for e in &ids {
        e.set(Health(1)).unwrap();
    }

    assert!(ids[5].destroy());

    assert!(!ids[5].has::<Health>());
    assert!(ids[4].has::<Health>());
    assert_eq!(with_world(World::entity_count), 5);
}

#[test]
fn remove_is_idempotent() {
    reset();
    let e = Entity::create().set(Health(1)).unwrap();

    assert!(e.remove::<Health>());
    assert!(e.remove::<Health>());
    assert!(!e.has::<Health>());
}

// =============================================================================
// Default World Configuration
// =============================================================================

#[test]
fn installed_world_config_applies_to_handles() {
    install(World::with_config(StorageConfig::strict()));
    let e = Entity::create().set(Health(1)).unwrap();

    let err = e.set(Velocity::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LateRegistration { .. }));
    reset();
}
