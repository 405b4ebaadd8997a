//! Integration tests for the presence mask layout
//!
//! Registering a component type after entities already carry presence data
//! must never move or lose the bits of other types.

use deluge_foundation::{EntityId, ErrorKind};
use deluge_storage::{Component, LayoutPolicy, StorageConfig, WORD_BITS, World};

#[derive(Clone, Debug, PartialEq)]
struct Health(i32);
impl Component for Health {}

#[derive(Clone, Debug, PartialEq)]
struct Armor(i32);
impl Component for Armor {}

/// One distinct component type per `N`.
#[derive(Debug, Default)]
struct Marker<const N: usize>;
impl<const N: usize> Component for Marker<N> {}

macro_rules! register_markers {
    ($world:expr; $($n:literal)*) => {
        $( $world.register::<Marker<$n>>().unwrap(); )*
    };
}

fn register_seventy(world: &mut World) {
    register_markers!(world;
    0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33
    34 35 36 37 38 39 40 41 42 43 44 45 46 47 48 49 50 51 52 53 54 55 56 57 58 59 60 61 62 63 64
    65 66 67 68 69
    );
}

#[test]
fn late_type_keeps_earlier_bits() {
    let mut world = World::new();
    let a = world.create();
    world.set(a, Health(1)).unwrap();

    let b = world.create();
    world.set(b, Armor(2)).unwrap();

    assert!(world.has::<Health>(a));
    assert!(world.has::<Armor>(b));
    assert!(!world.has::<Armor>(a));
    assert!(!world.has::<Health>(b));
}

#[test]
fn crossing_a_word_boundary_migrates_rows() {
    let mut world = World::new();
    let ids: Vec<_> = (0..20).map(|_| world.create()).collect();
    for (i, id) in ids.iter().enumerate() {
        if i % 2 == 0 {
            world.set(*id, Health(i32::try_from(i).unwrap())).unwrap();
        }
    }
    world.set(ids[7], Armor(7)).unwrap();

    // Pushes the type count past one word, changing the row stride
    register_seventy(&mut world);
    assert!(world.component_type_count() > WORD_BITS);

    for (i, id) in ids.iter().enumerate() {
        assert_eq!(world.has::<Health>(*id), i % 2 == 0, "entity {i}");
    }
    assert!(world.has::<Armor>(ids[7]));
    assert!(!world.has::<Armor>(ids[6]));
    assert!(!world.has::<Marker<3>>(ids[0]));
}

#[test]
fn types_beyond_the_first_word_behave_like_any_other() {
    let mut world = World::new();
    register_seventy(&mut world);

    let e = world.create();
    world.set(e, Marker::<69>).unwrap();
    world.set(e, Health(1)).unwrap();

    assert!(world.has::<Marker<69>>(e));
    assert!(!world.has::<Marker<68>>(e));
    assert!(world.remove::<Marker<69>>(e));
    assert!(!world.has::<Marker<69>>(e));
    assert!(world.has::<Health>(e));
}

#[test]
fn destroy_clears_the_whole_row() {
    let mut world = World::new();
    register_seventy(&mut world);
    let e0 = world.create();
    let e1 = world.create();
    world.set(e0, Marker::<65>).unwrap();
    world.set(e1, Marker::<65>).unwrap();
    world.set(e1, Marker::<0>).unwrap();

    world.destroy(e1);

    assert!(world.has::<Marker<65>>(e0));
    assert!(!world.has::<Marker<65>>(e1));
    assert!(!world.has::<Marker<0>>(e1));
}

#[test]
fn strict_layout_requires_preregistration() {
    let mut world = World::with_config(StorageConfig::strict());
    assert_eq!(world.config().layout, LayoutPolicy::Frozen);

    world.register::<Health>().unwrap();
    world.register::<Armor>().unwrap();

    let e = world.create();
    world.set(e, Health(1)).unwrap();
    world.set(e, Armor(1)).unwrap();

    let err = world.set(e, Marker::<0>).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LateRegistration { registered: 2, .. }));
    assert!(world.has::<Health>(e));
    assert_eq!(world.component_type_count(), 2);
}

#[test]
fn strict_layout_allows_registration_before_any_data() {
    let mut world = World::with_config(StorageConfig::strict());
    let e = world.create();

    world.set(e, Health(1)).unwrap();
    assert!(world.set(e, Armor(1)).is_err());
    assert!(!world.has::<Armor>(EntityId::new(0)));
}
