//! Integration tests for the tick driver
//!
//! Tests phase ordering across component types, entities and frames.

use std::cell::RefCell;
use std::rc::Rc;

use deluge_engine::{Entity, TickDriver, reset, run_frame};
use deluge_foundation::EntityId;
use deluge_storage::{Component, Phase, TickContext, Velocity, World};

type Log = Rc<RefCell<Vec<(Phase, &'static str, u32)>>>;

struct Position {
    x: f32,
    y: f32,
    velocity: Velocity,
    log: Log,
}

impl Component for Position {
    fn update(&mut self, ctx: &TickContext<'_>) {
        self.x += self.velocity.x;
        self.y += self.velocity.y;
        self.log
            .borrow_mut()
            .push((ctx.phase(), "position", ctx.entity().raw()));
    }

    fn draw(&self, ctx: &TickContext<'_>) {
        self.log
            .borrow_mut()
            .push((ctx.phase(), "position", ctx.entity().raw()));
    }
}

struct Sprite {
    log: Log,
}

impl Component for Sprite {
    fn draw(&self, ctx: &TickContext<'_>) {
        self.log
            .borrow_mut()
            .push((ctx.phase(), "sprite", ctx.entity().raw()));
    }
}

fn position(log: &Log, dx: f32) -> Position {
    Position {
        x: 0.0,
        y: 0.0,
        velocity: Velocity::new(dx, 0.0),
        log: Rc::clone(log),
    }
}

// =============================================================================
// Phase Ordering
// =============================================================================

#[test]
fn all_updates_run_before_any_draw() {
    let log = Log::default();
    let mut world = World::new();
    let a = world.create();
    let b = world.create();
    world.set(b, position(&log, 1.0)).unwrap();
    world.set(a, Sprite { log: Rc::clone(&log) }).unwrap();
    world.set(a, position(&log, 1.0)).unwrap();

    TickDriver::new().run_frame(&mut world);

    assert_eq!(
        *log.borrow(),
        vec![
            (Phase::Update, "position", 0),
            (Phase::Update, "position", 1),
            (Phase::Draw, "position", 0),
            (Phase::Draw, "position", 1),
            (Phase::Draw, "sprite", 0),
        ]
    );
}

#[test]
fn updates_accumulate_across_frames() {
    let log = Log::default();
    let mut world = World::new();
    let e = world.create();
    world.set(e, position(&log, 2.5)).unwrap();

    let mut driver = TickDriver::new();
    for _ in 0..4 {
        driver.run_frame(&mut world);
    }

    assert_eq!(world.get::<Position>(e).unwrap().x, 10.0);
    assert_eq!(driver.frame(), 4);
}

#[test]
fn components_added_mid_run_join_next_frame() {
    let log = Log::default();
    let mut world = World::new();
    let mut driver = TickDriver::new();

    let e = world.create();
    world.set(e, position(&log, 1.0)).unwrap();
    driver.run_frame(&mut world);

    let late = world.create();
    world.set(late, Sprite { log: Rc::clone(&log) }).unwrap();
    let stats = driver.run_frame(&mut world);

    assert_eq!(stats.updated, 2);
    assert_eq!(stats.drawn, 2);
}

// =============================================================================
// Default World
// =============================================================================

#[test]
fn default_world_frame_runs_handle_components() {
    reset();
    let log = Log::default();
    let e = Entity::create().set(position(&log, 3.0)).unwrap();

    let stats = run_frame();

    assert_eq!(stats.frame, 0);
    assert_eq!(stats.updated, 1);
    assert_eq!(e.with::<Position, _>(|p| p.x).unwrap(), 3.0);
}

// =============================================================================
// Hooks Reading Their Owner
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
struct Tint(u8);
impl Component for Tint {}

type DrawQueue = Rc<RefCell<Vec<(f32, u8)>>>;

struct Renderer {
    owner: Option<EntityId>,
    queue: DrawQueue,
}

impl Renderer {
    fn new(queue: &DrawQueue) -> Self {
        Self {
            owner: None,
            queue: Rc::clone(queue),
        }
    }
}

impl Component for Renderer {
    fn attach(&mut self, owner: EntityId) {
        self.owner = Some(owner);
    }

    fn draw(&self, _ctx: &TickContext<'_>) {
        let Some(owner) = self.owner.map(Entity::from_id) else {
            return;
        };
        if !owner.has::<Velocity>() || !owner.has::<Tint>() {
            return;
        }

        let velocity = owner.get::<Velocity>().unwrap();
        let tint = owner.get::<Tint>().unwrap();
        self.queue.borrow_mut().push((velocity.x, tint.0));
    }
}

#[test]
fn draw_hooks_read_siblings_through_their_owner() {
    reset();
    let queue = DrawQueue::default();
    let e = Entity::create()
        .set(Velocity::new(1.5, 0.0))
        .unwrap()
        .set(Tint(9))
        .unwrap()
        .set(Renderer::new(&queue))
        .unwrap();
    let bare = Entity::create().set(Renderer::new(&queue)).unwrap();

    let stats = run_frame();

    // Velocity and Tint are walked too, with no-op hooks
    assert_eq!(stats.drawn, 4);
    assert_eq!(*queue.borrow(), vec![(1.5, 9)]);
    assert!(bare.has::<Renderer>());

    e.with_mut::<Velocity, _>(|v| v.x = 3.0).unwrap();
    run_frame();
    assert_eq!(queue.borrow().last(), Some(&(3.0, 9)));
}

struct Drift;

impl Component for Drift {
    fn update(&mut self, ctx: &TickContext<'_>) {
        let owner = Entity::from_id(ctx.entity());
        let speed = owner.get::<Velocity>().map_or(0.0, |v| v.x);
        owner.set(Velocity::new(speed + 1.0, 0.0)).unwrap();
    }
}

#[test]
fn update_hooks_write_siblings_through_their_owner() {
    reset();
    let e = Entity::create().set(Drift).unwrap();

    run_frame();
    run_frame();

    assert_eq!(e.get::<Velocity>().unwrap().x, 2.0);
    assert!(e.has::<Drift>());
}

#[test]
fn plain_world_hooks_use_their_context() {
    struct Trail {
        seen: Vec<f32>,
    }
    impl Component for Trail {
        fn update(&mut self, ctx: &TickContext<'_>) {
            if let Ok(velocity) = ctx.world().get::<Velocity>(ctx.entity()) {
                self.seen.push(velocity.x);
            }
        }
    }

    let mut world = World::new();
    let e = world.create();
    world.set(e, Velocity::new(4.0, 0.0)).unwrap();
    world.set(e, Trail { seen: Vec::new() }).unwrap();

    let mut driver = TickDriver::new();
    driver.run_frame(&mut world);
    driver.run_frame(&mut world);

    assert_eq!(world.get::<Trail>(e).unwrap().seen, vec![4.0, 4.0]);
}
