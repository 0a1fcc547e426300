//! End-to-end lifecycle tests against the public API: the full
//! register / create / attach / query / kill / compact / clear cycle.

use bytemuck::{Pod, Zeroable};
use signet_core::{Component, ComponentId, Manager, Registry, Signature, SignatureId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
struct Health {
    hp: f32,
}
impl Component for Health {
    const ID: ComponentId = 0;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
struct Circle {
    radius: f32,
}
impl Component for Circle {
    const ID: ComponentId = 1;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
struct Input {
    key: f32,
}
impl Component for Input {
    const ID: ComponentId = 2;
}

struct SigVelocity;
impl Signature for SigVelocity {
    const ID: SignatureId = 0;
    type Components = (Input, Circle);
}

struct SigLife;
impl Signature for SigLife {
    const ID: SignatureId = 1;
    type Components = (Health,);
}

fn manager() -> Manager {
    let registry = Registry::builder()
        .component::<Health>()
        .component::<Circle>()
        .component::<Input>()
        .signature::<SigVelocity>()
        .signature::<SigLife>()
        .build()
        .expect("valid registration");
    Manager::new(registry)
}

#[test]
fn test_health_entities_and_one_mover() {
    let mut manager = manager();

    // 40 entities carrying Health, one carrying Input + Circle
    for i in 0..40 {
        let e = manager.create_entity();
        manager.add_component(e, Health { hp: i as f32 });
    }
    let mover = manager.create_entity();
    manager.add_component(mover, Input { key: 1.0 });
    manager.add_component(mover, Circle { radius: 5.0 });

    assert_eq!(manager.entity_count(), 0);
    assert_eq!(manager.refresh(), 41);

    let mut life_hits = 0;
    manager.for_each_matching::<SigLife, _>(|_e, (health,): (&mut Health,)| {
        assert!(health.hp >= 0.0);
        life_hits += 1;
    });
    assert_eq!(life_hits, 40);

    let mut velocity_hits = 0;
    manager.for_each_matching::<SigVelocity, _>(
        |_e, (input, circle): (&mut Input, &mut Circle)| {
            assert_eq!(input.key, 1.0);
            assert_eq!(circle.radius, 5.0);
            velocity_hits += 1;
        },
    );
    assert_eq!(velocity_hits, 1);
}

#[test]
fn test_churn_preserves_survivor_payloads() {
    let mut manager = manager();

    for i in 0..60 {
        let e = manager.create_entity();
        manager.add_component(e, Health { hp: i as f32 });
        if i % 2 == 0 {
            manager.add_component(e, Circle { radius: i as f32 });
        }
    }
    manager.refresh();

    // kill a third of them
    let killed: Vec<usize> = (0..60).filter(|e| e % 3 == 0).collect();
    for &e in &killed {
        manager.kill(e);
    }
    assert_eq!(manager.refresh(), 40);

    let mut survivors: Vec<f32> = Vec::new();
    manager.for_each_matching::<SigLife, _>(|_e, (health,): (&mut Health,)| {
        survivors.push(health.hp);
    });
    survivors.sort_by(f32::total_cmp);

    let expected: Vec<f32> = (0..60)
        .filter(|i| i % 3 != 0)
        .map(|i| i as f32)
        .collect();
    assert_eq!(survivors, expected);
}

#[test]
fn test_clear_then_rebuild_from_slot_zero() {
    let mut manager = manager();

    for _ in 0..10 {
        let e = manager.create_entity();
        manager.add_component(e, Health { hp: 7.0 });
    }
    manager.refresh();

    manager.clear();
    assert_eq!(manager.entity_count(), 0);

    let e = manager.create_entity();
    assert_eq!(e, 0);
    assert!(!manager.has_component::<Health>(e));

    manager.add_component(e, Health { hp: 80.0 });
    manager.refresh();
    assert_eq!(manager.entity_count(), 1);
    assert_eq!(manager.get_component::<Health>(e).hp, 80.0);
}

#[test]
fn test_repeated_create_kill_cycles_stay_consistent() {
    let mut manager = manager();
    let mut expected_alive = 0usize;

    for round in 0..8 {
        for _ in 0..30 {
            let e = manager.create_entity();
            manager.add_component(e, Health { hp: round as f32 });
        }
        expected_alive += 30;
        assert_eq!(manager.refresh(), expected_alive);

        for e in 0..manager.entity_count() {
            if e % 4 == round % 4 {
                manager.kill(e);
            }
        }
        let killed = (0..expected_alive)
            .filter(|e| e % 4 == round % 4)
            .count();
        expected_alive -= killed;
        assert_eq!(manager.refresh(), expected_alive);

        // every committed slot is alive and readable
        manager.for_each(|e| {
            assert!(manager.is_alive(e));
            let _ = manager.get_component::<Health>(e);
        });
    }
}
