use std::any::Any;

use ember2d::ecs::{kind_id, Registry, System, SystemBase};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct KindA(u32);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct KindB(u32);

struct RequiresA {
    base: SystemBase,
}

impl RequiresA {
    fn new() -> Self {
        let mut base = SystemBase::new();
        base.require::<KindA>();
        Self { base }
    }
}

impl System for RequiresA {
    fn name(&self) -> &'static str {
        "requires_a"
    }

    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct RequiresBoth {
    base: SystemBase,
}

impl RequiresBoth {
    fn new() -> Self {
        let mut base = SystemBase::new();
        base.require::<KindA>();
        base.require::<KindB>();
        Self { base }
    }
}

impl System for RequiresBoth {
    fn name(&self) -> &'static str {
        "requires_both"
    }

    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[test]
fn kind_ids_are_stable_within_a_process() {
    let a_first = kind_id::<KindA>();
    let b_first = kind_id::<KindB>();

    for _ in 0..10 {
        assert_eq!(kind_id::<KindA>(), a_first);
        assert_eq!(kind_id::<KindB>(), b_first);
    }
    assert_ne!(a_first, b_first);
}

#[test]
fn matching_respects_required_signature() {
    let mut registry = Registry::new();
    registry.add_system(RequiresA::new());

    let e0 = registry.create_entity();
    let e1 = registry.create_entity();
    let e2 = registry.create_entity();

    registry.add_component(e0, KindA(0));
    registry.add_component(e1, KindA(1));

    registry.update();

    let matched = registry.system::<RequiresA>().unwrap().base().entities();
    assert_eq!(matched, vec![e0, e1]);
    assert!(!matched.contains(&e2));
}

#[test]
fn entity_is_invisible_until_update() {
    let mut registry = Registry::new();
    registry.add_system(RequiresA::new());

    let entity = registry.create_entity();
    registry.add_component(entity, KindA(7));

    // signature already satisfies the system, membership still waits
    assert!(registry.has_component::<KindA>(entity));
    assert!(registry.system::<RequiresA>().unwrap().base().is_empty());

    registry.update();
    assert_eq!(
        registry.system::<RequiresA>().unwrap().base().entities(),
        vec![entity]
    );
}

#[test]
fn entity_can_match_several_systems_at_once() {
    let mut registry = Registry::new();
    registry.add_system(RequiresA::new());
    registry.add_system(RequiresBoth::new());

    let entity = registry.create_entity();
    registry.add_component(entity, KindA(1));
    registry.add_component(entity, KindB(2));

    registry.update();

    let only_a = registry.system::<RequiresA>().unwrap().base().entities();
    let both = registry.system::<RequiresBoth>().unwrap().base().entities();
    assert_eq!(only_a, vec![entity]);
    assert_eq!(both, vec![entity]);
}

#[test]
fn membership_goes_stale_after_component_removal() {
    let mut registry = Registry::new();
    registry.add_system(RequiresA::new());

    let entity = registry.create_entity();
    registry.add_component(entity, KindA(3));
    registry.update();

    registry.remove_component::<KindA>(entity);

    // presence is immediate, membership is not retroactively revoked
    assert!(!registry.has_component::<KindA>(entity));
    assert_eq!(
        registry.system::<RequiresA>().unwrap().base().entities(),
        vec![entity]
    );
}

#[test]
fn signature_bits_are_idempotent() {
    let mut registry = Registry::new();
    let entity = registry.create_entity();

    // removing a kind that was never attached changes nothing
    registry.remove_component::<KindB>(entity);
    assert!(!registry.has_component::<KindB>(entity));

    // attaching twice keeps one bit and the second value wins
    registry.add_component(entity, KindA(1));
    registry.add_component(entity, KindA(2));
    assert!(registry.has_component::<KindA>(entity));
    assert_eq!(registry.get_component::<KindA>(entity).unwrap(), &KindA(2));

    registry.remove_component::<KindA>(entity);
    assert!(!registry.has_component::<KindA>(entity));
    assert!(registry.get_component::<KindA>(entity).is_err());
}

#[test]
fn killed_entity_leaves_every_system() {
    let mut registry = Registry::new();
    registry.add_system(RequiresA::new());
    registry.add_system(RequiresBoth::new());

    let keeper = registry.create_entity();
    let victim = registry.create_entity();
    for entity in [keeper, victim] {
        registry.add_component(entity, KindA(0));
        registry.add_component(entity, KindB(0));
    }
    registry.update();

    registry.kill_entity(victim);
    // membership changes wait for the synchronization point
    assert_eq!(registry.system::<RequiresA>().unwrap().base().len(), 2);

    registry.update();
    assert_eq!(
        registry.system::<RequiresA>().unwrap().base().entities(),
        vec![keeper]
    );
    assert_eq!(
        registry.system::<RequiresBoth>().unwrap().base().entities(),
        vec![keeper]
    );
    assert!(!registry.has_component::<KindA>(victim));
}

#[test]
fn ids_stay_monotonic_across_kills() {
    let mut registry = Registry::new();
    let first = registry.create_entity();
    registry.kill_entity(first);
    registry.update();

    let second = registry.create_entity();
    assert_eq!(second.id(), first.id() + 1);
    assert_eq!(registry.entity_count(), 2);
}
