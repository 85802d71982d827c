use crate::model::{DeclaredType, Prim, Registry};
use crate::solver::compat::CompatChecker;

fn sample_types(registry: &mut Registry) -> Vec<DeclaredType> {
    let config = registry.define("SampleConfig").register().unwrap();
    let forward = registry.interner().intern("LaterDefined");
    let opaque = registry.interner().intern("list[int]");
    vec![
        DeclaredType::Class(config),
        DeclaredType::Forward(forward),
        DeclaredType::Prim(Prim::Int),
        DeclaredType::None,
        DeclaredType::Opaque(opaque),
    ]
}

#[test]
fn compatibility_is_reflexive() {
    let mut registry = Registry::new();
    let types = sample_types(&mut registry);
    let mut checker = CompatChecker::new(&registry);
    for ty in types {
        assert!(checker.is_compatible(ty, ty), "{ty:?} incompatible with itself");
    }
}

#[test]
fn subclass_satisfies_superclass_not_vice_versa() {
    let mut registry = Registry::new();
    let base = registry.define("Base").register().unwrap();
    let derived = registry.define("Derived").base(base).register().unwrap();

    let mut checker = CompatChecker::new(&registry);
    assert!(checker.is_compatible(DeclaredType::Class(derived), DeclaredType::Class(base)));
    assert!(!checker.is_compatible(DeclaredType::Class(base), DeclaredType::Class(derived)));
}

#[test]
fn unrelated_concrete_classes_are_incompatible() {
    let mut registry = Registry::new();
    let left = registry.define("Left").register().unwrap();
    let right = registry.define("Right").register().unwrap();
    let mut checker = CompatChecker::new(&registry);
    assert!(!checker.is_compatible(DeclaredType::Class(left), DeclaredType::Class(right)));
}

#[test]
fn forward_references_match_by_name_only() {
    let registry = Registry::new();
    let config = registry.interner().intern("Config");
    let config_again = registry.interner().intern("Config");
    let other = registry.interner().intern("Other");

    let mut checker = CompatChecker::new(&registry);
    assert!(checker.is_compatible(
        DeclaredType::Forward(config),
        DeclaredType::Forward(config_again)
    ));
    assert!(!checker.is_compatible(DeclaredType::Forward(config), DeclaredType::Forward(other)));
}

#[test]
fn primitives_require_an_exact_match() {
    let mut registry = Registry::new();
    let config = registry.define("Config").register().unwrap();
    let mut checker = CompatChecker::new(&registry);

    assert!(checker.is_compatible(DeclaredType::Prim(Prim::Str), DeclaredType::Prim(Prim::Str)));
    assert!(!checker.is_compatible(DeclaredType::Prim(Prim::Int), DeclaredType::Prim(Prim::Str)));
    assert!(!checker.is_compatible(DeclaredType::Prim(Prim::Int), DeclaredType::Class(config)));
    assert!(!checker.is_compatible(DeclaredType::Class(config), DeclaredType::Prim(Prim::Int)));
}

#[test]
fn undecidable_pairings_default_to_compatible() {
    let mut registry = Registry::new();
    let config = registry.define("Config").register().unwrap();
    let opaque = registry.interner().intern("dict[str, int]");
    let forward = registry.interner().intern("Config");
    let mut checker = CompatChecker::new(&registry);

    assert!(checker.is_compatible(DeclaredType::Opaque(opaque), DeclaredType::Class(config)));
    assert!(checker.is_compatible(DeclaredType::Class(config), DeclaredType::Opaque(opaque)));
    assert!(checker.is_compatible(DeclaredType::Forward(forward), DeclaredType::Class(config)));
    assert!(checker.is_compatible(DeclaredType::None, DeclaredType::Class(config)));
}

#[test]
fn protocols_are_structurally_undecidable() {
    let mut registry = Registry::new();
    let readable = registry.define("Readable").protocol().register().unwrap();
    let file = registry.define("File").register().unwrap();
    let mut checker = CompatChecker::new(&registry);

    // File does not nominally descend from Readable; the oracle defers to
    // first use instead of rejecting.
    assert!(checker.is_compatible(DeclaredType::Class(file), DeclaredType::Class(readable)));
    assert!(checker.is_compatible(DeclaredType::Class(readable), DeclaredType::Class(file)));
}
