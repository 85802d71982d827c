//! End-to-end scenarios: forwarding and composition cooperating on real
//! object graphs.

use reactor_di::{
    AccessError, CachingStrategy, ConfigError, DeclaredType, ForwardingOptions, Object, Prim,
    Registry, Value, apply_composition, apply_forwarding,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// A `Config` whose attributes exist only at runtime is still forwardable:
/// the deferred bindings prove existence on first access.
#[test]
fn service_forwards_runtime_config_attributes() {
    init_tracing();
    let mut registry = Registry::new();
    let config = registry.define("Config").register().unwrap();
    let service = registry
        .define("Service")
        .annotate("_config", DeclaredType::Class(config))
        .annotate("_host", DeclaredType::Prim(Prim::Str))
        .annotate("_port", DeclaredType::Prim(Prim::Int))
        .register()
        .unwrap();
    apply_forwarding(&mut registry, service, "_config", ForwardingOptions::default());

    let registry = registry.into_shared();
    let cfg = Object::construct(&registry, config).unwrap();
    cfg.set("host", Value::str("localhost"));
    cfg.set("port", Value::Int(5432));

    let svc = Object::construct(&registry, service).unwrap();
    svc.set("_config", Value::Object(cfg));

    assert_eq!(svc.get("_host").unwrap().as_str(), Some("localhost"));
    assert_eq!(svc.get("_port").unwrap().as_int(), Some(5432));
}

/// A composition root wires a whole graph: the module builds the service,
/// the service reaches back through the root for its config, and both
/// caching strategies behave as documented.
#[test]
fn module_composes_a_service_graph() {
    init_tracing();
    let mut registry = Registry::new();
    let config = registry.define("Config").register().unwrap();
    let service = registry
        .define("Service")
        .annotate("_config", DeclaredType::Class(config))
        .register()
        .unwrap();
    let module = registry
        .define("AppModule")
        .annotate("config", DeclaredType::Class(config))
        .annotate("service", DeclaredType::Class(service))
        .register()
        .unwrap();
    apply_composition(&mut registry, module, CachingStrategy::NotThreadSafe).unwrap();

    let registry = registry.into_shared();
    let app = Object::construct(&registry, module).unwrap();

    let service_value = app.get("service").unwrap();
    assert_eq!(service_value, app.get("service").unwrap());
    assert_eq!(registry.construction_count(service), 1);

    let svc = service_value.as_object().unwrap();
    assert_eq!(svc.get("_config").unwrap(), app.get("config").unwrap());
    assert_eq!(registry.construction_count(config), 1);
}

/// Stacked forwarding passes: the close base claims what it can prove, the
/// outer base picks up the rest, and nothing already satisfied is touched.
/// Deferral stays off for the inner pass so unprovable attributes remain
/// available to the outer one.
#[test]
fn stacked_forwarding_resolves_against_the_right_base() {
    init_tracing();
    let mut registry = Registry::new();
    let config = registry
        .define("Config")
        .annotate("timeout", DeclaredType::Prim(Prim::Int))
        .register()
        .unwrap();
    let module = registry
        .define("AppModule")
        .annotate("config", DeclaredType::Class(config))
        .annotate("namespace", DeclaredType::Prim(Prim::Str))
        .register()
        .unwrap();
    let controller = registry
        .define("ResourceController")
        .annotate("_module", DeclaredType::Class(module))
        .annotate("_config", DeclaredType::Class(config))
        .annotate("_timeout", DeclaredType::Prim(Prim::Int))
        .annotate("_namespace", DeclaredType::Prim(Prim::Str))
        .register()
        .unwrap();

    apply_forwarding(
        &mut registry,
        controller,
        "_config",
        ForwardingOptions {
            allow_deferred: false,
            ..ForwardingOptions::default()
        },
    );
    apply_forwarding(&mut registry, controller, "_module", ForwardingOptions::default());

    let registry = registry.into_shared();
    let cfg = Object::construct(&registry, config).unwrap();
    cfg.set("timeout", Value::Int(300));
    let app = Object::construct(&registry, module).unwrap();
    app.set("config", Value::Object(cfg));
    app.set("namespace", Value::str("argocd"));

    let ctl = Object::construct(&registry, controller).unwrap();
    ctl.set("_module", Value::Object(app));

    // _config came from _module, _timeout from _config, _namespace from
    // _module: the exact call chain is ctl -> module -> config.
    assert_eq!(ctl.get("_timeout").unwrap(), Value::Int(300));
    assert_eq!(ctl.get("_namespace").unwrap(), Value::str("argocd"));
}

/// The greedy policy cooperates with a prior reluctant pass and aborts
/// cleanly on genuinely unsatisfiable graphs.
#[test]
fn composition_after_forwarding_and_greedy_failure() {
    init_tracing();
    let mut registry = Registry::new();
    let config = registry.define("Config").register().unwrap();
    let service = registry
        .define("Service")
        .annotate("_config", DeclaredType::Class(config))
        .annotate("_host", DeclaredType::Prim(Prim::Str))
        .register()
        .unwrap();
    apply_forwarding(&mut registry, service, "_config", ForwardingOptions::default());
    // The forwarded attributes count as implemented; only _config remains,
    // and it is constructible.
    apply_composition(&mut registry, service, CachingStrategy::Disabled).unwrap();

    let abstract_store = registry.define("Store").abstract_class().register().unwrap();
    let broken = registry
        .define("BrokenModule")
        .annotate("store", DeclaredType::Class(abstract_store))
        .register()
        .unwrap();
    let err = apply_composition(&mut registry, broken, CachingStrategy::Disabled).unwrap_err();
    let ConfigError::UnsatisfiedDependency { class, attr, required } = err;
    assert_eq!(class, "BrokenModule");
    assert_eq!(attr, "store");
    assert_eq!(required, "Store");
}

/// Decoration never runs user code: synthesizing a whole graph constructs
/// nothing until the first instance access.
#[test]
fn decoration_has_no_construction_side_effects() {
    init_tracing();
    let mut registry = Registry::new();
    let config = registry.define("Config").register().unwrap();
    let service = registry
        .define("Service")
        .annotate("_config", DeclaredType::Class(config))
        .register()
        .unwrap();
    let module = registry
        .define("AppModule")
        .annotate("config", DeclaredType::Class(config))
        .annotate("service", DeclaredType::Class(service))
        .register()
        .unwrap();

    apply_forwarding(&mut registry, service, "_config", ForwardingOptions::default());
    apply_composition(&mut registry, module, CachingStrategy::NotThreadSafe).unwrap();

    assert_eq!(registry.construction_count(config), 0);
    assert_eq!(registry.construction_count(service), 0);
    assert_eq!(registry.construction_count(module), 0);
}

/// Abstract dependencies stay abstract at runtime too.
#[test]
fn factory_output_respects_runtime_errors() {
    init_tracing();
    let mut registry = Registry::new();
    let base = registry
        .define("Store")
        .annotate("backend", DeclaredType::None)
        .bind_abstract("backend")
        .register()
        .unwrap();
    let registry = registry.into_shared();
    let err = Object::construct(&registry, base).unwrap_err();
    assert!(matches!(err, AccessError::AbstractInstantiation { .. }));
}
