//! The process-wide registry and default scope.
//!
//! Tests that swap the default scope run serially; the others only register
//! fresh knobs and never observe each other.

use std::sync::Arc;

use knobs::{Definition, MapEnv, Origin, Registry, Scope};
use serial_test::serial;

fn sandbox(env: MapEnv) -> Scope {
	Scope::builder().env(env).build()
}

#[test]
#[serial]
fn free_functions_use_the_default_scope() {
	knobs::set_default_scope(sandbox(MapEnv::new()));

	let knob = knobs::register(Definition::new("default".to_string()));
	assert_eq!(knobs::get(knob), "default");
	assert_eq!(knobs::origin(knob), Some(Origin::Default));

	knobs::set(knob, Origin::Code, "new value".to_string());
	assert_eq!(knob.get(), "new value");
	assert_eq!(knobs::default_scope().get(knob), "new value");
}

#[test]
#[serial]
fn replacing_the_default_scope_isolates_values() {
	knobs::set_default_scope(sandbox(MapEnv::new()));
	let knob = knobs::register(Definition::new(1u32));
	knobs::set(knob, Origin::Code, 2);

	let previous = knobs::set_default_scope(sandbox(MapEnv::new()));
	assert_eq!(knobs::get(knob), 1);
	assert_eq!(previous.get(knob), 2);

	knobs::set_default_scope(previous);
	assert_eq!(knobs::get(knob), 2);
}

#[test]
#[serial]
fn default_scope_reads_its_environment() {
	knobs::set_default_scope(sandbox(MapEnv::new().with("DEFAULT_SCOPE_LEVEL", "debug")));
	let knob = knobs::register(Definition::new("info".to_string()).env("DEFAULT_SCOPE_LEVEL"));

	assert_eq!(knobs::get(knob), "debug");
	assert_eq!(knob.origin(), Some(Origin::Env));
}

#[test]
#[serial]
fn derived_knobs_through_free_functions() {
	knobs::set_default_scope(sandbox(MapEnv::new()));
	let knob = knobs::register(Definition::new("default".to_string()));
	let derived = knobs::derive(knob);

	knobs::set(derived, Origin::Code, "overridden".to_string());
	assert_eq!(knobs::get(derived), "overridden");
	assert_eq!(knobs::get(knob), "default");
}

#[test]
#[serial]
fn unregister_through_free_functions() {
	knobs::set_default_scope(sandbox(MapEnv::new()));
	let knob = knobs::register(Definition::new(5i64));
	assert!(Registry::global().contains(knob));

	assert!(knobs::unregister(knob));
	assert!(!Registry::global().contains(knob));
	assert_eq!(knobs::get(knob), 0);
}

#[test]
fn explicit_scopes_share_the_global_registry() {
	let knob = knobs::register(Definition::new(3u8));
	let a = sandbox(MapEnv::new());
	let b = sandbox(MapEnv::new());

	knobs::set_scope(&a, knob, Origin::Code, 4);
	assert_eq!(knobs::get_scope(&a, knob), 4);
	assert_eq!(knob.get_in(&b), 3);
	assert!(Arc::ptr_eq(a.registry(), Registry::global()));
}

#[test]
fn handle_methods_mirror_scope_methods() {
	let knob = knobs::register(Definition::new(false).origin(Origin::Custom("flags")));
	let scope = sandbox(MapEnv::new());

	knob.set_in(&scope, Origin::Custom("flags"), true);
	assert!(knob.get_in(&scope));
	assert_eq!(knob.origin_in(&scope), Some(Origin::Custom("flags")));
}
