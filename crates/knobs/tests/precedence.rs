//! Environment source precedence.

use std::sync::Arc;

use knobs::parse::parse_int;
use knobs::{Definition, MapEnv, Origin, Registry, Scope};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Var {
	Unset,
	Blank,
	Invalid,
	Valid(u32),
}

fn arb_var() -> impl Strategy<Value = Var> {
	prop_oneof![
		Just(Var::Unset),
		Just(Var::Blank),
		Just(Var::Invalid),
		any::<u32>().prop_map(Var::Valid),
	]
}

fn resolve(vars: &[Var], default: u32) -> (u32, Option<Origin>) {
	let mut env = MapEnv::new();
	let mut def = Definition::new(default);
	for (i, var) in vars.iter().enumerate() {
		let key = format!("PRECEDENCE_{i}");
		match var {
			Var::Unset => {}
			Var::Blank => env.insert(key.clone(), "   "),
			Var::Invalid => env.insert(key.clone(), "not-a-number"),
			Var::Valid(v) => env.insert(key.clone(), format!(" {v} ")),
		}
		def = def.env_with(key, parse_int);
	}

	let registry = Arc::new(Registry::new());
	let knob = registry.register(def);
	let scope = Scope::builder().registry(registry).env(env).build();
	(scope.get(knob), scope.origin(knob))
}

proptest! {
	/// The first set, non-blank, parseable source wins; everything else falls
	/// back to the default.
	#[test]
	fn first_accepted_source_wins(vars in prop::collection::vec(arb_var(), 0..6), default in any::<u32>()) {
		let expected = vars.iter().find_map(|var| match var {
			Var::Valid(v) => Some((*v, Some(Origin::Env))),
			_ => None,
		});
		prop_assert_eq!(resolve(&vars, default), expected.unwrap_or((default, Some(Origin::Default))));
	}
}

#[test]
fn preferred_name_beats_legacy_name() {
	let vars = [Var::Valid(2), Var::Valid(1)];
	assert_eq!(resolve(&vars, 0), (2, Some(Origin::Env)));
}

#[test]
fn invalid_preferred_falls_back_to_legacy() {
	let vars = [Var::Invalid, Var::Blank, Var::Valid(9)];
	assert_eq!(resolve(&vars, 0), (9, Some(Origin::Env)));
}

#[test]
fn every_source_rejected_uses_default() {
	let vars = [Var::Invalid, Var::Unset, Var::Blank];
	assert_eq!(resolve(&vars, 5), (5, Some(Origin::Default)));
}
