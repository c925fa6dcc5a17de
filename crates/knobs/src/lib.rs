//! Typed, origin-aware runtime configuration knobs.
//!
//! A knob is declared once with a default, an ordered list of environment
//! variables, and the origins allowed to change it at runtime. Its value is
//! resolved lazily on first read and cached per [`Scope`].
//!
//! - [`Definition`] / [`EnvSource`] - what a knob is and where it comes from
//! - [`Registry`] - definitions keyed by id, handing out [`Knob`] handles
//! - [`Scope`] - isolated resolved values; one default scope per process
//! - [`Origin`] - provenance tags gating runtime writes
//!
//! # Example
//!
//! ```
//! use knobs::{Definition, MapEnv, Origin, Registry, Scope};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(Registry::new());
//! let scope = Scope::builder()
//! 	.registry(Arc::clone(&registry))
//! 	.env(MapEnv::new().with("B", "env_b"))
//! 	.build();
//!
//! let knob = registry.register(Definition::new("x".to_string()).env("A").env("B"));
//! assert_eq!(scope.get(knob), "env_b");
//! assert_eq!(scope.origin(knob), Some(Origin::Env));
//!
//! scope.set(knob, Origin::Code, "manual".to_string());
//! let derived = registry.derive(knob);
//! assert_eq!(scope.get(derived), "manual");
//! ```
//!
//! # Logging
//!
//! Rejected environment values and dropped writes are reported as `tracing`
//! events under `domain = "knobs"`. Install a subscriber to observe them.

mod definition;
mod env;
mod error;
mod knob;
mod origin;
pub mod parse;
mod registry;
mod scope;
mod source;
mod state;
mod value;

pub use definition::Definition;
pub use env::{Environment, MapEnv, ProcessEnv};
pub use error::KnobError;
pub use knob::{Knob, KnobId};
pub use origin::Origin;
pub use registry::Registry;
pub use scope::{Scope, ScopeBuilder, default_scope, set_default_scope};
pub use source::{EnvSource, Transform};
pub use value::KnobValue;

/// Registers `def` in [`Registry::global`].
pub fn register<T: KnobValue>(def: Definition<T>) -> Knob<T> {
	Registry::global().register(def)
}

/// Derives a knob from `parent` in [`Registry::global`].
pub fn derive<T: KnobValue>(parent: Knob<T>) -> Knob<T> {
	Registry::global().derive(parent)
}

/// Removes `knob` from [`Registry::global`].
pub fn unregister<T>(knob: Knob<T>) -> bool {
	Registry::global().unregister(knob)
}

/// Reads `knob` from the [`default_scope`].
pub fn get<T: KnobValue>(knob: Knob<T>) -> T {
	default_scope().get(knob)
}

/// Reads `knob` from `scope`.
pub fn get_scope<T: KnobValue>(scope: &Scope, knob: Knob<T>) -> T {
	scope.get(knob)
}

/// Writes `knob` in the [`default_scope`]; see [`Scope::set`].
pub fn set<T: KnobValue>(knob: Knob<T>, origin: Origin, value: T) {
	default_scope().set(knob, origin, value);
}

pub fn set_scope<T: KnobValue>(scope: &Scope, knob: Knob<T>, origin: Origin, value: T) {
	scope.set(knob, origin, value);
}

pub fn origin<T: KnobValue>(knob: Knob<T>) -> Option<Origin> {
	default_scope().origin(knob)
}
