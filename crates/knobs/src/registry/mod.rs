//! Knob definitions, keyed by [`KnobId`].

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

use crate::{Definition, Knob, KnobId, KnobValue};


static NEXT_ID: AtomicU64 = AtomicU64::new(0);

static GLOBAL: LazyLock<Arc<Registry>> = LazyLock::new(|| Arc::new(Registry::new()));

fn next_id() -> KnobId {
	KnobId(NEXT_ID.fetch_add(1, Ordering::Relaxed).wrapping_add(1))
}

/// What a registry knows about one knob.
#[derive(Clone)]
pub(crate) enum Entry {
	/// Holds an `Arc<Definition<T>>` for the knob's `T`.
	Defined(Arc<dyn Any + Send + Sync>),
	/// Derived knob falling back to `parent`.
	Derived { parent: KnobId },
}

/// Table of knob definitions.
///
/// Registration is append-only; entries leave only through
/// [`unregister`](Self::unregister). A [`Scope`](crate::Scope) resolves
/// against exactly one registry.
#[derive(Default)]
pub struct Registry {
	entries: RwLock<HashMap<KnobId, Entry>>,
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry").field("len", &self.len()).finish()
	}
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}

	/// The process-wide registry used by the free functions.
	pub fn global() -> &'static Arc<Registry> {
		&GLOBAL
	}

	/// Registers `def` under a fresh identifier.
	///
	/// Not idempotent: registering the same definition twice yields two
	/// independent knobs.
	pub fn register<T: KnobValue>(&self, def: Definition<T>) -> Knob<T> {
		let id = next_id();
		tracing::debug!(
			domain = "knobs",
			%id,
			name = def.label().unwrap_or_default(),
			sources = def.sources().len(),
			"knob registered"
		);
		self.entries.write().insert(id, Entry::Defined(Arc::new(def)));
		Knob::new(id)
	}

	/// Creates a knob with no definition that reads through to `parent` until
	/// it is written.
	pub fn derive<T: KnobValue>(&self, parent: Knob<T>) -> Knob<T> {
		let id = next_id();
		tracing::debug!(domain = "knobs", %id, parent = %parent.id(), "knob derived");
		self.entries
			.write()
			.insert(id, Entry::Derived { parent: parent.id() });
		Knob::new(id)
	}

	/// Removes the knob's entry.
	///
	/// Scopes that already hold state for the knob keep it; every other scope
	/// reads `T::default()` from now on.
	pub fn unregister<T>(&self, knob: Knob<T>) -> bool {
		let removed = self.entries.write().remove(&knob.id()).is_some();
		if removed {
			tracing::debug!(domain = "knobs", id = %knob.id(), "knob unregistered");
		}
		removed
	}

	pub fn contains<T>(&self, knob: Knob<T>) -> bool {
		self.entries.read().contains_key(&knob.id())
	}

	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	pub(crate) fn entry(&self, id: KnobId) -> Option<Entry> {
		self.entries.read().get(&id).cloned()
	}
}
