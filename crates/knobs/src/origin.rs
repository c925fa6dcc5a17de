use std::fmt;

/// Provenance of a knob value.
///
/// [`Origin::Default`] and [`Origin::Env`] are produced by lazy resolution.
/// Writes tagged [`Origin::Code`] are always accepted; every other origin must
/// be declared on the knob's [`Definition`](crate::Definition) before a write
/// carrying it is honored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Origin {
	/// The definition's default value.
	#[default]
	Default,
	/// An environment variable.
	Env,
	/// Application code.
	Code,
	/// Caller-defined provenance, e.g. `Origin::Custom("remote")`.
	Custom(&'static str),
}

impl Origin {
	/// Returns true for origins only lazy resolution may produce.
	pub const fn is_reserved(self) -> bool {
		matches!(self, Origin::Default | Origin::Env)
	}
}

impl fmt::Display for Origin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Origin::Default => f.write_str("default"),
			Origin::Env => f.write_str("env"),
			Origin::Code => f.write_str("code"),
			Origin::Custom(name) => f.write_str(name),
		}
	}
}
