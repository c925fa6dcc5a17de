use super::*;

#[test]
fn map_env_lookup() {
	let mut env = MapEnv::new().with("MY_ENV", "something");
	assert_eq!(env.lookup("MY_ENV").as_deref(), Some("something"));
	assert_eq!(env.lookup("OTHER"), None);

	assert_eq!(env.remove("MY_ENV").as_deref(), Some("something"));
	assert_eq!(env.lookup("MY_ENV"), None);
}

#[test]
fn map_env_from_pairs() {
	let env: MapEnv = [("A", "1"), ("B", "2")].into_iter().collect();
	assert_eq!(env.lookup("B").as_deref(), Some("2"));
}

#[test]
fn closures_are_environments() {
	let env = |key: &str| (key == "ONLY").then(|| "value".to_string());
	assert_eq!(env.lookup("ONLY").as_deref(), Some("value"));
	assert_eq!(env.lookup("NOPE"), None);
}

#[test]
fn process_env_reports_unrepresentable_keys_as_unset() {
	assert_eq!(ProcessEnv.lookup(""), None);
	assert_eq!(ProcessEnv.lookup("A=B"), None);
	assert_eq!(ProcessEnv.lookup("A\0B"), None);
}

#[test]
fn process_env_reads_cargo_provided_vars() {
	// cargo exports this to every test binary it runs
	assert!(ProcessEnv.lookup("CARGO_MANIFEST_DIR").is_some());
}
