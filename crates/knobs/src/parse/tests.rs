use rstest::rstest;

use super::*;

#[rstest]
#[case("1", true)]
#[case("t", true)]
#[case("TRUE", true)]
#[case("True", true)]
#[case("0", false)]
#[case("f", false)]
#[case("FALSE", false)]
#[case("false", false)]
fn parse_bool_accepts(#[case] raw: &str, #[case] expected: bool) {
	assert_eq!(parse_bool(raw), Ok(expected));
}

#[rstest]
#[case("yes")]
#[case("tRuE")]
#[case("2")]
#[case("")]
fn parse_bool_rejects(#[case] raw: &str) {
	assert_eq!(parse_bool(raw), Err(KnobError::invalid("boolean", raw)));
}

#[test]
fn parse_int_handles_sign_and_width() {
	assert_eq!(parse_int::<i64>("-42"), Ok(-42));
	assert_eq!(parse_int::<u8>("255"), Ok(255));
	assert!(parse_int::<u8>("256").is_err());
	assert!(parse_int::<u32>("-1").is_err());
}

#[test]
fn parse_int_rejects_floats() {
	assert_eq!(parse_int::<i32>("1.0"), Err(KnobError::invalid("integer", "1.0")));
}

#[test]
fn parse_float_accepts_integers_and_exponents() {
	assert_eq!(parse_float::<f64>("3"), Ok(3.0));
	assert_eq!(parse_float::<f64>("2.5e2"), Ok(250.0));
	assert!(parse_float::<f32>("fast").is_err());
}

#[test]
fn parse_string_is_identity() {
	assert_eq!(parse_string(" padded "), Ok(" padded ".to_string()));
}

#[test]
fn error_messages_name_the_value() {
	let err = parse_int::<i64>("ten").unwrap_err();
	assert_eq!(err.to_string(), "invalid integer: 'ten'");
}
