//! Decoder reference values and rejection cases

use polysolve::decoder::decode;
use polysolve::decoder::DecodeError::{self, InvalidDigit, Overflow, UnsupportedBase};
use polysolve::decoder::DigitFault::{Empty, OutOfRange, Unmappable};
use test_case::test_case;

#[test_case("111", 2 => 7 ; "binary")]
#[test_case("213", 4 => 39 ; "base four top digit")]
#[test_case("a1b2", 16 => 41394 ; "lowercase hex")]
#[test_case("A1b2", 16 => 41394 ; "mixed case hex")]
#[test_case("0", 7 => 0 ; "zero")]
#[test_case("000", 10 => 0 ; "leading zeros only")]
#[test_case("zz", 36 => 1295 ; "base thirty six")]
#[test_case("7fffffffffffffff", 16 => i64::MAX ; "largest value")]
fn decodes(digits: &str, base: u32) -> i64 {
    decode(digits, base).expect("valid digits")
}

#[test_case("z", 10 => matches Err(InvalidDigit(OutOfRange { value: 35, .. })) ; "above base")]
#[test_case("2", 2 => matches Err(InvalidDigit(OutOfRange { position: 0, .. })) ; "equal to base")]
#[test_case("1 0", 10 => matches Err(InvalidDigit(Unmappable { ch: ' ', .. })) ; "embedded space")]
#[test_case("", 10 => matches Err(InvalidDigit(Empty)) ; "empty")]
#[test_case("5", 37 => matches Err(UnsupportedBase(37)) ; "base too large")]
#[test_case("0", 0 => matches Err(UnsupportedBase(0)) ; "base zero")]
#[test_case("8000000000000000", 16 => matches Err(Overflow { .. }) ; "one past max")]
#[test_case("zzzzzzzzzzzzzzzz", 36 => matches Err(Overflow { .. }) ; "far past max")]
fn rejects(digits: &str, base: u32) -> Result<i64, DecodeError> {
    decode(digits, base)
}

#[test]
fn base_is_checked_before_digits() {
    assert_eq!(decode("", 99), Err(UnsupportedBase(99)));
}

#[test]
fn error_message_names_offending_digit() {
    let err = decode("12z", 10).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid digit: digit 'z' (value 35) at position 2 is invalid for base 10"
    );
}
