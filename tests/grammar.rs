use coltype::grammar::{
    is_double, is_integer, is_logical, parse_double, parse_integer, parse_logical,
};

#[test]
fn logical_literals_are_exact_and_case_sensitive() {
    for token in ["TRUE", "FALSE", "T", "F", "True", "False", "true", "false", "1", "0"] {
        assert!(is_logical(token), "expected '{token}' to be logical");
    }
    for token in ["TRuE", "tRUE", "yes", "no", "t", "f", "2", ""] {
        assert!(!is_logical(token), "expected '{token}' to be rejected");
    }
}

#[test]
fn parse_logical_maps_truthy_and_falsy_spellings() {
    assert_eq!(parse_logical("TRUE"), Some(true));
    assert_eq!(parse_logical("T"), Some(true));
    assert_eq!(parse_logical("1"), Some(true));
    assert_eq!(parse_logical("false"), Some(false));
    assert_eq!(parse_logical("0"), Some(false));
    assert_eq!(parse_logical("maybe"), None);
}

#[test]
fn integer_grammar_accepts_sign_and_digits_only() {
    assert!(is_integer("0"));
    assert!(is_integer("42"));
    assert!(is_integer("-17"));
    assert!(is_integer("+8"));
    assert!(is_integer("007"));

    assert!(!is_integer(""));
    assert!(!is_integer("+"));
    assert!(!is_integer("-"));
    assert!(!is_integer("1.0"));
    assert!(!is_integer("1e3"));
    assert!(!is_integer("1,000"));
    assert!(!is_integer(" 1"));
    assert!(!is_integer("12a"));
}

#[test]
fn parse_integer_rejects_out_of_range_values() {
    assert_eq!(parse_integer("42"), Some(42));
    assert_eq!(parse_integer("-9223372036854775808"), Some(i64::MIN));
    // Syntactically valid but unrepresentable: None, not a wraparound.
    assert_eq!(parse_integer("99999999999999999999"), None);
    assert_eq!(parse_integer("abc"), None);
}

#[test]
fn double_grammar_accepts_point_and_exponent_forms() {
    assert!(is_double("1"));
    assert!(is_double("-1.5"));
    assert!(is_double("+0.25"));
    assert!(is_double("2e10"));
    assert!(is_double("3.14E-2"));
    assert!(is_double("6.02e+23"));

    assert!(!is_double(""));
    assert!(!is_double("."));
    assert!(!is_double(".5"));
    assert!(!is_double("1."));
    assert!(!is_double("1e"));
    assert!(!is_double("1e+"));
    assert!(!is_double("1.2.3"));
    assert!(!is_double("1 000"));
    assert!(!is_double("abc"));
}

#[test]
fn double_grammar_accepts_special_tokens() {
    assert!(is_double("NaN"));
    assert!(is_double("Inf"));
    assert!(is_double("-Inf"));
    assert!(is_double("+Inf"));
    assert!(is_double("Infinity"));
    assert!(is_double("-Infinity"));

    assert!(!is_double("nan"));
    assert!(!is_double("inf"));
    assert!(!is_double("NAN"));
    assert!(!is_double("-NaN"));
}

#[test]
fn parse_double_converts_specials_to_ieee_values() {
    assert!(parse_double("NaN").unwrap().is_nan());
    assert_eq!(parse_double("Inf"), Some(f64::INFINITY));
    assert_eq!(parse_double("-Inf"), Some(f64::NEG_INFINITY));
    assert_eq!(parse_double("2.5"), Some(2.5));
    assert_eq!(parse_double("1e3"), Some(1000.0));
    assert_eq!(parse_double("x"), None);
}
