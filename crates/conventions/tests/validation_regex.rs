//! Golden match sets for the default format patterns
//!
//! The patterns are written for database regex engines. The credit card class
//! `[\d- ]` puts a hyphen after a class escape, which the `regex` crate
//! rejects as a range, so it is escaped before compiling here.

use checkwright_conventions::{
    DEFAULT_CREDIT_CARD_REGEX, DEFAULT_EMAIL_ADDRESS_REGEX, DEFAULT_PHONE_REGEX, DEFAULT_URL_REGEX,
};
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    let pattern = pattern.replace(r"\d-", r"\d\-");
    Regex::new(&pattern).unwrap_or_else(|e| panic!("pattern {:?} does not compile: {}", pattern, e))
}

fn assert_matches(pattern: &str, inputs: &[&str]) {
    let regex = compile(pattern);
    for input in inputs {
        assert!(regex.is_match(input), "{:?} should match {}", input, pattern);
    }
}

fn assert_no_match(pattern: &str, inputs: &[&str]) {
    let regex = compile(pattern);
    for input in inputs {
        assert!(!regex.is_match(input), "{:?} should not match {}", input, pattern);
    }
}

#[test]
fn test_phone_valid() {
    assert_matches(
        DEFAULT_PHONE_REGEX,
        &[
            "425-555-1212",
            "+1 425-555-1212",
            "(425)555-1212",
            "+44 (3456)987654",
            "+777.456.789.123",
            "425-555-1212 x123",
            "425-555-1212 x 123",
            "425-555-1212 ext123",
            "425-555-1212 ext 123",
            "425-555-1212 ext.123",
            "425-555-1212 ext. 123",
            "1",
            "+4+2+5+-+5+5+5+-+1+2++1+2++",
            "425-555-1212    ",
            " \r \n 1  \t ",
            "1-.()",
            "(425555-1212",
            ")425555-1212",
        ],
    );
}

#[test]
fn test_phone_invalid() {
    assert_no_match(
        DEFAULT_PHONE_REGEX,
        &[
            "",
            "abcdefghij",
            "425-555-1212 ext 123 ext 456",
            "425-555-1212 x",
            "425-555-1212 ext",
            "425-555-1212 ext.",
            "425-555-1212 x abc",
            "425-555-1212 ext def",
            "425-555-1212 ext. xyz",
            "-.()",
            "ext.123 1",
        ],
    );
}

#[test]
fn test_credit_card_valid() {
    assert_matches(
        DEFAULT_CREDIT_CARD_REGEX,
        &[
            "0000000000000000",
            "1234567890123452",
            "  1 2 3 4 5 6 7 8 9 0  1 2 34 5 2    ",
            "--1-2-3-4-5-6-7-8-9-0--1-2-34-5-2----",
            " - 1- -  2 3 --4 5 6 7 -8- -9- -0 - -1 -2 -3-4- --5-- 2    ",
            "1234-5678-9012-3452",
            "1234 5678 9012 3452",
        ],
    );
}

#[test]
fn test_credit_card_invalid() {
    assert_no_match(
        DEFAULT_CREDIT_CARD_REGEX,
        &["000%000000000001", "1234567890123452a", "1234567890123452\0"],
    );
}

#[test]
fn test_email_address_valid() {
    assert_matches(
        DEFAULT_EMAIL_ADDRESS_REGEX,
        &[
            "someName@someDomain.com",
            "1234@someDomain.com",
            "firstName.lastName@someDomain.com",
            "\u{00A0}@someDomain.com",
            "!#$%&'*+-/=?^_`|~@someDomain.com",
            "\"firstName.lastName\"@someDomain.com",
            "someName@some~domain.com",
            "someName@some_domain.com",
            "someName@1234.com",
            "someName@someDomain\u{FFEF}.com",
        ],
    );
}

#[test]
fn test_email_address_invalid() {
    assert_no_match(
        DEFAULT_EMAIL_ADDRESS_REGEX,
        &[
            "0",
            "",
            " \r \t \n",
            "@someDomain.com",
            "@someDomain@abc.com",
            "someName",
            "someName@",
            "someName@a@b.com",
        ],
    );
}

#[test]
fn test_url_valid() {
    assert_matches(
        DEFAULT_URL_REGEX,
        &["http://foo.bar", "https://foo.bar", "ftp://foo.bar"],
    );
}

#[test]
fn test_url_invalid() {
    assert_no_match(DEFAULT_URL_REGEX, &["file:///foo.bar", "foo.png", ""]);
}

#[test]
fn test_patterns_embed_in_single_quotes() {
    for pattern in [
        DEFAULT_PHONE_REGEX,
        DEFAULT_CREDIT_CARD_REGEX,
        DEFAULT_EMAIL_ADDRESS_REGEX,
        DEFAULT_URL_REGEX,
    ] {
        assert!(!pattern.contains('\''), "{} contains a single quote", pattern);
    }
}
