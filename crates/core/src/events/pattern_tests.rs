use super::*;
use proptest::prelude::*;
use yare::parameterized;

#[test]
fn exact_pattern_matches_exact_event() {
    let pattern = EventPattern::new("order.completed");
    assert!(pattern.matches("order.completed"));
    assert!(!pattern.matches("order.paid"));
    assert!(!pattern.matches("user.completed"));
}

#[test]
fn wildcard_matches_single_segment() {
    let pattern = EventPattern::new("user.*");
    assert!(pattern.matches("user.created"));
    assert!(pattern.matches("user.deleted"));
    assert!(!pattern.matches("order.created"));
    assert!(!pattern.matches("user.profile.updated")); // * doesn't match multiple segments
    assert!(!pattern.matches("user")); // * doesn't match zero segments
}

#[test]
fn global_wildcard_matches_everything() {
    let star = EventPattern::new("*");
    assert!(star.matches("anything"));
    assert!(star.matches("user.profile.updated"));
    assert!(star.matches(""));
}

#[parameterized(
    leading_wildcard = { "*.created", "user.created", true },
    leading_wildcard_other_prefix = { "*.created", "order.created", true },
    leading_wildcard_too_deep = { "*.created", "a.b.created", false },
    leading_wildcard_wrong_suffix = { "*.created", "user.deleted", false },
    middle_wildcard = { "order.*.failed", "order.payment.failed", true },
    middle_wildcard_mismatch = { "order.*.failed", "order.payment.ok", false },
    double_wildcard = { "*.*", "user.created", true },
    double_wildcard_short = { "*.*", "user", false },
    partial_segment_is_literal = { "user*", "user.created", false },
    partial_segment_exact = { "user*", "user*", true },
    empty_pattern_empty_name = { "", "", true },
    empty_pattern_non_empty_name = { "", "user", false },
    non_empty_pattern_empty_name = { "user", "", false },
    wildcard_segment_empty_name = { "user.*", "", false },
    trailing_dot_is_empty_segment = { "user.*", "user.", true },
)]
fn pattern_table(pattern: &str, name: &str, expected: bool) {
    assert_eq!(matches(pattern, name), expected, "{pattern} vs {name}");
}

#[test]
fn pattern_conversions() {
    let from_str: EventPattern = "user.*".into();
    let from_string: EventPattern = String::from("user.*").into();
    assert_eq!(from_str, from_string);
    assert_eq!(from_str.as_str(), "user.*");
    assert_eq!(from_str.to_string(), "user.*");
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z_]{1,8}"
}

proptest! {
    #[test]
    fn star_matches_any_name(name in "[a-z.]{0,24}") {
        prop_assert!(matches("*", &name));
    }

    #[test]
    fn exact_name_matches_itself(parts in proptest::collection::vec(segment(), 1..5)) {
        let name = parts.join(".");
        prop_assert!(matches(&name, &name));
    }

    #[test]
    fn prefix_wildcard_matches_two_segments_only(
        prefix in segment(),
        rest in proptest::collection::vec(segment(), 0..4),
    ) {
        let pattern = format!("{prefix}.*");
        let mut parts = vec![prefix.clone()];
        parts.extend(rest.iter().cloned());
        let name = parts.join(".");
        prop_assert_eq!(matches(&pattern, &name), parts.len() == 2);
    }

    #[test]
    fn wildcard_stands_for_any_single_segment(
        parts in proptest::collection::vec(segment(), 1..5),
        index in 0usize..5,
    ) {
        let index = index % parts.len();
        let mut pattern_parts = parts.clone();
        pattern_parts[index] = "*".to_string();
        prop_assert!(matches(&pattern_parts.join("."), &parts.join(".")));
    }
}
