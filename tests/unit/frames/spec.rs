use super::*;

fn frames(spec: &str, max: u32) -> Vec<u32> {
    expand(spec, max).unwrap().to_vec()
}

#[test]
fn extract_takes_text_between_delimiters() {
    assert_eq!(extract_spec_text("bg__[1--end]"), "1--end");
    assert_eq!(extract_spec_text("char__[2, 3]"), "2, 3");
    assert_eq!(extract_spec_text("a__[1]__[2]"), "1]__[2");
    assert_eq!(extract_spec_text("empty__[]"), "");
}

#[test]
fn extract_requires_both_delimiters() {
    assert_eq!(extract_spec_text("deco"), "");
    assert_eq!(extract_spec_text("deco__[1, 2"), "");
    assert_eq!(extract_spec_text("deco[1]"), "");
    assert_eq!(extract_spec_text("deco__[1] "), "");
    assert_eq!(extract_spec_text(""), "");
}

#[test]
fn bare_integers_ignore_the_max_frame() {
    for max in [1, 4, 9, 100] {
        assert_eq!(frames("4, 1,2,2", max), vec![1, 2, 4]);
    }
}

#[test]
fn ranges_are_inclusive() {
    assert_eq!(frames("3--6", 6), vec![3, 4, 5, 6]);
    assert_eq!(frames("5--5", 9), vec![5]);
}

#[test]
fn end_resolves_to_the_max_frame() {
    assert_eq!(frames("3--end", 7), vec![3, 4, 5, 6, 7]);
    assert_eq!(frames("1--end", 5), vec![1, 2, 3, 4, 5]);
}

#[test]
fn end_outside_a_range_is_substituted_too() {
    assert_eq!(frames("1, end", 4), vec![1, 4]);
}

#[test]
fn descending_range_is_empty() {
    assert!(expand("6--3", 9).unwrap().is_empty());
    assert_eq!(frames("6--3, 8", 9), vec![8]);
}

#[test]
fn mixed_tokens_are_merged_sorted_and_deduplicated() {
    assert_eq!(frames("9, 2--4, 3, 7--end", 8), vec![2, 3, 4, 7, 8, 9]);
}

#[test]
fn stray_commas_and_whitespace_are_skipped() {
    assert_eq!(frames(" 1 ,, 3--4 ,", 4), vec![1, 3, 4]);
    assert_eq!(frames("2--3,", 3), vec![2, 3]);
    assert_eq!(frames(",", 3), Vec::<u32>::new());
    assert!(expand("", 3).unwrap().is_empty());
}

#[test]
fn leftovers_that_are_not_integers_are_rejected() {
    assert_eq!(expand("1, x", 3).unwrap_err(), BadToken("x".to_string()));
    assert_eq!(expand("1-3", 3).unwrap_err(), BadToken("1-3".to_string()));
    assert_eq!(expand("2 -- 4", 4).unwrap_err(), BadToken("2 -- 4".to_string()));
    assert_eq!(expand("-1", 3).unwrap_err(), BadToken("-1".to_string()));
}

#[test]
fn oversized_ranges_are_rejected_without_materializing() {
    assert_eq!(
        expand("1--4000000000", 5).unwrap_err(),
        BadToken("1--4000000000".to_string())
    );
    assert_eq!(
        expand("2, 9000--10001", 3).unwrap_err(),
        BadToken("9000--10001".to_string())
    );
    assert_eq!(frames("9999--10000", 3), vec![9999, 10000]);
}

#[test]
fn digit_runs_are_collected_from_the_raw_text() {
    let found: Vec<&str> = numbers_in("1, 3--12, 7--end").collect();
    assert_eq!(found, vec!["1", "3", "12", "7"]);
    assert_eq!(numbers_in("end").count(), 0);
}
