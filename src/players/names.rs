/// Splits a runner attribution such as `"A, B"` or `"A & B"` into names.
///
/// `&` counts as a separator just like `,`. Names are trimmed, blank segments
/// dropped, and order and duplicates are preserved.
pub fn parse_runner_names(raw: &str) -> Vec<String> {
    raw.split([',', '&'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("A, B")]
    #[case("A & B")]
    #[case("A,B")]
    #[case(" A  &  B ")]
    #[case("A,,B,")]
    #[case("&A&,B")]
    fn separators_are_interchangeable(#[case] raw: &str) {
        assert_eq!(parse_runner_names(raw), vec!["A", "B"]);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(" , & ")]
    fn blank_input_yields_no_names(#[case] raw: &str) {
        assert!(parse_runner_names(raw).is_empty());
    }

    #[test]
    fn keeps_order_and_duplicates() {
        assert_eq!(
            parse_runner_names("Bob & Alice, Bob"),
            vec!["Bob", "Alice", "Bob"]
        );
    }

    #[test]
    fn inner_whitespace_is_kept() {
        assert_eq!(parse_runner_names("Brain Freeze"), vec!["Brain Freeze"]);
    }
}
