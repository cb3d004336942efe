/// Title-cases a string: first letter of each whitespace-separated word
/// upper-cased, the rest lower-cased. Collapses runs of whitespace.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_cases_words() {
        assert_eq!(title_case("NORTH sydney"), "North Sydney");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(title_case("  mount   druitt "), "Mount Druitt");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(title_case(""), "");
    }
}
