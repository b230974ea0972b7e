//! Quoting-aware splitting of alias expansions into argv tokens.

/// Splits `input` into tokens on unquoted whitespace.
///
/// Single and double quotes group characters into one token and are
/// consumed. Quotes do not nest: inside `'...'` a `"` is literal and vice
/// versa. An explicitly quoted empty string (`''`) yields an empty token.
/// An unterminated quote is closed at end of input.
///
/// Blank input yields an empty vector.
///
/// ```
/// use dtctl_alias::split_command;
///
/// assert_eq!(split_command(r#"a "b c" d"#), vec!["a", "b c", "d"]);
/// ```
#[must_use]
pub fn split_command(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // Distinguishes `''` (an empty token) from no token at all.
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in input.chars() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => current.push(c),
            None if c == '\'' || c == '"' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("get workflows", &["get", "workflows"] ; "plain words")]
    #[test_case(r#"a "b c" d"#, &["a", "b c", "d"] ; "double quoted span")]
    #[test_case("a 'b c' d", &["a", "b c", "d"] ; "single quoted span")]
    #[test_case("  get   workflows  ", &["get", "workflows"] ; "repeated whitespace")]
    #[test_case("get\tworkflows\n", &["get", "workflows"] ; "tabs and newlines")]
    #[test_case(r#"--filter="name eq 'x'""#, &["--filter=name eq 'x'"] ; "quotes inside a token")]
    #[test_case(r#"'say "hi"'"#, &[r#"say "hi""#] ; "double quotes literal in single")]
    #[test_case(r#""it's""#, &["it's"] ; "single quote literal in double")]
    #[test_case("get 'unterminated span", &["get", "unterminated span"] ; "unterminated quote")]
    #[test_case("a '' b", &["a", "", "b"] ; "quoted empty string")]
    fn splits(input: &str, expected: &[&str]) {
        assert_eq!(split_command(input), expected);
    }

    #[test]
    fn blank_input_yields_no_tokens() {
        assert!(split_command("").is_empty());
        assert!(split_command(" \t \n ").is_empty());
    }

    proptest! {
        #[test]
        fn unquoted_input_matches_whitespace_split(input in "[a-z0-9$=\\- \\t\\n]{0,48}") {
            let expected: Vec<String> = input.split_whitespace().map(str::to_string).collect();
            prop_assert_eq!(split_command(&input), expected);
        }

        #[test]
        fn tokens_never_contain_unquoted_whitespace(input in "[a-z \\t]{0,48}") {
            for token in split_command(&input) {
                prop_assert!(!token.is_empty());
                prop_assert!(!token.chars().any(char::is_whitespace));
            }
        }
    }
}
