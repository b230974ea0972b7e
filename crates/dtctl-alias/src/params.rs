//! Positional parameter substitution (`$1`..`$9`).

/// Replaces `$1`..`$9` in `token` with the matching entry of `args`.
///
/// Only a single digit is recognized: `$12` is `$1` followed by `2`.
/// A placeholder whose index exceeds `args.len()` is left as written.
///
/// `max_used` is raised to the highest index seen, whether or not it could
/// be substituted. Callers thread one counter across all tokens of an
/// expansion and compare it with `args.len()` afterwards.
///
/// ```
/// use dtctl_alias::substitute_params;
///
/// let mut max_used = 0;
/// let args = vec!["abc".to_string()];
/// assert_eq!(substitute_params("id=$1", &args, &mut max_used), "id=abc");
/// assert_eq!(max_used, 1);
/// ```
#[must_use]
pub fn substitute_params(token: &str, args: &[String], max_used: &mut usize) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' {
            if let Some(index) = chars.peek().copied().and_then(placeholder_index) {
                chars.next();
                *max_used = (*max_used).max(index);
                match args.get(index - 1) {
                    Some(arg) => out.push_str(arg),
                    None => {
                        out.push('$');
                        out.push_str(&index.to_string());
                    }
                }
                continue;
            }
        }
        out.push(c);
    }

    out
}

/// Index of the placeholder digit, `None` for anything outside `1`..=`9`.
fn placeholder_index(c: char) -> Option<usize> {
    match c {
        '1'..='9' => c.to_digit(10).map(|d| d as usize),
        _ => None,
    }
}
