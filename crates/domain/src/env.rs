//! Shell-style `$VAR` / `${VAR}` expansion against the process environment.

/// Replaces `$NAME` and `${NAME}` with the value of the environment
/// variable, or with the empty string when it is unset.
pub fn expand_env(s: &str) -> String {
    expand_with(s, |name| std::env::var(name).ok())
}

/// Expands variable references in `s` using `lookup`.
///
/// A `$` not followed by a name is kept literally. Malformed braces
/// (`${}` or an unterminated `${`) are dropped.
pub fn expand_with<F>(s: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        match shell_name(after) {
            Some((name, consumed)) => {
                if !name.is_empty() {
                    out.push_str(&lookup(name).unwrap_or_default());
                }
                rest = &after[consumed..];
            }
            None => {
                out.push('$');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Returns the variable name at the start of `s` and how many bytes the
/// reference occupies. `None` means there is no reference at all.
fn shell_name(s: &str) -> Option<(&str, usize)> {
    let bytes = s.as_bytes();
    let first = *bytes.first()?;

    if first == b'{' {
        if bytes.len() > 1 && bytes[1] == b'}' {
            return Some(("", 2));
        }
        return match s[1..].find('}') {
            Some(end) => Some((&s[1..end + 1], end + 2)),
            None => Some(("", 1)),
        };
    }

    if is_special_var(first) {
        return Some((&s[..1], 1));
    }

    let len = bytes
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    if len == 0 {
        return None;
    }
    Some((&s[..len], len))
}

fn is_special_var(b: u8) -> bool {
    matches!(b, b'*' | b'#' | b'$' | b'@' | b'!' | b'?' | b'-') || b.is_ascii_digit()
}
