// src/exec/args.rs

//! Splitting a single command-line string into process arguments.

/// Split `line` into arguments.
///
/// Rules:
/// - unquoted whitespace separates arguments,
/// - a `"..."` span groups its contents (including whitespace) into the
///   current argument, and `""` produces an empty argument,
/// - inside quotes, `\"` is a literal quote and `\\` a literal backslash;
///   any other backslash is kept as-is (so Windows paths survive),
/// - an unterminated quote runs to the end of the line.
pub fn split_argument_line(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    // True once the current argument has started, even if it is still empty
    // (needed for `""`).
    let mut started = false;
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                started = true;
            }
            '\\' if in_quotes => match chars.peek() {
                Some(&next @ ('"' | '\\')) => {
                    current.push(next);
                    chars.next();
                }
                _ => current.push('\\'),
            },
            c if c.is_whitespace() && !in_quotes => {
                if started {
                    args.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }

    if started {
        args.push(current);
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(split_argument_line("  -la   /tmp\t-h "), vec!["-la", "/tmp", "-h"]);
    }

    #[test]
    fn empty_line_has_no_arguments() {
        assert!(split_argument_line("").is_empty());
        assert!(split_argument_line("   ").is_empty());
    }

    #[test]
    fn quotes_group_and_join_adjacent_text() {
        assert_eq!(
            split_argument_line(r#"-c "echo a b" --name="x y""#),
            vec!["-c", "echo a b", "--name=x y"]
        );
    }

    #[test]
    fn empty_quotes_yield_empty_argument() {
        assert_eq!(split_argument_line(r#"a "" b"#), vec!["a", "", "b"]);
    }

    #[test]
    fn escapes_inside_quotes() {
        assert_eq!(
            split_argument_line(r#""say \"hi\"" "C:\dir\\""#),
            vec![r#"say "hi""#, r"C:\dir\"]
        );
    }

    #[test]
    fn backslash_outside_quotes_is_literal() {
        assert_eq!(split_argument_line(r"C:\tools\x.exe"), vec![r"C:\tools\x.exe"]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(split_argument_line(r#"a "b c"#), vec!["a", "b c"]);
    }
}
