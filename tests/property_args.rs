use proptest::prelude::*;

use console_runner::exec::split_argument_line;

// Arguments made of characters that need no quoting.
fn plain_arg() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_./:=-]{1,12}"
}

// Arguments that may contain spaces, quotes and backslashes.
fn any_arg() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 \"\\\\_-]{0,12}"
}

fn quote(arg: &str) -> String {
    let mut quoted = String::from("\"");
    for c in arg.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

proptest! {
    #[test]
    fn plain_arguments_split_back_out(
        args in proptest::collection::vec(plain_arg(), 0..8),
        sep in "[ \t]{1,3}",
    ) {
        let line = args.join(&sep);
        prop_assert_eq!(split_argument_line(&line), args);
    }

    #[test]
    fn quoted_arguments_survive_any_content(
        args in proptest::collection::vec(any_arg(), 0..6),
    ) {
        let line = args.iter().map(|a| quote(a)).collect::<Vec<_>>().join(" ");
        prop_assert_eq!(split_argument_line(&line), args);
    }
}
