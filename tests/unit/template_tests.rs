use autokit::notify::template::{check_template, render};
use autokit::test_utils::{TestCase, run_table_tests};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[test]
fn render_substitutes_positional_arguments() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "single",
            input: ("Kit {0} saved.", args(&["raid"])),
            expected: "Kit raid saved.".to_string(),
        },
        TestCase {
            name: "reordered",
            input: ("{1} before {0}", args(&["a", "b"])),
            expected: "b before a".to_string(),
        },
        TestCase {
            name: "escaped braces",
            input: ("{{literal}} {0}", args(&["x"])),
            expected: "{literal} x".to_string(),
        },
        TestCase {
            name: "missing argument kept",
            input: ("{0} and {1}", args(&["only"])),
            expected: "only and {1}".to_string(),
        },
        TestCase {
            name: "malformed left alone",
            input: ("broken {0", args(&["x"])),
            expected: "broken {0".to_string(),
        },
    ];

    run_table_tests(cases, |(template, values)| render(template, &values))
}

#[test]
fn check_template_enforces_arity() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "no placeholders",
            input: ("You must provide a kit name.", 0),
            expected: true,
        },
        TestCase {
            name: "in range",
            input: ("Please wait {0} seconds", 1),
            expected: true,
        },
        TestCase {
            name: "out of range",
            input: ("Missing {0}", 0),
            expected: false,
        },
        TestCase {
            name: "stray closing brace",
            input: ("oops }", 1),
            expected: false,
        },
        TestCase {
            name: "non numeric placeholder",
            input: ("{name}", 1),
            expected: false,
        },
    ];

    run_table_tests(cases, |(template, arity)| {
        check_template(template, arity).is_ok()
    })
}
