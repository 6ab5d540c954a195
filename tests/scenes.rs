//! Scene fixtures: each `tests/scenes/*.aspic` is read and its scene dump
//! compared with the `.scene` file beside it. A fixture that starts with
//! `# expect-errors: N ...` must instead fail with exactly those numbers.

use std::sync::Once;

use aspic::{Interpreter, MemoryLoader, Settings};
use camino::Utf8Path;
use regex_lite::Regex;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Error numbers a fixture expects, if it expects any.
fn expected_errors(source: &str) -> Option<Vec<u32>> {
    let directive = Regex::new(r"(?m)^#\s*expect-errors:\s*([0-9 ]+)$").ok()?;
    let caps = directive.captures(source)?;
    Some(caps[1].split_whitespace().filter_map(|n| n.parse().ok()).collect())
}

/// Format a colored inline diff using dissimilar
fn format_inline_diff(expected: &str, actual: &str) -> String {
    use dissimilar::Chunk;

    let mut output = String::from("\n=== Inline Diff ===\nLegend: [-expected only-] [+actual only+]\n\n");
    for chunk in dissimilar::diff(expected, actual) {
        match chunk {
            Chunk::Equal(s) => output.push_str(s),
            Chunk::Delete(s) => {
                output.push_str("\x1b[31m[-");
                output.push_str(s);
                output.push_str("-]\x1b[0m");
            }
            Chunk::Insert(s) => {
                output.push_str("\x1b[32m[+");
                output.push_str(s);
                output.push_str("+]\x1b[0m");
            }
        }
    }
    output
}

fn check_scene(path: &Utf8Path) -> datatest_stable::Result<()> {
    init_tracing();
    let source = std::fs::read_to_string(path)?;
    let interpreter = Interpreter::new(Settings::default().with_timestamp("fixture"))
        .with_loader(MemoryLoader::new().with("common.aspic", "boxwidth 50;\n"));
    let result = interpreter.run(path.as_str(), &source);

    if let Some(expected) = expected_errors(&source) {
        match result {
            Ok(doc) => panic!("{path}: expected errors {expected:?}, got a scene:\n{}", doc.scene),
            Err(failure) => assert_eq!(failure.numbers(), expected, "{path}"),
        }
        return Ok(());
    }

    let doc = match result {
        Ok(doc) => doc,
        Err(failure) => panic!("{path}: {:?}", miette::Report::new(failure)),
    };
    let expected_path = path.with_extension("scene");
    let expected = std::fs::read_to_string(&expected_path)?;
    let actual = doc.scene.to_string();
    if expected.trim_end() != actual.trim_end() {
        panic!("scene mismatch for {path}:\n{}", format_inline_diff(&expected, &actual));
    }
    Ok(())
}

datatest_stable::harness! {
    { test = check_scene, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/scenes"), pattern = r"\.aspic$" },
}
