//! Conformance suite runner.
//!
//! Layout:
//!   positive/            -- *.sjava, each must verify clean
//!   negative/<group>/    -- *.sjava + *.expected-error.json; every key in the
//!                           expected file must match the reported diagnostic

use crate::tap::Tap;
use serde_json::Value;
use sjavac_core::{verify_file, Verdict};
use std::path::{Path, PathBuf};

pub struct RunResult {
    pub failed: usize,
}

pub fn run_suite(suite_dir: &Path) -> RunResult {
    let mut tap = Tap::new();

    for source in sjava_files(&suite_dir.join("positive")) {
        run_positive_test(&source, &mut tap);
    }

    for group in subdirectories(&suite_dir.join("negative")) {
        for source in sjava_files(&group) {
            run_negative_test(&source, &group, &mut tap);
        }
    }

    let failed = tap.failure_count();
    tap.finish();
    RunResult { failed }
}

fn run_positive_test(source: &Path, tap: &mut Tap) {
    let test_name = format!("positive/{}", stem(source));
    match verify_file(source) {
        Verdict::Valid => tap.ok(test_name),
        Verdict::Invalid(err) => tap.not_ok(
            test_name,
            format!("unexpected {} error: {}", err.kind.phase(), err),
        ),
        Verdict::IoFailure(msg) => tap.not_ok(test_name, msg),
    }
}

fn run_negative_test(source: &Path, group: &Path, tap: &mut Tap) {
    let test_name = format!("negative/{}/{}", stem(group), stem(source));
    let expected_path = group.join(format!("{}.expected-error.json", stem(source)));

    let expected = match read_json(&expected_path) {
        Ok(v) => v,
        Err(e) => {
            tap.not_ok(test_name, e);
            return;
        }
    };

    match verify_file(source) {
        Verdict::Invalid(err) => {
            let got = err.to_json_value();
            if json_subset(&expected, &got) {
                tap.ok(test_name);
            } else {
                tap.not_ok(test_name, json_diff(&expected, &got));
            }
        }
        Verdict::Valid => tap.not_ok(test_name, "expected an error but the file verified"),
        Verdict::IoFailure(msg) => tap.not_ok(test_name, msg),
    }
}

// -- Helpers --

fn sjava_files(dir: &Path) -> Vec<PathBuf> {
    let mut results: Vec<PathBuf> = std::fs::read_dir(dir)
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("sjava"))
        .collect();
    results.sort();
    results
}

fn subdirectories(dir: &Path) -> Vec<PathBuf> {
    let mut results: Vec<PathBuf> = std::fs::read_dir(dir)
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_dir())
        .collect();
    results.sort();
    results
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn read_json(path: &Path) -> Result<Value, String> {
    let src = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&src).map_err(|e| format!("invalid JSON in {}: {}", path.display(), e))
}

/// Every field of `expected` is present in `got` with an equal value.
fn json_subset(expected: &Value, got: &Value) -> bool {
    match (expected, got) {
        (Value::Object(em), Value::Object(gm)) => em
            .iter()
            .all(|(k, v)| gm.get(k).is_some_and(|gv| json_subset(v, gv))),
        (Value::Number(en), Value::Number(gn)) => en.as_f64() == gn.as_f64(),
        _ => expected == got,
    }
}

fn json_diff(expected: &Value, got: &Value) -> String {
    let exp_str = serde_json::to_string_pretty(expected).unwrap_or_default();
    let got_str = serde_json::to_string_pretty(got).unwrap_or_default();
    format!("--- expected\n{}\n+++ got\n{}", exp_str, got_str)
}
