//! Golden-file snapshots for tick scenarios.
//!
//! Values are written as pretty JSON with object keys sorted, so a report
//! only changes when pointer behaviour does. Rerun with
//! `POINTERCAST_UPDATE_SNAPSHOTS=1` to rewrite goldens.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "POINTERCAST_UPDATE_SNAPSHOTS";

/// What [`assert_json_snapshot`] does with the golden file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotMode {
    /// Compare against the file on disk.
    Verify,
    /// Overwrite the file with the current value.
    Update,
}

impl SnapshotMode {
    /// Mode selected by [`UPDATE_SNAPSHOTS_ENV`].
    pub fn from_env() -> Self {
        let update = std::env::var(UPDATE_SNAPSHOTS_ENV)
            .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        if update {
            SnapshotMode::Update
        } else {
            SnapshotMode::Verify
        }
    }
}

/// Assert that `value` matches the JSON snapshot stored at `path`.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    check_json_snapshot(path.as_ref(), value, SnapshotMode::from_env())
}

/// Compare or update `path` according to `mode`.
pub fn check_json_snapshot<T: Serialize>(path: &Path, value: &T, mode: SnapshotMode) -> Result<()> {
    let actual = canonical_json(value)?;

    if mode == SnapshotMode::Update {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating snapshot dir {}", parent.display()))?;
        }
        return fs::write(path, &actual)
            .with_context(|| format!("writing snapshot {}", path.display()));
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "snapshot missing at {} (rerun with {UPDATE_SNAPSHOTS_ENV}=1)",
            path.display()
        )
    })?;

    // Goldens checked out on Windows may carry CRLF endings.
    let expected = expected.replace("\r\n", "\n");
    if expected != actual {
        let (line, want, got) = first_difference(&expected, &actual);
        bail!(
            "snapshot mismatch at {} line {line}\n  expected: {want}\n    actual: {got}\n(rerun with {UPDATE_SNAPSHOTS_ENV}=1 to update)",
            path.display()
        );
    }
    Ok(())
}

/// Serialize `value` as sorted, pretty JSON with a trailing newline.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).context("serializing snapshot value")?;
    let mut out = serde_json::to_string_pretty(&sort_keys(value)).context("formatting snapshot")?;
    out.push('\n');
    Ok(out)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(values) => Value::Array(values.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn first_difference<'a>(expected: &'a str, actual: &'a str) -> (usize, &'a str, &'a str) {
    let mut want = expected.lines();
    let mut got = actual.lines();
    let mut line = 1;
    loop {
        match (want.next(), got.next()) {
            (Some(a), Some(b)) if a == b => line += 1,
            (a, b) => return (line, a.unwrap_or("<eof>"), b.unwrap_or("<eof>")),
        }
    }
}
