//! # Package Name Validation
//!
//! File: cli/src/commands/create/package_name.rs
//!
//! Checks and derives `package.json` names.
//!
//! A valid name is an optional `@scope/` prefix followed by a name segment.
//! The first character of each segment is a lowercase letter, digit, `-` or
//! `~` (scopes also allow `*`); later characters may also be `.` or `_`.
//!
//! `to_valid_package_name` turns any free-form project name into such a name:
//!
//! | input              | output          |
//! |--------------------|-----------------|
//! | `My Cool App!!`    | `my-cool-app`   |
//! | `.hidden project`  | `hidden-project`|
//! | `my-app`           | `my-app`        |
//!
use crate::core::config::DEFAULT_PROJECT_NAME;
use regex::Regex;
use std::sync::LazyLock;

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[a-z0-9\-*~][a-z0-9\-*._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$")
        .expect("package name pattern is valid")
});

/// True iff `name` is usable as the `name` field of a `package.json`.
pub fn is_valid_package_name(name: &str) -> bool {
    PACKAGE_NAME.is_match(name)
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '~'
}

/// Derives a valid package name from free-form input.
///
/// Steps, in order: trim, lowercase, collapse whitespace runs to `-`, drop one
/// leading `.` or `_`, then replace each run of characters outside
/// `[a-z0-9-~]` with a single `-`. Runs at either end of the string are
/// dropped instead of hyphenated. If nothing is left, the default project
/// name is returned, so the result always passes `is_valid_package_name`.
pub fn to_valid_package_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();

    let mut hyphenated = String::with_capacity(lowered.len());
    let mut in_space = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_space {
                hyphenated.push('-');
            }
            in_space = true;
        } else {
            hyphenated.push(c);
            in_space = false;
        }
    }

    let stripped = hyphenated
        .strip_prefix(['.', '_'])
        .unwrap_or(&hyphenated);

    let mut result = String::with_capacity(stripped.len());
    let mut pending_run = false;
    for c in stripped.chars() {
        if is_allowed(c) {
            if pending_run && !result.is_empty() {
                result.push('-');
            }
            pending_run = false;
            result.push(c);
        } else {
            pending_run = true;
        }
    }

    if result.is_empty() {
        DEFAULT_PROJECT_NAME.to_string()
    } else {
        result
    }
}
