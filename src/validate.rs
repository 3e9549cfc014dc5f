/// Schema-driven decoding of form submissions
///
/// HTML forms arrive as a flat urlencoded bag with rails-style keys
/// (`post[title]`, `post[body]`, `comment[body]`). These decoders turn the
/// bag into a typed input record, or into a single `Validation` fault whose
/// message lists every violation found, comma-joined. Keys outside the
/// allowed set are violations too.
///
/// Decoding is pure and runs before any store call on the mutating routes.
use std::collections::HashMap;

use validator::{Validate, ValidationErrors};

use crate::error::{AppError, Result};
use crate::models::{CommentInput, PostInput};

/// `_method` may be left in the body by forms that also carry it in the
/// query string, so it is tolerated everywhere.
const POST_FIELDS: &[&str] = &["post[title]", "post[body]", "_method"];
const COMMENT_FIELDS: &[&str] = &["comment[body]", "_method"];

/// Decode and validate a post form
pub fn post_input(form: &HashMap<String, String>) -> Result<PostInput> {
    let mut violations = unknown_keys(form, POST_FIELDS);

    let input = PostInput {
        title: field(form, "post[title]"),
        body: field(form, "post[body]"),
    };
    if let Err(errors) = input.validate() {
        flatten("post", &errors, &mut violations);
    }

    finish(input, violations)
}

/// Decode and validate a comment form
pub fn comment_input(form: &HashMap<String, String>) -> Result<CommentInput> {
    let mut violations = unknown_keys(form, COMMENT_FIELDS);

    let input = CommentInput {
        body: field(form, "comment[body]"),
    };
    if let Err(errors) = input.validate() {
        flatten("comment", &errors, &mut violations);
    }

    finish(input, violations)
}

/// A missing key decodes as empty and fails the non-empty check, so
/// "absent" and "blank" report the same violation.
fn field(form: &HashMap<String, String>, key: &str) -> String {
    form.get(key).map(|v| v.trim().to_string()).unwrap_or_default()
}

fn unknown_keys(form: &HashMap<String, String>, allowed: &[&str]) -> Vec<String> {
    form.keys()
        .filter(|key| !allowed.contains(&key.as_str()))
        .map(|key| format!("{key} is not allowed"))
        .collect()
}

fn flatten(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (name, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error.message.as_deref().unwrap_or("is invalid");
            out.push(format!("{prefix}[{name}] {message}"));
        }
    }
}

fn finish<T>(input: T, mut violations: Vec<String>) -> Result<T> {
    if violations.is_empty() {
        Ok(input)
    } else {
        // Field order out of the validator is not stable; sort so the
        // aggregated message is deterministic.
        violations.sort();
        Err(AppError::Validation(violations.join(",")))
    }
}
