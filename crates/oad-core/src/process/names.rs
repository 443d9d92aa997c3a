use heck::{ToKebabCase, ToPascalCase, ToSnakeCase};

use crate::model::NormalizedName;

/// Create a `NormalizedName` from an arbitrary string, computing the casing
/// variants renderers need for filenames and identifiers. Anchors are NOT
/// built from this — they must preserve Unicode, which heck does not.
pub fn normalize_name(name: &str) -> NormalizedName {
    let sanitized = sanitize_identifier(name);

    NormalizedName {
        original: name.to_string(),
        pascal_case: sanitized.to_pascal_case(),
        snake_case: sanitized.to_snake_case(),
        kebab_case: sanitized.to_kebab_case(),
    }
}

/// Sanitize a string to be a valid identifier seed.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for (i, ch) in name.chars().enumerate() {
        if ch.is_alphanumeric() {
            if i == 0 && ch.is_ascii_digit() {
                result.push('_');
            }
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}
