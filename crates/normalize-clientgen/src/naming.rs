//! Identifier case helpers.

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

/// Upper-case the first character, leaving the rest untouched.
pub fn first_upper(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character, leaving the rest untouched.
pub fn first_lower(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `user-id` / `user_id` → `userId`.
pub fn camel_case(input: &str) -> String {
    input.to_lower_camel_case()
}

/// `user-id` / `user_id` → `UserId`.
pub fn pascal_case(input: &str) -> String {
    input.to_upper_camel_case()
}

/// `userId` → `user_id`. Generic arguments are dropped.
pub fn snake_case(input: &str) -> String {
    let base = input.split('<').next().unwrap_or(input);
    base.to_snake_case()
}

/// `in-progress` → `IN_PROGRESS`.
pub fn shouty_snake_case(input: &str) -> String {
    input.to_shouty_snake_case()
}

/// Escape a value for use inside a double-quoted string literal.
pub fn quote(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    out.push('"');
    for c in input.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
