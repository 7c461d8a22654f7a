use regex::Regex;
use std::sync::LazyLock;

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_\s-]").expect("static slug pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static whitespace pattern"));
static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("static hyphen pattern"));

/// Derives a URL slug: `"Hello World!"` becomes `"hello-world"`.
pub fn generate_slug(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Keystroke transform for slug fields: lowercase, whitespace runs to `-`.
pub fn slugify_input(text: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&text.to_lowercase(), "-")
        .into_owned()
}

/// Display form of a field label: `"publishDate"` becomes `"Publish Date"`.
pub fn format_field_name(label: &str) -> String {
    let mut spaced = String::with_capacity(label.len() + 4);
    for ch in label.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }
    capitalize(spaced.trim())
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_field_name, generate_slug, slugify_input};

    #[test]
    fn slug_strips_punctuation_and_joins_words() {
        assert_eq!(generate_slug("Hello World!"), "hello-world");
        assert_eq!(generate_slug("  Rust -- is   fun  "), "rust-is-fun");
        assert_eq!(generate_slug("snake_case stays"), "snake_case-stays");
        assert_eq!(generate_slug("¡Olé!"), "ol");
    }

    #[test]
    fn slug_of_empty_title_is_empty() {
        assert_eq!(generate_slug(""), "");
        assert_eq!(generate_slug("!!!"), "");
    }

    #[test]
    fn inline_slug_transform_keeps_punctuation() {
        assert_eq!(slugify_input("My Cool Post"), "my-cool-post");
        assert_eq!(slugify_input("Trailing "), "trailing-");
        assert_eq!(slugify_input("a.b"), "a.b");
    }

    #[test]
    fn field_names_are_split_on_capitals() {
        assert_eq!(format_field_name("publishDate"), "Publish Date");
        assert_eq!(format_field_name("title"), "Title");
        assert_eq!(format_field_name(""), "");
    }
}
