//! URL slug generation.

use std::collections::HashSet;

/// Slug used when a title contains no usable characters.
pub const FALLBACK_SLUG: &str = "untitled";

/// Converts a title into a URL slug.
///
/// Lowercases the input, drops every character that is not an ASCII word character,
/// whitespace or a hyphen, and joins the remaining words with single hyphens. Leading
/// and trailing separators are trimmed. Returns [`FALLBACK_SLUG`] when nothing is left.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Picks the first free slug for `base` given the slugs already taken.
///
/// Returns `base` itself when free, otherwise `base-1`, `base-2`, ... The caller
/// fetches `taken` from the collection the slug must be unique in.
pub fn unique_slug(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }

    (1..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates_words() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  The   Dark  Knight  "), "the-dark-knight");
    }

    #[test]
    fn strips_punctuation_without_adding_separators() {
        assert_eq!(slugify("Don't Panic!"), "dont-panic");
        assert_eq!(slugify("C++ & Rust: A Tale"), "c-rust-a-tale");
    }

    #[test]
    fn collapses_and_trims_hyphens() {
        assert_eq!(slugify("--a -- b--"), "a-b");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn drops_non_ascii_letters() {
        assert_eq!(slugify("Café Crème"), "caf-crme");
    }

    #[test]
    fn empty_result_falls_back() {
        assert_eq!(slugify(""), FALLBACK_SLUG);
        assert_eq!(slugify("!!! ???"), FALLBACK_SLUG);
    }

    #[test]
    fn unique_slug_returns_base_when_free() {
        let taken = HashSet::from(["other".to_string()]);
        assert_eq!(unique_slug("my-comic", &taken), "my-comic");
    }

    #[test]
    fn unique_slug_appends_first_free_suffix() {
        let taken = HashSet::from([
            "my-comic".to_string(),
            "my-comic-1".to_string(),
            "my-comic-3".to_string(),
        ]);
        assert_eq!(unique_slug("my-comic", &taken), "my-comic-2");
    }

    #[test]
    fn colliding_titles_never_share_a_slug() {
        let mut taken = HashSet::new();
        for _ in 0..5 {
            let slug = unique_slug(&slugify("Same Title"), &taken);
            assert!(taken.insert(slug));
        }
        assert_eq!(taken.len(), 5);
        assert!(taken.contains("same-title-4"));
    }
}
