use std::collections::HashMap;

/// Generates URL anchors from operation summaries.
///
/// Whitespace runs collapse to single hyphens. When `preserve_case` is
/// false the result is lowercased; nothing else differs between the two
/// modes — non-ASCII text (Turkish, CJK, emoji, RTL marks) passes through
/// verbatim in both.
pub struct AnchorGenerator {
    preserve_case: bool,
    cache: HashMap<String, String>,
}

impl AnchorGenerator {
    pub fn new(preserve_case: bool) -> Self {
        Self {
            preserve_case,
            cache: HashMap::new(),
        }
    }

    pub fn anchor(&mut self, text: &str) -> String {
        if let Some(cached) = self.cache.get(text) {
            return cached.clone();
        }
        let slug: String = text.split_whitespace().collect::<Vec<_>>().join("-");
        let slug = if self.preserve_case {
            slug
        } else {
            slug.to_lowercase()
        };
        self.cache.insert(text.to_string(), slug.clone());
        slug
    }
}
