//! # Native Type Hints
//!
//! Splits a raw annotation such as `Decimal(10, 2)` into its tag and its
//! parameter list. Consumers match on the exact tag, so `TinyInt` can never
//! be mistaken for `Int` and `DateTime` never for `Date`.

/// A parsed native type annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeTypeHint<'a> {
    /// The leading identifier (`VarChar`, `Uuid`, `Decimal`).
    pub tag: &'a str,
    /// Trimmed, comma-separated parameters. Empty when the annotation has no
    /// parameter list or the list is malformed.
    pub params: Vec<&'a str>,
}

impl<'a> NativeTypeHint<'a> {
    /// Parse a raw annotation. Returns `None` when it does not start with an
    /// identifier.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let raw = raw.trim();
        let tag_len = raw
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(raw.len());
        if tag_len == 0 {
            return None;
        }
        let (tag, rest) = raw.split_at(tag_len);
        let params = rest
            .trim()
            .strip_prefix('(')
            .and_then(|r| r.strip_suffix(')'))
            .map(|inner| {
                inner
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Some(Self { tag, params })
    }

    /// The `index`-th parameter as an unsigned integer.
    pub fn param_u32(&self, index: usize) -> Option<u32> {
        self.params.get(index)?.parse().ok()
    }

    /// Whether the tag equals any of `tags`.
    pub fn is_any(&self, tags: &[&str]) -> bool {
        tags.contains(&self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_tag() {
        let hint = NativeTypeHint::parse("Uuid").unwrap();
        assert_eq!(hint.tag, "Uuid");
        assert!(hint.params.is_empty());
    }

    #[test]
    fn single_parameter() {
        let hint = NativeTypeHint::parse("VarChar(255)").unwrap();
        assert_eq!(hint.tag, "VarChar");
        assert_eq!(hint.param_u32(0), Some(255));
    }

    #[test]
    fn precision_and_scale_with_spaces() {
        let hint = NativeTypeHint::parse("Decimal(10, 2)").unwrap();
        assert_eq!(hint.params, vec!["10", "2"]);
        assert_eq!(hint.param_u32(1), Some(2));
    }

    #[test]
    fn malformed_parameters_are_dropped() {
        let hint = NativeTypeHint::parse("VarChar(abc").unwrap();
        assert_eq!(hint.tag, "VarChar");
        assert!(hint.params.is_empty());

        let hint = NativeTypeHint::parse("VarChar(abc)").unwrap();
        assert_eq!(hint.param_u32(0), None);
    }

    #[test]
    fn tags_match_exactly() {
        let hint = NativeTypeHint::parse("TinyInt").unwrap();
        assert!(hint.is_any(&["TinyInt"]));
        assert!(!hint.is_any(&["Int"]));
    }

    #[test]
    fn no_identifier() {
        assert_eq!(NativeTypeHint::parse("(12)"), None);
        assert_eq!(NativeTypeHint::parse(""), None);
    }
}
