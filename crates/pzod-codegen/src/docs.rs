//! # `@zod` Directive Parser
//!
//! Field documentation doubles as a tiny instruction language. Any line
//! whose trimmed start is the `@zod` sentinel is a chain of calls:
//!
//! ```text
//! /// The user's contact address.
//! /// @zod.email().max(320)
//! /// @zod.custom(imports.slugSchema)
//! ```
//!
//! Each call becomes one [`Directive`]. Every other line is plain comment
//! text and is passed through to the generated JSDoc block.
//!
//! ## Classification
//!
//! | Call | Directive |
//! |------|-----------|
//! | `custom(<expr>)` | [`Directive::CustomSchema`] |
//! | `email()`, `uuid()`, ... ([`STRING_FORMATS`]) | [`Directive::StandaloneValidator`] |
//! | anything else | [`Directive::ExtraModifier`] (verbatim) |
//!
//! Parsing never fails. A malformed chain keeps the calls read so far and
//! logs the rest at debug level.

/// Case-sensitive prefix of a directive line.
pub const DIRECTIVE_SENTINEL: &str = "@zod";

/// Zod string formats that exist as top-level constructors (`z.email()`).
pub const STRING_FORMATS: &[&str] = &[
    "email",
    "url",
    "uuid",
    "guid",
    "cuid",
    "cuid2",
    "ulid",
    "nanoid",
    "emoji",
    "ipv4",
    "ipv6",
    "cidrv4",
    "cidrv6",
    "base64",
    "base64url",
    "e164",
    "jwt",
];

/// One instruction read from field documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Replace the whole base expression.
    CustomSchema(String),
    /// Replace a string field's base with `z.<name>()`.
    StandaloneValidator(String),
    /// Append a call such as `max(64)` to the expression.
    ExtraModifier(String),
}

/// The parsed documentation of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    /// Directives in documentation order.
    pub directives: Vec<Directive>,
    /// Non-directive lines, verbatim.
    pub comments: Vec<String>,
}

impl Directives {
    /// The first custom schema override, if any.
    pub fn custom_schema(&self) -> Option<&str> {
        self.directives.iter().find_map(|d| match d {
            Directive::CustomSchema(expr) => Some(expr.as_str()),
            _ => None,
        })
    }

    pub fn has_custom_schema(&self) -> bool {
        self.custom_schema().is_some()
    }
}

/// Parse a field's documentation.
pub fn parse(documentation: Option<&str>) -> Directives {
    let mut parsed = Directives::default();
    let Some(documentation) = documentation else {
        return parsed;
    };

    for line in documentation.lines() {
        match line.trim_start().strip_prefix(DIRECTIVE_SENTINEL) {
            Some(chain) => parse_chain(chain, &mut parsed.directives),
            None => parsed.comments.push(line.trim_end().to_string()),
        }
    }
    parsed
}

fn parse_chain(chain: &str, out: &mut Vec<Directive>) {
    let mut rest = chain;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return;
        }
        let Some(call_start) = rest.strip_prefix('.') else {
            tracing::debug!(chain, remainder = rest, "ignoring @zod text without a leading `.`");
            return;
        };

        let name_len = call_start
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(call_start.len());
        let (name, after_name) = call_start.split_at(name_len);
        if name.is_empty() || !after_name.starts_with('(') {
            tracing::debug!(chain, remainder = rest, "ignoring @zod call without an argument list");
            return;
        }
        let Some(close) = matching_paren(after_name) else {
            tracing::debug!(chain, call = name, "ignoring @zod call with unbalanced parentheses");
            return;
        };

        let args = &after_name[1..close];
        let call = &call_start[..name_len + close + 1];
        out.push(classify(name, args, call));
        rest = &after_name[close + 1..];
    }
}

fn classify(name: &str, args: &str, call: &str) -> Directive {
    if name == "custom" {
        return Directive::CustomSchema(args.trim().to_string());
    }
    if args.trim().is_empty() && STRING_FORMATS.contains(&name) {
        return Directive::StandaloneValidator(name.to_string());
    }
    Directive::ExtraModifier(call.to_string())
}

/// Byte offset of the `)` closing the `(` at the start of `text`. Quoted
/// string and template literals are skipped.
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (idx, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modifier(call: &str) -> Directive {
        Directive::ExtraModifier(call.to_string())
    }

    #[test]
    fn no_documentation() {
        assert_eq!(parse(None), Directives::default());
    }

    #[test]
    fn one_call_per_line() {
        let parsed = parse(Some("@zod.max(64)\n@zod.min(1)"));
        assert_eq!(parsed.directives, vec![modifier("max(64)"), modifier("min(1)")]);
        assert!(parsed.comments.is_empty());
    }

    #[test]
    fn chained_calls_on_one_line() {
        let parsed = parse(Some("  @zod.max(64).min(1) "));
        assert_eq!(parsed.directives, vec![modifier("max(64)"), modifier("min(1)")]);
    }

    #[test]
    fn comments_are_separated_in_order() {
        let parsed = parse(Some("The display name.\n@zod.max(64)\n\nShown publicly."));
        assert_eq!(parsed.comments, vec!["The display name.", "", "Shown publicly."]);
        assert_eq!(parsed.directives, vec![modifier("max(64)")]);
    }

    #[test]
    fn custom_schema_keeps_nested_calls() {
        let parsed = parse(Some("@zod.custom(z.string().regex(/^[a-z]+$/)).optional()"));
        assert_eq!(
            parsed.directives,
            vec![
                Directive::CustomSchema("z.string().regex(/^[a-z]+$/)".into()),
                modifier("optional()"),
            ]
        );
        assert_eq!(parsed.custom_schema(), Some("z.string().regex(/^[a-z]+$/)"));
    }

    #[test]
    fn parentheses_inside_strings_are_ignored() {
        let parsed = parse(Some(r#"@zod.refine((v) => v !== ")", { message: 'no (' })"#));
        assert_eq!(
            parsed.directives,
            vec![modifier(r#"refine((v) => v !== ")", { message: 'no (' })"#)]
        );
    }

    #[test]
    fn string_formats_become_standalone_validators() {
        let parsed = parse(Some("@zod.email()\n@zod.uuid()\n@zod.url({ protocol: /^https$/ })"));
        assert_eq!(
            parsed.directives,
            vec![
                Directive::StandaloneValidator("email".into()),
                Directive::StandaloneValidator("uuid".into()),
                modifier("url({ protocol: /^https$/ })"),
            ]
        );
    }

    #[test]
    fn sentinel_is_case_sensitive() {
        let parsed = parse(Some("@Zod.max(3)\n@ZOD.min(1)"));
        assert!(parsed.directives.is_empty());
        assert_eq!(parsed.comments.len(), 2);
    }

    #[test]
    fn malformed_chains_keep_parsed_prefix() {
        let parsed = parse(Some("@zod.max(3).min(1\n@zod.int()trailing\n@zod max(4)"));
        assert_eq!(parsed.directives, vec![modifier("max(3)"), modifier("int()")]);
        assert!(parsed.comments.is_empty());
    }

    #[test]
    fn multiple_custom_schemas_are_all_recorded() {
        let parsed = parse(Some("@zod.custom(a)\n@zod.custom(b)"));
        assert_eq!(parsed.directives.len(), 2);
        assert_eq!(parsed.custom_schema(), Some("a"));
    }
}
