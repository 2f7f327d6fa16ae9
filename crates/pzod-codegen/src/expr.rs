//! # Validator Expressions
//!
//! A [`ValidatorExpression`] is a base constructor (`z.string()`,
//! `jsonSchema`, `RelatedPostModel`) followed by a chain of modifier calls.
//! The modifier list is normalized as it is built: empty tokens are dropped
//! and a token already present is not added again, so the first occurrence
//! keeps its position.
//!
//! [`ObjectLiteral`] and [`Deferred`] are the two composite shapes the
//! emitter renders around compiled expressions.

use std::fmt;

/// A base constructor plus ordered, deduplicated modifier calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorExpression {
    base: String,
    modifiers: Vec<String>,
}

impl ValidatorExpression {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            modifiers: Vec::new(),
        }
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, modifier: impl Into<String>) -> Self {
        self.push(modifier);
        self
    }

    /// Append a modifier call, e.g. `max(255)`. Empty and duplicate tokens
    /// are ignored.
    pub fn push(&mut self, modifier: impl Into<String>) {
        let modifier = modifier.into();
        let modifier = modifier.trim();
        if modifier.is_empty() || self.modifiers.iter().any(|m| m == modifier) {
            return;
        }
        self.modifiers.push(modifier.to_string());
    }

    /// Swap the base constructor, keeping every modifier.
    pub fn replace_base(&mut self, base: impl Into<String>) {
        self.base = base.into();
    }

    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }
}

impl fmt::Display for ValidatorExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        for modifier in &self.modifiers {
            write!(f, ".{modifier}")?;
        }
        Ok(())
    }
}

/// One `name: value,` entry of an object literal, with its JSDoc lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: String,
    pub comments: Vec<String>,
}

/// A multi-line object literal indented by two spaces:
///
/// ```text
/// {
///   /**
///    * Display name
///    */
///   name: z.string(),
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectLiteral {
    pub properties: Vec<Property>,
}

impl ObjectLiteral {
    pub fn push(&mut self, name: &str, value: impl fmt::Display, comments: Vec<String>) {
        self.properties.push(Property {
            name: name.to_string(),
            value: value.to_string(),
            comments,
        });
    }
}

impl fmt::Display for ObjectLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.properties.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{\n")?;
        for property in &self.properties {
            for line in jsdoc(&property.comments) {
                writeln!(f, "  {line}")?;
            }
            writeln!(f, "  {}: {},", property.name, property.value)?;
        }
        f.write_str("}")
    }
}

/// A value resolved on first use instead of at definition time. Renders as
/// a zero-argument thunk handed to `z.lazy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred<T>(pub T);

impl<T: fmt::Display> fmt::Display for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "z.lazy(() => {})", self.0)
    }
}

/// A JSDoc block for `comments`, or nothing when there is no text.
pub fn jsdoc(comments: &[String]) -> Vec<String> {
    if comments.iter().all(|c| c.trim().is_empty()) {
        return Vec::new();
    }
    let mut lines = Vec::with_capacity(comments.len() + 2);
    lines.push("/**".to_string());
    for comment in comments {
        lines.push(format!(" * {comment}").trim_end().to_string());
    }
    lines.push(" */".to_string());
    lines
}

/// Escape `value` for a double-quoted TypeScript string literal.
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
