//! # Lexical `@db.*` Scanner
//!
//! Recovers native column-type annotations from Prisma schema text. The DMMF
//! datamodel handed to generators drops `@db.*` attributes, so they are read
//! back from the source.
//!
//! ## Design
//!
//! This is a tolerant, line-oriented scan and not a grammar. It tracks
//! brace depth (ignoring braces inside string literals and `//` comments)
//! to find `model <Name> { ... }` blocks, and inside each block reads one
//! field declaration per line:
//!
//! ```text
//! title  String  @db.VarChar(255)   // -> ("title", "VarChar(255)")
//! ```
//!
//! Block attributes (`@@id([a, b])`), relation fields, enums, datasource
//! and generator blocks and anything else it does not understand are
//! skipped without error.

use crate::map::{FieldNativeTypes, NativeTypeMap};

/// Attribute prefix of native type annotations.
const DB_ATTRIBUTE: &str = "@db.";

/// A source of native type annotations.
///
/// The resolver depends only on this trait so that a structured schema
/// parser can replace [`LexicalScanner`].
pub trait NativeTypeSource {
    /// Build the native type map of the given schema text.
    fn native_types(&self, source: &str) -> NativeTypeMap;
}

/// The default, line-oriented scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalScanner;

impl NativeTypeSource for LexicalScanner {
    fn native_types(&self, source: &str) -> NativeTypeMap {
        let mut map = NativeTypeMap::new();
        let mut open: Option<OpenBlock> = None;
        // A block header whose `{` has not been seen yet.
        let mut pending: Option<Option<String>> = None;

        for line in source.lines() {
            let code = strip_comment(line);

            if let Some(block) = open.as_mut() {
                if block.feed(code) {
                    close(&mut map, open.take());
                }
                continue;
            }

            let trimmed = code.trim();
            if trimmed.is_empty() {
                continue;
            }

            let (model, remainder) = match pending.take() {
                Some(model) => match trimmed.strip_prefix('{') {
                    Some(rest) => (model, rest),
                    // The header was not a block after all.
                    None => match block_header(code) {
                        Some(header) => header,
                        None => continue,
                    },
                },
                None => match block_header(code) {
                    Some(header) => header,
                    None => {
                        pending = pending_header(trimmed);
                        continue;
                    }
                },
            };

            let mut block = OpenBlock::new(model);
            if block.feed(remainder) {
                close(&mut map, Some(block));
            } else {
                open = Some(block);
            }
        }

        // Unterminated final block: keep what was recovered.
        close(&mut map, open);
        map
    }
}

fn close(map: &mut NativeTypeMap, block: Option<OpenBlock>) {
    if let Some(OpenBlock {
        model: Some(model),
        fields,
        ..
    }) = block
    {
        map.insert_model(model, fields);
    }
}

/// A block currently being read.
struct OpenBlock {
    /// `Some` for `model` blocks; other blocks are only tracked for their
    /// braces.
    model: Option<String>,
    depth: usize,
    fields: FieldNativeTypes,
}

impl OpenBlock {
    fn new(model: Option<String>) -> Self {
        Self {
            model,
            depth: 1,
            fields: FieldNativeTypes::new(),
        }
    }

    /// Consume one line of body text. Returns `true` when the block closed
    /// on this line.
    fn feed(&mut self, code: &str) -> bool {
        let top_level = self.depth == 1;
        let mut close_at = None;
        for (idx, brace) in braces(code) {
            if brace == '{' {
                self.depth += 1;
            } else {
                self.depth = self.depth.saturating_sub(1);
                if self.depth == 0 {
                    close_at = Some(idx);
                    break;
                }
            }
        }

        if top_level && self.model.is_some() {
            let content = &code[..close_at.unwrap_or(code.len())];
            if let Some((field, native)) = field_native_type(content) {
                self.fields.entry(field.to_string()).or_insert(native.to_string());
            }
        }

        close_at.is_some()
    }
}

/// Parse `<keyword> <Name> {` and return the model name (for `model`
/// blocks) and the text after the opening brace.
fn block_header(code: &str) -> Option<(Option<String>, &str)> {
    let open = braces(code).into_iter().find(|(_, b)| *b == '{')?.0;
    let header = code[..open].trim();
    let remainder = &code[open + 1..];
    Some((model_name(header), remainder))
}

/// A header line without its `{`: `model User` followed by `{` on the next
/// line.
fn pending_header(trimmed: &str) -> Option<Option<String>> {
    let mut words = trimmed.split_whitespace();
    let keyword = words.next()?;
    let name = words.next()?;
    if words.next().is_some() || !is_identifier(name) {
        return None;
    }
    matches!(
        keyword,
        "model" | "enum" | "type" | "view" | "datasource" | "generator"
    )
    .then(|| model_name(trimmed))
}

fn model_name(header: &str) -> Option<String> {
    let mut words = header.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("model"), Some(name), None) if is_identifier(name) => Some(name.to_string()),
        _ => None,
    }
}

/// Extract `(field name, native type)` from one field declaration line.
fn field_native_type(content: &str) -> Option<(&str, &str)> {
    let line = content.trim();
    if line.starts_with('@') {
        return None;
    }
    let name_len = line.find(char::is_whitespace)?;
    let (name, rest) = line.split_at(name_len);
    if !is_identifier(name) || rest.trim().is_empty() {
        return None;
    }
    let at = find_outside_strings(rest, DB_ATTRIBUTE)?;
    let native = db_attribute_value(&rest[at + DB_ATTRIBUTE.len()..])?;
    Some((name, native))
}

/// The tag after `@db.` plus its balanced parameter list, verbatim.
fn db_attribute_value(text: &str) -> Option<&str> {
    let tag_len = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    if tag_len == 0 {
        return None;
    }
    if !text[tag_len..].starts_with('(') {
        return Some(&text[..tag_len]);
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (idx, c) in text[tag_len..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..tag_len + idx + 1]);
                }
            }
            _ => {}
        }
    }
    // Unbalanced parameters: keep the bare tag.
    Some(&text[..tag_len])
}

/// Positions of `{` and `}` outside string literals.
fn braces(code: &str) -> Vec<(usize, char)> {
    let mut found = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for (idx, c) in code.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
        } else {
            match c {
                '"' => in_string = true,
                '{' | '}' => found.push((idx, c)),
                _ => {}
            }
        }
    }
    found
}

/// Byte offset of the first `needle` outside string literals.
fn find_outside_strings(haystack: &str, needle: &str) -> Option<usize> {
    let mut in_string = false;
    let mut escaped = false;
    for (idx, c) in haystack.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
        } else if c == '"' {
            in_string = true;
        } else if haystack[idx..].starts_with(needle) {
            return Some(idx);
        }
    }
    None
}

/// Drop a trailing `//` comment (including `///` documentation).
fn strip_comment(line: &str) -> &str {
    match find_outside_strings(line, "//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> NativeTypeMap {
        LexicalScanner.native_types(source)
    }

    const SCHEMA: &str = r#"
datasource db {
  provider = "postgresql"
  url      = env("DATABASE_URL")
}

generator zod {
  provider = "pzod"
  output   = "./zod"
}

/// A user of the system.
model User {
  id        String   @id @default(dbgenerated("gen_random_uuid()")) @db.Uuid
  /// Display name
  name      String   @db.VarChar(255)
  price     Decimal  @db.Decimal(10, 2)
  settings  Json     @default("{}") @db.JsonB
  posts     Post[]
  profile   Profile? @relation(fields: [profileId], references: [id])
  profileId String?  @unique @db.Uuid
  // legacy  String  @db.Text
  note      String   @default("see @db.Text")

  @@index([name, price])
  @@map("users")
}

enum Role {
  USER
  ADMIN
}

model Post {
  id     Int    @id @default(autoincrement())
  title  String
  userId String @db.Uuid
  user   User   @relation(fields: [userId], references: [id])
}

model Membership {
  userId String @db.Uuid
  teamId String @db.Uuid
  @@id([userId, teamId])
}
"#;

    #[test]
    fn recovers_annotations_verbatim() {
        let map = scan(SCHEMA);
        assert_eq!(map.get("User", "id"), Some("Uuid"));
        assert_eq!(map.get("User", "name"), Some("VarChar(255)"));
        assert_eq!(map.get("User", "price"), Some("Decimal(10, 2)"));
        assert_eq!(map.get("User", "settings"), Some("JsonB"));
        assert_eq!(map.get("User", "profileId"), Some("Uuid"));
        assert_eq!(map.get("Post", "userId"), Some("Uuid"));
        assert_eq!(map.get("Membership", "teamId"), Some("Uuid"));
    }

    #[test]
    fn ignores_relations_comments_strings_and_other_blocks() {
        let map = scan(SCHEMA);
        assert_eq!(map.get("User", "posts"), None);
        assert_eq!(map.get("User", "profile"), None);
        assert_eq!(map.get("User", "legacy"), None);
        assert_eq!(map.get("User", "note"), None);
        assert_eq!(map.get("Post", "title"), None);
        assert!(map.model("Role").is_none());
        assert!(map.model("db").is_none());
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn models_without_annotations_are_absent() {
        let map = scan("model Tag {\n  id Int @id\n  name String\n}\n");
        assert!(map.is_empty());
    }

    #[test]
    fn brace_on_next_line_and_single_line_blocks() {
        let map =
            scan("model A\n{\n  id String @db.Uuid\n}\nmodel B { code String @db.Char(3) }\n");
        assert_eq!(map.get("A", "id"), Some("Uuid"));
        assert_eq!(map.get("B", "code"), Some("Char(3)"));
    }

    #[test]
    fn braces_inside_defaults_do_not_end_the_block() {
        let source = concat!(
            "model Doc {\n",
            "  body Json @default(\"{\\\"a\\\": {}}\")\n",
            "  slug String @db.VarChar(80)\n",
            "}\n",
        );
        let map = scan(source);
        assert_eq!(map.get("Doc", "slug"), Some("VarChar(80)"));
    }

    #[test]
    fn unbalanced_parameters_keep_the_tag() {
        let map = scan("model A {\n  name String @db.VarChar(255\n}\n");
        assert_eq!(map.get("A", "name"), Some("VarChar"));
    }

    #[test]
    fn unterminated_block_keeps_recovered_fields() {
        let map = scan("model A {\n  id String @db.Uuid\n");
        assert_eq!(map.get("A", "id"), Some("Uuid"));
    }

    #[test]
    fn garbage_never_panics() {
        let sources = [
            "}}}{{{",
            "model",
            "model {",
            "@db.",
            "model A {\n x @db.\n}",
            "\"unterminated",
        ];
        for source in sources {
            let _ = scan(source);
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scanning_arbitrary_text_never_panics(source in "\\PC{0,200}") {
                let _ = scan(&source);
            }

            #[test]
            fn scanning_is_deterministic(source in "[a-zA-Z@(){}.\"\n /0-9]{0,200}") {
                prop_assert_eq!(scan(&source), scan(&source));
            }
        }
    }
}
