//! Line-oriented builder for generated TypeScript modules.
//!
//! The layout is fixed: two-space indentation (carried by the rendered
//! fragments), single-quoted module specifiers, no semicolons, one blank
//! line between top-level statements and a trailing newline.

use std::fmt;

/// One `import` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Import {
    /// `import * as <alias> from '<module>'`
    Namespace { alias: String, module: String },
    /// `import { A, B } from '<module>'`
    Named { names: Vec<String>, module: String },
}

impl Import {
    pub fn namespace(alias: &str, module: impl Into<String>) -> Self {
        Self::Namespace {
            alias: alias.to_string(),
            module: module.into(),
        }
    }

    /// A named import. Repeated names are kept once, in first-seen order.
    pub fn named<I, S>(names: I, module: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self::Named {
            names: unique,
            module: module.into(),
        }
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespace { alias, module } => {
                write!(f, "import * as {alias} from '{}'", quote_escape(module))
            }
            Self::Named { names, module } => write!(
                f,
                "import {{ {} }} from '{}'",
                names.join(", "),
                quote_escape(module)
            ),
        }
    }
}

fn quote_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Accumulates the text of one module.
#[derive(Debug, Default)]
pub struct SourceWriter {
    out: String,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` followed by a newline. `text` may span several lines.
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    pub fn lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(line);
        }
    }

    /// Separate the next statement with one blank line. No-op at the start
    /// of the module or after another blank line.
    pub fn blank_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imports_render_single_quoted() {
        assert_eq!(Import::namespace("z", "zod").to_string(), "import * as z from 'zod'");
        assert_eq!(
            Import::named(["CompletePost", "RelatedPostModel", "CompletePost"], "./index")
                .to_string(),
            "import { CompletePost, RelatedPostModel } from './index'"
        );
    }

    #[test]
    fn blank_lines_never_stack() {
        let mut writer = SourceWriter::new();
        writer.blank_line();
        writer.line("a");
        writer.blank_line();
        writer.blank_line();
        writer.lines(["b", "c"]);
        assert_eq!(writer.finish(), "a\n\nb\nc\n");
    }
}
