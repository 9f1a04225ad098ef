//! An indentation-aware accumulator for one generated Ruby source file. It
//! keeps the require set apart from the body so that requires can be added on
//! demand while the body is being generated, and tracks the indentation
//! level by recognizing the lines that open and close Ruby blocks.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{CodegenError, Result};

const LICENSE_HEADER: &str = "\
#--
# Licensed under the Apache License, Version 2.0 (the \"License\");
# you may not use this file except in compliance with the License.
# You may obtain a copy of the License at
#
#   http://www.apache.org/licenses/LICENSE-2.0
#
# Unless required by applicable law or agreed to in writing, software
# distributed under the License is distributed on an \"AS IS\" BASIS,
# WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
# See the License for the specific language governing permissions and
# limitations under the License.
#++
";

/// Keywords that introduce a block when they start a line.
const OPENING_KEYWORDS: &[&str] = &[
    "case ", "class ", "def ", "if ", "loop ", "module ", "unless ", "when ", "while ",
];

pub struct Buffer {
    /// Output file name relative to the base directory, `/`-separated,
    /// without extension.
    file_name: String,

    /// Names to be required, without the `require` keyword and quotes.
    requires: BTreeSet<String>,

    /// The stack of currently open module names.
    module_stack: Vec<String>,

    /// The lines of the body of the file.
    lines: Vec<String>,

    /// The current indentation level.
    level: usize,
}

impl Buffer {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            requires: BTreeSet::new(),
            module_stack: Vec::new(),
            lines: Vec::new(),
            level: 0,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Adds a name to the require set. Duplicates collapse, and the set
    /// renders in ascending lexicographic order.
    pub fn add_require(&mut self, name: &str) {
        self.requires.insert(name.to_string());
    }

    /// Begins the given module name, which may be separated with `::`, and
    /// writes the corresponding `module` statements.
    pub fn begin_module(&mut self, name: &str) {
        for component in name.split("::") {
            self.module_stack.push(component.to_string());
            self.add_line(&format!("module {component}"));
        }
    }

    /// Ends the given module name, which may be separated with `::`, and
    /// writes the corresponding `end` statements.
    pub fn end_module(&mut self, name: &str) {
        for _ in name.split("::") {
            self.add_line("end");
            self.module_stack.pop();
        }
    }

    /// Adds a line to the body of the file, indented by the current level.
    ///
    /// The detection of block boundaries is purely textual: a line that
    /// happens to contain matching literal content desynchronizes the
    /// indentation without failing. Callers emit one statement per line, so
    /// this does not arise for generated code.
    pub fn add_line(&mut self, line: &str) {
        let opens = line.ends_with('(')
            || line.ends_with('[')
            || line.ends_with('|')
            || matches!(line, "begin" | "else" | "ensure")
            || OPENING_KEYWORDS.iter().any(|kw| line.starts_with(kw));
        let closes = matches!(line, ")" | "]" | "else" | "end" | "ensure")
            || line.starts_with("when ");

        if closes {
            self.level = self.level.saturating_sub(1);
        }

        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            let mut indented = String::with_capacity(self.level * 2 + line.len());
            for _ in 0..self.level {
                indented.push_str("  ");
            }
            indented.push_str(line);
            self.lines.push(indented);
        }

        if opens {
            self.level += 1;
        }
    }

    /// Adds an empty line to the body of the file.
    pub fn blank_line(&mut self) {
        self.add_line("");
    }

    /// Produces the complete source text: license header, the sorted require
    /// list, then the body lines in insertion order.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(LICENSE_HEADER);
        out.push('\n');

        for require in &self.requires {
            out.push_str("require '");
            out.push_str(require);
            out.push_str("'\n");
        }
        out.push('\n');

        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }

        out
    }

    /// Writes the rendered source as a `.rb` file under `dir`, creating
    /// intermediate directories as needed. Errors carry the logical file
    /// name of this buffer.
    pub fn write(&self, dir: &Path) -> Result<()> {
        let mut path = dir.to_path_buf();
        path.extend(self.file_name.split('/'));
        path.set_extension("rb");

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| CodegenError::Write {
                name: self.file_name.clone(),
                source,
            })?;
        }

        debug!("Writing file {}", path.display());
        fs::write(&path, self.render()).map_err(|source| CodegenError::Write {
            name: self.file_name.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body_lines(buffer: &Buffer) -> Vec<String> {
        buffer.lines.clone()
    }

    #[test]
    fn test_opening_keyword_indents_following_lines() {
        let mut buffer = Buffer::new("t");
        buffer.add_line("module Sdk");
        buffer.add_line("x = 1");
        buffer.add_line("end");

        assert_eq!(body_lines(&buffer), vec!["module Sdk", "  x = 1", "end"]);
        assert_eq!(buffer.level, 0);
    }

    #[test]
    fn test_trailing_punctuation_opens_block() {
        let mut buffer = Buffer::new("t");
        buffer.add_line("call(");
        buffer.add_line("1,");
        buffer.add_line(")");

        assert_eq!(body_lines(&buffer), vec!["call(", "  1,", ")"]);
    }

    #[test]
    fn test_else_nets_to_unchanged_level() {
        let mut buffer = Buffer::new("t");
        buffer.add_line("if a");
        buffer.add_line("x");
        buffer.add_line("else");
        buffer.add_line("y");
        buffer.add_line("end");

        assert_eq!(
            body_lines(&buffer),
            vec!["if a", "  x", "else", "  y", "end"]
        );
        assert_eq!(buffer.level, 0);
    }

    #[test]
    fn test_when_nets_to_unchanged_level() {
        let mut buffer = Buffer::new("t");
        buffer.add_line("case x");
        buffer.add_line("when 1");
        buffer.add_line("a");
        buffer.add_line("when 2");
        buffer.add_line("b");
        buffer.add_line("end");

        assert_eq!(
            body_lines(&buffer),
            vec!["case x", "when 1", "  a", "when 2", "  b", "end"]
        );
        assert_eq!(buffer.level, 0);
    }

    #[test]
    fn test_closer_at_level_zero_stays_at_zero() {
        let mut buffer = Buffer::new("t");
        buffer.add_line("end");
        buffer.add_line("end");
        buffer.add_line("x");

        assert_eq!(body_lines(&buffer), vec!["end", "end", "x"]);
        assert_eq!(buffer.level, 0);
    }

    #[test]
    fn test_begin_end_module_balance_stack() {
        let mut buffer = Buffer::new("t");
        buffer.begin_module("MySdk::V4");
        assert_eq!(buffer.module_stack, vec!["MySdk", "V4"]);
        buffer.end_module("MySdk::V4");
        assert!(buffer.module_stack.is_empty());
        assert_eq!(
            body_lines(&buffer),
            vec!["module MySdk", "  module V4", "  end", "end"]
        );
    }

    #[test]
    fn test_requires_render_sorted_and_deduplicated() {
        let mut buffer = Buffer::new("t");
        buffer.add_require("b");
        buffer.add_require("a");
        buffer.add_require("a");

        let rendered = buffer.render();
        assert!(rendered.contains("require 'a'\nrequire 'b'\n"));
        assert_eq!(rendered.matches("require 'a'").count(), 1);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut buffer = Buffer::new("t");
        buffer.begin_module("Sdk");
        buffer.add_line("x = 1");
        buffer.end_module("Sdk");

        assert_eq!(buffer.render(), buffer.render());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut buffer = Buffer::new("mysdk/v4/types");
        buffer.begin_module("MySdk");
        buffer.end_module("MySdk");
        buffer.write(dir.path()).unwrap();

        let path = dir.path().join("mysdk").join("v4").join("types.rb");
        let written = fs::read_to_string(path).unwrap();
        assert_eq!(written, buffer.render());
    }

    proptest! {
        /// Any sequence of lines leaves every emitted line with an even,
        /// well-formed indentation prefix; closers at level zero must not
        /// underflow.
        #[test]
        fn prop_indentation_never_underflows(
            choices in prop::collection::vec(0usize..12, 0..64)
        ) {
            const TOKENS: &[&str] = &[
                "end", ")", "]", "else", "ensure", "when 1",
                "def run", "if x", "module M", "call(", "x = 1", "begin",
            ];

            let mut buffer = Buffer::new("t");
            for choice in choices {
                buffer.add_line(TOKENS[choice]);
            }

            for line in &buffer.lines {
                let spaces = line.len() - line.trim_start_matches(' ').len();
                prop_assert_eq!(spaces % 2, 0);
            }
            let _ = buffer.render();
        }
    }
}
