//! User-friendly diagnostic messages.
//!
//! Fatal errors name the stage that failed, what the failing tool said, and
//! what the user can do about it.

use std::fmt;
use std::path::{Path, PathBuf};

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no swift executable can be found.
    pub const INSTALL_SWIFT: &str =
        "Install a Swift toolchain, or point SWIFT_EXEC at the swift executable";

    /// Suggestion when reading the manifest through swift is not possible.
    pub const USE_DUMPED_MANIFEST: &str =
        "Run `swift package dump-package > package.json` elsewhere and pass `--manifest package.json`";

    /// Suggestion when the manifest tool fails inside another build.
    pub const USE_ISOLATED: &str =
        "If running inside another SwiftPM build, retry with `--isolated`";

    /// Suggestion when the package directory is wrong.
    pub const CHECK_PACKAGE_PATH: &str = "Check that the path points at a directory containing Package.swift";

    /// Suggestion when a settings file is malformed.
    pub const CHECK_SETTINGS: &str = "Run `actiongen check-config` to locate the problem";
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let error_prefix = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };

        output.push_str(&format!("{}: {}\n", error_prefix, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  | {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// A settings file that is not valid, with the offending location.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("invalid settings file: {message}")]
#[diagnostic(
    code(actiongen::settings::invalid),
    help("Fields are optional; remove or fix the highlighted entry")
)]
pub struct SettingsSyntaxError {
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
}

impl SettingsSyntaxError {
    /// Build from a JSON error, locating its line/column in `contents`.
    pub fn new(path: &Path, contents: String, error: &serde_json::Error) -> Self {
        let offset = offset_of(&contents, error.line(), error.column());
        let len = contents[offset..].chars().next().map_or(0, char::len_utf8);

        SettingsSyntaxError {
            message: strip_position(&error.to_string()),
            src: NamedSource::new(path.display().to_string(), contents),
            span: (offset, len).into(),
        }
    }
}

/// Byte offset of a 1-based line and column, clamped to the text.
///
/// serde_json counts columns in bytes, so the result is moved back to the
/// start of the character it lands in.
fn offset_of(contents: &str, line: usize, column: usize) -> usize {
    let line_start: usize = contents
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();

    let mut offset = (line_start + column.saturating_sub(1)).min(contents.len());
    while !contents.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Drop serde_json's trailing " at line L column C"; the span shows it.
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
