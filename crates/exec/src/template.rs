use thiserror::Error;

/// The character replaced by the candidate value in a command.
pub const PLACEHOLDER: char = '%';

/// Errors that can occur when building a [`CommandTemplate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("command is empty")]
    Empty,

    #[error("command `{0}` has no `%` placeholder")]
    MissingPlaceholder(String),
}

/// A command line with one or more `%` placeholders.
///
/// Tokens are joined with single spaces and run through a shell, so quoting
/// and metacharacters behave the same as when the command is typed by hand.
/// Every placeholder occurrence receives the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    tokens: Vec<String>,
    line: String,
}

impl CommandTemplate {
    /// Creates a template from command tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no tokens or no token contains a placeholder.
    pub fn new<I, S>(tokens: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Err(TemplateError::Empty);
        }

        let line = tokens.join(" ");
        if !line.contains(PLACEHOLDER) {
            return Err(TemplateError::MissingPlaceholder(line));
        }

        Ok(Self { tokens, line })
    }

    /// Returns the joined command line, placeholders included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// Returns the option the first placeholder belongs to.
    ///
    /// For `--passes=%` or `-b%` this is the token itself with the value part
    /// removed; for `--passes %` it is the preceding token.
    #[must_use]
    pub fn placeholder_option(&self) -> Option<&str> {
        let index = self.tokens.iter().position(|t| t.contains(PLACEHOLDER))?;
        let token = &self.tokens[index];

        let prefix = token
            .split_once(PLACEHOLDER)
            .map_or("", |(head, _)| head)
            .trim_end_matches('=');
        if prefix.starts_with('-') {
            return Some(prefix);
        }

        index
            .checked_sub(1)
            .map(|prev| self.tokens[prev].as_str())
            .filter(|prev| prev.starts_with('-'))
    }

    /// Substitutes `value` for every placeholder.
    #[must_use]
    pub fn render(&self, value: f64) -> String {
        substitute(&self.line, value)
    }
}

/// Substitutes `value` for every placeholder in an arbitrary command line.
pub(crate) fn substitute(line: &str, value: f64) -> String {
    line.replace(PLACEHOLDER, &format_value(value))
}

/// Formats a parameter value the way it is passed on a command line.
///
/// Integral values print without a fractional part.
#[must_use]
pub fn format_value(value: f64) -> String {
    format!("{value}")
}
