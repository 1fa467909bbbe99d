use std::fmt;

/// Errors that can occur while encoding or decoding prime factorization notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PfeError {
    /// A value outside the domain of the requested operation
    InvalidArgument { reason: String },
    /// The notation is structurally broken (bad character, unbalanced
    /// brackets, wrong block width, nesting or expansion beyond the limits)
    MalformedInput {
        reason: String,
        position: Option<usize>,
        input: String,
    },
    /// A character block has no entry in the character table
    UnknownEncoding { notation: String, position: usize },
}

impl PfeError {
    /// Create an InvalidArgument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        PfeError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create a MalformedInput error that applies to the input as a whole
    pub fn malformed(reason: impl Into<String>, input: &str) -> Self {
        PfeError::MalformedInput {
            reason: reason.into(),
            position: None,
            input: truncate(input),
        }
    }

    /// Create a MalformedInput error pointing at a byte offset of the input
    pub fn malformed_at(reason: impl Into<String>, position: usize, input: &str) -> Self {
        PfeError::MalformedInput {
            reason: reason.into(),
            position: Some(position),
            input: truncate(input),
        }
    }

    /// Create an UnknownEncoding error for a character block
    pub fn unknown_encoding(notation: &str, position: usize) -> Self {
        PfeError::UnknownEncoding {
            notation: truncate(notation),
            position,
        }
    }

    /// Renders the report without ANSI colour codes.
    pub fn plain(&self) -> String {
        let mut out = String::new();
        self.render(&mut out, false).ok();
        out
    }

    fn render(&self, f: &mut impl fmt::Write, use_color: bool) -> fmt::Result {
        let (header, hint) = if use_color {
            ("\x1b[1;31merror:\x1b[0m", "\x1b[1;36mhint:\x1b[0m")
        } else {
            ("error:", "hint:")
        };

        match self {
            PfeError::InvalidArgument { reason } => {
                writeln!(f, "{} invalid argument: {}", header, reason)?;
                writeln!(f)?;
                write!(
                    f,
                    "{} text must stay within code points 0-255; integers must be non-negative, with every prime exponent below 10 and no more exponent slots than [limits] max_run",
                    hint
                )
            }
            PfeError::MalformedInput {
                reason,
                position,
                input,
            } => {
                match position {
                    Some(pos) => writeln!(
                        f,
                        "{} malformed input at position {}: {}",
                        header, pos, reason
                    )?,
                    None => writeln!(f, "{} malformed input: {}", header, reason)?,
                }
                writeln!(f)?;

                // Caret only when the position is still inside the (possibly truncated) input
                if !input.is_empty() {
                    writeln!(f, "  {}", input)?;
                    if let Some(pos) = position {
                        if let Some(prefix) = input.get(..*pos) {
                            let column = prefix.chars().count();
                            write!(f, "  {}", " ".repeat(column))?;
                            if use_color {
                                writeln!(f, "\x1b[1;31m^\x1b[0m")?;
                            } else {
                                writeln!(f, "^")?;
                            }
                        }
                    }
                    writeln!(f)?;
                }

                write!(
                    f,
                    "{} notations use the digits 0-9, the separator ' and balanced ( ) or [ ] groups",
                    hint
                )
            }
            PfeError::UnknownEncoding { notation, position } => {
                writeln!(
                    f,
                    "{} unknown character block '{}' at position {}",
                    header, notation, position
                )?;
                writeln!(f)?;
                write!(
                    f,
                    "{} every block must match one of the 256 padded table entries (see `pfe dict`)",
                    hint
                )
            }
        }
    }
}

impl fmt::Display for PfeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, should_use_color())
    }
}

impl std::error::Error for PfeError {}

/// Shorthand for results produced by the codecs.
pub type Result<T> = std::result::Result<T, PfeError>;

fn truncate(input: &str) -> String {
    if input.chars().count() > 60 {
        let head: String = input.chars().take(60).collect();
        format!("{}...", head)
    } else {
        input.to_string()
    }
}

/// Check if colored output should be used
fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}
