use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Returns the inline value, else the file contents, else all of stdin.
///
/// A single trailing line ending is dropped so that `echo hi | pfe encode`
/// encodes `hi`.
pub fn read_input(
    inline: Option<String>,
    file: Option<&Path>,
) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(text) = inline {
        return Ok(text);
    }

    let mut content = match file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if content.ends_with('\n') {
        content.pop();
        if content.ends_with('\r') {
            content.pop();
        }
    }
    Ok(content)
}

/// Writes one result line, labelled unless `quiet`.
pub fn write_labeled(
    out: &mut impl Write,
    label: &str,
    value: &str,
    quiet: bool,
) -> io::Result<()> {
    if quiet {
        writeln!(out, "{}", value)
    } else {
        writeln!(out, "{:<16}{}", format!("{}:", label), value)
    }
}

/// Renders a character so that controls and blanks stay visible.
pub fn display_char(c: char) -> String {
    format!("{:?}", c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_input_wins() {
        let text = read_input(Some("hi\n".to_string()), Some(Path::new("missing"))).unwrap();
        assert_eq!(text, "hi\n");
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_input(None, Some(Path::new("/nonexistent/pfe-input"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/pfe-input"));
    }

    #[test]
    fn test_write_labeled() {
        let mut out = Vec::new();
        write_labeled(&mut out, "simplified pfe", "[2]'1'(1'3)", false).unwrap();
        write_labeled(&mut out, "raw pfe", "0'0'0'0'1'(1'3)", true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "simplified pfe: [2]'1'(1'3)\n0'0'0'0'1'(1'3)\n");
    }

    #[test]
    fn test_display_char_escapes_controls() {
        assert_eq!(display_char('a'), "'a'");
        assert_eq!(display_char('\n'), "'\\n'");
        assert_eq!(display_char('\u{0}'), "'\\0'");
    }
}
