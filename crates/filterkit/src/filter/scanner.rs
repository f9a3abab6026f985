//! Character scanner for filter search text.

/// Returns true for characters allowed in a filter key.
pub fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns true if `text` starts with `key\s*:`.
fn starts_with_key_colon(text: &str) -> bool {
    let after_key = text.trim_start_matches(is_key_char);
    if after_key.len() == text.len() {
        return false;
    }
    after_key.trim_start().starts_with(':')
}

/// Cursor over search text with multi-character lookahead.
///
/// Positions are byte offsets and always sit on a char boundary.
pub struct Scanner<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// The unconsumed part of the input.
    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Peeks at the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes and returns the next character.
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Returns true once every character has been consumed.
    #[cfg(test)]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Skips whitespace characters.
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.next_char();
        }
    }

    /// Reads a run of key characters. Empty if the next char is not one.
    pub fn read_key(&mut self) -> String {
        let mut key = String::new();
        while let Some(c) = self.peek() {
            if !is_key_char(c) {
                break;
            }
            key.push(c);
            self.next_char();
        }
        key
    }

    /// Returns true if a colon follows, possibly after whitespace.
    pub fn colon_follows(&self) -> bool {
        self.rest().trim_start().starts_with(':')
    }

    /// Consumes optional whitespace and a colon, if present.
    pub fn consume_colon(&mut self) -> bool {
        if !self.colon_follows() {
            return false;
        }
        self.skip_whitespace();
        self.next_char();
        true
    }

    /// Returns true if the input continues with whitespace then `key:`.
    ///
    /// This marks the end of an unquoted value.
    pub fn at_key_boundary(&self) -> bool {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        trimmed.len() < rest.len() && starts_with_key_colon(trimmed)
    }

    /// Reads a quoted string, starting at the opening quote.
    ///
    /// Only the quote character and the backslash can be escaped. Any other
    /// backslash is kept. An unterminated quote runs to the end of input.
    pub fn read_quoted(&mut self, quote: char) -> String {
        self.next_char();

        let mut result = String::new();
        while let Some(c) = self.next_char() {
            if c == quote {
                break;
            }
            if c == '\\' {
                match self.peek() {
                    Some(escaped) if escaped == quote || escaped == '\\' => {
                        result.push(escaped);
                        self.next_char();
                    }
                    _ => result.push(c),
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    /// Reads an unquoted value up to the next key boundary or end of input.
    ///
    /// Trailing whitespace is not part of the value.
    pub fn read_unquoted(&mut self) -> String {
        let mut value = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() && self.at_key_boundary() {
                break;
            }
            value.push(c);
            self.next_char();
        }
        value.truncate(value.trim_end().len());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_key_char() {
        assert!(is_key_char('a'));
        assert!(is_key_char('Z'));
        assert!(is_key_char('7'));
        assert!(is_key_char('_'));
        assert!(!is_key_char(':'));
        assert!(!is_key_char('-'));
        assert!(!is_key_char('é'));
    }

    #[test]
    fn test_read_key_stops_at_colon() {
        let mut scanner = Scanner::new("scope:admin");
        assert_eq!(scanner.read_key(), "scope");
        assert_eq!(scanner.peek(), Some(':'));
    }

    #[test]
    fn test_colon_follows_after_whitespace() {
        let mut scanner = Scanner::new("name  : value");
        scanner.read_key();
        assert!(scanner.colon_follows());
        assert!(scanner.consume_colon());
        assert_eq!(scanner.peek(), Some(' '));
    }

    #[test]
    fn test_at_key_boundary_requires_whitespace() {
        assert!(Scanner::new(" scope: admin").at_key_boundary());
        assert!(Scanner::new("\tscope :admin").at_key_boundary());
        assert!(!Scanner::new("scope:admin").at_key_boundary());
        assert!(!Scanner::new(" scope admin").at_key_boundary());
        assert!(!Scanner::new(" :admin").at_key_boundary());
        assert!(!Scanner::new("   ").at_key_boundary());
    }

    #[test]
    fn test_read_quoted_resolves_escapes() {
        let mut scanner = Scanner::new(r#""say \"hi\" c:\\tmp" rest"#);
        assert_eq!(scanner.read_quoted('"'), r#"say "hi" c:\tmp"#);
        assert_eq!(scanner.peek(), Some(' '));
    }

    #[test]
    fn test_read_quoted_keeps_unknown_escape() {
        let mut scanner = Scanner::new(r"'a\nb'");
        assert_eq!(scanner.read_quoted('\''), r"a\nb");
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_read_quoted_unterminated() {
        let mut scanner = Scanner::new("\"open ended");
        assert_eq!(scanner.read_quoted('"'), "open ended");
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_read_quoted_trailing_backslash() {
        let mut scanner = Scanner::new("\"abc\\");
        assert_eq!(scanner.read_quoted('"'), "abc\\");
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_read_unquoted_stops_at_key_boundary() {
        let mut scanner = Scanner::new("strict policy  realm:internal");
        assert_eq!(scanner.read_unquoted(), "strict policy");
        scanner.skip_whitespace();
        assert_eq!(scanner.read_key(), "realm");
    }

    #[test]
    fn test_read_unquoted_keeps_inner_colon() {
        let mut scanner = Scanner::new("scope:admin");
        assert_eq!(scanner.read_unquoted(), "scope:admin");
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_scanner_handles_multibyte() {
        let mut scanner = Scanner::new("héllo wörld");
        assert_eq!(scanner.read_unquoted(), "héllo wörld");
        assert!(scanner.is_at_end());
    }
}
