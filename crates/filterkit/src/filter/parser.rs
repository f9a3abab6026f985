//! Parser for filter search text.

use indexmap::IndexMap;

use super::scanner::{is_key_char, Scanner};

/// Ordered `(key, value)` pairs parsed from search text.
///
/// Keys keep the order of their first occurrence. A repeated key keeps its
/// position and takes the later value. `None` marks a standalone word.
pub type ParsedFilter = IndexMap<String, Option<String>>;

/// Parser for filter search text.
///
/// Parsing never fails. Characters that cannot start a key are skipped, and
/// words that are not followed by a colon become standalone keys.
///
/// # Grammar
///
/// ```text
/// text     ::= (pair | word | junk)*
/// pair     ::= key ws* ":" value
/// word     ::= key
/// key      ::= [A-Za-z0-9_]+
/// value    ::= ws* '"' quoted '"' | ws* "'" quoted "'" | unquoted | ""
/// unquoted ::= any text up to the next ws+ key ws* ":"
/// ```
///
/// # Example
///
/// ```
/// use filterkit_rs::filter::FilterTextParser;
///
/// let pairs = FilterTextParser::parse("name: priority:10 archived");
/// assert_eq!(pairs["name"].as_deref(), Some(""));
/// assert_eq!(pairs["priority"].as_deref(), Some("10"));
/// assert_eq!(pairs["archived"], None);
/// ```
pub struct FilterTextParser;

impl FilterTextParser {
    /// Parses search text into ordered key/value pairs.
    ///
    /// The input is used as given; callers fold case and trim if they want
    /// case-insensitive keys.
    pub fn parse(input: &str) -> ParsedFilter {
        let mut scanner = Scanner::new(input);
        let mut pairs = ParsedFilter::new();

        loop {
            scanner.skip_whitespace();
            let Some(c) = scanner.peek() else {
                break;
            };

            if !is_key_char(c) {
                scanner.next_char();
                continue;
            }

            let key = scanner.read_key();
            if scanner.consume_colon() {
                let value = Self::read_value(&mut scanner);
                pairs.insert(key, Some(value));
            } else {
                pairs.insert(key, None);
            }
        }

        pairs
    }

    /// Reads the value that follows `key:`.
    fn read_value(scanner: &mut Scanner<'_>) -> String {
        if scanner.at_key_boundary() {
            return String::new();
        }

        scanner.skip_whitespace();
        match scanner.peek() {
            None => String::new(),
            Some(quote @ ('"' | '\'')) => scanner.read_quoted(quote),
            Some(_) => scanner.read_unquoted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(input: &str) -> Vec<(String, Option<String>)> {
        FilterTextParser::parse(input).into_iter().collect()
    }

    fn pair(key: &str, value: Option<&str>) -> (String, Option<String>) {
        (key.to_string(), value.map(str::to_string))
    }

    #[test]
    fn test_parse_simple_pairs() {
        assert_eq!(
            pairs("scope:admin active:true"),
            vec![pair("scope", Some("admin")), pair("active", Some("true"))]
        );
    }

    #[test]
    fn test_parse_double_quoted_value() {
        assert_eq!(
            pairs(r#"name:"strict security policy" realm:internal"#),
            vec![
                pair("name", Some("strict security policy")),
                pair("realm", Some("internal")),
            ]
        );
    }

    #[test]
    fn test_parse_single_quoted_value() {
        assert_eq!(
            pairs("name: 'it\\'s here'"),
            vec![pair("name", Some("it's here"))]
        );
    }

    #[test]
    fn test_parse_colon_inside_value() {
        assert_eq!(pairs("name:scope:admin"), vec![pair("name", Some("scope:admin"))]);
    }

    #[test]
    fn test_parse_empty_value_before_next_key() {
        assert_eq!(
            pairs("name: priority:10"),
            vec![pair("name", Some("")), pair("priority", Some("10"))]
        );
        assert_eq!(
            pairs("key1: key2: v"),
            vec![pair("key1", Some("")), pair("key2", Some("v"))]
        );
    }

    #[test]
    fn test_parse_spaced_pairs_split() {
        assert_eq!(
            pairs("name: scope: admin"),
            vec![pair("name", Some("")), pair("scope", Some("admin"))]
        );
    }

    #[test]
    fn test_parse_empty_value_at_end() {
        assert_eq!(pairs("name:"), vec![pair("name", Some(""))]);
        assert_eq!(pairs("name :  "), vec![pair("name", Some(""))]);
    }

    #[test]
    fn test_parse_standalone_words() {
        assert_eq!(
            pairs("standalone search_term"),
            vec![pair("standalone", None), pair("search_term", None)]
        );
    }

    #[test]
    fn test_parse_unquoted_value_spans_words() {
        assert_eq!(
            pairs("description:needs review soon user:alice"),
            vec![
                pair("description", Some("needs review soon")),
                pair("user", Some("alice")),
            ]
        );
    }

    #[test]
    fn test_parse_standalone_before_pair() {
        assert_eq!(
            pairs("hello scope:admin"),
            vec![pair("hello", None), pair("scope", Some("admin"))]
        );
    }

    #[test]
    fn test_parse_repeated_key_keeps_first_position() {
        assert_eq!(
            pairs("a:1 b:2 a:3"),
            vec![pair("a", Some("3")), pair("b", Some("2"))]
        );
    }

    #[test]
    fn test_parse_repeated_key_standalone_overwrites() {
        assert_eq!(pairs("a:1 b:2 a"), vec![pair("a", None), pair("b", Some("2"))]);
    }

    #[test]
    fn test_parse_empty_and_whitespace() {
        assert!(pairs("").is_empty());
        assert!(pairs("   \t\n").is_empty());
    }

    #[test]
    fn test_parse_skips_junk_characters() {
        assert!(pairs("::: --- !!").is_empty());
        assert_eq!(pairs(":scope"), vec![pair("scope", None)]);
        assert_eq!(pairs("-x:1"), vec![pair("x", Some("1"))]);
    }

    #[test]
    fn test_parse_unterminated_quote() {
        assert_eq!(pairs("name:\"open"), vec![pair("name", Some("open"))]);
    }

    #[test]
    fn test_parse_text_after_closing_quote() {
        assert_eq!(
            pairs("name:\"a b\"tail"),
            vec![pair("name", Some("a b")), pair("tail", None)]
        );
    }

    #[test]
    fn test_parse_repeated_colons() {
        assert_eq!(pairs("a::::"), vec![pair("a", Some(":::"))]);
        assert_eq!(pairs("a: : :"), vec![pair("a", Some(": :"))]);
    }

    #[test]
    fn test_parse_wildcard_value_is_kept() {
        assert_eq!(pairs("name:*"), vec![pair("name", Some("*"))]);
    }

    #[test]
    fn test_parse_does_not_fold_case() {
        assert_eq!(pairs("Scope:Admin"), vec![pair("Scope", Some("Admin"))]);
    }
}
