/// Splits raw spreadsheet text into rows of fields.
///
/// Single-pass scan with two modes (quoted, unquoted). Inside quotes a
/// doubled `""` is a literal quote and a lone quote drops back to unquoted
/// mode; an unterminated quote is closed implicitly at end of input. `\n`,
/// `\r\n` and `\r` all end a row, consecutive line breaks are collapsed, and
/// the last field/row is flushed even without a trailing delimiter. Rows
/// whose fields are all blank after trimming are discarded.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    // escaped quote
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => row.push(std::mem::take(&mut field)),
                '\n' | '\r' => {
                    if c == '\r' && chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                    // collapse runs of line breaks into a single row end
                    while matches!(chars.peek(), Some('\n' | '\r')) {
                        chars.next();
                    }
                }
                _ => field.push(c),
            }
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows.retain(|r| r.iter().any(|f| !f.trim().is_empty()));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_field_keeps_comma_and_escaped_quote() {
        let rows = parse_csv("1,\"Smith, \"\"Bob\"\" Jr.\",12 Elm St");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec!["1", "Smith, \"Bob\" Jr.", "12 Elm St"]);
    }

    #[test]
    fn test_line_endings_and_blank_lines_collapse() {
        let rows = parse_csv("a,b\r\n\r\n\nc,d\re,f\n");
        assert_eq!(
            rows,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
                vec!["e".to_string(), "f".to_string()],
            ]
        );
    }

    #[test]
    fn test_final_field_flushed_without_trailing_newline() {
        let rows = parse_csv("a,b\nc,d");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["c", "d"]);
    }

    #[test]
    fn test_whitespace_only_rows_are_dropped() {
        let rows = parse_csv("a,b\n  , \t\nc,d");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["a", "b"]);
        assert_eq!(rows[1], vec!["c", "d"]);
    }

    #[test]
    fn test_unterminated_quote_closes_at_end_of_input() {
        let rows = parse_csv("a,\"unterminated");
        assert_eq!(rows, vec![vec!["a".to_string(), "unterminated".to_string()]]);
    }

    #[test]
    fn test_lone_quote_toggles_out_of_quoted_mode() {
        let rows = parse_csv("\"ab\"cd,e");
        assert_eq!(rows, vec![vec!["abcd".to_string(), "e".to_string()]]);
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("\n\r\n\n").is_empty());
    }
}
