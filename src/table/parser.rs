//! Streaming parser for delimited text tables.

use std::io::Read;

use serde::{Deserialize, Serialize};

use super::cell::CellValue;
use crate::common::{Error, Result};

/// Field contents read as missing values.
const NA_TOKENS: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL", "#N/A"];

/// Configuration for parsing delimited text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Field delimiter character
    pub delimiter: char,
    /// Quote character for quoted fields
    pub quote: char,
    /// Comment character (lines starting with this are ignored)
    pub comment: Option<char>,
    /// Whether to trim whitespace from fields
    pub trim_whitespace: bool,
    /// Buffer size for reading
    pub buffer_size: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',       // CSV default
            quote: '"',           // Standard CSV quoting
            comment: Some('#'),   // Common comment character
            trim_whitespace: true,
            buffer_size: 8192,    // 8KB buffer
        }
    }
}

impl TextConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Tab-separated values.
    pub fn tsv() -> Self {
        Self::default().with_delimiter('\t')
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the comment character (None to disable comments)
    pub fn with_comment(mut self, comment: Option<char>) -> Self {
        self.comment = comment;
        self
    }

    /// Enable/disable whitespace trimming
    pub fn with_trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }

    fn ascii_byte(c: char, what: &str) -> Result<u8> {
        if c.is_ascii() {
            Ok(c as u8)
        } else {
            Err(Error::Parse(format!("{} must be an ASCII character, got '{}'", what, c)))
        }
    }
}

/// Streaming parser for delimited formats
pub struct TextParser<R: Read> {
    reader: R,
    delimiter: u8,
    quote: u8,
    comment: Option<u8>,
    trim_whitespace: bool,
    buffer: Vec<u8>,
    buffer_pos: usize,
    buffer_len: usize,
}

impl<R: Read> TextParser<R> {
    /// Create a new text parser
    pub fn new(reader: R, config: &TextConfig) -> Result<Self> {
        let comment = match config.comment {
            Some(c) => Some(TextConfig::ascii_byte(c, "comment")?),
            None => None,
        };

        Ok(TextParser {
            reader,
            delimiter: TextConfig::ascii_byte(config.delimiter, "delimiter")?,
            quote: TextConfig::ascii_byte(config.quote, "quote")?,
            comment,
            trim_whitespace: config.trim_whitespace,
            buffer: vec![0; config.buffer_size.max(1)],
            buffer_pos: 0,
            buffer_len: 0,
        })
    }

    /// Fetch the next byte, refilling the buffer as needed.
    fn next_byte(&mut self) -> Result<Option<u8>> {
        if self.buffer_pos >= self.buffer_len {
            self.buffer_len = self.reader.read(&mut self.buffer)?;
            self.buffer_pos = 0;
            if self.buffer_len == 0 {
                return Ok(None);
            }
        }

        let byte = self.buffer[self.buffer_pos];
        self.buffer_pos += 1;
        Ok(Some(byte))
    }

    /// Look at the next byte without consuming it.
    fn peek_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.next_byte()?;
        if byte.is_some() {
            self.buffer_pos -= 1;
        }
        Ok(byte)
    }

    /// Parse the next row, raw text fields only.
    ///
    /// Blank lines and comment lines are skipped.
    pub fn parse_fields(&mut self) -> Result<Option<Vec<String>>> {
        loop {
            match self.parse_line()? {
                None => return Ok(None),
                Some(fields) if fields.len() == 1 && fields[0].is_empty() => continue,
                Some(fields) => return Ok(Some(fields)),
            }
        }
    }

    fn parse_line(&mut self) -> Result<Option<Vec<String>>> {
        let mut fields = Vec::new();
        let mut current_field = Vec::new();
        let mut field_start = true;
        let mut in_quotes = false;
        let mut saw_any = false;

        loop {
            let Some(byte) = self.next_byte()? else {
                if in_quotes {
                    return Err(Error::Parse("unterminated quoted field".to_string()));
                }
                if !saw_any {
                    return Ok(None);
                }
                fields.push(self.finish_field(&mut current_field)?);
                return Ok(Some(fields));
            };
            saw_any = true;

            match byte {
                b'\n' if !in_quotes => {
                    fields.push(self.finish_field(&mut current_field)?);
                    return Ok(Some(fields));
                },
                // CR of a CRLF pair; LF ends the line
                b'\r' if !in_quotes => continue,
                quote if quote == self.quote => {
                    if in_quotes {
                        if self.peek_byte()? == Some(self.quote) {
                            // Doubled quote inside a quoted field
                            self.buffer_pos += 1;
                            current_field.push(self.quote);
                        } else {
                            in_quotes = false;
                        }
                    } else {
                        in_quotes = true;
                        field_start = false;
                    }
                },
                delim if delim == self.delimiter && !in_quotes => {
                    fields.push(self.finish_field(&mut current_field)?);
                    field_start = true;
                },
                b'\\' if in_quotes => match self.next_byte()? {
                    Some(b'n') => current_field.push(b'\n'),
                    Some(b'r') => current_field.push(b'\r'),
                    Some(b't') => current_field.push(b'\t'),
                    Some(b'\\') => current_field.push(b'\\'),
                    Some(q) if q == self.quote => current_field.push(q),
                    Some(other) => {
                        current_field.push(byte);
                        current_field.push(other);
                    },
                    None => current_field.push(byte),
                },
                _ => {
                    if field_start
                        && fields.is_empty()
                        && current_field.is_empty()
                        && !in_quotes
                        && self.comment == Some(byte)
                    {
                        self.skip_line()?;
                        return self.parse_line();
                    }

                    current_field.push(byte);
                    field_start = false;
                },
            }
        }
    }

    fn skip_line(&mut self) -> Result<()> {
        while let Some(b) = self.next_byte()? {
            if b == b'\n' {
                break;
            }
        }
        Ok(())
    }

    /// Finish parsing a field, returning its text.
    fn finish_field(&self, current_field: &mut Vec<u8>) -> Result<String> {
        let field_bytes = std::mem::take(current_field);
        let text = String::from_utf8(field_bytes)
            .map_err(|e| Error::Parse(format!("invalid UTF-8 in field: {}", e)))?;

        if self.trim_whitespace {
            Ok(text.trim().to_string())
        } else {
            Ok(text)
        }
    }
}

/// Determine the cell value type of a raw field.
pub fn infer_cell(field: &str) -> CellValue {
    if field.is_empty() || NA_TOKENS.contains(&field) {
        CellValue::Empty
    } else if let Ok(int_val) = field.parse::<i64>() {
        CellValue::Int(int_val)
    } else if let Ok(float_val) = fast_float2::parse::<f64, _>(field) {
        CellValue::Float(float_val)
    } else {
        match field.to_ascii_lowercase().as_str() {
            "true" => CellValue::Bool(true),
            "false" => CellValue::Bool(false),
            _ => CellValue::String(field.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(input: &str, config: &TextConfig) -> Vec<Vec<String>> {
        let mut parser = TextParser::new(input.as_bytes(), config).unwrap();
        let mut out = Vec::new();
        while let Some(fields) = parser.parse_fields().unwrap() {
            out.push(fields);
        }
        out
    }

    #[test]
    fn test_quoted_fields() {
        let parsed = rows("a,\"b,c\",\"say \"\"hi\"\"\"\n", &TextConfig::default());
        assert_eq!(parsed, vec![vec!["a", "b,c", "say \"hi\""]]);
    }

    #[test]
    fn test_crlf_comments_and_blank_lines() {
        let parsed = rows("# header comment\r\nx,y\r\n\r\n1,2\r\n", &TextConfig::default());
        assert_eq!(parsed, vec![vec!["x", "y"], vec!["1", "2"]]);
    }

    #[test]
    fn test_no_trailing_newline() {
        let parsed = rows("x,y\n1,", &TextConfig::default());
        assert_eq!(parsed, vec![vec!["x", "y"], vec!["1", ""]]);
    }

    #[test]
    fn test_small_buffer() {
        let config = TextConfig {
            buffer_size: 1,
            ..TextConfig::default()
        };
        let parsed = rows("\"a\"\"b\",c\n", &config);
        assert_eq!(parsed, vec![vec!["a\"b", "c"]]);
    }

    #[test]
    fn test_unterminated_quote() {
        let mut parser = TextParser::new("\"abc".as_bytes(), &TextConfig::default()).unwrap();
        assert!(matches!(parser.parse_fields(), Err(Error::Parse(_))));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let config = TextConfig::default().with_delimiter('§');
        assert!(TextParser::new("".as_bytes(), &config).is_err());
    }

    #[test]
    fn test_infer_cell() {
        assert_eq!(infer_cell(""), CellValue::Empty);
        assert_eq!(infer_cell("NaN"), CellValue::Empty);
        assert_eq!(infer_cell("42"), CellValue::Int(42));
        assert_eq!(infer_cell("4.25"), CellValue::Float(4.25));
        assert_eq!(infer_cell("TRUE"), CellValue::Bool(true));
        assert_eq!(infer_cell("2024-10"), CellValue::String("2024-10".to_string()));
    }
}
