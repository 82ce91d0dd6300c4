use super::model::FieldMap;
use super::{ANCHOR, ASSIGNMENT, DEFAULT_DELIMITER, QUOTE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Key,
    Value,
}

/// Splits a FortiGate log line into key=value fields.
///
/// Parsing starts at the first `date=` so that syslog headers in front of
/// the record are ignored. Unquoted values end at the delimiter or a newline;
/// quoted values end only at the closing quote, so the delimiter is kept
/// literally inside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    delimiter: char,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl Tokenizer {
    /// The delimiter must not be `=` or `"`; configuration validation rejects both.
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Returns `None` when the line carries no record anchor.
    pub fn tokenize(&self, line: &str) -> Option<FieldMap> {
        let start = line.find(ANCHOR)?;

        let mut fields = FieldMap::new();
        let mut state = State::Key;
        let mut quoted = false;
        let mut key = String::new();
        let mut buf = String::new();

        for c in line[start..].chars() {
            match state {
                State::Key => {
                    if c == ASSIGNMENT {
                        key = std::mem::take(&mut buf);
                        quoted = false;
                        state = State::Value;
                    } else if c != self.delimiter {
                        buf.push(c);
                    }
                }
                State::Value => {
                    if !quoted && c == QUOTE {
                        quoted = true;
                    } else if (quoted && c == QUOTE)
                        || (!quoted && (c == self.delimiter || c == '\n'))
                    {
                        quoted = false;
                        fields.insert(std::mem::take(&mut key), std::mem::take(&mut buf));
                        state = State::Key;
                    } else {
                        buf.push(c);
                    }
                }
            }
        }

        // Trailing value without a terminating delimiter. A dangling key
        // (Key state) is dropped.
        if state == State::Value && !buf.is_empty() {
            fields.insert(key, buf);
        }

        Some(fields)
    }
}
