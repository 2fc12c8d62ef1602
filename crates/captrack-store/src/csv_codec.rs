//! Minimal line-oriented CSV codec
//!
//! Records are separated by `\n` (a trailing `\r` is dropped). Fields may be
//! wrapped in double quotes; inside quotes a doubled `""` is a literal quote
//! and commas do not split. Quoted fields cannot span lines.

use thiserror::Error;

/// Failure to split a single record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    #[error("unterminated quoted field starting at column {column}")]
    UnterminatedQuote { column: usize },

    #[error("unexpected character '{found}' after closing quote at column {column}")]
    TrailingAfterQuote { column: usize, found: char },
}

/// Non-blank records of `text`, paired with their 1-based line number
pub fn records(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty())
}

/// Split one record into trimmed field values with quotes removed
pub fn parse_record(line: &str) -> Result<Vec<String>, CsvError> {
    let mut fields = Vec::new();
    let mut chars = line.char_indices().peekable();

    loop {
        while chars.next_if(|(_, c)| *c == ' ' || *c == '\t').is_some() {}

        let mut value = String::new();
        match chars.peek() {
            Some(&(open, '"')) => {
                chars.next();
                loop {
                    match chars.next() {
                        Some((_, '"')) => {
                            if chars.next_if(|(_, c)| *c == '"').is_some() {
                                value.push('"');
                            } else {
                                break;
                            }
                        }
                        Some((_, c)) => value.push(c),
                        None => return Err(CsvError::UnterminatedQuote { column: open + 1 }),
                    }
                }
                while chars.next_if(|(_, c)| *c == ' ' || *c == '\t').is_some() {}
                match chars.peek() {
                    None | Some((_, ',')) => {}
                    Some(&(pos, found)) => {
                        return Err(CsvError::TrailingAfterQuote {
                            column: pos + 1,
                            found,
                        })
                    }
                }
                fields.push(value);
            }
            _ => {
                while let Some((_, c)) = chars.next_if(|(_, c)| *c != ',') {
                    value.push(c);
                }
                fields.push(value.trim().to_string());
            }
        }

        if chars.next().is_none() {
            return Ok(fields);
        }
    }
}

/// Wrap a value in double quotes, doubling embedded quotes
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Quote a value only when it would otherwise break the record
pub fn escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quote(value)
    } else {
        value.to_string()
    }
}

/// Join values into one record with every field quoted
pub fn quoted_record<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| quote(v.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}
