//! Partial JSON parsing for streamed tool-call arguments
//!
//! Argument text observed mid-stream is usually cut off somewhere: inside a
//! string, after a comma, with objects and arrays still open.
//! [`parse_partial_json`] tries a strict parse first and, only when that
//! fails, closes what is open and trims dangling characters until the text
//! parses. When the `json-repair` feature is enabled, the `jsonrepair` crate
//! gets a last attempt after the built-in recovery.
//!
//! Once the stream has ended, [`parse_complete_json`] applies the same scan
//! but accepts only text that needed no closing or trimming.

use serde_json::Value;

/// Strict JSON parse with no recovery.
#[inline]
pub fn parse_strict(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

/// Parse possibly-truncated JSON text.
///
/// Returns the strict parser's error for the original text when no repair
/// produces valid JSON.
///
/// ```rust,ignore
/// use siumai_delta::parse_partial_json;
///
/// let value = parse_partial_json(r#"{"city": "Par"#)?;
/// assert_eq!(value["city"], "Par");
/// ```
pub fn parse_partial_json(text: &str) -> Result<Value, serde_json::Error> {
    let original_err = match parse_strict(text) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    if let Some(value) = recover(text) {
        tracing::debug!("Partial JSON recovered:\nOriginal: {}\nRecovered: {}", text, value);
        return Ok(value);
    }

    #[cfg(feature = "json-repair")]
    if let Some(value) = repair_with_jsonrepair(text) {
        return Ok(value);
    }

    Err(original_err)
}

/// Parse argument text from a stream that has ended.
///
/// Raw control characters inside strings are escaped, but nothing is closed
/// or trimmed: text that is still missing a closing quote or bracket is
/// truncated and fails with the strict parser's error.
pub fn parse_complete_json(text: &str) -> Result<Value, serde_json::Error> {
    let original_err = match parse_strict(text) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    if let Some(scan) = scan(text).filter(Scan::is_closed) {
        if let Ok(value) = serde_json::from_str(&scan.text) {
            tracing::debug!("Control characters escaped in JSON text: {}", text);
            return Ok(value);
        }
    }
    Err(original_err)
}

/// Text with control characters escaped, plus what is still open at its end.
struct Scan {
    text: String,
    closers: Vec<char>,
    in_string: bool,
    escaped: bool,
}

impl Scan {
    fn is_closed(&self) -> bool {
        !self.in_string && self.closers.is_empty()
    }
}

/// Walk `text` tracking open strings and structures. `None` when a closing
/// bracket does not match the innermost open structure.
fn scan(text: &str) -> Option<Scan> {
    let mut out = String::with_capacity(text.len() + 8);
    let mut closers: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for ch in text.chars() {
        if in_string {
            match ch {
                '"' if !escaped => in_string = false,
                '\n' | '\r' | '\t' if !escaped => {
                    // raw control characters are not allowed inside JSON strings
                    out.push_str(match ch {
                        '\n' => "\\n",
                        '\r' => "\\r",
                        _ => "\\t",
                    });
                    continue;
                }
                '\\' => escaped = !escaped,
                _ => escaped = false,
            }
        } else {
            match ch {
                '"' => {
                    in_string = true;
                    escaped = false;
                }
                '{' => closers.push('}'),
                '[' => closers.push(']'),
                '}' | ']' => {
                    if closers.last() == Some(&ch) {
                        closers.pop();
                    } else {
                        // mismatched closer: not a truncation, the text is malformed
                        return None;
                    }
                }
                _ => {}
            }
        }
        out.push(ch);
    }

    Some(Scan {
        text: out,
        closers,
        in_string,
        escaped,
    })
}

/// Close open strings and structures, then drop trailing characters one at a
/// time until the candidate parses.
fn recover(text: &str) -> Option<Value> {
    let Scan {
        text: mut candidate,
        closers,
        in_string,
        escaped,
    } = scan(text)?;

    if in_string {
        if escaped {
            candidate.pop();
        }
        candidate.push('"');
    }

    let closing: String = closers.iter().rev().collect();
    while !candidate.is_empty() {
        let base = candidate.len();
        candidate.push_str(&closing);
        if let Ok(value) = serde_json::from_str(&candidate) {
            return Some(value);
        }
        candidate.truncate(base);
        candidate.pop();
    }
    None
}

#[cfg(feature = "json-repair")]
fn repair_with_jsonrepair(text: &str) -> Option<Value> {
    use jsonrepair::{Options, repair_json};

    match repair_json(text, &Options::default()) {
        Ok(repaired) => match serde_json::from_str(&repaired) {
            Ok(value) => {
                tracing::debug!(
                    "JSON repaired successfully:\nOriginal: {}\nRepaired: {}",
                    text,
                    repaired
                );
                Some(value)
            }
            Err(_) => {
                tracing::warn!(
                    "JSON repair succeeded but parsing failed:\nOriginal: {}\nRepaired: {}",
                    text,
                    repaired
                );
                None
            }
        },
        Err(repair_err) => {
            tracing::debug!("JSON repair failed: {}", repair_err);
            None
        }
    }
}
