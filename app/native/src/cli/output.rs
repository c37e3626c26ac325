//! CLI output formatting.
//!
//! Tables are built with `tabled` by each command; this module holds the
//! shared pieces: colored JSON, pixel formatting and text truncation.

use colored::Colorize;
use tabled::Table;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

/// Prints a serializable value as colored, pretty-printed JSON.
pub fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_value(value) {
        Ok(value) => println!("{}", highlight_json(&value)),
        Err(err) => tracing::warn!(error = %err, "masonry: cannot serialize output"),
    }
}

/// Renders JSON with keys in cyan, strings in green, numbers in yellow and
/// literals in magenta.
#[must_use]
pub fn highlight_json(value: &serde_json::Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    let mut out = String::with_capacity(pretty.len() * 2);
    let mut chars = pretty.chars().peekable();
    let mut expecting_value = false;

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                let mut literal = String::from('"');
                let mut escaped = false;
                for next in chars.by_ref() {
                    literal.push(next);
                    if escaped {
                        escaped = false;
                    } else if next == '\\' {
                        escaped = true;
                    } else if next == '"' {
                        break;
                    }
                }
                let colored = if expecting_value { literal.green() } else { literal.cyan() };
                out.push_str(&colored.to_string());
                expecting_value = false;
            }
            ':' => {
                out.push(':');
                expecting_value = true;
            }
            ',' => {
                out.push(',');
                expecting_value = false;
            }
            '{' | '}' | '[' | ']' => {
                out.push_str(&ch.to_string().bold().to_string());
                // array elements are values too
                expecting_value = ch == '[';
            }
            c if c.is_whitespace() => out.push(c),
            _ => {
                let mut scalar = String::from(ch);
                while let Some(&next) = chars.peek() {
                    if next == ',' || next.is_whitespace() || matches!(next, '}' | ']') {
                        break;
                    }
                    scalar.push(next);
                    chars.next();
                }
                let colored = match scalar.as_str() {
                    "true" | "false" | "null" => scalar.magenta(),
                    _ => scalar.yellow(),
                };
                out.push_str(&colored.to_string());
                expecting_value = false;
            }
        }
    }

    out
}

/// Prints a bold heading followed by a rounded table whose first column is
/// right-aligned.
pub fn print_table(title: &str, count: usize, table: &mut Table) {
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()));
    println!("{}", format!("{title} ({count})").bold());
    println!("{table}");
}

/// Formats a pixel value with at most one decimal.
#[must_use]
pub fn format_px(value: f64) -> String {
    if (value - value.round()).abs() < 0.05 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Formats an optional sampled value, `-` when absent.
#[must_use]
pub fn format_sample(value: Option<f64>) -> String {
    value.map_or_else(|| "-".dimmed().to_string(), |v| format!("{v:.2}"))
}

/// Truncates to `max_chars` characters, ending with an ellipsis when cut.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 1 {
        return "…".to_string();
    }
    let cut = s.char_indices().nth(max_chars - 1).map_or(s.len(), |(idx, _)| idx);
    format!("{}…", &s[..cut])
}

/// Formats a boolean as a colored check mark.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value { "✓".green().to_string() } else { "✗".red().to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_keeps_tokens() {
        let value = serde_json::json!({ "id": "a", "x": 12.5, "url": null, "tags": ["x", true] });
        let out = highlight_json(&value);
        for token in ["\"id\"", "\"a\"", "12.5", "null", "\"tags\"", "true"] {
            assert!(out.contains(token), "missing {token}");
        }
    }

    #[test]
    fn test_highlight_handles_escaped_quotes() {
        let value = serde_json::json!({ "title": "say \"hi\"" });
        assert!(highlight_json(&value).contains(r#""say \"hi\"""#));
    }

    #[test]
    fn test_format_px() {
        assert_eq!(format_px(300.0), "300");
        assert_eq!(format_px(266.666), "266.7");
        assert_eq!(format_px(0.0), "0");
    }

    #[test]
    fn test_format_sample_two_decimals() {
        assert_eq!(format_sample(Some(0.5)), "0.50");
        assert!(format_sample(None).contains('-'));
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("Building a grid", 8), "Buildin…");
        assert_eq!(truncate("hello", 1), "…");
    }

    #[test]
    fn test_truncate_multibyte_utf8() {
        assert_eq!(truncate("café au lait", 5), "café…");
    }

    #[test]
    fn test_format_bool() {
        assert!(format_bool(true).contains('✓'));
        assert!(format_bool(false).contains('✗'));
    }
}
