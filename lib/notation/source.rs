use std::{fs, io, path::Path};
use tracing::instrument;

/// Tokens that announce the result of a game rather than a move.
const RESULTS: [&str; 3] = ["1-0", "0-1", "1/2-1/2"];

/// Extracts the move tokens from the text of a game record.
///
/// Header lines starting with `[`, `{...}` comments, move numbers and results are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let body: Vec<_> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('['))
        .collect();

    strip_comments(&body.join(" "))
        .split_whitespace()
        .map(strip_move_number)
        .filter(|t| !t.is_empty() && !RESULTS.contains(t))
        .map(String::from)
        .collect()
}

/// Reads and [tokenizes][`tokenize`] a game record.
#[instrument(level = "debug", err)]
pub fn read(path: &Path) -> io::Result<Vec<String>> {
    Ok(tokenize(&fs::read_to_string(path)?))
}

/// Removes every `{...}` comment, an unterminated brace is kept as is.
fn strip_comments(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        match rest[open..].find('}') {
            None => break,
            Some(close) => {
                stripped.push_str(&rest[..open]);
                stripped.push(' ');
                rest = &rest[open + close + 1..];
            }
        }
    }

    stripped.push_str(rest);
    stripped
}

/// Removes a leading move number such as `12.` or `12...`.
fn strip_move_number(token: &str) -> &str {
    let rest = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() < token.len() && rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}
