//! Log sanitization for patient values.
//!
//! Formatted log lines pass through [`sanitize`] before reaching the sink.
//! It redacts:
//! - Clinical key/value pairs (`age=67`, `bmi: 36.6`, `probability=93.52%`)
//! - Identifiers (UUIDs, email addresses)
//!
//! Keys are kept so a redacted line still says which field was present.
//!
//! Input is capped at `STROKESENSE_SANITIZE_MAX_BYTES` (16 KiB by default)
//! per call; anything beyond is dropped and marked `[TRUNCATED]`.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PATTERNS: OnceLock<SanitizePatterns> = OnceLock::new();

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct SanitizePattern {
    regex: Regex,
    replacement: &'static str,
}

struct SanitizePatterns {
    set: RegexSet,
    patterns: Vec<SanitizePattern>,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes.min(input.len());
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_sanitize_bytes() -> usize {
    std::env::var("STROKESENSE_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn get_patterns() -> &'static SanitizePatterns {
    PATTERNS.get_or_init(|| {
        let rules: Vec<(&'static str, &'static str)> = vec![
            // Clinical values keyed by field name (snake_case, camelCase or prose)
            (
                r"(?i)\b(?P<key>age|bmi|avg_glucose_level|avgGlucoseLevel|glucose|probability|score)\b(?P<sep>\s*[:=]\s*)-?\d+(?:\.\d+)?%?",
                "${key}${sep}[REDACTED]",
            ),
            // UUIDs
            (
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
                "[REDACTED-UUID]",
            ),
            // Email addresses
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
        ];

        let set = RegexSet::new(rules.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let patterns = rules
            .into_iter()
            .map(|(pattern, replacement)| SanitizePattern {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        SanitizePatterns { set, patterns }
    })
}

/// Redact patient values and identifiers from a string.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = get_patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in patterns.set.matches(prefix).into_iter() {
        let pattern = &patterns.patterns[idx];
        result = pattern
            .regex
            .replace_all(&result, pattern.replacement)
            .into_owned();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// A `tracing_subscriber` writer wrapper that sanitizes each formatted line
/// before it is written to the underlying sink.
#[derive(Debug)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M> Clone for SanitizingMakeWriter<M>
where
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }
}

impl<W> SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line = self.buffer.drain(..=pos).collect::<Vec<u8>>();
            let sanitized = sanitize(&String::from_utf8_lossy(&line));
            self.inner.write_all(sanitized.as_bytes())?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A formatter that never emits a newline must not grow the buffer forever.
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if self.buffer.len() > hard_cap {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.inner.write_all(b"\n")?;
            self.buffer.clear();
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;

        if !self.buffer.is_empty() {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.buffer.clear();
        }

        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sanitize_clinical_values_keeps_keys() {
        let sanitized = sanitize("scored age=67 bmi: 36.6 avgGlucoseLevel=228.69");
        assert_eq!(
            sanitized,
            "scored age=[REDACTED] bmi: [REDACTED] avgGlucoseLevel=[REDACTED]"
        );
    }

    #[test]
    fn test_sanitize_probability_percentage() {
        let sanitized =
            sanitize("Assessment complete: model=Naive Bayes, risk=Low, probability=42.93%");
        assert!(sanitized.ends_with("probability=[REDACTED]"));
        assert!(sanitized.contains("model=Naive Bayes"));
    }

    #[test]
    fn test_sanitize_uuid_and_email() {
        let sanitized = sanitize("id 550e8400-e29b-41d4-a716-446655440000 from doc@clinic.org");
        assert!(sanitized.contains("[REDACTED-UUID]"));
        assert!(sanitized.contains("[REDACTED-EMAIL]"));
        assert!(!sanitized.contains("550e8400"));
    }

    #[test]
    fn test_plain_text_untouched() {
        let input = "Starting StrokeSense...";
        assert_eq!(sanitize(input), input);
        assert_eq!(sanitize("Model selected: Decision Tree"), "Model selected: Decision Tree");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let sanitized = sanitize_with_limit("ééééé", 3);
        assert_eq!(sanitized, "é [TRUNCATED]");
    }

    #[test]
    fn test_writer_sanitizes_whole_lines() {
        let mut sink = Vec::new();
        {
            let mut writer = SanitizingWriter::new(&mut sink);
            writer.write_all(b"patient ag").expect("write");
            writer.write_all(b"e=81 scored\n").expect("write");
            writer.flush().expect("flush");
        }
        assert_eq!(String::from_utf8(sink).expect("utf8"), "patient age=[REDACTED] scored\n");
    }
}
