use serde_json::{Map, Value};
use std::io::Read;
use tracing_subscriber::EnvFilter;

/// Context window assumed when the hook omits `context_window_size` or reports 0.
pub const DEFAULT_CONTEXT_WINDOW: u64 = 200_000;

/// Env var holding an `EnvFilter` directive for stderr diagnostics.
pub const LOG_ENV: &str = "CLAUDE_STATUSLINE_LOG";

pub fn read_stdin() -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

/// Install the stderr subscriber. Stdout belongs to the statusline, so nothing
/// is ever logged there; with no filter configured logging stays off.
pub fn setup_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"))
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Nested object lookup. Missing, null and non-object values all come back as
/// `None` so callers can keep chaining.
pub fn section<'a>(
    obj: Option<&'a Map<String, Value>>,
    key: &str,
) -> Option<&'a Map<String, Value>> {
    obj?.get(key)?.as_object()
}

pub fn get_string<'a>(obj: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a str> {
    obj?.get(key)?.as_str()
}

/// Non-negative integer leaf. Fractions truncate, negatives saturate to 0.
pub fn get_u64(obj: Option<&Map<String, Value>>, key: &str) -> Option<u64> {
    let v = obj?.get(key)?;
    v.as_u64().or_else(|| v.as_f64().map(|f| f as u64))
}

pub fn get_f64(obj: Option<&Map<String, Value>>, key: &str) -> Option<f64> {
    obj?.get(key)?.as_f64()
}

/// Integer coercion for percentages: numbers truncate toward zero and numeric
/// strings are accepted ("42", " 87.9 ").
pub fn get_i64_lenient(obj: Option<&Map<String, Value>>, key: &str) -> Option<i64> {
    match obj?.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.trunc() as i64),
        _ => None,
    }
}

/// Last path segment, treating `\` as a separator too. A trailing separator
/// yields an empty name.
pub fn folder_name(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    normalized.rsplit('/').next().unwrap_or_default().to_string()
}

/// Token count for the numerator: one decimal of thousands at 1000 and up.
pub fn format_tokens(n: u64) -> String {
    if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1e3)
    } else {
        n.to_string()
    }
}

/// Window size for the denominator. Truncates instead of rounding, since
/// windows are round numbers (200k, 1M).
pub fn format_window(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{}M", n / 1_000_000)
    } else {
        format!("{}k", n / 1_000)
    }
}

pub fn format_cost(v: f64) -> String {
    format!("${v:.4}")
}
