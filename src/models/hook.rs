use serde::Serialize;
use serde_json::Value;

use crate::utils::{
    DEFAULT_CONTEXT_WINDOW, folder_name, get_f64, get_i64_lenient, get_string, get_u64, section,
};

/// The one failure the statusline recognizes: stdin could not be turned into
/// a JSON document. Every variant is handled the same way (fallback line,
/// exit 0); the variant only records why for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum UnparseableInput {
    #[error("stdin was empty")]
    Empty,
    #[error("failed to read stdin: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid hook json: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_hook(bytes: &[u8]) -> Result<Value, UnparseableInput> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(UnparseableInput::Empty);
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// Everything the statusline shows, pulled out of one hook payload.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub used_percentage: u8,
    pub context_window_size: u64,
    pub input_tokens: u64,
    pub cache_read_tokens: u64,
    pub cache_creation_tokens: u64,
    pub model_display_name: String,
    pub current_dir: String,
    pub total_cost_usd: f64,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            used_percentage: 0,
            context_window_size: DEFAULT_CONTEXT_WINDOW,
            input_tokens: 0,
            cache_read_tokens: 0,
            cache_creation_tokens: 0,
            model_display_name: "?".to_string(),
            current_dir: String::new(),
            total_cost_usd: 0.0,
        }
    }
}

impl StatusSnapshot {
    /// Never fails: absent, null or mistyped fields fall back to defaults.
    /// A non-object document behaves like `{}`.
    pub fn from_value(doc: &Value) -> Self {
        let root = doc.as_object();
        let ctx = section(root, "context_window");
        let usage = section(ctx, "current_usage");

        let used_percentage = get_i64_lenient(ctx, "used_percentage")
            .unwrap_or(0)
            .clamp(0, 100) as u8;
        let context_window_size = get_u64(ctx, "context_window_size")
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_CONTEXT_WINDOW);

        // workspace.current_dir wins; top-level cwd only when it is absent
        let current_dir = get_string(section(root, "workspace"), "current_dir")
            .or_else(|| get_string(root, "cwd"))
            .unwrap_or_default()
            .to_string();

        Self {
            used_percentage,
            context_window_size,
            input_tokens: get_u64(usage, "input_tokens").unwrap_or(0),
            cache_read_tokens: get_u64(usage, "cache_read_input_tokens").unwrap_or(0),
            cache_creation_tokens: get_u64(usage, "cache_creation_input_tokens").unwrap_or(0),
            model_display_name: get_string(section(root, "model"), "display_name")
                .unwrap_or("?")
                .to_string(),
            current_dir,
            total_cost_usd: get_f64(section(root, "cost"), "total_cost_usd").unwrap_or(0.0),
        }
    }

    /// Tokens occupying the context window. Output tokens are not part of it.
    pub fn used_tokens(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.cache_read_tokens)
            .saturating_add(self.cache_creation_tokens)
    }

    pub fn folder(&self) -> String {
        folder_name(&self.current_dir)
    }
}
