use std::io::Write;

#[cfg(feature = "colors")]
use owo_colors::{OwoColorize, Style};

use crate::models::StatusSnapshot;
use crate::utils::{format_cost, format_tokens, format_window};

pub const FOLDER_GLYPH: &str = "\u{f07b}";
pub const BAR_WIDTH: u8 = 15;
pub const BAR_FILLED: char = '█';
pub const BAR_EMPTY: char = '░';
pub const NO_DATA: &str = "? no data";

/// Context pressure tier driving the bar and percentage colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Green,
    Yellow,
    Red,
}

impl Severity {
    pub fn for_percent(pct: u8) -> Self {
        if pct < 50 {
            Severity::Green
        } else if pct < 80 {
            Severity::Yellow
        } else {
            Severity::Red
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Green => "green",
            Severity::Yellow => "yellow",
            Severity::Red => "red",
        }
    }

    #[cfg(feature = "colors")]
    fn style(self) -> Style {
        let base = Style::new().bold();
        match self {
            Severity::Green => base.green(),
            Severity::Yellow => base.yellow(),
            Severity::Red => base.red(),
        }
    }
}

/// Applies ANSI styling, or passes text through untouched when colors are off
/// (`--no-color`, `NO_COLOR`, or a build without the `colors` feature).
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: enabled && cfg!(feature = "colors"),
        }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Bold text in the tier color.
    #[cfg_attr(not(feature = "colors"), allow(unused_variables))]
    pub fn accent(&self, text: &str, severity: Severity) -> String {
        #[cfg(feature = "colors")]
        {
            if self.enabled {
                return text.style(severity.style()).to_string();
            }
        }
        text.to_string()
    }

    pub fn dim(&self, text: &str) -> String {
        #[cfg(feature = "colors")]
        {
            if self.enabled {
                return text.dimmed().to_string();
            }
        }
        text.to_string()
    }
}

/// Color is on unless the flag or a `NO_COLOR` variable (any value) says otherwise.
pub fn color_enabled(no_color_flag: bool, no_color_env: Option<&std::ffi::OsStr>) -> bool {
    !no_color_flag && no_color_env.is_none()
}

/// Filled segments for `pct`, always within `0..=BAR_WIDTH`.
pub fn bar_fill(pct: u8) -> u8 {
    let filled = u32::from(pct) * u32::from(BAR_WIDTH) / 100;
    filled.min(u32::from(BAR_WIDTH)) as u8
}

pub fn render_bar(pct: u8, painter: &Painter) -> String {
    let filled = usize::from(bar_fill(pct));
    let empty = usize::from(BAR_WIDTH) - filled;
    let mut bar = String::new();
    if filled > 0 {
        let segs: String = std::iter::repeat_n(BAR_FILLED, filled).collect();
        bar.push_str(&painter.accent(&segs, Severity::for_percent(pct)));
    }
    if empty > 0 {
        let segs: String = std::iter::repeat_n(BAR_EMPTY, empty).collect();
        bar.push_str(&painter.dim(&segs));
    }
    bar
}

pub fn render_line(snap: &StatusSnapshot, painter: &Painter) -> String {
    let pct = snap.used_percentage;
    let severity = Severity::for_percent(pct);
    let sep = format!("  {}  ", painter.dim("|"));

    let context_seg = format!(
        "{}  {} {} {}  {}",
        render_bar(pct, painter),
        painter.accent(&format_tokens(snap.used_tokens()), severity),
        painter.dim("/"),
        format_window(snap.context_window_size),
        painter.accent(&format!("({pct}%)"), severity),
    );

    [
        format!("{FOLDER_GLYPH}  {}", snap.folder()),
        snap.model_display_name.clone(),
        context_seg,
        format_cost(snap.total_cost_usd),
    ]
    .join(sep.as_str())
}

pub fn build_json_output(snap: &StatusSnapshot) -> serde_json::Value {
    let severity = Severity::for_percent(snap.used_percentage);
    serde_json::json!({
        "folder": snap.folder(),
        "cwd": snap.current_dir,
        "model": { "display_name": snap.model_display_name },
        "context": {
            "used_percentage": snap.used_percentage,
            "used_tokens": snap.used_tokens(),
            "input_tokens": snap.input_tokens,
            "cache_read_input_tokens": snap.cache_read_tokens,
            "cache_creation_input_tokens": snap.cache_creation_tokens,
            "window_size": snap.context_window_size,
            "severity": severity.as_str(),
            "bar_filled": bar_fill(snap.used_percentage),
        },
        "cost": { "total_cost_usd": snap.total_cost_usd },
    })
}

pub fn no_data_json() -> serde_json::Value {
    serde_json::json!({ "error": "no data" })
}

/// Writes one line to stdout. A closed pipe is not an error for a statusline.
pub fn print_line(line: &str) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    match writeln!(out, "{line}").and_then(|_| out.flush()) {
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => Ok(other?),
    }
}

pub fn print_text_output(snap: &StatusSnapshot, painter: &Painter) -> anyhow::Result<()> {
    print_line(&render_line(snap, painter))
}

pub fn print_json_output(snap: &StatusSnapshot) -> anyhow::Result<()> {
    print_line(&serde_json::to_string(&build_json_output(snap))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pct: u8) -> StatusSnapshot {
        StatusSnapshot {
            used_percentage: pct,
            ..StatusSnapshot::default()
        }
    }

    #[test]
    fn test_severity_boundaries() {
        assert_eq!(Severity::for_percent(0), Severity::Green);
        assert_eq!(Severity::for_percent(49), Severity::Green);
        assert_eq!(Severity::for_percent(50), Severity::Yellow);
        assert_eq!(Severity::for_percent(79), Severity::Yellow);
        assert_eq!(Severity::for_percent(80), Severity::Red);
        assert_eq!(Severity::for_percent(100), Severity::Red);
    }

    #[test]
    fn test_bar_fill_points() {
        assert_eq!(bar_fill(0), 0);
        assert_eq!(bar_fill(6), 0);
        assert_eq!(bar_fill(7), 1);
        assert_eq!(bar_fill(50), 7);
        assert_eq!(bar_fill(99), 14);
        assert_eq!(bar_fill(100), 15);
        assert_eq!(bar_fill(u8::MAX), 15);
    }

    #[test]
    fn test_bar_fill_monotonic() {
        let mut prev = 0;
        for p in 0..=100u8 {
            let f = bar_fill(p);
            assert!(f >= prev, "fill dropped at {p}%");
            assert!(f <= BAR_WIDTH);
            prev = f;
        }
    }

    #[test]
    fn test_render_bar_plain() {
        let painter = Painter::plain();
        assert_eq!(render_bar(0, &painter), "░".repeat(15));
        assert_eq!(render_bar(50, &painter), format!("{}{}", "█".repeat(7), "░".repeat(8)));
        assert_eq!(render_bar(100, &painter), "█".repeat(15));
    }

    #[test]
    fn test_render_line_defaults_plain() {
        let line = render_line(&StatusSnapshot::default(), &Painter::plain());
        let expected = format!(
            "\u{f07b}  {}  |  ?  |  {}  0 / 200k  (0%)  |  $0.0000",
            "",
            "░".repeat(15)
        );
        assert_eq!(line, expected);
    }

    #[test]
    fn test_render_line_plain_full() {
        let snap = StatusSnapshot {
            used_percentage: 64,
            context_window_size: 1_000_000,
            input_tokens: 345,
            cache_read_tokens: 12_000,
            cache_creation_tokens: 0,
            model_display_name: "Sonnet 4.5".to_string(),
            current_dir: "/home/user/project".to_string(),
            total_cost_usd: 1.23456,
        };
        let line = render_line(&snap, &Painter::plain());
        assert_eq!(
            line,
            format!(
                "\u{f07b}  project  |  Sonnet 4.5  |  {}{}  12.3k / 1M  (64%)  |  $1.2346",
                "█".repeat(9),
                "░".repeat(6)
            )
        );
        assert!(!line.contains('\n'));
    }

    #[cfg(feature = "colors")]
    #[test]
    fn test_painter_styles_when_enabled() {
        let painter = Painter::new(true);
        assert!(painter.is_enabled());
        let line = render_line(&snapshot(85), &painter);
        assert!(line.contains('\u{1b}'));
        // red for the accent segments
        assert!(line.contains("31"));
        let accent = painter.accent("x", Severity::Green);
        assert!(accent.starts_with('\u{1b}'));
        assert!(accent.contains('x'));
        assert_ne!(painter.dim("|"), "|");
    }

    #[test]
    fn test_painter_disabled_is_plain() {
        let painter = Painter::new(false);
        assert!(!painter.is_enabled());
        assert_eq!(painter.accent("12.3k", Severity::Red), "12.3k");
        assert_eq!(painter.dim("|"), "|");
        assert!(!render_line(&snapshot(85), &painter).contains('\u{1b}'));
    }

    #[test]
    fn test_color_enabled() {
        assert!(color_enabled(false, None));
        assert!(!color_enabled(true, None));
        assert!(!color_enabled(false, Some(std::ffi::OsStr::new(""))));
        assert!(!color_enabled(false, Some(std::ffi::OsStr::new("1"))));
    }

    #[test]
    fn test_json_output_shape() {
        let json = build_json_output(&snapshot(80));
        assert_eq!(json["context"]["used_percentage"], 80);
        assert_eq!(json["context"]["severity"], "red");
        assert_eq!(json["context"]["bar_filled"], 12);
        assert_eq!(json["context"]["window_size"], 200_000);
        assert_eq!(json["model"]["display_name"], "?");
        assert_eq!(json["folder"], "");
        assert!(json["cost"]["total_cost_usd"].is_number());
    }
}
