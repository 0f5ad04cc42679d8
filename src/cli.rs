use clap::error::ErrorKind;

#[derive(clap::Parser, Debug, Default, Clone)]
#[command(version, about = "Context-window statusline for Claude Code")]
pub struct Args {
    /// Emit the snapshot as JSON instead of the styled line
    #[arg(long)]
    pub json: bool,

    /// Plain text without ANSI styling (NO_COLOR is honored too)
    #[arg(long)]
    pub no_color: bool,

    /// Debug mode: log extracted fields and parse failures to stderr.
    /// CLAUDE_DEBUG accepts any value except false/no/off/0/n/f.
    #[arg(
        long,
        env = "CLAUDE_DEBUG",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub debug: bool,
}

impl Args {
    /// Parse argv. Anything except `--help`/`--version` that clap rejects is
    /// reported on stderr and replaced by defaults, since the statusline must
    /// always exit 0.
    pub fn parse() -> Self {
        Self::parse_from_or_default(std::env::args_os())
    }

    pub fn parse_from_or_default<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match <Args as clap::Parser>::try_parse_from(argv) {
            Ok(args) => args,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => {
                eprintln!("claude_ctx_statusline: ignoring arguments: {}", e.kind());
                Args::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let args = Args::parse_from_or_default(["claude_ctx_statusline"]);
        assert!(!args.json);
        assert!(!args.no_color);
    }

    #[test]
    fn test_flags() {
        let args =
            Args::parse_from_or_default(["claude_ctx_statusline", "--json", "--no-color"]);
        assert!(args.json);
        assert!(args.no_color);
    }

    #[test]
    fn test_debug_flag_keeps_other_flags() {
        let args = Args::parse_from_or_default(["claude_ctx_statusline", "--debug", "--json"]);
        assert!(args.debug);
        assert!(args.json);
    }

    #[test]
    fn test_unknown_flag_falls_back() {
        let args = Args::parse_from_or_default(["claude_ctx_statusline", "--bogus", "--json"]);
        assert!(!args.json);
        assert!(!args.no_color);
    }
}
