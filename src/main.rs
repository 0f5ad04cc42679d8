use anyhow::Result;

use claude_ctx_statusline::cli::Args;
use claude_ctx_statusline::display::{
    NO_DATA, Painter, color_enabled, no_data_json, print_json_output, print_line,
    print_text_output,
};
use claude_ctx_statusline::models::{StatusSnapshot, UnparseableInput, parse_hook};
use claude_ctx_statusline::utils::{read_stdin, setup_tracing};

fn main() {
    // The host UI treats any non-zero exit as a broken statusline.
    if let Err(err) = run() {
        eprintln!("claude_ctx_statusline: {err:#}");
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    setup_tracing(args.debug);

    let doc = match read_stdin()
        .map_err(UnparseableInput::from)
        .and_then(|bytes| parse_hook(&bytes))
    {
        Ok(doc) => doc,
        Err(err) => {
            tracing::debug!(error = %err, "falling back to no-data line");
            return if args.json {
                print_line(&no_data_json().to_string())
            } else {
                print_line(NO_DATA)
            };
        }
    };

    let snapshot = StatusSnapshot::from_value(&doc);
    tracing::debug!(
        used_percentage = snapshot.used_percentage,
        used_tokens = snapshot.used_tokens(),
        window = snapshot.context_window_size,
        model = %snapshot.model_display_name,
        cwd = %snapshot.current_dir,
        cost = snapshot.total_cost_usd,
        "extracted status snapshot"
    );

    if args.json {
        print_json_output(&snapshot)
    } else {
        let no_color_env = std::env::var_os("NO_COLOR");
        let painter = Painter::new(color_enabled(args.no_color, no_color_env.as_deref()));
        print_text_output(&snapshot, &painter)
    }
}
