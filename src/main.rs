use anyhow::{Context, Result};
use chainlog::cli::{Cli, OutputFormat};
use chainlog::text_output::TextOutput;
use chainlog::{ParsedLogs, TraceParser};
use clap::Parser;
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Feed every input file (or stdin) into a parser
fn load_input(args: &Cli) -> Result<TraceParser> {
    let mut parser = TraceParser::new();

    if let Some(after) = &args.after {
        parser = parser
            .after_timestamp(after)
            .context("Invalid value for --after")?;
    }

    if args.files.is_empty() {
        tracing::debug!("reading log lines from stdin");
        return Ok(parser.add_reader(std::io::stdin().lock()));
    }

    for path in &args.files {
        tracing::debug!("reading log lines from {}", path.display());
        parser = parser.add_file(path)?;
    }
    Ok(parser)
}

fn render(args: &Cli, parsed: &ParsedLogs) -> Result<String> {
    match args.format {
        OutputFormat::Text => Ok(TextOutput::new(args.show_args).render(parsed)),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(parsed).context("Failed to encode output")?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let parser = load_input(&args)?;
    let mut parsed = parser.parse();
    tracing::debug!(
        lines = parser.line_count(),
        entries = parsed.entries.len(),
        traces = parsed.traces.len(),
        "parsed log input"
    );

    if args.traces_only {
        parsed.entries.clear();
    }

    let output = render(&args, &parsed)?;
    std::io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .context("Failed to write output")?;

    Ok(())
}
