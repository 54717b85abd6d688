use std::fs;
use std::path::PathBuf;

use bar_chart_rs::ChartState;
use bar_chart_rs::api::build_export_frame;
use bar_chart_rs::core::Orientation;
use bar_chart_rs::import::{DecimalSeparator, Delimiter, ImportSession};
use bar_chart_rs::render::{Renderer, SvgRenderer};
use bar_chart_rs::telemetry;
use clap::Parser;

/// Renders a delimited text file as an SVG bar chart.
#[derive(Parser, Debug)]
#[command(version, about = "bar-chart-render")]
struct Args {
    /// Delimited text file (CSV, TSV, ...)
    path: PathBuf,

    /// Field delimiter: comma, semicolon, tab, pipe, space or any literal string.
    /// Sniffed from the first line when omitted.
    #[arg(long = "delimiter")]
    delimiter: Option<Delimiter>,

    /// The first row is data, not a header
    #[arg(long = "no-header", action)]
    no_header: bool,

    /// Numbers use `,` as decimal mark and `.` for thousands
    #[arg(long = "decimal-comma", action)]
    decimal_comma: bool,

    /// Draw horizontal bars
    #[arg(long = "horizontal", action)]
    horizontal: bool,

    /// Chart title
    #[arg(long = "title")]
    title: Option<String>,

    /// Persisted chart state (JSON) providing the style
    #[arg(long = "state")]
    state: Option<PathBuf>,

    /// Output size multiplier
    #[arg(long = "scale")]
    scale: Option<f64>,

    /// Omit the background rectangle
    #[arg(long = "transparent", action)]
    transparent: bool,

    /// Output file; stdout when omitted
    #[arg(long = "out")]
    out: Option<PathBuf>,

    /// Log layout and import decisions to stderr (needs the `telemetry` feature)
    #[arg(short = 'v', long = "verbose", action)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let _ = if args.verbose {
        telemetry::init_tracing(telemetry::VERBOSE_FILTER)
    } else {
        telemetry::init_default_tracing()
    };
    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    let text = fs::read_to_string(&args.path)
        .map_err(|err| format!("failed to read `{}`: {err}", args.path.display()))?;

    let mut session = match &args.delimiter {
        Some(delimiter) => ImportSession::new(text, delimiter.clone()),
        None => ImportSession::sniffed(text),
    };
    session.set_has_header(!args.no_header);
    if args.decimal_comma {
        session.set_decimal_separator(DecimalSeparator::Comma);
    }
    let outcome = session.import().map_err(|err| err.to_string())?;
    if outcome.ignored_rows > 0 {
        eprintln!(
            "note: {} rows past the import limit were ignored",
            outcome.ignored_rows
        );
    }

    let mut state = match &args.state {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            ChartState::from_json_lenient(&raw)
        }
        None => ChartState::default(),
    };
    state.apply_import(&outcome.records);
    if args.horizontal {
        state.set_orientation(Orientation::Horizontal);
    }

    let mut style = state.style().clone();
    if let Some(title) = &args.title {
        style.title = title.clone();
    }
    if let Some(scale) = args.scale {
        style.export.scale = scale;
    }
    if args.transparent {
        style.export.transparent_background = true;
    }
    state.set_style(style).map_err(|err| err.to_string())?;

    let frame = build_export_frame(&state).map_err(|err| err.to_string())?;
    let mut renderer =
        SvgRenderer::with_scale(state.style().export.scale).map_err(|err| err.to_string())?;
    renderer.render(&frame).map_err(|err| err.to_string())?;

    let document = renderer.into_document();
    match &args.out {
        Some(path) => fs::write(path, document)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            print!("{document}");
            Ok(())
        }
    }
}
