use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "layer-export", version, about)]
struct Cli {
    /// Only log warnings and errors (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every layer, its frame spec and resolved frames.
    Plan(PlanArgs),
    /// Render one output file per frame.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input SVG drawing.
    input: PathBuf,

    /// Print the plan as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input SVG drawing.
    input: PathBuf,

    /// Output format of the per-frame files.
    #[arg(long, short, value_enum, default_value_t = FormatChoice::Pdf)]
    format: FormatChoice,

    /// Output directory (default: next to the input).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Base name for output files instead of the input file stem.
    #[arg(long, short = 'o')]
    name: Option<String>,

    /// Resolution for raster output.
    #[arg(long)]
    dpi: Option<u32>,

    /// Renderer for non-SVG formats.
    #[arg(long, value_enum, default_value_t = RendererChoice::Inkscape)]
    renderer: RendererChoice,

    /// Use the Inkscape 0.92 command line.
    #[arg(long)]
    inkscape_legacy: bool,

    /// Skip joining the frames into one file.
    #[arg(long)]
    no_concat: bool,

    /// Assemble PNG frames into an MP4 at this frame rate (requires `ffmpeg`).
    #[arg(long)]
    video_fps: Option<u32>,

    /// Exit with status 1 when any frame or the concatenation failed.
    #[arg(long)]
    strict: bool,

    /// Print the export report as JSON.
    #[arg(long)]
    json: bool,

    #[arg(long, env = "LAYER_EXPORT_INKSCAPE", default_value = "inkscape")]
    inkscape: PathBuf,

    #[arg(long, env = "LAYER_EXPORT_PDFTK", default_value = "pdftk")]
    pdftk: PathBuf,

    #[arg(long, env = "LAYER_EXPORT_FFMPEG", default_value = "ffmpeg")]
    ffmpeg: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Pdf,
    Png,
    Svg,
    Eps,
    Ps,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RendererChoice {
    Inkscape,
    Resvg,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet {
        "layer_export=warn"
    } else {
        "layer_export=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_layers(input: &Path) -> anyhow::Result<(layer_export::Document, layer_export::LayerSet)> {
    let doc = layer_export::Document::from_path(input)?;
    let layers = layer_export::LayerSet::from_document(&doc)
        .with_context(|| format!("resolve layers of '{}'", input.display()))?;
    Ok((doc, layers))
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let (_, layers) = load_layers(&args.input)?;

    if args.json {
        let plan = serde_json::json!({
            "max_frame": layers.max_frame(),
            "layers": layers.summary(),
        });
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("max frame: {}", layers.max_frame());
    for row in layers.summary() {
        let frames = row
            .frames
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(",");
        println!("  {:<32} {:<12} [{frames}]", row.name, state_label(row.state));
    }
    Ok(())
}

fn state_label(state: layer_export::LayerState) -> &'static str {
    match state {
        layer_export::LayerState::NoSpec => "no spec",
        layer_export::LayerState::EmptyFrames => "never shown",
        layer_export::LayerState::Frames => "frames",
    }
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let opts = layer_export::ExportOpts {
        format: match args.format {
            FormatChoice::Pdf => layer_export::OutputFormat::Pdf,
            FormatChoice::Png => layer_export::OutputFormat::Png,
            FormatChoice::Svg => layer_export::OutputFormat::Svg,
            FormatChoice::Eps => layer_export::OutputFormat::Eps,
            FormatChoice::Ps => layer_export::OutputFormat::Ps,
        },
        out_dir: args.out_dir,
        base_name: args.name,
        dpi: args.dpi,
        renderer: match args.renderer {
            RendererChoice::Inkscape => layer_export::RendererKind::Inkscape,
            RendererChoice::Resvg => layer_export::RendererKind::Resvg,
        },
        inkscape_cli: if args.inkscape_legacy {
            layer_export::InkscapeCli::Legacy
        } else {
            layer_export::InkscapeCli::Modern
        },
        concat: !args.no_concat,
        video_fps: args.video_fps,
        tools: layer_export::ToolPaths {
            inkscape: args.inkscape,
            pdftk: args.pdftk,
            ffmpeg: args.ffmpeg,
        },
    };

    let report =
        layer_export::export_file(&args.input, &opts, &layer_export::CancelToken::new())
            .with_context(|| format!("export '{}'", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    let failed = report.failed_frames().count();
    if failed > 0 {
        eprintln!("{failed} of {} frames failed", report.frames.len());
    }
    if let Some(combined) = &report.combined
        && combined.error.is_some()
    {
        eprintln!("concatenation into {} failed", combined.path.display());
    }

    if args.strict {
        report
            .ensure_clean()
            .with_context(|| format!("export '{}' (--strict)", args.input.display()))?;
    }
    Ok(())
}
