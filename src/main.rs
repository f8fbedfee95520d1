use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use elisp_deps::core::{DependencyAnalyzer, GraphBuilder, MetadataResolver, MetadataTable};
use elisp_deps::formatters::{DotFormatter, JsonFormatter, TextFormatter};
use elisp_deps::logging;
use elisp_deps::parsers::ExtractionMode;
use elisp_deps::render::GraphvizRenderer;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "elisp-deps",
    version,
    author = "elisp-deps developers",
    about = "Analyze Emacs package dependencies from a package directory"
)]
struct Cli {
    /// Metadata table (TOML) to use instead of the built-in one
    #[arg(long, global = true, value_name = "FILE")]
    metadata: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Print each package's dependencies as text or JSON
    Text {
        /// Directory holding one subdirectory per package
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Only read each package's main .el file
        #[arg(
            long,
            value_name = "BOOL",
            default_value_t = true,
            num_args = 0..=1,
            default_missing_value = "true",
            action = ArgAction::Set
        )]
        only_main_file: bool,

        /// Declaration forms to read
        #[arg(long, value_enum, default_value_t = Mode::All)]
        mode: Mode,
    },

    /// Render the dependency graph with Graphviz
    Graph {
        /// Directory holding one subdirectory per package
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Output file path, without extension
        #[arg(long, value_name = "FILE", default_value = "emacs_dependencies")]
        output_file: PathBuf,

        /// Emacs version shown in the graph title
        #[arg(long, value_name = "VERSION", default_value = "30")]
        emacs_version: String,

        /// Add package descriptions to node labels
        #[arg(long)]
        show_descriptions: bool,

        /// Only read each package's main .el file
        #[arg(
            long,
            value_name = "BOOL",
            default_value_t = true,
            num_args = 0..=1,
            default_missing_value = "true",
            action = ArgAction::Set
        )]
        only_main_file: bool,

        /// Declaration forms to read
        #[arg(long, value_enum, default_value_t = Mode::All)]
        mode: Mode,

        /// Image format passed to Graphviz
        #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
        image_format: ImageFormat,

        /// Only write the .dot description, without running Graphviz
        #[arg(long)]
        dot_only: bool,
    },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum Mode {
    All,
    Header,
    Require,
}

impl From<Mode> for ExtractionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::All => ExtractionMode::All,
            Mode::Header => ExtractionMode::Header,
            Mode::Require => ExtractionMode::Require,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum ImageFormat {
    Png,
    Svg,
    Pdf,
}

impl ImageFormat {
    fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let table = MetadataTable::load_or_embedded(cli.metadata.as_deref())?;
    let resolver = MetadataResolver::new(&table);

    match cli.command {
        Command::Text {
            path,
            format,
            only_main_file,
            mode,
        } => run_text(&path, format, only_main_file, mode, &resolver),
        Command::Graph {
            path,
            output_file,
            emacs_version,
            show_descriptions,
            only_main_file,
            mode,
            image_format,
            dot_only,
        } => {
            let analysis = DependencyAnalyzer::new()?
                .with_only_main_file(only_main_file)
                .with_mode(mode.into())
                .analyze(&path)?;

            let graph = GraphBuilder::from_analysis(&analysis, &resolver);
            let title = table.graph_title(&analysis.repo_name(), &emacs_version);
            let dot_source = DotFormatter::new()
                .with_title(title)
                .with_descriptions(show_descriptions)
                .format(&graph);

            let renderer = GraphvizRenderer::new().with_image_format(image_format.as_str());
            let written = if dot_only {
                renderer.write_source(&dot_source, &output_file)?
            } else {
                renderer.render(&dot_source, &output_file)?
            };

            println!(
                "Graph with {} packages and {} dependencies written to {}",
                graph.package_count(),
                graph.edge_count(),
                written.display()
            );
            if !analysis.skipped.is_empty() {
                println!("Skipped {} package(s) without readable sources", analysis.skipped.len());
            }
            Ok(())
        }
    }
}

fn run_text(
    path: &Path,
    format: ReportFormat,
    only_main_file: bool,
    mode: Mode,
    resolver: &MetadataResolver,
) -> Result<()> {
    let analysis = DependencyAnalyzer::new()?
        .with_only_main_file(only_main_file)
        .with_mode(mode.into())
        .analyze(path)?;

    match format {
        ReportFormat::Text => print!("{}", TextFormatter::new().format(&analysis)),
        ReportFormat::Json => println!("{}", JsonFormatter::new().format(&analysis, resolver)?),
    }
    Ok(())
}
