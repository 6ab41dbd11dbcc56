//! Command-line driver: table in, two-slide chart report out.
//!
//! ```sh
//! chartdeck --input data/sample_data.csv --output output/report.pptx
//! chartdeck --config report.yaml --summary
//! RUST_LOG=chartdeck=debug chartdeck
//! ```

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use chartdeck::ReportConfig;
use chartdeck::chart::{build_bar_chart_data, build_line_chart_data};
use chartdeck::deck::{Deck, DeckSink, PptxWriter};
use chartdeck::slide::SlideComposer;
use chartdeck::table::Table;

/// Build a PowerPoint chart report from a delimited table
#[derive(Parser, Debug)]
#[command(name = "chartdeck", version)]
struct Args {
    /// Delimited input table
    #[arg(short, long, value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Presentation to write
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// YAML report configuration
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Title slide heading
    #[arg(long)]
    title: Option<String>,

    /// Title slide subheading
    #[arg(long)]
    subtitle: Option<String>,

    /// Chart slide heading
    #[arg(long)]
    chart_title: Option<String>,

    /// Chart type
    #[arg(long, value_enum, default_value = "line")]
    kind: KindArg,

    /// Print the summary cards as YAML
    #[arg(long)]
    summary: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    /// Line chart with evolution cards
    Line,
    /// Clustered column chart over raw categories
    Bar,
}

impl Args {
    /// Command-line values take precedence over the configuration file.
    fn into_config(self) -> chartdeck::Result<ReportConfig> {
        let mut config = match self.config {
            Some(ref path) => ReportConfig::load(path)?,
            None => ReportConfig::default(),
        };
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(title) = self.title {
            config.title = title;
        }
        if let Some(subtitle) = self.subtitle {
            config.subtitle = subtitle;
        }
        if let Some(chart_title) = self.chart_title {
            config.chart_title = chart_title;
        }
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "chartdeck=debug" } else { "chartdeck=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let (kind, summary) = (args.kind, args.summary);
    let config = args.into_config()?;

    let table = Table::from_path(&config.input, &config.table)?;
    info!(
        input = %config.input.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded table"
    );

    let (category, values) = config.columns_for(&table)?;
    let model = match kind {
        KindArg::Line => build_line_chart_data(&table, &category, &values)?,
        KindArg::Bar => build_bar_chart_data(&table, &category, &values)?,
    };

    let composer = SlideComposer::new(config.layout.clone());
    let mut deck = Deck::new(&config.layout).with_title(config.title.as_str());
    deck.push_slide(composer.compose_title_slide(&config.title, &config.subtitle));
    let chart_slide = composer.compose_chart_slide(&model, &config.chart_title);

    if summary {
        let yaml = serde_saphyr::to_string(&chart_slide.cards())
            .map_err(|e| format!("failed to serialize summary cards: {}", e))?;
        print!("{}", yaml);
    }
    deck.push_slide(chart_slide);

    if let Some(dir) = config.output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    PptxWriter::new().save(&deck, &config.output)?;

    Ok(())
}
