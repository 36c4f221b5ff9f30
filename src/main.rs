use clap::Parser;
use folio::ingest::{
    parse_highlights, parse_merge_assignment, read_columns, read_merge_values, read_rows,
};
use folio::{
    DocumentGenerator, GenerationRequest, GeneratorConfig, HighlightedRows, PipelineError,
    SharedResourceData, Template, build_column_configs, load_letterhead,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Generates a letterhead-branded loan portfolio PDF from a template and
/// spreadsheet rows.
#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Cli {
    /// Template JSON (title, body, signatureLeft, signatureRight).
    #[arg(long)]
    template: PathBuf,

    /// Row data as a JSON array of objects or a CSV file with a header row.
    #[arg(long)]
    rows: PathBuf,

    /// Column configurations as JSON. Derived from the rows when omitted.
    #[arg(long)]
    columns: Option<PathBuf>,

    /// Comma-separated 0-based row indices to highlight, e.g. `2,5`.
    #[arg(long)]
    highlight: Option<String>,

    /// Letterhead image file or data URL.
    #[arg(long)]
    letterhead: Option<String>,

    /// Merge value as KEY=VALUE. KEY is a placeholder (`{{ClientName}}`) or a label.
    #[arg(long = "merge", value_name = "KEY=VALUE")]
    merge: Vec<String>,

    /// JSON object of merge values, applied before any --merge.
    #[arg(long)]
    merge_file: Option<PathBuf>,

    /// Generator configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    let generator = DocumentGenerator::new(config)?;

    let template: Template = serde_json::from_str(&fs::read_to_string(&cli.template)?)?;
    let rows = read_rows(&cli.rows)?;
    if rows.is_empty() {
        return Err(PipelineError::EmptyRows);
    }
    let columns = match &cli.columns {
        Some(path) => read_columns(path)?,
        None => build_column_configs(&rows, generator.schema()),
    };
    let highlighted = match &cli.highlight {
        Some(list) => parse_highlights(list)?,
        None => HighlightedRows::default(),
    };

    let mut merge_values = match &cli.merge_file {
        Some(path) => read_merge_values(path)?,
        None => Default::default(),
    };
    for assignment in &cli.merge {
        let (key, value) = parse_merge_assignment(assignment)?;
        merge_values.insert(key, value);
    }

    let mut request = GenerationRequest::new(template, rows, columns)
        .with_highlighted(highlighted)
        .with_merge_values(merge_values);
    match cli.letterhead.as_deref().map(resolve_letterhead) {
        Some(Ok(letterhead)) => request = request.with_letterhead(letterhead),
        Some(Err(e)) => log::warn!("Continuing without a letterhead: {e}"),
        None => log::warn!("No letterhead given, the document will have none"),
    }

    let path = generator.generate_to_dir(&request, &cli.out_dir)?;
    println!("{}", path.display());
    Ok(())
}

/// Data URLs decode inline; a path is read relative to its own directory.
fn resolve_letterhead(reference: &str) -> Result<SharedResourceData, PipelineError> {
    if reference.starts_with("data:") {
        return load_letterhead(reference, ".");
    }
    let path = Path::new(reference);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PipelineError::Config(format!("invalid letterhead path '{reference}'")))?;
    load_letterhead(name, dir)
}
