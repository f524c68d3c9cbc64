//! Command-line interface for the segmenter.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{title_from_path, DEFAULT_DPI, DEFAULT_LANGUAGE, TEXT_WRAP_WIDTH};
use crate::error::{Result, SegmenterError};
use crate::grammar::{load_grammar_file, BoundaryGrammar, ChapeauPolicy, GrammarRegistry, ShortLeafPolicy};
use crate::ocr::{OcrOptions, OcrProvider, PlainTextSource, TesseractOcr};
use crate::pipeline;
use crate::sink::JsonFileSink;
use crate::types::{DocumentTitle, RunSummary, StructuredRecord};

/// Statute Segmenter - Split OCR'd legal documents into structured provisions.
#[derive(Parser)]
#[command(name = "statute-segmenter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// OCR a scanned PDF and segment it into JSON records.
    Ocr {
        /// Path to the PDF document
        document: PathBuf,

        /// Rasterization resolution
        #[arg(long, default_value_t = DEFAULT_DPI)]
        dpi: u32,

        /// Tesseract language (e.g., eng, eng+fra)
        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        lang: String,

        /// Directory holding the poppler binaries (default: search PATH)
        #[arg(long)]
        renderer_path: Option<PathBuf>,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Segment an already extracted text file into JSON records.
    Text {
        /// Path to the UTF-8 text file
        document: PathBuf,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// List the built-in grammars.
    Grammars,
}

/// Options shared by the segmenting commands.
#[derive(Args, Debug, Clone)]
pub struct SegmentArgs {
    /// Document title (default: derived from the file name)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Built-in grammar name
    #[arg(short, long, default_value = "california")]
    pub grammar: String,

    /// YAML grammar file, used instead of a built-in grammar
    #[arg(long, conflicts_with = "grammar")]
    pub grammar_file: Option<PathBuf>,

    /// Minimum words per record (default: the grammar's)
    #[arg(long)]
    pub min_words: Option<usize>,

    /// Keep text between a header and its first marker as a record
    #[arg(long)]
    pub keep_chapeau: bool,

    /// Merge short leaves into the next leaf instead of dropping them
    #[arg(long)]
    pub merge_short: bool,

    /// Output JSON file (default: laws_json_file/<title>.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the first N records after writing
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,
}

impl SegmentArgs {
    /// Resolve the grammar with the command-line overrides applied.
    pub fn resolve_grammar(&self) -> Result<BoundaryGrammar> {
        let mut grammar = match &self.grammar_file {
            Some(path) => load_grammar_file(path)?,
            None => GrammarRegistry::with_presets().get(&self.grammar)?.clone(),
        };

        if let Some(min_words) = self.min_words {
            grammar = grammar.with_min_words(min_words);
        }
        if self.keep_chapeau {
            grammar = grammar.with_chapeau(ChapeauPolicy::Keep);
        }
        if self.merge_short {
            grammar = grammar.with_short_leaves(ShortLeafPolicy::MergeForward);
        }

        Ok(grammar)
    }

    /// Resolve the document title, falling back to the file name.
    pub fn resolve_title(&self, document: &Path) -> Result<DocumentTitle> {
        match &self.title {
            Some(title) => DocumentTitle::new(title.as_str()),
            None => {
                let derived = title_from_path(document).ok_or_else(|| {
                    SegmenterError::InvalidTitle(document.display().to_string())
                })?;
                DocumentTitle::new(derived)
            }
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ocr {
            document,
            dpi,
            lang,
            renderer_path,
            segment,
        } => {
            let mut options = OcrOptions::default().with_dpi(dpi).with_language(lang);
            if let Some(path) = renderer_path {
                options = options.with_renderer_path(path);
            }
            segment_command(&TesseractOcr::new(), &document, &options, &segment)
        }
        Commands::Text { document, segment } => {
            segment_command(&PlainTextSource, &document, &OcrOptions::default(), &segment)
        }
        Commands::Grammars => {
            grammars_command();
            Ok(())
        }
    }
}

/// Execute a segmenting command with the given page provider.
fn segment_command<P: OcrProvider>(
    provider: &P,
    document: &Path,
    options: &OcrOptions,
    args: &SegmentArgs,
) -> Result<()> {
    // Validate everything before starting external programs
    options.validate()?;
    let grammar = args.resolve_grammar()?;
    let title = args.resolve_title(document)?;

    let mut sink = match &args.output {
        Some(path) => JsonFileSink::new(path),
        None => JsonFileSink::for_title(&title),
    };

    println!(
        "{} {} with grammar {}",
        style("Segmenting").bold(),
        style(document.display()).cyan(),
        style(grammar.name()).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Reading pages...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let summary = match pipeline::run(provider, document, options, &title, &grammar, &mut sink) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();
    print_summary(&summary);

    if let Some(count) = args.preview {
        let written: Vec<StructuredRecord> = serde_json::from_str(&fs::read_to_string(sink.path())?)?;
        print_preview(&written[..count.min(written.len())]);
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("  Title: {}", style(&summary.title).green());
    println!("  Pages: {}", summary.pages);
    println!("  Scopes: {}", summary.scopes);
    println!("  Records: {}", summary.emitted);
    if summary.skipped > 0 {
        println!("  Skipped: {}", style(summary.skipped).yellow().bold());
    }
    if summary.emitted == 0 {
        println!("  {}", style("No provisions recognized").yellow());
    }

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        summary.destination
    );
}

fn print_preview(records: &[StructuredRecord]) {
    for record in records {
        let label = record.article_number.as_deref().unwrap_or("-");
        println!();
        println!(
            "{} {} ({} words)",
            style(&record.kind).bold(),
            style(label).cyan(),
            record.word_count
        );
        let options = textwrap::Options::new(TEXT_WRAP_WIDTH)
            .initial_indent("  ")
            .subsequent_indent("  ");
        println!("{}", textwrap::fill(&record.text, options));
    }
}

/// Execute the grammars command.
fn grammars_command() {
    let registry = GrammarRegistry::with_presets();
    for grammar in registry.iter() {
        println!(
            "{:<18} {}",
            style(grammar.name()).cyan(),
            grammar.description()
        );
    }
}
