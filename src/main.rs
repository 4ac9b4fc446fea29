use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bme_repetition::{
    execute_stage3, plan_fill, read_turn_table, run_pipeline, BmeCode, LexiconTagger,
    PipelineConfig, Speaker, TableSchema, TokenOverrides, TurnAnalyzer,
};

#[derive(Parser)]
#[command(name = "bme-repetition")]
#[command(author, version, about = "Self- and other-repetition metrics for BME-segmented dialogue", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SchemaArgs {
    /// Conversation identifier column
    #[arg(long, default_value = "Conv_MOD_P1_P2")]
    conversation_column: String,

    /// Prefix of the per-speaker BME code columns
    #[arg(long, default_value = "BME_Turn_")]
    bme_prefix: String,

    /// Prefix of the per-speaker turn text columns
    #[arg(long, default_value = "Tag_Turn_")]
    text_prefix: String,
}

impl From<SchemaArgs> for TableSchema {
    fn from(args: SchemaArgs) -> Self {
        Self {
            conversation_column: args.conversation_column,
            bme_prefix: args.bme_prefix,
            text_prefix: args.text_prefix,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute repetition metrics and write the augmented table
    Process {
        /// Input table (CSV with header)
        #[arg(short, long)]
        input: PathBuf,

        /// Output table (CSV)
        #[arg(short, long)]
        output: PathBuf,

        /// Largest n-gram size; every size from 1 up to this is computed
        #[arg(long, default_value = "3")]
        max_ngram: usize,

        /// JSON object of word -> POS tag overriding the built-in lexicon
        #[arg(long)]
        lexicon: Option<PathBuf>,

        #[command(flatten)]
        schema: SchemaArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarise an input table without computing metrics
    Analyze {
        /// Input table (CSV with header)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        schema: SchemaArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            max_ngram,
            lexicon,
            schema,
            verbose,
        } => {
            setup_logging(verbose);
            process_table(input, output, max_ngram, lexicon, schema.into())
        }
        Commands::Analyze {
            input,
            schema,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_table(input, schema.into())
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn process_table(
    input: PathBuf,
    output: PathBuf,
    max_ngram: usize,
    lexicon: Option<PathBuf>,
    schema: TableSchema,
) -> Result<()> {
    if max_ngram == 0 {
        anyhow::bail!("--max-ngram must be at least 1");
    }

    info!("Loading table from {:?}", input);
    let table = read_turn_table(&input, &schema)?;
    info!(
        "Loaded {} rows, {} conversations",
        table.len(),
        table.conversation_count()
    );

    let tagger = match lexicon {
        Some(path) => LexiconTagger::from_json_file(&path)
            .with_context(|| format!("Failed to load lexicon {:?}", path))?,
        None => LexiconTagger::new(),
    };
    let analyzer = TurnAnalyzer::new(tagger, TokenOverrides::default());
    let config = PipelineConfig {
        ngram_sizes: (1..=max_ngram).collect(),
    };

    let result = run_pipeline(&table, &analyzer, &config).context("Repetition counting failed")?;

    info!("Stage 3: Rendering output...");
    let rendered = execute_stage3(&table, &result.metrics, &output)?;

    let stats = &result.stats;
    info!(
        "Complete: {} rows, {} BEGIN turns, {} unanalyzable spans, {} unfillable cells",
        stats.rows,
        stats.begin_turns,
        stats.skipped_spans,
        result.fill_report.unfillable.len()
    );
    info!(
        "Output {:?} has been created ({} metric columns)",
        rendered.output_path, rendered.metric_columns
    );

    Ok(())
}

fn analyze_table(input: PathBuf, schema: TableSchema) -> Result<()> {
    info!("Analyzing table from {:?}", input);
    let table = read_turn_table(&input, &schema)?;

    println!("Table Analysis");
    println!("==============");
    println!("Rows: {}", table.len());
    println!("Conversations: {}", table.conversation_count());
    println!();

    println!("Speaker Statistics");
    println!("------------------");
    for speaker in Speaker::ALL {
        let mut codes: HashMap<BmeCode, usize> = HashMap::new();
        for record in &table.records {
            if let Some(code) = record.bme(speaker) {
                *codes.entry(code).or_insert(0) += 1;
            }
        }
        let breakdown: Vec<String> = [
            BmeCode::BeginSpoken,
            BmeCode::BeginWritten,
            BmeCode::Middle,
            BmeCode::EndSpoken,
            BmeCode::EndWritten,
        ]
        .iter()
        .map(|code| format!("{}={}", code.as_str(), codes.get(code).copied().unwrap_or(0)))
        .collect();

        println!(
            "{}: {} turns ({})",
            speaker,
            table.begin_turns(speaker),
            breakdown.join(", ")
        );
    }
    println!();

    let report = plan_fill(&table).report();
    println!("Segmentation");
    println!("------------");
    println!("Middle/End lines inheriting a score: {}", report.filled);
    println!("Middle/End lines without a Beginning line: {}", report.unfillable.len());
    for (row, speaker) in &report.unfillable {
        println!("  row {}: {}", row, speaker);
    }

    Ok(())
}
