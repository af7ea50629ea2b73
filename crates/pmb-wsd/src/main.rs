use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;
use wordnet_db::LoadMode;

use pmb_conll::Corpus;
use pmb_wsd::{
    CachedInventory, ContextOptions, FrequencyTable, WordNetInventory, first_sense_predictions,
    training_pairs,
};

const DEFAULT_WORDNET_PATH: &str = "open_english_wordnet_2024/oewn2024";
const DEFAULT_WORDNET_IMAGE_PATH: &str = "/app/wordnet";

#[derive(Parser)]
#[command(name = "pmb-wsd")]
#[command(about = "Word sense disambiguation baselines for PMB CoNLL corpora")]
struct Cli {
    /// WordNet dictionary directory with data.* and index.* files.
    #[arg(long, env = "WORDNET_DIR", global = true)]
    wordnet_dir: Option<PathBuf>,
    #[arg(
        long,
        env = "WORDNET_LOAD_MODE",
        value_enum,
        ignore_case = true,
        default_value_t = WordNetMode::Mmap,
        global = true
    )]
    wordnet_mode: WordNetMode,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict WordNet's first sense for every gold sense key.
    FirstSense { corpus: PathBuf },
    /// Predict the sense most frequent in a reference corpus.
    Frequency {
        corpus: PathBuf,
        #[arg(long)]
        reference: PathBuf,
    },
    /// Write labelled sentence/gloss pairs as JSON lines.
    Pairs {
        corpus: PathBuf,
        #[command(flatten)]
        context: ContextArgs,
    },
}

#[derive(Args)]
struct ContextArgs {
    /// Add the glosses of hyponyms.
    #[arg(long)]
    hyponyms: bool,
    /// Add the glosses of hypernyms.
    #[arg(long)]
    hypernyms: bool,
    /// Add the glosses of the other hyponyms of each hypernym.
    #[arg(long)]
    siblings: bool,
}

impl From<ContextArgs> for ContextOptions {
    fn from(args: ContextArgs) -> Self {
        Self {
            hyponyms: args.hyponyms,
            hypernyms: args.hypernyms,
            siblings: args.siblings,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WordNetMode {
    Mmap,
    Owned,
}

impl From<WordNetMode> for LoadMode {
    fn from(mode: WordNetMode) -> Self {
        match mode {
            WordNetMode::Mmap => LoadMode::Mmap,
            WordNetMode::Owned => LoadMode::Owned,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let wordnet_path = cli.wordnet_dir.unwrap_or_else(default_wordnet_path);
    info!(
        "using wordnet at {} (mode: {:?})",
        wordnet_path.display(),
        cli.wordnet_mode
    );
    let wn_start = Instant::now();
    let inventory = CachedInventory::new(WordNetInventory::load(
        &wordnet_path,
        cli.wordnet_mode.into(),
    )?);
    info!("wordnet loaded in {} ms", wn_start.elapsed().as_millis());

    let mut out = BufWriter::new(io::stdout().lock());
    match cli.command {
        Commands::FirstSense { corpus } => {
            let corpus = load_corpus(&corpus)?;
            for doc in &corpus {
                let predictions = first_sense_predictions(&inventory, doc.sense_keys())
                    .with_context(|| document_label(doc.id()))?;
                write_json_line(&mut out, &predictions)?;
            }
        }
        Commands::Frequency { corpus, reference } => {
            let table = FrequencyTable::from_corpus(&load_corpus(&reference)?)
                .with_context(|| format!("count senses in {}", reference.display()))?;
            let corpus = load_corpus(&corpus)?;
            for doc in &corpus {
                let predictions = table
                    .predictions(&inventory, doc.sense_keys())
                    .with_context(|| document_label(doc.id()))?;
                write_json_line(&mut out, &predictions)?;
            }
        }
        Commands::Pairs { corpus, context } => {
            let corpus = load_corpus(&corpus)?;
            for pair in training_pairs(&inventory, &corpus, context.into())? {
                write_json_line(&mut out, &pair)?;
            }
        }
    }
    out.flush().context("flush stdout")?;
    info!("{} distinct lemma lookups", inventory.cached_lookups());
    Ok(())
}

fn load_corpus(path: &Path) -> Result<Corpus> {
    let start = Instant::now();
    let corpus = Corpus::from_path(path)?;
    info!(
        "corpus {} parsed in {} ms",
        path.display(),
        start.elapsed().as_millis()
    );
    Ok(corpus)
}

fn write_json_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value).context("serialize output record")?;
    writeln!(out).context("write to stdout")?;
    Ok(())
}

fn document_label(id: Option<&str>) -> String {
    format!("document {}", id.unwrap_or("without id"))
}

fn default_wordnet_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_WORDNET_PATH);
    if local.exists() {
        return local;
    }
    PathBuf::from(DEFAULT_WORDNET_IMAGE_PATH)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .init();
}
