//! CLI que reconstrói o texto do dataset de polaridade verbal a partir do corpus PKU.
//!
//! ```text
//! pku-fill --raw 199801.txt --anno "Chinese-verb-polarity-analysis dataset-sample"
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use pku_core::{
    fill_annotations, CorpusReader, PunctuationSplitter, ReaderConfig, SentenceSplitter,
    UnicodeSplitter,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Estratégia de divisão de sentenças.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SplitterKind {
    /// Pontuação final chinesa/ASCII (。！？!?…)
    Punct,
    /// Fronteiras de sentença do Unicode (UAX #29)
    Unicode,
}

#[derive(Debug, Parser)]
#[command(
    name = "pku-fill",
    version,
    about = "Usa o corpus People's Daily da PKU para preencher o texto do dataset de polaridade verbal"
)]
struct Args {
    /// Arquivo do corpus People's Daily (PKU)
    #[arg(short, long, env = "PKU_RAW")]
    raw: Option<PathBuf>,

    /// Diretório raiz dos arquivos de anotação
    #[arg(
        short,
        long,
        env = "PKU_ANNO",
        default_value = "Chinese-verb-polarity-analysis dataset-sample"
    )]
    anno: PathBuf,

    /// Divisor de sentenças usado no realinhamento
    #[arg(long, value_enum, default_value_t = SplitterKind::Punct)]
    splitter: SplitterKind,

    /// Arquivo JSON com a política de filtragem (campos ausentes usam o padrão)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Apenas lê o corpus e mostra as estatísticas, sem gravar nada
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ReaderConfig::from_path(path)?,
        None => ReaderConfig::default(),
    };
    let splitter: Box<dyn SentenceSplitter> = match args.splitter {
        SplitterKind::Punct => Box::new(PunctuationSplitter::new()),
        SplitterKind::Unicode => Box::new(UnicodeSplitter),
    };

    let raw = args
        .raw
        .as_deref()
        .context("informe o arquivo do corpus com --raw")?;
    let reader = CorpusReader::new(config, splitter.as_ref());
    let corpus = reader
        .read_path(raw)
        .with_context(|| format!("lendo o corpus {}", raw.display()))?;

    let stats = &corpus.stats;
    info!(
        paragraphs = stats.paragraphs,
        legal_skipped = stats.legal_skipped,
        suffix_filtered = stats.suffix_filtered,
        incomplete_filtered = stats.incomplete_filtered,
        verbs = stats.verbs,
        dropped = stats.dropped,
        "{} registros extraídos",
        stats.records
    );

    if args.dry_run {
        return Ok(());
    }

    let summary = fill_annotations(&corpus, &args.anno)
        .with_context(|| format!("preenchendo as anotações em {}", args.anno.display()))?;
    info!("{} arquivos, {} registros", summary.files, summary.records);

    println!("Done");
    Ok(())
}
