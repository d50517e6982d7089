//! # Leitor do Corpus PKU (People's Daily)
//!
//! Lê o corpus linha a linha e produz os registros de sentença usados pelo
//! dataset de polaridade verbal.
//!
//! ## Formato de Linha
//!
//! ```text
//! 19980101-01-001-003/m  他/r  来/v  了/y  。/w
//! └──── chave (19) ───┘  └── sentença (a partir do caractere 22) ──┘
//! ```
//!
//! A chave codifica data, página, parágrafo e grupo de sentenças. Os três
//! últimos dígitos são o grupo: `001` é o primeiro do parágrafo. Linhas em
//! branco separam parágrafos.
//!
//! ## Filtros (nesta ordem)
//!
//! 1. **Texto legal**: se a linha `001` termina em "法", todo o parágrafo é pulado.
//! 2. **Sufixo**: apenas chaves terminadas em `003`.
//! 3. **Sentença completa**: termina em pontuação final e não começa com
//!    pontuação (exceto aspas, parênteses e títulos de abertura).
//!
//! As linhas que passam vão para o [`VerbLocator`]; cada verbo localizado vira
//! um [`SentenceRecord`].

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ReaderConfig;
use crate::error::{AlignmentError, CorpusError};
use crate::locator::VerbLocator;
use crate::splitter::SentenceSplitter;
use crate::token::Token;
use crate::tokenizer;

/// Largura da chave, em caracteres.
pub const KEY_WIDTH: usize = 19;
/// Início da sentença, em caracteres (a chave é seguida de `/m` e dois espaços).
pub const SENTENCE_OFFSET: usize = 22;

/// Uma linha do corpus separada em chave e sentença crua.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub key: String,
    pub sentence: String,
}

impl RawLine {
    /// Separa a linha pelos offsets fixos (em caracteres, não bytes).
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let key_end = byte_offset(line, KEY_WIDTH);
        let sentence_start = byte_offset(line, SENTENCE_OFFSET);
        Self {
            key: line[..key_end].trim().to_string(),
            sentence: line[sentence_start..].trim().to_string(),
        }
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Registro de saída: uma sentença natural e um verbo dentro dela.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    /// `<chave da linha>-<contador global>`; é também a chave no [`Corpus`].
    pub key: String,
    pub tokens: Vec<String>,
    pub verb: String,
    /// Sempre com um único elemento: a posição do verbo em `tokens`.
    pub token_index: Vec<usize>,
    /// `<chave da linha>-<índice da sentença>`.
    #[serde(skip)]
    pub sentence_key: String,
}

impl SentenceRecord {
    /// `tokens[token_index[0]] == verb`
    pub fn is_consistent(&self) -> bool {
        self.token_index
            .first()
            .and_then(|&i| self.tokens.get(i))
            .is_some_and(|word| *word == self.verb)
    }
}

/// Verbo descartado porque o realinhamento de sentenças falhou.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedVerb {
    pub key: String,
    pub verb: String,
    pub error: AlignmentError,
}

/// Contadores de uma leitura completa.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReadStats {
    pub lines: usize,
    /// Linhas em branco, isto é, fronteiras de parágrafo.
    pub paragraphs: usize,
    pub legal_skipped: usize,
    pub suffix_filtered: usize,
    pub incomplete_filtered: usize,
    pub verbs: usize,
    pub records: usize,
    pub dropped: usize,
}

/// Resultado da leitura: registros indexados pela chave.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    pub records: HashMap<String, SentenceRecord>,
    pub dropped: Vec<DroppedVerb>,
    pub stats: ReadStats,
}

impl Corpus {
    pub fn get(&self, key: &str) -> Option<&SentenceRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Estado do filtro de texto legal, avançado a cada linha não vazia.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParagraphState {
    #[default]
    Scanning,
    /// Pulando as linhas cuja chave começa com este prefixo.
    SkippingParagraph(String),
}

impl ParagraphState {
    /// Atualiza o estado com a linha e diz se ela deve ser pulada.
    pub fn advance(&mut self, key: &str, tokens: &[Token], config: &ReaderConfig) -> bool {
        if let Some(prefix) = key.strip_suffix(config.paragraph_head_suffix.as_str()) {
            *self = match tokens.last() {
                Some(last) if config.is_legal_marker(last) => {
                    ParagraphState::SkippingParagraph(prefix.to_string())
                }
                _ => ParagraphState::Scanning,
            };
        }

        let skip = match self {
            ParagraphState::SkippingParagraph(prefix) => key.starts_with(prefix.as_str()),
            ParagraphState::Scanning => false,
        };
        if !skip {
            *self = ParagraphState::Scanning;
        }
        skip
    }
}

/// Leitor do corpus com uma política de filtragem e um splitter de sentenças.
pub struct CorpusReader<'s> {
    config: ReaderConfig,
    locator: VerbLocator<'s>,
}

impl<'s> CorpusReader<'s> {
    pub fn new(config: ReaderConfig, splitter: &'s dyn SentenceSplitter) -> Self {
        let locator = VerbLocator::new(splitter, config.verb_tag.clone());
        Self { config, locator }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Lê o corpus de um arquivo.
    pub fn read_path(&self, path: &Path) -> Result<Corpus, CorpusError> {
        let file = File::open(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.read(BufReader::new(file), path)
    }

    /// Lê o corpus de qualquer fonte; `origin` aparece apenas nas mensagens de erro.
    pub fn read<R: BufRead>(&self, reader: R, origin: &Path) -> Result<Corpus, CorpusError> {
        let mut corpus = Corpus::default();
        let mut state = ParagraphState::default();

        for (number, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| CorpusError::Io {
                path: origin.to_path_buf(),
                source,
            })?;
            corpus.stats.lines += 1;

            if line.trim().is_empty() {
                corpus.stats.paragraphs += 1;
                continue;
            }

            let raw = RawLine::parse(&line);
            let tokens = tokenizer::tokenize(&raw.sentence).map_err(|source| {
                CorpusError::Tokenize {
                    line: number + 1,
                    source,
                }
            })?;

            if state.advance(&raw.key, &tokens, &self.config) {
                corpus.stats.legal_skipped += 1;
                continue;
            }
            if !raw.key.ends_with(self.config.kept_suffix.as_str()) {
                corpus.stats.suffix_filtered += 1;
                continue;
            }
            if !self.is_complete(&tokens) {
                corpus.stats.incomplete_filtered += 1;
                continue;
            }

            self.collect_verbs(&raw.key, &tokens, &mut corpus);
        }

        corpus.stats.records = corpus.records.len();
        corpus.stats.dropped = corpus.dropped.len();
        info!(
            lines = corpus.stats.lines,
            records = corpus.stats.records,
            dropped = corpus.stats.dropped,
            "📖 Corpus lido de {}",
            origin.display()
        );
        Ok(corpus)
    }

    fn is_complete(&self, tokens: &[Token]) -> bool {
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => {
                self.config.ends_sentence(last) && self.config.starts_sentence(first)
            }
            _ => false,
        }
    }

    fn collect_verbs(&self, key: &str, tokens: &[Token], corpus: &mut Corpus) {
        let verbs = tokens.iter().filter(|t| t.has_pos(&self.config.verb_tag));
        for (result, verb) in self.locator.locate_verbs(tokens).into_iter().zip(verbs) {
            corpus.stats.verbs += 1;
            match result {
                Ok(hit) => {
                    // O contador é global, então a chave nunca se repete
                    let record_key = format!("{}-{}", key, corpus.records.len());
                    let record = SentenceRecord {
                        key: record_key.clone(),
                        tokens: hit.tokens,
                        verb: hit.verb,
                        token_index: vec![hit.index],
                        sentence_key: format!("{}-{}", key, hit.sentence_index),
                    };
                    corpus.records.insert(record_key, record);
                }
                Err(error) => {
                    debug!(key, verb = %verb.word, %error, "verbo descartado");
                    corpus.dropped.push(DroppedVerb {
                        key: key.to_string(),
                        verb: verb.word.clone(),
                        error,
                    });
                }
            }
        }
    }
}
