//! # pku-core — Texto Bruto para o Dataset de Polaridade Verbal
//!
//! O dataset de análise de polaridade de verbos em chinês publica apenas chaves
//! e rótulos. O texto de cada exemplo precisa ser reconstruído a partir do
//! corpus do People's Daily segmentado e etiquetado pela PKU.
//!
//! ## Arquitetura
//!
//! 1.  **Entrada**: linha do corpus (`chave/m  palavra/classe  ...`).
//! 2.  **Tokenização** ([`tokenizer`]): expande os grupos de entidade `[ ... ]rótulo`
//!     numa sequência plana de [`Token`].
//! 3.  **Filtragem** ([`corpus`], [`config`]): descarta texto legal, grupos fora do
//!     sufixo escolhido e sentenças incompletas.
//! 4.  **Localização** ([`locator`], [`splitter`]): redivide a linha em sentenças
//!     naturais e acha a posição local de cada verbo.
//! 5.  **Preenchimento** ([`annotation`]): junta os registros aos rótulos e grava NDJSON.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use std::io::Cursor;
//! use std::path::Path;
//! use pku_core::{CorpusReader, PunctuationSplitter, ReaderConfig};
//!
//! let splitter = PunctuationSplitter::new();
//! let reader = CorpusReader::new(ReaderConfig::default(), &splitter);
//!
//! let line = "19980101-01-001-003/m  国务院  总理/n  今天/t  访问/v  了/u  法国/ns  。/w";
//! let corpus = reader.read(Cursor::new(line), Path::new("exemplo")).unwrap();
//!
//! let record = corpus.get("19980101-01-001-003-0").unwrap();
//! assert_eq!(record.verb, "访问");
//! assert_eq!(record.token_index, vec![3]);
//! ```

pub mod annotation;
pub mod config;
pub mod corpus;
pub mod error;
pub mod locator;
pub mod splitter;
pub mod token;
pub mod tokenizer;

pub use annotation::{fill_annotations, AnnotatedRecord, FillSummary};
pub use config::ReaderConfig;
pub use corpus::{Corpus, CorpusReader, ReadStats, SentenceRecord};
pub use error::{AlignmentError, CorpusError, FillError, TokenizeError};
pub use locator::{VerbHit, VerbLocator};
pub use splitter::{PunctuationSplitter, SentenceSplitter, UnicodeSplitter};
pub use token::Token;
