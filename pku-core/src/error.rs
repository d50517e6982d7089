//! # Tipos de Erro
//!
//! Cada estágio tem o seu próprio enum. Apenas [`AlignmentError`] é
//! recuperável: o leitor do corpus descarta o registro afetado e segue em
//! frente. Os demais abortam a execução.

use std::path::PathBuf;

use thiserror::Error;

/// Falha ao interpretar a notação de colchetes de uma sentença.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// Um `[` sem o `]` correspondente. `position` é o offset em bytes do `[`.
    #[error("colchete sem fechamento na posição {position}")]
    UnmatchedBracket { position: usize },
}

/// Falha ao realinhar os tokens de um parágrafo com as sentenças do splitter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentError {
    /// As fronteiras do splitter não coincidem com fronteiras de token.
    #[error("sentença {sentence} não coincide com fronteiras de token: {text:?}")]
    SplitterMisaligned { sentence: usize, text: String },

    /// Sobraram palavras depois da última sentença.
    #[error("{remaining} palavra(s) não cobertas pelas sentenças")]
    UncoveredWords { remaining: usize },

    /// O índice global do verbo ultrapassa todos os grupos.
    #[error("índice {index} fora de todas as sentenças")]
    IndexOutOfRange { index: usize },

    /// A palavra no índice local não é o verbo esperado.
    #[error("verbo esperado {expected:?}, encontrado {found:?}")]
    VerbMismatch { expected: String, found: String },
}

/// Erros fatais da leitura do corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("erro de I/O em {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("linha {line}: {source}")]
    Tokenize {
        line: usize,
        #[source]
        source: TokenizeError,
    },

    #[error("configuração inválida em {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Erros fatais do preenchimento das anotações.
#[derive(Debug, Error)]
pub enum FillError {
    #[error("erro de I/O em {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON inválido em {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("chave {key:?} de {path} não existe no corpus")]
    MissingKey { key: String, path: PathBuf },
}
