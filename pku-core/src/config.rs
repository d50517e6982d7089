//! # Política de Filtragem do Corpus
//!
//! Todos os critérios que decidem quais linhas do corpus viram registros
//! ficam em [`ReaderConfig`]. O `Default` reproduz a política usada na
//! construção do dataset de polaridade verbal; um arquivo JSON pode
//! sobrescrever qualquer campo (os ausentes mantêm o padrão).
//!
//! ```json
//! { "kept_suffix": "002", "legal_markers": ["法", "条例"] }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;
use crate::token::Token;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Classe gramatical dos verbos procurados.
    pub verb_tag: String,
    /// Sufixo da chave que marca a primeira sentença do parágrafo.
    pub paragraph_head_suffix: String,
    /// Único sufixo de chave mantido.
    pub kept_suffix: String,
    /// Última palavra que identifica um parágrafo de texto legal (ex: "...法").
    pub legal_markers: Vec<String>,
    /// Classe gramatical da pontuação.
    pub punctuation_tag: String,
    /// Pontuação que não pode encerrar uma sentença completa.
    pub closing_marks: Vec<String>,
    /// Pontuação aceita no início da sentença.
    pub opening_marks: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            verb_tag: "v".to_string(),
            paragraph_head_suffix: "001".to_string(),
            kept_suffix: "003".to_string(),
            legal_markers: vec!["法".to_string()],
            punctuation_tag: "w".to_string(),
            closing_marks: ["）", "}", "】", "：", "，", "；", "”", "》"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            opening_marks: ["“", "（", "《"].iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl ReaderConfig {
    /// Carrega a configuração de um arquivo JSON.
    pub fn from_path(path: &Path) -> Result<Self, CorpusError> {
        let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CorpusError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn is_legal_marker(&self, token: &Token) -> bool {
        self.legal_markers.iter().any(|m| *m == token.word)
    }

    /// A linha termina em pontuação final de verdade (não em vírgula, dois-pontos, fechamento...).
    pub fn ends_sentence(&self, last: &Token) -> bool {
        last.has_pos(&self.punctuation_tag) && !self.closing_marks.iter().any(|m| *m == last.word)
    }

    /// A linha não começa no meio de uma sentença.
    pub fn starts_sentence(&self, first: &Token) -> bool {
        !first.has_pos(&self.punctuation_tag) || self.opening_marks.iter().any(|m| *m == first.word)
    }
}
