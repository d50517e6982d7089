//! # Divisão de Parágrafos em Sentenças
//!
//! O localizador de verbos precisa saber onde cada sentença natural começa e
//! termina dentro de um parágrafo já segmentado. Essa decisão fica atrás do
//! trait [`SentenceSplitter`], para que a estratégia possa ser trocada sem
//! mexer no realinhamento.
//!
//! ## Estratégias Disponíveis
//!
//! - [`PunctuationSplitter`]: corta depois de pontuação final chinesa ou ASCII
//!   (`。！？!?…`), levando junto aspas e parênteses de fechamento. É o padrão.
//! - [`UnicodeSplitter`]: fronteiras de sentença do UAX #29 via `unicode-segmentation`.
//!
//! Ambas devolvem fatias contíguas do texto original: concatenadas, reconstroem
//! o parágrafo inteiro.

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Divide um texto em sentenças, preservando a ordem e cobrindo o texto todo.
pub trait SentenceSplitter {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Pontuação que encerra uma sentença, seguida de fechamentos opcionais.
const SENTENCE_END_PATTERN: &str = r#"[。！？!?…]+[”’」』）》)"']*"#;

/// Divisor baseado em pontuação final.
///
/// Reticências (`……`) e pontuação repetida (`！！`) ficam inteiras na mesma
/// sentença. Ponto e vírgula não encerra sentença.
#[derive(Debug, Clone)]
pub struct PunctuationSplitter {
    sentence_end: Regex,
}

impl PunctuationSplitter {
    pub fn new() -> Self {
        Self {
            sentence_end: Regex::new(SENTENCE_END_PATTERN).expect("padrão de pontuação válido"),
        }
    }
}

impl Default for PunctuationSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSplitter for PunctuationSplitter {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        for m in self.sentence_end.find_iter(text) {
            sentences.push(&text[start..m.end()]);
            start = m.end();
        }
        if start < text.len() {
            sentences.push(&text[start..]);
        }
        sentences
    }
}

/// Divisor pelas regras de fronteira de sentença do Unicode (UAX #29).
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSplitter;

impl SentenceSplitter for UnicodeSplitter {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_sentence_bounds().collect()
    }
}
