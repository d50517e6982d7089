//! # Tokenizador com Colchetes de Entidade
//!
//! As sentenças do corpus PKU são sequências de tokens `palavra/classe`
//! separados por **dois espaços**. Entidades nomeadas compostas aparecem
//! entre colchetes, seguidas do tipo da entidade:
//!
//! ```text
//! [北京/ns  大学/n]nt  是/v  著名/a  学府/n  。/w
//! ```
//!
//! Os grupos podem ser aninhados (`[[中国/ns  科学院/n]nt  院士/n]nr`).
//!
//! ## Estratégia
//!
//! 1. **Parsing** ([`parse`]): descida recursiva que produz uma árvore de
//!    [`Segment`], onde cada grupo vira um nó [`Segment::Entity`] com o seu rótulo.
//! 2. **Achatamento** ([`split_tokens`], [`tokenize`]): percorre a árvore em ordem
//!    e emite apenas as folhas. O rótulo da entidade nunca aparece na saída plana.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use pku_core::tokenizer::split_tokens;
//!
//! let tokens = split_tokens("[北京/ns  大学/n]nt  是/v  。/w").unwrap();
//! assert_eq!(tokens, vec!["北京/ns", "大学/n", "是/v", "。/w"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TokenizeError;
use crate::token::Token;

/// Separador de tokens dentro de uma sentença do corpus.
pub const TOKEN_DELIMITER: &str = "  ";

/// Nó da árvore produzida pelo parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Token cru `palavra/classe`.
    Token(String),
    /// Grupo `[ ... ]rotulo`, com os filhos na ordem original.
    Entity {
        label: String,
        children: Vec<Segment>,
    },
}

impl Segment {
    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Segment::Token(raw) => out.push(raw),
            Segment::Entity { children, .. } => {
                for child in children {
                    child.flatten_into(out);
                }
            }
        }
    }

    /// Tokens crus cobertos por este segmento, em ordem.
    pub fn tokens(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }
}

/// Entidade anotada no corpus: o rótulo do grupo e os tokens que ele cobre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityGroup {
    pub label: String,
    pub tokens: Vec<String>,
    /// Profundidade de aninhamento (0 para grupos de primeiro nível).
    pub depth: usize,
}

/// Constrói a árvore de segmentos de uma sentença.
pub fn parse(sentence: &str) -> Result<Vec<Segment>, TokenizeError> {
    parse_at(sentence, 0)
}

/// Tokeniza a sentença e devolve os tokens crus (`palavra/classe`) já achatados.
pub fn split_tokens(sentence: &str) -> Result<Vec<String>, TokenizeError> {
    Ok(flatten(&parse(sentence)?)
        .into_iter()
        .map(str::to_string)
        .collect())
}

/// Igual a [`split_tokens`], mas já separando palavra e classe.
pub fn tokenize(sentence: &str) -> Result<Vec<Token>, TokenizeError> {
    Ok(flatten(&parse(sentence)?)
        .into_iter()
        .map(Token::parse)
        .collect())
}

/// Achata uma sequência de segmentos, descartando os rótulos.
pub fn flatten(segments: &[Segment]) -> Vec<&str> {
    let mut out = Vec::new();
    for segment in segments {
        segment.flatten_into(&mut out);
    }
    out
}

/// Lista todas as entidades da árvore em pré-ordem (o grupo externo antes dos internos).
pub fn entities(segments: &[Segment]) -> Vec<EntityGroup> {
    let mut out = Vec::new();
    collect_entities(segments, 0, &mut out);
    out
}

fn collect_entities(segments: &[Segment], depth: usize, out: &mut Vec<EntityGroup>) {
    for segment in segments {
        if let Segment::Entity { label, children } = segment {
            out.push(EntityGroup {
                label: label.clone(),
                tokens: segment.tokens().into_iter().map(str::to_string).collect(),
                depth,
            });
            collect_entities(children, depth + 1, out);
        }
    }
}

/// `offset` é a posição de `text` dentro da sentença original (para mensagens de erro).
fn parse_at(text: &str, offset: usize) -> Result<Vec<Segment>, TokenizeError> {
    let Some(open) = text.find('[') else {
        return Ok(split_plain(text));
    };
    let close = matching_bracket(text, open).ok_or(TokenizeError::UnmatchedBracket {
        position: offset + open,
    })?;

    let mut segments = split_plain(&text[..open]);

    let children = parse_at(&text[open + 1..close], offset + open + 1)?;

    // Após o `]` vem o rótulo, e opcionalmente dois espaços e mais tokens
    let after = &text[close + 1..];
    let (label, rest) = match after.find(TOKEN_DELIMITER) {
        Some(pos) => {
            let rest_offset = offset + close + 1 + pos + TOKEN_DELIMITER.len();
            let rest = parse_at(&after[pos + TOKEN_DELIMITER.len()..], rest_offset)?;
            (&after[..pos], rest)
        }
        None => (after, Vec::new()),
    };

    segments.push(Segment::Entity {
        label: label.trim().to_string(),
        children,
    });
    segments.extend(rest);
    Ok(segments)
}

/// Caso base: texto sem colchetes, separado por dois espaços.
fn split_plain(text: &str) -> Vec<Segment> {
    text.split(TOKEN_DELIMITER)
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| Segment::Token(raw.to_string()))
        .collect()
}

/// Posição do `]` que fecha o `[` em `open`. `[` e `]` são ASCII, então a
/// varredura por bytes nunca cai no meio de um caractere multibyte.
fn matching_bracket(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, byte) in text.bytes().enumerate().skip(open) {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
