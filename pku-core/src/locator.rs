//! # Localizador de Verbos
//!
//! Recebe os tokens de uma linha do corpus (que pode conter várias sentenças
//! naturais) e, para cada verbo, descobre em qual sentença ele está e qual a
//! sua posição dentro dela.
//!
//! ## Algoritmo
//!
//! 1. Junta todas as palavras sem separador e entrega o texto ao [`SentenceSplitter`].
//! 2. **Realinhamento** ([`realign`]): consome as palavras em ordem, com um cursor
//!    único, até que a concatenação (sem espaços nas pontas) seja igual à sentença
//!    corrente. Se o splitter cortar no meio de uma palavra, o realinhamento falha.
//! 3. **Localização** ([`locate`]): subtrai o tamanho de cada grupo do índice
//!    global até que ele caia dentro de um grupo. Grupos vazios são pulados.
//! 4. Confere que a palavra encontrada é de fato o verbo.
//!
//! Falhas não abortam o parágrafo: cada verbo recebe o seu próprio `Result`.

use serde::{Deserialize, Serialize};

use crate::error::AlignmentError;
use crate::splitter::SentenceSplitter;
use crate::token::Token;

/// Um verbo localizado dentro da sua sentença.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbHit {
    /// Índice da sentença dentro da linha do corpus.
    pub sentence_index: usize,
    /// Palavras da sentença que contém o verbo.
    pub tokens: Vec<String>,
    pub verb: String,
    /// Posição do verbo em `tokens`.
    pub index: usize,
}

/// Particiona `words` em grupos, um por sentença de `sentences`.
///
/// Concatenados, os grupos devolvidos reproduzem exatamente `words`.
pub fn realign<'a>(
    words: &[&'a str],
    sentences: &[&str],
) -> Result<Vec<Vec<&'a str>>, AlignmentError> {
    let mut groups = Vec::with_capacity(sentences.len());
    let mut cursor = 0;

    for (i, sentence) in sentences.iter().enumerate() {
        let target = sentence.trim();
        let mut group = Vec::new();
        let mut joined = String::new();

        while joined.trim() != target {
            let misaligned = || AlignmentError::SplitterMisaligned {
                sentence: i,
                text: target.to_string(),
            };
            // Se o acumulado já não é prefixo da sentença, nenhuma palavra a mais resolve
            if !target.starts_with(joined.trim()) {
                return Err(misaligned());
            }
            let word = words.get(cursor).ok_or_else(misaligned)?;
            joined.push_str(word);
            group.push(*word);
            cursor += 1;
        }
        groups.push(group);
    }

    if cursor < words.len() {
        return Err(AlignmentError::UncoveredWords {
            remaining: words.len() - cursor,
        });
    }
    Ok(groups)
}

/// Converte um índice global em `(grupo, índice local)`.
pub fn locate<T>(groups: &[Vec<T>], index: usize) -> Option<(usize, usize)> {
    let mut remaining = index;
    for (i, group) in groups.iter().enumerate() {
        if remaining < group.len() {
            return Some((i, remaining));
        }
        remaining -= group.len();
    }
    None
}

/// Localiza os verbos de uma linha usando um [`SentenceSplitter`].
pub struct VerbLocator<'s> {
    splitter: &'s dyn SentenceSplitter,
    verb_tag: String,
}

impl<'s> VerbLocator<'s> {
    pub fn new(splitter: &'s dyn SentenceSplitter, verb_tag: impl Into<String>) -> Self {
        Self {
            splitter,
            verb_tag: verb_tag.into(),
        }
    }

    /// Um resultado por token com a classe de verbo, na ordem da linha.
    pub fn locate_verbs(&self, tokens: &[Token]) -> Vec<Result<VerbHit, AlignmentError>> {
        let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();
        let paragraph = words.concat();
        let sentences = self.splitter.split(&paragraph);
        let groups = realign(&words, &sentences);

        tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.has_pos(&self.verb_tag))
            .map(|(index, token)| match &groups {
                Ok(groups) => hit_for(groups, index, &token.word),
                Err(err) => Err(err.clone()),
            })
            .collect()
    }
}

fn hit_for(groups: &[Vec<&str>], index: usize, verb: &str) -> Result<VerbHit, AlignmentError> {
    let (sentence_index, local) =
        locate(groups, index).ok_or(AlignmentError::IndexOutOfRange { index })?;
    let group = &groups[sentence_index];
    if group[local] != verb {
        return Err(AlignmentError::VerbMismatch {
            expected: verb.to_string(),
            found: group[local].to_string(),
        });
    }
    Ok(VerbHit {
        sentence_index,
        tokens: group.iter().map(|w| w.to_string()).collect(),
        verb: verb.to_string(),
        index: local,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::PunctuationSplitter;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_realign_partitions_words() {
        let words = ["我", "来", "了", "。", "你", "好", "。"];
        let groups = realign(&words, &["我来了。", "你好。"]).unwrap();
        assert_eq!(groups, vec![vec!["我", "来", "了", "。"], vec!["你", "好", "。"]]);
        assert_eq!(groups.concat(), words.to_vec());
    }

    #[test]
    fn test_realign_ignores_surrounding_whitespace() {
        let words = ["我", "来", "。", "你", "好"];
        let groups = realign(&words, &["我来。 ", " 你好"]).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1], vec!["你", "好"]);
    }

    #[test]
    fn test_realign_fails_when_boundary_cuts_a_word() {
        let words = ["北京大学", "好", "。"];
        let err = realign(&words, &["北京", "大学好。"]).unwrap_err();
        assert_eq!(
            err,
            AlignmentError::SplitterMisaligned {
                sentence: 0,
                text: "北京".to_string()
            }
        );
    }

    #[test]
    fn test_realign_reports_uncovered_words() {
        let words = ["好", "。", "再见"];
        let err = realign(&words, &["好。"]).unwrap_err();
        assert_eq!(err, AlignmentError::UncoveredWords { remaining: 1 });
    }

    #[test]
    fn test_locate_at_group_edges() {
        let groups = vec![vec!["a", "b"], vec![], vec!["c"], vec!["d", "e"]];
        assert_eq!(locate(&groups, 0), Some((0, 0)));
        assert_eq!(locate(&groups, 1), Some((0, 1)));
        // o grupo vazio nunca é escolhido
        assert_eq!(locate(&groups, 2), Some((2, 0)));
        assert_eq!(locate(&groups, 3), Some((3, 0)));
        assert_eq!(locate(&groups, 4), Some((3, 1)));
        assert_eq!(locate(&groups, 5), None);
    }

    #[test]
    fn test_locate_single_verb() {
        let splitter = PunctuationSplitter::new();
        let locator = VerbLocator::new(&splitter, "v");
        let tokens = tokenize("国务院  总理/n  今天/t  访问/v  了/u  法国/ns  。/w").unwrap();

        let hits = locator.locate_verbs(&tokens);
        assert_eq!(hits.len(), 1);
        let hit = hits[0].as_ref().unwrap();
        assert_eq!(hit.verb, "访问");
        assert_eq!(hit.index, 3);
        assert_eq!(hit.sentence_index, 0);
        assert_eq!(hit.tokens[hit.index], hit.verb);
    }

    #[test]
    fn test_verb_in_second_sentence_gets_local_index() {
        let splitter = PunctuationSplitter::new();
        let locator = VerbLocator::new(&splitter, "v");
        let tokens =
            tokenize("他/r  来/v  了/y  。/w  [北京/ns  大学/n]nt  欢迎/v  他/r  。/w").unwrap();

        let hits: Vec<VerbHit> = locator
            .locate_verbs(&tokens)
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(hits.len(), 2);
        assert_eq!((hits[0].sentence_index, hits[0].index), (0, 1));
        assert_eq!((hits[1].sentence_index, hits[1].index), (1, 2));
        assert_eq!(hits[1].tokens, vec!["北京", "大学", "欢迎", "他", "。"]);
        for hit in &hits {
            assert_eq!(hit.tokens[hit.index], hit.verb);
        }
    }

    #[test]
    fn test_misaligned_split_fails_every_verb() {
        struct CutWord;
        impl SentenceSplitter for CutWord {
            fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
                // corta depois do primeiro caractere, no meio de "访问"
                let cut = text.char_indices().nth(1).map(|(i, _)| i).unwrap_or(text.len());
                vec![&text[..cut], &text[cut..]]
            }
        }
        let locator = VerbLocator::new(&CutWord, "v");
        let tokens = tokenize("访问/v  了/u  说/v").unwrap();
        let hits = locator.locate_verbs(&tokens);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| matches!(
            h,
            Err(AlignmentError::SplitterMisaligned { sentence: 0, .. })
        )));
    }

    #[test]
    fn test_no_verbs_no_hits() {
        let splitter = PunctuationSplitter::new();
        let locator = VerbLocator::new(&splitter, "v");
        let tokens = tokenize("好/a  。/w").unwrap();
        assert!(locator.locate_verbs(&tokens).is_empty());
    }
}
