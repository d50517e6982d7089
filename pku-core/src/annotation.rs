//! # Preenchimento das Anotações
//!
//! O dataset de polaridade verbal é distribuído apenas com chaves e rótulos;
//! o texto vem do corpus PKU, que não pode ser redistribuído. Este módulo junta
//! as duas partes.
//!
//! ## Layout de Diretórios
//!
//! ```text
//! <raiz>/
//! ├── economia/
//! │   ├── economia.json        ← [{"key": "...", "label": ...}, ...]
//! │   └── economia.fill.json   ← gerado: um objeto JSON por linha
//! └── politica/
//!     └── ...
//! ```
//!
//! Uma chave ausente no corpus é erro fatal: o arquivo de saída daquele
//! diretório não é escrito.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use serde_json::Value;
use tracing::{info, warn};

use crate::corpus::{Corpus, SentenceRecord};
use crate::error::FillError;

/// Extensão do arquivo gerado, no lugar de `.json`.
pub const FILL_SUFFIX: &str = "fill.json";

/// Entrada do arquivo de anotação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationEntry {
    pub key: String,
    /// O rótulo é copiado como está, seja string, número ou objeto.
    pub label: Value,
}

/// Registro do corpus com o rótulo anexado. A ordem dos campos é a da saída.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRecord {
    pub key: String,
    pub tokens: Vec<String>,
    pub verb: String,
    pub token_index: Vec<usize>,
    pub label: Value,
}

impl AnnotatedRecord {
    pub fn new(record: &SentenceRecord, label: Value) -> Self {
        Self {
            key: record.key.clone(),
            tokens: record.tokens.clone(),
            verb: record.verb.clone(),
            token_index: record.token_index.clone(),
            label,
        }
    }
}

/// Resumo de uma execução do preenchimento.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillSummary {
    pub files: usize,
    pub records: usize,
}

/// Caminhos `<raiz>/<nome>/<nome>.json` e `<raiz>/<nome>/<nome>.fill.json`.
pub fn annotation_paths(root: &Path, name: &str) -> (PathBuf, PathBuf) {
    let dir = root.join(name);
    let input = dir.join(format!("{}.json", name));
    let output = dir.join(format!("{}.{}", name, FILL_SUFFIX));
    (input, output)
}

/// Preenche todos os subdiretórios de `root`, em ordem alfabética.
pub fn fill_annotations(corpus: &Corpus, root: &Path) -> Result<FillSummary, FillError> {
    let io_err = |source| FillError::Io {
        path: root.to_path_buf(),
        source,
    };
    let mut names = Vec::new();
    for entry in fs::read_dir(root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !entry.file_type().map_err(io_err)?.is_dir() {
            warn!("ignorando {} (não é diretório)", entry.path().display());
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    let mut summary = FillSummary::default();
    for name in &names {
        let (input, output) = annotation_paths(root, name);
        let count = fill_file(corpus, &input, &output)?;
        info!("✅ {}: {} registros preenchidos", name, count);
        summary.files += 1;
        summary.records += count;
    }
    Ok(summary)
}

/// Preenche um único arquivo de anotação. Devolve quantos registros foram escritos.
pub fn fill_file(corpus: &Corpus, input: &Path, output: &Path) -> Result<usize, FillError> {
    let content = fs::read_to_string(input).map_err(|source| FillError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    let entries: Vec<AnnotationEntry> =
        serde_json::from_str(&content).map_err(|source| FillError::Json {
            path: input.to_path_buf(),
            source,
        })?;

    let records = entries
        .into_iter()
        .map(|entry| {
            let record = corpus.get(&entry.key).ok_or_else(|| FillError::MissingKey {
                key: entry.key.clone(),
                path: input.to_path_buf(),
            })?;
            Ok(AnnotatedRecord::new(record, entry.label))
        })
        .collect::<Result<Vec<_>, FillError>>()?;

    let out_err = |source| FillError::Io {
        path: output.to_path_buf(),
        source,
    };
    let file = File::create(output).map_err(out_err)?;
    let mut writer = BufWriter::new(file);
    write_ndjson(&mut writer, &records).map_err(out_err)?;
    writer.flush().map_err(out_err)?;
    Ok(records.len())
}

/// Escreve um objeto JSON por linha, sem escapar caracteres não-ASCII.
pub fn write_ndjson<W: Write, T: Serialize>(writer: &mut W, records: &[T]) -> io::Result<()> {
    for record in records {
        let mut ser = serde_json::Serializer::with_formatter(&mut *writer, SpacedFormatter);
        record.serialize(&mut ser).map_err(io::Error::from)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Formato compacto, mas com `", "` entre elementos e `": "` entre chave e valor.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(key: &str) -> SentenceRecord {
        SentenceRecord {
            key: key.to_string(),
            tokens: vec!["他".to_string(), "来".to_string(), "了".to_string(), "。".to_string()],
            verb: "来".to_string(),
            token_index: vec![1],
            sentence_key: format!("{}-0", key),
        }
    }

    fn corpus_with(keys: &[&str]) -> Corpus {
        let records: HashMap<String, SentenceRecord> =
            keys.iter().map(|k| (k.to_string(), record(k))).collect();
        Corpus {
            records,
            ..Corpus::default()
        }
    }

    fn write_annotations(root: &Path, name: &str, json: &str) {
        fs::create_dir_all(root.join(name)).unwrap();
        let (input, _) = annotation_paths(root, name);
        fs::write(input, json).unwrap();
    }

    #[test]
    fn test_ndjson_line_format() {
        let annotated = AnnotatedRecord::new(&record("k-0"), Value::from(1));
        let mut out = Vec::new();
        write_ndjson(&mut out, &[annotated]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"key\": \"k-0\", \"tokens\": [\"他\", \"来\", \"了\", \"。\"], \"verb\": \"来\", \"token_index\": [1], \"label\": 1}\n"
        );
    }

    #[test]
    fn test_fill_annotations_writes_every_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let corpus = corpus_with(&["19980101-01-002-003-0", "19980101-01-002-003-1"]);

        write_annotations(
            root,
            "b",
            r#"[{"key": "19980101-01-002-003-1", "label": "positive"}]"#,
        );
        write_annotations(
            root,
            "a",
            r#"[{"key": "19980101-01-002-003-0", "label": 0},
                {"key": "19980101-01-002-003-1", "label": 2}]"#,
        );
        fs::write(root.join("LEIA-ME.txt"), "ignorado").unwrap();

        let summary = fill_annotations(&corpus, root).unwrap();
        assert_eq!(summary, FillSummary { files: 2, records: 3 });

        let (_, output) = annotation_paths(root, "a");
        let lines: Vec<AnnotatedRecord> = fs::read_to_string(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].key, "19980101-01-002-003-0");
        assert_eq!(lines[0].label, Value::from(0));
        assert_eq!(lines[1].label, Value::from(2));
        assert_eq!(lines[1].tokens[lines[1].token_index[0]], lines[1].verb);
    }

    #[test]
    fn test_missing_key_is_fatal_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write_annotations(root, "a", r#"[{"key": "não-existe", "label": 1}]"#);

        let err = fill_annotations(&corpus_with(&["k-0"]), root).unwrap_err();
        match err {
            FillError::MissingKey { key, .. } => assert_eq!(key, "não-existe"),
            other => panic!("esperava MissingKey, veio {:?}", other),
        }
        let (_, output) = annotation_paths(root, "a");
        assert!(!output.exists());
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_annotations(dir.path(), "a", "[{\"key\": ");
        let err = fill_annotations(&corpus_with(&[]), dir.path()).unwrap_err();
        assert!(matches!(err, FillError::Json { .. }));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let err = fill_annotations(&corpus_with(&[]), Path::new("/não/existe")).unwrap_err();
        assert!(matches!(err, FillError::Io { .. }));
    }

    #[test]
    fn test_directory_without_annotation_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("vazio")).unwrap();
        let err = fill_annotations(&corpus_with(&[]), dir.path()).unwrap_err();
        assert!(matches!(err, FillError::Io { .. }));
    }
}
