use crate::error::FormatError;
use crate::models::Word;
use std::fs;
use std::path::{Path, PathBuf};

const WORD_LIST_EXTENSIONS: [&str; 2] = ["tsv", "txt"];

/// Word list files (`.tsv`, `.txt`) in `dir`, sorted by path.
pub fn word_list_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            let path = entry.path();
            if let Some(ext) = path.extension().and_then(|e| e.to_str())
                && WORD_LIST_EXTENSIONS.contains(&ext)
            {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

pub fn load_word_list(path: &Path) -> Result<Vec<Word>, FormatError> {
    let content = fs::read_to_string(path)?;
    parse_word_list(&content)
}

/// Parses rows of `english<TAB>korean` as copied from two spreadsheet columns.
///
/// Rows are numbered `word-0`, `word-1`, ... in input order. Any row with an
/// empty column rejects the whole batch.
pub fn parse_word_list(text: &str) -> Result<Vec<Word>, FormatError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FormatError::Empty);
    }

    text.split('\n')
        .enumerate()
        .map(|(index, row)| {
            let row = row.strip_suffix('\r').unwrap_or(row);
            match parse_row(row) {
                Some((english, korean)) => Ok(Word::new(index, english, korean)),
                None => Err(FormatError::MissingColumn { row: index + 1 }),
            }
        })
        .collect()
}

/// Splits a row on its first tab. `None` when either trimmed side is empty.
pub fn parse_row(row: &str) -> Option<(&str, &str)> {
    let (english, korean) = row.split_once('\t')?;
    let (english, korean) = (english.trim(), korean.trim());
    if english.is_empty() || korean.is_empty() {
        return None;
    }
    Some((english, korean))
}
