// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::{ScanError, ScanResult};

/// Load a wordlist: one entry per line, UTF-8, blank lines and `#` comments
/// skipped. A read failure is fatal to the scan.
pub fn load_wordlist(path: &Path) -> ScanResult<Vec<String>> {
    let file = File::open(path).map_err(|source| ScanError::Wordlist {
        path: path.to_path_buf(),
        source,
    })?;

    let mut words = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| ScanError::Wordlist {
            path: path.to_path_buf(),
            source,
        })?;
        let word = line.trim();
        if !word.is_empty() && !word.starts_with('#') {
            words.push(word.to_string());
        }
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_wordlist_skips_blanks_and_comments() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "admin").unwrap();
        writeln!(file, "# backup candidates").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  config  ").unwrap();
        writeln!(file, "uploads").unwrap();

        let words = load_wordlist(file.path()).unwrap();
        assert_eq!(
            words,
            vec![
                "admin".to_string(),
                "config".to_string(),
                "uploads".to_string()
            ]
        );
    }

    #[test]
    fn test_load_wordlist_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let words = load_wordlist(file.path()).unwrap();
        assert!(words.is_empty());
    }

    #[test]
    fn test_load_wordlist_missing_file() {
        let result = load_wordlist(Path::new("/nonexistent/wordlist.txt"));
        assert!(matches!(result, Err(ScanError::Wordlist { .. })));
    }
}
