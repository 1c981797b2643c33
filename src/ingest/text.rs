use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read notes from a text/markdown file, or from stdin when the path is `-`
pub fn read_notes(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut notes = String::new();
        std::io::stdin()
            .read_to_string(&mut notes)
            .context("Failed to read notes from stdin")?;
        return Ok(normalize_line_endings(notes));
    }

    let notes = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read notes file: {:?}", path))?;
    Ok(normalize_line_endings(notes))
}

fn normalize_line_endings(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_notes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "Q: One?\r\nA: Two\r\n").unwrap();

        let notes = read_notes(&path).unwrap();
        assert_eq!(notes, "Q: One?\nA: Two\n");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_notes(&dir.path().join("nope.txt")).is_err());
    }
}
