//! JSON loaders for message catalogs and currency tables.
//!
//! Message files are flat JSON objects mapping message keys to template
//! strings, one file per locale, named `<locale>.json`. A `@metadata`
//! entry (authorship, comments) is skipped. Non-string entries are
//! warned about and dropped rather than failing the whole file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value as JsonValue;

use crate::catalog::MessageMap;
use crate::error::{FormatError, FormatResult};
use crate::tables::CurrencyTable;

/// Load one locale's messages. The locale code is the file stem.
pub fn load_messages_from_file(path: &Path) -> FormatResult<(String, MessageMap)> {
    let locale = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| {
            FormatError::DataLoad(format!("cannot derive a locale from {}", path.display()))
        })?
        .to_string();

    let content = fs::read_to_string(path)
        .map_err(|e| FormatError::DataLoad(format!("{}: {}", path.display(), e)))?;
    let parsed: HashMap<String, JsonValue> = serde_json::from_str(&content)
        .map_err(|e| FormatError::DataLoad(format!("{}: {}", path.display(), e)))?;

    let mut messages = MessageMap::new();
    for (key, value) in parsed {
        if key == "@metadata" {
            continue;
        }
        match value {
            JsonValue::String(template) => {
                messages.insert(key, template);
            }
            other => {
                eprintln!(
                    "Skipping non-string message {:?} in {}: {}",
                    key,
                    path.display(),
                    other
                );
            }
        }
    }
    Ok((locale, messages))
}

/// Load every `*.json` message file in a directory, keyed by locale.
/// Unreadable files are warned about and skipped.
pub fn load_messages_from_dir(dir: &Path) -> FormatResult<HashMap<String, MessageMap>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| FormatError::DataLoad(format!("{}: {}", dir.display(), e)))?;

    let mut catalogs = HashMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| FormatError::DataLoad(e.to_string()))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        match load_messages_from_file(&path) {
            Ok((locale, messages)) => {
                catalogs.insert(locale, messages);
            }
            Err(e) => {
                eprintln!("Skipping message file {}: {}", path.display(), e);
            }
        }
    }
    Ok(catalogs)
}

/// Load a currency table from a JSON object of
/// `{"CODE": {"symbol": "...", "fraction_digits": N}}` entries.
pub fn load_currency_table_from_file(path: &Path) -> FormatResult<CurrencyTable> {
    let content = fs::read_to_string(path)
        .map_err(|e| FormatError::DataLoad(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| FormatError::DataLoad(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("plantain-mf-loader-tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_messages_skips_metadata() {
        let path = write_temp(
            "en.json",
            r#"{"@metadata": {"authors": ["x"]}, "hello": "Hello {name}!"}"#,
        );
        let (locale, messages) = load_messages_from_file(&path).unwrap();
        assert_eq!(locale, "en");
        assert_eq!(messages.get("hello").unwrap(), "Hello {name}!");
        assert!(!messages.contains_key("@metadata"));
    }

    #[test]
    fn test_load_messages_missing_file() {
        let result = load_messages_from_file(Path::new("/no/such/file.json"));
        assert!(matches!(result, Err(FormatError::DataLoad(_))));
    }

    #[test]
    fn test_load_currency_table() {
        let path = write_temp(
            "currencies.json",
            r#"{"USD": {"symbol": "$", "fraction_digits": 2},
                "JPY": {"symbol": "¥", "fraction_digits": 0}}"#,
        );
        let table = load_currency_table_from_file(&path).unwrap();
        assert_eq!(table.lookup("JPY").fraction_digits, 0);
        assert_eq!(table.lookup("USD").symbol, "$");
    }
}
