//! Keyed message storage with locale fallback.

use std::collections::HashMap;

use crate::error::FormatResult;
use crate::value::Args;
use crate::MessageFormatter;

/// Message key to template text for one locale.
pub type MessageMap = HashMap<String, String>;

/// Templates for several locales plus a formatter for the active one.
///
/// Lookup falls back from the active locale to the fallback locale; a key
/// missing from both renders as the key itself, so untranslated text is
/// visible rather than silently empty.
pub struct MessageCatalog {
    locale: String,
    fallback_locale: String,
    messages: HashMap<String, MessageMap>,
    formatter: MessageFormatter,
}

impl MessageCatalog {
    pub fn new(locale: &str) -> Self {
        MessageCatalog {
            locale: locale.to_string(),
            fallback_locale: "en".to_string(),
            messages: HashMap::new(),
            formatter: MessageFormatter::new(locale),
        }
    }

    /// Switch the active locale; the formatter is rebuilt with that
    /// locale's separator data.
    pub fn set_locale(&mut self, locale: &str) -> &mut Self {
        self.locale = locale.to_string();
        self.formatter = MessageFormatter::new(locale);
        self
    }

    pub fn set_fallback_locale(&mut self, locale: &str) -> &mut Self {
        self.fallback_locale = locale.to_string();
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn formatter(&self) -> &MessageFormatter {
        &self.formatter
    }

    pub fn add_message(&mut self, locale: &str, key: &str, template: &str) -> &mut Self {
        self.messages
            .entry(locale.to_string())
            .or_default()
            .insert(key.to_string(), template.to_string());
        self
    }

    pub fn add_messages(&mut self, locale: &str, messages: MessageMap) -> &mut Self {
        self.messages
            .entry(locale.to_string())
            .or_default()
            .extend(messages);
        self
    }

    /// Template text for `key` in the active locale, with fallback.
    pub fn message(&self, key: &str) -> Option<&str> {
        self.messages
            .get(&self.locale)
            .and_then(|map| map.get(key))
            .or_else(|| {
                self.messages
                    .get(&self.fallback_locale)
                    .and_then(|map| map.get(key))
            })
            .map(String::as_str)
    }

    /// Look up `key` and format it against `args`.
    pub fn localize(&self, key: &str, args: &Args) -> FormatResult<String> {
        match self.message(key) {
            Some(template) => self.formatter.format(template, args),
            None => Ok(key.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_fallback() {
        let mut catalog = MessageCatalog::new("fr");
        catalog
            .add_message("en", "greeting", "Hello {name}!")
            .add_message("fr", "greeting", "Bonjour {name}!")
            .add_message("en", "only-english", "English only");
        assert_eq!(catalog.message("greeting"), Some("Bonjour {name}!"));
        assert_eq!(catalog.message("only-english"), Some("English only"));
        assert_eq!(catalog.message("missing"), None);
    }

    #[test]
    fn test_localize() {
        let mut catalog = MessageCatalog::new("en");
        catalog.add_message("en", "items", "{n, plural, one{# item} other{# items}}");
        let mut args = Args::new();
        args.set("n", 2);
        assert_eq!(catalog.localize("items", &args).unwrap(), "2 items");
    }

    #[test]
    fn test_missing_key_renders_key() {
        let catalog = MessageCatalog::new("en");
        assert_eq!(
            catalog.localize("no-such-key", &Args::new()).unwrap(),
            "no-such-key"
        );
    }

    #[test]
    fn test_set_locale_switches_messages() {
        let mut catalog = MessageCatalog::new("en");
        catalog
            .add_message("en", "lang", "English")
            .add_message("de", "lang", "Deutsch");
        assert_eq!(catalog.localize("lang", &Args::new()).unwrap(), "English");
        catalog.set_locale("de");
        assert_eq!(catalog.localize("lang", &Args::new()).unwrap(), "Deutsch");
    }
}
