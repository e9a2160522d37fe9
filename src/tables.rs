//! Locale separator data and the currency symbol/precision table.
//!
//! Numbers are first rendered with canonical `.` and `,` separators, then
//! localized by substituting the locale's own characters. The tables here
//! cover a practical set of locales and currencies; both can be replaced
//! or extended at runtime (currencies also from JSON, see the loader).

use std::collections::HashMap;

use serde::Deserialize;

/// Decimal and grouping separator characters for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Separators {
    pub decimal: char,
    pub group: char,
}

impl Separators {
    /// Canonical separators used during rendering, before localization.
    pub fn canonical() -> Self {
        Separators {
            decimal: '.',
            group: ',',
        }
    }

    /// Separator pair for a locale, by primary language subtag. Unknown
    /// locales get the canonical pair.
    pub fn for_locale(locale: &str) -> Self {
        let lang = locale
            .split(['-', '_'])
            .next()
            .unwrap_or(locale)
            .to_lowercase();
        match lang.as_str() {
            // comma decimal, dot group
            "de" | "es" | "it" | "pt" | "nl" | "tr" | "id" | "da" | "el" | "ro" => Separators {
                decimal: ',',
                group: '.',
            },
            // comma decimal, narrow no-break space group
            "fr" | "ru" | "uk" | "be" | "pl" | "cs" | "sk" | "sv" | "fi" | "nb" | "nn" | "no"
            | "et" | "hu" | "bg" => Separators {
                decimal: ',',
                group: '\u{202F}',
            },
            _ => Separators::canonical(),
        }
    }
}

impl Default for Separators {
    fn default() -> Self {
        Separators::canonical()
    }
}

/// Display symbol and default fraction digit count for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrencyInfo {
    pub symbol: String,
    pub fraction_digits: usize,
}

impl CurrencyInfo {
    pub fn new(symbol: &str, fraction_digits: usize) -> Self {
        CurrencyInfo {
            symbol: symbol.to_string(),
            fraction_digits,
        }
    }
}

/// ISO code to currency info mapping. The `DEFAULT` entry backs unknown
/// codes; if even that is missing, lookups fall back to the generic `¤`
/// symbol with two fraction digits.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct CurrencyTable {
    entries: HashMap<String, CurrencyInfo>,
}

impl CurrencyTable {
    pub fn new() -> Self {
        CurrencyTable::default()
    }

    /// The builtin table of common currencies.
    pub fn builtin() -> Self {
        let mut table = CurrencyTable::new();
        table
            .insert("USD", CurrencyInfo::new("US$", 2))
            .insert("EUR", CurrencyInfo::new("€", 2))
            .insert("GBP", CurrencyInfo::new("£", 2))
            .insert("JPY", CurrencyInfo::new("¥", 0))
            .insert("INR", CurrencyInfo::new("₹", 2))
            .insert("CNY", CurrencyInfo::new("CN¥", 2))
            .insert("KRW", CurrencyInfo::new("₩", 0))
            .insert("CHF", CurrencyInfo::new("CHF", 2))
            .insert("BHD", CurrencyInfo::new("BD", 3))
            .insert("DEFAULT", CurrencyInfo::new("¤", 2));
        table
    }

    pub fn insert(&mut self, code: &str, info: CurrencyInfo) -> &mut Self {
        self.entries.insert(code.to_uppercase(), info);
        self
    }

    /// Look up a currency code, falling back to the table's `DEFAULT`
    /// entry and then to the generic currency sign.
    pub fn lookup(&self, code: &str) -> CurrencyInfo {
        self.entries
            .get(&code.to_uppercase())
            .or_else(|| self.entries.get("DEFAULT"))
            .cloned()
            .unwrap_or_else(|| CurrencyInfo::new("¤", 2))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_for_locale() {
        assert_eq!(Separators::for_locale("en-US"), Separators::canonical());
        assert_eq!(
            Separators::for_locale("de"),
            Separators {
                decimal: ',',
                group: '.'
            }
        );
        assert_eq!(
            Separators::for_locale("fr-FR"),
            Separators {
                decimal: ',',
                group: '\u{202F}'
            }
        );
        assert_eq!(Separators::for_locale("zz"), Separators::canonical());
    }

    #[test]
    fn test_currency_lookup() {
        let table = CurrencyTable::builtin();
        assert_eq!(table.lookup("usd").symbol, "US$");
        assert_eq!(table.lookup("JPY").fraction_digits, 0);
        assert_eq!(table.lookup("BHD").fraction_digits, 3);
    }

    #[test]
    fn test_unknown_currency_uses_default_entry() {
        let table = CurrencyTable::builtin();
        let info = table.lookup("XYZ");
        assert_eq!(info.symbol, "¤");
        assert_eq!(info.fraction_digits, 2);
    }

    #[test]
    fn test_empty_table_falls_back_to_generic_sign() {
        let table = CurrencyTable::new();
        let info = table.lookup("USD");
        assert_eq!(info.symbol, "¤");
        assert_eq!(info.fraction_digits, 2);
    }

    #[test]
    fn test_currency_table_from_json() {
        let json = r#"{"USD": {"symbol": "$", "fraction_digits": 2}}"#;
        let table: CurrencyTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.lookup("USD").symbol, "$");
    }
}
