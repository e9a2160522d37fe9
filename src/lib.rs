//! plantain-mf is a small interpreter for a practical subset of the ICU
//! MessageFormat grammar: parameterized, locale-sensitive text templates
//! with nested placeholders, CLDR plural and ordinal categories, select
//! branching, and an ICU number-skeleton mini-language for digits,
//! grouping, sign, and currency rendering. It carries its own locale data
//! tables and depends on no platform-supplied formatter.
//!
//! ```
//! use plantain_mf::{Args, MessageFormatter};
//!
//! let formatter = MessageFormatter::new("en");
//! let mut args = Args::new();
//! args.set("count", 1);
//! let out = formatter
//!     .format("You have {count, plural, one{# item} other{# items}}", &args)
//!     .unwrap();
//! assert_eq!(out, "You have 1 item");
//! ```

mod catalog;
mod decimal;
mod dispatch;
mod error;
mod escape;
mod loader;
mod plural;
mod scanner;
mod skeleton;
mod tables;
mod value;

pub use catalog::{MessageCatalog, MessageMap};
pub use decimal::{DecimalQuantity, RoundingMode};
pub use error::{FormatError, FormatResult};
pub use loader::{load_currency_table_from_file, load_messages_from_dir, load_messages_from_file};
pub use plural::{PluralCategory, PluralOperands, PluralPredicate, PluralRuleSet, RuleKind};
pub use scanner::{segments, split_placeholder, Segment, Segments};
pub use skeleton::Skeleton;
pub use tables::{CurrencyInfo, CurrencyTable, Separators};
pub use value::{Args, Value};

use std::sync::Arc;

/// Renders calendar dates and clock times. The engine does no calendar
/// arithmetic itself; `date`/`time` placeholders delegate here.
pub trait TimeFormatter: Send + Sync {
    /// Format `seconds` since the Unix epoch in the given style
    /// (`full`, `long`, `medium`, or `short`).
    fn format_time(&self, seconds: i64, style: &str) -> String;
}

/// A reusable template formatter for one locale.
///
/// The formatter is read-only after configuration and safe to share
/// across threads. One [`format`](MessageFormatter::format) call is a
/// pure transformation: template plus arguments in, rendered string out.
pub struct MessageFormatter {
    pub(crate) locale: String,
    pub(crate) rules: PluralRuleSet,
    pub(crate) currencies: CurrencyTable,
    pub(crate) separators: Separators,
    pub(crate) time_formatter: Option<Arc<dyn TimeFormatter>>,
    pub(crate) max_depth: usize,
}

const DEFAULT_MAX_DEPTH: usize = 32;

impl MessageFormatter {
    /// A formatter with the builtin plural rules, currency table, and
    /// separator data for `locale`.
    pub fn new(locale: &str) -> Self {
        MessageFormatter {
            locale: locale.to_string(),
            rules: PluralRuleSet::builtin().clone(),
            currencies: CurrencyTable::builtin(),
            separators: Separators::for_locale(locale),
            time_formatter: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the plural rule set.
    pub fn with_rules(&mut self, rules: PluralRuleSet) -> &mut Self {
        self.rules = rules;
        self
    }

    /// Replace the currency table.
    pub fn with_currencies(&mut self, currencies: CurrencyTable) -> &mut Self {
        self.currencies = currencies;
        self
    }

    /// Replace the decimal/grouping separator pair.
    pub fn with_separators(&mut self, separators: Separators) -> &mut Self {
        self.separators = separators;
        self
    }

    /// Install a delegate for `date` and `time` placeholders. Without
    /// one, time values render as their raw numeric form.
    pub fn with_time_formatter(&mut self, delegate: Arc<dyn TimeFormatter>) -> &mut Self {
        self.time_formatter = Some(delegate);
        self
    }

    /// Bound on sub-message nesting depth; exceeding it is an error.
    pub fn with_max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.max_depth = max_depth;
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Render a template against the given arguments.
    ///
    /// Parse errors (unbalanced braces) and non-numeric inputs to
    /// numeric placeholders are reported; missing arguments and
    /// unmatched plural/select cases contribute empty text instead.
    pub fn format(&self, template: &str, args: &Args) -> FormatResult<String> {
        let rendered = dispatch::format_message(self, template, args, 0, None)?;
        Ok(escape::restore(&rendered))
    }
}

#[cfg(test)]
mod integration_tests;
