//! CLDR plural category resolution.
//!
//! A number is decomposed into the CLDR plural operands and matched
//! against an ordered list of (category, predicate) rules for the active
//! locale. The first predicate that holds wins; every rule list is backed
//! by an implicit catch-all `other`, so resolution is total over all
//! representable magnitudes.
//!
//! Rule sets are plain data: callers may replace or extend the builtin
//! tables with their own predicates via [`PluralRuleSet::insert`].

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{FormatError, FormatResult};

/// CLDR plural categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// Keyword spelling used in `plural`/`selectordinal` case patterns.
    pub fn as_str(self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether cardinal or ordinal rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Cardinal,
    Ordinal,
}

/// CLDR plural operands extracted from a number's decimal form.
///
/// Following the CLDR definitions: `n` absolute value, `i` integer part,
/// `v` visible fraction digit count, `w` visible fraction digits without
/// trailing zeros, `f` fraction digits as an integer, `t` fraction digits
/// with trailing zeros removed, `c` decimal exponent of the original
/// notation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluralOperands {
    pub n: f64,
    pub i: u64,
    pub v: usize,
    pub w: usize,
    pub f: u64,
    pub t: u64,
    pub c: i32,
}

impl PluralOperands {
    pub fn from_i64(value: i64) -> Self {
        PluralOperands {
            n: value.unsigned_abs() as f64,
            i: value.unsigned_abs(),
            v: 0,
            w: 0,
            f: 0,
            t: 0,
            c: 0,
        }
    }

    pub fn from_f64(value: f64) -> FormatResult<Self> {
        if !value.is_finite() {
            return Err(FormatError::NotNumeric(value.to_string()));
        }
        Self::from_decimal_str(&value.to_string())
    }

    /// Decompose a decimal string, preserving its visible fraction digits
    /// (so `"1.50"` yields `v=2, w=1, f=50, t=5`).
    pub fn from_decimal_str(text: &str) -> FormatResult<Self> {
        let s = text.trim();
        let err = || FormatError::NotNumeric(text.to_string());

        let unsigned = s
            .strip_prefix('-')
            .or_else(|| s.strip_prefix('+'))
            .unwrap_or(s);

        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(pos) => {
                let exp: i32 = unsigned[pos + 1..].parse().map_err(|_| err())?;
                (&unsigned[..pos], exp)
            }
            None => (unsigned, 0),
        };

        let (int_text, frac_text) = match mantissa.find('.') {
            Some(pos) => (&mantissa[..pos], &mantissa[pos + 1..]),
            None => (mantissa, ""),
        };
        if int_text.is_empty() && frac_text.is_empty() {
            return Err(err());
        }
        if !int_text.bytes().all(|b| b.is_ascii_digit())
            || !frac_text.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }

        // Apply the exponent to get the visible digit layout, then read
        // the operands off that layout.
        let mut int_digits: Vec<u8> = int_text.bytes().map(|b| b - b'0').collect();
        let mut frac_digits: Vec<u8> = frac_text.bytes().map(|b| b - b'0').collect();
        if exponent >= 0 {
            for _ in 0..exponent {
                let d = if frac_digits.is_empty() {
                    0
                } else {
                    frac_digits.remove(0)
                };
                int_digits.push(d);
            }
        } else {
            for _ in 0..(-exponent) {
                let d = int_digits.pop().unwrap_or(0);
                frac_digits.insert(0, d);
            }
        }

        let i = int_digits
            .iter()
            .fold(0u64, |acc, &d| acc.saturating_mul(10).saturating_add(d as u64));
        let v = frac_digits.len();
        let f = frac_digits
            .iter()
            .fold(0u64, |acc, &d| acc.saturating_mul(10).saturating_add(d as u64));
        let trimmed: Vec<u8> = {
            let mut digits = frac_digits.clone();
            while digits.last() == Some(&0) {
                digits.pop();
            }
            digits
        };
        let w = trimmed.len();
        let t = trimmed
            .iter()
            .fold(0u64, |acc, &d| acc.saturating_mul(10).saturating_add(d as u64));
        let n = unsigned.parse::<f64>().map_err(|_| err())?.abs();

        Ok(PluralOperands {
            n,
            i,
            v,
            w,
            f,
            t,
            c: exponent,
        })
    }
}

/// A boolean predicate over plural operands. Plain function pointers keep
/// rule sets `Clone + Send + Sync` without boxing.
pub type PluralPredicate = fn(&PluralOperands) -> bool;

/// Ordered (category, predicate) rule lists keyed by primary language
/// subtag and rule kind. Read-only once built; share freely across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct PluralRuleSet {
    rules: HashMap<(String, RuleKind), Vec<(PluralCategory, PluralPredicate)>>,
}

impl PluralRuleSet {
    pub fn new() -> Self {
        PluralRuleSet::default()
    }

    /// Register a rule list for a language. Rules are evaluated in the
    /// order given; there is no need to include an `other` entry, the
    /// resolver supplies the catch-all.
    pub fn insert(
        &mut self,
        lang: &str,
        kind: RuleKind,
        rules: Vec<(PluralCategory, PluralPredicate)>,
    ) -> &mut Self {
        self.rules.insert((lang.to_lowercase(), kind), rules);
        self
    }

    /// Resolve the category for the given operands. Unknown locales and
    /// exhausted rule lists fall through to `other`.
    pub fn resolve(&self, locale: &str, kind: RuleKind, operands: &PluralOperands) -> PluralCategory {
        let lang = primary_subtag(locale);
        if let Some(rules) = self.rules.get(&(lang, kind)) {
            for (category, predicate) in rules {
                if predicate(operands) {
                    return *category;
                }
            }
        }
        PluralCategory::Other
    }

    /// The builtin rule tables, initialized once and shared.
    pub fn builtin() -> &'static PluralRuleSet {
        static BUILTIN: OnceLock<PluralRuleSet> = OnceLock::new();
        BUILTIN.get_or_init(build_builtin_rules)
    }
}

/// Lowercased primary language subtag: `"pt-BR"` -> `"pt"`.
fn primary_subtag(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_lowercase()
}

// ---------------------------------------------------------------------
// Builtin CLDR rules, by language family
// ---------------------------------------------------------------------

fn one_i1_v0(op: &PluralOperands) -> bool {
    op.i == 1 && op.v == 0
}

fn one_n1(op: &PluralOperands) -> bool {
    op.n == 1.0
}

fn one_i01(op: &PluralOperands) -> bool {
    op.i == 0 || op.i == 1
}

fn slavic_one(op: &PluralOperands) -> bool {
    op.v == 0 && op.i % 10 == 1 && op.i % 100 != 11
}

fn slavic_few(op: &PluralOperands) -> bool {
    op.v == 0 && (2..=4).contains(&(op.i % 10)) && !(12..=14).contains(&(op.i % 100))
}

fn slavic_many(op: &PluralOperands) -> bool {
    op.v == 0
        && (op.i % 10 == 0 || (5..=9).contains(&(op.i % 10)) || (11..=14).contains(&(op.i % 100)))
}

fn polish_many(op: &PluralOperands) -> bool {
    op.v == 0 && op.i != 1 && !slavic_few(op)
}

fn czech_few(op: &PluralOperands) -> bool {
    (2..=4).contains(&op.i) && op.v == 0
}

fn czech_many(op: &PluralOperands) -> bool {
    op.v != 0
}

fn romanian_few(op: &PluralOperands) -> bool {
    op.v != 0 || op.n == 0.0 || (2..=19).contains(&(op.i % 100))
}

fn arabic_zero(op: &PluralOperands) -> bool {
    op.n == 0.0
}

fn arabic_two(op: &PluralOperands) -> bool {
    op.n == 2.0
}

fn arabic_few(op: &PluralOperands) -> bool {
    op.w == 0 && (3..=10).contains(&(op.i % 100))
}

fn arabic_many(op: &PluralOperands) -> bool {
    op.w == 0 && (11..=99).contains(&(op.i % 100))
}

fn hebrew_two(op: &PluralOperands) -> bool {
    op.i == 2 && op.v == 0
}

fn ordinal_en_one(op: &PluralOperands) -> bool {
    op.i % 10 == 1 && op.i % 100 != 11
}

fn ordinal_en_two(op: &PluralOperands) -> bool {
    op.i % 10 == 2 && op.i % 100 != 12
}

fn ordinal_en_few(op: &PluralOperands) -> bool {
    op.i % 10 == 3 && op.i % 100 != 13
}

fn ordinal_sv_one(op: &PluralOperands) -> bool {
    matches!(op.i % 10, 1 | 2) && !matches!(op.i % 100, 11 | 12)
}

fn build_builtin_rules() -> PluralRuleSet {
    let mut set = PluralRuleSet::new();

    // Germanic and friends: singular only for exact integer 1.
    for lang in [
        "en", "de", "nl", "sv", "da", "no", "nb", "nn", "et", "fi", "el", "it", "ca",
    ] {
        set.insert(
            lang,
            RuleKind::Cardinal,
            vec![(PluralCategory::One, one_i1_v0)],
        );
    }

    // n == 1 languages (fractions are "other").
    for lang in ["es", "hu", "tr", "bg", "az"] {
        set.insert(lang, RuleKind::Cardinal, vec![(PluralCategory::One, one_n1)]);
    }

    // 0 and 1 are both singular.
    for lang in ["fr", "pt", "hi"] {
        set.insert(
            lang,
            RuleKind::Cardinal,
            vec![(PluralCategory::One, one_i01)],
        );
    }

    // East Slavic three-way split.
    for lang in ["ru", "uk", "be"] {
        set.insert(
            lang,
            RuleKind::Cardinal,
            vec![
                (PluralCategory::One, slavic_one),
                (PluralCategory::Few, slavic_few),
                (PluralCategory::Many, slavic_many),
            ],
        );
    }

    set.insert(
        "pl",
        RuleKind::Cardinal,
        vec![
            (PluralCategory::One, one_i1_v0),
            (PluralCategory::Few, slavic_few),
            (PluralCategory::Many, polish_many),
        ],
    );

    for lang in ["cs", "sk"] {
        set.insert(
            lang,
            RuleKind::Cardinal,
            vec![
                (PluralCategory::One, one_i1_v0),
                (PluralCategory::Few, czech_few),
                (PluralCategory::Many, czech_many),
            ],
        );
    }

    set.insert(
        "ro",
        RuleKind::Cardinal,
        vec![
            (PluralCategory::One, one_i1_v0),
            (PluralCategory::Few, romanian_few),
        ],
    );

    set.insert(
        "ar",
        RuleKind::Cardinal,
        vec![
            (PluralCategory::Zero, arabic_zero),
            (PluralCategory::One, one_n1),
            (PluralCategory::Two, arabic_two),
            (PluralCategory::Few, arabic_few),
            (PluralCategory::Many, arabic_many),
        ],
    );

    set.insert(
        "he",
        RuleKind::Cardinal,
        vec![
            (PluralCategory::One, one_i1_v0),
            (PluralCategory::Two, hebrew_two),
        ],
    );

    // No plural distinction: ja, zh, ko, th, vi, id, ms resolve to the
    // implicit "other" by having no entry.

    set.insert(
        "en",
        RuleKind::Ordinal,
        vec![
            (PluralCategory::One, ordinal_en_one),
            (PluralCategory::Two, ordinal_en_two),
            (PluralCategory::Few, ordinal_en_few),
        ],
    );
    set.insert(
        "sv",
        RuleKind::Ordinal,
        vec![(PluralCategory::One, ordinal_sv_one)],
    );
    set.insert(
        "fr",
        RuleKind::Ordinal,
        vec![(PluralCategory::One, one_n1)],
    );

    set
}
