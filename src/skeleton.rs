//! Number skeleton interpreter.
//!
//! A skeleton is a whitespace-separated list of instruction tokens such as
//! `"precision-integer group-off sign-always"` or `"currency/USD"` that
//! describes how to format a number. Tokens are collected into a
//! [`Skeleton`] and then applied in a fixed pipeline order (rounding mode,
//! sign, magnitude transforms, precision, integer width, grouping,
//! percent/currency wrapping), so the textual order of tokens never
//! changes the output.
//!
//! Unknown stems and malformed option values are silently ignored:
//! skeleton grammars are versioned, and an unrecognized token from a newer
//! grammar must not break formatting of the rest.

use crate::decimal::{DecimalQuantity, RoundingMode};
use crate::tables::{CurrencyTable, Separators};

/// When to show an explicit sign, and how to mark negative numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignPolicy {
    /// Minus for negatives, nothing for the rest (the default)
    Auto,
    /// Explicit sign on everything, including zero
    Always,
    /// No sign ever; format the absolute value
    Never,
    /// Explicit sign except on zero
    ExceptZero,
    /// Negative currency amounts in parentheses
    Accounting,
    /// Accounting negatives plus a plus sign on positives
    AccountingAlways,
    /// Accounting negatives plus a plus sign on nonzero positives
    AccountingExceptZero,
}

impl SignPolicy {
    fn accounting(self) -> bool {
        matches!(
            self,
            SignPolicy::Accounting | SignPolicy::AccountingAlways | SignPolicy::AccountingExceptZero
        )
    }

    fn plus_on_positive(self, is_zero: bool) -> bool {
        match self {
            SignPolicy::Always | SignPolicy::AccountingAlways => true,
            SignPolicy::ExceptZero | SignPolicy::AccountingExceptZero => !is_zero,
            _ => false,
        }
    }
}

/// Digit precision request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// No precision token: currency digit count for currencies, otherwise
    /// up to six fraction digits
    Default,
    /// Decimal-point-anchored: `min` required and up to `max` visible
    /// fraction digits (`None` = unlimited)
    Fraction { min: usize, max: Option<usize> },
    /// Significant-digit-anchored, measured against the value's magnitude
    Significant { min: usize, max: Option<usize> },
    /// `precision-integer`: no fraction digits at all
    Integer,
}

/// Integer-part width control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerWidth {
    pub min: usize,
    pub truncate: bool,
}

impl Default for IntegerWidth {
    fn default() -> Self {
        IntegerWidth {
            min: 1,
            truncate: false,
        }
    }
}

/// Grouping separator strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Group every three integer digits (the default)
    Auto,
    /// No grouping separators
    Off,
    /// Group only when the integer part has five or more digits
    Min2,
    /// Same three-digit grouping as auto
    OnAligned,
    /// Same three-digit grouping as auto
    Thousands,
}

/// Unit wrapper applied after the digits are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    None,
    /// Multiply by 100, suffix `%`
    Percent,
    /// Multiply by 1000, suffix `‰`
    Permille,
    /// Currency symbol prefix and per-currency default precision
    Currency(String),
}

/// A fully collected skeleton instruction, ready to format numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    pub rounding: RoundingMode,
    pub sign: SignPolicy,
    pub scale: Option<f64>,
    pub precision: Precision,
    pub integer_width: IntegerWidth,
    pub grouping: Grouping,
    pub unit: Unit,
}

impl Default for Skeleton {
    fn default() -> Self {
        Skeleton {
            rounding: RoundingMode::HalfEven,
            sign: SignPolicy::Auto,
            scale: None,
            precision: Precision::Default,
            integer_width: IntegerWidth::default(),
            grouping: Grouping::Auto,
            unit: Unit::None,
        }
    }
}

impl Skeleton {
    /// Parse a skeleton instruction string. Never fails: unknown or
    /// malformed tokens are skipped and later tokens of the same category
    /// override earlier ones.
    pub fn parse(instruction: &str) -> Skeleton {
        let mut skeleton = Skeleton::default();
        for raw in instruction.split_whitespace() {
            let token = normalize_shorthand(raw);
            let (stem, options) = match token.find('/') {
                Some(pos) => (&token[..pos], &token[pos + 1..]),
                None => (token.as_str(), ""),
            };
            skeleton.apply_token(stem, options);
        }
        skeleton
    }

    fn apply_token(&mut self, stem: &str, options: &str) {
        match stem {
            "rounding-mode-ceiling" => self.rounding = RoundingMode::Ceiling,
            "rounding-mode-floor" => self.rounding = RoundingMode::Floor,
            "rounding-mode-down" => self.rounding = RoundingMode::Down,
            "rounding-mode-up" => self.rounding = RoundingMode::Up,
            "rounding-mode-half-even" => self.rounding = RoundingMode::HalfEven,
            "rounding-mode-half-odd" => self.rounding = RoundingMode::HalfOdd,
            "rounding-mode-half-up" => self.rounding = RoundingMode::HalfUp,
            "rounding-mode-half-down" => self.rounding = RoundingMode::HalfDown,
            "rounding-mode-half-ceiling" => self.rounding = RoundingMode::HalfCeiling,
            "rounding-mode-half-floor" => self.rounding = RoundingMode::HalfFloor,

            "sign-auto" => self.sign = SignPolicy::Auto,
            "sign-always" => self.sign = SignPolicy::Always,
            "sign-never" => self.sign = SignPolicy::Never,
            "sign-except-zero" => self.sign = SignPolicy::ExceptZero,
            "sign-accounting" => self.sign = SignPolicy::Accounting,
            "sign-accounting-always" => self.sign = SignPolicy::AccountingAlways,
            "sign-accounting-except-zero" => self.sign = SignPolicy::AccountingExceptZero,

            "scale" => {
                if let Ok(factor) = options.parse::<f64>() {
                    if factor.is_finite() && factor > 0.0 {
                        self.scale = Some(factor);
                    }
                }
            }

            "precision-integer" => self.precision = Precision::Integer,
            "precision-unlimited" => {
                self.precision = Precision::Fraction { min: 0, max: None }
            }

            "integer-width" => {
                if let Some(width) = options.strip_prefix('+') {
                    if width.bytes().all(|b| b == b'0') {
                        self.integer_width = IntegerWidth {
                            min: width.len().max(1),
                            truncate: false,
                        };
                    }
                }
            }
            "integer-width-trunc" => {
                self.integer_width = IntegerWidth {
                    min: 0,
                    truncate: true,
                };
            }

            "group-auto" => self.grouping = Grouping::Auto,
            "group-off" => self.grouping = Grouping::Off,
            "group-min2" => self.grouping = Grouping::Min2,
            "group-on-aligned" => self.grouping = Grouping::OnAligned,
            "group-thousands" => self.grouping = Grouping::Thousands,

            "percent" => self.unit = Unit::Percent,
            "permille" => self.unit = Unit::Permille,
            "currency" => {
                if !options.is_empty() {
                    self.unit = Unit::Currency(options.to_uppercase());
                }
            }

            _ if stem.starts_with('.') => {
                if let Some(precision) = parse_fraction_precision(stem) {
                    self.precision = precision;
                }
            }
            _ if stem.starts_with('@') => {
                if let Some(precision) = parse_significant_precision(stem) {
                    self.precision = precision;
                }
            }

            // Forward-compatible no-op for everything else.
            _ => {}
        }
    }

    /// Format a quantity according to this skeleton.
    pub fn format(
        &self,
        value: DecimalQuantity,
        separators: &Separators,
        currencies: &CurrencyTable,
    ) -> String {
        let mut q = value;

        // Magnitude transforms before precision is applied.
        match self.unit {
            Unit::Percent => q.shift(2),
            Unit::Permille => q.shift(3),
            _ => {}
        }
        if let Some(factor) = self.scale {
            apply_scale(&mut q, factor);
        }

        let currency = match &self.unit {
            Unit::Currency(code) => Some(currencies.lookup(code)),
            _ => None,
        };

        // Precision, with the currency's digit count as its default.
        let precision = match (self.precision, &currency) {
            (Precision::Default, Some(info)) => Precision::Fraction {
                min: info.fraction_digits,
                max: Some(info.fraction_digits),
            },
            (Precision::Default, None) => Precision::Fraction {
                min: 0,
                max: Some(6),
            },
            (other, _) => other,
        };
        match precision {
            Precision::Integer => q.round_at_frac(0, self.rounding),
            Precision::Fraction { min, max } => {
                if let Some(max) = max {
                    q.round_at_frac(max, self.rounding);
                }
                q.trim_frac_to(min);
                q.pad_frac_to(min);
            }
            Precision::Significant { min, max } => {
                if let Some(max) = max {
                    q.round_significant(max, self.rounding);
                }
                q.trim_significant_to(min.max(1));
                q.pad_significant_to(min.max(1));
            }
            Precision::Default => unreachable!("resolved above"),
        }

        if self.integer_width.truncate {
            q.truncate_integer();
        }
        if self.sign == SignPolicy::Never {
            q.set_non_negative();
        }

        let is_zero = q.is_zero();
        let (negative, int_str, frac_str) =
            q.to_parts(self.integer_width.min, self.integer_width.truncate);

        // Digits with canonical separators, then localized.
        let mut digits = if self.should_group(int_str.len()) {
            group_thousands(&int_str)
        } else {
            int_str
        };
        if !frac_str.is_empty() {
            digits.push('.');
            digits.push_str(&frac_str);
        }
        let digits: String = digits
            .chars()
            .map(|ch| match ch {
                '.' => separators.decimal,
                ',' => separators.group,
                other => other,
            })
            .collect();

        self.wrap(digits, negative, is_zero, currency.as_ref())
    }

    fn should_group(&self, int_len: usize) -> bool {
        match self.grouping {
            Grouping::Off => false,
            Grouping::Min2 => int_len >= 5,
            Grouping::Auto | Grouping::OnAligned | Grouping::Thousands => int_len >= 4,
        }
    }

    /// Assemble sign, currency symbol, digits, and unit suffix.
    fn wrap(
        &self,
        digits: String,
        negative: bool,
        is_zero: bool,
        currency: Option<&crate::tables::CurrencyInfo>,
    ) -> String {
        let mut body = String::new();
        if let Some(info) = currency {
            body.push_str(&info.symbol);
        }
        body.push_str(&digits);
        match self.unit {
            Unit::Percent => body.push('%'),
            Unit::Permille => body.push('‰'),
            _ => {}
        }

        let show_negative = negative && !is_zero && self.sign != SignPolicy::Never;
        if show_negative {
            if self.sign.accounting() && currency.is_some() {
                return format!("({})", body);
            }
            return format!("-{}", body);
        }
        if !negative && self.sign.plus_on_positive(is_zero) {
            return format!("+{}", body);
        }
        body
    }
}

/// Expand concise shorthand tokens to their long-form stems.
fn normalize_shorthand(token: &str) -> String {
    match token {
        "%" => "percent".to_string(),
        "‰" => "permille".to_string(),
        "+!" => "sign-always".to_string(),
        "+_" => "sign-never".to_string(),
        "+?" => "sign-except-zero".to_string(),
        "()" => "sign-accounting".to_string(),
        "()!" => "sign-accounting-always".to_string(),
        "()?" => "sign-accounting-except-zero".to_string(),
        ",_" => "group-off".to_string(),
        ",!" => "group-on-aligned".to_string(),
        ",?" => "group-min2".to_string(),
        _ => token.to_string(),
    }
}

/// `.00##` / `.00*`: zeros are required digits, hashes optional, a
/// trailing `*` lifts the maximum entirely.
fn parse_fraction_precision(stem: &str) -> Option<Precision> {
    let body = &stem[1..];
    let mut min = 0usize;
    let mut optional = 0usize;
    let mut unlimited = false;
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '0' if optional == 0 && !unlimited => min += 1,
            '#' if !unlimited => optional += 1,
            '*' if chars.peek().is_none() => unlimited = true,
            _ => return None,
        }
    }
    let max = if unlimited { None } else { Some(min + optional) };
    Some(Precision::Fraction { min, max })
}

/// `@@#` / `@@*`: at-signs are required significant digits, hashes
/// optional, `*` lifts the maximum.
fn parse_significant_precision(stem: &str) -> Option<Precision> {
    let mut min = 0usize;
    let mut optional = 0usize;
    let mut unlimited = false;
    let mut chars = stem.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '@' if optional == 0 && !unlimited => min += 1,
            '#' if !unlimited => optional += 1,
            '*' if chars.peek().is_none() => unlimited = true,
            _ => return None,
        }
    }
    if min == 0 {
        return None;
    }
    let max = if unlimited { None } else { Some(min + optional) };
    Some(Precision::Significant { min, max })
}

/// Multiply by an arbitrary positive factor. Powers of ten stay exact;
/// anything else goes through `f64`.
fn apply_scale(q: &mut DecimalQuantity, factor: f64) {
    let log = factor.log10();
    if log.fract() == 0.0 && log.abs() < 18.0 {
        q.shift(log as i32);
        return;
    }
    if let Ok(scaled) = DecimalQuantity::from_f64(q.to_f64() * factor) {
        *q = scaled;
    }
}

/// Insert canonical `,` separators every three digits from the right.
fn group_thousands(int_str: &str) -> String {
    let digits: Vec<char> = int_str.chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out
}
