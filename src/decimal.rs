//! Exact decimal quantities for number formatting.
//!
//! The skeleton interpreter needs rounding with ten distinct modes,
//! significant-digit precision measured against the number's real
//! magnitude, and power-of-ten scaling, none of which are reliable on
//! `f64` directly. [`DecimalQuantity`] keeps the number as explicit digit
//! vectors around a decimal point so every operation is exact.

use std::cmp::Ordering;

use crate::error::{FormatError, FormatResult};

/// Rounding modes selectable via `rounding-mode-*` skeleton stems.
/// `HalfEven` (banker's rounding) is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    /// Toward positive infinity
    Ceiling,
    /// Toward negative infinity
    Floor,
    /// Toward zero (truncate)
    Down,
    /// Away from zero
    Up,
    /// To nearest; ties to the even neighbor
    HalfEven,
    /// To nearest; ties to the odd neighbor
    HalfOdd,
    /// To nearest; ties away from zero
    HalfUp,
    /// To nearest; ties toward zero
    HalfDown,
    /// To nearest; ties toward positive infinity
    HalfCeiling,
    /// To nearest; ties toward negative infinity
    HalfFloor,
}

/// A number decomposed into sign, integer digits, and fraction digits.
///
/// `int_digits` carries no leading zeros (empty means a zero integer
/// part); `frac_digits` keeps trailing zeros because they are visible
/// digits for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalQuantity {
    negative: bool,
    int_digits: Vec<u8>,
    frac_digits: Vec<u8>,
}

impl DecimalQuantity {
    pub fn zero() -> Self {
        DecimalQuantity {
            negative: false,
            int_digits: Vec::new(),
            frac_digits: Vec::new(),
        }
    }

    pub fn from_i64(value: i64) -> Self {
        let int_digits = match value {
            0 => Vec::new(),
            _ => value
                .unsigned_abs()
                .to_string()
                .bytes()
                .map(|b| b - b'0')
                .collect(),
        };
        DecimalQuantity {
            negative: value < 0,
            int_digits,
            frac_digits: Vec::new(),
        }
    }

    /// Build a quantity from a float using its shortest round-trip
    /// representation. Non-finite inputs are rejected.
    pub fn from_f64(value: f64) -> FormatResult<Self> {
        if !value.is_finite() {
            return Err(FormatError::NotNumeric(value.to_string()));
        }
        // Rust's Display for f64 never uses scientific notation and emits
        // the shortest digits that round-trip.
        Self::parse(&value.to_string())
    }

    /// Parse a decimal string: optional sign, digits, optional fraction,
    /// optional `e`/`E` exponent.
    pub fn parse(text: &str) -> FormatResult<Self> {
        let s = text.trim();
        let err = || FormatError::NotNumeric(text.to_string());

        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(pos) => {
                let exp: i32 = rest[pos + 1..].parse().map_err(|_| err())?;
                (&rest[..pos], exp)
            }
            None => (rest, 0),
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

        let mut q = DecimalQuantity {
            negative,
            int_digits: int_text.bytes().map(|b| b - b'0').collect(),
            frac_digits: frac_text.bytes().map(|b| b - b'0').collect(),
        };
        q.normalize();
        if exponent != 0 {
            q.shift(exponent);
        }
        Ok(q)
    }

    /// Strip leading zeros from the integer part.
    fn normalize(&mut self) {
        let nonzero = self.int_digits.iter().position(|&d| d != 0);
        match nonzero {
            Some(first) => {
                self.int_digits.drain(..first);
            }
            None => self.int_digits.clear(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.int_digits.iter().all(|&d| d == 0) && self.frac_digits.iter().all(|&d| d == 0)
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Drop the sign (used by the `sign-never` policy).
    pub fn set_non_negative(&mut self) {
        self.negative = false;
    }

    /// Multiply by 10^`by` (negative `by` divides).
    pub fn shift(&mut self, by: i32) {
        if by > 0 {
            for _ in 0..by {
                let d = if self.frac_digits.is_empty() {
                    0
                } else {
                    self.frac_digits.remove(0)
                };
                self.int_digits.push(d);
            }
        } else {
            for _ in 0..(-by) {
                let d = self.int_digits.pop().unwrap_or(0);
                self.frac_digits.insert(0, d);
            }
        }
        self.normalize();
    }

    /// Number of significant integer digits (0 for values below 1).
    pub fn int_digit_count(&self) -> usize {
        self.int_digits.len()
    }

    pub fn frac_digit_count(&self) -> usize {
        self.frac_digits.len()
    }

    /// Significant digits: from the first nonzero digit through the last
    /// visible fraction digit. Zero counts its integer `0` as one digit.
    pub fn significant_count(&self) -> usize {
        if self.is_zero() {
            return 1 + self.frac_digits.len();
        }
        if !self.int_digits.is_empty() {
            self.int_digits.len() + self.frac_digits.len()
        } else {
            let leading = self
                .frac_digits
                .iter()
                .position(|&d| d != 0)
                .unwrap_or(self.frac_digits.len());
            self.frac_digits.len() - leading
        }
    }

    /// Round so that at most `max_frac` fraction digits remain.
    pub fn round_at_frac(&mut self, max_frac: usize, mode: RoundingMode) {
        if self.frac_digits.len() > max_frac {
            self.round_at(max_frac as isize, mode);
        }
    }

    /// Round to at most `max_sig` significant digits, measured from the
    /// number's actual magnitude.
    pub fn round_significant(&mut self, max_sig: usize, mode: RoundingMode) {
        if max_sig == 0 || self.is_zero() {
            return;
        }
        let keep = if !self.int_digits.is_empty() {
            max_sig as isize - self.int_digits.len() as isize
        } else {
            let leading = self
                .frac_digits
                .iter()
                .position(|&d| d != 0)
                .unwrap_or(self.frac_digits.len());
            leading as isize + max_sig as isize
        };
        if keep < self.frac_digits.len() as isize {
            self.round_at(keep, mode);
        }
    }

    /// Core rounding: keep `keep` digits after the decimal point (negative
    /// values round into the integer part), dropping the rest with the
    /// given mode.
    fn round_at(&mut self, keep: isize, mode: RoundingMode) {
        let int_len = self.int_digits.len() as isize;
        let total = int_len + self.frac_digits.len() as isize;
        let cut = int_len + keep;
        if cut >= total {
            return;
        }
        let cut = cut.max(0) as usize;

        let mut all: Vec<u8> = Vec::with_capacity(total as usize);
        all.extend_from_slice(&self.int_digits);
        all.extend_from_slice(&self.frac_digits);

        let dropped = &all[cut..];
        let mut kept: Vec<u8> = all[..cut].to_vec();

        if dropped.iter().any(|&d| d != 0) {
            let half = match dropped[0].cmp(&5) {
                Ordering::Greater => Ordering::Greater,
                Ordering::Less => Ordering::Less,
                Ordering::Equal => {
                    if dropped[1..].iter().any(|&d| d != 0) {
                        Ordering::Greater
                    } else {
                        Ordering::Equal
                    }
                }
            };
            let last_kept = kept.last().copied().unwrap_or(0);
            if Self::should_increment(mode, self.negative, half, last_kept) {
                let mut carry = true;
                for d in kept.iter_mut().rev() {
                    if carry {
                        *d += 1;
                        if *d == 10 {
                            *d = 0;
                        } else {
                            carry = false;
                        }
                    }
                }
                if carry {
                    kept.insert(0, 1);
                }
            }
        }

        // Rebuild around the decimal point, restoring magnitude when the
        // rounding position was inside the integer part.
        if keep < 0 {
            kept.extend(std::iter::repeat_n(0, (-keep) as usize));
        }
        let new_frac_len = keep.max(0) as usize;
        if kept.len() < new_frac_len {
            let pad = new_frac_len - kept.len();
            for _ in 0..pad {
                kept.insert(0, 0);
            }
        }
        let split = kept.len() - new_frac_len;
        self.frac_digits = kept.split_off(split);
        self.int_digits = kept;
        self.normalize();
    }

    fn should_increment(
        mode: RoundingMode,
        negative: bool,
        half: Ordering,
        last_kept: u8,
    ) -> bool {
        match mode {
            RoundingMode::Ceiling => !negative,
            RoundingMode::Floor => negative,
            RoundingMode::Down => false,
            RoundingMode::Up => true,
            RoundingMode::HalfUp => half != Ordering::Less,
            RoundingMode::HalfDown => half == Ordering::Greater,
            RoundingMode::HalfEven => {
                half == Ordering::Greater || (half == Ordering::Equal && last_kept % 2 == 1)
            }
            RoundingMode::HalfOdd => {
                half == Ordering::Greater || (half == Ordering::Equal && last_kept % 2 == 0)
            }
            RoundingMode::HalfCeiling => {
                if negative {
                    half == Ordering::Greater
                } else {
                    half != Ordering::Less
                }
            }
            RoundingMode::HalfFloor => {
                if negative {
                    half != Ordering::Less
                } else {
                    half == Ordering::Greater
                }
            }
        }
    }

    /// Append fraction zeros until at least `min_frac` digits are visible.
    pub fn pad_frac_to(&mut self, min_frac: usize) {
        while self.frac_digits.len() < min_frac {
            self.frac_digits.push(0);
        }
    }

    /// Remove trailing fraction zeros down to `min_frac` digits.
    pub fn trim_frac_to(&mut self, min_frac: usize) {
        while self.frac_digits.len() > min_frac && self.frac_digits.last() == Some(&0) {
            self.frac_digits.pop();
        }
    }

    /// Append fraction zeros until at least `min_sig` significant digits
    /// are visible.
    pub fn pad_significant_to(&mut self, min_sig: usize) {
        while self.significant_count() < min_sig {
            self.frac_digits.push(0);
        }
    }

    /// Remove trailing fraction zeros while more than `min_sig`
    /// significant digits remain.
    pub fn trim_significant_to(&mut self, min_sig: usize) {
        while self.significant_count() > min_sig && self.frac_digits.last() == Some(&0) {
            self.frac_digits.pop();
        }
    }

    /// Drop the integer digits, keeping only the fractional part
    /// (`integer-width-trunc`).
    pub fn truncate_integer(&mut self) {
        self.int_digits.clear();
    }

    /// Render as `(negative, integer digits, fraction digits)`. The
    /// integer string is `"0"`-padded to at least `min_int` digits and
    /// never empty unless the integer part was truncated away.
    pub fn to_parts(&self, min_int: usize, int_truncated: bool) -> (bool, String, String) {
        let mut int_str: String = self
            .int_digits
            .iter()
            .map(|&d| (b'0' + d) as char)
            .collect();
        if !int_truncated {
            if int_str.is_empty() {
                int_str.push('0');
            }
            while int_str.len() < min_int {
                int_str.insert(0, '0');
            }
        }
        let frac_str: String = self
            .frac_digits
            .iter()
            .map(|&d| (b'0' + d) as char)
            .collect();
        (self.negative, int_str, frac_str)
    }

    pub fn to_f64(&self) -> f64 {
        let (negative, int_str, frac_str) = self.to_parts(1, false);
        let text = if frac_str.is_empty() {
            int_str
        } else {
            format!("{}.{}", int_str, frac_str)
        };
        let magnitude: f64 = text.parse().unwrap_or(0.0);
        if negative { -magnitude } else { magnitude }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(q: &DecimalQuantity) -> String {
        let (neg, int, frac) = q.to_parts(1, false);
        let mut s = String::new();
        if neg {
            s.push('-');
        }
        s.push_str(&int);
        if !frac.is_empty() {
            s.push('.');
            s.push_str(&frac);
        }
        s
    }

    fn parsed(text: &str) -> DecimalQuantity {
        DecimalQuantity::parse(text).unwrap()
    }

    #[test]
    fn test_parse_basic() {
        assert_eq!(render(&parsed("1234.50")), "1234.50");
        assert_eq!(render(&parsed("-0.5")), "-0.5");
        assert_eq!(render(&parsed("007")), "7");
        assert_eq!(render(&parsed(".25")), "0.25");
    }

    #[test]
    fn test_from_i64() {
        assert_eq!(render(&DecimalQuantity::from_i64(-120)), "-120");
        assert_eq!(render(&DecimalQuantity::from_i64(0)), "0");
        assert_eq!(
            DecimalQuantity::from_i64(7),
            DecimalQuantity::parse("7").unwrap()
        );
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(render(&parsed("1.5e3")), "1500");
        assert_eq!(render(&parsed("25e-3")), "0.025");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DecimalQuantity::parse("abc").is_err());
        assert!(DecimalQuantity::parse("1.2.3").is_err());
        assert!(DecimalQuantity::parse("").is_err());
    }

    #[test]
    fn test_shift() {
        let mut q = parsed("12.34");
        q.shift(2);
        assert_eq!(render(&q), "1234");
        q.shift(-3);
        assert_eq!(render(&q), "1.234");
    }

    #[test]
    fn test_half_even_default_behavior() {
        for (input, expect) in [("0.5", "0"), ("1.5", "2"), ("2.5", "2"), ("2.51", "3")] {
            let mut q = parsed(input);
            q.round_at_frac(0, RoundingMode::HalfEven);
            assert_eq!(render(&q), expect, "half-even {}", input);
        }
    }

    #[test]
    fn test_directed_modes() {
        let cases = [
            (RoundingMode::Ceiling, "1.21", "1.3"),
            (RoundingMode::Ceiling, "-1.21", "-1.2"),
            (RoundingMode::Floor, "1.29", "1.2"),
            (RoundingMode::Floor, "-1.21", "-1.3"),
            (RoundingMode::Down, "1.29", "1.2"),
            (RoundingMode::Down, "-1.29", "-1.2"),
            (RoundingMode::Up, "1.21", "1.3"),
            (RoundingMode::Up, "-1.21", "-1.3"),
        ];
        for (mode, input, expect) in cases {
            let mut q = parsed(input);
            q.round_at_frac(1, mode);
            assert_eq!(render(&q), expect, "{:?} {}", mode, input);
        }
    }

    #[test]
    fn test_half_tie_modes() {
        let cases = [
            (RoundingMode::HalfUp, "1.25", "1.3"),
            (RoundingMode::HalfUp, "-1.25", "-1.3"),
            (RoundingMode::HalfDown, "1.25", "1.2"),
            (RoundingMode::HalfOdd, "1.25", "1.3"),
            (RoundingMode::HalfOdd, "1.35", "1.3"),
            (RoundingMode::HalfCeiling, "1.25", "1.3"),
            (RoundingMode::HalfCeiling, "-1.25", "-1.2"),
            (RoundingMode::HalfFloor, "1.25", "1.2"),
            (RoundingMode::HalfFloor, "-1.25", "-1.3"),
        ];
        for (mode, input, expect) in cases {
            let mut q = parsed(input);
            q.round_at_frac(1, mode);
            assert_eq!(render(&q), expect, "{:?} {}", mode, input);
        }
    }

    #[test]
    fn test_rounding_carry_propagates() {
        let mut q = parsed("9.99");
        q.round_at_frac(1, RoundingMode::HalfUp);
        assert_eq!(render(&q), "10.0");

        let mut q = parsed("0.999");
        q.round_at_frac(0, RoundingMode::HalfUp);
        assert_eq!(render(&q), "1");
    }

    #[test]
    fn test_round_significant_above_one() {
        let mut q = parsed("1234.5");
        q.round_significant(3, RoundingMode::HalfEven);
        assert_eq!(render(&q), "1230");

        let mut q = parsed("99.99");
        q.round_significant(3, RoundingMode::HalfEven);
        assert_eq!(render(&q), "100.0");
    }

    #[test]
    fn test_round_significant_below_one() {
        let mut q = parsed("0.0999");
        q.round_significant(2, RoundingMode::HalfEven);
        assert_eq!(render(&q), "0.100");

        let mut q = parsed("0.001234");
        q.round_significant(2, RoundingMode::HalfEven);
        assert_eq!(render(&q), "0.0012");
    }

    #[test]
    fn test_significant_count() {
        assert_eq!(parsed("1234.5").significant_count(), 5);
        assert_eq!(parsed("0.0012").significant_count(), 2);
        assert_eq!(parsed("1.50").significant_count(), 3);
        assert_eq!(parsed("0").significant_count(), 1);
    }

    #[test]
    fn test_pad_and_trim() {
        let mut q = parsed("3");
        q.pad_frac_to(2);
        assert_eq!(render(&q), "3.00");
        q.trim_frac_to(0);
        assert_eq!(render(&q), "3");

        let mut q = parsed("1.5");
        q.pad_significant_to(4);
        assert_eq!(render(&q), "1.500");
        q.trim_significant_to(2);
        assert_eq!(render(&q), "1.5");
    }

    #[test]
    fn test_min_int_padding() {
        let (_, int, _) = parsed("42").to_parts(5, false);
        assert_eq!(int, "00042");
    }

    #[test]
    fn test_to_f64_round_trip() {
        assert_eq!(parsed("1234.5").to_f64(), 1234.5);
        assert_eq!(parsed("-0.25").to_f64(), -0.25);
    }
}
