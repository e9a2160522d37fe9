//! Placeholder dispatch.
//!
//! Each placeholder body is split into `name, subformat, rest` and routed
//! by its subformat keyword: plural and selectordinal branch on a plural
//! category, select branches on string equality, number and spellout run
//! the skeleton interpreter, date and time go to the time delegate, and
//! duration is rendered arithmetically. Sub-messages re-enter the full
//! engine recursively, bounded by the formatter's maximum nesting depth.

use crate::decimal::DecimalQuantity;
use crate::error::{FormatError, FormatResult};
use crate::escape;
use crate::plural::{PluralCategory, PluralOperands, RuleKind};
use crate::scanner::{self, Segment};
use crate::skeleton::Skeleton;
use crate::value::{Args, Value};
use crate::MessageFormatter;

/// The closed set of sub-format keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SubFormat {
    Number,
    Spellout,
    Ordinal,
    Date,
    Time,
    Duration,
    Plural,
    SelectOrdinal,
    Select,
    Unrecognized(String),
}

impl SubFormat {
    fn parse(keyword: &str) -> SubFormat {
        match keyword {
            "number" => SubFormat::Number,
            "spellout" => SubFormat::Spellout,
            "ordinal" => SubFormat::Ordinal,
            "date" => SubFormat::Date,
            "time" => SubFormat::Time,
            "duration" => SubFormat::Duration,
            "plural" => SubFormat::Plural,
            "selectordinal" => SubFormat::SelectOrdinal,
            "select" => SubFormat::Select,
            other => SubFormat::Unrecognized(other.to_string()),
        }
    }
}

/// Format a whole template (or sub-message). `pound` carries the value
/// that replaces `#` in literal text inside plural branches.
pub(crate) fn format_message(
    fmt: &MessageFormatter,
    template: &str,
    args: &Args,
    depth: usize,
    pound: Option<&str>,
) -> FormatResult<String> {
    if depth > fmt.max_depth {
        return Err(FormatError::RecursionLimit(fmt.max_depth));
    }
    let mut out = String::new();
    for segment in scanner::segments(template, args) {
        match segment? {
            Segment::Literal(text) => match pound {
                Some(number) => out.push_str(&text.replace('#', number)),
                None => out.push_str(&text),
            },
            Segment::Placeholder(body) => {
                out.push_str(&format_placeholder(fmt, &body, args, depth, pound)?)
            }
        }
    }
    Ok(out)
}

fn format_placeholder(
    fmt: &MessageFormatter,
    body: &str,
    args: &Args,
    depth: usize,
    pound: Option<&str>,
) -> FormatResult<String> {
    let (name, subformat, rest) = scanner::split_placeholder(body);
    // A vanished argument is a soft condition: contribute nothing.
    let Some(value) = args.get(name) else {
        return Ok(String::new());
    };

    let Some(keyword) = subformat else {
        return Ok(substitute(value));
    };

    match SubFormat::parse(keyword) {
        SubFormat::Number | SubFormat::Spellout => format_number(fmt, value, rest),
        SubFormat::Ordinal => format_ordinal(fmt, value),
        SubFormat::Date | SubFormat::Time => Ok(format_timestamp(fmt, value, rest)),
        SubFormat::Duration => format_duration(value),
        SubFormat::Plural => {
            format_plural(fmt, value, rest, RuleKind::Cardinal, args, depth)
        }
        SubFormat::SelectOrdinal => {
            format_plural(fmt, value, rest, RuleKind::Ordinal, args, depth)
        }
        SubFormat::Select => format_select(fmt, value, rest, args, depth, pound),
        SubFormat::Unrecognized(_) => Ok(substitute(value)),
    }
}

/// Simple substitution: string values get their syntax characters
/// protected, everything else renders naturally.
fn substitute(value: &Value) -> String {
    match value {
        Value::Str(s) => escape::protect(s),
        other => other.render(),
    }
}

fn numeric(value: &Value) -> FormatResult<String> {
    value
        .decimal_str()
        .ok_or_else(|| FormatError::NotNumeric(value.render()))
}

fn format_number(fmt: &MessageFormatter, value: &Value, rest: &str) -> FormatResult<String> {
    let instruction = match rest.strip_prefix("::") {
        Some(skeleton) => skeleton.to_string(),
        None => legacy_number_style(rest),
    };
    let quantity = DecimalQuantity::parse(&numeric(value)?)?;
    Ok(Skeleton::parse(&instruction).format(quantity, &fmt.separators, &fmt.currencies))
}

/// Map pre-skeleton number styles onto equivalent skeletons.
fn legacy_number_style(style: &str) -> String {
    match style {
        "integer" => "precision-integer".to_string(),
        "percent" => "percent".to_string(),
        "currency" => "currency/DEFAULT".to_string(),
        _ => String::new(),
    }
}

/// Ordinal words via a fixed suffix template per ordinal category.
fn format_ordinal(fmt: &MessageFormatter, value: &Value) -> FormatResult<String> {
    let decimal = numeric(value)?;
    let operands = PluralOperands::from_decimal_str(&decimal)?;
    let category = fmt
        .rules
        .resolve(&fmt.locale, RuleKind::Ordinal, &operands);
    let template = match category {
        PluralCategory::One => "#st",
        PluralCategory::Two => "#nd",
        PluralCategory::Few => "#rd",
        _ => "#th",
    };
    let rendered = Skeleton::parse("").format(
        DecimalQuantity::parse(&decimal)?,
        &fmt.separators,
        &fmt.currencies,
    );
    Ok(template.replace('#', &rendered))
}

fn format_timestamp(fmt: &MessageFormatter, value: &Value, rest: &str) -> String {
    let style = if rest.is_empty() { "medium" } else { rest };
    let seconds = match value {
        Value::Time(secs) => *secs,
        other => match other.as_f64() {
            Some(x) => x as i64,
            None => return other.render(),
        },
    };
    match &fmt.time_formatter {
        Some(delegate) => delegate.format_time(seconds, style),
        None => value.render(),
    }
}

/// Elapsed seconds as `H:MM:SS` with leading zero groups stripped.
fn format_duration(value: &Value) -> FormatResult<String> {
    let total = numeric(value)?
        .parse::<f64>()
        .map_err(|_| FormatError::NotNumeric(value.render()))? as i64;
    let total = total.max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    Ok(if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}:{:02}", minutes, seconds)
    } else {
        seconds.to_string()
    })
}

fn format_plural(
    fmt: &MessageFormatter,
    value: &Value,
    rest: &str,
    kind: RuleKind,
    args: &Args,
    depth: usize,
) -> FormatResult<String> {
    let decimal = numeric(value)?;
    let unshifted = decimal
        .parse::<f64>()
        .map_err(|_| FormatError::NotNumeric(value.render()))?;

    let (offset, cases_text) = extract_offset(rest);
    let effective = if offset == 0 {
        decimal
    } else {
        // Keep the argument's visible fraction digits through the shift;
        // "2.00" minus offset 1 must stay "1.00" (v=2), not become "1".
        let shifted = unshifted - offset as f64;
        let visible_frac = PluralOperands::from_decimal_str(&decimal)?.v;
        if visible_frac == 0 {
            shifted.to_string()
        } else {
            format!("{:.*}", visible_frac, shifted)
        }
    };
    let operands = PluralOperands::from_decimal_str(&effective)?;
    let category = fmt.rules.resolve(&fmt.locale, kind, &operands);

    for (key, sub) in parse_cases(cases_text)? {
        let matched = match key.strip_prefix('=') {
            // exact matches compare against the unshifted value
            Some(literal) => literal.parse::<f64>() == Ok(unshifted),
            None => key == category.as_str(),
        };
        if matched {
            return format_message(fmt, sub, args, depth + 1, Some(&effective));
        }
    }
    // Unmatched case: silent empty output, the template author owns the
    // catch-all.
    Ok(String::new())
}

fn format_select(
    fmt: &MessageFormatter,
    value: &Value,
    rest: &str,
    args: &Args,
    depth: usize,
    pound: Option<&str>,
) -> FormatResult<String> {
    let key = value.render();
    for (case, sub) in parse_cases(rest)? {
        if case == key {
            return format_message(fmt, sub, args, depth + 1, pound);
        }
    }
    Ok(String::new())
}

/// Strip a leading `offset:N` from a plural body.
fn extract_offset(rest: &str) -> (i64, &str) {
    let trimmed = rest.trim_start();
    if let Some(after) = trimmed.strip_prefix("offset:") {
        let after = after.trim_start();
        let end = after
            .find(|ch: char| !(ch.is_ascii_digit() || ch == '-'))
            .unwrap_or(after.len());
        if let Ok(offset) = after[..end].parse::<i64>() {
            return (offset, &after[end..]);
        }
    }
    (0, rest)
}

/// Scan `keyword {sub-message}` pairs in appearance order. The keyword is
/// any run of non-brace, non-whitespace characters; the body spans
/// balanced braces.
fn parse_cases(text: &str) -> FormatResult<Vec<(&str, &str)>> {
    let mut cases = Vec::new();
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        let key_end = rest
            .find(|ch: char| ch.is_whitespace() || ch == '{' || ch == '}')
            .unwrap_or(rest.len());
        let key = &rest[..key_end];
        rest = rest[key_end..].trim_start();
        if key.is_empty() || !rest.starts_with('{') {
            return Err(FormatError::MalformedPlaceholder(text.to_string()));
        }
        let mut depth = 0usize;
        let mut body_end = None;
        for (offset, ch) in rest.char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        body_end = Some(offset);
                        break;
                    }
                }
                _ => {}
            }
        }
        let Some(end) = body_end else {
            return Err(FormatError::MalformedPlaceholder(text.to_string()));
        };
        cases.push((key, &rest[1..end]));
        rest = rest[end + 1..].trim_start();
    }
    Ok(cases)
}
