//! End-to-end formatting tests through the public API.

use std::sync::Arc;

use crate::{Args, FormatError, MessageFormatter, TimeFormatter, Value};

fn formatter(locale: &str) -> MessageFormatter {
    MessageFormatter::new(locale)
}

fn args(pairs: &[(&str, Value)]) -> Args {
    let mut args = Args::new();
    for (name, value) in pairs {
        args.set(name, value.clone());
    }
    args
}

#[test]
fn test_plural_one_and_other() {
    let fmt = formatter("en");
    let template = "You have {count, plural, one{# item} other{# items}}";
    assert_eq!(
        fmt.format(template, &args(&[("count", Value::Int(1))])).unwrap(),
        "You have 1 item"
    );
    assert_eq!(
        fmt.format(template, &args(&[("count", Value::Int(5))])).unwrap(),
        "You have 5 items"
    );
}

#[test]
fn test_currency_skeleton() {
    let fmt = formatter("en");
    let out = fmt
        .format(
            "{amount, number, ::currency/USD}",
            &args(&[("amount", Value::Float(1234.5))]),
        )
        .unwrap();
    assert_eq!(out, "US$1,234.50");
}

#[test]
fn test_select() {
    let fmt = formatter("en");
    let template = "{gender, select, male{He} female{She} other{They}} liked this.";
    assert_eq!(
        fmt.format(template, &args(&[("gender", Value::from("female"))]))
            .unwrap(),
        "She liked this."
    );
    assert_eq!(
        fmt.format(template, &args(&[("gender", Value::from("other"))]))
            .unwrap(),
        "They liked this."
    );
}

#[test]
fn test_unbalanced_braces_are_fatal() {
    let fmt = formatter("en");
    let result = fmt.format("Hello {name", &args(&[("name", Value::from("x"))]));
    assert!(matches!(result, Err(FormatError::UnbalancedBraces(_))));
}

#[test]
fn test_forced_fraction_digits() {
    let fmt = formatter("en");
    let out = fmt
        .format("{x, number, ::.00}", &args(&[("x", Value::Int(3))]))
        .unwrap();
    assert_eq!(out, "3.00");
}

#[test]
fn test_simple_substitution() {
    let fmt = formatter("en");
    let out = fmt
        .format("Hello {name}!", &args(&[("name", Value::from("World"))]))
        .unwrap();
    assert_eq!(out, "Hello World!");
}

#[test]
fn test_escaping_round_trip() {
    // Braces and quotes inside an argument value come out literally and
    // are never re-parsed as template syntax.
    let fmt = formatter("en");
    let out = fmt
        .format(
            "Hello {name}!",
            &args(&[("name", Value::from("{weird}'s value"))]),
        )
        .unwrap();
    assert_eq!(out, "Hello {weird}'s value!");
}

#[test]
fn test_escaping_inside_select_branch() {
    let fmt = formatter("en");
    let template = "{kind, select, odd{got {name}} other{none}}";
    let out = fmt
        .format(
            template,
            &args(&[
                ("kind", Value::from("odd")),
                ("name", Value::from("a {b} c")),
            ]),
        )
        .unwrap();
    assert_eq!(out, "got a {b} c");
}

#[test]
fn test_missing_argument_is_empty() {
    let fmt = formatter("en");
    // "known" names come from the argument map, so an unknown {name} is
    // literal text rather than an empty placeholder
    let out = fmt
        .format("a {x} b", &args(&[("x", Value::from("X")), ("y", Value::from("Y"))]))
        .unwrap();
    assert_eq!(out, "a X b");
}

#[test]
fn test_unmatched_plural_case_is_silent_empty() {
    // The engine deliberately renders nothing when no case matches;
    // supplying a catch-all is the template author's responsibility.
    let fmt = formatter("en");
    let out = fmt
        .format(
            "{n, plural, one{an item}}",
            &args(&[("n", Value::Int(5))]),
        )
        .unwrap();
    assert_eq!(out, "");
}

#[test]
fn test_unmatched_select_case_is_silent_empty() {
    let fmt = formatter("en");
    let out = fmt
        .format(
            "{g, select, male{He}}",
            &args(&[("g", Value::from("female"))]),
        )
        .unwrap();
    assert_eq!(out, "");
}

#[test]
fn test_plural_offset() {
    let fmt = formatter("en");
    let template = "{n, plural, offset:1 =0{nobody} =1{you} one{you and # other} other{you and # others}}";
    assert_eq!(
        fmt.format(template, &args(&[("n", Value::Int(0))])).unwrap(),
        "nobody"
    );
    assert_eq!(
        fmt.format(template, &args(&[("n", Value::Int(1))])).unwrap(),
        "you"
    );
    assert_eq!(
        fmt.format(template, &args(&[("n", Value::Int(2))])).unwrap(),
        "you and 1 other"
    );
    assert_eq!(
        fmt.format(template, &args(&[("n", Value::Int(5))])).unwrap(),
        "you and 4 others"
    );
}

#[test]
fn test_offset_keeps_visible_fraction_digits() {
    // Polish distinguishes "1" (one) from "1.00" (other, because v=2), so
    // the offset shift must not strip a decimal argument's visible digits.
    let pl = formatter("pl");
    let template = "{n, plural, offset:1 one{one} few{few} many{many} other{other}}";
    assert_eq!(
        pl.format(template, &args(&[("n", Value::Decimal("2.00".into()))]))
            .unwrap(),
        "other"
    );
    assert_eq!(
        pl.format(template, &args(&[("n", Value::Int(2))])).unwrap(),
        "one"
    );

    // the `#` substitution carries the shifted decimal form
    let en = formatter("en");
    assert_eq!(
        en.format(
            "{n, plural, offset:1 other{#}}",
            &args(&[("n", Value::Decimal("2.50".into()))]),
        )
        .unwrap(),
        "1.50"
    );
}

#[test]
fn test_exact_match_beats_category() {
    let fmt = formatter("en");
    let template = "{n, plural, =1{exactly one} one{category one} other{#}}";
    assert_eq!(
        fmt.format(template, &args(&[("n", Value::Int(1))])).unwrap(),
        "exactly one"
    );
}

#[test]
fn test_selectordinal() {
    let fmt = formatter("en");
    let template = "{n, selectordinal, one{#st} two{#nd} few{#rd} other{#th}}";
    for (n, expected) in [(1, "1st"), (2, "2nd"), (3, "3rd"), (4, "4th"), (11, "11th"), (21, "21st")] {
        assert_eq!(
            fmt.format(template, &args(&[("n", Value::Int(n))])).unwrap(),
            expected,
            "n={}",
            n
        );
    }
}

#[test]
fn test_ordinal_keyword() {
    let fmt = formatter("en");
    for (n, expected) in [(1, "1st"), (22, "22nd"), (33, "33rd"), (104, "104th")] {
        assert_eq!(
            fmt.format("{n, ordinal}", &args(&[("n", Value::Int(n))]))
                .unwrap(),
            expected,
            "n={}",
            n
        );
    }
}

#[test]
fn test_duration() {
    let fmt = formatter("en");
    for (secs, expected) in [(45, "45"), (125, "2:05"), (3725, "1:02:05")] {
        assert_eq!(
            fmt.format("{d, duration}", &args(&[("d", Value::Int(secs))]))
                .unwrap(),
            expected
        );
    }
}

struct StampFormatter;

impl TimeFormatter for StampFormatter {
    fn format_time(&self, seconds: i64, style: &str) -> String {
        format!("[{}:{}]", style, seconds)
    }
}

#[test]
fn test_date_delegates_to_time_formatter() {
    let mut fmt = formatter("en");
    fmt.with_time_formatter(Arc::new(StampFormatter));
    assert_eq!(
        fmt.format("{ts, date, short}", &args(&[("ts", Value::Time(100))]))
            .unwrap(),
        "[short:100]"
    );
    // default style when none is given
    assert_eq!(
        fmt.format("{ts, time}", &args(&[("ts", Value::Time(7))]))
            .unwrap(),
        "[medium:7]"
    );
}

#[test]
fn test_date_without_delegate_renders_raw() {
    let fmt = formatter("en");
    assert_eq!(
        fmt.format("{ts, date}", &args(&[("ts", Value::Time(100))]))
            .unwrap(),
        "100"
    );
}

#[test]
fn test_legacy_number_styles() {
    let fmt = formatter("en");
    assert_eq!(
        fmt.format("{x, number, integer}", &args(&[("x", Value::Float(1234.7))]))
            .unwrap(),
        "1,235"
    );
    assert_eq!(
        fmt.format("{x, number, percent}", &args(&[("x", Value::Float(0.25))]))
            .unwrap(),
        "25%"
    );
    assert_eq!(
        fmt.format("{x, number}", &args(&[("x", Value::Float(1234.5))]))
            .unwrap(),
        "1,234.5"
    );
}

#[test]
fn test_spellout_falls_back_to_number() {
    let fmt = formatter("en");
    assert_eq!(
        fmt.format("{x, spellout}", &args(&[("x", Value::Int(7))]))
            .unwrap(),
        "7"
    );
}

#[test]
fn test_unknown_keyword_renders_naturally() {
    let fmt = formatter("en");
    assert_eq!(
        fmt.format("{x, frobnicate}", &args(&[("x", Value::Int(9))]))
            .unwrap(),
        "9"
    );
}

#[test]
fn test_non_numeric_plural_input_is_loud() {
    let fmt = formatter("en");
    let result = fmt.format(
        "{n, plural, other{#}}",
        &args(&[("n", Value::from("soon"))]),
    );
    assert!(matches!(result, Err(FormatError::NotNumeric(_))));
}

#[test]
fn test_nested_plural_in_select() {
    let fmt = formatter("en");
    let template = "{g, select, f{She has {n, plural, one{# cat} other{# cats}}} other{?}}";
    let out = fmt
        .format(
            template,
            &args(&[("g", Value::from("f")), ("n", Value::Int(3))]),
        )
        .unwrap();
    assert_eq!(out, "She has 3 cats");
}

#[test]
fn test_recursion_limit() {
    let mut fmt = formatter("en");
    fmt.with_max_depth(3);
    let mut template = String::from("deep");
    for _ in 0..6 {
        template = format!("{{k, select, a{{{}}}}}", template);
    }
    let result = fmt.format(&template, &args(&[("k", Value::from("a"))]));
    assert!(matches!(result, Err(FormatError::RecursionLimit(3))));
}

#[test]
fn test_locale_plural_rules() {
    let ru = formatter("ru");
    let template = "{n, plural, one{# товар} few{# товара} many{# товаров} other{# товара}}";
    for (n, expected) in [
        (1, "1 товар"),
        (3, "3 товара"),
        (5, "5 товаров"),
        (21, "21 товар"),
    ] {
        assert_eq!(
            ru.format(template, &args(&[("n", Value::Int(n))])).unwrap(),
            expected,
            "n={}",
            n
        );
    }
}

#[test]
fn test_localized_number_separators() {
    let de = formatter("de");
    assert_eq!(
        de.format("{x, number, ::.00}", &args(&[("x", Value::Float(1234.5))]))
            .unwrap(),
        "1.234,50"
    );
}

#[test]
fn test_decimal_string_keeps_visible_digits_for_plural() {
    // "1.0" is category other in English because of its visible fraction
    // digit, unlike the integer 1.
    let fmt = formatter("en");
    let template = "{n, plural, one{one} other{other}}";
    assert_eq!(
        fmt.format(template, &args(&[("n", Value::Decimal("1.0".into()))]))
            .unwrap(),
        "other"
    );
    assert_eq!(
        fmt.format(template, &args(&[("n", Value::Int(1))])).unwrap(),
        "one"
    );
}
