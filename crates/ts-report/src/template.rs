//! Format templates for numeric and temporal cells.
//!
//! A template is literal text around exactly one replacement field:
//! `"{:,}"`, `"{:.2f} kg"`, `"{:%Y-%m-%d}"`. Doubled braces (`{{`, `}}`)
//! are literal braces. The field name, if present, must be `0`.
//!
//! Numeric specs follow the `[[fill]align][sign][0][width][,|_][.precision][type]`
//! mini-language with types `d f F % e E g G`. Temporal specs are strftime
//! patterns checked with chrono's parser.

use chrono::format::{Item, StrftimeItems};
use std::fmt::Write;
use ts_table::{CellValue, ColumnKind};

use crate::error::TemplateError;

type TemplateResult<T> = std::result::Result<T, TemplateError>;

/// Literal text split around the replacement field.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pieces {
    prefix: String,
    spec: String,
    suffix: String,
}

fn split_template(raw: &str) -> TemplateResult<Pieces> {
    let mut prefix = String::new();
    let mut suffix = String::new();
    let mut spec: Option<String> = None;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        let literal = match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                '{'
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                '}'
            }
            '{' => {
                if spec.is_some() {
                    return Err(TemplateError::MultipleFields(raw.to_string()));
                }
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(TemplateError::UnbalancedBrace(raw.to_string()))
                        }
                        Some(ch) => field.push(ch),
                    }
                }
                spec = Some(field_spec(&field)?);
                continue;
            }
            '}' => return Err(TemplateError::UnbalancedBrace(raw.to_string())),
            other => other,
        };
        if spec.is_none() {
            prefix.push(literal);
        } else {
            suffix.push(literal);
        }
    }

    let spec = spec.ok_or_else(|| TemplateError::MissingField(raw.to_string()))?;
    Ok(Pieces {
        prefix,
        spec,
        suffix,
    })
}

/// Extract the spec from `name[:spec]`.
fn field_spec(field: &str) -> TemplateResult<String> {
    let (name, spec) = field.split_once(':').unwrap_or((field, ""));
    if !name.is_empty() && name != "0" {
        return Err(TemplateError::invalid(
            field,
            "field name must be empty or 0",
        ));
    }
    Ok(spec.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    AfterSign,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            '=' => Some(Align::AfterSign),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Minus,
    Plus,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberType {
    Decimal,
    Fixed,
    FixedUpper,
    Percent,
    Exp,
    ExpUpper,
    General,
    GeneralUpper,
}

impl NumberType {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'd' => Some(NumberType::Decimal),
            'f' => Some(NumberType::Fixed),
            'F' => Some(NumberType::FixedUpper),
            '%' => Some(NumberType::Percent),
            'e' => Some(NumberType::Exp),
            'E' => Some(NumberType::ExpUpper),
            'g' => Some(NumberType::General),
            'G' => Some(NumberType::GeneralUpper),
            _ => None,
        }
    }

    fn is_upper(&self) -> bool {
        matches!(
            self,
            NumberType::FixedUpper | NumberType::ExpUpper | NumberType::GeneralUpper
        )
    }
}

/// Largest width a numeric spec may request.
const MAX_WIDTH: usize = 1024;

/// Largest precision a numeric spec may request.
const MAX_SPEC_PRECISION: usize = 100;

/// Parsed numeric format spec.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NumberSpec {
    text: String,
    fill: char,
    align: Align,
    sign: Sign,
    width: usize,
    grouping: Option<char>,
    precision: Option<usize>,
    ty: Option<NumberType>,
}

impl NumberSpec {
    fn parse(spec: &str) -> TemplateResult<Self> {
        let chars: Vec<char> = spec.chars().collect();
        let mut out = NumberSpec {
            text: spec.to_string(),
            fill: ' ',
            align: Align::Right,
            sign: Sign::Minus,
            width: 0,
            grouping: None,
            precision: None,
            ty: None,
        };
        let mut explicit_align = false;
        let mut explicit_fill = false;
        let mut i = 0;

        if let Some(align) = chars.get(1).copied().and_then(Align::from_char) {
            out.fill = chars[0];
            out.align = align;
            explicit_align = true;
            explicit_fill = true;
            i = 2;
        } else if let Some(align) = chars.first().copied().and_then(Align::from_char) {
            out.align = align;
            explicit_align = true;
            i = 1;
        }

        match chars.get(i) {
            Some('+') => {
                out.sign = Sign::Plus;
                i += 1;
            }
            Some('-') => i += 1,
            Some(' ') => {
                out.sign = Sign::Space;
                i += 1;
            }
            _ => {}
        }

        if chars.get(i) == Some(&'#') {
            return Err(TemplateError::invalid(spec, "alternate form '#' is not supported"));
        }

        if chars.get(i) == Some(&'0') {
            if !explicit_fill {
                out.fill = '0';
            }
            if !explicit_align {
                out.align = Align::AfterSign;
            }
            i += 1;
        }

        let start = i;
        while chars.get(i).is_some_and(|c| c.is_ascii_digit()) {
            i += 1;
        }
        if i > start {
            out.width = parse_count(spec, &chars[start..i], MAX_WIDTH)?;
        }

        if let Some(sep @ (',' | '_')) = chars.get(i).copied() {
            out.grouping = Some(sep);
            i += 1;
        }

        if chars.get(i) == Some(&'.') {
            i += 1;
            let start = i;
            while chars.get(i).is_some_and(|c| c.is_ascii_digit()) {
                i += 1;
            }
            if i == start {
                return Err(TemplateError::invalid(spec, "missing precision after '.'"));
            }
            out.precision = Some(parse_count(spec, &chars[start..i], MAX_SPEC_PRECISION)?);
        }

        if let Some(&c) = chars.get(i) {
            out.ty = Some(NumberType::from_char(c).ok_or_else(|| {
                TemplateError::invalid(spec, format!("unknown format type '{}'", c))
            })?);
            i += 1;
        }

        if i < chars.len() {
            return Err(TemplateError::invalid(spec, "unexpected trailing characters"));
        }
        if out.ty == Some(NumberType::Decimal) && out.precision.is_some() {
            return Err(TemplateError::invalid(
                spec,
                "precision not allowed with type 'd'",
            ));
        }
        Ok(out)
    }

    fn format_integer(&self, value: i64) -> TemplateResult<String> {
        match self.ty {
            None if self.precision.is_some() => Err(TemplateError::IncompatibleType {
                spec: self.text.clone(),
                kind: ColumnKind::Integer,
            }),
            None | Some(NumberType::Decimal) => {
                Ok(self.finish(value < 0, value.unsigned_abs().to_string()))
            }
            Some(_) => self.format_float(value as f64, ColumnKind::Integer),
        }
    }

    fn format_float(&self, value: f64, kind: ColumnKind) -> TemplateResult<String> {
        let upper = self.ty.is_some_and(|t| t.is_upper());
        let magnitude = value.abs();

        let body = if magnitude.is_infinite() {
            let inf = if upper { "INF" } else { "inf" };
            match self.ty {
                Some(NumberType::Percent) => format!("{}%", inf),
                _ => inf.to_string(),
            }
        } else {
            match self.ty {
                None => match self.precision {
                    None => shortest(magnitude),
                    Some(p) => untyped(magnitude, p.max(1)),
                },
                Some(NumberType::Decimal) => {
                    return Err(TemplateError::IncompatibleType {
                        spec: self.text.clone(),
                        kind,
                    })
                }
                Some(NumberType::Fixed) | Some(NumberType::FixedUpper) => {
                    format!("{:.*}", self.precision.unwrap_or(6), magnitude)
                }
                Some(NumberType::Percent) => {
                    format!("{:.*}%", self.precision.unwrap_or(6), magnitude * 100.0)
                }
                Some(NumberType::Exp) | Some(NumberType::ExpUpper) => {
                    exponential(magnitude, self.precision.unwrap_or(6), upper)
                }
                Some(NumberType::General) | Some(NumberType::GeneralUpper) => {
                    general(magnitude, self.precision.unwrap_or(6).max(1), upper)
                }
            }
        };

        Ok(self.finish(value.is_sign_negative(), body))
    }

    /// Apply grouping, sign and padding to an unsigned body.
    fn finish(&self, negative: bool, body: String) -> String {
        let sign = match (negative, self.sign) {
            (true, _) => "-",
            (false, Sign::Plus) => "+",
            (false, Sign::Space) => " ",
            (false, Sign::Minus) => "",
        };
        let body = match self.grouping {
            // Zero padding is part of the grouped digits.
            Some(sep) if self.fill == '0' && self.align == Align::AfterSign => {
                group_zero_padded(&body, sep, self.width.saturating_sub(sign.len()))
            }
            Some(sep) => group_digits(&body, sep),
            None => body,
        };

        let len = sign.chars().count() + body.chars().count();
        let pad = self.width.saturating_sub(len);
        let fill = |n: usize| std::iter::repeat_n(self.fill, n).collect::<String>();

        match self.align {
            Align::Left => format!("{}{}{}", sign, body, fill(pad)),
            Align::Right => format!("{}{}{}", fill(pad), sign, body),
            Align::Center => format!("{}{}{}{}", fill(pad / 2), sign, body, fill(pad - pad / 2)),
            Align::AfterSign => format!("{}{}{}", sign, fill(pad), body),
        }
    }
}

fn parse_count(spec: &str, digits: &[char], max: usize) -> TemplateResult<usize> {
    let too_large = || TemplateError::invalid(spec, format!("number exceeds {}", max));
    let count: usize = digits
        .iter()
        .collect::<String>()
        .parse()
        .map_err(|_| too_large())?;
    if count > max {
        return Err(too_large());
    }
    Ok(count)
}

/// Shortest round-trip text, switching to exponent form for very large or
/// very small magnitudes.
fn shortest(magnitude: f64) -> String {
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return normalize_exponent(&format!("{:e}", magnitude), false);
    }
    let mut s = format!("{}", magnitude);
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}

fn exponential(magnitude: f64, precision: usize, upper: bool) -> String {
    normalize_exponent(&format!("{:.*e}", precision, magnitude), upper)
}

fn general(magnitude: f64, precision: usize, upper: bool) -> String {
    if magnitude == 0.0 {
        return "0".to_string();
    }
    let exp = exponent_of(&format!("{:.*e}", precision - 1, magnitude));
    if exp >= -4 && exp < precision as i32 {
        let decimals = (precision as i32 - 1 - exp) as usize;
        strip_zeros(&format!("{:.*}", decimals, magnitude))
    } else {
        general_exponent(magnitude, precision, upper)
    }
}

/// Untyped spec with a precision: `g` rules, except that exponent form
/// starts one digit earlier and fixed form keeps at least one decimal.
fn untyped(magnitude: f64, precision: usize) -> String {
    if magnitude == 0.0 {
        return "0.0".to_string();
    }
    let exp = exponent_of(&format!("{:.*e}", precision - 1, magnitude));
    if exp >= -4 && exp < precision as i32 - 1 {
        let decimals = (precision as i32 - 1 - exp) as usize;
        let mut s = strip_zeros(&format!("{:.*}", decimals, magnitude));
        if !s.contains('.') {
            s.push_str(".0");
        }
        s
    } else {
        general_exponent(magnitude, precision, false)
    }
}

fn general_exponent(magnitude: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{:.*e}", precision - 1, magnitude);
    let (mantissa, rest) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    normalize_exponent(&format!("{}e{}", strip_zeros(mantissa), rest), upper)
}

fn exponent_of(rust_exp: &str) -> i32 {
    rust_exp
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0)
}

/// `1.5e3` -> `1.5e+03`.
fn normalize_exponent(rust_exp: &str, upper: bool) -> String {
    let (mantissa, _) = rust_exp.split_once('e').unwrap_or((rust_exp, ""));
    let exp = exponent_of(rust_exp);
    format!(
        "{}{}{}{:02}",
        mantissa,
        if upper { 'E' } else { 'e' },
        if exp < 0 { '-' } else { '+' },
        exp.unsigned_abs()
    )
}

fn strip_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

/// Insert `sep` every three digits of the leading integer part.
fn group_digits(body: &str, sep: char) -> String {
    let digits_end = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    let (int_part, rest) = body.split_at(digits_end);

    let mut grouped = String::with_capacity(body.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(sep);
        }
        grouped.push(c);
    }
    grouped.push_str(rest);
    grouped
}

/// Group digits, extending the integer part with zeros until the grouped
/// text is at least `target` characters long.
fn group_zero_padded(body: &str, sep: char, target: usize) -> String {
    if !body.starts_with(|c: char| c.is_ascii_digit()) {
        return group_digits(body, sep);
    }
    let mut digits = body.to_string();
    let mut grouped = group_digits(&digits, sep);
    while grouped.chars().count() < target {
        digits.insert(0, '0');
        grouped = group_digits(&digits, sep);
    }
    grouped
}

/// Compiled template for integer and float cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberTemplate {
    raw: String,
    prefix: String,
    suffix: String,
    spec: NumberSpec,
}

impl NumberTemplate {
    /// Parse and check a numeric template.
    pub fn parse(raw: &str) -> TemplateResult<Self> {
        let pieces = split_template(raw)?;
        let spec = NumberSpec::parse(&pieces.spec)?;
        Ok(Self {
            raw: raw.to_string(),
            prefix: pieces.prefix,
            suffix: pieces.suffix,
            spec,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Format one cell. Missing values format as the empty string; callers
    /// substitute their own placeholder before reaching here.
    pub fn apply(&self, value: &CellValue) -> TemplateResult<String> {
        let body = match value {
            CellValue::Null => return Ok(String::new()),
            CellValue::Float(v) if v.is_nan() => return Ok(String::new()),
            CellValue::Integer(v) => self.spec.format_integer(*v)?,
            CellValue::Float(v) => self.spec.format_float(*v, ColumnKind::Float)?,
            other => {
                return Err(TemplateError::IncompatibleType {
                    spec: self.spec.text.clone(),
                    kind: other.kind().unwrap_or(ColumnKind::Text),
                })
            }
        };
        Ok(format!("{}{}{}", self.prefix, body, self.suffix))
    }
}

/// Compiled template for date and datetime cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTemplate {
    raw: String,
    prefix: String,
    suffix: String,
    pattern: Option<String>,
}

impl DateTemplate {
    /// Parse and check a date template. An empty spec keeps default rendering.
    pub fn parse(raw: &str) -> TemplateResult<Self> {
        let pieces = split_template(raw)?;
        if StrftimeItems::new(&pieces.spec).any(|item| matches!(item, Item::Error)) {
            return Err(TemplateError::invalid(
                &pieces.spec,
                "unrecognized strftime specifier",
            ));
        }
        Ok(Self {
            raw: raw.to_string(),
            prefix: pieces.prefix,
            suffix: pieces.suffix,
            pattern: (!pieces.spec.is_empty()).then_some(pieces.spec),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Format one cell. Missing values format as the empty string.
    pub fn apply(&self, value: &CellValue) -> TemplateResult<String> {
        let pattern = match (&self.pattern, value) {
            (_, CellValue::Null) => return Ok(String::new()),
            (None, CellValue::Date(_) | CellValue::DateTime(_)) => {
                return Ok(format!(
                    "{}{}{}",
                    self.prefix,
                    format_default(value, 0),
                    self.suffix
                ))
            }
            (Some(pattern), _) => pattern,
            (None, other) => {
                return Err(TemplateError::IncompatibleType {
                    spec: String::new(),
                    kind: other.kind().unwrap_or(ColumnKind::Text),
                })
            }
        };

        let mut out = self.prefix.clone();
        let written = match value {
            CellValue::Date(d) => write!(out, "{}", d.format(pattern)),
            CellValue::DateTime(dt) => write!(out, "{}", dt.format(pattern)),
            other => {
                return Err(TemplateError::IncompatibleType {
                    spec: pattern.clone(),
                    kind: other.kind().unwrap_or(ColumnKind::Text),
                })
            }
        };
        // Time specifiers on a plain date fail at write time.
        written.map_err(|_| TemplateError::IncompatibleType {
            spec: pattern.clone(),
            kind: value.kind().unwrap_or(ColumnKind::Date),
        })?;
        out.push_str(&self.suffix);
        Ok(out)
    }
}

/// Rendering for cells without a template.
///
/// Floats use `precision` decimals; booleans render as `True`/`False`;
/// missing values render empty.
pub fn format_default(value: &CellValue, precision: usize) -> String {
    match value {
        CellValue::Null => String::new(),
        CellValue::Text(s) => s.clone(),
        CellValue::Integer(v) => v.to_string(),
        CellValue::Float(v) if v.is_nan() => String::new(),
        CellValue::Float(v) if v.is_infinite() => {
            let inf = if *v > 0.0 { "inf" } else { "-inf" };
            inf.to_string()
        }
        CellValue::Float(v) => format!("{:.*}", precision, v),
        CellValue::Boolean(true) => "True".to_string(),
        CellValue::Boolean(false) => "False".to_string(),
        CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn num(template: &str, value: impl Into<CellValue>) -> String {
        NumberTemplate::parse(template)
            .unwrap()
            .apply(&value.into())
            .unwrap()
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(num("{:,}", 91i64), "91");
        assert_eq!(num("{:,}", 1243i64), "1,243");
        assert_eq!(num("{:,}", -1234567i64), "-1,234,567");
        assert_eq!(num("{:_}", 1000000i64), "1_000_000");
        assert_eq!(num("{:,.2f}", 1234567.891), "1,234,567.89");
    }

    #[test]
    fn test_float_types() {
        assert_eq!(num("{:.2f}", 3.14159), "3.14");
        assert_eq!(num("{:f}", 1.5), "1.500000");
        assert_eq!(num("{:.1%}", 0.256), "25.6%");
        assert_eq!(num("{:e}", 1500.0), "1.500000e+03");
        assert_eq!(num("{:.2E}", 0.000123), "1.23E-04");
        assert_eq!(num("{:g}", 0.0001), "0.0001");
        assert_eq!(num("{:g}", 1234567.0), "1.23457e+06");
        assert_eq!(num("{:g}", 0.0), "0");
        assert_eq!(num("{:F}", f64::INFINITY), "INF");
    }

    #[test]
    fn test_untyped_floats() {
        assert_eq!(num("{}", 1.5), "1.5");
        assert_eq!(num("{}", 2.0), "2.0");
        assert_eq!(num("{}", 1e16), "1e+16");
        assert_eq!(num("{:.3}", 3.14159), "3.14");
        assert_eq!(num("{:.3}", 3.0), "3.0");
        assert_eq!(num("{:.3}", 0.0), "0.0");
        assert_eq!(num("{:.3}", 100.0), "1e+02");
        assert_eq!(num("{:.1}", 3.0), "3e+00");
    }

    #[test]
    fn test_untyped_precision_rejects_integers() {
        let t = NumberTemplate::parse("{:.2}").unwrap();
        assert_eq!(
            t.apply(&CellValue::Integer(5)).unwrap_err(),
            TemplateError::IncompatibleType {
                spec: ".2".to_string(),
                kind: ColumnKind::Integer,
            }
        );
        assert_eq!(t.apply(&CellValue::Float(5.0)).unwrap(), "5.0");
    }

    #[test]
    fn test_integer_with_float_type() {
        assert_eq!(num("{:.1f}", 5i64), "5.0");
        assert_eq!(num("{:%}", 1i64), "100.000000%");
    }

    #[test]
    fn test_sign_and_padding() {
        assert_eq!(num("{:+d}", 5i64), "+5");
        assert_eq!(num("{: d}", 5i64), " 5");
        assert_eq!(num("{:>8}", 42i64), "      42");
        assert_eq!(num("{:*<6}", 7i64), "7*****");
        assert_eq!(num("{:^7}", 1i64), "   1   ");
        assert_eq!(num("{:08.2f}", -3.14159), "-0003.14");
        assert_eq!(num("{:=+6}", 12i64), "+   12");
        assert_eq!(num("{:<08}", 5i64), "50000000");
        assert_eq!(num("{:^05}", 1i64), "00100");
        assert_eq!(num("{:*<08}", 5i64), "5*******");
    }

    #[test]
    fn test_zero_padding_is_grouped() {
        assert_eq!(num("{:010,}", 1234i64), "00,001,234");
        assert_eq!(num("{:08,}", 1234i64), "0,001,234");
        assert_eq!(num("{:09,}", -1234i64), "-0,001,234");
        assert_eq!(num("{:012_.2f}", 1234.5), "0_001_234.50");
        assert_eq!(num("{:03,}", 1234i64), "1,234");
        assert_eq!(num("{:>010,}", 1234i64), "000001,234");
    }

    #[test]
    fn test_literal_text_and_braces() {
        assert_eq!(num("${:,} USD", 1243i64), "$1,243 USD");
        assert_eq!(num("{{{:d}}}", 3i64), "{3}");
        assert_eq!(num("{0:d}", 3i64), "3");
    }

    #[test]
    fn test_missing_values_format_empty() {
        let t = NumberTemplate::parse("{:,}").unwrap();
        assert_eq!(t.apply(&CellValue::Null).unwrap(), "");
        assert_eq!(t.apply(&CellValue::Float(f64::NAN)).unwrap(), "");
    }

    #[test]
    fn test_malformed_templates() {
        assert!(matches!(
            NumberTemplate::parse("no field"),
            Err(TemplateError::MissingField(_))
        ));
        assert!(matches!(
            NumberTemplate::parse("{}{}"),
            Err(TemplateError::MultipleFields(_))
        ));
        assert!(matches!(
            NumberTemplate::parse("{:,"),
            Err(TemplateError::UnbalancedBrace(_))
        ));
        assert!(matches!(
            NumberTemplate::parse("x}"),
            Err(TemplateError::UnbalancedBrace(_))
        ));
        assert!(matches!(
            NumberTemplate::parse("{:q}"),
            Err(TemplateError::InvalidSpec { .. })
        ));
        assert!(matches!(
            NumberTemplate::parse("{:.2d}"),
            Err(TemplateError::InvalidSpec { .. })
        ));
        assert!(matches!(
            NumberTemplate::parse("{:.f}"),
            Err(TemplateError::InvalidSpec { .. })
        ));
        assert!(matches!(
            NumberTemplate::parse("{name:,}"),
            Err(TemplateError::InvalidSpec { .. })
        ));
        assert!(matches!(
            NumberTemplate::parse("{:.70000f}"),
            Err(TemplateError::InvalidSpec { .. })
        ));
        assert!(matches!(
            NumberTemplate::parse("{:.70000}"),
            Err(TemplateError::InvalidSpec { .. })
        ));
        assert!(matches!(
            NumberTemplate::parse("{:99999999999}"),
            Err(TemplateError::InvalidSpec { .. })
        ));
        assert!(matches!(
            NumberTemplate::parse("{:999999999999999999999999}"),
            Err(TemplateError::InvalidSpec { .. })
        ));
        assert!(NumberTemplate::parse("{:1024.100e}").is_ok());
    }

    #[test]
    fn test_incompatible_values() {
        let t = NumberTemplate::parse("{:d}").unwrap();
        assert_eq!(
            t.apply(&CellValue::Float(1.5)).unwrap_err(),
            TemplateError::IncompatibleType {
                spec: "d".to_string(),
                kind: ColumnKind::Float,
            }
        );
        let t = NumberTemplate::parse("{:,}").unwrap();
        assert!(t.apply(&CellValue::from("text")).is_err());
    }

    #[test]
    fn test_date_templates() {
        let date = CellValue::from(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap());
        let datetime = CellValue::from(
            NaiveDate::from_ymd_opt(1970, 1, 2)
                .unwrap()
                .and_hms_opt(13, 45, 0)
                .unwrap(),
        );

        let t = DateTemplate::parse("{:%d/%m/%Y}").unwrap();
        assert_eq!(t.apply(&date).unwrap(), "02/01/1970");
        assert_eq!(t.apply(&datetime).unwrap(), "02/01/1970");

        let t = DateTemplate::parse("at {:%H:%M}").unwrap();
        assert_eq!(t.apply(&datetime).unwrap(), "at 13:45");
        assert!(matches!(
            t.apply(&date),
            Err(TemplateError::IncompatibleType { .. })
        ));

        let t = DateTemplate::parse("[{}]").unwrap();
        assert_eq!(t.apply(&date).unwrap(), "[1970-01-02]");
        assert_eq!(t.apply(&CellValue::Null).unwrap(), "");
    }

    #[test]
    fn test_invalid_date_spec() {
        assert!(matches!(
            DateTemplate::parse("{:%Q}"),
            Err(TemplateError::InvalidSpec { .. })
        ));
    }

    #[test]
    fn test_format_default() {
        assert_eq!(format_default(&CellValue::Float(1.5), 6), "1.500000");
        assert_eq!(format_default(&CellValue::Float(1.5), 1), "1.5");
        assert_eq!(format_default(&CellValue::Boolean(true), 6), "True");
        assert_eq!(format_default(&CellValue::Integer(-3), 6), "-3");
        assert_eq!(format_default(&CellValue::Null, 6), "");
        let dt = NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            format_default(&CellValue::DateTime(dt), 6),
            "1970-01-01 00:00:00"
        );
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1234567.5", ','), "1,234,567.5");
        assert_eq!(group_digits("123", ','), "123");
        assert_eq!(group_digits("inf", ','), "inf");
    }
}
