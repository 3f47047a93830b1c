//! # Number Parser Module
//!
//! Structured scanner for the leading amount of an ingredient line.
//!
//! ## Grammar
//!
//! ```text
//! leading-amount := approx-prefix? ' '* NUMBER ( [ -]+ NUMBER )?
//! NUMBER         := DECIMAL ( ' '+ FRACTION )? | FRACTION
//! DECIMAL        := digits ( [.,] digits )?
//! FRACTION       := digits '/' digits
//! ```
//!
//! A comma counts as a decimal point ("2,45" is 2.45). Numbers end at a token
//! boundary: the next character is neither a digit nor a slash, so "11/2" is
//! the pure fraction 5.5 and "2,45kg" consumes "2,45". An approximation
//! prefix ("ca.", "omtrent") is only consumed when a number follows it.

use log::trace;

use crate::amount::Amount;

/// Scanner for the leading-amount grammar
#[derive(Debug, Clone)]
pub struct NumberParser {
    /// Approximation prefixes, longest first so "ca." wins over "ca"
    prefixes: Vec<String>,
}

impl NumberParser {
    pub fn new(approx_prefixes: &[String]) -> Self {
        let mut prefixes: Vec<String> = approx_prefixes
            .iter()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect();
        prefixes.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { prefixes }
    }

    /// Scan the leading amount of `text`.
    ///
    /// Returns the parsed [`Amount`] and the exact consumed prefix of `text`,
    /// which the caller strips before looking for a unit. No number means an
    /// unspecified amount and an empty slice, never an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use groceries::amount::Amount;
    /// use groceries::number_parser::NumberParser;
    ///
    /// let parser = NumberParser::new(&["ca.".to_string(), "ca".to_string()]);
    /// let (amount, consumed) = parser.leading_amount("10-12 g safran");
    /// assert_eq!(amount, Amount::Range(10.0, 12.0));
    /// assert_eq!(consumed, "10-12");
    /// ```
    pub fn leading_amount<'a>(&self, text: &'a str) -> (Amount, &'a str) {
        let bytes = text.as_bytes();
        let mut start = 0;
        for prefix in &self.prefixes {
            if text.starts_with(prefix.as_str()) {
                start = prefix.len();
                break;
            }
        }
        let number_start = skip_spaces(bytes, start);

        let (first, first_end) = match scan_number(text, number_start) {
            Some(hit) => hit,
            None => return (Amount::Unspecified, ""),
        };

        // A run of spaces and dashes separates the two ends of a range
        let separator_end = skip_range_separator(bytes, first_end);
        if separator_end > first_end {
            if let Some((second, second_end)) = scan_number(text, separator_end) {
                trace!("Scanned range [{first}, {second}] from '{text}'");
                return (Amount::Range(first, second), &text[..second_end]);
            }
        }
        trace!("Scanned single amount {first} from '{text}'");
        (Amount::Single(first), &text[..first_end])
    }
}

fn skip_spaces(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos] == b' ' {
        pos += 1;
    }
    pos
}

fn skip_range_separator(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && (bytes[pos] == b' ' || bytes[pos] == b'-') {
        pos += 1;
    }
    pos
}

fn digit_run_end(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

/// A number token must not be followed by a digit or a slash
fn at_boundary(bytes: &[u8], pos: usize) -> bool {
    pos >= bytes.len() || (bytes[pos] != b'/' && !bytes[pos].is_ascii_digit())
}

/// NUMBER at `start`: a decimal with an optional mixed fraction, or a pure
/// fraction. Returns the value and the end of the consumed token.
fn scan_number(text: &str, start: usize) -> Option<(f64, usize)> {
    let bytes = text.as_bytes();
    let int_end = digit_run_end(bytes, start);
    if int_end > start {
        // decimal tail: one '.' or ',' followed by digits
        let mut end = int_end;
        if int_end < bytes.len() && (bytes[int_end] == b'.' || bytes[int_end] == b',') {
            let tail_end = digit_run_end(bytes, int_end + 1);
            if tail_end > int_end + 1 && at_boundary(bytes, tail_end) {
                end = tail_end;
            }
        }
        if end > int_end {
            let value = parse_decimal(&text[start..end])?;
            return Some(with_mixed_fraction(text, value, end));
        }
        if at_boundary(bytes, int_end) {
            let value = parse_decimal(&text[start..int_end])?;
            return Some(with_mixed_fraction(text, value, int_end));
        }
        // a slash follows the digits: re-read the whole token as a fraction
    }
    scan_fraction(text, start)
}

/// Absorb a mixed-number fraction after at least one space ("1 1/2" = 1.5)
fn with_mixed_fraction(text: &str, value: f64, end: usize) -> (f64, usize) {
    let bytes = text.as_bytes();
    let fraction_start = skip_spaces(bytes, end);
    if fraction_start > end {
        if let Some((fraction, fraction_end)) = scan_fraction(text, fraction_start) {
            return (value + fraction, fraction_end);
        }
    }
    (value, end)
}

/// FRACTION at `start`: digits '/' digits, ending at a token boundary.
/// A zero denominator does not scan as a number.
fn scan_fraction(text: &str, start: usize) -> Option<(f64, usize)> {
    let bytes = text.as_bytes();
    let numerator_end = digit_run_end(bytes, start);
    if numerator_end == start || numerator_end >= bytes.len() || bytes[numerator_end] != b'/' {
        return None;
    }
    let denominator_end = digit_run_end(bytes, numerator_end + 1);
    if denominator_end == numerator_end + 1 || !at_boundary(bytes, denominator_end) {
        return None;
    }
    let numerator: f64 = text[start..numerator_end].parse().ok()?;
    let denominator: f64 = text[numerator_end + 1..denominator_end].parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some((numerator / denominator, denominator_end))
}

fn parse_decimal(text: &str) -> Option<f64> {
    text.replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> NumberParser {
        NumberParser::new(&crate::config::LanguagePack::norwegian().approx_prefixes)
    }

    #[test]
    fn test_single_integer() {
        let (amount, consumed) = parser().leading_amount("1 pakke spaghetti");
        assert_eq!(amount, Amount::Single(1.0));
        assert_eq!(consumed, "1");
    }

    #[test]
    fn test_comma_decimal_ends_at_unit() {
        let (amount, consumed) = parser().leading_amount("2,45kg smør");
        assert_eq!(amount, Amount::Single(2.45));
        assert_eq!(consumed, "2,45");
    }

    #[test]
    fn test_dash_range() {
        let (amount, consumed) = parser().leading_amount("10-12 g safran");
        assert_eq!(amount, Amount::Range(10.0, 12.0));
        assert_eq!(consumed, "10-12");
    }

    #[test]
    fn test_spaced_dash_range() {
        let (amount, consumed) = parser().leading_amount("50 - 100 g smør");
        assert_eq!(amount, Amount::Range(50.0, 100.0));
        assert_eq!(consumed, "50 - 100");
    }

    #[test]
    fn test_pure_fraction() {
        let (amount, consumed) = parser().leading_amount("2/3 løk");
        assert_eq!(amount, Amount::Single(2.0 / 3.0));
        assert_eq!(consumed, "2/3");
    }

    #[test]
    fn test_mixed_number() {
        let (amount, consumed) = parser().leading_amount("1 1/2 teskjeer soyasaus");
        assert_eq!(amount, Amount::Single(1.5));
        assert_eq!(consumed, "1 1/2");
    }

    #[test]
    fn test_adjacent_digits_read_as_one_fraction() {
        let (amount, consumed) = parser().leading_amount("11/2 dl");
        assert_eq!(amount, Amount::Single(5.5));
        assert_eq!(consumed, "11/2");
    }

    #[test]
    fn test_range_with_mixed_second_number() {
        let (amount, consumed) = parser().leading_amount("2 - 2 1/2 ounces sukker");
        assert_eq!(amount, Amount::Range(2.0, 2.5));
        assert_eq!(consumed, "2 - 2 1/2");
    }

    #[test]
    fn test_prefix_consumed_with_number() {
        let (amount, consumed) = parser().leading_amount("ca. 1/2 gram safran");
        assert_eq!(amount, Amount::Single(0.5));
        assert_eq!(consumed, "ca. 1/2");
    }

    #[test]
    fn test_prefix_without_number_consumes_nothing() {
        let (amount, consumed) = parser().leading_amount("ca. banana");
        assert_eq!(amount, Amount::Unspecified);
        assert_eq!(consumed, "");
    }

    #[test]
    fn test_prefix_inside_word_consumes_nothing() {
        let (amount, consumed) = parser().leading_amount("camembert");
        assert_eq!(amount, Amount::Unspecified);
        assert_eq!(consumed, "");
    }

    #[test]
    fn test_no_leading_number() {
        let (amount, consumed) = parser().leading_amount("bananer");
        assert_eq!(amount, Amount::Unspecified);
        assert_eq!(consumed, "");
    }

    #[test]
    fn test_number_later_in_text_is_ignored() {
        let (amount, consumed) = parser().leading_amount("over 9000 units");
        assert_eq!(amount, Amount::Unspecified);
        assert_eq!(consumed, "");
    }

    #[test]
    fn test_zero_denominator_is_not_a_number() {
        let (amount, consumed) = parser().leading_amount("1/0 juice");
        assert_eq!(amount, Amount::Unspecified);
        assert_eq!(consumed, "");
    }

    #[test]
    fn test_dangling_separator_not_consumed() {
        let (amount, consumed) = parser().leading_amount("1 - x");
        assert_eq!(amount, Amount::Single(1.0));
        assert_eq!(consumed, "1");
    }

    #[test]
    fn test_spaces_separate_ranges_not_digit_groups() {
        let (amount, consumed) = parser().leading_amount("10 12 g");
        assert_eq!(amount, Amount::Range(10.0, 12.0));
        assert_eq!(consumed, "10 12");
    }
}
