//! Locale-independent text-to-number primitives and the delimited-list
//! reader used to build values from strings.

use crate::scalar::Scalar;

const LEADING_SPACE: &[char] = &[' ', '\t'];
const DELIMITERS: &[char] = &[' ', ',', '\t'];

/// Parses an optionally signed decimal integer at the start of `text`
/// (after leading whitespace). Stops at the first non-digit. Saturates
/// instead of overflowing.
pub fn int_prefix(text: &str) -> Option<i128> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mut value: i128 = 0;
    let mut any = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        any = true;
        value = value.saturating_mul(10).saturating_add(i128::from(b - b'0'));
    }
    any.then_some(if negative { -value } else { value })
}

/// Parses the longest prefix of `text` (after leading whitespace) that forms
/// a decimal floating-point number, `inf`/`infinity` or `nan`.
pub fn float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let rest = &text[end..];
    for word in ["infinity", "inf", "nan"] {
        if rest.get(..word.len()).is_some_and(|head| head.eq_ignore_ascii_case(word)) {
            return text[..end + word.len()].parse().ok();
        }
    }

    let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();
    let int_digits = count_digits(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    text[..end].parse().ok()
}

/// Parses a hexadecimal address prefix, with or without `0x`.
pub fn hex_prefix(text: &str) -> Option<u64> {
    let text = text.trim_start();
    let text = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    let len = text.bytes().take_while(u8::is_ascii_hexdigit).count();
    u64::from_str_radix(&text[..len], 16).ok()
}

/// Fills up to `count` components of type `T` in `out` from the delimited
/// list in `text`.
///
/// Components are separated by runs of spaces, commas and tabs. Reading
/// stops once the text is exhausted; untouched components keep whatever
/// `out` already held. Returns the number of components written.
pub fn parse_elements<T: Scalar>(text: &str, out: &mut [u8], count: usize) -> usize {
    let mut rest = text.trim_start_matches(LEADING_SPACE);
    if rest.is_empty() {
        return 0;
    }
    let mut written = 0;
    for slot in out.chunks_exact_mut(T::SIZE).take(count) {
        T::parse_prefix(rest).write(slot);
        written += 1;
        let token_end = rest.find(DELIMITERS).unwrap_or(rest.len());
        rest = rest[token_end..].trim_start_matches(DELIMITERS);
        if rest.is_empty() {
            break;
        }
    }
    if written < count {
        tracing::debug!(written, count, "delimited text ended before every slot was filled");
    }
    written
}
