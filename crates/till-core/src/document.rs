//! # Customer Document Validation
//!
//! Checksum validation of Brazilian CPF numbers.
//!
//! ## How the Check Digits Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  347.867.458-12                                                        │
//! │       │                                                                 │
//! │       ▼  strip '.', '-', whitespace                                    │
//! │  34786745812                                                           │
//! │  └───body──┘└┘ check digits                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  first  = Σ body[i] × (10 − i)              → 296 % 11 = 10 → 1        │
//! │  second = Σ body[i] × (11 − i) + 2 × first  → 350 % 11 =  9 → 2        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "12" == "12" ✓                                                        │
//! │                                                                         │
//! │  digit = remainder < 2 ? 0 : 11 − remainder                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lengths from 9 to 11 digits are accepted; the body is always every
//! digit except the last two.

/// Shortest accepted document, in digits.
pub const MIN_DOCUMENT_DIGITS: usize = 9;

/// Longest accepted document, in digits.
pub const MAX_DOCUMENT_DIGITS: usize = 11;

/// Validates a customer document (CPF).
///
/// ## Rules
/// - `.`, `-` and whitespace are separators and are ignored
/// - Any other non-digit character rejects the document
/// - 9 to 11 digits, not all the same digit
/// - The last two digits must equal the computed check digits
///
/// ## Example
/// ```rust
/// use till_core::document::validate_document;
///
/// assert!(validate_document(" 347.867.458-12 "));
/// assert!(!validate_document("347.867.4a8-12"));
/// assert!(!validate_document("1234"));
/// ```
pub fn validate_document(raw: &str) -> bool {
    let Some(digits) = sanitize(raw) else {
        return false;
    };

    if digits.len() < MIN_DOCUMENT_DIGITS
        || digits.len() > MAX_DOCUMENT_DIGITS
        || all_equal(&digits)
    {
        return false;
    }

    let (body, expected) = digits.split_at(digits.len() - 2);
    let (first, second) = check_digits(body);

    expected == [first, second]
}

/// Removes separators and converts the remaining characters to digit values.
///
/// Returns `None` if anything other than a separator or ASCII digit is found.
fn sanitize(raw: &str) -> Option<Vec<u32>> {
    raw.chars()
        .filter(|c| !is_separator(*c))
        .map(|c| if c.is_ascii_digit() { c.to_digit(10) } else { None })
        .collect()
}

#[inline]
fn is_separator(c: char) -> bool {
    c == '.' || c == '-' || c.is_whitespace()
}

fn all_equal(digits: &[u32]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

/// Computes both check digits for `body`.
fn check_digits(body: &[u32]) -> (u32, u32) {
    let mut first_sum = 0;
    let mut second_sum = 0;

    for (i, digit) in body.iter().enumerate() {
        let i = i as u32;
        first_sum += digit * (10 - i);
        second_sum += digit * (11 - i);
    }

    let first = check_digit(first_sum);
    second_sum += 2 * first;

    (first, check_digit(second_sum))
}

#[inline]
fn check_digit(sum: u32) -> u32 {
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_documents() {
        assert!(!validate_document("1234"));
        assert!(!validate_document("123"));
        assert!(!validate_document(""));
    }

    #[test]
    fn test_rejects_long_documents() {
        assert!(!validate_document("123.456.789-123456"));
    }

    #[test]
    fn test_rejects_repeated_digits() {
        assert!(!validate_document("11111111111"));
        assert!(!validate_document("000.000.000-00"));
    }

    #[test]
    fn test_accepts_separators_and_spaces() {
        assert!(validate_document(" 347.867.458-12 "));
        assert!(validate_document("34786745812"));
    }

    #[test]
    fn test_rejects_stray_characters() {
        assert!(!validate_document("347.867.4a8-12"));
        assert!(!validate_document("347/867/458-12"));
    }

    #[test]
    fn test_rejects_wrong_check_digits() {
        assert!(!validate_document("123.456.789-00"));
        assert!(!validate_document("347.867.458-13"));
    }

    #[test]
    fn test_accepts_valid_documents() {
        assert!(validate_document("347.867.458-12"));
        assert!(validate_document("123.456.789-09"));
    }

    #[test]
    fn test_check_digits_of_known_body() {
        assert_eq!(check_digits(&[3, 4, 7, 8, 6, 7, 4, 5, 8]), (1, 2));
        assert_eq!(check_digits(&[1, 2, 3, 4, 5, 6, 7, 8, 9]), (0, 9));
    }

    #[test]
    fn test_short_body_uses_same_weights() {
        // 9-digit input: body is the first 7 digits
        let body = [1, 2, 3, 4, 5, 6, 7];
        let (first, second) = check_digits(&body);
        let document = format!("1234567{}{}", first, second);
        assert!(validate_document(&document));
    }
}
