/// Result of scoring one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Empty or placeholder input; nothing was scored.
    Ignored,
    Correct,
    Incorrect,
}

impl Outcome {
    /// True when the submission counted as an attempt.
    #[must_use]
    pub fn is_scored(self) -> bool {
        !matches!(self, Outcome::Ignored)
    }
}

/// Interpretation of raw answer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerInput {
    /// Nothing entered yet, or only a bare minus sign.
    Blank,
    /// Leading integer of the input.
    Value(i64),
    /// Non-blank input without a usable leading integer.
    Unparsable,
}

/// Read the leading integer of `raw`.
///
/// Parsing is lenient: surrounding whitespace is skipped, a single `+` or `-`
/// sign is accepted, and anything after the leading digits is ignored, so
/// `"12abc"` reads as `12`. Input that has no leading digits, or whose digits
/// overflow `i64`, is `Unparsable` and scores as a wrong answer.
#[must_use]
pub fn parse_answer(raw: &str) -> AnswerInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return AnswerInput::Blank;
    }

    let (negative, rest) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return AnswerInput::Unparsable;
    }

    let mut value: i64 = 0;
    for digit in rest[..digits_len].bytes() {
        let step = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(digit - b'0')));
        match step {
            Some(next) => value = next,
            None => return AnswerInput::Unparsable,
        }
    }

    AnswerInput::Value(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_bare_minus_are_blank() {
        assert_eq!(parse_answer(""), AnswerInput::Blank);
        assert_eq!(parse_answer("   "), AnswerInput::Blank);
        assert_eq!(parse_answer("-"), AnswerInput::Blank);
    }

    #[test]
    fn zero_is_a_value() {
        assert_eq!(parse_answer("0"), AnswerInput::Value(0));
        assert_eq!(parse_answer("-0"), AnswerInput::Value(0));
    }

    #[test]
    fn trailing_garbage_is_tolerated() {
        assert_eq!(parse_answer("12abc"), AnswerInput::Value(12));
        assert_eq!(parse_answer(" 42 "), AnswerInput::Value(42));
        assert_eq!(parse_answer("4.9"), AnswerInput::Value(4));
        assert_eq!(parse_answer("-7x"), AnswerInput::Value(-7));
        assert_eq!(parse_answer("+5"), AnswerInput::Value(5));
    }

    #[test]
    fn input_without_leading_digits_is_unparsable() {
        assert_eq!(parse_answer("abc"), AnswerInput::Unparsable);
        assert_eq!(parse_answer("+"), AnswerInput::Unparsable);
        assert_eq!(parse_answer("--3"), AnswerInput::Unparsable);
        assert_eq!(parse_answer("99999999999999999999"), AnswerInput::Unparsable);
    }

    #[test]
    fn only_ignored_is_unscored() {
        assert!(!Outcome::Ignored.is_scored());
        assert!(Outcome::Correct.is_scored());
        assert!(Outcome::Incorrect.is_scored());
    }
}
