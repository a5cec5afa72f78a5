use std::{fmt, str::FromStr};

/// A publication year, as entered by a user.
///
/// A valid year is exactly four ASCII digits in the range 1000 to 9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(u16);

impl Year {
    /// The earliest accepted year.
    pub const MIN: u16 = 1000;

    /// The latest accepted year.
    pub const MAX: u16 = 9999;

    /// Creates a new [`Year`] from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns [`YearError::OutOfRange`] if the value is not a four-digit year.
    pub const fn new(value: u16) -> Result<Self, YearError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(YearError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// The numeric value of the year.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl FromStr for Year {
    type Err = YearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(YearError::NotFourDigits(s.to_string()));
        }

        // four ASCII digits always fit in a u16
        let value = s
            .parse()
            .map_err(|_| YearError::NotFourDigits(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The reasons a year can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum YearError {
    /// The input is not made up of exactly four digits.
    #[error("'{0}' is not a four-digit year")]
    NotFourDigits(String),

    /// The value is outside the accepted range.
    #[error("{0} is outside the range {min}-{max}", min = Year::MIN, max = Year::MAX)]
    OutOfRange(u16),
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("1000", 1000; "lower bound")]
    #[test_case("2001", 2001; "typical")]
    #[test_case("9999", 9999; "upper bound")]
    #[test_case(" 1984\n", 1984; "surrounding whitespace")]
    fn parses_valid_years(input: &str, expected: u16) {
        let year: Year = input.parse().unwrap();
        assert_eq!(year.value(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("999"; "three digits")]
    #[test_case("10000"; "five digits")]
    #[test_case("20a1"; "letter")]
    #[test_case("-200"; "negative")]
    #[test_case("+200"; "sign")]
    fn rejects_malformed_years(input: &str) {
        let error = input.parse::<Year>().unwrap_err();
        assert!(matches!(error, YearError::NotFourDigits(_)));
    }

    #[test]
    fn rejects_leading_zero() {
        let error = "0999".parse::<Year>().unwrap_err();
        assert_eq!(error, YearError::OutOfRange(999));
    }

    #[test]
    fn displays_as_four_digits() {
        assert_eq!(Year::new(1949).unwrap().to_string(), "1949");
    }
}
