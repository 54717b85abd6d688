/// Decimal separator used by numeric import cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecimalSeparator {
    #[default]
    Dot,
    /// `,` is the decimal mark and `.` groups thousands.
    Comma,
}

impl DecimalSeparator {
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Comma => ',',
        }
    }
}

/// Parses a numeric cell, stripping whitespace and the thousands separator
/// implied by `separator`. Returns `None` for blank, malformed or non-finite input.
#[must_use]
pub fn parse_numeric(input: &str, separator: DecimalSeparator) -> Option<f64> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized = match separator {
        DecimalSeparator::Dot => compact.replace(',', ""),
        DecimalSeparator::Comma => compact.replace('.', "").replace(',', "."),
    };
    if normalized.is_empty() {
        return None;
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_swap_roles() {
        assert_eq!(parse_numeric("1.234,5", DecimalSeparator::Comma), Some(1234.5));
        assert_eq!(parse_numeric("1,234.5", DecimalSeparator::Dot), Some(1234.5));
        assert_eq!(parse_numeric(" -3 000,25 ", DecimalSeparator::Comma), Some(-3000.25));
    }

    #[test]
    fn malformed_and_non_finite_cells_are_rejected() {
        assert_eq!(parse_numeric("", DecimalSeparator::Dot), None);
        assert_eq!(parse_numeric("   ", DecimalSeparator::Dot), None);
        assert_eq!(parse_numeric("abc", DecimalSeparator::Dot), None);
        assert_eq!(parse_numeric("inf", DecimalSeparator::Dot), None);
        assert_eq!(parse_numeric("NaN", DecimalSeparator::Comma), None);
    }
}
