use std::convert::Infallible;
use std::str::FromStr;

/// Field separator for delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
    Pipe,
    Space,
    /// Any literal string, possibly multi-character. Empty yields an empty table.
    Custom(String),
}

/// Candidates considered by [`Delimiter::sniff`], in tie-break order.
const SNIFF_CANDIDATES: [Delimiter; 4] = [
    Delimiter::Tab,
    Delimiter::Semicolon,
    Delimiter::Comma,
    Delimiter::Pipe,
];

impl Delimiter {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Tab => "\t",
            Self::Pipe => "|",
            Self::Space => " ",
            Self::Custom(value) => value,
        }
    }

    /// Picks the candidate that occurs most often in the first non-empty line.
    ///
    /// Falls back to comma when none occurs.
    #[must_use]
    pub fn sniff(text: &str) -> Self {
        let Some(line) = text.lines().find(|line| !line.trim().is_empty()) else {
            return Self::Comma;
        };
        let mut best = Self::Comma;
        let mut best_count = 0;
        for candidate in SNIFF_CANDIDATES {
            let count = line.matches(candidate.as_str()).count();
            if count > best_count {
                best_count = count;
                best = candidate;
            }
        }
        best
    }
}

impl FromStr for Delimiter {
    type Err = Infallible;

    /// Accepts names (`comma`, `tab`, ...), the literal characters, or any custom string.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(match input {
            "comma" | "," => Self::Comma,
            "semicolon" | ";" => Self::Semicolon,
            "tab" | "\t" | "\\t" => Self::Tab,
            "pipe" | "|" => Self::Pipe,
            "space" | " " => Self::Space,
            other => Self::Custom(other.to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_counts_first_non_empty_line() {
        assert_eq!(Delimiter::sniff("\n\na;b;c\nx,y,z,w,v"), Delimiter::Semicolon);
        assert_eq!(Delimiter::sniff("a\tb\tc"), Delimiter::Tab);
        assert_eq!(Delimiter::sniff("a|b"), Delimiter::Pipe);
        assert_eq!(Delimiter::sniff("single"), Delimiter::Comma);
        assert_eq!(Delimiter::sniff(""), Delimiter::Comma);
    }

    #[test]
    fn names_parse_and_unknown_strings_become_custom() {
        assert_eq!("tab".parse::<Delimiter>(), Ok(Delimiter::Tab));
        assert_eq!(";".parse::<Delimiter>(), Ok(Delimiter::Semicolon));
        assert_eq!(
            "::".parse::<Delimiter>(),
            Ok(Delimiter::Custom("::".to_owned()))
        );
    }
}
