/// What an imported column feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Label,
    Value,
    Error,
    Group,
}

impl ColumnRole {
    /// Claim order used by inference.
    pub const ALL: [Self; 4] = [Self::Label, Self::Value, Self::Error, Self::Group];

    /// Lowercase header prefixes that identify this role.
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Label => &["label", "name", "title"],
            Self::Value => &["value", "amount", "score", "total", "count", "number"],
            Self::Error => &["error", "err", "uncert", "sd", "stdev"],
            Self::Group => &["group", "category", "series", "segment"],
        }
    }

    fn matches(self, header: &str) -> bool {
        self.keywords()
            .iter()
            .any(|keyword| header.starts_with(keyword))
    }
}

/// Column index per role; `None` leaves the role unmapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColumnMapping {
    pub label: Option<usize>,
    pub value: Option<usize>,
    pub error: Option<usize>,
    pub group: Option<usize>,
}

impl ColumnMapping {
    /// Guesses roles from header names.
    ///
    /// Roles claim columns in [`ColumnRole::ALL`] order by keyword prefix
    /// (case-insensitive). Label then falls back to the first unclaimed column
    /// and value to the next one, so the two never coincide. When no column is
    /// left, a required role takes over the group column, then the error column.
    #[must_use]
    pub fn infer(headers: &[String]) -> Self {
        let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let mut claimed = vec![false; normalized.len()];
        let mut mapping = Self::default();

        for role in ColumnRole::ALL {
            let found = normalized
                .iter()
                .enumerate()
                .find(|(index, header)| !claimed[*index] && role.matches(header))
                .map(|(index, _)| index);
            if let Some(index) = found {
                claimed[index] = true;
                mapping.set(role, Some(index));
            }
        }

        if mapping.label.is_none() {
            let label = mapping.fallback_column(&mut claimed);
            mapping.label = label;
        }
        if mapping.value.is_none() {
            let value = mapping.fallback_column(&mut claimed);
            mapping.value = value;
        }
        mapping
    }

    /// First unclaimed column, else the column held by group, then error.
    fn fallback_column(&mut self, claimed: &mut [bool]) -> Option<usize> {
        if let Some(index) = claimed.iter().position(|taken| !taken) {
            claimed[index] = true;
            return Some(index);
        }
        self.group.take().or_else(|| self.error.take())
    }

    /// Pulls every index into `[0, column_count)`; all roles unmap when there are no columns.
    #[must_use]
    pub fn clamped(self, column_count: usize) -> Self {
        let clamp = |index: Option<usize>| {
            let last = column_count.checked_sub(1)?;
            index.map(|index| index.min(last))
        };
        Self {
            label: clamp(self.label),
            value: clamp(self.value),
            error: clamp(self.error),
            group: clamp(self.group),
        }
    }

    #[must_use]
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Label => self.label,
            ColumnRole::Value => self.value,
            ColumnRole::Error => self.error,
            ColumnRole::Group => self.group,
        }
    }

    pub fn set(&mut self, role: ColumnRole, index: Option<usize>) {
        let slot = match role {
            ColumnRole::Label => &mut self.label,
            ColumnRole::Value => &mut self.value,
            ColumnRole::Error => &mut self.error,
            ColumnRole::Group => &mut self.group,
        };
        *slot = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn keyword_headers_claim_their_roles() {
        let mapping = ColumnMapping::infer(&headers(&["Name", "Score", "Error"]));
        assert_eq!(mapping.label, Some(0));
        assert_eq!(mapping.value, Some(1));
        assert_eq!(mapping.error, Some(2));
        assert_eq!(mapping.group, None);

        let mapping = ColumnMapping::infer(&headers(&["Series", "Uncertainty", "TOTAL", "Title"]));
        assert_eq!(mapping.label, Some(3));
        assert_eq!(mapping.value, Some(2));
        assert_eq!(mapping.error, Some(1));
        assert_eq!(mapping.group, Some(0));
    }

    #[test]
    fn unknown_headers_fall_back_positionally() {
        let mapping = ColumnMapping::infer(&headers(&["Column 1", "Column 2", "Column 3"]));
        assert_eq!(mapping.label, Some(0));
        assert_eq!(mapping.value, Some(1));
        assert_eq!(mapping.error, None);

        let mapping = ColumnMapping::infer(&headers(&["Score", "Other"]));
        assert_eq!(mapping.label, Some(1));
        assert_eq!(mapping.value, Some(0));
    }

    #[test]
    fn required_roles_take_over_optional_columns() {
        let mapping = ColumnMapping::infer(&headers(&["Category", "Value"]));
        assert_eq!(mapping.label, Some(0));
        assert_eq!(mapping.value, Some(1));
        assert_eq!(mapping.group, None);

        let mapping = ColumnMapping::infer(&headers(&["Name", "Err"]));
        assert_eq!(mapping.label, Some(0));
        assert_eq!(mapping.value, Some(1));
        assert_eq!(mapping.error, None);

        let mapping = ColumnMapping::infer(&headers(&["Category", "Value", "Notes"]));
        assert_eq!(mapping.label, Some(2));
        assert_eq!(mapping.group, Some(0));
    }

    #[test]
    fn single_column_leaves_value_unmapped() {
        let mapping = ColumnMapping::infer(&headers(&["Name"]));
        assert_eq!(mapping.label, Some(0));
        assert_eq!(mapping.value, None);
    }

    #[test]
    fn clamping_pulls_indices_into_range() {
        let mapping = ColumnMapping {
            label: Some(0),
            value: Some(5),
            error: Some(2),
            group: None,
        };
        let clamped = mapping.clamped(2);
        assert_eq!(clamped.value, Some(1));
        assert_eq!(clamped.error, Some(1));
        assert_eq!(mapping.clamped(0), ColumnMapping::default());
    }
}
