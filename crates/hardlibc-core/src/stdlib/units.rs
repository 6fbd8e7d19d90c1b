//! Unit-suffix categories and their exact-match whitelists.
//!
//! A category maps to a fixed set of accepted suffix strings. Matching is
//! exact (case included); a successful match yields the canonical whitelist
//! entry, so callers can compare captured units by pointer or by value.

/// The value domain a unit suffix is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitCategory {
    /// No suffix permitted; the whole token must be numeric.
    #[default]
    None,
    DataSize,
    SectorType,
    Time,
    Power,
    Volts,
    Amps,
    Temperature,
}

impl UnitCategory {
    /// The fixed whitelist for this category.
    pub fn whitelist(self) -> &'static [&'static str] {
        match self {
            UnitCategory::None => &[],
            UnitCategory::DataSize => &[
                "B", "KB", "KiB", "MB", "MiB", "GB", "GiB", "TB", "TiB", "BLOCKS", "SECTORS",
            ],
            UnitCategory::SectorType => &["l", "p", "logical", "physical"],
            UnitCategory::Time => &["ns", "us", "ms", "s", "m", "h"],
            UnitCategory::Power => &["W", "mW"],
            UnitCategory::Volts => &["V", "mV"],
            UnitCategory::Amps => &["A", "mA"],
            UnitCategory::Temperature => &["c", "f", "k"],
        }
    }

    /// Exact-match lookup. Returns the canonical whitelist entry.
    pub fn match_suffix(self, suffix: &str) -> Option<&'static str> {
        self.whitelist().iter().copied().find(|unit| *unit == suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_only() {
        assert_eq!(UnitCategory::DataSize.match_suffix("KB"), Some("KB"));
        assert_eq!(UnitCategory::DataSize.match_suffix("kb"), None);
        assert_eq!(UnitCategory::DataSize.match_suffix("XB"), None);
        assert_eq!(UnitCategory::DataSize.match_suffix(""), None);
    }

    #[test]
    fn test_temperature_is_lowercase() {
        assert_eq!(UnitCategory::Temperature.match_suffix("c"), Some("c"));
        assert_eq!(UnitCategory::Temperature.match_suffix("C"), None);
    }

    #[test]
    fn test_none_category_matches_nothing() {
        assert!(UnitCategory::None.whitelist().is_empty());
        assert_eq!(UnitCategory::None.match_suffix("s"), None);
    }

    #[test]
    fn test_canonical_entry_identity() {
        let unit = UnitCategory::Time.match_suffix("ms").unwrap();
        assert!(UnitCategory::Time.whitelist().contains(&unit));
    }
}
