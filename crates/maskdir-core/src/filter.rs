//! Record predicate for the directory's search and availability filters.

use crate::record::Pharmacy;

/// One filter condition over the record set. All present criteria AND
/// together; the default condition matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCondition {
    search: Option<String>,
    pub adult_in_stock: bool,
    pub child_in_stock: bool,
}

impl FilterCondition {
    #[must_use]
    pub fn new(search: Option<&str>, adult_in_stock: bool, child_in_stock: bool) -> Self {
        Self {
            search: normalize_search(search),
            adult_in_stock,
            child_in_stock,
        }
    }

    /// The active search term, if any survived trimming.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Replaces the search term, trimming and dropping empty input.
    pub fn set_search(&mut self, search: Option<&str>) {
        self.search = normalize_search(search);
    }

    /// Whether the record satisfies every specified criterion.
    ///
    /// The search term is a case-sensitive raw substring match against the
    /// name OR the address. The upstream text is Traditional Chinese; no
    /// normalization or case folding is applied, matching the upstream
    /// product behavior.
    #[must_use]
    pub fn matches(&self, pharmacy: &Pharmacy) -> bool {
        if let Some(term) = &self.search {
            if !pharmacy.properties.address.contains(term.as_str())
                && !pharmacy.properties.name.contains(term.as_str())
            {
                return false;
            }
        }
        if self.adult_in_stock && pharmacy.properties.mask_adult <= 0 {
            return false;
        }
        if self.child_in_stock && pharmacy.properties.mask_child <= 0 {
            return false;
        }
        true
    }
}

/// A whitespace-only search imposes no constraint on that axis.
fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Geometry, PharmacyProps};

    fn pharmacy(name: &str, address: &str, mask_adult: i64, mask_child: i64) -> Pharmacy {
        Pharmacy {
            kind: "Feature".to_string(),
            properties: PharmacyProps {
                id: 1,
                name: name.to_string(),
                phone: "(02)12345678".to_string(),
                address: address.to_string(),
                mask_adult,
                mask_child,
                updated: None,
            },
            geometry: Geometry {
                kind: "Point".to_string(),
                coordinates: vec![121.5, 25.0],
            },
        }
    }

    #[test]
    fn default_condition_matches_everything() {
        let cond = FilterCondition::default();
        assert!(cond.matches(&pharmacy("健康藥局", "台北市中正區", 0, 0)));
    }

    #[test]
    fn search_matches_name_or_address() {
        let ph = pharmacy("健康藥局", "台北市中正區重慶南路", 10, 10);
        assert!(FilterCondition::new(Some("健康"), false, false).matches(&ph));
        assert!(FilterCondition::new(Some("重慶南路"), false, false).matches(&ph));
        assert!(!FilterCondition::new(Some("高雄"), false, false).matches(&ph));
    }

    #[test]
    fn search_is_case_sensitive() {
        let ph = pharmacy("Healthy Pharmacy", "Taipei", 1, 1);
        assert!(FilterCondition::new(Some("Healthy"), false, false).matches(&ph));
        assert!(!FilterCondition::new(Some("healthy"), false, false).matches(&ph));
    }

    #[test]
    fn whitespace_only_search_is_no_constraint() {
        let cond = FilterCondition::new(Some("   "), false, false);
        assert!(cond.search().is_none());
        assert!(cond.matches(&pharmacy("a", "b", 0, 0)));
    }

    #[test]
    fn adult_flag_rejects_exactly_zero_stock() {
        let cond = FilterCondition::new(None, true, false);
        assert!(!cond.matches(&pharmacy("a", "b", 0, 50)));
        assert!(cond.matches(&pharmacy("a", "b", 1, 0)));
    }

    #[test]
    fn child_flag_rejects_exactly_zero_stock() {
        let cond = FilterCondition::new(None, false, true);
        assert!(!cond.matches(&pharmacy("a", "b", 50, 0)));
        assert!(cond.matches(&pharmacy("a", "b", 0, 1)));
    }

    #[test]
    fn criteria_combine_with_and() {
        let cond = FilterCondition::new(Some("台北"), true, true);
        assert!(cond.matches(&pharmacy("藥局", "台北市", 5, 5)));
        assert!(!cond.matches(&pharmacy("藥局", "台北市", 5, 0)));
        assert!(!cond.matches(&pharmacy("藥局", "高雄市", 5, 5)));
    }
}
