//! The fixed result-view set and its availability predicates.
//!
//! Tabs are a closed enum matched exhaustively: adding or removing a view
//! is a compile-time-checked change, not a string comparison scattered
//! across the UI.

use cv_base::types::CaseResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTab {
    CaseDetails,
    TokenStatus,
    Configuration,
    RawData,
}

impl ResultTab {
    /// Declared configuration order; availability filtering preserves it.
    pub const ALL: [ResultTab; 4] =
        [Self::CaseDetails, Self::TokenStatus, Self::Configuration, Self::RawData];

    pub fn id(self) -> &'static str {
        match self {
            Self::CaseDetails => "case-details",
            Self::TokenStatus => "token-status",
            Self::Configuration => "configuration",
            Self::RawData => "raw-data",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CaseDetails => "Case Details",
            Self::TokenStatus => "Token Status",
            Self::Configuration => "Configuration",
            Self::RawData => "Raw Data",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tab| tab.id() == id)
    }

    /// Whether this view applies to the given result payload.
    pub fn is_available(self, result: &CaseResult) -> bool {
        match self {
            Self::CaseDetails => result.has_case_details(),
            Self::TokenStatus => result.has_token(),
            Self::Configuration | Self::RawData => true,
        }
    }
}

/// The tabs valid for `result`, in declared order.
pub fn available_tabs(result: &CaseResult) -> Vec<ResultTab> {
    ResultTab::ALL.iter().copied().filter(|tab| tab.is_available(result)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::test_support::{bare_result, full_result};

    #[test]
    fn bare_result_keeps_the_always_available_views() {
        let tabs = available_tabs(&bare_result());
        assert_eq!(tabs, vec![ResultTab::Configuration, ResultTab::RawData]);
    }

    #[test]
    fn full_result_exposes_every_view_in_declared_order() {
        let tabs = available_tabs(&full_result());
        assert_eq!(tabs, ResultTab::ALL.to_vec());
    }

    #[test]
    fn ids_round_trip() {
        for tab in ResultTab::ALL {
            assert_eq!(ResultTab::from_id(tab.id()), Some(tab));
        }
        assert_eq!(ResultTab::from_id("summary"), None);
    }
}
