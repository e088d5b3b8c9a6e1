//! Quick actions: fixed button labels answered with canned text.

/// Suggestion chips shown above the quick actions.
///
/// These are sent as plain user messages and are not canned, so they reach the model.
pub const SUGGESTIONS: [&str; 4] = [
    "Show system status",
    "Find coverage gaps",
    "Optimize schedules",
    "Check compliance",
];

const DEFAULT_ANSWERS: [(&str, &str); 6] = [
    (
        "Check Coverage",
        "Review staffing coverage across all departments and shifts. It identifies gaps and ensures fair distribution.",
    ),
    (
        "Optimize Schedule",
        "Analyzes the current roster to balance workloads and improve shift fairness.",
    ),
    (
        "Compliance Audit",
        "Checks for any violations like insufficient rest or overbooked shifts.",
    ),
    (
        "Generate Report",
        "Generates a summary of staff allocation, coverage, and shift balance.",
    ),
    (
        "Swap Request",
        "Allows staff to request shift swaps and validates them against compliance rules.",
    ),
    (
        "Manual Adjustments",
        "Admins can directly edit the roster for exceptions or emergency reassignments.",
    ),
];

/// Read-only table of quick-action labels and their canned answers.
///
/// Labels keep their declaration order, which is also the button order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickActions {
    entries: Vec<(String, String)>,
}

impl QuickActions {
    /// Build a table from explicit label/answer pairs.
    pub fn new<L, A>(entries: impl IntoIterator<Item = (L, A)>) -> Self
    where
        L: Into<String>,
        A: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(l, a)| (l.into(), a.into()))
                .collect(),
        }
    }

    /// Look up the canned answer for an exact label match.
    pub fn answer(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, a)| a.as_str())
    }

    /// Labels in button order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    /// Label/answer pairs in button order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, a)| (l.as_str(), a.as_str()))
    }
}

impl Default for QuickActions {
    fn default() -> Self {
        Self::new(DEFAULT_ANSWERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_order() {
        let actions = QuickActions::default();
        let labels: Vec<_> = actions.labels().collect();
        assert_eq!(
            labels,
            vec![
                "Check Coverage",
                "Optimize Schedule",
                "Compliance Audit",
                "Generate Report",
                "Swap Request",
                "Manual Adjustments",
            ]
        );
    }

    #[test]
    fn test_answer_requires_exact_match() {
        let actions = QuickActions::default();
        assert_eq!(
            actions.answer("Optimize Schedule"),
            Some("Analyzes the current roster to balance workloads and improve shift fairness.")
        );
        assert_eq!(actions.answer("optimize schedule"), None);
        assert_eq!(actions.answer("Optimize Schedule "), None);
    }

    #[test]
    fn test_suggestions_are_not_canned() {
        let actions = QuickActions::default();
        for s in SUGGESTIONS {
            assert!(actions.answer(s).is_none(), "{s} should reach the model");
        }
    }
}
