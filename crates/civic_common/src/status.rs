//! Complaint status state machine.
//!
//! Statuses form a closed enumeration with an explicit transition table:
//!
//! ```text
//! Pending ──assign officer──────▶ In Progress ──mark resolved──▶ Resolved
//! Pending ──route to marketplace▶ Awaiting Quotes ──approve quote──▶ In Progress
//! ```
//!
//! Anything not in the table is rejected by the dispatch engine with
//! `InvalidTransition`; `Resolved` is terminal.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a complaint.
///
/// Wire strings match what the browser dashboards render ("In Progress",
/// "Awaiting Quotes"). The legacy label "Routed" is accepted on input as an
/// alias of `InProgress`: assigning an officer enters `In Progress`
/// directly, there is no separate pre-assignment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ComplaintStatus {
    /// Freshly filed, awaiting an admin dispatch decision.
    #[default]
    Pending,
    /// Routed to the private marketplace, collecting vendor quotes.
    #[serde(rename = "Awaiting Quotes")]
    AwaitingQuotes,
    /// Owned by an assigned officer or an approved vendor.
    #[serde(rename = "In Progress", alias = "Routed")]
    InProgress,
    /// Terminal. No further transitions are permitted.
    Resolved,
}

impl ComplaintStatus {
    /// Whether the transition `self -> next` appears in the table.
    ///
    /// Who may trigger a listed transition is the access gate's concern;
    /// this answers only whether the edge exists at all.
    pub fn may_transition_to(self, next: ComplaintStatus) -> bool {
        use ComplaintStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress)
                | (Pending, AwaitingQuotes)
                | (AwaitingQuotes, InProgress)
                | (InProgress, Resolved)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ComplaintStatus::Resolved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::AwaitingQuotes => "Awaiting Quotes",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComplaintStatus::*;

    const ALL: [ComplaintStatus; 4] = [Pending, AwaitingQuotes, InProgress, Resolved];

    #[test]
    fn test_transition_table_is_exact() {
        let allowed = [
            (Pending, InProgress),
            (Pending, AwaitingQuotes),
            (AwaitingQuotes, InProgress),
            (InProgress, Resolved),
        ];
        for from in ALL {
            for to in ALL {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    from.may_transition_to(to),
                    expected,
                    "{} -> {} should be {}",
                    from,
                    to,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_resolved_is_terminal() {
        assert!(Resolved.is_terminal());
        for to in ALL {
            assert!(!Resolved.may_transition_to(to));
        }
    }

    #[test]
    fn test_wire_strings() {
        assert_eq!(
            serde_json::to_string(&AwaitingQuotes).unwrap(),
            "\"Awaiting Quotes\""
        );
        assert_eq!(serde_json::to_string(&InProgress).unwrap(), "\"In Progress\"");
        let parsed: ComplaintStatus = serde_json::from_str("\"Pending\"").unwrap();
        assert_eq!(parsed, Pending);
    }

    #[test]
    fn test_routed_alias_maps_to_in_progress() {
        let parsed: ComplaintStatus = serde_json::from_str("\"Routed\"").unwrap();
        assert_eq!(parsed, InProgress);
    }
}
