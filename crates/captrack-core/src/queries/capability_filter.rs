use crate::model::{Capability, CapabilityStatus, Rag};
use crate::ops::Store;

/// List filter for capabilities
///
/// `search` matches case-insensitively against name, workstream and lead
/// name. The other criteria are exact; unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityFilter {
    pub search: Option<String>,
    pub workstream: Option<String>,
    pub status: Option<CapabilityStatus>,
    pub rag: Option<Rag>,
}

impl CapabilityFilter {
    pub fn matches(&self, capability: &Capability) -> bool {
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            let hit = [
                &capability.name,
                &capability.workstream,
                &capability.workstream_lead.name,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }

        self.workstream
            .as_deref()
            .map_or(true, |w| capability.workstream == w)
            && self.status.map_or(true, |s| capability.status == s)
            && self.rag.map_or(true, |r| capability.rag == r)
    }

    pub fn apply<'a>(&self, store: &'a Store) -> Vec<&'a Capability> {
        store
            .capabilities()
            .iter()
            .filter(|c| self.matches(c))
            .collect()
    }
}

/// Distinct workstreams in first-seen order
pub fn workstreams(store: &Store) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for capability in store.capabilities() {
        if !seen.contains(&capability.workstream.as_str()) {
            seen.push(&capability.workstream);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewCapability, WorkstreamLead};
    use crate::ops::capability_ops;

    fn store() -> Store {
        let mut store = Store::new();
        for (name, workstream, lead, rag) in [
            ("Customer Portal", "Frontend Development", "Sarah Chen", Rag::Green),
            ("Payment Gateway", "Backend Services", "Michael Brown", Rag::Red),
            ("Reporting", "Backend Services", "Sarah Chen", Rag::Amber),
        ] {
            capability_ops::add_capability(
                &mut store,
                NewCapability {
                    name: name.to_string(),
                    workstream: workstream.to_string(),
                    workstream_lead: WorkstreamLead::named(lead),
                    rag,
                    ..Default::default()
                },
            );
        }
        store
    }

    #[test]
    fn test_search_covers_lead_name_case_insensitively() {
        let store = store();
        let filter = CapabilityFilter {
            search: Some("sarah".to_string()),
            ..Default::default()
        };
        let names: Vec<_> = filter.apply(&store).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Customer Portal", "Reporting"]);
    }

    #[test]
    fn test_criteria_combine() {
        let store = store();
        let filter = CapabilityFilter {
            workstream: Some("Backend Services".to_string()),
            rag: Some(Rag::Red),
            ..Default::default()
        };
        let hits = filter.apply(&store);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Payment Gateway");
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let store = store();
        assert_eq!(CapabilityFilter::default().apply(&store).len(), 3);
        assert_eq!(workstreams(&store), vec!["Frontend Development", "Backend Services"]);
    }
}
