//! Resolver registry: the ordered candidate endpoints offered by a form and
//! the one currently selected.
//!
//! Seeded from configuration, append-only for the lifetime of the process,
//! never persisted. Exactly one endpoint is active at any time.

use std::fmt;

use crate::input::{non_empty, InputError};

/// Network location of an overlay resolver or storage host. Always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolverEndpoint(String);

impl ResolverEndpoint {
    pub fn parse(input: &str) -> Result<Self, InputError> {
        non_empty(input, InputError::EmptyEndpoint).map(ResolverEndpoint)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolverEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of [`ResolverRegistry::add`]. Rejections leave the registry untouched;
/// the caller decides whether to tell the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Appended and selected.
    Added,
    /// Already in the list; nothing changed.
    Duplicate,
    /// Blank input; nothing changed.
    Empty,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no resolver endpoints configured")]
    NoEndpoints,
    #[error("unknown resolver endpoint: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone)]
pub struct ResolverRegistry {
    endpoints: Vec<ResolverEndpoint>,
    active: usize,
}

impl ResolverRegistry {
    /// Builds a registry from a default set, keeping order and dropping blanks
    /// and repeats. The first surviving entry is selected.
    pub fn new<I, S>(defaults: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut endpoints: Vec<ResolverEndpoint> = Vec::new();
        for raw in defaults {
            if let Ok(ep) = ResolverEndpoint::parse(raw.as_ref()) {
                if !endpoints.contains(&ep) {
                    endpoints.push(ep);
                }
            }
        }
        if endpoints.is_empty() {
            return Err(RegistryError::NoEndpoints);
        }
        Ok(Self {
            endpoints,
            active: 0,
        })
    }

    /// Candidate endpoints in insertion order: defaults first, then user additions.
    pub fn list_endpoints(&self) -> &[ResolverEndpoint] {
        &self.endpoints
    }

    pub fn active(&self) -> &ResolverEndpoint {
        &self.endpoints[self.active]
    }

    pub fn contains(&self, endpoint: &str) -> bool {
        self.position(endpoint).is_some()
    }

    /// Makes an existing endpoint the active one.
    pub fn select(&mut self, endpoint: &str) -> Result<(), RegistryError> {
        match self.position(endpoint) {
            Some(i) => {
                self.active = i;
                tracing::debug!(endpoint = %self.endpoints[i], "resolver selected");
                Ok(())
            }
            None => Err(RegistryError::Unknown(endpoint.trim().to_string())),
        }
    }

    /// Appends a new endpoint and selects it. Free text is accepted as-is;
    /// whether it is reachable is the transport's concern.
    pub fn add(&mut self, endpoint: &str) -> AddOutcome {
        let ep = match ResolverEndpoint::parse(endpoint) {
            Ok(ep) => ep,
            Err(_) => return AddOutcome::Empty,
        };
        if self.endpoints.contains(&ep) {
            return AddOutcome::Duplicate;
        }
        tracing::debug!(endpoint = %ep, "resolver added");
        self.endpoints.push(ep);
        self.active = self.endpoints.len() - 1;
        AddOutcome::Added
    }

    fn position(&self, endpoint: &str) -> Option<usize> {
        let wanted = endpoint.trim();
        self.endpoints.iter().position(|e| e.as_str() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ResolverRegistry {
        ResolverRegistry::new(["https://a.example", "https://b.example"]).unwrap()
    }

    fn names(r: &ResolverRegistry) -> Vec<&str> {
        r.list_endpoints().iter().map(|e| e.as_str()).collect()
    }

    #[test]
    fn first_default_is_active() {
        let r = registry();
        assert_eq!(r.active().as_str(), "https://a.example");
        assert_eq!(names(&r), ["https://a.example", "https://b.example"]);
    }

    #[test]
    fn empty_defaults_rejected() {
        assert!(matches!(
            ResolverRegistry::new(Vec::<String>::new()),
            Err(RegistryError::NoEndpoints)
        ));
        assert!(matches!(
            ResolverRegistry::new(["  ", ""]),
            Err(RegistryError::NoEndpoints)
        ));
    }

    #[test]
    fn defaults_are_deduplicated() {
        let r = ResolverRegistry::new(["https://a.example", " https://a.example "]).unwrap();
        assert_eq!(r.list_endpoints().len(), 1);
    }

    #[test]
    fn add_appends_and_selects() {
        let mut r = registry();
        assert_eq!(r.add("http://localhost:3002"), AddOutcome::Added);
        assert_eq!(r.list_endpoints().len(), 3);
        assert_eq!(r.list_endpoints().last().unwrap().as_str(), "http://localhost:3002");
        assert_eq!(r.active().as_str(), "http://localhost:3002");
    }

    #[test]
    fn add_duplicate_changes_nothing() {
        let mut r = registry();
        r.select("https://b.example").unwrap();
        assert_eq!(r.add("https://a.example"), AddOutcome::Duplicate);
        assert_eq!(names(&r), ["https://a.example", "https://b.example"]);
        assert_eq!(r.active().as_str(), "https://b.example");
    }

    #[test]
    fn add_duplicate_of_user_addition() {
        let mut r = registry();
        assert_eq!(r.add("https://c.example"), AddOutcome::Added);
        r.select("https://a.example").unwrap();
        assert_eq!(r.add("https://c.example "), AddOutcome::Duplicate);
        assert_eq!(r.active().as_str(), "https://a.example");
        assert_eq!(r.list_endpoints().len(), 3);
    }

    #[test]
    fn add_empty_changes_nothing() {
        let mut r = registry();
        assert_eq!(r.add("   "), AddOutcome::Empty);
        assert_eq!(r.list_endpoints().len(), 2);
        assert_eq!(r.active().as_str(), "https://a.example");
    }

    #[test]
    fn select_unknown_is_error() {
        let mut r = registry();
        assert!(matches!(
            r.select("https://zzz.example"),
            Err(RegistryError::Unknown(_))
        ));
        assert_eq!(r.active().as_str(), "https://a.example");
    }
}
