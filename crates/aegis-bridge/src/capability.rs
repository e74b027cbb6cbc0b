//! Capability filter: which action names page script may dispatch.

use std::collections::BTreeSet;

use aegis_common::{Action, BridgeError};
use aegis_config::schema::CapabilitiesConfig;

/// Entry that allows every action.
pub const WILDCARD: &str = "*";

/// Immutable allow-list built once from the project config.
///
/// An empty list allows everything unless it was built closed. This
/// default-open policy exists for quick prototyping and is not a security
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityList {
    entries: BTreeSet<String>,
    default_open: bool,
}

impl Default for CapabilityList {
    fn default() -> Self {
        Self {
            entries: BTreeSet::new(),
            default_open: true,
        }
    }
}

impl CapabilityList {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            default_open: true,
        }
    }

    pub fn from_config(config: &CapabilitiesConfig) -> Self {
        Self {
            default_open: config.default_open,
            ..Self::from_entries(config.allow.iter().cloned())
        }
    }

    /// List with no entries: every action is allowed.
    pub fn open() -> Self {
        Self::default()
    }

    /// List with no entries that allows nothing.
    pub fn closed() -> Self {
        Self {
            entries: BTreeSet::new(),
            default_open: false,
        }
    }

    pub fn is_default_open(&self) -> bool {
        self.entries.is_empty() && self.default_open
    }

    pub fn denies_everything(&self) -> bool {
        self.entries.is_empty() && !self.default_open
    }

    pub fn allows_everything(&self) -> bool {
        self.is_default_open() || self.entries.contains(WILDCARD)
    }

    /// Exact name, its namespace (text before the first `.`), or `*`.
    pub fn is_allowed(&self, name: &str) -> bool {
        if self.allows_everything() || self.entries.contains(name) {
            return true;
        }
        match name.split_once('.') {
            Some((namespace, _)) => self.entries.contains(namespace),
            None => false,
        }
    }

    pub fn check(&self, name: &str) -> Result<(), BridgeError> {
        if self.is_allowed(name) {
            Ok(())
        } else {
            Err(BridgeError::PermissionDenied(name.to_string()))
        }
    }

    /// Built-in actions that run host commands and are reachable under
    /// this list.
    pub fn reachable_sensitive_actions(&self) -> Vec<&'static str> {
        Action::all()
            .iter()
            .filter(|a| a.is_sensitive() && self.is_allowed(a.name()))
            .map(|a| a.name())
            .collect()
    }

    /// Entries in sorted order, as exposed to page script.
    pub fn entries(&self) -> Vec<&str> {
        self.entries.iter().map(String::as_str).collect()
    }
}
