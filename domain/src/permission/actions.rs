//! Grant sets and requirement sets

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{Permission, Resource};

/// Granted `(resource, permission)` pairs.
///
/// Serialized as a nested map, e.g. `{"messaging": {"create": true}}`.
/// Unknown resource or permission names fail deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Actions(BTreeMap<Resource, BTreeMap<Permission, bool>>);

impl Actions {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Grant a pair (builder pattern)
    pub fn grant(mut self, resource: Resource, permission: Permission) -> Self {
        self.set(resource, permission, true);
        self
    }

    /// Grant every pair a tool requires (builder pattern)
    pub fn grant_required(mut self, required: &RequiredActions) -> Self {
        for (resource, permission) in required.iter() {
            self.set(resource, permission, true);
        }
        self
    }

    pub fn set(&mut self, resource: Resource, permission: Permission, granted: bool) {
        self.0
            .entry(resource)
            .or_default()
            .insert(permission, granted);
    }

    /// Missing resources and permissions count as not granted.
    pub fn is_granted(&self, resource: Resource, permission: Permission) -> bool {
        self.0
            .get(&resource)
            .and_then(|perms| perms.get(&permission))
            .copied()
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over explicitly granted pairs
    pub fn granted(&self) -> impl Iterator<Item = (Resource, Permission)> + '_ {
        self.0.iter().flat_map(|(resource, perms)| {
            perms
                .iter()
                .filter(|(_, granted)| **granted)
                .map(move |(permission, _)| (*resource, *permission))
        })
    }
}

/// Pairs a tool needs before it can be exposed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequiredActions(BTreeMap<Resource, BTreeSet<Permission>>);

impl RequiredActions {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn require(mut self, resource: Resource, permission: Permission) -> Self {
        self.0.entry(resource).or_default().insert(permission);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, Permission)> + '_ {
        self.0
            .iter()
            .flat_map(|(resource, perms)| perms.iter().map(move |p| (*resource, *p)))
    }

    pub fn contains(&self, resource: Resource, permission: Permission) -> bool {
        self.0
            .get(&resource)
            .is_some_and(|perms| perms.contains(&permission))
    }

    pub fn touches(&self, resource: Resource) -> bool {
        self.0.contains_key(&resource)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|perms| perms.is_empty())
    }
}
