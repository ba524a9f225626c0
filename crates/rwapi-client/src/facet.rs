//! Facet (aggregation) requests

use serde::{Deserialize, Serialize};

use crate::filter::FilterNode;
use crate::query::Direction;

/// Wire form of a facet request; unset keys are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Facet builder
///
/// Setters given an empty string or a zero limit leave the facet unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facet {
    spec: FacetSpec,
}

impl Facet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Facet with its usual options in one call
    pub fn with(name: impl Into<String>, field: impl Into<String>, limit: Option<u32>) -> Self {
        let facet = Self::new().name(name).field(field);
        match limit {
            Some(limit) => facet.limit(limit),
            None => facet,
        }
    }

    /// Key under which the service returns the facet
    pub fn name(mut self, name: impl Into<String>) -> Self {
        if let Some(name) = non_empty(name.into()) {
            self.spec.name = Some(name);
        }
        self
    }

    /// Field the facet aggregates on
    pub fn field(mut self, field: impl Into<String>) -> Self {
        if let Some(field) = non_empty(field.into()) {
            self.spec.field = Some(field);
        }
        self
    }

    /// Maximum number of buckets returned
    pub fn limit(mut self, limit: u32) -> Self {
        if limit > 0 {
            self.spec.limit = Some(limit);
        }
        self
    }

    /// Bucket ordering, `order` being `value` or `count`
    pub fn sort(mut self, order: impl Into<String>, direction: Direction) -> Self {
        if let Some(order) = non_empty(order.into()) {
            self.spec.sort = Some(format!("{}:{}", order, direction.as_str()));
        }
        self
    }

    /// Restrict the documents the facet is computed on
    pub fn filter(mut self, filter: impl Into<FilterNode>) -> Self {
        self.spec.filter = Some(filter.into());
        self
    }

    /// Facet scope (`global` or `query`)
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        if let Some(scope) = non_empty(scope.into()) {
            self.spec.scope = Some(scope);
        }
        self
    }

    pub fn build(&self) -> FacetSpec {
        self.spec.clone()
    }
}

impl From<Facet> for FacetSpec {
    fn from(facet: Facet) -> Self {
        facet.spec
    }
}

impl From<&Facet> for FacetSpec {
    fn from(facet: &Facet) -> Self {
        facet.build()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
