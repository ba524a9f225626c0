//! Query builder
//!
//! A [`Query`] accumulates everything sent for one API call: projection,
//! full-text search, sorting, pagination, filter and facets. Setting an
//! item id turns it into a single-item lookup, for which the service only
//! accepts `fields`, `preset` and `profile`; everything else is dropped by
//! [`Query::build`].

use std::fmt;

use rwapi_http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::client::Client;
use crate::error::{ClientError, Result};
use crate::facet::FacetSpec;
use crate::filter::{FilterNode, Operator};
use crate::results::Results;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields to include in or exclude from returned items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSelection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// Full-text search part of a query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
}

/// Wire payload of a query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldSelection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<SearchQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<FacetSpec>,
}

impl QueryPayload {
    /// Keep only what a single-item lookup accepts
    pub fn single_item(&self) -> Self {
        Self {
            preset: self.preset.clone(),
            profile: self.profile.clone(),
            fields: self.fields.clone(),
            ..Self::default()
        }
    }
}

/// Query builder bound to an optional client
#[derive(Debug, Clone, Default)]
pub struct Query {
    resource: String,
    id: Option<String>,
    client: Option<Client>,
    payload: QueryPayload,
}

impl Query {
    /// Unbound query on `resource`
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Self::default()
        }
    }

    /// Set the client used by [`Query::execute`]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the resource; an empty name keeps the current one
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        let resource = resource.into();
        if !resource.is_empty() {
            self.resource = resource;
        }
        self
    }

    pub fn resource_name(&self) -> &str {
        &self.resource
    }

    pub fn item_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_single_item(&self) -> bool {
        self.id.is_some()
    }

    /// Look up a single item by id
    pub fn id(mut self, id: impl ToString) -> Self {
        let id = id.to_string();
        self.id = if id.is_empty() { None } else { Some(id) };
        self
    }

    pub fn preset(mut self, preset: impl Into<String>) -> Self {
        self.payload.preset = Some(preset.into());
        self
    }

    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.payload.profile = Some(profile.into());
        self
    }

    /// Add fields to include and exclude
    ///
    /// Values are merged into those from earlier calls, keeping the first
    /// occurrence of each field.
    pub fn fields(self, include: &[&str], exclude: &[&str]) -> Self {
        self.include(include.iter().copied())
            .exclude(exclude.iter().copied())
    }

    /// Add fields to include
    pub fn include<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if !fields.is_empty() {
            let selection = self.payload.fields.get_or_insert_with(FieldSelection::default);
            merge_unique(&mut selection.include, fields);
        }
        self
    }

    /// Add fields to exclude
    pub fn exclude<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if !fields.is_empty() {
            let selection = self.payload.fields.get_or_insert_with(FieldSelection::default);
            merge_unique(&mut selection.exclude, fields);
        }
        self
    }

    /// Full-text search
    pub fn search(self, value: impl Into<String>) -> Self {
        self.search_with(value, &[], None)
    }

    /// Full-text search restricted to `fields`, with a default operator
    ///
    /// Empty `fields` and a missing operator keep whatever was set before.
    pub fn search_with(
        mut self,
        value: impl Into<String>,
        fields: &[&str],
        operator: Option<Operator>,
    ) -> Self {
        let query = self.payload.query.get_or_insert_with(SearchQuery::default);
        if !fields.is_empty() {
            query.fields = Some(fields.iter().map(|field| field.to_string()).collect());
        }
        if operator.is_some() {
            query.operator = operator;
        }
        query.value = Some(value.into());
        self
    }

    /// Set the fields searched by the full-text query; an empty list is sent as is
    pub fn search_fields(mut self, fields: &[&str]) -> Self {
        let query = self.payload.query.get_or_insert_with(SearchQuery::default);
        query.fields = Some(fields.iter().map(|field| field.to_string()).collect());
        self
    }

    /// Append a sort criterion; earlier criteria take precedence
    pub fn sort(mut self, field: impl AsRef<str>, direction: Direction) -> Self {
        self.payload
            .sort
            .push(format!("{}:{}", field.as_ref(), direction));
        self
    }

    /// Set offset and limit together
    pub fn range(self, offset: u32, limit: u32) -> Self {
        self.offset(offset).limit(limit)
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.payload.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.payload.limit = Some(limit);
        self
    }

    /// Set the filter, replacing any previous one
    pub fn filter(mut self, filter: impl Into<FilterNode>) -> Self {
        self.payload.filter = Some(filter.into());
        self
    }

    /// Request one more facet
    pub fn facets(mut self, facet: impl Into<FacetSpec>) -> Self {
        self.payload.facets.push(facet.into());
        self
    }

    /// Payload as it will be sent
    pub fn build(&self) -> QueryPayload {
        if self.is_single_item() {
            self.payload.single_item()
        } else {
            self.payload.clone()
        }
    }

    /// Path relative to the API base URL
    pub fn path(&self) -> String {
        match &self.id {
            Some(id) => format!("{}/{}", self.resource, id),
            None => self.resource.clone(),
        }
    }

    /// Single-item lookups are GET requests, everything else is POSTed
    pub fn method(&self) -> Method {
        if self.is_single_item() {
            Method::GET
        } else {
            Method::POST
        }
    }

    /// Send the query, reporting why it failed
    pub async fn try_execute(&self) -> Result<Results> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| ClientError::Misconfigured("no client".to_string()))?;
        if self.resource.is_empty() {
            return Err(ClientError::Misconfigured("no resource".to_string()));
        }

        let data = client.send(&self.path(), &self.build(), self.method()).await?;
        Ok(Results::new(Some(data)))
    }

    /// Send the query; any failure yields results in the error state
    pub async fn execute(&self) -> Results {
        match self.try_execute().await {
            Ok(results) => results,
            Err(e) => {
                warn!("Query on '{}' failed: {}", self.path(), e);
                Results::new(None)
            }
        }
    }

    /// Send the query and return the decoded response, `None` on failure
    pub async fn execute_raw(&self) -> Option<Value> {
        self.execute().await.into_raw()
    }
}

fn merge_unique(target: &mut Vec<String>, values: Vec<String>) {
    for value in values {
        if !target.contains(&value) {
            target.push(value);
        }
    }
}
