//! Boolean filter trees
//!
//! A [`Filter`] collects conditions and nested filters under one boolean
//! operator. [`Filter::build`] produces the [`FilterNode`] sent to the API.
//! A filter holding a single condition is sent as that condition alone:
//!
//! ```
//! use rwapi_client::{Filter, FilterNode};
//!
//! let node = Filter::new().condition("country", "France").build();
//! assert!(matches!(node, FilterNode::Condition(_)));
//! ```
//!
//! Trees are expected to stay shallow (a handful of levels), as the API
//! itself rejects deeply nested filters.

use serde::{Deserialize, Serialize};

/// Boolean operator combining conditions or values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    #[default]
    And,
    Or,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }
}

/// Single filter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

macro_rules! scalar_from {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value.into())
                }
            }

            impl From<$ty> for FilterValue {
                fn from(value: $ty) -> Self {
                    FilterValue::Single(value.into())
                }
            }
        )+
    };
}

scalar_from!(Bool: bool);
scalar_from!(Integer: i64, i32, u32);
scalar_from!(Float: f64);
scalar_from!(Text: String, &str);

/// Bounds of a range condition, either side optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Scalar>,
}

impl Range {
    pub fn between(from: impl Into<Scalar>, to: impl Into<Scalar>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    pub fn at_least(from: impl Into<Scalar>) -> Self {
        Self {
            from: Some(from.into()),
            to: None,
        }
    }

    pub fn at_most(to: impl Into<Scalar>) -> Self {
        Self {
            from: None,
            to: Some(to.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Value of a leaf condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Single(Scalar),
    List(Vec<Scalar>),
    Range(Range),
}

impl FilterValue {
    /// Empty strings, empty lists and unbounded ranges carry no constraint
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Single(Scalar::Text(text)) => text.is_empty(),
            FilterValue::Single(_) => false,
            FilterValue::List(values) => values.is_empty(),
            FilterValue::Range(range) => range.is_empty(),
        }
    }

    fn is_list(&self) -> bool {
        matches!(self, FilterValue::List(values) if !values.is_empty())
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>, const N: usize> From<[T; N]> for FilterValue {
    fn from(values: [T; N]) -> Self {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Range> for FilterValue {
    fn from(range: Range) -> Self {
        FilterValue::Range(range)
    }
}

impl From<Scalar> for FilterValue {
    fn from(value: Scalar) -> Self {
        FilterValue::Single(value)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Leaf condition on one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    /// Only present for multi-value conditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub negate: bool,
    /// Absent means "field has a value"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FilterValue>,
}

impl Condition {
    /// Build a leaf, dropping empty values and scalar operators
    pub fn new(
        field: impl Into<String>,
        value: Option<FilterValue>,
        operator: Operator,
        negate: bool,
    ) -> Self {
        let value = value.filter(|value| !value.is_empty());
        let operator = value
            .as_ref()
            .filter(|value| value.is_list())
            .map(|_| operator);

        Self {
            field: field.into(),
            operator,
            negate,
            value,
        }
    }
}

/// Several conditions joined by one operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub conditions: Vec<FilterNode>,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "is_false")]
    pub negate: bool,
}

/// Serialized filter: a group or a lone condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterNode {
    Group(Group),
    Condition(Condition),
}

impl From<Condition> for FilterNode {
    fn from(condition: Condition) -> Self {
        FilterNode::Condition(condition)
    }
}

/// Filter builder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    group: Group,
}

impl Filter {
    /// Empty `AND` filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty filter with the given operator and negation
    pub fn with_operator(operator: Operator, negate: bool) -> Self {
        Self {
            group: Group {
                conditions: Vec::new(),
                operator,
                negate,
            },
        }
    }

    /// Add a condition matching `value` on `field`
    pub fn condition(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.condition_with(field, Some(value.into()), Operator::And, false)
    }

    /// Add a condition matching documents where `field` is set
    pub fn exists(self, field: impl Into<String>) -> Self {
        self.condition_with(field, None, Operator::And, false)
    }

    /// Add a negated condition
    pub fn exclude(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.condition_with(field, Some(value.into()), Operator::And, true)
    }

    /// Add a condition with every option spelled out
    ///
    /// `operator` combines the values of a list and is dropped for any
    /// other kind of value.
    pub fn condition_with(
        mut self,
        field: impl Into<String>,
        value: Option<FilterValue>,
        operator: Operator,
        negate: bool,
    ) -> Self {
        self.group
            .conditions
            .push(Condition::new(field, value, operator, negate).into());
        self
    }

    /// Nest another filter as a condition
    pub fn filter(mut self, nested: impl Into<FilterNode>) -> Self {
        self.group.conditions.push(nested.into());
        self
    }

    /// Set the operator joining the conditions
    pub fn operator(mut self, operator: Operator) -> Self {
        self.group.operator = operator;
        self
    }

    /// Set whether the whole filter is negated
    pub fn negate(mut self, negate: bool) -> Self {
        self.group.negate = negate;
        self
    }

    pub fn len(&self) -> usize {
        self.group.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.group.conditions.is_empty()
    }

    /// Wire form of the filter
    ///
    /// A single condition is returned on its own; the group's operator
    /// and negation are then not sent.
    pub fn build(&self) -> FilterNode {
        match self.group.conditions.as_slice() {
            [single] => single.clone(),
            _ => FilterNode::Group(self.group.clone()),
        }
    }
}

impl From<Filter> for FilterNode {
    fn from(filter: Filter) -> Self {
        filter.build()
    }
}

impl From<&Filter> for FilterNode {
    fn from(filter: &Filter) -> Self {
        filter.build()
    }
}
