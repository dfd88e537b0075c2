use std::fmt;

use async_graphql_parser::types::{ExecutableDocument, OperationType, Selection};
use async_graphql_value::Value;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        })
    }
}

impl From<OperationType> for OperationKind {
    fn from(ty: OperationType) -> Self {
        match ty {
            OperationType::Query => OperationKind::Query,
            OperationType::Mutation => OperationKind::Mutation,
            OperationType::Subscription => OperationKind::Subscription,
        }
    }
}

/// The operation a custom field delegates to: exactly one root field selection.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteOperation {
    pub kind: OperationKind,
    pub selection: RootSelection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RootSelection {
    pub name: String,
    pub arguments: Vec<SelectionArgument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionArgument {
    pub name: String,
    pub value: ArgumentValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    /// `$name`, stored without the `$`.
    Variable(String),
    /// Any other value, rendered as GraphQL.
    Literal(String),
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentValue::Variable(name) => write!(f, "${name}"),
            ArgumentValue::Literal(value) => f.write_str(value),
        }
    }
}

impl TryFrom<ExecutableDocument> for RemoteOperation {
    type Error = Error;

    fn try_from(document: ExecutableDocument) -> Result<Self, Self::Error> {
        let mut operations = document.operations.iter();

        let (Some((_, operation)), None) = (operations.next(), operations.next()) else {
            return Err(Error::InvalidOperation(
                "the document must contain exactly one operation".to_owned(),
            ));
        };

        let [item] = operation.node.selection_set.node.items.as_slice() else {
            return Err(Error::InvalidOperation(
                "the operation must select exactly one root field".to_owned(),
            ));
        };

        let Selection::Field(field) = &item.node else {
            return Err(Error::InvalidOperation(
                "the root selection must be a field, not a fragment".to_owned(),
            ));
        };

        let arguments = field
            .node
            .arguments
            .iter()
            .map(|(name, value)| SelectionArgument {
                name: name.node.to_string(),
                value: match &value.node {
                    Value::Variable(variable) => ArgumentValue::Variable(variable.to_string()),
                    other => ArgumentValue::Literal(other.to_string()),
                },
            })
            .collect();

        Ok(RemoteOperation {
            kind: operation.node.ty.into(),
            selection: RootSelection {
                name: field.node.name.node.to_string(),
                arguments,
            },
        })
    }
}
