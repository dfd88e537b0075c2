use std::collections::HashMap;

use async_graphql_parser::types::{
    FieldDefinition, InputValueDefinition, ServiceDocument, TypeDefinition, TypeKind, TypeSystemDefinition,
};

pub static BUILTIN_SCALARS: &[&str] = &["Boolean", "Float", "ID", "Int", "String"];

const DEFAULT_QUERY_TYPE: &str = "Query";
const DEFAULT_MUTATION_TYPE: &str = "Mutation";

/// Read-only view of the local schema. Types are rendered to canonical GraphQL type strings when
/// the view is built, and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSchema {
    query_type: String,
    mutation_type: String,
    types: HashMap<String, LocalType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalTypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalType {
    pub name: String,
    pub kind: LocalTypeKind,
    /// Output fields for objects and interfaces, input fields for input objects.
    pub fields: Vec<LocalField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalField {
    pub name: String,
    pub ty: String,
    pub arguments: Vec<LocalArgument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalArgument {
    pub name: String,
    pub ty: String,
}

impl LocalSchema {
    pub fn type_by_name(&self, name: &str) -> Option<&LocalType> {
        self.types.get(name)
    }

    /// Whether `name` is the local query or mutation root type.
    pub fn is_root_type(&self, name: &str) -> bool {
        name == self.query_type || name == self.mutation_type
    }

    /// Builtin scalars plus the custom scalars declared locally.
    pub fn is_scalar(&self, name: &str) -> bool {
        BUILTIN_SCALARS.contains(&name)
            || self
                .types
                .get(name)
                .is_some_and(|ty| ty.kind == LocalTypeKind::Scalar)
    }

    pub fn query_type(&self) -> &str {
        &self.query_type
    }

    pub fn mutation_type(&self) -> &str {
        &self.mutation_type
    }
}

impl LocalType {
    pub fn field_by_name(&self, name: &str) -> Option<&LocalField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl LocalField {
    pub fn argument_by_name(&self, name: &str) -> Option<&LocalArgument> {
        self.arguments.iter().find(|argument| argument.name == name)
    }
}

impl From<ServiceDocument> for LocalSchema {
    fn from(document: ServiceDocument) -> Self {
        let mut schema = LocalSchema {
            query_type: DEFAULT_QUERY_TYPE.to_owned(),
            mutation_type: DEFAULT_MUTATION_TYPE.to_owned(),
            types: HashMap::new(),
        };

        let mut extensions = Vec::new();

        for definition in &document.definitions {
            match definition {
                TypeSystemDefinition::Schema(definition) => {
                    if let Some(query) = &definition.node.query {
                        schema.query_type = query.node.to_string();
                    }
                    if let Some(mutation) = &definition.node.mutation {
                        schema.mutation_type = mutation.node.to_string();
                    }
                }
                TypeSystemDefinition::Type(definition) if definition.node.extend => {
                    extensions.push(ingest_type(&definition.node));
                }
                TypeSystemDefinition::Type(definition) => {
                    let ty = ingest_type(&definition.node);

                    if schema.types.contains_key(&ty.name) {
                        tracing::warn!(name = %ty.name, "duplicate type definition, keeping the first one");
                        continue;
                    }

                    schema.types.insert(ty.name.clone(), ty);
                }
                TypeSystemDefinition::Directive(_) => (),
            }
        }

        // Extensions may come before the definition they extend.
        for extension in extensions {
            match schema.types.get_mut(&extension.name) {
                Some(base) if base.kind == extension.kind => base.fields.extend(extension.fields),
                Some(base) => tracing::warn!(
                    name = %extension.name,
                    kind = ?extension.kind,
                    base_kind = ?base.kind,
                    "ignoring extension of a different kind"
                ),
                None => tracing::warn!(name = %extension.name, "ignoring extension of an undefined type"),
            }
        }

        schema
    }
}

fn ingest_type(definition: &TypeDefinition) -> LocalType {
    let (kind, fields) = match &definition.kind {
        TypeKind::Scalar => (LocalTypeKind::Scalar, Vec::new()),
        TypeKind::Object(object) => (
            LocalTypeKind::Object,
            object.fields.iter().map(|field| ingest_field(&field.node)).collect(),
        ),
        TypeKind::Interface(interface) => (
            LocalTypeKind::Interface,
            interface.fields.iter().map(|field| ingest_field(&field.node)).collect(),
        ),
        TypeKind::Union(_) => (LocalTypeKind::Union, Vec::new()),
        TypeKind::Enum(_) => (LocalTypeKind::Enum, Vec::new()),
        TypeKind::InputObject(input_object) => (
            LocalTypeKind::InputObject,
            input_object
                .fields
                .iter()
                .map(|field| ingest_input_field(&field.node))
                .collect(),
        ),
    };

    LocalType {
        name: definition.name.node.to_string(),
        kind,
        fields,
    }
}

fn ingest_field(field: &FieldDefinition) -> LocalField {
    LocalField {
        name: field.name.node.to_string(),
        ty: field.ty.node.to_string(),
        arguments: field
            .arguments
            .iter()
            .map(|argument| ingest_argument(&argument.node))
            .collect(),
    }
}

fn ingest_input_field(field: &InputValueDefinition) -> LocalField {
    LocalField {
        name: field.name.node.to_string(),
        ty: field.ty.node.to_string(),
        arguments: Vec::new(),
    }
}

fn ingest_argument(argument: &InputValueDefinition) -> LocalArgument {
    LocalArgument {
        name: argument.name.node.to_string(),
        ty: argument.ty.node.to_string(),
    }
}
