//! Flattening of the remote object graph reachable from a set of types.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{
    introspection::{IntrospectionSchema, TypeRef},
    Error,
};

/// A field or an input field of an expanded remote type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpandedField<'a> {
    pub name: &'a str,
    pub ty: &'a TypeRef,
}

/// Type name to fields, in the order the types were discovered.
pub type ExpandedTypes<'a> = IndexMap<&'a str, Vec<ExpandedField<'a>>>;

struct ExpansionState<'a> {
    visited: HashSet<&'a str>,
    types: ExpandedTypes<'a>,
}

/// Walks every non-scalar type reachable from `seeds` in the remote schema and records its fields.
/// Each type is expanded once, so self-referencing types terminate.
pub fn expand<'a>(
    seeds: impl IntoIterator<Item = &'a TypeRef>,
    schema: &'a IntrospectionSchema,
    is_scalar: impl Fn(&str) -> bool,
) -> Result<ExpandedTypes<'a>, Error> {
    let mut state = ExpansionState {
        visited: HashSet::new(),
        types: IndexMap::new(),
    };

    for seed in seeds {
        let name = seed.named_type();

        if is_scalar(name) {
            continue;
        }

        expand_type(name, schema, &is_scalar, &mut state)?;
    }

    Ok(state.types)
}

fn expand_type<'a>(
    name: &'a str,
    schema: &'a IntrospectionSchema,
    is_scalar: &impl Fn(&str) -> bool,
    state: &mut ExpansionState<'a>,
) -> Result<(), Error> {
    if !state.visited.insert(name) {
        return Ok(());
    }

    let ty = schema
        .type_by_name(name)
        .ok_or_else(|| Error::RemoteTypeNotFound(name.to_owned()))?;

    tracing::trace!(name, "expanding remote type");

    let fields = ty
        .fields()
        .iter()
        .map(|field| ExpandedField {
            name: &field.name,
            ty: &field.ty,
        })
        .chain(ty.input_fields().iter().map(|field| ExpandedField {
            name: &field.name,
            ty: &field.ty,
        }))
        .collect::<Vec<_>>();

    state.types.insert(&ty.name, fields.clone());

    for field in fields {
        let name = field.ty.named_type();

        if !is_scalar(name) {
            expand_type(name, schema, is_scalar, state)?;
        }
    }

    Ok(())
}
