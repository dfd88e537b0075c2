//! Compatibility of a custom operation with the remote schema, and of the remote results with the
//! local schema.

use url::Url;

use crate::{
    expand::expand,
    introspection::{Field, IntrospectionSchema, TypeKind},
    local::{ArgumentValue, LocalField, LocalSchema, LocalType, OperationKind, RemoteOperation},
    Error,
};

/// Everything a single check needs to know about the local side.
#[derive(Debug, Clone, Copy)]
pub struct RemoteOperationContext<'a> {
    /// The type containing the field the custom operation is attached to.
    pub parent_type: &'a LocalType,
    /// The field the custom operation is attached to.
    pub parent_field: &'a LocalField,
    pub operation: &'a RemoteOperation,
    pub url: &'a Url,
    pub schema: &'a LocalSchema,
}

impl<'a> RemoteOperationContext<'a> {
    /// Resolves `parent_type.parent_field` in the local schema.
    pub fn new(
        schema: &'a LocalSchema,
        parent_type: &str,
        parent_field: &str,
        operation: &'a RemoteOperation,
        url: &'a Url,
    ) -> Result<Self, Error> {
        let parent_type = schema
            .type_by_name(parent_type)
            .ok_or_else(|| Error::LocalTypeNotFound(parent_type.to_owned()))?;

        let parent_field = parent_type
            .field_by_name(parent_field)
            .ok_or_else(|| Error::LocalFieldNotFound {
                type_name: parent_type.name.clone(),
                field: parent_field.to_owned(),
            })?;

        Ok(Self {
            parent_type,
            parent_field,
            operation,
            url,
            schema,
        })
    }
}

/// Runs every stage against an already introspected remote schema. The first failure is
/// returned.
pub fn check_remote_operation(ctx: &RemoteOperationContext<'_>, remote: &IntrospectionSchema) -> Result<(), Error> {
    let remote_field = resolve_remote_field(ctx.operation, remote)?;
    tracing::debug!(field = %remote_field.name, ty = %remote_field.ty, "resolved remote field");

    check_return_type(ctx, remote_field)?;
    check_arguments(ctx, remote_field)?;
    tracing::debug!(arguments = ctx.operation.selection.arguments.len(), "arguments are compatible");

    check_shape(ctx, remote_field, remote)?;

    tracing::debug!(
        operation = %ctx.operation.kind,
        field = %ctx.operation.selection.name,
        "remote operation is compatible"
    );

    Ok(())
}

fn resolve_remote_field<'a>(operation: &RemoteOperation, remote: &'a IntrospectionSchema) -> Result<&'a Field, Error> {
    let root_type = match operation.kind {
        OperationKind::Query => remote.query_type.as_ref(),
        OperationKind::Mutation => remote.mutation_type.as_ref(),
        kind @ OperationKind::Subscription => return Err(Error::UnsupportedOperationKind(kind)),
    };

    let name = &operation.selection.name;

    root_type
        .and_then(|root_type| remote.type_by_name(&root_type.name))
        .and_then(|root_type| root_type.field_by_name(name))
        .ok_or_else(|| Error::RemoteFieldNotFound {
            operation: operation.kind,
            field: name.clone(),
        })
}

fn check_return_type(ctx: &RemoteOperationContext<'_>, remote_field: &Field) -> Result<(), Error> {
    let expected = &ctx.parent_field.ty;
    let got = remote_field.ty.to_string();

    if *expected != got {
        return Err(Error::ReturnTypeMismatch {
            operation: ctx.operation.kind,
            field: remote_field.name.clone(),
            expected: expected.clone(),
            got,
        });
    }

    Ok(())
}

fn check_arguments(ctx: &RemoteOperationContext<'_>, remote_field: &Field) -> Result<(), Error> {
    let operation = ctx.operation.kind;
    let selection = &ctx.operation.selection;

    // Arguments of non-root custom fields would come from the parent object, which we do not
    // resolve yet.
    if !selection.arguments.is_empty() && !ctx.schema.is_root_type(&ctx.parent_type.name) {
        return Err(Error::NonRootArgumentsUnsupported {
            parent_type: ctx.parent_type.name.clone(),
            field: ctx.parent_field.name.clone(),
        });
    }

    for argument in &selection.arguments {
        let remote_argument =
            remote_field
                .argument_by_name(&argument.name)
                .ok_or_else(|| Error::RemoteArgumentNotFound {
                    operation,
                    field: selection.name.clone(),
                    argument: argument.name.clone(),
                })?;

        let local_argument = match &argument.value {
            ArgumentValue::Variable(variable) => ctx.parent_field.argument_by_name(variable),
            ArgumentValue::Literal(_) => None,
        }
        .ok_or_else(|| Error::MissingVariable {
            operation,
            field: selection.name.clone(),
            variable: argument.value.to_string(),
        })?;

        let got = remote_argument.ty.to_string();

        if local_argument.ty != got {
            return Err(Error::ArgTypeMismatch {
                operation,
                field: selection.name.clone(),
                argument: argument.name.clone(),
                expected: local_argument.ty.clone(),
                got,
            });
        }
    }

    let missing = remote_field
        .args
        .iter()
        .filter(|remote_argument| remote_argument.ty.is_required())
        .find(|remote_argument| {
            !selection
                .arguments
                .iter()
                .any(|argument| argument.name == remote_argument.name)
        });

    if let Some(remote_argument) = missing {
        return Err(Error::RequiredArgMissing {
            operation,
            field: selection.name.clone(),
            argument: remote_argument.name.clone(),
        });
    }

    Ok(())
}

fn check_shape(
    ctx: &RemoteOperationContext<'_>,
    remote_field: &Field,
    remote: &IntrospectionSchema,
) -> Result<(), Error> {
    let argument_types = remote_field
        .args
        .iter()
        .map(|argument| &argument.ty)
        .filter(|ty| matches!(ty.named_kind(), TypeKind::Object | TypeKind::InputObject));

    let seeds = std::iter::once(&remote_field.ty).chain(argument_types);
    let expanded = expand(seeds, remote, |name| ctx.schema.is_scalar(name))?;

    tracing::debug!(types = expanded.len(), "expanded remote types");

    for (type_name, fields) in &expanded {
        let local_type = ctx
            .schema
            .type_by_name(type_name)
            .ok_or_else(|| Error::LocalTypeNotFound((*type_name).to_owned()))?;

        for field in fields {
            let local_field = local_type
                .field_by_name(field.name)
                .ok_or_else(|| Error::LocalFieldNotFound {
                    type_name: local_type.name.clone(),
                    field: field.name.to_owned(),
                })?;

            let got = field.ty.to_string();

            if local_field.ty != got {
                return Err(Error::FieldTypeMismatch {
                    type_name: local_type.name.clone(),
                    field: field.name.to_owned(),
                    expected: local_field.ty.clone(),
                    got,
                });
            }
        }
    }

    Ok(())
}
