use std::fmt;

use serde::{Deserialize, Serialize};

/// The `__TypeKind` enum of the introspection schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    pub fn is_wrapper(self) -> bool {
        matches!(self, TypeKind::List | TypeKind::NonNull)
    }
}

/// A GraphQL type expression, as returned by the `TypeRef` fragment of the introspection query.
///
/// Wrappers own their inner reference, named types carry the kind of the type they point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTypeRef", into = "RawTypeRef")]
pub enum TypeRef {
    Named { kind: TypeKind, name: String },
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        TypeRef::Named {
            kind,
            name: name.into(),
        }
    }

    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    pub fn non_null(inner: TypeRef) -> Self {
        TypeRef::NonNull(Box::new(inner))
    }

    /// The name of the innermost named type.
    pub fn named_type(&self) -> &str {
        match self {
            TypeRef::Named { name, .. } => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.named_type(),
        }
    }

    /// The kind of the innermost named type.
    pub fn named_kind(&self) -> TypeKind {
        match self {
            TypeRef::Named { kind, .. } => *kind,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.named_kind(),
        }
    }

    /// Only the outermost wrapper decides. Default values are not taken into account.
    pub fn is_required(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named { name, .. } => f.write_str(name),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvalidTypeRef {
    #[error("type reference of kind {0:?} is missing `ofType`")]
    MissingOfType(TypeKind),
    #[error("type reference of kind {0:?} is missing `name`")]
    MissingName(TypeKind),
    #[error("wrapper type reference of kind {0:?} must not have a `name`")]
    UnexpectedName(TypeKind),
    #[error("named type reference of kind {0:?} must not have an `ofType`")]
    UnexpectedOfType(TypeKind),
}

/// Wire shape of a type reference: `{ "kind": ..., "name": ..., "ofType": ... }`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypeRef {
    kind: TypeKind,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    of_type: Option<Box<RawTypeRef>>,
}

impl TryFrom<RawTypeRef> for TypeRef {
    type Error = InvalidTypeRef;

    fn try_from(raw: RawTypeRef) -> Result<Self, Self::Error> {
        let RawTypeRef { kind, name, of_type } = raw;

        if kind.is_wrapper() {
            if name.is_some() {
                return Err(InvalidTypeRef::UnexpectedName(kind));
            }

            let inner = TypeRef::try_from(*of_type.ok_or(InvalidTypeRef::MissingOfType(kind))?)?;

            return Ok(match kind {
                TypeKind::List => TypeRef::list(inner),
                _ => TypeRef::non_null(inner),
            });
        }

        if of_type.is_some() {
            return Err(InvalidTypeRef::UnexpectedOfType(kind));
        }

        let name = name.ok_or(InvalidTypeRef::MissingName(kind))?;

        Ok(TypeRef::Named { kind, name })
    }
}

impl From<TypeRef> for RawTypeRef {
    fn from(ty: TypeRef) -> Self {
        match ty {
            TypeRef::Named { kind, name } => RawTypeRef {
                kind,
                name: Some(name),
                of_type: None,
            },
            TypeRef::List(inner) => RawTypeRef {
                kind: TypeKind::List,
                name: None,
                of_type: Some(Box::new((*inner).into())),
            },
            TypeRef::NonNull(inner) => RawTypeRef {
                kind: TypeKind::NonNull,
                name: None,
                of_type: Some(Box::new((*inner).into())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn renders_nested_wrappers() {
        let ty = TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named(TypeKind::Object, "Foo"))));

        assert_eq!(ty.to_string(), "[Foo!]!");
        assert_eq!(ty.named_type(), "Foo");
        assert_eq!(ty.named_kind(), TypeKind::Object);
        assert!(ty.is_required());
    }

    #[test]
    fn nullable_list_of_required_is_not_required() {
        let ty = TypeRef::list(TypeRef::non_null(TypeRef::named(TypeKind::Scalar, "ID")));

        assert_eq!(ty.to_string(), "[ID!]");
        assert!(!ty.is_required());
    }

    #[test]
    fn decodes_introspection_shape() {
        let ty: TypeRef = serde_json::from_value(json!({
            "kind": "NON_NULL",
            "name": null,
            "ofType": {
                "kind": "LIST",
                "name": null,
                "ofType": {
                    "kind": "INPUT_OBJECT",
                    "name": "PostFilter",
                    "ofType": null
                }
            }
        }))
        .unwrap();

        assert_eq!(
            ty,
            TypeRef::non_null(TypeRef::list(TypeRef::named(TypeKind::InputObject, "PostFilter")))
        );
        assert_eq!(ty.to_string(), "[PostFilter]!");
    }

    #[test]
    fn serializes_back_to_introspection_shape() {
        let ty = TypeRef::non_null(TypeRef::named(TypeKind::Scalar, "String"));

        assert_eq!(
            serde_json::to_value(&ty).unwrap(),
            json!({
                "kind": "NON_NULL",
                "name": null,
                "ofType": { "kind": "SCALAR", "name": "String", "ofType": null }
            })
        );
    }

    #[test]
    fn rejects_unknown_kind() {
        let error = serde_json::from_value::<TypeRef>(json!({ "kind": "TUPLE", "name": "Foo" })).unwrap_err();

        assert!(error.to_string().contains("unknown variant `TUPLE`"), "{error}");
    }

    #[test]
    fn rejects_wrapper_without_inner_type() {
        let error =
            serde_json::from_value::<TypeRef>(json!({ "kind": "LIST", "name": null, "ofType": null })).unwrap_err();

        assert!(error.to_string().contains("missing `ofType`"), "{error}");
    }

    #[test]
    fn rejects_wrapper_with_name() {
        let error = serde_json::from_value::<TypeRef>(json!({
            "kind": "NON_NULL",
            "name": "Bogus",
            "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null }
        }))
        .unwrap_err();

        assert!(error.to_string().contains("must not have a `name`"), "{error}");
    }

    #[test]
    fn rejects_named_type_with_inner_type() {
        let error = serde_json::from_value::<TypeRef>(json!({
            "kind": "OBJECT",
            "name": "Foo",
            "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null }
        }))
        .unwrap_err();

        assert!(error.to_string().contains("must not have an `ofType`"), "{error}");
    }

    #[test]
    fn rejects_named_type_without_name() {
        let error = serde_json::from_value::<TypeRef>(json!({ "kind": "OBJECT", "name": null })).unwrap_err();

        assert!(error.to_string().contains("missing `name`"), "{error}");
    }
}
