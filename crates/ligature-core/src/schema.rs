//! Binding schemas.
//!
//! A [`BindingSchema`] is the first-class, inspectable description of what
//! a binder should produce: the ordered set of expected field names, their
//! primitive types, and the per-field policy (required, or optional with a
//! textual default).

use crate::record::FieldType;

/// Per-field binding policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPolicy {
    /// The field must be present in the raw input.
    Required,
    /// The field may be absent; the textual default is coerced to the
    /// declared type when it is. A present-but-empty value is still
    /// *present* and never replaced by the default.
    Default(String),
}

/// One expected field: name, declared type, and policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    name: String,
    ty: FieldType,
    policy: FieldPolicy,
}

impl FieldSpec {
    /// Creates a field spec.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType, policy: FieldPolicy) -> Self {
        Self {
            name: name.into(),
            ty,
            policy,
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared primitive type.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.ty
    }

    /// Returns the binding policy.
    #[must_use]
    pub fn policy(&self) -> &FieldPolicy {
        &self.policy
    }
}

/// Ordered set of expected fields for one target record shape.
///
/// # Example
///
/// ```rust
/// use ligature_core::{BindingSchema, FieldType};
///
/// let schema = BindingSchema::builder()
///     .required("username", FieldType::Str)
///     .required("age", FieldType::Int)
///     .build();
///
/// assert_eq!(schema.len(), 2);
/// assert!(schema.get("age").is_some());
/// assert!(schema.get("Age").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BindingSchema {
    fields: Vec<FieldSpec>,
}

impl BindingSchema {
    /// Starts building a schema.
    #[must_use]
    pub fn builder() -> BindingSchemaBuilder {
        BindingSchemaBuilder::default()
    }

    /// Returns the spec for a field by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Iterates fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    /// Returns the number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder for [`BindingSchema`].
///
/// Redeclaring a field name replaces the earlier declaration; the field
/// takes the position of its last declaration.
#[derive(Debug, Default)]
pub struct BindingSchemaBuilder {
    fields: Vec<FieldSpec>,
}

impl BindingSchemaBuilder {
    /// Declares a required field.
    #[must_use]
    pub fn required(self, name: impl Into<String>, ty: FieldType) -> Self {
        self.field(FieldSpec::new(name, ty, FieldPolicy::Required))
    }

    /// Declares an optional field with a textual default.
    ///
    /// The default is coerced to the declared type at bind time, so
    /// `with_default("age", FieldType::Int, "-1")` yields `-1` when the
    /// parameter is absent.
    #[must_use]
    pub fn with_default(
        self,
        name: impl Into<String>,
        ty: FieldType,
        default: impl Into<String>,
    ) -> Self {
        self.field(FieldSpec::new(name, ty, FieldPolicy::Default(default.into())))
    }

    /// Declares a field from a prebuilt spec.
    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.retain(|f| f.name() != spec.name());
        self.fields.push(spec);
        self
    }

    /// Finishes the schema.
    #[must_use]
    pub fn build(self) -> BindingSchema {
        BindingSchema {
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_declaration_order() {
        let schema = BindingSchema::builder()
            .required("username", FieldType::Str)
            .with_default("age", FieldType::Int, "-1")
            .build();

        let names: Vec<&str> = schema.iter().map(FieldSpec::name).collect();
        assert_eq!(names, vec!["username", "age"]);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let schema = BindingSchema::builder()
            .required("username", FieldType::Str)
            .build();

        assert!(schema.get("username").is_some());
        assert!(schema.get("userName").is_none());
    }

    #[test]
    fn test_redeclaration_last_wins() {
        let schema = BindingSchema::builder()
            .required("age", FieldType::Str)
            .required("name", FieldType::Str)
            .with_default("age", FieldType::Int, "-1")
            .build();

        assert_eq!(schema.len(), 2);
        let age = schema.get("age").unwrap();
        assert_eq!(age.field_type(), FieldType::Int);
        assert_eq!(age.policy(), &FieldPolicy::Default("-1".into()));
        // The redeclared field moves to its last position.
        let names: Vec<&str> = schema.iter().map(FieldSpec::name).collect();
        assert_eq!(names, vec!["name", "age"]);
    }

    #[test]
    fn test_empty_schema() {
        let schema = BindingSchema::builder().build();
        assert!(schema.is_empty());
        assert_eq!(schema.len(), 0);
    }
}
