//! Static shape descriptors.
//!
//! A [`Shape`] lists every field a block recognizes, the kind of value it
//! holds, and what happens when the field is absent. Descriptors are plain
//! `const` data: the field readers and writers in [`crate::fields`] consult
//! them on every access, so a codec can never read a field its shape does
//! not declare, and the default applied on decode is always the one written
//! down here.

/// What a field holds.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String,
    Int,
    Bool,
    /// A decimal number carried as a string, e.g. `"7.25"`.
    Decimal,
    /// A calendar date, `YYYY-MM-DD`.
    Date,
    /// A local time of day, `HH:MM:SS`.
    LocalTime,
    StringList,
    Block(&'static Shape),
    BlockList(&'static Shape),
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int => "int",
            FieldKind::Bool => "bool",
            FieldKind::Decimal => "decimal",
            FieldKind::Date => "date",
            FieldKind::LocalTime => "local time",
            FieldKind::StringList => "string list",
            FieldKind::Block(_) => "block",
            FieldKind::BlockList(_) => "block list",
        }
    }

    /// Kinds match when they are the same variant; nested shapes are not compared.
    pub fn same_as(&self, other: &FieldKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn nested(&self) -> Option<&'static Shape> {
        match self {
            FieldKind::Block(shape) | FieldKind::BlockList(shape) => Some(shape),
            _ => None,
        }
    }
}

/// A declared default for an optional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Str(&'static str),
    Int(i64),
    Bool(bool),
    EmptyList,
}

/// What absence of a field means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absence is a decode error.
    Required,
    /// Absence decodes to the declared default, which encode then writes out.
    Default(DefaultValue),
    /// Absence is meaningful and is preserved through a round-trip.
    Optional,
    /// Payload of a nested union; the union's codec decides.
    Payload,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldShape {
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
}

impl FieldShape {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        FieldShape {
            name,
            kind,
            presence: Presence::Required,
        }
    }

    pub const fn defaulted(name: &'static str, kind: FieldKind, default: DefaultValue) -> Self {
        FieldShape {
            name,
            kind,
            presence: Presence::Default(default),
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        FieldShape {
            name,
            kind,
            presence: Presence::Optional,
        }
    }

    pub const fn payload(name: &'static str, kind: FieldKind) -> Self {
        FieldShape {
            name,
            kind,
            presence: Presence::Payload,
        }
    }
}

/// The recognized fields of one block.
#[derive(Debug)]
pub struct Shape {
    pub name: &'static str,
    pub fields: &'static [FieldShape],
}

impl Shape {
    pub const fn new(name: &'static str, fields: &'static [FieldShape]) -> Self {
        Shape { name, fields }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldShape> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn recognizes(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

// Shorthands used by the descriptor tables.
pub(crate) const STRING: FieldKind = FieldKind::String;
pub(crate) const INT: FieldKind = FieldKind::Int;
pub(crate) const BOOL: FieldKind = FieldKind::Bool;
pub(crate) const DECIMAL: FieldKind = FieldKind::Decimal;
pub(crate) const STRINGS: FieldKind = FieldKind::StringList;

pub(crate) const EMPTY: DefaultValue = DefaultValue::Str("");
pub(crate) const ZERO: DefaultValue = DefaultValue::Int(0);
pub(crate) const FALSE: DefaultValue = DefaultValue::Bool(false);
pub(crate) const NO_ITEMS: DefaultValue = DefaultValue::EmptyList;

#[cfg(test)]
mod tests {
    use super::*;

    const INNER: Shape = Shape::new("inner", &[FieldShape::required("x", INT)]);
    const OUTER: Shape = Shape::new(
        "outer",
        &[
            FieldShape::required("name", STRING),
            FieldShape::defaulted("count", INT, ZERO),
            FieldShape::optional("inner", FieldKind::Block(&INNER)),
        ],
    );

    #[test]
    fn test_field_lookup() {
        let count = OUTER.field("count").unwrap();
        assert_eq!(count.presence, Presence::Default(DefaultValue::Int(0)));
        assert!(OUTER.field("missing").is_none());
        assert!(OUTER.recognizes("name"));
    }

    #[test]
    fn test_kind_comparison_ignores_nested_shape() {
        let inner = OUTER.field("inner").unwrap();
        assert!(inner.kind.same_as(&FieldKind::Block(&OUTER)));
        assert!(!inner.kind.same_as(&FieldKind::BlockList(&INNER)));
        assert_eq!(inner.kind.nested().unwrap().name, "inner");
    }

    #[test]
    fn test_field_names_in_declaration_order() {
        let names: Vec<&str> = OUTER.field_names().collect();
        assert_eq!(names, vec!["name", "count", "inner"]);
    }
}
