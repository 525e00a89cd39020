//! Shape-checked access to configuration blocks.
//!
//! [`FieldReader`] and [`FieldWriter`] are the only way codecs touch a
//! [`ConfigMap`]. Each access names a field; the reader looks the field up in
//! the block's [`Shape`], checks the declared kind, and applies the declared
//! presence policy, so the tables in the variant modules are the single
//! source of truth for defaults. Both carry the dotted path of the block they
//! wrap so every error points at the offending key.
//!
//! Keys a nested block's shape does not declare are never an error. The
//! reader reports them by block path ([`FieldReader::nested_unknown_fields`])
//! and a writer given the same table puts them back in place.

use std::str::FromStr;

use rust_decimal::Decimal;
use time::macros::format_description;

use crate::config::TranscoderConfig;
use crate::error::CodecError;
use crate::model::Enumerated;
use crate::shape::{DefaultValue, FieldKind, FieldShape, Presence, Shape};
use crate::value::{join_path, ConfigMap, ConfigValue, NestedFields};

/// A sub-block with its own shape, such as a money amount or one
/// entry of a list of blocks.
pub trait Record: Sized {
    const SHAPE: &'static Shape;

    fn decode(reader: &FieldReader<'_>) -> Result<Self, CodecError>;
    fn encode(&self, writer: &mut FieldWriter<'_>);
}

// ── Reader ────────────────────────────────────────────────────────────────────

pub struct FieldReader<'a> {
    shape: &'static Shape,
    map: &'a ConfigMap,
    path: String,
    config: &'a TranscoderConfig,
}

impl<'a> FieldReader<'a> {
    pub fn new(
        shape: &'static Shape,
        map: &'a ConfigMap,
        path: impl Into<String>,
        config: &'a TranscoderConfig,
    ) -> Self {
        FieldReader {
            shape,
            map,
            path: path.into(),
            config,
        }
    }

    pub fn config(&self) -> &'a TranscoderConfig {
        self.config
    }

    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Dotted path of `name` inside this block.
    pub fn path_of(&self, name: &str) -> String {
        join_path(&self.path, name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Entries whose keys the shape does not declare, in input order.
    pub fn unknown_fields(&self) -> ConfigMap {
        undeclared(self.shape, self.map)
    }

    /// Undeclared entries of every block nested below this one, keyed by the
    /// block's dotted path. Blocks with no such entries are left out.
    pub fn nested_unknown_fields(&self) -> NestedFields {
        let mut out = NestedFields::new();
        collect_nested(self.shape, self.map, &self.path, &mut out);
        out
    }

    fn declared(&self, name: &str, kind: FieldKind) -> Result<&'static FieldShape, CodecError> {
        let field = self.shape.field(name).ok_or_else(|| CodecError::Shape {
            field: self.path_of(name),
            reason: "field is not declared",
        })?;
        if !field.kind.same_as(&kind) {
            return Err(CodecError::Shape {
                field: self.path_of(name),
                reason: "field is declared with a different kind",
            });
        }
        Ok(field)
    }

    /// The default for an absent field read through a non-optional accessor.
    fn fallback(&self, field: &FieldShape) -> Result<DefaultValue, CodecError> {
        match field.presence {
            Presence::Required => Err(CodecError::MissingRequiredField {
                field: self.path_of(field.name),
            }),
            Presence::Default(default) => Ok(default),
            Presence::Optional | Presence::Payload => Err(CodecError::Shape {
                field: self.path_of(field.name),
                reason: "field has no default",
            }),
        }
    }

    fn only_optional(&self, field: &FieldShape) -> Result<(), CodecError> {
        match field.presence {
            Presence::Optional | Presence::Payload => Ok(()),
            Presence::Required | Presence::Default(_) => Err(CodecError::Shape {
                field: self.path_of(field.name),
                reason: "field is not optional",
            }),
        }
    }

    fn bad_default(&self, name: &str) -> CodecError {
        CodecError::Shape {
            field: self.path_of(name),
            reason: "declared default has the wrong kind",
        }
    }

    fn mismatch(&self, name: &str, expected: &'static str, found: &ConfigValue) -> CodecError {
        CodecError::TypeMismatch {
            field: self.path_of(name),
            expected,
            found: found.kind_name(),
        }
    }

    fn present(&self, name: &str, kind: FieldKind) -> Result<Option<&'a ConfigValue>, CodecError> {
        let field = self.declared(name, kind)?;
        self.only_optional(field)?;
        Ok(self.map.get(name))
    }

    // ── Scalars ───────────────────────────────────────────────────────────────

    fn as_string(&self, name: &str, value: &'a ConfigValue) -> Result<String, CodecError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.mismatch(name, "string", value))
    }

    pub fn string(&self, name: &str) -> Result<String, CodecError> {
        let field = self.declared(name, FieldKind::String)?;
        match self.map.get(name) {
            Some(value) => self.as_string(name, value),
            None => match self.fallback(field)? {
                DefaultValue::Str(s) => Ok(s.to_string()),
                _ => Err(self.bad_default(name)),
            },
        }
    }

    pub fn opt_string(&self, name: &str) -> Result<Option<String>, CodecError> {
        self.present(name, FieldKind::String)?
            .map(|v| self.as_string(name, v))
            .transpose()
    }

    fn as_int(&self, name: &str, value: &ConfigValue) -> Result<i64, CodecError> {
        value
            .as_i64()
            .ok_or_else(|| self.mismatch(name, "int", value))
    }

    pub fn int(&self, name: &str) -> Result<i64, CodecError> {
        let field = self.declared(name, FieldKind::Int)?;
        match self.map.get(name) {
            Some(value) => self.as_int(name, value),
            None => match self.fallback(field)? {
                DefaultValue::Int(n) => Ok(n),
                _ => Err(self.bad_default(name)),
            },
        }
    }

    pub fn opt_int(&self, name: &str) -> Result<Option<i64>, CodecError> {
        self.present(name, FieldKind::Int)?
            .map(|v| self.as_int(name, v))
            .transpose()
    }

    fn as_bool(&self, name: &str, value: &ConfigValue) -> Result<bool, CodecError> {
        value
            .as_bool()
            .ok_or_else(|| self.mismatch(name, "bool", value))
    }

    pub fn bool(&self, name: &str) -> Result<bool, CodecError> {
        let field = self.declared(name, FieldKind::Bool)?;
        match self.map.get(name) {
            Some(value) => self.as_bool(name, value),
            None => match self.fallback(field)? {
                DefaultValue::Bool(b) => Ok(b),
                _ => Err(self.bad_default(name)),
            },
        }
    }

    pub fn opt_bool(&self, name: &str) -> Result<Option<bool>, CodecError> {
        self.present(name, FieldKind::Bool)?
            .map(|v| self.as_bool(name, v))
            .transpose()
    }

    // ── Validated text ────────────────────────────────────────────────────────

    fn as_decimal(&self, name: &str, value: &'a ConfigValue) -> Result<String, CodecError> {
        let text = self.as_string(name, value)?;
        Decimal::from_str(&text).map_err(|e| CodecError::InvalidValue {
            field: self.path_of(name),
            value: text.clone(),
            reason: format!("not a decimal number: {}", e),
        })?;
        Ok(text)
    }

    /// A required decimal, returned as the exact text supplied.
    pub fn decimal(&self, name: &str) -> Result<String, CodecError> {
        let field = self.declared(name, FieldKind::Decimal)?;
        match self.map.get(name) {
            Some(value) => self.as_decimal(name, value),
            None => match self.fallback(field)? {
                DefaultValue::Str(s) => Ok(s.to_string()),
                _ => Err(self.bad_default(name)),
            },
        }
    }

    pub fn opt_decimal(&self, name: &str) -> Result<Option<String>, CodecError> {
        self.present(name, FieldKind::Decimal)?
            .map(|v| self.as_decimal(name, v))
            .transpose()
    }

    pub fn opt_date(&self, name: &str) -> Result<Option<String>, CodecError> {
        self.present(name, FieldKind::Date)?
            .map(|v| {
                let text = self.as_string(name, v)?;
                parse_date(&text).map_err(|e| CodecError::InvalidValue {
                    field: self.path_of(name),
                    value: text.clone(),
                    reason: format!("expected YYYY-MM-DD: {}", e),
                })?;
                Ok(text)
            })
            .transpose()
    }

    pub fn opt_local_time(&self, name: &str) -> Result<Option<String>, CodecError> {
        let format = format_description!("[hour]:[minute]:[second]");
        self.present(name, FieldKind::LocalTime)?
            .map(|v| {
                let text = self.as_string(name, v)?;
                time::Time::parse(&text, format).map_err(|e| CodecError::InvalidValue {
                    field: self.path_of(name),
                    value: text.clone(),
                    reason: format!("expected HH:MM:SS: {}", e),
                })?;
                Ok(text)
            })
            .transpose()
    }

    // ── Enumerations ──────────────────────────────────────────────────────────

    fn raw_enum(&self, name: &str) -> Result<Option<String>, CodecError> {
        let field = self.declared(name, FieldKind::String)?;
        match self.map.get(name) {
            Some(value) => self.as_string(name, value).map(Some),
            None => match field.presence {
                Presence::Optional | Presence::Payload => Ok(None),
                _ => match self.fallback(field)? {
                    DefaultValue::Str(s) => Ok(Some(s.to_string())),
                    _ => Err(self.bad_default(name)),
                },
            },
        }
    }

    fn parse_enum<E: Enumerated>(&self, name: &str, text: &str) -> Result<E, CodecError> {
        E::from_name(text).ok_or_else(|| CodecError::InvalidValue {
            field: self.path_of(name),
            value: text.to_string(),
            reason: format!("{} must be one of {}", E::LABEL, E::NAMES.join(", ")),
        })
    }

    /// A plain enumerated field. Unrecognized values are `InvalidValue`.
    pub fn enumerated<E: Enumerated>(&self, name: &str) -> Result<E, CodecError> {
        match self.raw_enum(name)? {
            Some(text) => self.parse_enum(name, &text),
            None => Err(CodecError::Shape {
                field: self.path_of(name),
                reason: "field has no default",
            }),
        }
    }

    pub fn opt_enumerated<E: Enumerated>(&self, name: &str) -> Result<Option<E>, CodecError> {
        self.present(name, FieldKind::String)?;
        self.raw_enum(name)?
            .map(|text| self.parse_enum(name, &text))
            .transpose()
    }

    /// The discriminator of a union. Unrecognized values are `UnknownVariant`.
    pub fn discriminator<E: Enumerated>(&self, name: &str) -> Result<E, CodecError> {
        match self.raw_enum(name)? {
            Some(text) => E::from_name(&text).ok_or(CodecError::UnknownVariant {
                union: E::LABEL,
                value: text,
            }),
            None => Err(CodecError::MissingRequiredField {
                field: self.path_of(name),
            }),
        }
    }

    // ── Lists ─────────────────────────────────────────────────────────────────

    fn as_strings(&self, name: &str, value: &'a ConfigValue) -> Result<Vec<String>, CodecError> {
        let items = value
            .as_list()
            .ok_or_else(|| self.mismatch(name, "list", value))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| CodecError::TypeMismatch {
                        field: format!("{}[{}]", self.path_of(name), i),
                        expected: "string",
                        found: item.kind_name(),
                    })
            })
            .collect()
    }

    pub fn strings(&self, name: &str) -> Result<Vec<String>, CodecError> {
        let field = self.declared(name, FieldKind::StringList)?;
        match self.map.get(name) {
            Some(value) => self.as_strings(name, value),
            None => match self.fallback(field)? {
                DefaultValue::EmptyList => Ok(Vec::new()),
                _ => Err(self.bad_default(name)),
            },
        }
    }

    pub fn opt_strings(&self, name: &str) -> Result<Option<Vec<String>>, CodecError> {
        self.present(name, FieldKind::StringList)?
            .map(|v| self.as_strings(name, v))
            .transpose()
    }

    // ── Nested blocks ─────────────────────────────────────────────────────────

    fn nested_shape(&self, name: &str, field: &FieldShape) -> Result<&'static Shape, CodecError> {
        field.kind.nested().ok_or_else(|| CodecError::Shape {
            field: self.path_of(name),
            reason: "block field has no nested shape",
        })
    }

    fn child(
        &self,
        shape: &'static Shape,
        value: &'a ConfigValue,
        path: String,
    ) -> Result<FieldReader<'a>, CodecError> {
        let map = value.as_map().ok_or_else(|| CodecError::TypeMismatch {
            field: path.clone(),
            expected: "map",
            found: value.kind_name(),
        })?;
        Ok(FieldReader::new(shape, map, path, self.config))
    }

    pub fn block(&self, name: &str) -> Result<FieldReader<'a>, CodecError> {
        let field = self.declared(name, FieldKind::Block(self.shape))?;
        let shape = self.nested_shape(name, field)?;
        match self.map.get(name) {
            Some(value) => self.child(shape, value, self.path_of(name)),
            None => {
                self.fallback(field)?;
                Err(self.bad_default(name))
            }
        }
    }

    pub fn opt_block(&self, name: &str) -> Result<Option<FieldReader<'a>>, CodecError> {
        let field = self.declared(name, FieldKind::Block(self.shape))?;
        self.only_optional(field)?;
        let shape = self.nested_shape(name, field)?;
        self.map
            .get(name)
            .map(|value| self.child(shape, value, self.path_of(name)))
            .transpose()
    }

    fn as_blocks(
        &self,
        name: &str,
        shape: &'static Shape,
        value: &'a ConfigValue,
    ) -> Result<Vec<FieldReader<'a>>, CodecError> {
        let items = value
            .as_list()
            .ok_or_else(|| self.mismatch(name, "list", value))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.child(shape, item, format!("{}[{}]", self.path_of(name), i)))
            .collect()
    }

    pub fn blocks(&self, name: &str) -> Result<Vec<FieldReader<'a>>, CodecError> {
        let field = self.declared(name, FieldKind::BlockList(self.shape))?;
        let shape = self.nested_shape(name, field)?;
        match self.map.get(name) {
            Some(value) => self.as_blocks(name, shape, value),
            None => match self.fallback(field)? {
                DefaultValue::EmptyList => Ok(Vec::new()),
                _ => Err(self.bad_default(name)),
            },
        }
    }

    pub fn record<T: Record>(&self, name: &str) -> Result<T, CodecError> {
        T::decode(&self.block(name)?)
    }

    pub fn opt_record<T: Record>(&self, name: &str) -> Result<Option<T>, CodecError> {
        self.opt_block(name)?.map(|r| T::decode(&r)).transpose()
    }

    pub fn records<T: Record>(&self, name: &str) -> Result<Vec<T>, CodecError> {
        self.blocks(name)?.iter().map(T::decode).collect()
    }
}

/// Parse a `YYYY-MM-DD` date field value.
pub(crate) fn parse_date(text: &str) -> Result<time::Date, time::error::Parse> {
    time::Date::parse(text, format_description!("[year]-[month]-[day]"))
}

fn undeclared(shape: &Shape, map: &ConfigMap) -> ConfigMap {
    map.iter()
        .filter(|(k, _)| !shape.recognizes(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn collect_nested(shape: &'static Shape, map: &ConfigMap, path: &str, out: &mut NestedFields) {
    for field in shape.fields {
        let Some(nested) = field.kind.nested() else {
            continue;
        };
        let base = join_path(path, field.name);
        match map.get(field.name) {
            Some(ConfigValue::Map(block)) => collect_block(nested, block, base, out),
            Some(ConfigValue::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if let ConfigValue::Map(block) = item {
                        collect_block(nested, block, format!("{}[{}]", base, i), out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn collect_block(shape: &'static Shape, block: &ConfigMap, path: String, out: &mut NestedFields) {
    let unknown = undeclared(shape, block);
    collect_nested(shape, block, &path, out);
    if !unknown.is_empty() {
        out.insert(path, unknown);
    }
}

// ── Writer ────────────────────────────────────────────────────────────────────

/// Builds one block of the configuration representation.
///
/// Writes are checked against the block's shape. The first violation is
/// remembered and returned by [`FieldWriter::finish`], which keeps codec
/// encode functions free of per-line error handling.
pub struct FieldWriter<'a> {
    shape: &'static Shape,
    path: String,
    config: &'a TranscoderConfig,
    nested: Option<&'a NestedFields>,
    map: ConfigMap,
    error: Option<CodecError>,
}

impl<'a> FieldWriter<'a> {
    pub fn new(shape: &'static Shape, path: impl Into<String>, config: &'a TranscoderConfig) -> Self {
        FieldWriter {
            shape,
            path: path.into(),
            config,
            nested: None,
            map: ConfigMap::new(),
            error: None,
        }
    }

    /// Re-emit the undeclared entries of nested blocks from `fields`, as
    /// returned by [`FieldReader::nested_unknown_fields`].
    pub fn with_nested_unknown(mut self, fields: &'a NestedFields) -> Self {
        self.nested = Some(fields);
        self
    }

    pub fn config(&self) -> &'a TranscoderConfig {
        self.config
    }

    fn accept(&mut self, name: &str, kind: FieldKind) -> Option<&'static FieldShape> {
        if self.error.is_some() {
            return None;
        }
        match self.shape.field(name) {
            Some(field) if field.kind.same_as(&kind) => Some(field),
            Some(_) => {
                self.fail(name, "field is declared with a different kind");
                None
            }
            None => {
                self.fail(name, "field is not declared");
                None
            }
        }
    }

    fn fail(&mut self, name: &str, reason: &'static str) {
        self.error.get_or_insert(CodecError::Shape {
            field: join_path(&self.path, name),
            reason,
        });
    }

    fn put(&mut self, name: &str, kind: FieldKind, value: ConfigValue) {
        if self.accept(name, kind).is_some() {
            self.map.insert(name.to_string(), value);
        }
    }

    pub fn string(&mut self, name: &str, value: &str) {
        self.put(name, FieldKind::String, value.into());
    }

    pub fn opt_string(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.string(name, value);
        }
    }

    pub fn int(&mut self, name: &str, value: i64) {
        self.put(name, FieldKind::Int, value.into());
    }

    pub fn opt_int(&mut self, name: &str, value: Option<i64>) {
        if let Some(value) = value {
            self.int(name, value);
        }
    }

    pub fn bool(&mut self, name: &str, value: bool) {
        self.put(name, FieldKind::Bool, value.into());
    }

    pub fn opt_bool(&mut self, name: &str, value: Option<bool>) {
        if let Some(value) = value {
            self.bool(name, value);
        }
    }

    pub fn decimal(&mut self, name: &str, value: &str) {
        self.put(name, FieldKind::Decimal, value.into());
    }

    pub fn opt_decimal(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.decimal(name, value);
        }
    }

    pub fn opt_date(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.put(name, FieldKind::Date, value.into());
        }
    }

    pub fn opt_local_time(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.put(name, FieldKind::LocalTime, value.into());
        }
    }

    pub fn enumerated<E: Enumerated>(&mut self, name: &str, value: E) {
        self.string(name, value.name());
    }

    pub fn opt_enumerated<E: Enumerated>(&mut self, name: &str, value: Option<E>) {
        if let Some(value) = value {
            self.enumerated(name, value);
        }
    }

    pub fn strings(&mut self, name: &str, values: &[String]) {
        self.put(name, FieldKind::StringList, values.to_vec().into());
    }

    pub fn opt_strings(&mut self, name: &str, values: Option<&[String]>) {
        if let Some(values) = values {
            self.strings(name, values);
        }
    }

    fn child(&self, shape: &'static Shape, path: String) -> FieldWriter<'a> {
        FieldWriter {
            nested: self.nested,
            ..FieldWriter::new(shape, path, self.config)
        }
    }

    /// Write a nested block built by `build`.
    pub fn block(&mut self, name: &str, build: impl FnOnce(&mut FieldWriter<'a>)) {
        let Some(shape) = self
            .accept(name, FieldKind::Block(self.shape))
            .and_then(|f| f.kind.nested())
        else {
            return;
        };
        let mut child = self.child(shape, join_path(&self.path, name));
        build(&mut child);
        match child.finish() {
            Ok(map) => {
                self.map.insert(name.to_string(), ConfigValue::Map(map));
            }
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
    }

    pub fn blocks<T>(&mut self, name: &str, items: &[T], build: impl Fn(&T, &mut FieldWriter<'a>)) {
        let Some(shape) = self
            .accept(name, FieldKind::BlockList(self.shape))
            .and_then(|f| f.kind.nested())
        else {
            return;
        };
        let mut list = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let mut child = self.child(shape, format!("{}[{}]", join_path(&self.path, name), i));
            build(item, &mut child);
            match child.finish() {
                Ok(map) => list.push(ConfigValue::Map(map)),
                Err(e) => {
                    self.error.get_or_insert(e);
                    return;
                }
            }
        }
        self.map.insert(name.to_string(), ConfigValue::List(list));
    }

    pub fn record<T: Record>(&mut self, name: &str, value: &T) {
        self.block(name, |w| value.encode(w));
    }

    pub fn opt_record<T: Record>(&mut self, name: &str, value: Option<&T>) {
        if let Some(value) = value {
            self.record(name, value);
        }
    }

    pub fn records<T: Record>(&mut self, name: &str, values: &[T]) {
        self.blocks(name, values, |v, w| v.encode(w));
    }

    /// Append entries the shape does not recognize, skipping keys already written.
    pub fn extend_unknown(&mut self, fields: &ConfigMap) {
        for (key, value) in fields {
            if !self.map.contains_key(key) {
                self.map.insert(key.clone(), value.clone());
            }
        }
    }

    /// Insert an entry outside the shape. Used for the per-variant data block
    /// at the top level, whose key depends on the object type.
    pub fn insert_raw(&mut self, name: &str, value: ConfigValue) {
        self.map.insert(name.to_string(), value);
    }

    pub fn finish(mut self) -> Result<ConfigMap, CodecError> {
        if let Some(extra) = self.nested.and_then(|n| n.get(self.path.as_str())) {
            self.extend_unknown(extra);
        }
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.map),
        }
    }
}
