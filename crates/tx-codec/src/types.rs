//! Decoded field values and the ordered record that holds them.

use codec_primitives::{BigInteger, Text};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::params::DataFieldType;

/// Recipient of a transfer: a raw address or a human-readable alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressOrAlias {
    /// Base58 rendering of the 26 raw address bytes.
    Address(String),
    /// Alias name and the chain byte that precedes it on the wire.
    Alias { chain_id: u8, name: Text },
}

/// One entry of a mass-transfer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub recipient: AddressOrAlias,
    pub amount: BigInteger,
}

/// Typed payload of a data entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataValue {
    Integer(BigInteger),
    Boolean(bool),
    /// Rendered as `base64:<payload>`.
    Binary(String),
    String(Text),
}

impl DataValue {
    pub fn field_type(&self) -> DataFieldType {
        match self {
            DataValue::Integer(_) => DataFieldType::Integer,
            DataValue::Boolean(_) => DataFieldType::Boolean,
            DataValue::Binary(_) => DataFieldType::Binary,
            DataValue::String(_) => DataFieldType::String,
        }
    }
}

/// A typed key/value pair from a data transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEntry {
    pub key: Text,
    pub value: DataValue,
}

impl DataEntry {
    pub fn new(key: impl Into<String>, value: DataValue) -> Self {
        Self {
            key: Ok(key.into()),
            value,
        }
    }

    pub fn field_type(&self) -> DataFieldType {
        self.value.field_type()
    }
}

/// Any value a field decoder can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Boolean(bool),
    Number(u64),
    BigNumber(BigInteger),
    Text(Text),
    Base58(String),
    AddressOrAlias(AddressOrAlias),
    Transfers(Vec<Transfer>),
    Anchors(Vec<String>),
    Data(Vec<DataEntry>),
    Script(String),
}

impl Value {
    /// Short name of the variant, used in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigNumber(_) => "big number",
            Value::Text(_) => "text",
            Value::Base58(_) => "base58",
            Value::AddressOrAlias(_) => "address or alias",
            Value::Transfers(_) => "transfers",
            Value::Anchors(_) => "anchors",
            Value::Data(_) => "data",
            Value::Script(_) => "script",
        }
    }
}

/// Decoded fields in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Value)>,
    consumed: usize,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, builder style.
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.fields.push((name.into(), value));
    }

    /// First field stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Bytes consumed by the parse that produced this record.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub(crate) fn set_consumed(&mut self, consumed: usize) {
        self.consumed = consumed;
    }
}

// ---------------------------------------------------------------------------
// Serialization
//
// Malformed text serializes as null.
// ---------------------------------------------------------------------------

fn serialize_text<S: Serializer>(text: &Text, serializer: S) -> Result<S::Ok, S::Error> {
    match text {
        Ok(s) => serializer.serialize_str(s),
        Err(_) => serializer.serialize_none(),
    }
}

struct TextRef<'a>(&'a Text);

impl Serialize for TextRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_text(self.0, serializer)
    }
}

impl Serialize for AddressOrAlias {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AddressOrAlias::Address(address) => serializer.serialize_str(address),
            AddressOrAlias::Alias { name, .. } => serialize_text(name, serializer),
        }
    }
}

impl Serialize for DataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DataValue::Integer(v) => v.serialize(serializer),
            DataValue::Boolean(v) => serializer.serialize_bool(*v),
            DataValue::Binary(v) => serializer.serialize_str(v),
            DataValue::String(v) => serialize_text(v, serializer),
        }
    }
}

impl Serialize for DataEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DataEntry", 3)?;
        s.serialize_field("key", &TextRef(&self.key))?;
        s.serialize_field("type", &self.field_type())?;
        s.serialize_field("value", &self.value)?;
        s.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Boolean(v) => serializer.serialize_bool(*v),
            Value::Number(v) => serializer.serialize_u64(*v),
            Value::BigNumber(v) => v.serialize(serializer),
            Value::Text(v) => serialize_text(v, serializer),
            Value::Base58(v) | Value::Script(v) => serializer.serialize_str(v),
            Value::AddressOrAlias(v) => v.serialize(serializer),
            Value::Transfers(v) => v.serialize(serializer),
            Value::Anchors(v) => v.serialize(serializer),
            Value::Data(v) => v.serialize(serializer),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
