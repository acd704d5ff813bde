//! Record parser: an ordered list of named field decoders folded over the
//! input from offset 0.
//!
//! Decoding is single-pass and strictly forward. Each field starts where the
//! previous one stopped; the cursor lives only for the duration of one
//! [`Parser::parse`] call.

use std::fmt;

use tracing::{debug, trace};

use crate::error::{CodecError, CodecResult};
use crate::fields::{
    AddressOrAliasField, AnchorsField, Base58Field, BigNumberField, BooleanField, DataField,
    Decoded, NumberField, ScriptField, StringWithLengthField, TransfersField, ValueField,
};
use crate::types::Record;

/// A field decoder bound to the name its value is recorded under.
pub struct NamedField {
    name: String,
    field: Box<dyn ValueField>,
}

impl NamedField {
    pub fn new(name: impl Into<String>, field: impl ValueField + 'static) -> Self {
        Self {
            name: name.into(),
            field: Box::new(field),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decode at the cursor, advance it, and record the value.
    fn apply(&self, acc: &mut Accumulator, bytes: &[u8]) -> CodecResult<()> {
        let Decoded { value, shift } = self.field.decode_value(bytes, acc.cursor)?;
        trace!(field = %self.name, offset = acc.cursor, shift, "decoded field");
        acc.cursor += shift;
        acc.record.push(self.name.clone(), value);
        Ok(())
    }
}

impl fmt::Debug for NamedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedField")
            .field("name", &self.name)
            .field("kind", &self.field.kind())
            .finish()
    }
}

/// Per-parse state: the cursor and the fields decoded so far.
#[derive(Default)]
struct Accumulator {
    cursor: usize,
    record: Record,
}

/// Ordered field layout of one transaction kind.
#[derive(Debug, Default)]
pub struct Parser {
    fields: Vec<NamedField>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decoder under `name`.
    pub fn field(self, name: impl Into<String>, field: impl ValueField + 'static) -> Self {
        self.push(NamedField::new(name, field))
    }

    pub fn push(mut self, field: NamedField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[NamedField] {
        &self.fields
    }

    /// Decode `bytes` into a record. Any field error aborts the whole parse.
    ///
    /// Bytes past the last field are left alone; [`Record::consumed`] says
    /// where the parse stopped.
    pub fn parse(&self, bytes: &[u8]) -> CodecResult<Record> {
        let acc = self
            .fields
            .iter()
            .try_fold(Accumulator::default(), |mut acc, field| {
                field.apply(&mut acc, bytes)?;
                Ok::<_, CodecError>(acc)
            })?;

        let mut record = acc.record;
        record.set_consumed(acc.cursor);
        debug!(
            fields = record.len(),
            consumed = acc.cursor,
            total = bytes.len(),
            "parsed record"
        );
        Ok(record)
    }

    /// Write a record back in this layout.
    ///
    /// Every field of the layout must be present in the record under its name
    /// and hold the variant its decoder produces.
    pub fn encode(&self, record: &Record) -> CodecResult<Vec<u8>> {
        let mut out = Vec::new();
        for field in &self.fields {
            let value = record
                .get(&field.name)
                .ok_or_else(|| CodecError::InvalidInput(format!("missing field {}", field.name)))?;
            out.extend(field.field.encode_value(&field.name, value)?);
        }
        Ok(out)
    }
}

/// Build a parser from an ordered list of named fields.
pub fn parse_constructor(parts: Vec<NamedField>) -> Parser {
    Parser { fields: parts }
}

/// 8-byte unsigned amount.
pub fn to_big_number(name: impl Into<String>) -> NamedField {
    NamedField::new(name, BigNumberField::default())
}

/// Single-byte number, e.g. a type or version byte.
pub fn to_number(name: impl Into<String>) -> NamedField {
    NamedField::new(name, NumberField::new(1))
}

pub fn to_boolean(name: impl Into<String>) -> NamedField {
    NamedField::new(name, BooleanField)
}

pub fn to_string_with_length(name: impl Into<String>) -> NamedField {
    NamedField::new(name, StringWithLengthField)
}

/// 32-byte identifier such as a public key or asset id.
pub fn to_base58(name: impl Into<String>) -> NamedField {
    NamedField::new(name, Base58Field::default())
}

pub fn to_address_or_alias(name: impl Into<String>) -> NamedField {
    NamedField::new(name, AddressOrAliasField)
}

pub fn to_transfers(name: impl Into<String>) -> NamedField {
    NamedField::new(name, TransfersField)
}

pub fn to_anchors(name: impl Into<String>) -> NamedField {
    NamedField::new(name, AnchorsField)
}

pub fn to_script(name: impl Into<String>) -> NamedField {
    NamedField::new(name, ScriptField)
}

pub fn to_data(name: impl Into<String>) -> NamedField {
    NamedField::new(name, DataField)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;
    use codec_primitives::BigInteger;

    fn transfer_layout() -> Parser {
        parse_constructor(vec![
            to_number("type"),
            to_number("version"),
            to_base58("senderPublicKey"),
            to_address_or_alias("recipient"),
            to_big_number("amount"),
            to_big_number("fee"),
            to_string_with_length("attachment"),
        ])
    }

    fn transfer_bytes() -> Vec<u8> {
        let mut bytes = vec![4, 2];
        bytes.extend([7u8; 32]);
        bytes.extend([0x02, b'W', 0x00, 0x03, b'b', b'o', b'b']);
        bytes.extend(1_000u64.to_be_bytes());
        bytes.extend(100_000u64.to_be_bytes());
        bytes.extend([0x00, 0x02, b'h', b'i']);
        bytes
    }

    #[test]
    fn fields_are_recorded_in_order() {
        let record = transfer_layout().parse(&transfer_bytes()).unwrap();
        let names: Vec<&str> = record.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["type", "version", "senderPublicKey", "recipient", "amount", "fee", "attachment"]
        );
        assert_eq!(record.get("type"), Some(&Value::Number(4)));
        assert_eq!(
            record.get("fee"),
            Some(&Value::BigNumber(BigInteger::from(100_000u64)))
        );
        assert_eq!(record.get("attachment"), Some(&Value::Text(Ok("hi".into()))));
    }

    #[test]
    fn cursor_tracks_consumed_bytes() {
        let mut bytes = transfer_bytes();
        let expected = bytes.len();
        bytes.extend([0xde, 0xad]);
        let record = transfer_layout().parse(&bytes).unwrap();
        assert_eq!(record.consumed(), expected);
    }

    #[test]
    fn record_reencodes_to_same_bytes() {
        let bytes = transfer_bytes();
        let layout = transfer_layout();
        let record = layout.parse(&bytes).unwrap();
        assert_eq!(layout.encode(&record).unwrap(), bytes);
    }

    #[test]
    fn truncated_input_aborts_whole_parse() {
        let bytes = transfer_bytes();
        let err = transfer_layout().parse(&bytes[..bytes.len() - 10]).unwrap_err();
        assert!(matches!(err, CodecError::InsufficientBytes { .. }));
    }

    #[test]
    fn encode_reports_missing_field() {
        let record = Record::new().with("type", Value::Number(4));
        let err = transfer_layout().encode(&record).unwrap_err();
        assert_eq!(err, CodecError::InvalidInput("missing field version".into()));
    }

    #[test]
    fn encode_reports_wrong_variant() {
        let layout = Parser::new().field("fee", BigNumberField::default());
        let record = Record::new().with("fee", Value::Boolean(true));
        assert_eq!(
            layout.encode(&record).unwrap_err(),
            CodecError::TypeMismatch {
                field: "fee".into(),
                expected: "big number",
                found: "boolean"
            }
        );
    }

    #[test]
    fn empty_parser_yields_empty_record() {
        let record = Parser::new().parse(&[1, 2, 3]).unwrap();
        assert!(record.is_empty());
        assert_eq!(record.consumed(), 0);
    }

    #[test]
    fn parser_is_shareable_across_threads() {
        let layout = std::sync::Arc::new(transfer_layout());
        let bytes = std::sync::Arc::new(transfer_bytes());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let layout = layout.clone();
                let bytes = bytes.clone();
                std::thread::spawn(move || layout.parse(&bytes).unwrap())
            })
            .collect();
        let first = transfer_layout().parse(&transfer_bytes()).unwrap();
        for h in handles {
            assert_eq!(h.join().unwrap(), first);
        }
    }

    #[test]
    fn debug_shows_names_and_kinds() {
        let debug = format!("{:?}", to_script("script"));
        assert!(debug.contains("script"));
        assert!(debug.contains("kind"));
    }
}
