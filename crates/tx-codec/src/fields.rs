//! Field decoders.
//!
//! A decoder reads one value starting at an offset and reports how many bytes
//! it consumed. Every decoder also knows how to write its value back, so a
//! decoded record can be re-encoded byte for byte.
//!
//! Wire layouts (all prefixes are 2-byte big-endian):
//!
//! ```text
//! string with length   len | utf8 * len
//! address              26 raw bytes, first byte != 0x02
//! alias                0x02 | chain_id | len | utf8 * len
//! transfers            count | (address-or-alias | amount u64) * count
//! anchors              count | (len | bytes * len) * count
//! data                 count | (key_len | key | type u8 | payload) * count
//!   integer            8 bytes two's complement
//!   boolean            1 byte
//!   binary / string    len | bytes * len
//! script               0x00                     (no script)
//!                      version | len | bytes    (rendered base64)
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};
use codec_primitives::int::check_bytes_to_int_input;
use codec_primitives::{decode_utf8, text_to_bytes, BigInteger, Text};
use tracing::{trace, warn};

use crate::encode::{
    address_or_alias_to_bytes, anchors_to_bytes, base58_to_bytes, big_number_to_bytes,
    boolean_to_bytes, data_entries_to_bytes, long_to_bytes, script_to_bytes,
    sign_big_number_to_bytes, text_to_bytes_with_size, transfers_to_bytes,
};
use crate::error::{CodecError, CodecResult};
use crate::params::{
    DataFieldType, ADDRESS_LENGTH, ALIAS_VERSION, BASE64_PREFIX, DEFAULT_BASE58_LENGTH,
    LENGTH_SIZE, LONG_BYTES_SIZE,
};
use crate::types::{AddressOrAlias, DataEntry, DataValue, Transfer, Value};

/// A decoded value and the number of bytes it occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    pub value: T,
    pub shift: usize,
}

impl<T> Decoded<T> {
    pub fn new(value: T, shift: usize) -> Self {
        Self { value, shift }
    }
}

/// Reads one typed value at `start`.
pub trait FieldDecoder {
    type Output;

    fn decode(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<Self::Output>>;
}

/// Writes a typed value back in the layout its decoder reads.
pub trait FieldEncoder: FieldDecoder {
    fn encode(&self, value: &Self::Output) -> CodecResult<Vec<u8>>;
}

/// Object-safe view of a decoder over [`Value`], used by the record parser.
pub trait ValueField: Send + Sync {
    /// Name of the [`Value`] variant this field produces.
    fn kind(&self) -> &'static str;

    fn decode_value(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<Value>>;

    fn encode_value(&self, name: &str, value: &Value) -> CodecResult<Vec<u8>>;
}

macro_rules! value_field {
    ($field:ty, $variant:ident, $kind:literal) => {
        impl ValueField for $field {
            fn kind(&self) -> &'static str {
                $kind
            }

            fn decode_value(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<Value>> {
                let Decoded { value, shift } = self.decode(bytes, start)?;
                Ok(Decoded::new(Value::$variant(value), shift))
            }

            fn encode_value(&self, name: &str, value: &Value) -> CodecResult<Vec<u8>> {
                match value {
                    Value::$variant(v) => self.encode(v),
                    other => Err(CodecError::TypeMismatch {
                        field: name.to_string(),
                        expected: $kind,
                        found: other.kind(),
                    }),
                }
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Shared readers
// ---------------------------------------------------------------------------

/// Borrow `len` bytes at `start`, or fail naming what was missing.
fn take(bytes: &[u8], start: usize, len: usize) -> CodecResult<&[u8]> {
    let i = check_bytes_to_int_input(bytes, len, start)?;
    Ok(&bytes[i..i + len])
}

/// Read a text span; malformed UTF-8 is kept as a value, not raised.
fn read_text(bytes: &[u8], start: usize, len: usize) -> CodecResult<Text> {
    let text = decode_utf8(take(bytes, start, len)?);
    if let Err(m) = &text {
        warn!(
            offset = start + m.position,
            raw = %hex::encode(&m.raw),
            "malformed utf-8 in text field"
        );
    }
    Ok(text)
}

/// Unsigned big-endian integer of `length` bytes narrowed to `u64`.
pub fn get_number_from_bytes(bytes: &[u8], length: usize, start: usize) -> CodecResult<u64> {
    let value = BigInteger::from_bytes(take(bytes, start, length)?)?;
    value
        .to_u64()
        .ok_or_else(|| CodecError::OutOfRange(format!("{value} does not fit in 64 bits")))
}

fn read_length(bytes: &[u8], start: usize) -> CodecResult<usize> {
    Ok(get_number_from_bytes(bytes, LENGTH_SIZE, start)? as usize)
}

fn base64_text(payload: &[u8]) -> String {
    format!("{BASE64_PREFIX}{}", STANDARD.encode(payload))
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

/// One byte; any non-zero value is `true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanField;

impl FieldDecoder for BooleanField {
    type Output = bool;

    fn decode(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<bool>> {
        let b = take(bytes, start, 1)?[0];
        Ok(Decoded::new(b != 0, 1))
    }
}

impl FieldEncoder for BooleanField {
    fn encode(&self, value: &bool) -> CodecResult<Vec<u8>> {
        Ok(boolean_to_bytes(*value))
    }
}

value_field!(BooleanField, Boolean, "boolean");

/// Unsigned big-endian integer of up to 8 bytes.
#[derive(Debug, Clone, Copy)]
pub struct NumberField {
    pub len: usize,
}

impl NumberField {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl FieldDecoder for NumberField {
    type Output = u64;

    fn decode(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<u64>> {
        let value = get_number_from_bytes(bytes, self.len, start)?;
        Ok(Decoded::new(value, self.len))
    }
}

impl FieldEncoder for NumberField {
    fn encode(&self, value: &u64) -> CodecResult<Vec<u8>> {
        long_to_bytes(*value, self.len)
    }
}

value_field!(NumberField, Number, "number");

/// Unsigned arbitrary-precision integer.
#[derive(Debug, Clone, Copy)]
pub struct BigNumberField {
    pub len: usize,
}

impl BigNumberField {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Default for BigNumberField {
    fn default() -> Self {
        Self::new(LONG_BYTES_SIZE)
    }
}

impl FieldDecoder for BigNumberField {
    type Output = BigInteger;

    fn decode(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<BigInteger>> {
        let value = BigInteger::from_bytes(take(bytes, start, self.len)?)?;
        Ok(Decoded::new(value, self.len))
    }
}

impl FieldEncoder for BigNumberField {
    fn encode(&self, value: &BigInteger) -> CodecResult<Vec<u8>> {
        big_number_to_bytes(value, self.len)
    }
}

value_field!(BigNumberField, BigNumber, "big number");

/// Signed arbitrary-precision integer.
///
/// Two's complement applies only at 8 bytes; other widths read and write as
/// unsigned.
#[derive(Debug, Clone, Copy)]
pub struct SignedBigNumberField {
    pub len: usize,
}

impl SignedBigNumberField {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Default for SignedBigNumberField {
    fn default() -> Self {
        Self::new(LONG_BYTES_SIZE)
    }
}

impl FieldDecoder for SignedBigNumberField {
    type Output = BigInteger;

    fn decode(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<BigInteger>> {
        let value = BigInteger::from_signed_bytes(take(bytes, start, self.len)?)?;
        Ok(Decoded::new(value, self.len))
    }
}

impl FieldEncoder for SignedBigNumberField {
    fn encode(&self, value: &BigInteger) -> CodecResult<Vec<u8>> {
        if self.len == LONG_BYTES_SIZE {
            Ok(sign_big_number_to_bytes(value)?.to_vec())
        } else {
            big_number_to_bytes(value, self.len)
        }
    }
}

value_field!(SignedBigNumberField, BigNumber, "big number");

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// UTF-8 text of a fixed byte length.
#[derive(Debug, Clone, Copy)]
pub struct StringField {
    pub len: usize,
}

impl StringField {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl FieldDecoder for StringField {
    type Output = Text;

    fn decode(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<Text>> {
        Ok(Decoded::new(read_text(bytes, start, self.len)?, self.len))
    }
}

impl FieldEncoder for StringField {
    fn encode(&self, value: &Text) -> CodecResult<Vec<u8>> {
        let bytes = text_to_bytes(value);
        if bytes.len() != self.len {
            return Err(CodecError::WrongLength {
                expected: self.len,
                actual: bytes.len(),
            });
        }
        Ok(bytes)
    }
}

value_field!(StringField, Text, "text");

/// UTF-8 text behind a two-byte length.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringWithLengthField;

impl FieldDecoder for StringWithLengthField {
    type Output = Text;

    fn decode(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<Text>> {
        let len = read_length(bytes, start)?;
        let text = read_text(bytes, start + LENGTH_SIZE, len)?;
        Ok(Decoded::new(text, LENGTH_SIZE + len))
    }
}

impl FieldEncoder for StringWithLengthField {
    fn encode(&self, value: &Text) -> CodecResult<Vec<u8>> {
        text_to_bytes_with_size(value)
    }
}

value_field!(StringWithLengthField, Text, "text");

/// Fixed-length identifier rendered as base58.
#[derive(Debug, Clone, Copy)]
pub struct Base58Field {
    pub len: usize,
}

impl Base58Field {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Default for Base58Field {
    fn default() -> Self {
        Self::new(DEFAULT_BASE58_LENGTH)
    }
}

impl FieldDecoder for Base58Field {
    type Output = String;

    fn decode(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<String>> {
        let value = bs58::encode(take(bytes, start, self.len)?).into_string();
        Ok(Decoded::new(value, self.len))
    }
}

impl FieldEncoder for Base58Field {
    fn encode(&self, value: &String) -> CodecResult<Vec<u8>> {
        base58_to_bytes(value, self.len)
    }
}

value_field!(Base58Field, Base58, "base58");

// ---------------------------------------------------------------------------
// Variants and lists
// ---------------------------------------------------------------------------

/// Raw address or alias, chosen by the leading marker byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressOrAliasField;

impl FieldDecoder for AddressOrAliasField {
    type Output = AddressOrAlias;

    fn decode(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<AddressOrAlias>> {
        let marker = take(bytes, start, 1)?[0];
        if marker == ALIAS_VERSION {
            let chain_id = take(bytes, start + 1, 1)?[0];
            let alias = StringWithLengthField.decode(bytes, start + 2)?;
            let value = AddressOrAlias::Alias {
                chain_id,
                name: alias.value,
            };
            return Ok(Decoded::new(value, alias.shift + 2));
        }

        let address = Base58Field::new(ADDRESS_LENGTH).decode(bytes, start)?;
        Ok(Decoded::new(AddressOrAlias::Address(address.value), address.shift))
    }
}

impl FieldEncoder for AddressOrAliasField {
    fn encode(&self, value: &AddressOrAlias) -> CodecResult<Vec<u8>> {
        address_or_alias_to_bytes(value)
    }
}

value_field!(AddressOrAliasField, AddressOrAlias, "address or alias");

/// Counted list of recipient/amount pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransfersField;

impl FieldDecoder for TransfersField {
    type Output = Vec<Transfer>;

    fn decode(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<Vec<Transfer>>> {
        let count = read_length(bytes, start)?;
        trace!(count, offset = start, "decoding transfers");

        let mut transfers = Vec::with_capacity(count);
        let mut shift = LENGTH_SIZE;
        for _ in 0..count {
            let recipient = AddressOrAliasField.decode(bytes, start + shift)?;
            shift += recipient.shift;
            let amount = BigNumberField::new(LONG_BYTES_SIZE).decode(bytes, start + shift)?;
            shift += amount.shift;

            transfers.push(Transfer {
                recipient: recipient.value,
                amount: amount.value,
            });
        }

        Ok(Decoded::new(transfers, shift))
    }
}

impl FieldEncoder for TransfersField {
    fn encode(&self, value: &Vec<Transfer>) -> CodecResult<Vec<u8>> {
        transfers_to_bytes(value)
    }
}

value_field!(TransfersField, Transfers, "transfers");

/// Counted list of individually length-prefixed base58 anchors.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorsField;

impl FieldDecoder for AnchorsField {
    type Output = Vec<String>;

    fn decode(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<Vec<String>>> {
        let count = read_length(bytes, start)?;
        trace!(count, offset = start, "decoding anchors");

        let mut anchors = Vec::with_capacity(count);
        let mut shift = LENGTH_SIZE;
        for _ in 0..count {
            let len = read_length(bytes, start + shift)?;
            shift += LENGTH_SIZE;
            let anchor = Base58Field::new(len).decode(bytes, start + shift)?;
            shift += anchor.shift;
            anchors.push(anchor.value);
        }

        Ok(Decoded::new(anchors, shift))
    }
}

impl FieldEncoder for AnchorsField {
    fn encode(&self, value: &Vec<String>) -> CodecResult<Vec<u8>> {
        anchors_to_bytes(value)
    }
}

value_field!(AnchorsField, Anchors, "anchors");

/// Counted list of typed key/value entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataField;

impl DataField {
    fn decode_entry(bytes: &[u8], start: usize) -> CodecResult<Decoded<DataEntry>> {
        let key = StringWithLengthField.decode(bytes, start)?;
        let mut shift = key.shift;

        let code = take(bytes, start + shift, 1)?[0];
        let field_type = DataFieldType::from_code(code)?;
        shift += 1;

        let value = match field_type {
            DataFieldType::Integer => {
                let v = SignedBigNumberField::new(LONG_BYTES_SIZE).decode(bytes, start + shift)?;
                shift += v.shift;
                DataValue::Integer(v.value)
            }
            DataFieldType::Boolean => {
                let v = BooleanField.decode(bytes, start + shift)?;
                shift += v.shift;
                DataValue::Boolean(v.value)
            }
            DataFieldType::Binary => {
                let len = read_length(bytes, start + shift)?;
                shift += LENGTH_SIZE;
                let payload = take(bytes, start + shift, len)?;
                shift += len;
                DataValue::Binary(base64_text(payload))
            }
            DataFieldType::String => {
                let v = StringWithLengthField.decode(bytes, start + shift)?;
                shift += v.shift;
                DataValue::String(v.value)
            }
        };

        Ok(Decoded::new(
            DataEntry {
                key: key.value,
                value,
            },
            shift,
        ))
    }
}

impl FieldDecoder for DataField {
    type Output = Vec<DataEntry>;

    fn decode(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<Vec<DataEntry>>> {
        let count = read_length(bytes, start)?;
        trace!(count, offset = start, "decoding data entries");

        let mut entries = Vec::with_capacity(count);
        let mut shift = LENGTH_SIZE;
        for _ in 0..count {
            let entry = Self::decode_entry(bytes, start + shift)?;
            shift += entry.shift;
            entries.push(entry.value);
        }

        Ok(Decoded::new(entries, shift))
    }
}

impl FieldEncoder for DataField {
    fn encode(&self, value: &Vec<DataEntry>) -> CodecResult<Vec<u8>> {
        data_entries_to_bytes(value)
    }
}

value_field!(DataField, Data, "data");

/// Optional versioned script rendered as `base64:<body>`.
///
/// The rendering keeps only the body. Re-encoding writes version `1`, and a
/// non-zero version with an empty body comes back as the single zero byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptField;

impl FieldDecoder for ScriptField {
    type Output = String;

    fn decode(&self, bytes: &[u8], start: usize) -> CodecResult<Decoded<String>> {
        const VERSION_LENGTH: usize = 1;

        let version = take(bytes, start, VERSION_LENGTH)?[0];
        if version == 0 {
            return Ok(Decoded::new(BASE64_PREFIX.to_string(), VERSION_LENGTH));
        }

        let len = read_length(bytes, start + VERSION_LENGTH)?;
        let from = start + VERSION_LENGTH + LENGTH_SIZE;
        let body = take(bytes, from, len)?;
        Ok(Decoded::new(base64_text(body), from + len - start))
    }
}

impl FieldEncoder for ScriptField {
    fn encode(&self, value: &String) -> CodecResult<Vec<u8>> {
        script_to_bytes(value)
    }
}

value_field!(ScriptField, Script, "script");
