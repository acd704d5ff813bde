//! Byte-level transaction codec.
//!
//! Decodes raw transaction bytes into ordered records of typed fields and
//! writes those records back bit-exactly. Field decoders are small structs
//! composed into a [`Parser`]; the [`encode`] module holds the matching
//! builders for every value shape.
//!
//! Base58 and base64 rendering come from `bs58` and `base64`; integer, hex and
//! UTF-8 conversion lives in `codec-primitives`.

pub mod encode;
pub mod error;
pub mod fields;
pub mod params;
pub mod parser;
pub mod types;

// Re-export key public types for ergonomic imports.
pub use codec_primitives::{BigInteger, MalformedText, Text};
pub use error::{CodecError, CodecResult};
pub use fields::{
    get_number_from_bytes, AddressOrAliasField, AnchorsField, Base58Field, BigNumberField,
    BooleanField, DataField, Decoded, FieldDecoder, FieldEncoder, NumberField, ScriptField,
    SignedBigNumberField, StringField, StringWithLengthField, TransfersField, ValueField,
};
pub use params::DataFieldType;
pub use parser::{
    parse_constructor, to_address_or_alias, to_anchors, to_base58, to_big_number, to_boolean,
    to_data, to_number, to_script, to_string_with_length, to_transfers, NamedField, Parser,
};
pub use types::{AddressOrAlias, DataEntry, DataValue, Record, Transfer, Value};
