//! The canonical proto3 JSON mapping, for both the generated and the dynamic messages.
//!
//! `prost` generated types have no JSON support of their own. The build script derives
//! `serde` traits for them and routes the fields whose JSON form differs from their Rust form
//! through the `with` modules below. Dynamic messages use the mapping built into
//! `prost-reflect`.

use prost_reflect::{DynamicMessage, MessageDescriptor};
use serde::{Deserialize, Deserializer};

use crate::example::Person;

/// Fields holding their default value are left out of the JSON output.
#[inline]
pub fn is_default<T>(value: &T) -> bool
where
    T: Default + PartialEq,
{
    *value == T::default()
}

/// Reads `null` as the default value of the field's type.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Encodes a generated `Person` as JSON text.
pub fn encode_static(person: &Person) -> Result<String, serde_json::Error> {
    serde_json::to_string(person)
}

/// Decodes JSON text into a generated `Person`.
pub fn decode_static(json: &str) -> Result<Person, serde_json::Error> {
    serde_json::from_str(json)
}

/// Encodes a dynamic message as JSON text.
pub fn encode_dynamic(message: &DynamicMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(message)
}

/// Decodes JSON text into a dynamic message of type `descriptor`.
///
/// Fails if anything other than whitespace follows the message.
pub fn decode_dynamic(
    descriptor: MessageDescriptor,
    json: &str,
) -> Result<DynamicMessage, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let message = DynamicMessage::deserialize(descriptor, &mut deserializer)?;
    deserializer.end()?;
    Ok(message)
}

/// Encodes and then decodes a generated `Person`.
pub fn round_trip_static(person: &Person) -> Result<Person, serde_json::Error> {
    decode_static(&encode_static(person)?)
}

/// Encodes and then decodes a dynamic message, decoding against `descriptor`.
pub fn round_trip_dynamic(
    descriptor: &MessageDescriptor,
    message: &DynamicMessage,
) -> Result<DynamicMessage, serde_json::Error> {
    decode_dynamic(descriptor.clone(), &encode_dynamic(message)?)
}

/// `int32` fields: written as a number, read from a number or a decimal string.
pub mod int32 {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(value: &i32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(Int32Visitor)
    }

    struct Int32Visitor;

    impl Visitor<'_> for Int32Visitor {
        type Value = i32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a 32-bit signed integer or its decimal string")
        }

        fn visit_i64<E>(self, v: i64) -> Result<i32, E>
        where
            E: de::Error,
        {
            i32::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_u64<E>(self, v: u64) -> Result<i32, E>
        where
            E: de::Error,
        {
            i32::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_str<E>(self, v: &str) -> Result<i32, E>
        where
            E: de::Error,
        {
            v.parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }

        fn visit_unit<E>(self) -> Result<i32, E>
        where
            E: de::Error,
        {
            Ok(0)
        }
    }
}

/// `int64` fields: written as a decimal string, read from a string or a number.
pub mod int64 {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(Int64Visitor)
    }

    struct Int64Visitor;

    impl Visitor<'_> for Int64Visitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a 64-bit signed integer or its decimal string")
        }

        fn visit_i64<E>(self, v: i64) -> Result<i64, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<i64, E>
        where
            E: de::Error,
        {
            i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_str<E>(self, v: &str) -> Result<i64, E>
        where
            E: de::Error,
        {
            v.parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }

        fn visit_unit<E>(self) -> Result<i64, E>
        where
            E: de::Error,
        {
            Ok(0)
        }
    }
}

/// `Person.PhoneType` fields: written as the value name, read from a name or a number.
pub mod phone_type {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serialize, Serializer};

    use crate::example::person::PhoneType;

    pub fn serialize<S>(value: &i32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match PhoneType::try_from(*value) {
            Ok(phone_type) => phone_type.as_str_name().serialize(serializer),
            // Unknown values have no name to print.
            Err(_) => serializer.serialize_i32(*value),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PhoneTypeVisitor)
    }

    struct PhoneTypeVisitor;

    impl Visitor<'_> for PhoneTypeVisitor {
        type Value = i32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a PhoneType name or number")
        }

        fn visit_i64<E>(self, v: i64) -> Result<i32, E>
        where
            E: de::Error,
        {
            i32::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_u64<E>(self, v: u64) -> Result<i32, E>
        where
            E: de::Error,
        {
            i32::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_str<E>(self, v: &str) -> Result<i32, E>
        where
            E: de::Error,
        {
            PhoneType::from_str_name(v)
                .map(|phone_type| phone_type as i32)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
        }

        fn visit_unit<E>(self) -> Result<i32, E>
        where
            E: de::Error,
        {
            Ok(PhoneType::Mobile as i32)
        }
    }
}
