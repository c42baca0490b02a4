//! The sample `Person`, built through the generated types and through a runtime descriptor.
//!
//! Both builders fill in the same literal contents. Only `last_updated` varies, and callers
//! pass it in (usually [`now_millis`]).

use std::time::{SystemTime, UNIX_EPOCH};

use prost_reflect::{DynamicMessage, FieldDescriptor, MessageDescriptor, ReflectMessage, Value};

use crate::error::BuildError;
use crate::example::person::{Address, PhoneNumber, PhoneType};
use crate::example::Person;

pub const NAME: &str = "John Doe";
pub const ID: i32 = 123;
pub const EMAIL: &str = "john.doe@example.com";
pub const PHONE_NUMBER: &str = "555-1234";
pub const PHONE_TYPE: &str = "MOBILE";
pub const STREET: &str = "123 Main St";
pub const CITY: &str = "Anytown";
pub const COUNTRY: &str = "USA";
pub const POSTAL_CODE: &str = "12345";

/// Wall-clock milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

/// Builds the sample through the generated bindings.
pub fn static_person(last_updated: i64) -> Person {
    let mut phone = PhoneNumber {
        number: PHONE_NUMBER.to_owned(),
        ..Default::default()
    };
    phone.set_type(PhoneType::Mobile);

    Person {
        name: NAME.to_owned(),
        id: ID,
        email: EMAIL.to_owned(),
        phones: vec![phone],
        address: Some(Address {
            street: STREET.to_owned(),
            city: CITY.to_owned(),
            country: COUNTRY.to_owned(),
            postal_code: POSTAL_CODE.to_owned(),
        }),
        last_updated,
    }
}

/// Builds the sample against `descriptor`, looking every field up by name.
///
/// Lookups happen on every call; they are part of the cost of the dynamic path.
pub fn dynamic_person(
    descriptor: &MessageDescriptor,
    last_updated: i64,
) -> Result<DynamicMessage, BuildError> {
    let mut person = DynamicMessage::new(descriptor.clone());
    set(&mut person, "name", Value::String(NAME.to_owned()))?;
    set(&mut person, "id", Value::I32(ID))?;
    set(&mut person, "email", Value::String(EMAIL.to_owned()))?;

    let phone_descriptor = nested_type(descriptor, "PhoneNumber")?;
    let mut phone = DynamicMessage::new(phone_descriptor.clone());
    set(&mut phone, "number", Value::String(PHONE_NUMBER.to_owned()))?;
    let type_field = field(&phone_descriptor, "type")?;
    let phone_type = enum_value(&type_field, PHONE_TYPE)?;
    phone.try_set_field(&type_field, Value::EnumNumber(phone_type))?;
    push(&mut person, "phones", Value::Message(phone))?;

    let address_descriptor = nested_type(descriptor, "Address")?;
    let mut address = DynamicMessage::new(address_descriptor);
    set(&mut address, "street", Value::String(STREET.to_owned()))?;
    set(&mut address, "city", Value::String(CITY.to_owned()))?;
    set(&mut address, "country", Value::String(COUNTRY.to_owned()))?;
    set(&mut address, "postal_code", Value::String(POSTAL_CODE.to_owned()))?;
    set(&mut person, "address", Value::Message(address))?;

    set(&mut person, "last_updated", Value::I64(last_updated))?;

    Ok(person)
}

fn field(message: &MessageDescriptor, name: &str) -> Result<FieldDescriptor, BuildError> {
    message
        .get_field_by_name(name)
        .ok_or_else(|| BuildError::FieldMissing {
            message: message.full_name().to_owned(),
            field: name.to_owned(),
        })
}

fn nested_type(message: &MessageDescriptor, name: &str) -> Result<MessageDescriptor, BuildError> {
    message
        .child_messages()
        .find(|nested| nested.name() == name)
        .ok_or_else(|| BuildError::NestedTypeMissing {
            message: message.full_name().to_owned(),
            nested: name.to_owned(),
        })
}

/// Resolves an enum value of `field` by its symbolic name.
fn enum_value(field: &FieldDescriptor, name: &str) -> Result<i32, BuildError> {
    let kind = field.kind();
    let enum_type = kind.as_enum().ok_or_else(|| BuildError::NotAnEnum {
        field: field.full_name().to_owned(),
    })?;
    enum_type
        .get_value_by_name(name)
        .map(|value| value.number())
        .ok_or_else(|| BuildError::EnumValueMissing {
            field: field.full_name().to_owned(),
            value: name.to_owned(),
        })
}

fn set(message: &mut DynamicMessage, name: &str, value: Value) -> Result<(), BuildError> {
    let field = field(&message.descriptor(), name)?;
    message.try_set_field(&field, value)?;
    Ok(())
}

/// Appends `value` to the repeated field `name`.
fn push(message: &mut DynamicMessage, name: &str, value: Value) -> Result<(), BuildError> {
    let field = field(&message.descriptor(), name)?;
    match message.get_field_mut(&field).as_list_mut() {
        Some(list) => {
            list.push(value);
            Ok(())
        }
        None => Err(BuildError::NotRepeated {
            field: field.full_name().to_owned(),
        }),
    }
}
