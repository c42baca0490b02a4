#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use prost::Message;
use prost_reflect::MessageDescriptor;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet};

use protobench::config::{MESSAGE_NAME, PROTO_FILE_NAME};
use protobench::{Loader, PERSON_DESCRIPTOR_SET};

/// The descriptor set generated from `proto/person.proto`.
pub fn person_set() -> FileDescriptorSet {
    FileDescriptorSet::decode(PERSON_DESCRIPTOR_SET).unwrap()
}

pub fn person_descriptor() -> MessageDescriptor {
    Loader::decode(PERSON_DESCRIPTOR_SET)
        .unwrap()
        .message(PROTO_FILE_NAME, MESSAGE_NAME)
        .unwrap()
}

/// A proto3 file without a package.
pub fn file(name: &str, dependencies: &[&str], messages: Vec<DescriptorProto>) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_owned()),
        dependency: dependencies.iter().map(|d| d.to_string()).collect(),
        message_type: messages,
        syntax: Some("proto3".to_owned()),
        ..Default::default()
    }
}

/// A message with one singular message-typed field per entry of `field_types`.
pub fn message(name: &str, field_types: &[String]) -> DescriptorProto {
    let field = field_types
        .iter()
        .zip(1..)
        .map(|(type_name, number)| FieldDescriptorProto {
            name: Some(format!("field_{}", number)),
            number: Some(number),
            label: Some(Label::Optional as i32),
            r#type: Some(Type::Message as i32),
            type_name: Some(type_name.clone()),
            ..Default::default()
        })
        .collect();
    DescriptorProto {
        name: Some(name.to_owned()),
        field,
        ..Default::default()
    }
}

/// Writes `set` to `dir/person.desc`.
pub fn write_set(dir: &Path, set: &FileDescriptorSet) -> PathBuf {
    let path = dir.join("person.desc");
    fs::write(&path, set.encode_to_vec()).unwrap();
    path
}
