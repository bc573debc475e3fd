//! RESP3 value kinds with no direct universal-value counterpart, carried
//! through `PackValue::Extension`.

use crate::{JsonPackExtension, PackValue};

use super::constants::{
    RESP_EXTENSION_ATTRIBUTES, RESP_EXTENSION_BULK_ERROR, RESP_EXTENSION_PUSH,
    RESP_EXTENSION_SET, RESP_EXTENSION_SIMPLE_ERROR, RESP_EXTENSION_VERBATIM_STRING,
};

pub fn resp_push(elements: Vec<PackValue>) -> PackValue {
    PackValue::Extension(Box::new(JsonPackExtension::new(
        RESP_EXTENSION_PUSH,
        PackValue::Array(elements),
    )))
}

pub fn resp_attributes(fields: Vec<(String, PackValue)>) -> PackValue {
    PackValue::Extension(Box::new(JsonPackExtension::new(
        RESP_EXTENSION_ATTRIBUTES,
        PackValue::Object(fields),
    )))
}

pub fn resp_verbatim_string(s: String) -> PackValue {
    PackValue::Extension(Box::new(JsonPackExtension::new(
        RESP_EXTENSION_VERBATIM_STRING,
        PackValue::Str(s),
    )))
}

pub fn resp_set(elements: Vec<PackValue>) -> PackValue {
    PackValue::Extension(Box::new(JsonPackExtension::new(
        RESP_EXTENSION_SET,
        PackValue::Array(elements),
    )))
}

pub fn resp_simple_error(message: String) -> PackValue {
    PackValue::Extension(Box::new(JsonPackExtension::new(
        RESP_EXTENSION_SIMPLE_ERROR,
        PackValue::Str(message),
    )))
}

pub fn resp_bulk_error(message: String) -> PackValue {
    PackValue::Extension(Box::new(JsonPackExtension::new(
        RESP_EXTENSION_BULK_ERROR,
        PackValue::Str(message),
    )))
}
