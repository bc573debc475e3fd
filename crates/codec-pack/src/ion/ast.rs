//! Intermediate tree used to size Ion values before writing their bytes.
//!
//! Binary Ion requires each container's byte length up front, so the
//! encoder builds this tree first, measuring bottom-up, then serializes it
//! in a second pass.

use crate::PackValue;

use super::symbols::IonSymbols;

pub enum IonAstNode {
    Null,
    Bool(bool),
    UInt(u64),
    NInt(u64),
    Float(f64),
    Str(String),
    Bin(Vec<u8>),
    Array(Vec<IonAstNode>),
    Struct(Vec<(u32, IonAstNode)>),
}

/// Number of bytes a VarUInt needs to hold `value`.
pub fn vuint_len(mut value: u64) -> usize {
    let mut len = 1;
    value >>= 7;
    while value > 0 {
        len += 1;
        value >>= 7;
    }
    len
}

/// Number of bytes a plain big-endian unsigned magnitude needs.
pub fn uint_byte_len(mut value: u64) -> usize {
    if value == 0 {
        return 0;
    }
    let mut len = 0;
    while value > 0 {
        len += 1;
        value >>= 8;
    }
    len
}

impl IonAstNode {
    /// Length of this value's content, not counting its own type descriptor
    /// and length bytes.
    pub fn content_len(&self) -> usize {
        match self {
            IonAstNode::Null | IonAstNode::Bool(_) => 0,
            IonAstNode::UInt(v) | IonAstNode::NInt(v) => uint_byte_len(*v),
            IonAstNode::Float(v) => {
                if *v == 0.0 {
                    0
                } else {
                    8
                }
            }
            IonAstNode::Str(s) => s.len(),
            IonAstNode::Bin(b) => b.len(),
            IonAstNode::Array(items) => items.iter().map(IonAstNode::byte_length).sum(),
            IonAstNode::Struct(fields) => fields
                .iter()
                .map(|(sid, node)| vuint_len(*sid as u64) + node.byte_length())
                .sum(),
        }
    }

    /// Total encoded size, including the type descriptor byte and any
    /// trailing length field.
    pub fn byte_length(&self) -> usize {
        let content = self.content_len();
        let header = if content < 14 { 1 } else { 1 + vuint_len(content as u64) };
        header + content
    }
}

/// Converts a value into its Ion AST, registering struct field names with
/// `symbols` so the caller can later emit a matching local symbol table.
pub fn to_ast(value: &PackValue, symbols: &mut IonSymbols) -> IonAstNode {
    match value {
        PackValue::Null => IonAstNode::Null,
        PackValue::Bool(b) => IonAstNode::Bool(*b),
        PackValue::Int(i) => {
            if *i < 0 {
                IonAstNode::NInt(i.unsigned_abs())
            } else {
                IonAstNode::UInt(*i as u64)
            }
        }
        PackValue::UInt(u) => IonAstNode::UInt(*u),
        PackValue::BigInt(i) => {
            if *i < 0 {
                IonAstNode::NInt(i.unsigned_abs() as u64)
            } else {
                IonAstNode::UInt(*i as u64)
            }
        }
        PackValue::Float32(f) => IonAstNode::Float(*f as f64),
        PackValue::Float64(f) => IonAstNode::Float(*f),
        PackValue::Bytes(b) => IonAstNode::Bin(b.clone()),
        PackValue::Str(s) => IonAstNode::Str(s.clone()),
        PackValue::Array(items) => {
            IonAstNode::Array(items.iter().map(|item| to_ast(item, symbols)).collect())
        }
        PackValue::Object(fields) => IonAstNode::Struct(
            fields
                .iter()
                .map(|(k, v)| (symbols.add(k), to_ast(v, symbols)))
                .collect(),
        ),
        PackValue::Map(entries) => {
            // Ion structs key on symbols, not arbitrary values; stringify
            // non-string keys so a round trip through Ion stays lossless
            // for the common case of string-keyed maps.
            let fields = entries
                .iter()
                .map(|(k, v)| {
                    let key = match k {
                        PackValue::Str(s) => s.clone(),
                        other => format!("{:?}", other),
                    };
                    (symbols.add(&key), to_ast(v, symbols))
                })
                .collect();
            IonAstNode::Struct(fields)
        }
        PackValue::Extension(ext) => to_ast(&ext.val, symbols),
        PackValue::Raw(raw) => IonAstNode::Bin(raw.val.clone()),
        PackValue::TypedArray(arr) => {
            IonAstNode::Array(typed_array_items(arr).iter().map(|item| to_ast(item, symbols)).collect())
        }
    }
}

fn typed_array_items(arr: &crate::TypedArray) -> Vec<PackValue> {
    use crate::TypedArray;
    match arr {
        TypedArray::Int8(xs) => xs.iter().map(|&n| PackValue::Int(n as i64)).collect(),
        TypedArray::Int16(xs) => xs.iter().map(|&n| PackValue::Int(n as i64)).collect(),
        TypedArray::Int32(xs) => xs.iter().map(|&n| PackValue::Int(n as i64)).collect(),
        TypedArray::Int64(xs) => xs.iter().map(|&n| PackValue::Int(n)).collect(),
        TypedArray::Uint8(xs) => xs.iter().map(|&n| PackValue::UInt(n as u64)).collect(),
        TypedArray::Uint16(xs) => xs.iter().map(|&n| PackValue::UInt(n as u64)).collect(),
        TypedArray::Uint32(xs) => xs.iter().map(|&n| PackValue::UInt(n as u64)).collect(),
        TypedArray::Uint64(xs) => xs.iter().map(|&n| PackValue::UInt(n)).collect(),
        TypedArray::Float32(xs) => xs.iter().map(|&n| PackValue::Float32(n)).collect(),
        TypedArray::Float64(xs) => xs.iter().map(|&n| PackValue::Float64(n)).collect(),
    }
}
