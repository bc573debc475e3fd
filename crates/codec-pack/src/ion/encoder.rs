//! Binary Ion 1.0 encoder: IVM, an optional local symbol table, then the
//! value itself.

use crate::PackValue;

use super::ast::{to_ast, uint_byte_len, vuint_len, IonAstNode};
use super::constants::{Type, ION_BVM, SID_ION_SYMBOL_TABLE, SID_SYMBOLS};
use super::symbols::IonSymbols;

pub struct IonEncoder {
    out: Vec<u8>,
}

impl Default for IonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl IonEncoder {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub fn encode(mut self, value: &PackValue) -> Vec<u8> {
        let mut symbols = IonSymbols::new();
        let node = to_ast(value, &mut symbols);

        self.out.extend_from_slice(&ION_BVM);
        if !symbols.names().is_empty() {
            self.write_symbol_table(&symbols);
        }
        self.write_node(&node);
        self.out
    }

    fn write_symbol_table(&mut self, symbols: &IonSymbols) {
        let names: Vec<IonAstNode> = symbols.names().iter().map(|n| IonAstNode::Str(n.clone())).collect();
        let symbols_field = IonAstNode::Array(names);
        let table = IonAstNode::Struct(vec![(SID_SYMBOLS, symbols_field)]);

        let sid_len = vuint_len(SID_ION_SYMBOL_TABLE as u64);
        let annot_length_bytes = vuint_len(sid_len as u64);
        let content_len = annot_length_bytes + sid_len + table.byte_length();
        self.write_type_descriptor(Type::ANNO, content_len);
        self.write_vuint(sid_len as u64);
        self.write_vuint(SID_ION_SYMBOL_TABLE as u64);
        self.write_node(&table);
    }

    fn write_node(&mut self, node: &IonAstNode) {
        match node {
            IonAstNode::Null => self.out.push((Type::NULL << 4) | 0x0f),
            IonAstNode::Bool(b) => self.out.push((Type::BOOL << 4) | if *b { 1 } else { 0 }),
            IonAstNode::UInt(v) => self.write_int(Type::UINT, *v),
            IonAstNode::NInt(v) => self.write_int(Type::NINT, *v),
            IonAstNode::Float(v) => self.write_float(*v),
            IonAstNode::Str(s) => self.write_bytes_value(Type::STRI, s.as_bytes()),
            IonAstNode::Bin(b) => self.write_bytes_value(Type::BINA, b),
            IonAstNode::Array(items) => self.write_array(items),
            IonAstNode::Struct(fields) => self.write_struct(fields),
        }
    }

    fn write_type_descriptor(&mut self, ty: u8, len: usize) {
        if len < 14 {
            self.out.push((ty << 4) | len as u8);
        } else {
            self.out.push((ty << 4) | 0x0e);
            self.write_vuint(len as u64);
        }
    }

    fn write_int(&mut self, ty: u8, magnitude: u64) {
        let len = uint_byte_len(magnitude);
        self.write_type_descriptor(ty, len);
        self.write_uint_bytes(magnitude, len);
    }

    fn write_float(&mut self, v: f64) {
        if v == 0.0 {
            self.out.push(Type::FLOT << 4);
            return;
        }
        self.write_type_descriptor(Type::FLOT, 8);
        self.out.extend_from_slice(&v.to_be_bytes());
    }

    fn write_bytes_value(&mut self, ty: u8, bytes: &[u8]) {
        self.write_type_descriptor(ty, bytes.len());
        self.out.extend_from_slice(bytes);
    }

    fn write_array(&mut self, items: &[IonAstNode]) {
        let len: usize = items.iter().map(IonAstNode::byte_length).sum();
        self.write_type_descriptor(Type::LIST, len);
        for item in items {
            self.write_node(item);
        }
    }

    fn write_struct(&mut self, fields: &[(u32, IonAstNode)]) {
        let len: usize = fields.iter().map(|(sid, node)| vuint_len(*sid as u64) + node.byte_length()).sum();
        self.write_type_descriptor(Type::STRU, len);
        for (sid, node) in fields {
            self.write_vuint(*sid as u64);
            self.write_node(node);
        }
    }

    fn write_uint_bytes(&mut self, value: u64, len: usize) {
        for i in (0..len).rev() {
            self.out.push(((value >> (i * 8)) & 0xff) as u8);
        }
    }

    fn write_vuint(&mut self, mut value: u64) {
        // Collected least-significant septet first; the terminator bit
        // belongs on the least-significant (last-emitted) byte, so mark it
        // here before reversing into most-significant-first wire order.
        let mut bytes = Vec::new();
        loop {
            bytes.push((value & 0x7f) as u8);
            value >>= 7;
            if value == 0 {
                break;
            }
        }
        bytes[0] |= 0x80;
        bytes.reverse();
        self.out.extend_from_slice(&bytes);
    }
}

pub fn encode(value: &PackValue) -> Vec<u8> {
    IonEncoder::new().encode(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_header() {
        let bytes = encode(&PackValue::Null);
        assert_eq!(&bytes[0..4], &ION_BVM);
    }

    #[test]
    fn encodes_bool_without_length_field() {
        let bytes = encode(&PackValue::Bool(true));
        assert_eq!(bytes[4], (Type::BOOL << 4) | 1);
    }

    #[test]
    fn encodes_struct_field_after_symbol_table() {
        let value = PackValue::Object(vec![("a".to_string(), PackValue::Int(1))]);
        let bytes = encode(&value);
        // header + an annotation-wrapped symbol table precede the struct.
        assert!(bytes.len() > ION_BVM.len() + 2);
    }
}
