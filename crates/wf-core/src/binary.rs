//! Compact binary encoding of IR trees.
//!
//! Layout: the magic `WFIR`, a version byte, then the root node. Every value
//! starts with a one-byte marker:
//!
//! | marker | payload                                              |
//! |--------|------------------------------------------------------|
//! | `N`    | u32 tag length, UTF-8 tag, u32 argument count, args  |
//! | `S`    | u32 length, UTF-8 text                               |
//! | `I`    | i64                                                  |
//! | `F`    | f64                                                  |
//! | `B`    | one byte, 0 or 1                                     |
//!
//! All integers are big-endian. Floats keep their exact bit pattern,
//! non-finite values included. Trees deeper than [`MAX_DEPTH`] are refused in
//! both directions.

use crate::error::CompileError;
use crate::node::{Arg, Literal, Node};
use crate::Result;
use bytes::{Buf, BufMut, Bytes, BytesMut};

pub use crate::node::MAX_DEPTH;

pub const MAGIC: &[u8; 4] = b"WFIR";
pub const VERSION: u8 = 1;

const NODE: u8 = b'N';
const TEXT: u8 = b'S';
const INT: u8 = b'I';
const FLOAT: u8 = b'F';
const BOOL: u8 = b'B';

pub fn encode(node: &Node) -> Result<Bytes> {
    if node.deeper_than(MAX_DEPTH) {
        return Err(CompileError::encode(format!(
            "nesting deeper than {MAX_DEPTH}"
        )));
    }
    let mut buf = BytesMut::with_capacity(64);
    buf.put_slice(MAGIC);
    buf.put_u8(VERSION);
    put_node(&mut buf, node);
    Ok(buf.freeze())
}

fn put_node(buf: &mut BytesMut, node: &Node) {
    buf.put_u8(NODE);
    put_str(buf, node.tag().as_str());
    buf.put_u32(node.args().len() as u32);
    for arg in node.args() {
        match arg {
            Arg::Node(child) => put_node(buf, child),
            Arg::Literal(Literal::Text(text)) => {
                buf.put_u8(TEXT);
                put_str(buf, text);
            }
            Arg::Literal(Literal::Int(value)) => {
                buf.put_u8(INT);
                buf.put_i64(*value);
            }
            Arg::Literal(Literal::Float(value)) => {
                buf.put_u8(FLOAT);
                buf.put_f64(*value);
            }
            Arg::Literal(Literal::Bool(value)) => {
                buf.put_u8(BOOL);
                buf.put_u8(u8::from(*value));
            }
        }
    }
}

fn put_str(buf: &mut BytesMut, text: &str) {
    buf.put_u32(text.len() as u32);
    buf.put_slice(text.as_bytes());
}

pub fn decode(bytes: &[u8]) -> Result<Node> {
    let mut buf = bytes;
    if buf.remaining() < MAGIC.len() + 1 || &buf[..MAGIC.len()] != MAGIC {
        return Err(CompileError::decode("missing WFIR header"));
    }
    buf.advance(MAGIC.len());
    let version = buf.get_u8();
    if version != VERSION {
        return Err(CompileError::decode(format!(
            "unsupported version {version}, expected {VERSION}"
        )));
    }
    let root = match read_arg(&mut buf, 0)? {
        Arg::Node(node) => node,
        Arg::Literal(literal) => {
            return Err(CompileError::decode(format!(
                "root must be a node, found a {} literal",
                literal.kind()
            )))
        }
    };
    if buf.has_remaining() {
        return Err(CompileError::decode(format!(
            "{} trailing bytes after the root node",
            buf.remaining()
        )));
    }
    Ok(root)
}

fn ensure(buf: &[u8], needed: usize) -> Result<()> {
    if buf.len() < needed {
        return Err(CompileError::decode("unexpected end of input"));
    }
    Ok(())
}

fn read_arg(buf: &mut &[u8], depth: usize) -> Result<Arg> {
    ensure(buf, 1)?;
    match buf.get_u8() {
        NODE => {
            if depth >= MAX_DEPTH {
                return Err(CompileError::decode(format!(
                    "nesting deeper than {MAX_DEPTH}"
                )));
            }
            let tag = read_str(buf)?;
            ensure(buf, 4)?;
            let count = buf.get_u32() as usize;
            // every argument takes at least one byte
            ensure(buf, count)?;
            let mut args = Vec::with_capacity(count);
            for _ in 0..count {
                args.push(read_arg(buf, depth + 1)?);
            }
            Ok(Arg::Node(Node::new(tag, args)))
        }
        TEXT => read_str(buf).map(Arg::from),
        INT => {
            ensure(buf, 8)?;
            Ok(Arg::from(buf.get_i64()))
        }
        FLOAT => {
            ensure(buf, 8)?;
            Ok(Arg::from(buf.get_f64()))
        }
        BOOL => {
            ensure(buf, 1)?;
            match buf.get_u8() {
                0 => Ok(Arg::from(false)),
                1 => Ok(Arg::from(true)),
                other => Err(CompileError::decode(format!("invalid boolean byte {other}"))),
            }
        }
        other => Err(CompileError::decode(format!(
            "unknown value marker 0x{other:02x}"
        ))),
    }
}

fn read_str(buf: &mut &[u8]) -> Result<String> {
    ensure(buf, 4)?;
    let len = buf.get_u32() as usize;
    ensure(buf, len)?;
    let text = std::str::from_utf8(&buf[..len])
        .map_err(|err| CompileError::decode(format!("invalid UTF-8: {err}")))?
        .to_string();
    buf.advance(len);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deep(depth: usize) -> Node {
        let mut node = Node::empty();
        for _ in 1..depth {
            node = Node::sequence([node]);
        }
        node
    }

    #[test]
    fn header_and_layout() {
        let bytes = encode(&node![static, "A"]).unwrap();
        assert_eq!(
            &bytes[..],
            b"WFIR\x01N\x00\x00\x00\x06static\x00\x00\x00\x01S\x00\x00\x00\x01A"
        );
    }

    #[test]
    fn rejects_malformed_input() {
        let valid = encode(&node![sequence, node![dynamic, "x"], 1, 2.5, true]).unwrap();
        assert_eq!(decode(&valid).unwrap(), node![sequence, node![dynamic, "x"], 1, 2.5, true]);

        for len in 0..valid.len() {
            assert!(decode(&valid[..len]).is_err(), "truncated at {len}");
        }

        let mut trailing = valid.to_vec();
        trailing.push(0);
        assert!(decode(&trailing).is_err());

        let mut bad_version = valid.to_vec();
        bad_version[4] = 9;
        assert!(decode(&bad_version).is_err());

        assert!(decode(b"WFIR\x01S\x00\x00\x00\x00").is_err());
        assert!(decode(b"WFIR\x01N\x00\x00\x00\x01\xff\x00\x00\x00\x00").is_err());
        assert!(decode(b"WFIR\x01X").is_err());
    }

    #[test]
    fn round_trips_up_to_the_depth_limit() {
        for depth in [MAX_DEPTH - 1, MAX_DEPTH] {
            let tree = deep(depth);
            assert_eq!(decode(&encode(&tree).unwrap()).unwrap(), tree);
        }
    }

    #[test]
    fn nesting_limit() {
        let err = encode(&deep(MAX_DEPTH + 1)).unwrap_err();
        assert!(matches!(err, CompileError::Encode { .. }));

        // one more level than the encoder allows, built by hand
        let mut bytes = b"WFIR\x01".to_vec();
        for _ in 0..MAX_DEPTH {
            bytes.extend_from_slice(b"N\x00\x00\x00\x08sequence\x00\x00\x00\x01");
        }
        bytes.extend_from_slice(b"N\x00\x00\x00\x08sequence\x00\x00\x00\x00");
        let err = decode(&bytes).unwrap_err();
        assert!(err.to_string().contains("nesting deeper than 256"));
    }

    #[test]
    fn floats_keep_their_bits() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.0, f64::MIN_POSITIVE, f64::MAX] {
            let tree = node![x, value];
            assert_eq!(decode(&encode(&tree).unwrap()).unwrap(), tree);
        }
    }
}
