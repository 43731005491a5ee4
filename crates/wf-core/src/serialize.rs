//! serde support for the array notation: a node is `["tag", arg, ...]`,
//! strings, numbers and booleans are literals, nested arrays are nodes.
//! Decoding stops at [`MAX_DEPTH`] nested nodes.

use crate::node::{Arg, Literal, Node, MAX_DEPTH};
use serde::de::{self, Deserialize, DeserializeSeed, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Literal::Text(text) => serializer.serialize_str(text),
            Literal::Int(value) => serializer.serialize_i64(*value),
            Literal::Float(value) => serializer.serialize_f64(*value),
            Literal::Bool(value) => serializer.serialize_bool(*value),
        }
    }
}

impl Serialize for Arg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Arg::Literal(literal) => literal.serialize(serializer),
            Arg::Node(node) => node.serialize(serializer),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.args().len() + 1))?;
        seq.serialize_element(self.tag().as_str())?;
        for arg in self.args() {
            seq.serialize_element(arg)?;
        }
        seq.end()
    }
}

/// Reads a node found `depth` levels below the root.
struct NodeSeed {
    depth: usize,
}

impl<'de> DeserializeSeed<'de> for NodeSeed {
    type Value = Node;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        deserializer.deserialize_seq(NodeVisitor { depth: self.depth })
    }
}

struct NodeVisitor {
    depth: usize,
}

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array starting with a tag name")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        if self.depth >= MAX_DEPTH {
            return Err(de::Error::custom(format!("nesting deeper than {MAX_DEPTH}")));
        }
        let tag: String = seq
            .next_element()?
            .ok_or_else(|| <A::Error as de::Error>::invalid_length(0, &self))?;
        let mut args = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(arg) = seq.next_element_seed(ArgSeed {
            depth: self.depth + 1,
        })? {
            args.push(arg);
        }
        Ok(Node::new(tag, args))
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NodeSeed { depth: 0 }.deserialize(deserializer)
    }
}

struct ArgSeed {
    depth: usize,
}

impl<'de> DeserializeSeed<'de> for ArgSeed {
    type Value = Arg;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Arg, D::Error> {
        deserializer.deserialize_any(ArgVisitor { depth: self.depth })
    }
}

struct ArgVisitor {
    depth: usize,
}

impl<'de> Visitor<'de> for ArgVisitor {
    type Value = Arg;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean or nested node")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Arg, E> {
        Ok(Arg::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Arg, E> {
        Ok(Arg::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Arg, E> {
        i64::try_from(value)
            .map(Arg::from)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Arg, E> {
        if !value.is_finite() {
            return Err(E::invalid_value(de::Unexpected::Float(value), &"a finite number"));
        }
        Ok(Arg::from(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Arg, E> {
        Ok(Arg::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Arg, E> {
        Ok(Arg::from(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Arg, A::Error> {
        NodeVisitor { depth: self.depth }
            .visit_seq(seq)
            .map(Arg::Node)
    }
}

impl<'de> Deserialize<'de> for Arg {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ArgSeed { depth: 0 }.deserialize(deserializer)
    }
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Arg::deserialize(deserializer)? {
            Arg::Literal(literal) => Ok(literal),
            Arg::Node(node) => Err(de::Error::custom(format!(
                "expected a literal, found node `{}`",
                node.tag()
            ))),
        }
    }
}
