//! Entry points over a single document stream.

use std::io::Read;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::trace;

use crate::bind::FromNode;
use crate::convert::Converters;
use crate::error::{Error, Result};
use crate::node::Node;

/// Parser for documents of one target type.
///
/// # Example
///
/// ```
/// use libyamlify::YamlParser;
///
/// let numbers = YamlParser::<i32>::new()
///     .parse_list("- 1\n- 2\n- 3".as_bytes())
///     .unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
pub struct YamlParser<T> {
    pub(crate) converters: Arc<Converters>,
    _target: PhantomData<fn() -> T>,
}

impl<T: FromNode> Default for YamlParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FromNode> YamlParser<T> {
    /// Create a parser using the process-wide converters.
    pub fn new() -> Self {
        Self::with_converters(Converters::global())
    }

    /// Create a parser using the given converters.
    pub fn with_converters(converters: Arc<Converters>) -> Self {
        Self {
            converters,
            _target: PhantomData,
        }
    }

    pub fn converters(&self) -> &Converters {
        &self.converters
    }

    /// Parse the whole stream as one value.
    pub fn parse_object<R: Read>(&self, reader: R) -> Result<T> {
        let node = read_tree(reader)?;
        T::from_node(&node, &self.converters)
    }

    /// Parse a top-level sequence, binding every item before returning.
    pub fn parse_list<R: Read>(&self, reader: R) -> Result<Vec<T>> {
        self.parse_sequence(reader)?.collect()
    }

    /// Parse a top-level sequence, binding one item per call to `next`.
    ///
    /// The tree is built up front; a top-level node that is not a sequence
    /// fails here, before any item is produced.
    pub fn parse_sequence<R: Read>(&self, reader: R) -> Result<Sequence<T>> {
        match read_tree(reader)? {
            Node::Sequence(items) => Ok(Sequence::new(items, self.converters.clone())),
            other => Err(Error::NotASequence {
                expected: Vec::<T>::shape().to_string(),
                found: other.kind(),
            }),
        }
    }
}

fn read_tree<R: Read>(mut reader: R) -> Result<Node> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    crate::parse(&text)
}

/// Lazy cursor over the items of a parsed sequence.
///
/// Each call to `next` binds exactly one item. After an item fails to bind
/// the cursor is exhausted.
pub struct Sequence<T> {
    items: std::vec::IntoIter<Node>,
    converters: Arc<Converters>,
    position: usize,
    failed: bool,
    _target: PhantomData<fn() -> T>,
}

impl<T: FromNode> Sequence<T> {
    fn new(items: Vec<Node>, converters: Arc<Converters>) -> Self {
        Self {
            items: items.into_iter(),
            converters,
            position: 0,
            failed: false,
            _target: PhantomData,
        }
    }

    /// Returns `true` if another item is available.
    pub fn has_next(&self) -> bool {
        !self.failed && self.items.len() > 0
    }

    /// Number of items not yet bound.
    pub fn remaining(&self) -> usize {
        if self.failed {
            0
        } else {
            self.items.len()
        }
    }
}

impl<T: FromNode> Iterator for Sequence<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let node = self.items.next()?;
        trace!(position = self.position, "binding sequence item");
        self.position += 1;

        let result = T::from_node(&node, &self.converters);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar_object() {
        let parser = YamlParser::<i64>::with_converters(Arc::new(Converters::new()));
        assert_eq!(parser.parse_object("  42\n".as_bytes()).unwrap(), 42);
    }

    #[test]
    fn test_parse_list_of_strings() {
        let parser = YamlParser::<String>::new();
        let list = parser
            .parse_list("- Ola\n- Maria Carmen\n- Lisboa Capital".as_bytes())
            .unwrap();
        assert_eq!(list, vec!["Ola", "Maria Carmen", "Lisboa Capital"]);
    }

    #[test]
    fn test_parse_list_requires_sequence() {
        let parser = YamlParser::<i32>::new();
        match parser.parse_list("a: 1".as_bytes()) {
            Err(Error::NotASequence { expected, found }) => {
                assert_eq!(expected, "[i32]");
                assert_eq!(found, crate::NodeKind::Mapping);
            }
            other => panic!("expected NotASequence, got {:?}", other),
        }
    }

    #[test]
    fn test_sequence_cursor() {
        let parser = YamlParser::<i32>::new();
        let mut seq = parser.parse_sequence("- 1\n- x\n- 3".as_bytes()).unwrap();
        assert!(seq.has_next());
        assert_eq!(seq.remaining(), 3);
        assert_eq!(seq.next().unwrap().unwrap(), 1);
        assert!(matches!(
            seq.next(),
            Some(Err(Error::UnconvertibleValue { .. }))
        ));
        assert!(!seq.has_next());
        assert!(seq.next().is_none());
    }

    #[test]
    fn test_malformed_stream() {
        let parser = YamlParser::<i32>::new();
        assert!(matches!(
            parser.parse_sequence("- 1\n  - 2\n -3".as_bytes()),
            Err(Error::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let parser = YamlParser::<String>::new();
        let bytes: &[u8] = &[0xff, 0xfe, b'a'];
        assert!(matches!(parser.parse_object(bytes), Err(Error::Io(_))));
    }
}
