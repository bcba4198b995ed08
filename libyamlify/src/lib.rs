//! yamlify: bind indentation-structured documents to Rust types.
//!
//! Documents are a small YAML subset: `key: value` mappings, `-` sequences
//! and plain scalars, nested by indentation. Target types describe their
//! fields once, and the binder builds them through their own constructor.
//!
//! # Parsing Pipeline
//!
//! The parser operates in three phases:
//!
//! 1. **Scanner**: Converts source text into scan lines, dropping blank
//!    lines and extracting indentation and sequence markers.
//!
//! 2. **Tree Builder**: Groups scan lines into indentation blocks and
//!    builds a [`Node`] tree of scalars, sequences and mappings.
//!
//! 3. **Binder**: Walks the tree together with the target type's shape,
//!    converting scalars through the [`Converters`] registry.
//!
//! [`YamlParser`] drives the pipeline over a stream, or over a folder whose
//! files are consumed as they are produced.
//!
//! # Example
//!
//! ```
//! use libyamlify::{impl_from_node, Describe, Field, Result, Values, YamlParser};
//!
//! struct Student {
//!     name: String,
//!     nr: i32,
//! }
//!
//! impl Describe for Student {
//!     const NAME: &'static str = "Student";
//!
//!     fn fields() -> Vec<Field> {
//!         vec![Field::required::<String>("name"), Field::required::<i32>("nr")]
//!     }
//!
//!     fn construct(mut values: Values) -> Result<Self> {
//!         Ok(Student {
//!             name: values.take("name")?,
//!             nr: values.take("nr")?,
//!         })
//!     }
//! }
//!
//! impl_from_node!(Student);
//!
//! let student = YamlParser::<Student>::new()
//!     .parse_object("name: Maria Candida\nnr: 873435".as_bytes())
//!     .unwrap();
//! assert_eq!(student.nr, 873435);
//! ```

mod bind;
mod convert;
mod document;
mod error;
mod folder;
mod node;
mod scanner;
mod tree;

pub use bind::{bind_object, bind_scalar, Describe, Field, FromNode, Shape, Values};
pub use convert::{Builtin, Converters};
pub use document::{Sequence, YamlParser};
pub use error::{Error, Result};
pub use folder::FolderSequence;
pub use node::{Node, NodeKind};

/// Parse a document into its node tree.
///
/// # Example
///
/// ```
/// use libyamlify::{parse, Node};
///
/// let node = parse("- 1\n- 2").unwrap();
/// assert_eq!(node, Node::Sequence(vec!["1".into(), "2".into()]));
/// ```
pub fn parse(input: &str) -> Result<Node> {
    parse_with_filename(input, None)
}

/// Parse a document with a filename for error messages.
pub fn parse_with_filename(input: &str, filename: Option<&str>) -> Result<Node> {
    let ctx = error::ParseContext::new(filename);

    // Phase 1: Scan source into lines
    let lines = scanner::scan(input, &ctx)?;

    // Phase 2: Group lines into a tree
    tree::build(lines, &ctx)
}
