//! Phase 3: Binder
//!
//! The binder walks a [`Node`] tree and a target type's shape together:
//! - scalar types take a `Scalar` and go through the [`Converters`]
//! - `Vec<T>` takes a `Sequence` and binds every item in order
//! - `Option<T>` binds `T`, an empty scalar gives `None`
//! - object types describe their fields with [`Describe`]; every field is
//!   resolved first, then [`Describe::construct`] receives them all at once
//!
//! The first mismatch aborts the whole bind.

use std::any::{type_name, Any};
use std::fmt;

use chrono::NaiveDate;
use num_bigint::BigInt;

use crate::convert::{Builtin, Converters};
use crate::error::{Error, Result};
use crate::node::Node;

/// The shape a target type expects from the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// A scalar converted to the named type.
    Scalar(&'static str),
    /// A sequence of the inner shape.
    Sequence(Box<Shape>),
    /// A mapping bound to the named object type.
    Object(&'static str),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar(name) | Shape::Object(name) => write!(f, "{}", name),
            Shape::Sequence(inner) => write!(f, "[{}]", inner),
        }
    }
}

/// A type that can be built from a document node.
pub trait FromNode: Sized {
    /// The shape this type expects.
    fn shape() -> Shape;

    /// Build a value from `node`.
    fn from_node(node: &Node, cx: &Converters) -> Result<Self>;
}

/// Field metadata and construction for an object type.
///
/// Pair an implementation with [`impl_from_node!`](crate::impl_from_node)
/// to make the type bindable.
pub trait Describe: Sized {
    /// Type name used in error messages.
    const NAME: &'static str;

    /// Declared fields, in the order they are resolved.
    fn fields() -> Vec<Field>;

    /// Build the value from every resolved field.
    fn construct(values: Values) -> Result<Self>;
}

type BindFn = Box<dyn Fn(&Node, &Converters) -> Result<Box<dyn Any>>>;

/// One declared field of an object type.
pub struct Field {
    name: &'static str,
    key: &'static str,
    shape: Shape,
    bind: BindFn,
    default: Option<fn() -> Box<dyn Any>>,
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("shape", &self.shape)
            .field("optional", &self.is_optional())
            .finish()
    }
}

impl Field {
    /// A field that must be present in the document.
    pub fn required<T: FromNode + 'static>(name: &'static str) -> Self {
        Field {
            name,
            key: name,
            shape: T::shape(),
            bind: Box::new(|node: &Node, cx: &Converters| {
                T::from_node(node, cx).map(|v| Box::new(v) as Box<dyn Any>)
            }),
            default: None,
        }
    }

    /// A field that falls back to `T::default()` when absent or empty.
    pub fn optional<T: FromNode + Default + 'static>(name: &'static str) -> Self {
        Field {
            default: Some(|| Box::new(T::default()) as Box<dyn Any>),
            ..Field::required::<T>(name)
        }
    }

    /// A required scalar field with its own conversion, used instead of
    /// the registry for this field only.
    pub fn converted<T, E>(
        name: &'static str,
        convert: impl Fn(&str) -> std::result::Result<T, E> + 'static,
    ) -> Self
    where
        T: Any,
        E: fmt::Display + 'static,
    {
        Field {
            name,
            key: name,
            shape: Shape::Scalar(type_name::<T>()),
            bind: Box::new(move |node: &Node, _: &Converters| {
                let text = expect_scalar(node, || type_name::<T>().to_string())?;
                convert(text)
                    .map(|v| Box::new(v) as Box<dyn Any>)
                    .map_err(|e| Error::unconvertible(text, type_name::<T>(), e))
            }),
            default: None,
        }
    }

    /// Read the field from a document key other than its name.
    pub fn key(mut self, key: &'static str) -> Self {
        self.key = key;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The document key the field is read from.
    pub fn document_key(&self) -> &'static str {
        self.key
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }
}

/// Resolved field values handed to [`Describe::construct`].
pub struct Values {
    type_name: &'static str,
    slots: Vec<(&'static str, Box<dyn Any>)>,
}

impl Values {
    fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            slots: Vec::new(),
        }
    }

    /// Take the value resolved for `field`.
    ///
    /// Fails with [`Error::FieldMismatch`] if no such field was resolved
    /// or it was resolved as another type.
    pub fn take<T: Any>(&mut self, field: &str) -> Result<T> {
        let owner = self.type_name;
        let mismatch = || Error::FieldMismatch {
            field: field.to_string(),
            type_name: owner.to_string(),
            expected: type_name::<T>().to_string(),
        };

        let idx = self
            .slots
            .iter()
            .position(|(name, _)| *name == field)
            .ok_or_else(mismatch)?;
        if !self.slots[idx].1.is::<T>() {
            return Err(mismatch());
        }
        let (_, value) = self.slots.swap_remove(idx);
        value.downcast::<T>().map(|b| *b).map_err(|_| mismatch())
    }

    /// Number of values not yet taken.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Bind a mapping node to an object type.
///
/// Fields are looked up by key; unknown keys are ignored.
pub fn bind_object<T: Describe>(node: &Node, cx: &Converters) -> Result<T> {
    if node.as_mapping().is_none() {
        return Err(Error::NotAMapping {
            expected: T::NAME.to_string(),
            found: node.kind(),
        });
    }

    let mut values = Values::new(T::NAME);
    for field in T::fields() {
        let value = match (node.get(field.key), field.default) {
            (Some(child), Some(default)) if child.is_empty_scalar() => default(),
            (Some(child), _) => (field.bind)(child, cx)?,
            (None, Some(default)) => default(),
            (None, None) => {
                return Err(Error::MissingRequiredField {
                    field: field.key.to_string(),
                    type_name: T::NAME.to_string(),
                })
            }
        };
        values.slots.push((field.name, value));
    }

    T::construct(values)
}

/// Implement [`FromNode`] for object types that implement [`Describe`].
///
/// ```ignore
/// impl_from_node!(Student, Address, Grade);
/// ```
#[macro_export]
macro_rules! impl_from_node {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FromNode for $ty {
                fn shape() -> $crate::Shape {
                    $crate::Shape::Object(<$ty as $crate::Describe>::NAME)
                }

                fn from_node(node: &$crate::Node, cx: &$crate::Converters) -> $crate::Result<Self> {
                    $crate::bind_object(node, cx)
                }
            }
        )+
    };
}

/// Bind a scalar node with the conversion registered for `T`.
///
/// Caller value types (enums, ids, ...) implement [`FromNode`] with this.
pub fn bind_scalar<T: Any>(node: &Node, cx: &Converters) -> Result<T> {
    cx.convert(expect_scalar(node, || type_name::<T>().to_string())?)
}

fn expect_scalar(node: &Node, expected: impl FnOnce() -> String) -> Result<&str> {
    node.as_scalar().ok_or_else(|| Error::NotAScalar {
        expected: expected(),
        found: node.kind(),
    })
}

macro_rules! builtin_from_node {
    ($($ty:ty),*) => {
        $(
            impl FromNode for $ty {
                fn shape() -> Shape {
                    Shape::Scalar(<$ty as Builtin>::NAME)
                }

                fn from_node(node: &Node, cx: &Converters) -> Result<Self> {
                    let text = expect_scalar(node, || <$ty as Builtin>::NAME.to_string())?;
                    cx.builtin(text)
                }
            }
        )*
    };
}

builtin_from_node!(
    String, bool, BigInt, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64
);

impl FromNode for NaiveDate {
    fn shape() -> Shape {
        Shape::Scalar("date")
    }

    fn from_node(node: &Node, cx: &Converters) -> Result<Self> {
        bind_scalar(node, cx)
    }
}

impl<T: FromNode> FromNode for Vec<T> {
    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }

    fn from_node(node: &Node, cx: &Converters) -> Result<Self> {
        let items = node.as_sequence().ok_or_else(|| Error::NotASequence {
            expected: Self::shape().to_string(),
            found: node.kind(),
        })?;
        items.iter().map(|item| T::from_node(item, cx)).collect()
    }
}

impl<T: FromNode> FromNode for Option<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn from_node(node: &Node, cx: &Converters) -> Result<Self> {
        if node.is_empty_scalar() {
            return Ok(None);
        }
        T::from_node(node, cx).map(Some)
    }
}
