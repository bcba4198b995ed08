//! Scalar converter registry.
//!
//! Scalars stay text until a binder asks for a concrete type. Built-in
//! conversions cover strings, booleans, integers, floats and big integers.
//! Anything else, calendar dates and caller enums included, needs a
//! converter registered for its exact type.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::Num;
use once_cell::sync::OnceCell;

use crate::error::{Error, Result};

type Converter = Box<dyn Fn(&str) -> std::result::Result<Box<dyn Any>, String> + Send + Sync>;

static GLOBAL: OnceCell<Arc<Converters>> = OnceCell::new();

/// Table of scalar conversions keyed by target type.
#[derive(Default)]
pub struct Converters {
    table: HashMap<TypeId, Converter>,
}

impl fmt::Debug for Converters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converters")
            .field("registered", &self.table.len())
            .finish()
    }
}

impl Converters {
    /// Create a registry holding only the built-in conversions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a conversion for `T`, replacing any earlier one.
    ///
    /// A registered conversion also takes precedence over the built-in
    /// one for the same type.
    pub fn register<T, E>(
        &mut self,
        convert: impl Fn(&str) -> std::result::Result<T, E> + Send + Sync + 'static,
    ) -> &mut Self
    where
        T: Any,
        E: fmt::Display,
    {
        self.table.insert(
            TypeId::of::<T>(),
            Box::new(move |text: &str| {
                convert(text)
                    .map(|value| Box::new(value) as Box<dyn Any>)
                    .map_err(|e| e.to_string())
            }),
        );
        self
    }

    /// Builder form of [`Converters::register`].
    pub fn with<T, E>(
        mut self,
        convert: impl Fn(&str) -> std::result::Result<T, E> + Send + Sync + 'static,
    ) -> Self
    where
        T: Any,
        E: fmt::Display,
    {
        self.register(convert);
        self
    }

    /// Returns `true` if a conversion is registered for `T`.
    pub fn contains<T: Any>(&self) -> bool {
        self.table.contains_key(&TypeId::of::<T>())
    }

    /// Convert with the conversion registered for `T`.
    ///
    /// Returns `None` when nothing is registered.
    pub fn registered<T: Any>(&self, text: &str) -> Option<Result<T>> {
        let convert = self.table.get(&TypeId::of::<T>())?;
        let result = convert(text)
            .map_err(|reason| Error::unconvertible(text, type_name::<T>(), reason))
            .and_then(|value| {
                value.downcast::<T>().map(|b| *b).map_err(|_| {
                    Error::unconvertible(text, type_name::<T>(), "converter produced another type")
                })
            });
        Some(result)
    }

    /// Convert with the conversion registered for `T`, failing if there
    /// is none.
    pub fn convert<T: Any>(&self, text: &str) -> Result<T> {
        self.registered(text).unwrap_or_else(|| {
            Err(Error::unconvertible(
                text,
                type_name::<T>(),
                "no converter registered",
            ))
        })
    }

    /// Convert a scalar to a built-in type, letting a registered
    /// conversion win.
    pub fn builtin<T: Builtin>(&self, text: &str) -> Result<T> {
        match self.registered(text) {
            Some(result) => result,
            None => T::parse_builtin(text),
        }
    }

    /// Install this registry as the process-wide one.
    ///
    /// Only the first installation succeeds, and it must happen before the
    /// first call to [`Converters::global`]. On failure the rejected
    /// registry is handed back.
    pub fn install(self) -> std::result::Result<(), Converters> {
        GLOBAL
            .set(Arc::new(self))
            .map_err(|rejected| Arc::try_unwrap(rejected).unwrap_or_default())
    }

    /// The process-wide registry, or an empty one if none was installed.
    pub fn global() -> Arc<Converters> {
        GLOBAL.get_or_init(|| Arc::new(Converters::new())).clone()
    }
}

/// Types with a conversion that needs no registration.
pub trait Builtin: Any + Sized {
    /// Name used in error messages and shapes.
    const NAME: &'static str;

    fn parse_builtin(text: &str) -> Result<Self>;
}

impl Builtin for String {
    const NAME: &'static str = "string";

    fn parse_builtin(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}

impl Builtin for bool {
    const NAME: &'static str = "bool";

    fn parse_builtin(text: &str) -> Result<Self> {
        match text {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(Error::unconvertible(text, Self::NAME, "expected `true` or `false`")),
        }
    }
}

impl Builtin for BigInt {
    const NAME: &'static str = "integer";

    fn parse_builtin(text: &str) -> Result<Self> {
        parse_decimal(text, Self::NAME)
    }
}

/// Decimal integer parsing shared by every integer type.
fn parse_decimal<T>(text: &str, name: &str) -> Result<T>
where
    T: Num,
    T::FromStrRadixErr: fmt::Display,
{
    T::from_str_radix(text, 10).map_err(|e| Error::unconvertible(text, name, e))
}

macro_rules! builtin_integers {
    ($($ty:ident),*) => {
        $(
            impl Builtin for $ty {
                const NAME: &'static str = stringify!($ty);

                fn parse_builtin(text: &str) -> Result<Self> {
                    parse_decimal(text, Self::NAME)
                }
            }
        )*
    };
}

builtin_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! builtin_floats {
    ($($ty:ident),*) => {
        $(
            impl Builtin for $ty {
                const NAME: &'static str = stringify!($ty);

                fn parse_builtin(text: &str) -> Result<Self> {
                    text.parse::<$ty>()
                        .map_err(|e| Error::unconvertible(text, Self::NAME, e))
                }
            }
        )*
    };
}

builtin_floats!(f32, f64);
