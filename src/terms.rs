use std::fmt::Debug;

pub use fixed_map::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::error::ConfigError;
use crate::membership::Triangle;

/// The membership functions of one variable, keyed by its term enum.
///
/// Iteration follows the declaration order of the enum variants, which is
/// also the order used to break ties between labels.
pub struct Terms<K: Term>(pub(crate) FixedMap<K, Triangle>);

impl<K: Term> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Term> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, key: K, shape: Triangle) -> Result<(), ConfigError>
    where
        K: Debug,
    {
        if self.0.contains_key(key) {
            return Err(ConfigError::DuplicateTerm(format!("{key:?}")));
        }

        self.0.insert(key, shape);

        Ok(())
    }

    /// Shorthand for inserting a triangle built from its breakpoints
    pub fn triangle(mut self, key: K, a: f64, b: f64, c: f64) -> Result<Self, ConfigError>
    where
        K: Debug,
    {
        self.insert(key, Triangle::new(a, b, c)?)?;

        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Declares the enum that unifies the term enums of every variable in a
/// system, together with `From` and `TryFrom` conversions for each of them.
///
/// ```ignore
/// term_union! {
///     pub enum LoanTerm {
///         Score(Score),
///         Decision(Decision),
///     }
/// }
/// ```
#[macro_export]
macro_rules! term_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident($inner:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        $vis enum $name {
            $($variant($inner)),+
        }

        $(
            impl ::core::convert::From<$inner> for $name {
                fn from(term: $inner) -> Self {
                    Self::$variant(term)
                }
            }

            impl ::core::convert::TryFrom<$name> for $inner {
                type Error = $name;

                #[allow(unreachable_patterns)]
                fn try_from(term: $name) -> ::core::result::Result<Self, $name> {
                    match term {
                        $name::$variant(inner) => ::core::result::Result::Ok(inner),
                        other => ::core::result::Result::Err(other),
                    }
                }
            }
        )+
    };
}
