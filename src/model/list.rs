//! Ordered containers that coerce every inserted value to their item type
//!
//! Callers may insert terse literals, a bare string or a tuple of strings,
//! and the container stores a fully typed entity. Which literal shapes are
//! accepted depends on the item type:
//!
//! | container       | string                  | tuple                    |
//! |-----------------|-------------------------|--------------------------|
//! | [`AttributeList`] | rejected              | `(name, value)`          |
//! | [`ElementList`]   | rejected              | rejected                 |
//! | [`TitleList`]     | `Title::new(s)`       | `(value)`, `(value, lang)` |
//! | [`LinkList`]      | rejected              | rejected                 |
//! | [`PropertyList`]  | `Property::new(s)`    | `(type)`, `(type, value)` |
//!
//! ```
//! use rd::{Property, PropertyList};
//! # fn main() -> rd::Result<()> {
//! let mut props = PropertyList::new();
//! props.push("http://example.com/lang")?;
//! props.push(("http://example.com/lang", "en-US"))?;
//! assert_eq!(props[1], Property::with_value("http://example.com/lang", "en-US"));
//! assert_eq!(props.by_type("http://example.com/lang").count(), 2);
//! # Ok(())
//! # }
//! ```

use std::ops::Deref;

use crate::error::{Error, ErrorKind, Result};
use crate::model::entity::{Attribute, Element, Property, Title};
use crate::model::link::Link;

/// Value offered to a typed container
#[derive(Clone, Debug, PartialEq)]
pub enum Literal<T> {
    Str(String),
    Tuple(Vec<String>),
    Entity(T),
}

impl<T> Literal<T> {
    fn shape(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Tuple(items) => match items.len() {
                0 => "empty tuple",
                1 => "1-tuple",
                2 => "2-tuple",
                _ => "tuple longer than 2",
            },
            Self::Entity(_) => "entity",
        }
    }
}

impl<T> From<&str> for Literal<T> {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl<T> From<String> for Literal<T> {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<T> From<(&str,)> for Literal<T> {
    fn from((a,): (&str,)) -> Self {
        Self::Tuple(vec![a.to_string()])
    }
}

impl<T> From<(&str, &str)> for Literal<T> {
    fn from((a, b): (&str, &str)) -> Self {
        Self::Tuple(vec![a.to_string(), b.to_string()])
    }
}

impl<T> From<(String, String)> for Literal<T> {
    fn from((a, b): (String, String)) -> Self {
        Self::Tuple(vec![a, b])
    }
}

impl<T> From<Vec<String>> for Literal<T> {
    fn from(items: Vec<String>) -> Self {
        Self::Tuple(items)
    }
}

/// Entity type a [`TypedList`] can hold
pub trait Item: Sized {
    /// Container name used in error messages
    const CONTAINER: &'static str;

    /// Turn an inserted literal into an entity, or reject it
    fn coerce(literal: Literal<Self>) -> Result<Self>;
}

fn reject<T: Item>(literal: &Literal<T>) -> Error {
    Error::invalid_item(T::CONTAINER, literal.shape())
}

macro_rules! entity_literal {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Literal<$ty> {
                fn from(entity: $ty) -> Self {
                    Self::Entity(entity)
                }
            }
        )+
    };
}

entity_literal!(Attribute, Element, Title, Link, Property);

impl Item for Attribute {
    const CONTAINER: &'static str = "AttributeList";

    fn coerce(literal: Literal<Self>) -> Result<Self> {
        match literal {
            Literal::Entity(attr) => Ok(attr),
            Literal::Tuple(items) if items.len() == 2 => {
                let mut items = items.into_iter();
                match (items.next(), items.next()) {
                    (Some(name), Some(value)) => Ok(Self::new(name, value)),
                    _ => Err(Error::invalid_item(Self::CONTAINER, "2-tuple")),
                }
            }
            other => Err(reject(&other)),
        }
    }
}

impl Item for Element {
    const CONTAINER: &'static str = "ElementList";

    fn coerce(literal: Literal<Self>) -> Result<Self> {
        match literal {
            Literal::Entity(elem) => Ok(elem),
            other => Err(reject(&other)),
        }
    }
}

impl Item for Link {
    const CONTAINER: &'static str = "LinkList";

    fn coerce(literal: Literal<Self>) -> Result<Self> {
        match literal {
            Literal::Entity(link) => Ok(link),
            other => Err(reject(&other)),
        }
    }
}

impl Item for Title {
    const CONTAINER: &'static str = "TitleList";

    fn coerce(literal: Literal<Self>) -> Result<Self> {
        match literal {
            Literal::Entity(title) => Ok(title),
            Literal::Str(value) => Ok(Self::new(value)),
            Literal::Tuple(items) if (1..=2).contains(&items.len()) => {
                let mut items = items.into_iter();
                let value = items.next().unwrap_or_default();
                Ok(Self {
                    value,
                    lang: items.next(),
                })
            }
            other => Err(reject(&other)),
        }
    }
}

impl Item for Property {
    const CONTAINER: &'static str = "PropertyList";

    fn coerce(literal: Literal<Self>) -> Result<Self> {
        match literal {
            Literal::Entity(prop) => Ok(prop),
            Literal::Str(type_) => Ok(Self::new(type_)),
            Literal::Tuple(items) if (1..=2).contains(&items.len()) => {
                let mut items = items.into_iter();
                let type_ = items.next().unwrap_or_default();
                Ok(Self {
                    type_,
                    value: items.next(),
                })
            }
            other => Err(reject(&other)),
        }
    }
}

/// Ordered sequence whose mutations all go through [`Item::coerce`]
#[derive(Clone, Debug, PartialEq)]
pub struct TypedList<T> {
    items: Vec<T>,
}

pub type AttributeList = TypedList<Attribute>;
pub type ElementList = TypedList<Element>;
pub type TitleList = TypedList<Title>;
pub type LinkList = TypedList<Link>;
pub type PropertyList = TypedList<Property>;

impl<T> Default for TypedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Item> TypedList<T> {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerce `value` and append it
    pub fn push(&mut self, value: impl Into<Literal<T>>) -> Result<()> {
        let item = T::coerce(value.into())?;
        self.items.push(item);
        Ok(())
    }

    /// Coerce every value, then append them all
    ///
    /// Nothing is appended if any value is rejected.
    pub fn extend<I, L>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal<T>>,
    {
        let items = values
            .into_iter()
            .map(|value| T::coerce(value.into()))
            .collect::<Result<Vec<_>>>()?;
        self.items.extend(items);
        Ok(())
    }

    /// Coerce `value` and store it at `index`
    pub fn set(&mut self, index: usize, value: impl Into<Literal<T>>) -> Result<()> {
        let len = self.items.len();
        let item = T::coerce(value.into())?;
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = item;
                Ok(())
            }
            None => Err(Error::new(ErrorKind::IndexOutOfBounds { index, len })),
        }
    }

    /// Mutable access to the item at `index`
    ///
    /// Items are edited in place, so no coercion happens here.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Mutable iterator over the stored items
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Remove and return the item at `index`, or `None` when out of bounds
    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Drop every item
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Unwrap into the underlying vector
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Deref for TypedList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for TypedList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<'a, T> IntoIterator for &'a TypedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for TypedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl LinkList {
    /// Links whose `rel` equals `rel`, in order
    ///
    /// The iterator is `Clone`, so a query can be restarted from scratch.
    pub fn by_rel<'a>(&'a self, rel: &'a str) -> impl Iterator<Item = &'a Link> + Clone + 'a {
        self.items
            .iter()
            .filter(move |link| link.rel.as_deref() == Some(rel))
    }
}

impl PropertyList {
    /// Properties whose type equals `type_`, in order
    pub fn by_type<'a>(
        &'a self,
        type_: &'a str,
    ) -> impl Iterator<Item = &'a Property> + Clone + 'a {
        self.items.iter().filter(move |prop| prop.type_ == type_)
    }
}

impl AttributeList {
    /// Attributes named `name`, in order
    pub fn by_name<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Attribute> + Clone + 'a {
        self.items.iter().filter(move |attr| attr.name == name)
    }
}
