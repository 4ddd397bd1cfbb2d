//! Resource Descriptor data model

pub mod entity;
pub mod link;
pub mod list;
pub mod rd;

pub use entity::{Attribute, Element, ElementValue, Property, Title};
pub use link::Link;
pub use list::{AttributeList, ElementList, Item, LinkList, Literal, PropertyList, TitleList, TypedList};
pub use rd::Rd;
