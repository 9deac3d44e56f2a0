//! Discriminator to constructor registry for post variants.
//!
//! # Invariants
//! - A registered name always equals the `type_name()` of the instances its
//!   constructor builds, so stored rows resolve back to the same variant.
//! - Unknown names never fall back to a default variant.

use crate::model::link::Link;
use crate::model::memo::Memo;
use crate::model::post::Post;
use crate::model::task::Task;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Zero-argument constructor for one variant.
pub type PostConstructor = fn() -> Box<dyn Post>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    UnknownType(String),
    DuplicateType(String),
    InvalidTypeName(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownType(value) => write!(f, "unknown post type: {value}"),
            Self::DuplicateType(value) => write!(f, "post type already registered: {value}"),
            Self::InvalidTypeName(value) => write!(f, "post type name is invalid: {value}"),
        }
    }
}

impl Error for RegistryError {}

/// Built-in variants keyed by discriminator.
pub fn register_types() -> BTreeMap<&'static str, PostConstructor> {
    let constructors: [PostConstructor; 3] = [new_memo, new_task, new_link];
    constructors
        .into_iter()
        .map(|constructor| (constructor().type_name(), constructor))
        .collect()
}

fn new_memo() -> Box<dyn Post> {
    Box::new(Memo::new())
}

fn new_task() -> Box<dyn Post> {
    Box::new(Task::new())
}

fn new_link() -> Box<dyn Post> {
    Box::new(Link::new())
}

#[derive(Debug, Clone, Default)]
pub struct PostRegistry {
    constructors: BTreeMap<&'static str, PostConstructor>,
}

impl PostRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding Memo, Task and Link.
    pub fn with_default_types() -> Self {
        Self {
            constructors: register_types(),
        }
    }

    /// Registers one variant under the discriminator its instances report.
    pub fn register(&mut self, constructor: PostConstructor) -> Result<(), RegistryError> {
        let type_name = constructor().type_name();
        if !is_valid_type_name(type_name) {
            return Err(RegistryError::InvalidTypeName(type_name.to_string()));
        }
        if self.constructors.contains_key(type_name) {
            return Err(RegistryError::DuplicateType(type_name.to_string()));
        }

        self.constructors.insert(type_name, constructor);
        Ok(())
    }

    /// Builds a fresh instance of the named variant.
    pub fn create(&self, type_name: &str) -> Result<Box<dyn Post>, RegistryError> {
        self.constructors
            .get(type_name)
            .map(|constructor| constructor())
            .ok_or_else(|| RegistryError::UnknownType(type_name.to_string()))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Registered discriminators in sorted order.
    pub fn type_names(&self) -> Vec<&'static str> {
        self.constructors.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

fn is_valid_type_name(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
