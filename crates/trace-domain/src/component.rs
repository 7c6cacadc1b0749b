//! Etapa lógica de un pipeline (p. ej. "etl", "training").
//!
//! Un `Component` se crea una vez por etapa; sus runs son `RunRecord`s.
//! Los tags se acumulan por union-merge: nunca se sobreescriben, sólo se
//! agregan con dedup.
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use std::fmt;

/// Tag nominal para clasificar componentes. Identidad por `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(Tag { name })
    }
    pub fn name(&self) -> &str { &self.name }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    name: String,
    description: String,
    owner: String,
    tags: IndexSet<Tag>,
}

impl Component {
    pub fn new(name: impl Into<String>, description: impl Into<String>, owner: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(Component {
            name,
            description: description.into(),
            owner: owner.into(),
            tags: IndexSet::new(),
        })
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn description(&self) -> &str { &self.description }
    pub fn owner(&self) -> &str { &self.owner }
    pub fn tags(&self) -> &IndexSet<Tag> { &self.tags }

    /// Union-merge de tags: agrega con dedup, nunca reemplaza el set.
    pub fn add_tags(&mut self, tags: impl IntoIterator<Item = Tag>) {
        for tag in tags {
            self.tags.insert(tag);
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<component: {} (owner: {})>", self.name, self.owner)
    }
}
