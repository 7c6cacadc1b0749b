//! Identidad de artifacts.
//!
//! Un `ArtifactPointer` es la unidad de datos consumida/producida por runs.
//! - La identidad es estructural sobre el par `(name, value)`: dos pointers
//!   con el mismo par SON el mismo artifact y deben dedupearse a una sola
//!   instancia en cualquier contenedor.
//! - `pointer_type` y `flag` son metadata mutable que NO entra a la
//!   identidad (igual que el hash no incluye metadata en otros motores).
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Tipos de artifact conocidos por el core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointerType {
    Data,
    Model,
    Endpoint,
    #[default]
    Unknown,
}

impl fmt::Display for PointerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerType::Data => write!(f, "DATA"),
            PointerType::Model => write!(f, "MODEL"),
            PointerType::Endpoint => write!(f, "ENDPOINT"),
            PointerType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Anotación nombrada, asociable a varios artifacts (many-to-many).
/// Identidad por `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    id: String,
}

impl Label {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(Label { id })
    }
    pub fn id(&self) -> &str { &self.id }
}

/// Clave de identidad de un artifact: el par `(name, value)`.
///
/// Es el tipo con el que los mapas de deduplicación indexan pointers, tanto
/// en el working set como en la frontera de persistencia.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactKey {
    pub name: String,
    pub value: Vec<u8>,
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({} bytes)", self.name, self.value.len())
        }
    }
}

/// Pointer a un artifact producido o consumido por un run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactPointer {
    name: String,
    value: Vec<u8>,
    pointer_type: PointerType,
    flag: bool,
    labels: IndexSet<Label>,
}

// Igualdad/hash estructural SOLO sobre (name, value). Requisito para que el
// contrato de dedup en sets se cumpla bajo cualquier contenedor.
impl PartialEq for ArtifactPointer {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value == other.value
    }
}
impl Eq for ArtifactPointer {}

impl Hash for ArtifactPointer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.value.hash(state);
    }
}

impl ArtifactPointer {
    /// Crea un pointer; `value` puede ser vacío (identidad por nombre solo).
    pub fn new(name: impl Into<String>, value: impl Into<Vec<u8>>, pointer_type: PointerType) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(ArtifactPointer {
            name,
            value: value.into(),
            pointer_type,
            flag: false,
            labels: IndexSet::new(),
        })
    }

    /// Pointer con value vacío y tipo por defecto (`Unknown`).
    pub fn from_name(name: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(name, Vec::new(), PointerType::Unknown)
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn value(&self) -> &[u8] { &self.value }
    pub fn pointer_type(&self) -> PointerType { self.pointer_type }
    pub fn flag(&self) -> bool { self.flag }
    pub fn labels(&self) -> &IndexSet<Label> { &self.labels }

    /// Clave de identidad dueña (para mapas de dedup).
    pub fn key(&self) -> ArtifactKey {
        ArtifactKey { name: self.name.clone(), value: self.value.clone() }
    }

    pub fn set_pointer_type(&mut self, pointer_type: PointerType) {
        self.pointer_type = pointer_type;
    }

    // Toggles idempotentes, sin efectos más allá del flag.
    pub fn set_flag(&mut self) { self.flag = true; }
    pub fn clear_flag(&mut self) { self.flag = false; }

    /// Adjunta un label con semántica de set (dedup por id).
    pub fn add_label(&mut self, label: Label) {
        self.labels.insert(label);
    }

    pub fn add_labels(&mut self, labels: impl IntoIterator<Item = Label>) {
        for label in labels {
            self.labels.insert(label);
        }
    }
}

impl fmt::Display for ArtifactPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {}>", self.pointer_type, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ignores_mutable_metadata() {
        let mut a = ArtifactPointer::new("features.pq", b"v1".to_vec(), PointerType::Data).unwrap();
        let b = ArtifactPointer::new("features.pq", b"v1".to_vec(), PointerType::Model).unwrap();
        a.set_flag();
        assert_eq!(a, b, "equality must be structural on (name, value) only");

        let mut set = IndexSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1, "same (name, value) must dedup to one entry");
    }

    #[test]
    fn distinct_value_is_distinct_artifact() {
        let a = ArtifactPointer::new("features.pq", b"v1".to_vec(), PointerType::Data).unwrap();
        let b = ArtifactPointer::new("features.pq", b"v2".to_vec(), PointerType::Data).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn labels_dedup_by_id() {
        let mut ptr = ArtifactPointer::from_name("preds.pq").unwrap();
        ptr.add_label(Label::new("batch-7").unwrap());
        ptr.add_labels(vec![Label::new("batch-7").unwrap(), Label::new("audit").unwrap()]);
        assert_eq!(ptr.labels().len(), 2);
    }

    #[test]
    fn flag_toggles_are_idempotent() {
        let mut ptr = ArtifactPointer::from_name("model.pkl").unwrap();
        assert!(!ptr.flag());
        ptr.set_flag();
        ptr.set_flag();
        assert!(ptr.flag());
        ptr.clear_flag();
        ptr.clear_flag();
        assert!(!ptr.flag());
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(ArtifactPointer::from_name("").unwrap_err(), DomainError::EmptyName);
        assert_eq!(Label::new("").unwrap_err(), DomainError::EmptyName);
    }
}
