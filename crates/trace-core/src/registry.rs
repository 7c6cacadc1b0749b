//! Registro de artifacts del working set.
//!
//! Mantiene el pointer canónico por clave `(name, value)` mientras un
//! proceso va poblando runs. `register` es idempotente: si la clave ya
//! existe devuelve la instancia previa SIN pisar `pointer_type` ni `flag`
//! (la primera registración gana; las mutaciones son explícitas).
use indexmap::IndexMap;

use crate::errors::CoreError;
use trace_domain::{ArtifactKey, ArtifactPointer, DomainError, Label, PointerType};

#[derive(Debug, Default)]
pub struct ArtifactRegistry {
    inner: IndexMap<ArtifactKey, ArtifactPointer>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devuelve el pointer canónico para `(name, value)`, creándolo si no
    /// existe. `pointer_type` sólo aplica a la creación; una registración
    /// posterior con otro tipo NO sobreescribe el existente.
    pub fn register(&mut self, name: &str, value: &[u8], pointer_type: Option<PointerType>) -> Result<&ArtifactPointer, DomainError> {
        let key = ArtifactKey { name: name.to_string(), value: value.to_vec() };
        if !self.inner.contains_key(&key) {
            let pointer = ArtifactPointer::new(name, value.to_vec(), pointer_type.unwrap_or_default())?;
            self.inner.insert(key.clone(), pointer);
        }
        Ok(&self.inner[&key])
    }

    pub fn get(&self, key: &ArtifactKey) -> Option<&ArtifactPointer> {
        self.inner.get(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn get_mut(&mut self, key: &ArtifactKey) -> Result<&mut ArtifactPointer, CoreError> {
        self.inner
            .get_mut(key)
            .ok_or_else(|| CoreError::ArtifactNotFound(key.clone()))
    }

    /// Cambia el tipo del pointer canónico en el lugar.
    pub fn set_pointer_type(&mut self, key: &ArtifactKey, pointer_type: PointerType) -> Result<(), CoreError> {
        self.get_mut(key)?.set_pointer_type(pointer_type);
        Ok(())
    }

    pub fn set_flag(&mut self, key: &ArtifactKey) -> Result<(), CoreError> {
        self.get_mut(key)?.set_flag();
        Ok(())
    }

    pub fn clear_flag(&mut self, key: &ArtifactKey) -> Result<(), CoreError> {
        self.get_mut(key)?.clear_flag();
        Ok(())
    }

    pub fn add_label(&mut self, key: &ArtifactKey, label: Label) -> Result<(), CoreError> {
        self.get_mut(key)?.add_label(label);
        Ok(())
    }

    pub fn add_labels(&mut self, key: &ArtifactKey, labels: impl IntoIterator<Item = Label>) -> Result<(), CoreError> {
        self.get_mut(key)?.add_labels(labels);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent_and_preserves_prior_metadata() {
        let mut registry = ArtifactRegistry::new();
        let key = registry.register("model.pkl", b"v3", Some(PointerType::Model)).unwrap().key();
        registry.set_flag(&key).unwrap();

        // Segunda registración con otro tipo: devuelve el canónico intacto.
        let again = registry.register("model.pkl", b"v3", Some(PointerType::Data)).unwrap();
        assert_eq!(again.pointer_type(), PointerType::Model);
        assert!(again.flag());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_defaults_to_unknown() {
        let mut registry = ArtifactRegistry::new();
        let ptr = registry.register("mystery.bin", b"", None).unwrap();
        assert_eq!(ptr.pointer_type(), PointerType::Unknown);
    }

    #[test]
    fn labels_attach_with_set_semantics() {
        let mut registry = ArtifactRegistry::new();
        let key = registry.register("preds.pq", b"", None).unwrap().key();
        registry.add_label(&key, Label::new("audit").unwrap()).unwrap();
        registry
            .add_labels(&key, vec![Label::new("audit").unwrap(), Label::new("batch-7").unwrap()])
            .unwrap();
        assert_eq!(registry.get(&key).unwrap().labels().len(), 2);
    }

    #[test]
    fn mutating_missing_key_fails() {
        let mut registry = ArtifactRegistry::new();
        let key = ArtifactKey { name: "ghost".into(), value: Vec::new() };
        assert!(matches!(registry.set_flag(&key), Err(CoreError::ArtifactNotFound(_))));
    }
}
