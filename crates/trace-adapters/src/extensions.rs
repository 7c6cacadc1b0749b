//! Inferencia de `PointerType` por extensión de archivo.
//!
//! Colaborador externo del core: cuando un run declara un input/output por
//! nombre pelado, el tipo se infiere de esta tabla; sin match se cae a
//! `Unknown`. La tabla es estática y case-insensitive sobre el último
//! segmento de extensión.
use once_cell::sync::Lazy;
use std::collections::HashMap;

use trace_domain::PointerType;

static EXTENSION_TYPES: Lazy<HashMap<&'static str, PointerType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for ext in ["csv", "pq", "parquet", "json", "txt", "tsv", "arrow", "feather"] {
        m.insert(ext, PointerType::Data);
    }
    for ext in ["h5", "hd5", "hdf5", "pkl", "joblib", "ckpt", "pt", "pth", "onnx"] {
        m.insert(ext, PointerType::Model);
    }
    m
});

/// Infere el tipo de pointer a partir del nombre/path del artifact.
pub fn infer_pointer_type(name: &str) -> PointerType {
    match name.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            EXTENSION_TYPES.get(ext.as_str()).copied().unwrap_or(PointerType::Unknown)
        }
        None => PointerType::Unknown,
    }
}
