//! Carga de configuración del store desde variables de entorno.
//! Convención `TRACE_*`, con defaults para desarrollo.

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

use crate::error::PersistenceError;
use trace_core::DEFAULT_STALENESS_THRESHOLD_DAYS;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub staleness_threshold_days: i64,
}

impl StoreConfig {
    /// Lee la config con defaults silenciosos (valores ilegibles caen al
    /// default).
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let staleness_threshold_days = env::var("TRACE_STALENESS_THRESHOLD_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_STALENESS_THRESHOLD_DAYS);
        Self { staleness_threshold_days }
    }

    /// Variante estricta: una variable presente pero ilegible es un error de
    /// configuración, no un default silencioso.
    pub fn try_from_env() -> Result<Self, PersistenceError> {
        Lazy::force(&DOTENV_LOADED);
        let staleness_threshold_days = match env::var("TRACE_STALENESS_THRESHOLD_DAYS") {
            Ok(raw) => raw.parse::<i64>().map_err(|_| {
                PersistenceError::InvalidConfig(format!("TRACE_STALENESS_THRESHOLD_DAYS: not an integer: {raw}"))
            })?,
            Err(_) => DEFAULT_STALENESS_THRESHOLD_DAYS,
        };
        Ok(Self { staleness_threshold_days })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { staleness_threshold_days: DEFAULT_STALENESS_THRESHOLD_DAYS }
    }
}
