//! The process-wide catalog used by `Display` and `Quantity::to`.
//!
//! Readers take a cloned `Arc` snapshot; loads build the whole catalog first
//! and then swap the pointer, so a reader never sees a partial table.

use crate::catalog::environment::Catalog;
use crate::catalog::registry::Registry;
use crate::dim::error::UnitError;
use lazy_static::lazy_static;
use log::info;
use std::sync::{Arc, PoisonError, RwLock};

lazy_static! {
    static ref ACTIVE: RwLock<Arc<Catalog>> = RwLock::new(Arc::new(Catalog::empty()));
}

/// Snapshot of the active catalog
pub fn active() -> Arc<Catalog> {
    let guard = ACTIVE.read().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&*guard)
}

/// Make `catalog` the active catalog and return the previous one
pub fn install(catalog: Catalog) -> Arc<Catalog> {
    swap(Arc::new(catalog))
}

fn swap(next: Arc<Catalog>) -> Arc<Catalog> {
    let mut guard = ACTIVE.write().unwrap_or_else(PoisonError::into_inner);
    info!("activating environment '{}' ({} units)", next.name(), next.len());
    std::mem::replace(&mut *guard, next)
}

/// Locate and activate a built-in or file environment. On error the
/// previous catalog stays active.
pub fn load(name: &str) -> Result<Arc<Catalog>, UnitError> {
    load_with(&Registry::default(), name)
}

pub fn load_with(registry: &Registry, name: &str) -> Result<Arc<Catalog>, UnitError> {
    let catalog = Arc::new(registry.locate(name)?);
    swap(Arc::clone(&catalog));
    Ok(catalog)
}

/// Return to the empty catalog
pub fn reset() {
    install(Catalog::empty());
}

#[cfg(test)]
lazy_static! {
    static ref SERIAL: std::sync::Mutex<()> = std::sync::Mutex::new(());
}

/// Serializes tests that touch the active catalog
#[cfg(test)]
pub(crate) fn serial() -> std::sync::MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}
