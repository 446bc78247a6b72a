//! settings.rs - The process-wide filter settings and their reload discipline.
//!
//! Everything that changes on reload (catalog, toggles, warning message,
//! logging switch) travels together in one immutable [`FilterSettings`]
//! snapshot. [`SharedSettings`] hands out `Arc` clones of the current snapshot
//! and replaces it wholesale; a snapshot is always fully built before it
//! becomes visible.
//!
//! License: MIT OR APACHE 2.0

use log::info;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::catalog::compiler::RejectedPattern;
use crate::catalog::PatternCatalog;
use crate::config::FilterConfig;
use crate::submission::Context;

/// Which submission surfaces are moderated at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceToggles {
    pub chat: bool,
    pub signs: bool,
    pub books: bool,
    pub anvils: bool,
}

impl Default for SurfaceToggles {
    fn default() -> Self {
        Self {
            chat: true,
            signs: true,
            books: true,
            anvils: true,
        }
    }
}

impl SurfaceToggles {
    pub fn from_config(config: &FilterConfig) -> Self {
        Self {
            chat: config.filter_chat,
            signs: config.filter_signs,
            books: config.filter_books,
            anvils: config.filter_anvils,
        }
    }

    pub fn is_enabled(&self, context: Context) -> bool {
        match context {
            Context::Chat => self.chat,
            Context::Sign => self.signs,
            Context::Book => self.books,
            Context::Anvil => self.anvils,
        }
    }
}

/// One immutable, fully-constructed generation of the filter settings.
#[derive(Debug)]
pub struct FilterSettings {
    pub catalog: PatternCatalog,
    pub toggles: SurfaceToggles,
    /// Untranslated template (still using `&` codes).
    pub warning_message: String,
    pub enable_logging: bool,
    /// Monotonically increasing generation number, starting at 1.
    pub version: u64,
    /// Regex sources skipped while building this generation.
    pub rejected: Vec<RejectedPattern>,
}

impl FilterSettings {
    /// Compiles a configuration into a settings snapshot with the given version.
    pub fn from_config(config: &FilterConfig, version: u64) -> Self {
        let (catalog, rejected) = PatternCatalog::load_with_report(config);
        Self {
            catalog,
            toggles: SurfaceToggles::from_config(config),
            warning_message: config.warning_message.clone(),
            enable_logging: config.enable_logging,
            version,
            rejected,
        }
    }
}

/// The shared, atomically replaceable settings reference.
#[derive(Debug)]
pub struct SharedSettings {
    current: RwLock<Arc<FilterSettings>>,
    next_version: AtomicU64,
}

impl SharedSettings {
    /// Builds the first generation from `config`.
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(FilterSettings::from_config(config, 1))),
            next_version: AtomicU64::new(2),
        }
    }

    /// The current snapshot. Callers keep using it even if a reload happens meanwhile.
    pub fn snapshot(&self) -> Arc<FilterSettings> {
        let guard = self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Builds a new generation from `config` and swaps it in.
    ///
    /// Compilation happens before the write lock is taken, so readers are only
    /// ever blocked for the pointer swap.
    pub fn reload(&self, config: &FilterConfig) -> Arc<FilterSettings> {
        let version = self.next_version.fetch_add(1, Ordering::SeqCst);
        let fresh = Arc::new(FilterSettings::from_config(config, version));
        {
            let mut guard = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = Arc::clone(&fresh);
        }
        info!(
            "Filter settings reloaded (version {}): {} words, {} patterns, {} rejected.",
            fresh.version,
            fresh.catalog.words().len(),
            fresh.catalog.patterns().len(),
            fresh.rejected.len()
        );
        fresh
    }
}
