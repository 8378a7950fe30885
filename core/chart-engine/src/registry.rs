//! FILENAME: core/chart-engine/src/registry.rs
//! PURPOSE: Registry of chart rendering plugins.
//! CONTEXT: Plugins are registered once per process when the first chart
//! surface starts. Registering an id again is a no-op, never an error.

use std::collections::HashSet;
use std::sync::Mutex;

use engine::log_debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PluginId {
    /// Pie leader lines and outside labels.
    LabelLine,
    /// Pie radius sizing that reserves room for labels.
    PieSize,
}

impl PluginId {
    pub const BUILTIN: [PluginId; 2] = [PluginId::LabelLine, PluginId::PieSize];

    pub fn as_str(&self) -> &'static str {
        match self {
            PluginId::LabelLine => "labelLine",
            PluginId::PieSize => "pieSize",
        }
    }
}

/// A set of registered plugin ids.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    ids: Mutex<HashSet<PluginId>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        PluginRegistry::default()
    }

    fn with_ids<R>(&self, f: impl FnOnce(&mut HashSet<PluginId>) -> R) -> R {
        // A panic while holding the lock cannot leave the set inconsistent
        let mut ids = self.ids.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut ids)
    }

    /// Returns false if the id was already registered.
    pub fn register(&self, id: PluginId) -> bool {
        let inserted = self.with_ids(|ids| ids.insert(id));
        if inserted {
            log_debug!("CHART", "registered plugin {}", id.as_str());
        }
        inserted
    }

    pub fn contains(&self, id: PluginId) -> bool {
        self.with_ids(|ids| ids.contains(&id))
    }

    pub fn register_builtins(&self) {
        for id in PluginId::BUILTIN {
            self.register(id);
        }
    }
}

static GLOBAL_REGISTRY: Lazy<PluginRegistry> = Lazy::new(PluginRegistry::new);

/// The process-wide registry used by `ChartSurface::new`.
pub fn global_registry() -> &'static PluginRegistry {
    &GLOBAL_REGISTRY
}

/// Registers `id` in the process-wide registry. Idempotent.
pub fn register_plugin(id: PluginId) -> bool {
    GLOBAL_REGISTRY.register(id)
}

pub fn is_registered(id: PluginId) -> bool {
    GLOBAL_REGISTRY.contains(id)
}
