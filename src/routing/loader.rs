//! Module loading.
//!
//! # Responsibilities
//! - Turn a candidate file into a typed [`ModuleExport`]
//! - Report genuine load failures (I/O, syntax, factory errors) as errors
//! - Report "loaded fine, but not a router" as a value, never an error

use std::fs::File;

use crate::discovery::CandidateModule;
use crate::routing::declarative;
use crate::routing::registry::ModuleRegistry;
use crate::routing::types::{LoadError, ModuleExport};

/// Loads the module behind a candidate file.
pub trait ModuleLoader {
    fn load(&self, module: &CandidateModule) -> Result<ModuleExport, LoadError>;
}

impl<F> ModuleLoader for F
where
    F: Fn(&CandidateModule) -> Result<ModuleExport, LoadError>,
{
    fn load(&self, module: &CandidateModule) -> Result<ModuleExport, LoadError> {
        self(module)
    }
}

/// Loader for the two standard module kinds.
///
/// - `.toml` files are declarative modules, parsed on the spot.
/// - Every other extension names a compiled module looked up in the
///   registry. The file must still be readable; a file with no registered
///   factory is a helper and exports nothing mountable.
#[derive(Debug, Default)]
pub struct StandardLoader {
    registry: ModuleRegistry,
}

impl StandardLoader {
    pub fn new(registry: ModuleRegistry) -> Self {
        Self { registry }
    }

    /// A loader that only understands declarative modules.
    pub fn declarative_only() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }
}

impl ModuleLoader for StandardLoader {
    fn load(&self, module: &CandidateModule) -> Result<ModuleExport, LoadError> {
        if module.extension == "toml" {
            return declarative::load_file(&module.path);
        }

        File::open(&module.path)?;

        match self.registry.resolve(&module.relative_key()) {
            Some(export) => export,
            None => Ok(ModuleExport::other("unregistered source module")),
        }
    }
}
