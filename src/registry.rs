//! Explicit builder registration.
//!
//! Builders are installed into a `BuilderRegistry` by the orchestrator at
//! startup -- a name-to-function map passed around explicitly rather than
//! shared mutable environment state. Looking up an unknown builder is an
//! error that names the builders that do exist.

use anyhow::{Result, bail};
use std::collections::HashMap;

use crate::deps::DepRecorder;
use crate::embed::{self, EmbedJob};

/// A named builder: consumes a batch of jobs, recording dependency edges and
/// writing target files as it goes.
pub type BuilderFn = fn(&[EmbedJob], &mut DepRecorder) -> Result<()>;

/// The name the byte-array header builder is registered under.
pub const DATA_BUILDER: &str = "data";

#[derive(Default)]
pub struct BuilderRegistry {
    builders: HashMap<String, BuilderFn>,
}

impl BuilderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `builder` under `name`, replacing any previous registration.
    pub fn register(&mut self, name: &str, builder: BuilderFn) {
        self.builders.insert(name.to_string(), builder);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Run the builder registered under `name` over `jobs`.
    pub fn run(&self, name: &str, jobs: &[EmbedJob], deps: &mut DepRecorder) -> Result<()> {
        match self.builders.get(name) {
            Some(builder) => builder(jobs, deps),
            None => {
                let mut known: Vec<&str> = self.builders.keys().map(String::as_str).collect();
                known.sort_unstable();
                bail!("unknown builder '{name}' (registered: {})", known.join(", "));
            }
        }
    }
}

/// A registry with the stock builders installed.
pub fn default_registry() -> BuilderRegistry {
    let mut registry = BuilderRegistry::new();
    registry.register(DATA_BUILDER, embed::run_jobs);
    registry
}
