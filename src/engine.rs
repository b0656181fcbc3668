//! Engine: shared resources for many runs
//!
//! An engine owns the vocabulary and message catalog. Each run gets its own
//! [`RunContext`], so one engine and one program can serve concurrent runs.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::interpreter::{self, Output, RunContext};
use crate::localization::Messages;
use crate::serial::Program;
use crate::vocabulary::{MemoryVocabulary, Vocabulary};

#[derive(Debug, Clone)]
pub struct Engine {
    vocabulary: Option<Arc<dyn Vocabulary>>,
    messages: Arc<Messages>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Messages::default())
    }
}

impl Engine {
    pub fn new(messages: Messages) -> Self {
        Self {
            vocabulary: None,
            messages: Arc::new(messages),
        }
    }

    pub fn with_vocabulary(self, vocabulary: impl Vocabulary + 'static) -> Self {
        self.with_shared_vocabulary(Arc::new(vocabulary))
    }

    pub fn with_shared_vocabulary(mut self, vocabulary: Arc<dyn Vocabulary>) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// Build an engine from configuration: message catalog plus optional vocabulary file
    pub fn from_config(config: &Config) -> Result<Self> {
        let messages = Messages::load(&config.language)
            .with_context(|| format!("Failed to load messages for {}", config.language))?;
        let mut engine = Self::new(messages);

        if let Some(path) = &config.vocabulary {
            let vocabulary = MemoryVocabulary::load(path)
                .with_context(|| format!("Failed to load vocabulary {}", path.display()))?;
            info!(path = %path.display(), "loaded vocabulary");
            engine = engine.with_vocabulary(vocabulary);
        }
        Ok(engine)
    }

    pub fn has_vocabulary(&self) -> bool {
        self.vocabulary.is_some()
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// A fresh run context; seeded when `seed` is given
    pub fn context(&self, seed: Option<u64>) -> RunContext {
        let mut ctx = RunContext::new(Arc::clone(&self.messages));
        if let Some(vocabulary) = &self.vocabulary {
            ctx = ctx.with_vocabulary(Arc::clone(vocabulary));
        }
        if let Some(seed) = seed {
            ctx = ctx.with_seed(seed);
        }
        ctx
    }

    /// Run `program` in a fresh context and return its output
    pub fn run(&self, program: &Program, seed: Option<u64>) -> Output {
        let mut ctx = self.context(seed);
        self.run_in(program, &mut ctx);
        ctx.into_output()
    }

    /// Run `program` in an existing context, keeping its carrier state
    pub fn run_in(&self, program: &Program, ctx: &mut RunContext) {
        interpreter::run(&program.root, ctx);
    }
}
