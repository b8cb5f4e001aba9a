//! Language-model providers for eavesdropper strategy analysis.
use anyhow::Result;

use crate::config::Settings;

pub mod analysis;
#[cfg(feature = "ai-cerebras")]
pub mod cerebras;

pub trait AiProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn chat(&self, prompt: &str) -> Result<String>;
}

pub struct AiRegistry {
    providers: Vec<Box<dyn AiProvider>>,
}

impl AiRegistry {
    #[allow(unused_variables, unused_mut)]
    pub fn from_settings(settings: &Settings) -> Self {
        let mut r = Self { providers: Vec::new() };
        #[cfg(feature = "ai-cerebras")]
        { r.providers.push(Box::new(cerebras::Cerebras::from_settings(settings))); }
        r
    }
    pub fn list(&self) -> Vec<&'static str> { self.providers.iter().map(|p| p.name()).collect() }
    pub fn first(&self) -> Option<&dyn AiProvider> { self.providers.first().map(|b| b.as_ref()) }
}
