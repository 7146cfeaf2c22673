//! Local one-shot module run.
//!
//! Reads the profile the way a module invocation does (device cache first,
//! store second), builds the prompt, calls the configured backend, and
//! prints the result.

use crate::backend;
use anyhow::{Context, Result};
use brandbrief_application::GenerateUseCase;
use brandbrief_core::identity::IdentityResolver;
use brandbrief_infrastructure::{
    DirProfileStore, JsonFileDeviceCache, SingleUserIdentityResolver,
};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

pub async fn run(
    base_dir: Option<&Path>,
    module_id: &str,
    input: Option<&str>,
    model: Option<&str>,
) -> Result<()> {
    let input: Value = match input {
        Some(raw) => serde_json::from_str(raw).context("--input must be a JSON object")?,
        None => Value::Object(Default::default()),
    };

    let cache = Arc::new(JsonFileDeviceCache::new(base_dir)?);
    let store = Arc::new(DirProfileStore::new(base_dir).await?);
    let identity: Arc<dyn IdentityResolver> = Arc::new(SingleUserIdentityResolver::default());
    let generator = backend::build_generator(model);

    let usecase = GenerateUseCase::new(identity, store, generator).with_cache(cache);
    let result = usecase.generate(None, Some(module_id), &input).await?;

    println!("{result}");
    Ok(())
}
