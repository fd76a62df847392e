//! Startup orchestration.
//!
//! # Responsibilities
//! - Load every configured route source
//! - Compose them into a single `HandlerChain` in precedence order
//!
//! # Design Decisions
//! - Database failures degrade: the stage is skipped and startup continues
//! - File failures are fatal: an explicitly requested source must load
//! - All errors surface here, never at request time

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{ConfigError, ShortenerConfig, SourceConfig};
use crate::routes::database::load_database;
use crate::routes::file::load_file;
use crate::routes::LoadError;
use crate::routing::{Greeting, HandlerChain};

/// Fatal startup failure.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot infer format of route source {0}; use a .yaml, .yml or .json extension")]
    UnknownFormat(PathBuf),

    #[error("route source {} failed to load: {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: LoadError,
    },
}

/// Build the request handler chain.
///
/// Composition order (lowest precedence first): base greeting, database
/// table, then each file source in `config.sources` order.
pub fn build_chain(config: &ShortenerConfig) -> Result<HandlerChain, StartupError> {
    let mut chain = HandlerChain::new(Greeting::new(config.fallback.body.clone()))
        .with_status(config.redirect.status);

    if config.database.enabled {
        let db = &config.database;
        match load_database(&db.path, &db.table) {
            Ok(table) => chain.push_stage(table, format!("sqlite:{}", db.path.display())),
            Err(e) => {
                tracing::warn!(
                    path = %db.path.display(),
                    error = %e,
                    "Database routes unavailable, continuing without them"
                );
            }
        }
    }

    if config.sources.is_empty() {
        tracing::info!("No YAML or JSON route file provided, serving database routes and default handler");
    }

    for source in &config.sources {
        load_source(&mut chain, source)?;
    }

    tracing::info!(stages = chain.stages().len(), "Handler chain ready");
    Ok(chain)
}

fn load_source(chain: &mut HandlerChain, source: &SourceConfig) -> Result<(), StartupError> {
    let format = source
        .resolved_format()
        .ok_or_else(|| StartupError::UnknownFormat(source.path.clone()))?;

    let table = load_file(&source.path, format).map_err(|e| StartupError::Source {
        path: source.path.clone(),
        source: e,
    })?;

    chain.push_stage(table, format!("{format}:{}", source.path.display()));
    Ok(())
}
