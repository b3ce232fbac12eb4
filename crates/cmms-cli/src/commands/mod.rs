pub mod dashboard;
pub mod downtime;
pub mod equipment;
pub mod export;
pub mod init;
pub mod list;
pub mod part;
pub mod ticket;

use cmms_store::PersistenceContext;

use crate::config::AppConfig;

/// Open the configured store, recovering only if the config allows it
pub fn open_store(config: &AppConfig) -> Result<PersistenceContext, Box<dyn std::error::Error>> {
    let mut ctx = PersistenceContext::from_config(config.store.clone());
    ctx.open_or_recover()?;
    Ok(ctx)
}
