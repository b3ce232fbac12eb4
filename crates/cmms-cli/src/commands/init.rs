//! Store initialization command

use clap::Args;
use cmms_core::errors::ExErrorKind;
use cmms_store::{OpenOutcome, PersistenceContext};

use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Replace an unreadable image with fresh seed data (the old payload is kept aside)
    #[arg(long)]
    pub recover: bool,
}

pub fn execute(args: InitArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = PersistenceContext::from_config(config.store.clone());

    let outcome = match ctx.open_or_recover() {
        Ok(outcome) => outcome,
        Err(e) if args.recover && e.kind() == ExErrorKind::ImageCorrupt => {
            eprintln!("Warning: {}", e);
            ctx.recover_fresh()?
        }
        Err(e) => return Err(e.into()),
    };

    let message = match outcome {
        OpenOutcome::Seeded => "Store created with first-run data",
        OpenOutcome::Restored => "Store restored from persisted image",
        OpenOutcome::Recovered => "Unreadable image set aside, store recreated with first-run data",
        OpenOutcome::AlreadyOpen => "Store already open",
    };
    println!("{}", message);
    println!("  outcome: {}", outcome.as_str());
    println!("  data dir: {}", ctx.config().data_dir.display());
    println!("  storage key: {}", ctx.storage_key());
    Ok(())
}
