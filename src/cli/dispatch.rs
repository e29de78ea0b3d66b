use anyhow::{Context, Result};
use ctr_checkpoint::commands::checkpoint::{self, CheckpointArgs};
use ctr_checkpoint::config::{Config, Overrides};
use ctr_checkpoint::fs::StateDir;
use ctr_checkpoint::local::LocalClient;
use ctr_checkpoint::logging;
use tracing::debug;

use super::types::{Cli, Commands, GlobalArgs};

pub fn dispatch(cli: Cli) -> Result<()> {
    let log_flag = cli.global.log_level.clone();
    let config = load_config(cli.global)?;
    logging::init(&logging::filter_directive(
        log_flag.as_deref(),
        config.log_level.as_deref(),
    ));
    debug!(root = %config.root.display(), namespace = %config.namespace, "using state root");

    let client = LocalClient::new(
        StateDir::new(&config.root, &config.namespace),
        &config.default_runtime,
    );

    match cli.command {
        Commands::Checkpoint {
            exit,
            track_mem,
            parent_checkpoint,
            container,
        } => {
            let artifact = checkpoint::execute(
                &client,
                CheckpointArgs {
                    container_id: container,
                    exit,
                    track_mem,
                    parent_checkpoint,
                },
            )?;
            println!("{}", artifact.name());
            Ok(())
        }
    }
}

fn load_config(global: GlobalArgs) -> Result<Config> {
    Config::load(&Overrides {
        config: global.config,
        root: global.root,
        namespace: global.namespace,
        runtime: global.runtime,
        log_level: global.log_level,
    })
    .context("Failed to load configuration")
}
