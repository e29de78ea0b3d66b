use clap::{Args, Parser, Subcommand};
use ctr_checkpoint::validation::clap_id_validator;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ctr-checkpoint")]
#[command(about = "Checkpoint running container tasks", long_about = None)]
#[command(version)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// State root directory (default: $CTR_CHECKPOINT_ROOT or the user data dir)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Namespace to use (default: $CONTAINERD_NAMESPACE or "default")
    #[arg(short, long, global = true, value_parser = clap_id_validator)]
    pub namespace: Option<String>,

    /// Runtime assumed for containers that do not record one
    #[arg(long, global = true)]
    pub runtime: Option<String>,

    /// Path to a config file (default: $CTR_CHECKPOINT_CONFIG or <root>/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "ctr_checkpoint=trace"
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Checkpoint a container
    Checkpoint {
        /// Stop the container after the checkpoint
        #[arg(long)]
        exit: bool,

        /// Track memory changes for incremental checkpoints
        #[arg(long)]
        track_mem: bool,

        /// Digest of the parent checkpoint image
        #[arg(long, value_name = "DIGEST")]
        parent_checkpoint: Option<String>,

        /// Container to checkpoint
        #[arg(value_name = "CONTAINER")]
        container: Option<String>,
    },
}
