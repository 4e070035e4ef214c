use clap::{Parser, Subcommand};
use pkg_constants::exec::DEFAULT_EXEC_COMMAND;
use pkg_constants::paths::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use pkg_constants::secrets::{DEFAULT_KUBECTL_BIN, DEFAULT_OP_BIN, DEFAULT_TAG};
use pkg_sync::{ConfigSynchronizer, Kubectl, OpCli, responder};
use pkg_types::config::{CliConfigFile, load_config_file};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "op-kubeconfig",
    about = "Sync kubeconfig clusters from 1Password and serve their client certificates to kubectl"
)]
struct Cli {
    /// Path to YAML config file
    #[arg(long, short, global = true)]
    config: Option<String>,

    /// 1Password CLI binary
    #[arg(long, global = true)]
    op_bin: Option<String>,

    /// kubectl binary
    #[arg(long, global = true)]
    kubectl_bin: Option<String>,

    /// Kubeconfig file to write (kubectl's default resolution when unset)
    #[arg(long, global = true)]
    kubeconfig: Option<String>,

    /// Only look at items in this 1Password vault
    #[arg(long, global = true)]
    vault: Option<String>,

    /// Command kubectl runs to fetch credentials (this binary)
    #[arg(long, global = true)]
    exec_command: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ExecCredential for a 1Password item (invoked by kubectl)
    Auth {
        /// Item id or name
        item: String,
    },
    /// Write a cluster, user and context for every tagged item
    Update {
        /// 1Password tag to search for
        #[arg(long)]
        tag: Option<String>,
    },
}

/// Effective settings after merging CLI args, config file and defaults.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    op_bin: String,
    kubectl_bin: String,
    kubeconfig: Option<String>,
    vault: Option<String>,
    exec_command: String,
    tag: String,
}

impl Settings {
    /// CLI args > config file > defaults.
    fn merge(cli: &Cli, file: CliConfigFile) -> Self {
        let cli_tag = match &cli.command {
            Commands::Update { tag } => tag.clone(),
            Commands::Auth { .. } => None,
        };
        Self {
            op_bin: cli
                .op_bin
                .clone()
                .or(file.op_bin)
                .unwrap_or_else(|| DEFAULT_OP_BIN.to_string()),
            kubectl_bin: cli
                .kubectl_bin
                .clone()
                .or(file.kubectl_bin)
                .unwrap_or_else(|| DEFAULT_KUBECTL_BIN.to_string()),
            kubeconfig: cli.kubeconfig.clone().or(file.kubeconfig),
            vault: cli.vault.clone().or(file.vault),
            exec_command: cli
                .exec_command
                .clone()
                .or(file.exec_command)
                .unwrap_or_else(|| DEFAULT_EXEC_COMMAND.to_string()),
            tag: cli_tag
                .or(file.tag)
                .unwrap_or_else(|| DEFAULT_TAG.to_string()),
        }
    }
}

fn default_config_path() -> Option<String> {
    dirs::config_dir().map(|dir| {
        dir.join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
            .to_string_lossy()
            .to_string()
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout carries the ExecCredential; all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    // Load config file (returns defaults if file not found)
    let file_cfg: CliConfigFile = match cli.config.clone().or_else(default_config_path) {
        Some(path) => {
            debug!("Config file: {}", path);
            load_config_file(&path)?
        }
        None => CliConfigFile::default(),
    };
    let settings = Settings::merge(&cli, file_cfg);
    debug!("Settings: {:?}", settings);

    let store = OpCli::new(&settings.op_bin).with_vault(settings.vault.clone());

    match &cli.command {
        Commands::Auth { item } => {
            responder::auth(&store, item, std::io::stdout()).await?;
        }
        Commands::Update { .. } => {
            info!("Updating kubeconfig from items tagged '{}'", settings.tag);
            let kubectl =
                Kubectl::new(&settings.kubectl_bin).with_kubeconfig(settings.kubeconfig.clone());
            let report = ConfigSynchronizer::new(&kubectl, &settings.exec_command)
                .update(&store, &settings.tag)
                .await?;
            println!("kubeconfig updated successfully ({} contexts)", report.contexts());
        }
    }

    Ok(())
}
