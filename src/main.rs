mod kubernetes;
mod standalone;
mod status;
mod uninstall;
mod util;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use kubernetes::HelmRemoval;
use standalone::MachineRemoval;
use status::ConsoleStatus;
use uninstall::{Mode, UninstallError, UninstallRequest};

/// Manage a local or Kubernetes Dapr installation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Uninstall Dapr runtime. Supported platforms: Kubernetes and self-hosted
    Uninstall(UninstallArgs),
}

#[derive(clap::Args, Debug)]
struct UninstallArgs {
    /// Uninstall Dapr from a Kubernetes cluster
    #[arg(short, long)]
    kubernetes: bool,
    /// The timeout for the Kubernetes uninstall
    #[arg(long, default_value_t = 300)]
    timeout: u64,
    /// Remove .dapr directory, Redis, Placement and Zipkin containers on local machine, and CRDs on a Kubernetes cluster
    #[arg(long)]
    all: bool,
    /// The Docker network from which to remove the Dapr runtime
    #[arg(long, env = "DAPR_NETWORK", default_value = "")]
    network: String,
    /// The Kubernetes namespace to uninstall Dapr from
    #[arg(short, long, default_value = "dapr-system")]
    namespace: String,
    /// The container runtime to use
    #[arg(long, default_value = "docker")]
    container_runtime: String,
    /// The directory to uninstall dapr from [default: $HOME/.dapr, or /usr/local/dapr]
    #[arg(long)]
    install_dir: Option<PathBuf>,
}

impl From<UninstallArgs> for UninstallRequest {
    fn from(args: UninstallArgs) -> Self {
        UninstallRequest {
            mode: Mode::from_kubernetes_flag(args.kubernetes),
            namespace: args.namespace,
            remove_all: args.all,
            network: args.network,
            container_runtime: args.container_runtime,
            install_dir: args.install_dir,
            timeout: args.timeout,
        }
    }
}

fn setup_tracing() {
    #[cfg(debug_assertions)]
    {
        let fmt_layer_stdout = tracing_subscriber::fmt::layer()
            .compact()
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(false)
            .with_target(true)
            .with_writer(status::console_writer(std::io::stderr, std::io::stdout));

        tracing_subscriber::registry()
            .with(fmt_layer_stdout)
            .with(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::from("dapr_uninstall=debug")),
            )
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        let fmt_layer_stdout = tracing_subscriber::fmt::layer()
            .compact()
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_target(false)
            .without_time()
            .with_writer(status::console_writer(std::io::stderr, std::io::stdout));

        tracing_subscriber::registry()
            .with(fmt_layer_stdout)
            .with(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::from("dapr_uninstall=info")),
            )
            .init();
    }
}

/// Process exit status for an uninstall outcome, errors are already reported through the status sink
fn exit_code(result: &Result<(), UninstallError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

async fn run(command: Command) -> i32 {
    match command {
        Command::Uninstall(args) => {
            let target_os = util::current_os();
            let result = uninstall::uninstall(
                UninstallRequest::from(args),
                &HelmRemoval::new(target_os),
                &MachineRemoval::new(target_os),
                &ConsoleStatus,
            )
            .await;
            exit_code(&result)
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    setup_tracing();

    let code = run(cli.command).await;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
