use std::path::PathBuf;

use color_eyre::eyre::{Report, Result};
use thiserror::Error;
use tracing::debug;

use crate::status::StatusSink;
use crate::util;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Cluster,
    Local,
}

impl Mode {
    pub fn from_kubernetes_flag(kubernetes: bool) -> Self {
        if kubernetes {
            Mode::Cluster
        } else {
            Mode::Local
        }
    }
}

/// Everything a single uninstall run needs, built once from the command line
#[derive(Clone, Debug)]
pub struct UninstallRequest {
    pub mode: Mode,
    pub namespace: String,
    pub remove_all: bool,
    pub network: String,
    pub container_runtime: String,
    pub install_dir: Option<PathBuf>,
    /// Seconds, only honoured in cluster mode
    pub timeout: u64,
}

impl UninstallRequest {
    fn install_dir_override(&self) -> Option<&PathBuf> {
        self.install_dir
            .as_ref()
            .filter(|dir| !dir.to_string_lossy().trim().is_empty())
    }
}

#[derive(Debug, Error)]
pub enum UninstallError {
    #[error("{flag} is only valid for self-hosted mode")]
    ConfigurationConflict { flag: &'static str },
    #[error("Error removing Dapr: {0}")]
    CollaboratorFailure(#[source] Report),
}

pub trait ClusterRemoval {
    async fn uninstall(&self, namespace: &str, remove_all: bool, timeout: u64) -> Result<()>;
}

pub trait LocalRemoval {
    async fn uninstall(
        &self,
        remove_all: bool,
        network: &str,
        container_runtime: &str,
        install_dir: &str,
    ) -> Result<()>;
}

/// Removes dapr either from a kubernetes cluster or from this machine.
/// At most one of the removal collaborators is invoked, exactly once.
pub async fn uninstall<C, L, S>(
    request: UninstallRequest,
    cluster: &C,
    local: &L,
    status: &S,
) -> Result<(), UninstallError>
where
    C: ClusterRemoval,
    L: LocalRemoval,
    S: StatusSink,
{
    let result = match request.mode {
        Mode::Cluster => {
            if request.install_dir_override().is_some() {
                let err = UninstallError::ConfigurationConflict {
                    flag: "--install-dir",
                };
                status.failure(&err.to_string());
                return Err(err);
            }
            status.info("Removing Dapr from your cluster...");
            cluster
                .uninstall(&request.namespace, request.remove_all, request.timeout)
                .await
        }
        Mode::Local => {
            status.info("Removing Dapr from your machine...");
            let install_dir = request
                .install_dir_override()
                .cloned()
                .unwrap_or_else(util::default_dapr_dir_path);
            debug!("Uninstalling from {}", install_dir.display());
            local
                .uninstall(
                    request.remove_all,
                    &request.network,
                    &request.container_runtime,
                    &install_dir.to_string_lossy(),
                )
                .await
        }
    };

    match result {
        Ok(()) => {
            status.success("Dapr has been removed successfully");
            Ok(())
        }
        Err(e) => {
            let err = UninstallError::CollaboratorFailure(e);
            status.failure(&err.to_string());
            Err(err)
        }
    }
}
