use std::path::Path;

use color_eyre::eyre::{eyre, Result};
use tokio::{fs, process::Command};
use tracing::{debug, info, warn};

use crate::uninstall::LocalRemoval;
use crate::util;

const CONTROL_PLANE_CONTAINERS: [&str; 2] = ["dapr_placement", "dapr_scheduler"];
const INFRA_CONTAINERS: [&str; 2] = ["dapr_redis", "dapr_zipkin"];

/// Removes a self-hosted installation: containers first, then files
pub struct MachineRemoval {
    target_os: &'static str,
}

impl MachineRemoval {
    pub fn new(target_os: &'static str) -> Self {
        Self { target_os }
    }

    async fn remove_container(&self, container_runtime: &str, name: &str) -> Result<()> {
        let runtime = util::lookup_binary_file_path(container_runtime, self.target_os);
        debug!("Removing container {} with {}", name, runtime.display());
        let output = Command::new(&runtime)
            .args(["rm", "--force", name])
            .output()
            .await?;
        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.to_lowercase().contains("no such container") {
            debug!("Container {} is not present", name);
            return Ok(());
        }
        Err(eyre!("could not remove container {}: {}", name, stderr.trim()))
    }
}

/// Container names as created for `network`, suffixed with `_<network>` when one is given
pub fn container_names(remove_all: bool, network: &str) -> Vec<String> {
    let mut names = CONTROL_PLANE_CONTAINERS.to_vec();
    if remove_all {
        names.extend(INFRA_CONTAINERS);
    }
    names
        .into_iter()
        .map(|name| match network {
            "" => name.to_string(),
            network => format!("{}_{}", name, network),
        })
        .collect()
}

pub async fn remove_files(remove_all: bool, install_dir: &Path) -> Result<()> {
    if remove_all {
        if fs::try_exists(install_dir).await? {
            info!("Removing {}", install_dir.display());
            fs::remove_dir_all(install_dir).await?;
        }
        return Ok(());
    }

    let bin_dir = util::dapr_bin_path(install_dir);
    if fs::try_exists(&bin_dir).await? {
        info!("Removing {}", bin_dir.display());
        fs::remove_dir_all(&bin_dir).await?;
    }
    info!(
        "Leaving components in {} and configuration in {}, use --all to remove them",
        util::dapr_components_path(install_dir).display(),
        util::dapr_config_path(install_dir).display()
    );
    Ok(())
}

impl LocalRemoval for MachineRemoval {
    async fn uninstall(
        &self,
        remove_all: bool,
        network: &str,
        container_runtime: &str,
        install_dir: &str,
    ) -> Result<()> {
        let mut failed = Vec::new();
        for container in container_names(remove_all, network) {
            if let Err(e) = self.remove_container(container_runtime, &container).await {
                warn!("{}", e);
                failed.push(container);
            }
        }

        remove_files(remove_all, Path::new(install_dir)).await?;

        if !failed.is_empty() {
            return Err(eyre!("failed to remove containers: {}", failed.join(", ")));
        }
        Ok(())
    }
}
