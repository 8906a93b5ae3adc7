use color_eyre::eyre::{eyre, Result};
use tokio::process::Command;
use tracing::{debug, info};

use crate::uninstall::ClusterRemoval;
use crate::util;

const RELEASE_NAME: &str = "dapr";

const DAPR_CRDS: [&str; 5] = [
    "components.dapr.io",
    "configurations.dapr.io",
    "subscriptions.dapr.io",
    "resiliencies.dapr.io",
    "httpendpoints.dapr.io",
];

/// Removes the dapr helm release, and the CRDs with `--all`
pub struct HelmRemoval {
    target_os: &'static str,
}

impl HelmRemoval {
    pub fn new(target_os: &'static str) -> Self {
        Self { target_os }
    }

    fn helm_args(namespace: &str, timeout: u64) -> Vec<String> {
        vec![
            "uninstall".to_string(),
            RELEASE_NAME.to_string(),
            "--namespace".to_string(),
            namespace.to_string(),
            "--timeout".to_string(),
            format!("{}s", timeout),
            "--wait".to_string(),
        ]
    }

    async fn run(&self, tool: &str, args: &[String]) -> Result<()> {
        let program = util::lookup_binary_file_path(tool, self.target_os);
        debug!("Running {} {}", program.display(), args.join(" "));
        let output = Command::new(&program).args(args).output().await?;
        if !output.status.success() {
            return Err(eyre!(
                "{} exited with {}: {}",
                tool,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        Ok(())
    }
}

impl ClusterRemoval for HelmRemoval {
    async fn uninstall(&self, namespace: &str, remove_all: bool, timeout: u64) -> Result<()> {
        self.run("helm", &Self::helm_args(namespace, timeout)).await?;
        if remove_all {
            info!("Removing Dapr CRDs");
            let mut args = vec!["delete".to_string(), "crd".to_string()];
            args.extend(DAPR_CRDS.iter().map(|crd| crd.to_string()));
            args.push("--ignore-not-found".to_string());
            self.run("kubectl", &args).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helm_args_carry_namespace_and_timeout() {
        assert_eq!(
            HelmRemoval::helm_args("dapr-system", 300),
            [
                "uninstall",
                "dapr",
                "--namespace",
                "dapr-system",
                "--timeout",
                "300s",
                "--wait"
            ]
        );
    }
}
