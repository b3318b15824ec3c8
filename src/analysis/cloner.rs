use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};

/// External capability: check out a repository into a local directory.
#[async_trait]
pub trait RepoCloner: Send + Sync {
    /// Shallow checkout of the latest commit of `url` into `dest`.
    /// On failure `dest` is left absent.
    async fn clone_shallow(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Clones with the system `git` binary.
pub struct GitCloner;

#[async_trait]
impl RepoCloner for GitCloner {
    async fn clone_shallow(&self, url: &str, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let output = Command::new("git")
            .arg("clone")
            .args(["--depth", "1", "--single-branch"])
            .arg(url)
            .arg(dest)
            .output()
            .await?;

        if !output.status.success() {
            // git can leave a partial checkout behind when it fails midway
            if dest.exists() {
                let _ = tokio::fs::remove_dir_all(dest).await;
            }
            let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::CloneFailed {
                url: url.to_string(),
                message,
            });
        }

        Ok(())
    }
}
