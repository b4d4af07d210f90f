use std::path::Path;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

/// Asked before an existing output file gets truncated.
#[async_trait::async_trait]
pub trait ConfirmOverwrite {
    async fn confirm_overwrite(&self, target: &Path) -> bool;
}

#[async_trait::async_trait]
impl<'a, T: ConfirmOverwrite + Sync + ?Sized> ConfirmOverwrite for &'a T {
    async fn confirm_overwrite(&self, target: &Path) -> bool {
        (**self).confirm_overwrite(target).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Overwrite {
    /// Ask on the terminal.
    Ask,
    Always,
    Never,
}

#[async_trait::async_trait]
impl ConfirmOverwrite for Overwrite {
    async fn confirm_overwrite(&self, target: &Path) -> bool {
        match self {
            Overwrite::Always => true,
            Overwrite::Never => false,
            Overwrite::Ask => match prompt(target).await {
                Ok(answer) => answer,
                Err(e) => {
                    warn!("Could not read answer, keeping {}: {}", target.display(), e);
                    false
                }
            },
        }
    }
}

async fn prompt(target: &Path) -> io::Result<bool> {
    let mut stdout = io::stdout();
    stdout
        .write_all(
            format!(
                "WARNING: Are you sure you want to remove the old {}? (y/n) ",
                target.display()
            )
            .as_bytes(),
        )
        .await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(io::stdin()).read_line(&mut line).await?;
    Ok(is_yes(&line))
}

/// A bare Enter counts as yes.
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim(), "" | "y" | "Y" | "yes" | "Yes")
}
