use std::{io::ErrorKind, process::Stdio};

use tokio::{io::AsyncWriteExt, process::Command};

use crate::error::{Error, Result};

/// Clipboard utilities tried in order, the first one that can be spawned wins
const PROGRAMS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
];

pub async fn copy(data: &[u8]) -> Result<()> {
    copy_with(PROGRAMS, data).await
}

async fn copy_with(programs: &[(&str, &[&str])], data: &[u8]) -> Result<()> {
    for (program, args) in programs {
        let mut child = match Command::new(program)
            .args(args.iter())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!("Clipboard utility {} is not installed", program);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(data).await?;
            // Dropping stdin closes the pipe so the utility sees EOF
        }
        let status = child.wait().await?;
        if status.success() {
            debug!("Copied {} bytes with {}", data.len(), program);
            return Ok(());
        }
        error!("Clipboard utility {} exited with {}", program, status);
    }

    Err(Error::NoClipboard)
}
