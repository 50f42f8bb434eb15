use std::{
    env,
    io::Write,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tokio::{
    fs,
    io::{AsyncBufRead, AsyncBufReadExt},
};

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 6174;

/// Runtime options, read from `RU_*` environment variables
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Overrides where the compile command is stored
    #[serde(default)]
    pub config_file: Option<PathBuf>,
}

fn default_address() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: default_address(),
            port: default_port(),
            config_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Config {
        match envy::prefixed("RU_").from_env::<Config>() {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring invalid environment config: {}", e);
                Config::default()
            }
        }
    }

    /// Location of the file holding the compile command, `~/.config/ru.conf` unless overridden
    pub fn compile_command_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.config_file {
            return Ok(path.clone());
        }
        let home = env::var_os("HOME").ok_or(Error::MissingHome)?;
        Ok(PathBuf::from(home).join(".config").join("ru.conf"))
    }
}

/// Reads the stored compile command, without the trailing newline
pub async fn load_compile_command(path: &Path) -> Result<String> {
    let data = fs::read_to_string(path).await?;
    let command = data.trim().to_string();
    if command.is_empty() {
        return Err(Error::EmptyCompileCommand);
    }
    Ok(command)
}

pub async fn save_compile_command(path: &Path, command: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, command).await?;
    debug!("Stored compile command in {}", path.display());
    Ok(())
}

/// Asks for the compile command on `input` and stores it at `path`
pub async fn configure<R>(input: R, path: &Path) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    print!("Paste your c++ compile command: ");
    std::io::stdout().flush()?;

    let mut input = input;
    let mut command = String::new();
    input.read_line(&mut command).await?;
    if command.trim().is_empty() {
        return Err(Error::EmptyCompileCommand);
    }

    save_compile_command(path, &command).await?;
    println!("C++ compilation command saved to: {}", path.display());
    Ok(())
}
