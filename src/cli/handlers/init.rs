use crate::cli::commands::BackendArg;
use crate::config::{CONFIG_FILE_NAME, SmileConfig};
use crate::error::SmileError;
use crate::storage::BackendKind;
use anyhow::Result;
use colored::Colorize;

pub fn handle_init(
    backend: BackendArg,
    project_id: Option<String>,
    path: Option<String>,
    base_url: Option<String>,
) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Err(SmileError::AlreadyInitialized(config_path.display().to_string()).into());
    }

    let mut config = SmileConfig::default();
    config.smile.backend = backend.into();
    if let Some(path) = path {
        config.smile.path = path;
    }
    config.rest.base_url = base_url.filter(|u| !u.trim().is_empty());
    config.document.project_id = project_id;

    if config.smile.backend == BackendKind::Document && config.document.project_id.is_none() {
        anyhow::bail!("The document backend needs --project-id");
    }

    let data_path = config.data_path(&cwd);
    std::fs::create_dir_all(&data_path)?;
    config.save(&config_path)?;

    println!(
        "{} mademesmile journal in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", data_path.display());
    println!("  Backend: {}", config.smile.backend.to_string().cyan());

    Ok(())
}
