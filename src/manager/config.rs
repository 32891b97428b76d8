// Configuration operations

use crate::cli::ConfigArgs;
use crate::config::{AppPaths, ConfigStore, MAMEDIR_KEY, resolve_install_root};
use crate::utils::error::{AppError, AppResult};
use crate::utils::output::print_success;
use std::path::Path;

pub fn handle_config_command(paths: &AppPaths, args: &ConfigArgs) -> AppResult<()> {
    match args.key.as_str() {
        MAMEDIR_KEY => set_mamedir(paths, &args.value),
        other => Err(AppError::UnknownConfigKey(other.to_string())),
    }
}

fn set_mamedir(paths: &AppPaths, value: &str) -> AppResult<()> {
    let root = resolve_install_root(Path::new(value))?;
    let root = root.to_str().ok_or_else(|| {
        AppError::System(format!("Install path is not valid UTF-8: {}", root.display()))
    })?;

    ConfigStore::new(paths).set(MAMEDIR_KEY, root)?;
    print_success(&format!("Set successfully to {}", root));
    Ok(())
}
