use anyhow::Result;
use clap::Args;
use polyedit_editor::{EditorConfig, DEFAULT_CONFIG_NAME};
use std::path::Path;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write the defaults to polyedit.config.json instead of printing
    #[arg(long)]
    pub init: bool,
}

/// Print the effective editor config, or write a default config file
pub fn config(args: ConfigArgs, cwd: &str) -> Result<()> {
    let cwd = Path::new(cwd);

    if args.init {
        let path = cwd.join(DEFAULT_CONFIG_NAME);
        if path.exists() {
            return Err(anyhow::anyhow!("{} already exists", path.display()));
        }
        std::fs::write(&path, serde_json::to_string_pretty(&EditorConfig::default())?)?;
        println!("Created {}", path.display());
        return Ok(());
    }

    let config = EditorConfig::load(cwd)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();

        config(ConfigArgs { init: true }, cwd).unwrap();
        let loaded = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, EditorConfig::default());

        // Refuses to overwrite
        assert!(config(ConfigArgs { init: true }, cwd).is_err());
    }
}
