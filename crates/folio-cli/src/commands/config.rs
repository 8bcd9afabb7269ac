use anyhow::Result;

use folio_core::AppConfig;

pub fn run(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path();

    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            config.save()?;
            println!("Wrote {}", path.display());
        }
        return Ok(());
    }

    println!("# {}", path.display());
    if !path.exists() {
        println!("# (not found, showing defaults)");
    }
    println!("{}", config.to_toml()?);

    Ok(())
}
