use anyhow::Result;

use folio_core::{AppConfig, SectionRegistry};

pub fn run(config: &AppConfig, json: bool) -> Result<()> {
    let registry = SectionRegistry::from_config(&config.sections)?;

    if json {
        println!("{}", serde_json::to_string_pretty(registry.sections())?);
        return Ok(());
    }

    println!("Sections ({}):\n", registry.sections().len());
    for (idx, section) in registry.sections().iter().enumerate() {
        let hash = if section.id.is_home() {
            "(no hash)".to_string()
        } else {
            format!("#{}", section.id)
        };
        println!("  {}. {} - {}  {}", idx + 1, section.id, section.display_label, hash);
    }

    Ok(())
}
