use anyhow::Result;

use folio_core::{
    history::{decode_fragment, HistorySync},
    AppConfig, SectionRegistry,
};

pub fn run(config: &AppConfig, href: &str) -> Result<()> {
    let sync = HistorySync::new(&config.general.base_url)?;
    let registry = SectionRegistry::from_config(&config.sections)?;

    let (section, sub_path) = if href.starts_with('#') || !href.contains("://") {
        decode_fragment(href)
    } else {
        sync.decode_href(href)?
    };

    println!("section:   {}", section);
    println!("sub-path:  {}", sub_path.as_deref().unwrap_or("-"));
    println!("canonical: {}", sync.url_for(&section, sub_path.as_deref()));
    if !registry.contains(&section) {
        println!("warning:   '{}' is not a registered section", section);
    }

    Ok(())
}
