//! `txextract selectors` — list the registry contents.

use anyhow::Result;

use crate::config::ExtractorConfig;

pub fn run(config: &ExtractorConfig, as_json: bool) -> Result<()> {
    let registry = crate::load_registry(&config.abi_dir)?;
    let descriptions = registry.descriptions();

    if as_json {
        let rows: Vec<serde_json::Value> = descriptions
            .iter()
            .map(|d| {
                serde_json::json!({
                    "selector": d.selector_hex(),
                    "signature": d.function.signature(),
                    "handled": d.kind().is_some(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for d in &descriptions {
            let handled = match d.kind() {
                Some(kind) => format!("-> {kind}"),
                None => "(not handled)".to_string(),
            };
            println!("{}  {:<60} {}", d.selector_hex(), d.function.signature(), handled);
        }
        println!("\n{} selectors", descriptions.len());
    }
    Ok(())
}
