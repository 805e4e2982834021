use anyhow::Result;
use cmet_engines::EngineRegistry;
use cmet_eval::BASELINE_ENGINE;

pub fn handle() -> Result<()> {
    let registry = EngineRegistry::new();

    println!("Engines:");
    for id in registry.ids() {
        if id == BASELINE_ENGINE {
            println!("  {} (baseline, no budget)", id);
        } else {
            println!("  {}", id);
        }
    }

    Ok(())
}
