use anyhow::Result;
use std::path::Path;

use patchbay_core::{RecipeRegistry, SourceDirectory};

pub fn list_command(dir: Option<&Path>) -> Result<()> {
    if let Some(dir) = dir {
        for name in SourceDirectory::new(dir).names()? {
            println!("{name}");
        }
        return Ok(());
    }

    let registry = RecipeRegistry::with_builtins();
    for descriptor in registry.descriptors() {
        let title = descriptor
            .constructor()
            .and_then(|c| c.doc.as_deref())
            .and_then(|doc| doc.lines().next())
            .unwrap_or("");
        println!(
            "{:<20} {:<10} {:<15} {}",
            descriptor.name,
            descriptor.input_policy,
            descriptor.calling_convention(),
            title
        );
    }
    Ok(())
}
