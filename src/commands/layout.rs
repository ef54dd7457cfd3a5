//! Layout command - print the planned paths without touching the disk

use anyhow::Result;

use bindkit::Layout;

use crate::cli::ModuleArgs;

pub fn cmd_layout(module: &ModuleArgs, json: bool) -> Result<()> {
    let layout = Layout::plan(&module.descriptor_without_source()?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!("module:         {}", layout.module_name());
    println!("native module:  {}", layout.native_module_name());
    println!("init function:  {}", layout.init_function_name());
    println!("build root:     {}", layout.build_root().display());
    for (role, path) in layout.files() {
        println!("{:<20}{}", format!("{}:", role), path.display());
    }
    Ok(())
}
