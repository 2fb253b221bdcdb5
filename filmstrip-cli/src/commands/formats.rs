//! The `formats` command: lists available output formats with their
//! configurable properties and defaults.

use filmstrip_core::FormatId;
use filmstrip_core::error::CoreResult;

pub fn execute_formats() -> CoreResult<()> {
    for id in FormatId::ALL {
        let strategy = id.strategy();
        println!("{id:<10} {}", strategy.name());
        for property in strategy.properties() {
            println!(
                "           {property} (default: {})",
                strategy.default_property(property)
            );
        }
    }
    Ok(())
}
