//! The `check` command: runs the dependency probe for every format.
//!
//! Missing tools are advisory, so this command reports them without
//! failing; callers decide whether a format is usable.

use filmstrip_core::FormatId;
use filmstrip_core::error::CoreResult;

pub fn execute_check() -> CoreResult<()> {
    for id in FormatId::ALL {
        let strategy = id.strategy();
        let missing = strategy.check_dependencies();
        if missing.is_empty() {
            println!("{:<24} ready", strategy.name());
        } else {
            for message in missing {
                println!("{:<24} MISSING: {message}", strategy.name());
            }
        }
    }
    Ok(())
}
