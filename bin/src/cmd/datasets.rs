//! Dataset listing command implementation.

use anyhow::Result;
use marasi_pulse::available_datasets;

/// List the registered datasets, optionally with their field mappings.
pub(crate) fn list_datasets(verbose: bool) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Available Datasets                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for info in available_datasets() {
        if verbose {
            println!("{}", info.name);
            println!("{}", "-".repeat(60));
            println!("  description:  {}", info.description);
            println!("  resource:     {}", info.resource);
            println!("  period field: {}", info.period_field);
            println!("  value field:  {}", info.value_field);
            if let Some(group) = info.group_field {
                println!("  group field:  {}", group);
            }
            println!("  aggregation:  {}", info.aggregation.as_str());
            println!();
        } else {
            println!("  {:16} - {}", info.name, info.description);
        }
    }

    if !verbose {
        println!("\nUse --verbose for field mappings and aggregations.\n");
    }

    Ok(())
}
