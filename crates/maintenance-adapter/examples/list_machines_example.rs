/*
[INPUT]:  Backend base URL (first CLI argument, optional)
[OUTPUT]: Machines and their tasks printed to stdout
[POS]:    Examples - read-only tour of the maintenance API
[UPDATE]: When adding new read endpoints
*/

use maintenance_adapter::*;

/// Example: list machines and the tasks scheduled against each one
#[tokio::main]
async fn main() {
    println!("=== Maintenance API Example ===\n");

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let client = match MaintenanceClient::with_config_and_base_url(
        ClientConfig::default(),
        &base_url,
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created for {}\n", client.base_url());

    match client.health().await {
        Ok(health) => println!("✓ Health: {}", health.status),
        Err(e) => println!("✗ Health check failed: {}", e),
    }

    let machines = match client.list_machines().await {
        Ok(machines) => machines,
        Err(e) => {
            println!("✗ Error listing machines: {}", e);
            return;
        }
    };
    println!("✓ {} machine(s)\n", machines.len());

    for machine in &machines {
        println!(
            "{} [{}] {}",
            machine.name,
            machine.location.as_deref().unwrap_or("No location"),
            if machine.is_active { "Active" } else { "Inactive" }
        );
        match client.list_tasks(&TaskQuery::for_machine(&machine.id)).await {
            Ok(tasks) if tasks.is_empty() => println!("  (no tasks)"),
            Ok(tasks) => {
                for task in tasks {
                    println!("  - {} due {} ({})", task.title, task.due_date, task.status);
                }
            }
            Err(e) => println!("  ✗ Error listing tasks: {}", e),
        }
    }

    println!("\n✓ Example complete");
}
