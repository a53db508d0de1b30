use postgres::NoTls;

use crate::config;
use crate::output::{print_json, OutputFormat};

pub fn run(connection: &str, format: &OutputFormat) -> Result<(), String> {
    // Test the connection
    let mut client =
        postgres::Client::connect(connection, NoTls).map_err(|e| format!("Connection failed: {e}"))?;

    // Quick sanity check
    client
        .simple_query("SELECT 1")
        .map_err(|e| format!("Connection test failed: {e}"))?;

    let path = config::global_config_path().ok_or("could not determine config directory")?;
    config::save_default_connection(&path, connection)?;

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "status": "ok",
            "connection": connection,
            "config": path.display().to_string(),
        })),
        _ => {
            println!("Connection saved to {}", path.display());
            println!("Connected to {connection}");
        }
    }
    Ok(())
}
