use postgres::Client;

use super::init::count;
use crate::output::{print_json, OutputFormat};

pub fn run(client: &mut Client, format: &OutputFormat) -> Result<(), String> {
    // Basic connectivity check
    let row = client
        .query_one("SELECT current_database()", &[])
        .map_err(|e| format!("Ping failed: {e}"))?;
    let database: String = row.get(0);

    // Table check
    let bmi_records = count(client, "bmi_records").map_err(|e| format!("{e} (run `vitals init`)"))?;
    let students = count(client, "students").map_err(|e| format!("{e} (run `vitals init`)"))?;

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "database": database,
            "bmi_records": bmi_records,
            "students": students,
        })),
        _ => println!("Connected to {database} ({bmi_records} BMI records, {students} students)"),
    }
    Ok(())
}
