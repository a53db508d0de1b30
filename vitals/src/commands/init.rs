use postgres::Client;
use std::path::Path;

use crate::output::{print_json, OutputFormat};

pub fn run(
    client: &mut Client,
    path: Option<&str>,
    db_conn: &str,
    format: &OutputFormat,
) -> Result<(), String> {
    // Resolve project path
    let project_path = match path {
        Some(p) => std::fs::canonicalize(p).map_err(|e| format!("Invalid path '{p}': {e}"))?,
        None => std::env::current_dir().map_err(|e| format!("Cannot get cwd: {e}"))?,
    };

    // Create .vitals/config.toml
    let vitals_dir = project_path.join(".vitals");
    if !vitals_dir.exists() {
        std::fs::create_dir_all(&vitals_dir)
            .map_err(|e| format!("Failed to create .vitals/: {e}"))?;
    }

    let config_path = vitals_dir.join("config.toml");
    if !config_path.exists() {
        crate::config::save_default_connection(&config_path, db_conn)?;
        println!("Created {}", config_path.display());
    }

    // Add .vitals/ to .gitignore if not already present
    add_to_gitignore(&project_path);

    crate::db::ensure_schema(client)?;

    let bmi_records = count(client, "bmi_records")?;
    let students = count(client, "students")?;

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "status": "ok",
            "config": config_path.display().to_string(),
            "bmi_records": bmi_records,
            "students": students,
        })),
        _ => println!("Tables ready ({bmi_records} BMI records, {students} students)"),
    }
    Ok(())
}

/// Row count of one of the application tables.
pub fn count(client: &mut Client, table: &str) -> Result<i64, String> {
    let row = client
        .query_one(&format!("SELECT count(*) FROM {table}"), &[])
        .map_err(|e| format!("Failed to count {table}: {e}"))?;
    Ok(row.get(0))
}

fn add_to_gitignore(project_path: &Path) {
    let gitignore = project_path.join(".gitignore");
    if gitignore.exists() {
        if let Ok(content) = std::fs::read_to_string(&gitignore) {
            if content.lines().any(|l| l.trim() == ".vitals/") {
                return;
            }
            // Append
            let suffix = if content.ends_with('\n') { "" } else { "\n" };
            let _ = std::fs::write(&gitignore, format!("{content}{suffix}.vitals/\n"));
        }
    } else {
        let _ = std::fs::write(&gitignore, ".vitals/\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gitignore_entry_added_once() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(".gitignore"), "target/").unwrap();
        add_to_gitignore(tmp.path());
        add_to_gitignore(tmp.path());
        let content = std::fs::read_to_string(tmp.path().join(".gitignore")).unwrap();
        assert_eq!(content, "target/\n.vitals/\n");
    }

    #[test]
    fn gitignore_created_when_missing() {
        let tmp = tempfile::tempdir().unwrap();
        add_to_gitignore(tmp.path());
        let content = std::fs::read_to_string(tmp.path().join(".gitignore")).unwrap();
        assert_eq!(content, ".vitals/\n");
    }
}
