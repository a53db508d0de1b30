use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use serde::Serialize;

use vitals::{BmiRecord, StudentRecord};

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Error: failed to encode output: {e}"),
    }
}

/// Print tabular data in the requested format.
pub fn print_rows(columns: &[String], rows: &[Vec<String>], format: &OutputFormat) {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_header(columns);
            for row in rows {
                table.add_row(row);
            }
            println!("{table}");
        }
        OutputFormat::Json => {
            let json_rows: Vec<serde_json::Value> = rows
                .iter()
                .map(|row| {
                    let mut map = serde_json::Map::new();
                    for (i, col) in columns.iter().enumerate() {
                        map.insert(
                            col.clone(),
                            serde_json::Value::String(row.get(i).cloned().unwrap_or_default()),
                        );
                    }
                    serde_json::Value::Object(map)
                })
                .collect();
            print_json(&json_rows);
        }
        OutputFormat::Csv => {
            println!("{}", columns.join(","));
            for row in rows {
                let cells: Vec<String> = row.iter().map(String::as_str).map(csv_cell).collect();
                println!("{}", cells.join(","));
            }
        }
    }
}

fn csv_cell(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

/// Table layout for BMI history.
pub fn bmi_table(records: &[BmiRecord]) -> (Vec<String>, Vec<Vec<String>>) {
    let cols = columns(&[
        "id", "date", "name", "age", "gender", "height_cm", "weight_kg", "bmi", "category",
    ]);
    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.created_at.format("%Y-%m-%d %H:%M").to_string(),
                r.name.clone(),
                r.age.to_string(),
                r.gender.clone(),
                format!("{:.1}", r.height_cm),
                format!("{:.1}", r.weight_kg),
                format!("{:.2}", r.bmi_value),
                r.category.to_string(),
            ]
        })
        .collect();
    (cols, rows)
}

/// Table layout for student records.
pub fn student_table(students: &[StudentRecord]) -> (Vec<String>, Vec<Vec<String>>) {
    let cols = columns(&["id", "full_name", "id_number", "course", "department", "units"]);
    let rows = students
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.full_name.clone(),
                s.id_number.clone(),
                s.course.clone(),
                s.department.clone(),
                s.current_units.to_string(),
            ]
        })
        .collect();
    (cols, rows)
}
