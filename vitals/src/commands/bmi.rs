use vitals::record::check_measurements;
use vitals::{evaluate, Category, Evaluation};

use crate::client::ApiClient;
use crate::output::{bmi_table, print_json, print_rows, OutputFormat};
use crate::session::Session;

/// Evaluate locally with the same function the server persists with.
pub fn preview(
    session: Option<&Session>,
    height_cm: f64,
    weight_kg: f64,
    format: &OutputFormat,
) -> Result<(), String> {
    let (height_cm, weight_kg) =
        check_measurements(Some(height_cm), Some(weight_kg)).map_err(|e| e.to_string())?;
    let eval = evaluate(height_cm, weight_kg);
    print_evaluation(session, &eval, None, format);
    Ok(())
}

/// Send a measurement to the server, attributed to the current user.
pub fn save(
    api: &ApiClient,
    session: &Session,
    height_cm: f64,
    weight_kg: f64,
    format: &OutputFormat,
) -> Result<(), String> {
    let request = session.request(height_cm, weight_kg);
    // Catch bad input before the round trip; the server re-checks anyway.
    request.validate().map_err(|e| e.to_string())?;

    let resp = api.calculate(&request)?;
    let eval = Evaluation {
        bmi: resp.bmi,
        category: resp.category,
    };
    print_evaluation(Some(session), &eval, Some(resp.record_id), format);
    Ok(())
}

fn print_evaluation(
    session: Option<&Session>,
    eval: &Evaluation,
    record_id: Option<i64>,
    format: &OutputFormat,
) {
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "user": session,
            "bmi": eval.bmi,
            "category": eval.category,
            "recordId": record_id,
        })),
        _ => {
            if let Some(s) = session {
                println!("{} (age {}, {})", s.name, s.age, s.gender);
            }
            println!("BMI {:.2}: {} ({})", eval.bmi, eval.category, eval.category.range());
            if let Some(id) = record_id {
                println!("Saved as record #{id}");
            }
        }
    }
}

pub fn history(api: &ApiClient, name: &str, format: &OutputFormat) -> Result<(), String> {
    let records = api.history(name)?;
    if records.is_empty() {
        println!("No BMI history for {name}.");
        return Ok(());
    }
    let (columns, rows) = bmi_table(&records);
    print_rows(&columns, &rows, format);
    Ok(())
}

pub fn records(api: &ApiClient, format: &OutputFormat) -> Result<(), String> {
    let records = api.records()?;
    if records.is_empty() {
        println!("No BMI records.");
        return Ok(());
    }
    let (columns, rows) = bmi_table(&records);
    print_rows(&columns, &rows, format);
    Ok(())
}

pub fn show(api: &ApiClient, id: i64, format: &OutputFormat) -> Result<(), String> {
    let record = api.record(id)?.ok_or_else(|| format!("BMI record {id} not found"))?;
    match format {
        OutputFormat::Json => print_json(&record),
        _ => {
            let (columns, rows) = bmi_table(std::slice::from_ref(&record));
            print_rows(&columns, &rows, format);
        }
    }
    Ok(())
}

/// Print the category ranges.
pub fn legend(format: &OutputFormat) -> Result<(), String> {
    let columns = vec!["category".to_string(), "bmi".to_string()];
    let rows: Vec<Vec<String>> = Category::ALL
        .iter()
        .map(|c| vec![c.to_string(), c.range().to_string()])
        .collect();
    print_rows(&columns, &rows, format);
    Ok(())
}
