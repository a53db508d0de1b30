use vitals::{StudentInput, StudentRecord};

use crate::client::ApiClient;
use crate::output::{print_json, print_rows, student_table, OutputFormat};

fn print_one(student: &StudentRecord, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(student),
        _ => {
            let (columns, rows) = student_table(std::slice::from_ref(student));
            print_rows(&columns, &rows, format);
        }
    }
}

pub fn list(api: &ApiClient, format: &OutputFormat) -> Result<(), String> {
    let students = api.students()?;
    if students.is_empty() {
        println!("No students found.");
        return Ok(());
    }
    let (columns, rows) = student_table(&students);
    print_rows(&columns, &rows, format);
    Ok(())
}

pub fn show(api: &ApiClient, id: i64, format: &OutputFormat) -> Result<(), String> {
    let student = api.student(id)?;
    print_one(&student, format);
    Ok(())
}

pub fn add(api: &ApiClient, input: &StudentInput, format: &OutputFormat) -> Result<(), String> {
    input.validate().map_err(|e| e.to_string())?;
    let student = api.create_student(input)?;
    print_one(&student, format);
    Ok(())
}

/// Fields left out keep their current values.
pub fn update(
    api: &ApiClient,
    id: i64,
    changes: StudentInput,
    format: &OutputFormat,
) -> Result<(), String> {
    let current = api.student(id)?;
    let merged = StudentInput {
        full_name: changes.full_name.or(Some(current.full_name)),
        course: changes.course.or(Some(current.course)),
        id_number: changes.id_number.or(Some(current.id_number)),
        department: changes.department.or(Some(current.department)),
        current_units: changes.current_units.or(Some(current.current_units)),
    };
    merged.validate().map_err(|e| e.to_string())?;
    let student = api.update_student(id, &merged)?;
    print_one(&student, format);
    Ok(())
}

pub fn remove(api: &ApiClient, id: i64) -> Result<(), String> {
    let id = api.delete_student(id)?;
    println!("Deleted student {id}");
    Ok(())
}
