use std::path::Path;

use crate::home;
use crate::output::{print_json, OutputFormat};
use crate::session::Session;

pub fn set(
    home_dir: &Path,
    name: &str,
    age: i64,
    gender: &str,
    format: &OutputFormat,
) -> Result<(), String> {
    let session = Session::new(name, age, gender)?;
    let path = home::save_session(home_dir, &session)?;
    match format {
        OutputFormat::Json => print_json(&session),
        _ => println!(
            "Current user: {} ({}, {}) saved to {}",
            session.name,
            session.age,
            session.gender,
            path.display()
        ),
    }
    Ok(())
}

pub fn show(session: Option<&Session>, format: &OutputFormat) -> Result<(), String> {
    match (session, format) {
        (Some(s), OutputFormat::Json) => print_json(s),
        (None, OutputFormat::Json) => println!("null"),
        (Some(s), _) => println!("{} (age {}, {})", s.name, s.age, s.gender),
        (None, _) => println!("No current user. Set one with `vitals user set`."),
    }
    Ok(())
}

pub fn clear(home_dir: &Path) -> Result<(), String> {
    if home::clear_session(home_dir)? {
        println!("Current user cleared.");
    } else {
        println!("No current user.");
    }
    Ok(())
}
