use postgres::{Client, NoTls};

use crate::config::Profile;

/// Resolve the connection string. `db_override` (from --db flag) takes highest
/// priority, then the profile's connection string.
pub fn connection_string(profile: &Profile, db_override: Option<&str>) -> Result<String, String> {
    db_override
        .or(profile.connection.as_deref())
        .map(str::to_string)
        .ok_or_else(|| "No connection string. Use --db or set one in .vitals/config.toml".into())
}

/// Connect to Postgres.
pub fn connect(profile: &Profile, db_override: Option<&str>) -> Result<Client, String> {
    let conn_str = connection_string(profile, db_override)?;
    Client::connect(&conn_str, NoTls).map_err(|e| format!("Connection failed: {e}"))
}

/// Create the application tables if they are missing.
pub fn ensure_schema(client: &mut Client) -> Result<(), String> {
    client
        .batch_execute(&vitals::schema::bootstrap_sql())
        .map_err(|e| format!("Failed to create tables: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_profile() {
        let p = Profile {
            connection: Some("postgres://profile/vitals".into()),
            server: None,
        };
        assert_eq!(
            connection_string(&p, Some("postgres://flag/vitals")).unwrap(),
            "postgres://flag/vitals"
        );
        assert_eq!(connection_string(&p, None).unwrap(), "postgres://profile/vitals");
        assert!(connection_string(&Profile::default(), None).is_err());
    }
}
