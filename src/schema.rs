// Table definitions shared by `vitals init` and the server's boot-time bootstrap.
// Every statement is idempotent so both can run against an existing database.

/// Append-only BMI history.
pub const BMI_RECORDS: &str = r#"
CREATE TABLE IF NOT EXISTS bmi_records (
    id          BIGSERIAL PRIMARY KEY,
    name        VARCHAR(100) NOT NULL CHECK (length(trim(name)) > 0),
    age         INTEGER NOT NULL CHECK (age BETWEEN 1 AND 150),
    gender      VARCHAR(20) NOT NULL CHECK (length(trim(gender)) > 0),
    height_cm   DOUBLE PRECISION NOT NULL CHECK (height_cm > 0),
    weight_kg   DOUBLE PRECISION NOT NULL CHECK (weight_kg > 0),
    bmi_value   DOUBLE PRECISION NOT NULL,
    category    VARCHAR(20) NOT NULL
                CHECK (category IN ('UNDERWEIGHT', 'NORMAL', 'OVERWEIGHT', 'OBESE')),
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX IF NOT EXISTS idx_bmi_records_name_created
    ON bmi_records (name, created_at DESC);
CREATE INDEX IF NOT EXISTS idx_bmi_records_created
    ON bmi_records (created_at DESC);
"#;

/// Student CRUD table.
pub const STUDENTS: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id              BIGSERIAL PRIMARY KEY,
    full_name       TEXT NOT NULL,
    course          TEXT NOT NULL,
    id_number       TEXT NOT NULL,
    department      TEXT NOT NULL,
    current_units   DOUBLE PRECISION NOT NULL CHECK (current_units >= 0)
);
"#;

/// Both tables, in one batch.
pub fn bootstrap_sql() -> String {
    format!("{BMI_RECORDS}\n{STUDENTS}")
}
