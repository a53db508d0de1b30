//! SQL for the two tables. BMI rows are insert-and-read only; students get
//! full CRUD.

use tokio_postgres::{Client, Row};
use vitals::schema;
use vitals::{BmiRecord, Error, NewBmiRecord, Result, StudentFields, StudentRecord};

const BMI_COLUMNS: &str =
    "id, name, age, gender, height_cm, weight_kg, bmi_value, category, created_at";

/// Newest first; rows inserted in the same instant fall back to insertion order.
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, id DESC";

const STUDENT_COLUMNS: &str = "id, full_name, course, id_number, department, current_units";

fn db_err(e: tokio_postgres::Error) -> Error {
    Error::persistence(e.to_string())
}

fn bmi_from_row(row: &Row) -> Result<BmiRecord> {
    let category: String = row.try_get("category").map_err(db_err)?;
    Ok(BmiRecord {
        id: row.try_get("id").map_err(db_err)?,
        name: row.try_get("name").map_err(db_err)?,
        age: row.try_get("age").map_err(db_err)?,
        gender: row.try_get("gender").map_err(db_err)?,
        height_cm: row.try_get("height_cm").map_err(db_err)?,
        weight_kg: row.try_get("weight_kg").map_err(db_err)?,
        bmi_value: row.try_get("bmi_value").map_err(db_err)?,
        category: category.parse().map_err(Error::Persistence)?,
        created_at: row.try_get("created_at").map_err(db_err)?,
    })
}

fn student_from_row(row: &Row) -> Result<StudentRecord> {
    Ok(StudentRecord {
        id: row.try_get("id").map_err(db_err)?,
        full_name: row.try_get("full_name").map_err(db_err)?,
        course: row.try_get("course").map_err(db_err)?,
        id_number: row.try_get("id_number").map_err(db_err)?,
        department: row.try_get("department").map_err(db_err)?,
        current_units: row.try_get("current_units").map_err(db_err)?,
    })
}

/// Create both tables if they are missing.
pub async fn bootstrap(client: &Client) -> Result<()> {
    client
        .batch_execute(&schema::bootstrap_sql())
        .await
        .map_err(db_err)
}

/// Append a BMI row and return its generated id.
pub async fn insert_bmi(client: &Client, rec: &NewBmiRecord) -> Result<i64> {
    let category = rec.evaluation.category.as_str();
    let row = client
        .query_one(
            "INSERT INTO bmi_records \
             (name, age, gender, height_cm, weight_kg, bmi_value, category) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
            &[
                &rec.name,
                &rec.age,
                &rec.gender,
                &rec.height_cm,
                &rec.weight_kg,
                &rec.evaluation.bmi,
                &category,
            ],
        )
        .await
        .map_err(db_err)?;
    row.try_get(0).map_err(db_err)
}

pub async fn bmi_by_id(client: &Client, id: i64) -> Result<Option<BmiRecord>> {
    let sql = format!("SELECT {BMI_COLUMNS} FROM bmi_records WHERE id = $1");
    let row = client.query_opt(&sql, &[&id]).await.map_err(db_err)?;
    row.as_ref().map(bmi_from_row).transpose()
}

fn all_bmi_sql() -> String {
    format!("SELECT {BMI_COLUMNS} FROM bmi_records {NEWEST_FIRST}")
}

fn bmi_by_name_sql() -> String {
    format!("SELECT {BMI_COLUMNS} FROM bmi_records WHERE name = $1 {NEWEST_FIRST}")
}

/// Every BMI row, newest first.
pub async fn all_bmi(client: &Client) -> Result<Vec<BmiRecord>> {
    let rows = client.query(&all_bmi_sql(), &[]).await.map_err(db_err)?;
    rows.iter().map(bmi_from_row).collect()
}

/// One person's BMI history, newest first.
pub async fn bmi_by_name(client: &Client, name: &str) -> Result<Vec<BmiRecord>> {
    let rows = client
        .query(&bmi_by_name_sql(), &[&name])
        .await
        .map_err(db_err)?;
    rows.iter().map(bmi_from_row).collect()
}

pub async fn list_students(client: &Client) -> Result<Vec<StudentRecord>> {
    let sql = format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY id");
    let rows = client.query(&sql, &[]).await.map_err(db_err)?;
    rows.iter().map(student_from_row).collect()
}

pub async fn get_student(client: &Client, id: i64) -> Result<Option<StudentRecord>> {
    let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1");
    let row = client.query_opt(&sql, &[&id]).await.map_err(db_err)?;
    row.as_ref().map(student_from_row).transpose()
}

pub async fn insert_student(client: &Client, fields: StudentFields) -> Result<StudentRecord> {
    let row = client
        .query_one(
            "INSERT INTO students (full_name, course, id_number, department, current_units) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
            &[
                &fields.full_name,
                &fields.course,
                &fields.id_number,
                &fields.department,
                &fields.current_units,
            ],
        )
        .await
        .map_err(db_err)?;
    let id: i64 = row.try_get(0).map_err(db_err)?;
    Ok(fields.into_record(id))
}

/// Replace every field of a student. `None` when the id does not exist.
pub async fn update_student(
    client: &Client,
    id: i64,
    fields: StudentFields,
) -> Result<Option<StudentRecord>> {
    let updated = client
        .execute(
            "UPDATE students SET full_name = $2, course = $3, id_number = $4, \
             department = $5, current_units = $6 WHERE id = $1",
            &[
                &id,
                &fields.full_name,
                &fields.course,
                &fields.id_number,
                &fields.department,
                &fields.current_units,
            ],
        )
        .await
        .map_err(db_err)?;
    Ok((updated > 0).then(|| fields.into_record(id)))
}

/// Returns whether a row was removed.
pub async fn delete_student(client: &Client, id: i64) -> Result<bool> {
    let deleted = client
        .execute("DELETE FROM students WHERE id = $1", &[&id])
        .await
        .map_err(db_err)?;
    Ok(deleted > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals::BmiRequest;

    #[test]
    fn bmi_reads_are_newest_first_with_id_tiebreak() {
        for sql in [all_bmi_sql(), bmi_by_name_sql()] {
            assert!(
                sql.ends_with("ORDER BY created_at DESC, id DESC"),
                "unexpected ordering: {sql}"
            );
        }
        assert!(bmi_by_name_sql().contains("WHERE name = $1"));
    }

    /// Runs against a real database only when `VITALS_TEST_DATABASE_URL` is set.
    #[tokio::test]
    async fn history_orders_by_time_then_id() {
        let Ok(url) = std::env::var("VITALS_TEST_DATABASE_URL") else {
            return;
        };
        let (client, connection) = tokio_postgres::connect(&url, tokio_postgres::NoTls)
            .await
            .unwrap();
        tokio::spawn(connection);
        bootstrap(&client).await.unwrap();

        let name = format!(
            "order-test-{}",
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        );
        let rec = BmiRequest {
            name: Some(name.clone()),
            age: Some(30),
            gender: Some("Female".into()),
            height: Some(160.0),
            weight: Some(50.0),
        }
        .validate()
        .unwrap();

        let first = insert_bmi(&client, &rec).await.unwrap();
        let second = insert_bmi(&client, &rec).await.unwrap();
        let third = insert_bmi(&client, &rec).await.unwrap();

        // `first` is newest; `second` and `third` share a timestamp.
        client
            .execute(
                "UPDATE bmi_records SET created_at = CASE WHEN id = $2 \
                 THEN TIMESTAMPTZ '2024-01-02 00:00:00+00' \
                 ELSE TIMESTAMPTZ '2024-01-01 00:00:00+00' END WHERE name = $1",
                &[&name, &first],
            )
            .await
            .unwrap();

        let ids: Vec<i64> = bmi_by_name(&client, &name)
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();

        client
            .execute("DELETE FROM bmi_records WHERE name = $1", &[&name])
            .await
            .unwrap();

        assert_eq!(ids, vec![first, third, second]);
    }
}
