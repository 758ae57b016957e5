//! Schema Provider - renders database structure for the generation prompt.
//!
//! The description is a pure function of database state: one header line per
//! table, then one indented line per column with its declared type and
//! primary-key / nullability markers. The format is stable so repeated calls
//! against an unchanged schema produce identical text.

use crate::database::DatabaseService;
use crate::error::DatabaseError;

/// Enumerate every visible table and render a human-readable description.
///
/// Connection failures propagate unmodified; there is no retry here.
pub async fn describe_schema(db: &dyn DatabaseService) -> Result<String, DatabaseError> {
    let tables = db.list_tables().await?;
    let mut schema_info = Vec::new();

    for table in &tables {
        schema_info.push(format!("\nTable: {}", table));

        for column in db.describe_table(table).await? {
            let pk = if column.primary_key { " PRIMARY KEY" } else { "" };
            let null = if column.nullable { " NULL" } else { "" };
            schema_info.push(format!(
                "  - {} ({}){}{}",
                column.field, column.column_type, pk, null
            ));
        }
    }

    Ok(schema_info.join("\n"))
}
