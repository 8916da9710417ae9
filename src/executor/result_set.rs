use std::path::Path;

use indexmap::IndexSet;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::executor::SourceError;

/// Materialized query result: named columns and one JSON value per cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ResultSet {
    /// Fails with [`SourceError::DuplicateFieldNames`] when a column name repeats
    /// and with [`SourceError::RowWidth`] when a row does not fit the columns.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, SourceError> {
        let mut seen = IndexSet::new();
        let mut duplicates = IndexSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                duplicates.insert(column.clone());
            }
        }

        if !duplicates.is_empty() {
            return Err(SourceError::DuplicateFieldNames(duplicates.into_iter().collect()));
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(SourceError::RowWidth { row: index, expected: columns.len(), got: row.len() });
            }
        }

        Ok(Self { columns, rows })
    }

    /// Builds a result from JSON objects. Columns appear in first-seen order and
    /// keys missing from an object become `null`.
    pub fn from_objects(objects: Vec<Value>) -> Result<Self, SourceError> {
        let mut columns: IndexSet<String> = IndexSet::new();
        for (index, object) in objects.iter().enumerate() {
            match object {
                Value::Object(map) => columns.extend(map.keys().cloned()),
                _ => return Err(SourceError::InvalidRow(index)),
            }
        }

        let rows: Vec<Vec<Value>> = objects.iter()
            .filter_map(Value::as_object)
            .map(|map| columns.iter().map(|column| map.get(column).cloned().unwrap_or(Value::Null)).collect())
            .collect();

        Self::new(columns.into_iter().collect(), rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn head(&self, count: usize) -> &[Vec<Value>] {
        &self.rows[..count.min(self.rows.len())]
    }

    pub fn tail(&self, count: usize) -> &[Vec<Value>] {
        &self.rows[self.rows.len() - count.min(self.rows.len())..]
    }

    pub fn preview(&self, count: usize, from_tail: bool) -> &[Vec<Value>] {
        match from_tail {
            true => self.tail(count),
            false => self.head(count),
        }
    }

    pub fn to_objects(&self) -> Vec<Value> {
        self.rows.iter()
            .map(|row| {
                let map: Map<String, Value> = self.columns.iter().cloned().zip(row.iter().cloned()).collect();
                Value::Object(map)
            })
            .collect()
    }

    /// Text of a cell as written to CSV: `null` is empty, strings are unquoted.
    pub fn cell_text(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(Self::cell_text))?;
        }
        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::{json, Value};

    use crate::executor::{ResultSet, SourceError};

    fn people() -> ResultSet {
        ResultSet::from_objects(vec![
            json!({ "id": 1, "full_name": "Alice Johnson", "city": "Porto" }),
            json!({ "id": 2, "full_name": "Bruno Martins", "city": "Lisboa" }),
            json!({ "id": 3, "full_name": "Carla Sousa", "vip": true }),
        ])
        .expect("Failed to build result set")
    }

    #[test]
    pub fn test_duplicate_columns_rejected() {
        let result = ResultSet::new(
            vec!["Name_".into(), "Id".into(), "Name_".into()],
            vec![vec![json!("a"), json!(1), json!("b")]],
        );

        match result {
            Err(SourceError::DuplicateFieldNames(names)) => assert_eq!(names, vec!["Name_"]),
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_row_width_checked() {
        let result = ResultSet::new(vec!["a".into(), "b".into()], vec![vec![json!(1)]]);

        assert_eq!(result, Err(SourceError::RowWidth { row: 0, expected: 2, got: 1 }));
    }

    #[test]
    pub fn test_from_objects_columns_in_first_seen_order() {
        let result = people();

        assert_eq!(result.columns(), ["id", "full_name", "city", "vip"]);
        assert_eq!(result.rows()[2], vec![json!(3), json!("Carla Sousa"), Value::Null, json!(true)]);
        assert_eq!(result.len(), 3);
    }

    #[test]
    pub fn test_from_objects_rejects_non_objects() {
        let result = ResultSet::from_objects(vec![json!({ "a": 1 }), json!([1, 2])]);

        assert_eq!(result, Err(SourceError::InvalidRow(1)));
    }

    #[test]
    pub fn test_head_and_tail() {
        let result = people();

        assert_eq!(result.head(2).len(), 2);
        assert_eq!(result.head(2)[0][0], json!(1));
        assert_eq!(result.tail(2)[0][0], json!(2));
        assert_eq!(result.tail(10).len(), 3);
        assert_eq!(result.preview(1, true)[0][0], json!(3));
    }

    #[test]
    pub fn test_to_objects_keeps_column_order() {
        let objects = ResultSet::new(vec!["b".into(), "a".into()], vec![vec![json!(1), json!(2)]])
            .expect("Failed to build result set")
            .to_objects();

        assert_eq!(objects, vec![json!({ "b": 1, "a": 2 })]);
        let keys: Vec<&String> = objects[0].as_object().expect("Row is not an object").keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    pub fn test_write_csv() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("people.csv");

        people().write_csv(&file_path).expect("Failed to write csv");

        let content = fs::read_to_string(&file_path).expect("Failed to read csv");
        assert_eq!(content, "id,full_name,city,vip\n1,Alice Johnson,Porto,\n2,Bruno Martins,Lisboa,\n3,Carla Sousa,,true\n");
    }

    #[test]
    pub fn test_empty() {
        let result = ResultSet::from_objects(vec![]).expect("Failed to build result set");

        assert!(result.is_empty());
        assert!(result.columns().is_empty());
        assert!(result.head(5).is_empty());
    }
}
