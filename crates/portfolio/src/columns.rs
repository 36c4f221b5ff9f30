use crate::ColumnSchema;
use folio_types::{ColumnConfig, Row};
use indexmap::IndexSet;

/// One column per distinct key across `rows`, in first-appearance order.
/// Visibility and formatting kind come from the schema.
pub fn build_column_configs(rows: &[Row], schema: &ColumnSchema) -> Vec<ColumnConfig> {
    let keys: IndexSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    keys.into_iter()
        .map(|key| ColumnConfig::new(key, schema.is_default_visible(key), schema.kind_for(key)))
        .collect()
}

/// Flips the visibility of the column with `key`. Returns the new visibility,
/// or `None` if no such column exists.
pub fn toggle_column(columns: &mut [ColumnConfig], key: &str) -> Option<bool> {
    let column = columns.iter_mut().find(|column| column.key == key)?;
    column.visible = !column.visible;
    Some(column.visible)
}

pub fn visible_columns(columns: &[ColumnConfig]) -> Vec<&ColumnConfig> {
    columns.iter().filter(|column| column.visible).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::{CellValue, ColumnKind};
    use pretty_assertions::assert_eq;

    fn row(keys: &[&str]) -> Row {
        keys.iter()
            .map(|k| (k.to_string(), CellValue::text("x")))
            .collect()
    }

    #[test]
    fn first_row_order_then_new_keys() {
        let rows = vec![
            row(&["Loan Account", "Notes", "Loan Balance"]),
            row(&["Loan Balance", "Percent Owned", "Loan Account"]),
        ];
        let columns = build_column_configs(&rows, &ColumnSchema::default());

        let keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["Loan Account", "Notes", "Loan Balance", "Percent Owned"]);

        let visible: Vec<&str> = visible_columns(&columns).iter().map(|c| c.key.as_str()).collect();
        assert_eq!(visible, ["Loan Account", "Loan Balance"]);

        assert_eq!(columns[2].kind, ColumnKind::Currency);
        assert_eq!(columns[3].kind, ColumnKind::Percent);
        assert_eq!(columns[1].label, "Notes");
    }

    #[test]
    fn empty_rows_give_no_columns() {
        assert!(build_column_configs(&[], &ColumnSchema::default()).is_empty());
    }

    #[test]
    fn toggling_flips_visibility() {
        let mut columns = build_column_configs(&[row(&["Notes"])], &ColumnSchema::default());
        assert_eq!(toggle_column(&mut columns, "Notes"), Some(true));
        assert_eq!(toggle_column(&mut columns, "Notes"), Some(false));
        assert_eq!(toggle_column(&mut columns, "Missing"), None);
    }
}
