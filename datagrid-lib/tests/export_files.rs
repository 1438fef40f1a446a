use std::fs;
use std::num::NonZeroUsize;

use datagrid_lib::column::{Column, ColumnModel};
use datagrid_lib::export::{CsvWriter, JsonWriter, TableWriter};
use datagrid_lib::model::{Record, Value};
use datagrid_lib::selection::RowIdentity;
use datagrid_lib::{DataTable, TableConfig};

fn records() -> Vec<Record> {
    serde_json::from_str(
        r#"[
            {"firstName": "Tanner", "lastName": "Linsley", "age": 33, "status": "single"},
            {"firstName": "Kevin", "lastName": "Vandy", "age": 27, "status": "complicated"},
            {"firstName": "Ada", "lastName": "Lovelace", "age": 36, "status": null}
        ]"#,
    )
    .unwrap()
}

fn table() -> DataTable<Record> {
    let columns = ColumnModel::new(vec![
        Column::field("firstName", "First Name"),
        Column::field("age", "Age"),
        Column::new("fullName", "Full Name").text(|r: &Record| {
            let first = r.get_string("firstName")?;
            let last = r.get_string("lastName")?;
            Some(Value::from(format!("{first} {last}")))
        }),
        Column::field("status", "Status").hidden(),
    ])
    .unwrap();
    let page_size = NonZeroUsize::new(5).unwrap();
    DataTable::new(columns, RowIdentity::field("firstName"), page_size)
}

#[test]
fn test_csv_export_to_dir() {
    let dir = tempfile::tempdir().unwrap();
    let records = records();
    let mut table = table();
    table.toggle_sort("age").unwrap();

    let job = table.export(&records, "Class/Event");
    let path = CsvWriter::new().write_to_dir(&job, dir.path()).unwrap();

    assert_eq!(path.file_name().unwrap(), "Class_Event_EXPORT.csv");
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "First Name,Age,Full Name\n\
         Kevin,27,Kevin Vandy\n\
         Tanner,33,Tanner Linsley\n\
         Ada,36,Ada Lovelace\n"
    );
}

#[test]
fn test_json_export_to_dir() {
    let dir = tempfile::tempdir().unwrap();
    let records = records();
    let mut table = table();
    table.set_column_visible("status", true).unwrap();
    table.set_column_visible("fullName", false).unwrap();

    let job = table.export(&records, "People");
    let path = JsonWriter::new().write_to_dir(&job, dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "People_EXPORT.json");

    let text = fs::read_to_string(&path).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        rows,
        serde_json::json!([
            ["First Name", "Age", "Status"],
            ["Tanner", 33, "single"],
            ["Kevin", 27, "complicated"],
            ["Ada", 36, null]
        ])
    );
}

#[test]
fn test_config_driven_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.toml");
    fs::write(
        &path,
        r#"
        title = "Roster"
        page_size = 2
        id_fields = ["firstName", "lastName"]

        [[columns]]
        field = "firstName"
        header = "First Name"

        [[columns]]
        field = "age"
        "#,
    )
    .unwrap();

    let config = TableConfig::load(&path).unwrap();
    let identity = config.row_identity().unwrap();
    let mut table = DataTable::from_config(&config, identity).unwrap();

    let records = records();
    table.dataset_changed(records.len());
    assert!(table.next_page());

    let view = table.view(&records);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.padding_rows, 1);
    assert_eq!(config.padding_height(view.padding_rows), 33);

    let job = table.export(&records, &config.title);
    assert_eq!(job.grid.header, vec!["First Name", "age"]);
    assert_eq!(job.file_name("csv"), "Roster_EXPORT.csv");
}
