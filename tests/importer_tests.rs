// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneylens::{cli, commands::importer, db};
use rusqlite::Connection;
use std::io::Write;
use tempfile::NamedTempFile;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

fn stored(conn: &Connection) -> Vec<(String, i64, String, String)> {
    let mut stmt = conn
        .prepare("SELECT amount, category, date, description FROM transactions ORDER BY id")
        .unwrap();
    stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)))
        .unwrap()
        .map(|r| r.unwrap())
        .collect()
}

#[test]
fn importer_trims_cli_path_argument() {
    let mut conn = base_conn();
    let file = csv_file("amount,category,date,description\n12.50,1,2025-02-03,Milk\n");
    let padded = format!("  {}  ", file.path().display());

    let matches = cli::build_cli().get_matches_from(vec![
        "moneylens".to_string(),
        "import".to_string(),
        "transactions".to_string(),
        "--path".to_string(),
        padded,
    ]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(&mut conn, import_m).unwrap();
    } else {
        panic!("no import subcommand");
    }
    assert_eq!(
        stored(&conn),
        vec![("12.50".to_string(), 1, "2025-02-03".to_string(), "Milk".to_string())]
    );
}

#[test]
fn bad_rows_are_skipped_with_row_numbers() {
    let mut conn = base_conn();
    let file = csv_file(
        "date,amount,category\n\
         2025-02-03,10,1\n\
         2025-02-04,ten,1\n\
         2025-02-05,10,food\n\
         soon,10,2\n\
         2025-02-06,7.25,3\n",
    );
    let summary = importer::import_transactions(&mut conn, file.path().to_str().unwrap()).unwrap();
    assert_eq!(summary.imported, 2);
    assert_eq!(
        summary.skipped,
        vec![
            "Row 3: Invalid data - amount 'ten'".to_string(),
            "Row 4: Invalid data - category 'food'".to_string(),
            "Row 5: Invalid date format 'soon'".to_string(),
        ]
    );
    let rows = stored(&conn);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].0, "7.25");
    assert_eq!(rows[1].3, "");
}

#[test]
fn headers_are_case_insensitive_and_dates_normalized() {
    let mut conn = base_conn();
    let file = csv_file("Amount, Category ,DATE,Description\n5,2,04/11/2025,Movie\n");
    let summary = importer::import_transactions(&mut conn, file.path().to_str().unwrap()).unwrap();
    assert_eq!(summary.imported, 1);
    assert!(summary.skipped.is_empty());
    assert_eq!(stored(&conn)[0].2, "2025-04-11");
}

#[test]
fn missing_required_column_is_an_error() {
    let mut conn = base_conn();
    let file = csv_file("amount,date\n5,2025-04-11\n");
    let err = importer::import_transactions(&mut conn, file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("missing: category"), "{}", err);
    assert!(stored(&conn).is_empty());
}

#[test]
fn missing_file_is_an_error() {
    let mut conn = base_conn();
    assert!(importer::import_transactions(&mut conn, "/nonexistent/moneylens.csv").is_err());
}
