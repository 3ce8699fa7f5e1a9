mod common;

use alcatalog_discovery::{AlHeaderParser, DiscoveryConfig, PathScanner, load_project};
use common::{CUSTOMER_TABLE, write_file, write_project};
use pretty_assertions::assert_eq;

#[test]
fn nested_project_files_are_not_loaded_by_the_outer_project() {
    let ws = tempfile::tempdir().unwrap();
    write_project(ws.path(), "outer", "Outer", "Contoso");
    write_project(ws.path(), "outer/modules/inner", "Inner", "Contoso");
    write_file(ws.path(), "outer/src/A.Table.al", "table 1 A\n{\n}\n");
    write_file(ws.path(), "outer/modules/inner/src/B.Table.al", "table 2 B\n{\n}\n");

    let config = DiscoveryConfig::default();
    let scan = PathScanner::new(&config).scan(&[ws.path()]);
    let outer = scan.projects.iter().find(|p| p.name == "Outer").unwrap();
    let inner = scan.projects.iter().find(|p| p.name == "Inner").unwrap();

    let (outer_objects, warnings) = load_project(outer, &scan, &AlHeaderParser);
    assert!(warnings.is_empty());
    let rows: Vec<_> = outer_objects
        .iter()
        .map(|o| (o.object.id, o.application.as_str()))
        .collect();
    assert_eq!(rows, vec![(1, "Outer")]);

    let (inner_objects, _) = load_project(inner, &scan, &AlHeaderParser);
    let rows: Vec<_> = inner_objects
        .iter()
        .map(|o| (o.object.id, o.application.as_str()))
        .collect();
    assert_eq!(rows, vec![(2, "Inner")]);
}

#[test]
fn broken_file_is_reported_and_the_rest_load() {
    let ws = tempfile::tempdir().unwrap();
    write_project(ws.path(), "app", "My App", "Contoso");
    let good = write_file(ws.path(), "app/src/Customer.Table.al", CUSTOMER_TABLE);
    let bad = write_file(
        ws.path(),
        "app/src/Broken.Codeunit.al",
        "codeunit 1 Broken\n{\n    procedure Open(a: Integer;\n",
    );

    let config = DiscoveryConfig::default();
    let scan = PathScanner::new(&config).scan(&[ws.path()]);
    let (objects, warnings) = load_project(&scan.projects[0], &scan, &AlHeaderParser);

    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].object.name, "Customer");
    assert_eq!(objects[0].publisher, "Contoso");
    assert_eq!(objects[0].file, good);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].path, bad);
}

#[test]
fn files_without_objects_are_not_errors() {
    let ws = tempfile::tempdir().unwrap();
    write_project(ws.path(), "app", "My App", "Contoso");
    write_file(ws.path(), "app/src/Notes.al", "// nothing declared here\n");

    let config = DiscoveryConfig::default();
    let scan = PathScanner::new(&config).scan(&[ws.path()]);
    let (objects, warnings) = load_project(&scan.projects[0], &scan, &AlHeaderParser);

    assert!(objects.is_empty());
    assert!(warnings.is_empty());
}
