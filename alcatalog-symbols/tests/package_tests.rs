use std::io::{Cursor, Write};

use alcatalog_symbols::{MANIFEST_ENTRY, SymbolArchiveBuilder, SymbolError, SymbolPackage};
use alcatalog_types::{AttributeTag, DeclaredObject, MethodDecl, ObjectKind, ParameterDecl};
use pretty_assertions::assert_eq;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const REALISTIC_MANIFEST: &str = r#"{
  "RuntimeVersion": "3.0",
  "Namespaces": [],
  "Tables": [
    {
      "Fields": [ { "Id": 1, "Name": "No.", "TypeDefinition": { "Name": "Code" } } ],
      "Properties": [ { "Name": "DataClassification", "Value": "CustomerContent" } ],
      "Id": 18,
      "Name": "Customer"
    }
  ],
  "Codeunits": [
    {
      "Methods": [
        {
          "Attributes": [ { "Arguments": [ { "Value": "false" }, { "Value": "false" } ], "Name": "IntegrationEvent" } ],
          "Parameters": [
            { "IsVar": true, "Name": "SalesHeader", "TypeDefinition": { "Name": "Record", "Subtype": { "Name": "Sales Header", "Id": 36 } } },
            { "Name": "CommitIsSuppressed", "TypeDefinition": { "Name": "Boolean" } }
          ],
          "Id": 1,
          "Name": "OnAfterPostSalesDoc"
        },
        { "Id": 2, "Name": "Run" }
      ],
      "Id": 80,
      "Name": "Sales-Post"
    }
  ],
  "EnumTypes": [ { "Id": 1, "Name": "Sales Document Type" } ],
  "AppId": "437dbf0e-84ff-417a-965d-ed2bb9650972",
  "Name": "Base Application",
  "Publisher": "Microsoft",
  "Version": "14.0.29537.0"
}"#;

fn zip_with(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

// ── Reading ───────────────────────────────────────────────────────

#[test]
fn reads_realistic_manifest() {
    let bytes = zip_with(&[
        ("NavxManifest.xml", b"<Package />"),
        (MANIFEST_ENTRY, REALISTIC_MANIFEST.as_bytes()),
    ]);
    let pkg =
        SymbolPackage::open(Cursor::new(bytes), "/ws/.alpackages/Microsoft_Base.app").unwrap();

    assert_eq!(pkg.name, "Base Application");
    assert_eq!(pkg.publisher, "Microsoft");
    assert_eq!(pkg.version, "14.0.29537.0");
    assert_eq!(pkg.app_id.to_string(), "437dbf0e-84ff-417a-965d-ed2bb9650972");
    assert_eq!(pkg.object_count(), 3);

    let customer = pkg.find(ObjectKind::Table, 18).unwrap();
    assert_eq!(customer.name, "Customer");
    assert_eq!(customer.kind, ObjectKind::Table);

    let sales_post = pkg.find(ObjectKind::Codeunit, 80).unwrap();
    assert_eq!(sales_post.methods.len(), 2);
    let event = &sales_post.methods[0];
    assert!(event.is_event_publisher());
    assert_eq!(event.attributes[0].arguments, vec!["false".to_string(), "false".to_string()]);
    assert_eq!(
        event.parameters,
        vec![
            ParameterDecl::new("SalesHeader", "Record \"Sales Header\"").by_var(),
            ParameterDecl::new("CommitIsSuppressed", "Boolean"),
        ]
    );
    assert!(!sales_post.methods[1].is_event_publisher());

    assert_eq!(pkg.objects(ObjectKind::EnumType)[0].kind, ObjectKind::EnumType);
    assert!(pkg.objects(ObjectKind::Page).is_empty());
}

#[test]
fn reads_from_disk_and_records_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Contoso_App_1.0.0.0.app");
    SymbolArchiveBuilder::new("App", "Contoso", "1.0.0.0")
        .object(DeclaredObject::new(ObjectKind::Page, 50100, "Customer List"))
        .write_to(&path)
        .unwrap();

    let pkg = SymbolPackage::read(&path).unwrap();
    assert_eq!(pkg.path, path);
    assert_eq!(pkg.objects(ObjectKind::Page).len(), 1);
}

#[test]
fn every_collection_is_tagged_with_its_kind() {
    let mut builder = SymbolArchiveBuilder::new("All", "Contoso", "2.0.0.0");
    for (i, kind) in ObjectKind::ALL.into_iter().enumerate() {
        builder = builder.object(DeclaredObject::new(kind, 50000 + i as i64, kind.to_string()));
    }
    let bytes = builder.build().unwrap();
    let pkg = SymbolPackage::open(Cursor::new(bytes), "all.app").unwrap();

    for kind in ObjectKind::ALL {
        let objects = pkg.objects(kind);
        assert_eq!(objects.len(), 1, "{kind}");
        assert_eq!(objects[0].kind, kind);
        assert_eq!(objects[0].name, kind.to_string());
    }
}

#[test]
fn iter_objects_follows_kind_order() {
    let bytes = SymbolArchiveBuilder::new("Order", "Contoso", "1.0.0.0")
        .object(DeclaredObject::new(ObjectKind::Codeunit, 1, "C"))
        .object(DeclaredObject::new(ObjectKind::Table, 2, "T"))
        .object(DeclaredObject::new(ObjectKind::Page, 3, "P"))
        .build()
        .unwrap();
    let pkg = SymbolPackage::open(Cursor::new(bytes), "order.app").unwrap();
    let kinds: Vec<_> = pkg.iter_objects().map(|o| o.kind).collect();
    assert_eq!(kinds, vec![ObjectKind::Table, ObjectKind::Page, ObjectKind::Codeunit]);
}

#[test]
fn camel_case_manifest_is_accepted() {
    let json =
        r#"{"name":"Lower","publisher":"Contoso","version":"1.0.0.0","tables":[{"id":5,"name":"T"}]}"#;
    let pkg = SymbolPackage::from_manifest_bytes(json.as_bytes(), "lower.app").unwrap();
    assert_eq!(pkg.name, "Lower");
    assert_eq!(pkg.find(ObjectKind::Table, 5).unwrap().name, "T");
}

#[test]
fn builder_roundtrips_methods_and_parameters() {
    let codeunit = DeclaredObject::new(ObjectKind::Codeunit, 50100, "Posting").with_method(
        MethodDecl::new("OnAfterPost")
            .with_attribute(AttributeTag::new("BusinessEvent"))
            .with_parameter(ParameterDecl::new("Rec", "Record \"Sales Header\"").by_var())
            .with_parameter(ParameterDecl::new("Amount", "Decimal")),
    );
    let bytes = SymbolArchiveBuilder::new("App", "Contoso", "1.0.0.0")
        .object(codeunit.clone())
        .build()
        .unwrap();
    let pkg = SymbolPackage::open(Cursor::new(bytes), "app.app").unwrap();
    assert_eq!(pkg.find(ObjectKind::Codeunit, 50100), Some(&codeunit));
}

// ── Errors ────────────────────────────────────────────────────────

#[test]
fn missing_manifest_entry_is_read_error() {
    let bytes = zip_with(&[("NavxManifest.xml", b"<Package />")]);
    let err = SymbolPackage::open(Cursor::new(bytes), "nomanifest.app").unwrap_err();
    assert!(matches!(err, SymbolError::Read { .. }));
    assert!(err.is_missing_manifest());
    assert!(err.to_string().contains("nomanifest.app"));
}

#[test]
fn non_zip_file_is_read_error() {
    let err = SymbolPackage::open(Cursor::new(b"definitely not a zip".to_vec()), "junk.app")
        .unwrap_err();
    assert!(matches!(err, SymbolError::Read { .. }));
    assert!(!err.is_missing_manifest());
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SymbolPackage::read(dir.path().join("gone.app")).unwrap_err();
    match err {
        SymbolError::Read { path, .. } => assert!(path.ends_with("gone.app")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn malformed_json_is_format_error() {
    let bytes = zip_with(&[(MANIFEST_ENTRY, b"{ \"Tables\": [ { \"Id\": ")]);
    let err = SymbolPackage::open(Cursor::new(bytes), "broken.app").unwrap_err();
    match err {
        SymbolError::Format { path, .. } => assert_eq!(path.to_str(), Some("broken.app")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn wrong_shape_is_format_error() {
    let bytes = zip_with(&[(MANIFEST_ENTRY, br#"{"Tables": {"Id": 1}}"#)]);
    let err = SymbolPackage::open(Cursor::new(bytes), "shape.app").unwrap_err();
    assert!(matches!(err, SymbolError::Format { .. }));
}
