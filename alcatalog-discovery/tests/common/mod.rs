//! Shared helpers for building on-disk workspaces.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use alcatalog_symbols::SymbolArchiveBuilder;
use alcatalog_types::{AttributeTag, DeclaredObject, MethodDecl, ObjectKind, ParameterDecl};

/// Writes `contents` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

/// Writes an `app.json` for a project in `root/dir`.
pub fn write_project(root: &Path, dir: &str, name: &str, publisher: &str) -> PathBuf {
    let json = format!(
        r#"{{
  "id": "8b7f9e2c-4a6d-4f3e-9c1b-2d5e8f7a6b4c",
  "name": "{name}",
  "publisher": "{publisher}",
  "version": "1.0.0.0",
  "supportedLocales": ["en-US"],
  "platform": "14.0.0.0",
  "runtime": "3.0"
}}"#
    );
    let relative = if dir.is_empty() {
        "app.json".to_string()
    } else {
        format!("{dir}/app.json")
    };
    write_file(root, &relative, &json)
}

/// Writes a symbol archive to `root/relative`.
pub fn write_archive(root: &Path, relative: &str, builder: SymbolArchiveBuilder) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    builder.write_to(&path).unwrap();
    path
}

pub fn event_method(name: &str) -> MethodDecl {
    MethodDecl::new(name)
        .with_attribute(AttributeTag {
            name: "IntegrationEvent".into(),
            arguments: vec!["false".into(), "false".into()],
        })
        .with_parameter(ParameterDecl::new("Rec", "Record \"Sales Header\"").by_var())
}

/// The dependency used by the end-to-end scenario: a `Customer` table and
/// a codeunit publishing `OnAfterPost`.
pub fn base_app() -> SymbolArchiveBuilder {
    SymbolArchiveBuilder::new("Base Application", "Microsoft", "14.0.0.0")
        .object(DeclaredObject::new(ObjectKind::Table, 50100, "Customer"))
        .object(
            DeclaredObject::new(ObjectKind::Codeunit, 80, "Sales-Post")
                .with_method(MethodDecl::new("Run"))
                .with_method(event_method("OnAfterPost")),
        )
}

pub const CUSTOMER_TABLE: &str = r#"table 50100 Customer
{
    fields
    {
        field(1; "No."; Code[20]) { }
        field(2; Name; Text[100]) { }
    }

    procedure Validate()
    begin
    end;
}
"#;
