//! Symbol archive reading and writing.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, Write};
use std::path::{Path, PathBuf};

use alcatalog_types::{DeclaredObject, ObjectKind};
use tracing::debug;
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::manifest::{RawObject, SymbolManifest};
use crate::SymbolError;

/// Well-known name of the manifest entry inside every symbol archive.
pub const MANIFEST_ENTRY: &str = "SymbolReference.json";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The declared objects of one compiled application, read from its archive.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolPackage {
    pub app_id: Uuid,
    pub name: String,
    pub publisher: String,
    pub version: String,
    /// The archive this package was read from.
    pub path: PathBuf,
    objects: BTreeMap<ObjectKind, Vec<DeclaredObject>>,
}

impl SymbolPackage {
    /// Creates an empty package, mostly useful for building archives.
    pub fn new(
        name: impl Into<String>,
        publisher: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            app_id: Uuid::new_v4(),
            name: name.into(),
            publisher: publisher.into(),
            version: version.into(),
            path: PathBuf::new(),
            objects: BTreeMap::new(),
        }
    }

    /// Reads the archive at `path`. The file handle is released before returning.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, SymbolError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SymbolError::read(path, e))?;
        Self::open(BufReader::new(file), path)
    }

    /// Reads a symbol archive from any seekable reader; `path` is recorded
    /// on the package and in errors.
    pub fn open<R: Read + Seek>(reader: R, path: impl Into<PathBuf>) -> Result<Self, SymbolError> {
        let path = path.into();
        let mut archive = ZipArchive::new(reader).map_err(|e| SymbolError::read(&path, e))?;
        let mut bytes = Vec::new();
        {
            let mut entry = archive
                .by_name(MANIFEST_ENTRY)
                .map_err(|e| SymbolError::read(&path, e))?;
            entry
                .read_to_end(&mut bytes)
                .map_err(|e| SymbolError::read(&path, e))?;
        }
        Self::from_manifest_bytes(&bytes, path)
    }

    /// Parses raw manifest JSON, tagging every object with the kind of the
    /// collection it was listed in.
    pub fn from_manifest_bytes(
        bytes: &[u8],
        path: impl Into<PathBuf>,
    ) -> Result<Self, SymbolError> {
        let path = path.into();
        let json = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut manifest: SymbolManifest =
            serde_json::from_slice(json).map_err(|source| SymbolError::Format {
                path: path.clone(),
                source,
            })?;

        let objects: BTreeMap<_, _> = ObjectKind::ALL
            .into_iter()
            .map(|kind| (kind, manifest.take_objects(kind)))
            .filter(|(_, objects)| !objects.is_empty())
            .collect();

        let package = Self {
            app_id: manifest.app_id,
            name: manifest.name,
            publisher: manifest.publisher,
            version: manifest.version,
            path,
            objects,
        };
        debug!(
            path = %package.path.display(),
            app = %package.name,
            objects = package.object_count(),
            "Symbol manifest read"
        );
        Ok(package)
    }

    /// Objects of one kind, in manifest order.
    #[must_use]
    pub fn objects(&self, kind: ObjectKind) -> &[DeclaredObject] {
        self.objects.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// All objects, grouped by kind in `ObjectKind` declaration order.
    pub fn iter_objects(&self) -> impl Iterator<Item = &DeclaredObject> {
        self.objects.values().flatten()
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.values().map(Vec::len).sum()
    }

    /// Finds the object with the given id within the collection for `kind`.
    #[must_use]
    pub fn find(&self, kind: ObjectKind, id: i64) -> Option<&DeclaredObject> {
        self.objects(kind).iter().find(|o| o.id == id)
    }

    /// Adds an object to the collection matching its kind.
    pub fn push(&mut self, object: DeclaredObject) {
        self.objects.entry(object.kind).or_default().push(object);
    }

    fn to_manifest(&self) -> SymbolManifest {
        let mut manifest = SymbolManifest {
            app_id: self.app_id,
            name: self.name.clone(),
            publisher: self.publisher.clone(),
            version: self.version.clone(),
            ..SymbolManifest::default()
        };
        for (kind, objects) in &self.objects {
            manifest
                .collection_mut(*kind)
                .extend(objects.iter().map(RawObject::from));
        }
        manifest
    }
}

/// Fluent builder for symbol archives.
pub struct SymbolArchiveBuilder {
    package: SymbolPackage,
    extra: BTreeMap<String, Vec<u8>>,
}

impl SymbolArchiveBuilder {
    pub fn new(
        name: impl Into<String>,
        publisher: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self::from_package(SymbolPackage::new(name, publisher, version))
    }

    pub fn from_package(package: SymbolPackage) -> Self {
        Self {
            package,
            extra: BTreeMap::new(),
        }
    }

    pub fn app_id(mut self, app_id: Uuid) -> Self {
        self.package.app_id = app_id;
        self
    }

    pub fn object(mut self, object: DeclaredObject) -> Self {
        self.package.push(object);
        self
    }

    /// Adds a non-manifest entry, such as `NavxManifest.xml` or a source file.
    pub fn entry(mut self, name: &str, data: Vec<u8>) -> Self {
        self.extra.insert(name.to_string(), data);
        self
    }

    /// Builds the zip archive and returns the raw bytes.
    pub fn build(self) -> Result<Vec<u8>, SymbolError> {
        let buf = std::io::Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(buf);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for (name, data) in &self.extra {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(data)?;
        }

        let manifest = serde_json::to_vec(&self.package.to_manifest())?;
        zip.start_file(MANIFEST_ENTRY, options)?;
        zip.write_all(&manifest)?;

        let finished = zip.finish()?;
        Ok(finished.into_inner())
    }

    /// Builds the archive and writes it to `path`.
    pub fn write_to(self, path: impl AsRef<Path>) -> Result<(), SymbolError> {
        let bytes = self.build()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
