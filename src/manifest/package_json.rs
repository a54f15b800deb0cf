//! package.json document
//!
//! Handles:
//! - dependencies
//! - devDependencies
//! - peerDependencies
//! - optionalDependencies
//!
//! The document is kept as an ordered JSON object, so fields this tool does not
//! touch are written back in place. Indentation and the trailing newline of the
//! original file are reused on save.

use crate::domain::{ResolvedPackage, TypesCompanion};
use crate::error::ManifestError;
use crate::manifest::DependencySection;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const DEFAULT_INDENT: &str = "  ";

/// A loaded package.json
#[derive(Debug, Clone)]
pub struct PackageManifest {
    path: PathBuf,
    content: Map<String, Value>,
    indent: String,
    trailing_newline: bool,
}

impl PackageManifest {
    /// Read and parse the manifest at `path`
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
        Self::parse(path, &text)
    }

    /// Parse manifest text; `path` is where [`save`](Self::save) writes to
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Self, ManifestError> {
        let path = path.into();
        let value: Value = serde_json::from_str(text)
            .map_err(|e| ManifestError::json_parse_error(&path, e.to_string()))?;

        let Value::Object(content) = value else {
            return Err(ManifestError::InvalidShape {
                path,
                message: "top-level value is not an object".to_string(),
            });
        };

        Ok(Self {
            indent: detect_indent(text),
            trailing_newline: text.ends_with('\n'),
            content,
            path,
        })
    }

    /// Path of the manifest file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the manifest (the project root)
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// The whole document
    pub fn content(&self) -> &Map<String, Value> {
        &self.content
    }

    pub fn section(&self, section: DependencySection) -> Option<&Map<String, Value>> {
        self.content.get(section.key()).and_then(Value::as_object)
    }

    /// Version string of `package` in one section
    pub fn dependency_version(&self, section: DependencySection, package: &str) -> Option<&str> {
        self.section(section)
            .and_then(|deps| deps.get(package))
            .and_then(Value::as_str)
    }

    /// Returns true if `package` appears in any dependency section
    pub fn has_dependency(&self, package: &str) -> bool {
        DependencySection::ALL.iter().any(|section| {
            self.section(*section)
                .is_some_and(|deps| deps.contains_key(package))
        })
    }

    /// Merge resolved packages and companions into the dependency sections.
    ///
    /// Non-dev packages go to `dependencies`; dev packages and every companion
    /// go to `devDependencies`. Existing entries for other packages are kept,
    /// entries for the installed packages are overwritten. Returns the number of
    /// entries written.
    pub fn update_dependencies(
        &mut self,
        resolved: &[ResolvedPackage],
        companions: &[TypesCompanion],
    ) -> usize {
        let entries = resolved
            .iter()
            .map(|p| (DependencySection::for_install(p.is_dev), &p.name, p.version.raw()))
            .chain(companions.iter().map(|c| {
                (
                    DependencySection::for_install(c.is_dev()),
                    &c.name,
                    c.version.raw(),
                )
            }));

        let mut written = 0;
        for (section, name, version) in entries {
            if let Some(deps) = self.section_mut(section) {
                deps.insert(name.clone(), Value::String(version.to_string()));
                written += 1;
            }
        }
        written
    }

    /// Serialize with the original indentation and trailing newline
    pub fn to_json_string(&self) -> Result<String, ManifestError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.content
            .serialize(&mut serializer)
            .map_err(|e| ManifestError::write_error(&self.path, e.into()))?;

        let mut text = String::from_utf8(buf).map_err(|e| {
            ManifestError::write_error(
                &self.path,
                std::io::Error::new(ErrorKind::InvalidData, e),
            )
        })?;
        if self.trailing_newline {
            text.push('\n');
        }
        Ok(text)
    }

    /// Write the manifest through a temp file next to it, then rename it over
    /// the original.
    ///
    /// A symlinked package.json is followed, so the link stays in place and its
    /// target is updated. The file mode of the existing file is kept.
    pub fn save(&self) -> Result<(), ManifestError> {
        let text = self.to_json_string()?;
        let write_error = |e| ManifestError::write_error(&self.path, e);

        let (target, permissions) = match fs::canonicalize(&self.path) {
            Ok(target) => {
                let permissions = fs::metadata(&target).map_err(write_error)?.permissions();
                (target, Some(permissions))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => (self.path.clone(), None),
            Err(e) => return Err(write_error(e)),
        };
        let dir = target.parent().unwrap_or_else(|| Path::new("."));

        let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
        file.write_all(text.as_bytes()).map_err(write_error)?;
        if let Some(permissions) = permissions {
            file.as_file()
                .set_permissions(permissions)
                .map_err(write_error)?;
        }
        file.as_file().sync_all().map_err(write_error)?;
        file.persist(&target).map_err(|e| write_error(e.error))?;

        tracing::debug!(path = %target.display(), "manifest written");
        Ok(())
    }

    /// The section object, created (or replaced if it is not an object)
    fn section_mut(&mut self, section: DependencySection) -> Option<&mut Map<String, Value>> {
        let entry = self
            .content
            .entry(section.key())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        entry.as_object_mut()
    }
}

/// Leading whitespace of the first indented line, or two spaces
fn detect_indent(text: &str) -> String {
    text.lines()
        .skip(1)
        .find_map(|line| {
            let body = line.trim_start_matches([' ', '\t']);
            let width = line.len() - body.len();
            (width > 0 && !body.is_empty()).then(|| line[..width].to_string())
        })
        .unwrap_or_else(|| DEFAULT_INDENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SemanticVersion;
    use tempfile::TempDir;

    fn resolved(name: &str, version: &str, is_dev: bool) -> ResolvedPackage {
        ResolvedPackage {
            name: name.to_string(),
            is_dev,
            version: SemanticVersion::parse(version).unwrap(),
            typed: true,
        }
    }

    fn companion(subject: &str, version: &str) -> TypesCompanion {
        TypesCompanion {
            name: format!("@types/{}", subject),
            subject: subject.to_string(),
            version: SemanticVersion::parse(version).unwrap(),
        }
    }

    fn manifest(text: &str) -> PackageManifest {
        PackageManifest::parse("package.json", text).unwrap()
    }

    #[test]
    fn test_parse_manifest() {
        let m = manifest(
            r#"{
  "name": "app",
  "dependencies": { "react": "^18.2.0" },
  "devDependencies": { "typescript": "^5.3.0" }
}"#,
        );
        assert_eq!(
            m.dependency_version(DependencySection::Dependencies, "react"),
            Some("^18.2.0")
        );
        assert!(m.has_dependency("typescript"));
        assert!(!m.has_dependency("vue"));
        assert!(m.section(DependencySection::PeerDependencies).is_none());
    }

    #[test]
    fn test_invalid_json() {
        let err = PackageManifest::parse("package.json", "{ not json").unwrap_err();
        assert!(matches!(err, ManifestError::JsonParseError { .. }));
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = PackageManifest::parse("package.json", "[]").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidShape { .. }));
    }

    #[test]
    fn test_update_is_pure_merge() {
        let mut m = manifest(
            r#"{
  "name": "app",
  "dependencies": { "react": "^18.2.0", "bar": "0.1.0" },
  "devDependencies": { "jest": "^29.0.0" },
  "peerDependencies": { "react-dom": "^18.0.0" },
  "optionalDependencies": { "fsevents": "^2.3.0" }
}"#,
        );
        let before = m.content().clone();

        m.update_dependencies(&[resolved("bar", "1.4.0", false)], &[]);

        assert_eq!(
            m.dependency_version(DependencySection::Dependencies, "bar"),
            Some("1.4.0")
        );
        for section in DependencySection::ALL {
            let old = before.get(section.key()).and_then(Value::as_object).unwrap();
            let new = m.section(section).unwrap();
            for (name, version) in old {
                if name == "bar" {
                    continue;
                }
                assert_eq!(new.get(name), Some(version), "{} in {}", name, section);
            }
            let extra = new.len() - old.len();
            assert_eq!(extra, 0, "no new keys expected in {}", section);
        }
        assert_eq!(m.content().get("name"), before.get("name"));
    }

    #[test]
    fn test_update_partitions_by_dev_flag() {
        let mut m = manifest(r#"{ "name": "app" }"#);
        let written = m.update_dependencies(
            &[resolved("axios", "1.6.0", false), resolved("vitest", "1.0.0", true)],
            &[companion("axios", "1.0.2")],
        );

        assert_eq!(written, 3);
        assert_eq!(
            m.dependency_version(DependencySection::Dependencies, "axios"),
            Some("1.6.0")
        );
        assert_eq!(
            m.dependency_version(DependencySection::DevDependencies, "vitest"),
            Some("1.0.0")
        );
        assert_eq!(
            m.dependency_version(DependencySection::DevDependencies, "@types/axios"),
            Some("1.0.2")
        );
        assert!(m.section(DependencySection::PeerDependencies).is_none());
    }

    #[test]
    fn test_update_replaces_non_object_section() {
        let mut m = manifest(r#"{ "dependencies": null }"#);
        m.update_dependencies(&[resolved("foo", "1.0.0", false)], &[]);
        assert_eq!(
            m.dependency_version(DependencySection::Dependencies, "foo"),
            Some("1.0.0")
        );
    }

    #[test]
    fn test_key_order_preserved() {
        let mut m = manifest(
            "{\n  \"name\": \"app\",\n  \"dependencies\": {\n    \"b\": \"1.0.0\"\n  },\n  \"scripts\": {}\n}\n",
        );
        m.update_dependencies(&[resolved("a", "2.0.0", false)], &[]);

        let keys: Vec<&String> = m.content().keys().collect();
        assert_eq!(keys, vec!["name", "dependencies", "scripts"]);
        let deps: Vec<&String> = m
            .section(DependencySection::Dependencies)
            .unwrap()
            .keys()
            .collect();
        assert_eq!(deps, vec!["b", "a"]);
    }

    #[test]
    fn test_formatting_round_trip() {
        let text = "{\n    \"name\": \"app\",\n    \"dependencies\": {\n        \"react\": \"^18.2.0\"\n    }\n}\n";
        assert_eq!(manifest(text).to_json_string().unwrap(), text);

        let tabs = "{\n\t\"name\": \"app\"\n}";
        assert_eq!(manifest(tabs).to_json_string().unwrap(), tabs);
    }

    #[test]
    fn test_detect_indent_defaults_to_two_spaces() {
        assert_eq!(detect_indent(r#"{"name":"app"}"#), "  ");
        assert_eq!(detect_indent("{\n    \"a\": 1\n}"), "    ");
    }

    #[test]
    fn test_save_writes_atomically() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "{\n  \"name\": \"app\"\n}\n").unwrap();

        let mut m = PackageManifest::load(&path).unwrap();
        m.update_dependencies(&[resolved("left-pad", "1.3.0", false)], &[]);
        m.save().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n  \"name\": \"app\",\n  \"dependencies\": {\n    \"left-pad\": \"1.3.0\"\n  }\n}\n"
        );

        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "{\n  \"name\": \"app\"\n}\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let mut m = PackageManifest::load(&path).unwrap();
        m.update_dependencies(&[resolved("left-pad", "1.3.0", false)], &[]);
        m.save().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_through_symlink_updates_target() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.json");
        let link = dir.path().join("package.json");
        fs::write(&real, "{\n  \"name\": \"app\"\n}\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let mut m = PackageManifest::load(&link).unwrap();
        m.update_dependencies(&[resolved("left-pad", "1.3.0", false)], &[]);
        m.save().unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(fs::read_to_string(&real).unwrap().contains("\"left-pad\": \"1.3.0\""));
        assert_eq!(
            fs::read_to_string(&link).unwrap(),
            fs::read_to_string(&real).unwrap()
        );
    }

    #[test]
    fn test_save_new_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        let mut m = PackageManifest::parse(&path, "{}").unwrap();
        m.update_dependencies(&[resolved("left-pad", "1.3.0", false)], &[]);
        m.save().unwrap();

        let reloaded = PackageManifest::load(&path).unwrap();
        assert_eq!(
            reloaded.dependency_version(DependencySection::Dependencies, "left-pad"),
            Some("1.3.0")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = PackageManifest::load(&dir.path().join("package.json")).unwrap_err();
        assert!(matches!(err, ManifestError::ReadError { .. }));
    }
}
