//! Module resolution from the file system.

use std::path::{Path, PathBuf};

use log::trace;
use xmlui_module::ModuleResolver;

/// Extensions tried after the path as written.
const SCRIPT_EXTENSIONS: &[&str] = &["xs", "js"];

/// Resolves import paths to files relative to the importing module.
/// Module names are import paths relative to `base_dir`.
pub struct FileSystemResolver {
    base_dir: PathBuf,
}

impl FileSystemResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// A resolver for modules imported by `file`.
    pub fn for_file(file: &Path) -> Self {
        let dir = file
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        Self::new(dir)
    }

    fn find_file(&self, parent_module: &str, requested_path: &str) -> Option<PathBuf> {
        let parent_path = self.base_dir.join(parent_module);
        let dir = parent_path.parent().unwrap_or(&self.base_dir);
        let candidate = dir.join(requested_path);
        if candidate.is_file() {
            return Some(candidate);
        }
        SCRIPT_EXTENSIONS
            .iter()
            .map(|ext| PathBuf::from(format!("{}.{}", candidate.display(), ext)))
            .find(|path| path.is_file())
    }
}

impl ModuleResolver for FileSystemResolver {
    fn resolve(&self, parent_module: &str, requested_path: &str) -> Option<String> {
        let path = self.find_file(parent_module, requested_path)?;
        trace!("resolved '{}' to {}", requested_path, path.display());
        std::fs::read_to_string(path).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("xmlui-cli-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(dir.join("lib")).unwrap();
        dir
    }

    #[test]
    fn test_resolves_with_extensions() {
        let dir = scratch_dir("ext");
        std::fs::write(dir.join("lib/helpers.xs"), "export const a = 1;").unwrap();
        std::fs::write(dir.join("lib/util.js"), "export const b = 2;").unwrap();
        std::fs::write(dir.join("plain"), "var c = 3;").unwrap();

        let resolver = FileSystemResolver::new(&dir);
        assert_eq!(resolver.resolve("Main", "./lib/helpers").as_deref(), Some("export const a = 1;"));
        assert_eq!(resolver.resolve("./lib/helpers", "./util").as_deref(), Some("export const b = 2;"));
        assert_eq!(resolver.resolve("Main", "plain").as_deref(), Some("var c = 3;"));
        assert_eq!(resolver.resolve("Main", "./missing"), None);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_for_file_uses_parent_dir() {
        let resolver = FileSystemResolver::for_file(Path::new("pages/Home.xmlui"));
        assert_eq!(resolver.base_dir, PathBuf::from("pages"));
        let resolver = FileSystemResolver::for_file(Path::new("Home.xmlui"));
        assert_eq!(resolver.base_dir, PathBuf::from("."));
    }
}
