use super::{FileMetadata, FileSystem, FileType, WalkError, WalkOptions};
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<String>,
    pub file_type: FileType,
    pub readable: bool,
}

/// In-memory filesystem rooted at `/mock` unless told otherwise
pub struct MockFileSystem {
    files: RwLock<BTreeMap<PathBuf, MockEntry>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let fs = Self {
            files: RwLock::new(BTreeMap::new()),
            root,
        };
        let root = fs.root.clone();
        fs.add_dir(root);
        fs
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        self.insert_file(path.as_ref(), Some(content.to_string()), true);
    }

    /// Adds a file that shows up in walks but fails every read
    pub fn add_unreadable_file(&self, path: impl AsRef<Path>) {
        self.insert_file(path.as_ref(), None, false);
    }

    /// Adds a directory the walk reports as an error instead of descending into
    pub fn add_unreadable_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.write();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content: None,
                file_type: FileType::Directory,
                readable: false,
            },
        );
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.write();

        Self::ensure_parents(&mut files, &path);
    }

    fn insert_file(&self, path: &Path, content: Option<String>, readable: bool) {
        let path = self.normalize_path(path);
        let mut files = self.write();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content,
                file_type: FileType::File,
                readable,
            },
        );
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<PathBuf, MockEntry>> {
        self.files.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<PathBuf, MockEntry>> {
        self.files.write().unwrap_or_else(|e| e.into_inner())
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(files: &mut BTreeMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
                readable: true,
            });
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.read().contains_key(&path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.read()
            .get(&path)
            .map(|e| e.file_type == FileType::Directory)
            .unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.read()
            .get(&path)
            .map(|e| e.file_type == FileType::File)
            .unwrap_or(false)
    }

    fn metadata(&self, path: &Path) -> Result<FileMetadata> {
        let path = self.normalize_path(path);
        let files = self.read();
        let entry = files
            .get(&path)
            .ok_or_else(|| anyhow!("Path not found: {:?}", path))?;

        Ok(FileMetadata {
            size: entry.content.as_ref().map(|c| c.len() as u64).unwrap_or(0),
            file_type: entry.file_type,
        })
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        let files = self.read();
        let entry = files
            .get(&path)
            .ok_or_else(|| anyhow!("File not found: {:?}", path))?;

        if !entry.readable {
            return Err(anyhow!("Permission denied: {:?}", path));
        }

        entry
            .content
            .clone()
            .ok_or_else(|| anyhow!("Not a file: {:?}", path))
    }

    fn walk_files(
        &self,
        root: &Path,
        options: &WalkOptions,
    ) -> Result<Vec<Result<PathBuf, WalkError>>> {
        let root = self.normalize_path(root);
        let files = self.read();

        if !files.contains_key(&root) {
            return Err(anyhow!("Directory not found: {:?}", root));
        }

        let unreadable: Vec<&PathBuf> = files
            .iter()
            .filter(|(path, entry)| {
                entry.file_type == FileType::Directory && !entry.readable && **path != root
            })
            .map(|(path, _)| path)
            .collect();

        let walked = files
            .iter()
            .filter_map(|(path, entry)| {
                let relative = path.strip_prefix(&root).ok()?;
                if relative.as_os_str().is_empty() {
                    return None;
                }
                let depth = relative.components().count();
                if options.max_depth.map_or(false, |max| depth > max) {
                    return None;
                }
                let dirs = match entry.file_type {
                    FileType::File => relative.parent(),
                    _ => Some(relative),
                };
                let in_excluded = dirs
                    .into_iter()
                    .flat_map(|p| p.components())
                    .any(|c| options.is_excluded_dir(&c.as_os_str().to_string_lossy()));
                if in_excluded {
                    return None;
                }
                if unreadable.iter().any(|dir| path != *dir && path.starts_with(dir)) {
                    return None;
                }

                match entry.file_type {
                    FileType::File => Some(Ok(path.clone())),
                    FileType::Directory if !entry.readable => Some(Err(WalkError::new(
                        path.clone(),
                        anyhow!("Permission denied: {:?}", path),
                    ))),
                    _ => None,
                }
            })
            .collect();

        Ok(walked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walked(fs: &MockFileSystem, options: &WalkOptions) -> Vec<PathBuf> {
        fs.walk_files(Path::new("/mock"), options)
            .unwrap()
            .into_iter()
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn test_add_file() {
        let fs = MockFileSystem::new();
        fs.add_file("test.txt", "hello");

        assert!(fs.exists(Path::new("/mock/test.txt")));
        assert!(fs.is_file(Path::new("/mock/test.txt")));
        assert!(fs.is_dir(Path::new("/mock")));
    }

    #[test]
    fn test_read_to_string() {
        let fs = MockFileSystem::new();
        fs.add_file("test.txt", "hello world");

        let content = fs.read_to_string(Path::new("/mock/test.txt")).unwrap();
        assert_eq!(content, "hello world");
    }

    #[test]
    fn test_unreadable_file() {
        let fs = MockFileSystem::new();
        fs.add_unreadable_file("secret.py");

        assert!(fs.is_file(Path::new("/mock/secret.py")));
        let err = fs.read_to_string(Path::new("/mock/secret.py")).unwrap_err();
        assert!(err.to_string().contains("Permission denied"));
    }

    #[test]
    fn test_metadata() {
        let fs = MockFileSystem::new();
        fs.add_file("test.txt", "hello");

        let meta = fs.metadata(Path::new("/mock/test.txt")).unwrap();
        assert!(meta.is_file());
        assert_eq!(meta.len(), 5);
    }

    #[test]
    fn test_parent_directories_created() {
        let fs = MockFileSystem::new();
        fs.add_file("a/b/c/file.txt", "content");

        assert!(fs.is_dir(Path::new("/mock/a")));
        assert!(fs.is_dir(Path::new("/mock/a/b/c")));
        assert!(fs.is_file(Path::new("/mock/a/b/c/file.txt")));
    }

    #[test]
    fn test_walk_files() {
        let fs = MockFileSystem::new();
        fs.add_file("b.txt", "");
        fs.add_file("a/nested.py", "");
        fs.add_file(".git/HEAD", "");
        fs.add_dir("empty");

        let files = walked(&fs, &WalkOptions::default());
        assert_eq!(
            files,
            vec![PathBuf::from("/mock/a/nested.py"), PathBuf::from("/mock/b.txt")]
        );
    }

    #[test]
    fn test_walk_files_max_depth() {
        let fs = MockFileSystem::new();
        fs.add_file("top.txt", "");
        fs.add_file("a/nested.py", "");

        let options = WalkOptions {
            max_depth: Some(1),
            ..Default::default()
        };
        assert_eq!(walked(&fs, &options), vec![PathBuf::from("/mock/top.txt")]);
    }

    #[test]
    fn test_walk_reports_unreadable_dir_and_skips_its_files() {
        let fs = MockFileSystem::new();
        fs.add_file("app.py", "");
        fs.add_unreadable_dir("private");
        fs.add_file("private/keys.py", "");

        let entries = fs
            .walk_files(Path::new("/mock"), &WalkOptions::default())
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].as_ref().unwrap(), Path::new("/mock/app.py"));

        let err = entries[1].as_ref().unwrap_err();
        assert_eq!(err.path, PathBuf::from("/mock/private"));
        assert!(err.error.to_string().contains("Permission denied"));
    }

    #[test]
    fn test_walk_missing_root() {
        let fs = MockFileSystem::new();
        assert!(fs
            .walk_files(Path::new("/elsewhere"), &WalkOptions::default())
            .is_err());
    }
}
