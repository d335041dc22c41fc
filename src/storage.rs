use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

#[cfg(unix)]
use crate::config::STORAGE_DIR_MODE;

/// Flat file store rooted at a single local directory.
#[derive(Clone, Debug)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// Creates the storage root if it is missing. An existing root is left untouched.
    pub async fn ensure_root(&self) -> io::Result<()> {
        match fs::metadata(&self.root).await {
            Ok(_) => return Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(STORAGE_DIR_MODE);
        builder.create(&self.root).await
    }

    /// Destination for an uploaded file: the root and the client supplied name
    /// joined by a plain `/`. The name is not validated.
    pub fn upload_target(&self, file_name: &str) -> PathBuf {
        let mut target = OsString::from(self.root.as_os_str());
        target.push("/");
        target.push(file_name);
        PathBuf::from(target)
    }

    /// Collects every non-directory entry below the root, depth first, with
    /// each directory's entries in byte order of their names. Symlinks are not
    /// followed. Paths are rendered lossily, so names that are not valid UTF-8
    /// may collide in the output.
    pub async fn walk_files(&self) -> io::Result<Vec<String>> {
        let root_meta = fs::symlink_metadata(&self.root).await?;
        if !root_meta.is_dir() {
            return Ok(vec![display_path(&self.root)]);
        }

        let mut files = Vec::new();
        let mut pending = read_dir_sorted(&self.root).await?;
        pending.reverse();

        while let Some((path, is_dir)) = pending.pop() {
            if !is_dir {
                files.push(display_path(&path));
                continue;
            }
            let mut children = read_dir_sorted(&path).await?;
            children.reverse();
            pending.extend(children);
        }

        Ok(files)
    }
}

async fn read_dir_sorted(dir: &Path) -> io::Result<Vec<(PathBuf, bool)>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let file_type = entry.file_type().await?;
        entries.push((entry.file_name(), entry.path(), file_type.is_dir()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries
        .into_iter()
        .map(|(_, path, is_dir)| (path, is_dir))
        .collect())
}

fn display_path(path: &Path) -> String {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect::<PathBuf>()
        .to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "/")
}

#[cfg(test)]
mod tests {
    use super::Storage;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[tokio::test]
    async fn ensure_root_creates_missing_directory() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path().join("files");
        let storage = Storage::new(root.clone());

        storage.ensure_root().await.expect("ensure root");
        assert!(root.is_dir());
        storage.ensure_root().await.expect("ensure existing root");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn ensure_root_grants_owner_full_access() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().expect("tempdir");
        let root = temp.path().join("files");
        Storage::new(root.clone())
            .ensure_root()
            .await
            .expect("ensure root");

        let mode = std::fs::metadata(&root).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o700, 0o700);
    }

    #[test]
    fn upload_target_concatenates_name() {
        let storage = Storage::new(PathBuf::from("files"));
        assert_eq!(storage.upload_target("a.txt"), PathBuf::from("files/a.txt"));
        assert_eq!(
            storage.upload_target("/abs.txt"),
            PathBuf::from("files//abs.txt")
        );
    }

    #[tokio::test]
    async fn walk_files_missing_root_is_error() {
        let temp = tempdir().expect("tempdir");
        let storage = Storage::new(temp.path().join("absent"));
        assert!(storage.walk_files().await.is_err());
    }

    #[tokio::test]
    async fn walk_files_empty_root() {
        let temp = tempdir().expect("tempdir");
        let storage = Storage::new(temp.path().to_path_buf());
        assert!(storage.walk_files().await.expect("walk").is_empty());
    }

    #[tokio::test]
    async fn walk_files_lists_nested_entries_in_order() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path().join("files");
        std::fs::create_dir_all(root.join("sub/deeper")).expect("create dirs");
        std::fs::create_dir_all(root.join("empty")).expect("create dirs");
        std::fs::write(root.join("b.txt"), b"b").expect("write");
        std::fs::write(root.join("a.txt"), b"a").expect("write");
        std::fs::write(root.join("sub/c.txt"), b"c").expect("write");
        std::fs::write(root.join("sub/deeper/d.txt"), b"d").expect("write");

        let storage = Storage::new(root.clone());
        let files = storage.walk_files().await.expect("walk");

        let prefix = root.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/");
        assert_eq!(
            files,
            vec![
                format!("{prefix}/a.txt"),
                format!("{prefix}/b.txt"),
                format!("{prefix}/sub/c.txt"),
                format!("{prefix}/sub/deeper/d.txt"),
            ]
        );
    }

    #[test]
    fn display_path_drops_current_dir() {
        assert_eq!(
            super::display_path(&PathBuf::from("./files/a.txt")),
            "files/a.txt"
        );
    }
}
