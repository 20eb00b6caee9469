//! Listing behavior against real temporary directory trees.

use std::path::Path;

use pictor_fs::{DirEntry, DirectoryLister, ListError, ListerConfig};
use tempfile::TempDir;

fn lister_for(root: &Path) -> DirectoryLister {
    DirectoryLister::new(ListerConfig::new().with_asset_root(root))
}

#[cfg(not(unix))]
fn set_readonly(path: &Path) {
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_readonly(true);
    std::fs::set_permissions(path, perms).unwrap();
}

#[tokio::test]
async fn missing_path_lists_empty() {
    let temp = TempDir::new().unwrap();
    let lister = lister_for(temp.path());

    let listing = lister
        .list(&temp.path().join("nowhere").to_string_lossy())
        .await;
    assert!(listing.is_empty());
}

#[tokio::test]
async fn regular_file_lists_empty() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("a.png");
    std::fs::write(&file, b"png").unwrap();

    let listing = lister_for(temp.path()).list(&file.to_string_lossy()).await;
    assert!(listing.is_empty());
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
}

#[cfg(unix)]
fn running_as_root() -> bool {
    rustix::process::geteuid().is_root()
}

#[cfg(unix)]
#[tokio::test]
async fn readonly_directory_follows_the_kernel_answer() {
    let temp = TempDir::new().unwrap();
    let locked = temp.path().join("locked");
    std::fs::create_dir(&locked).unwrap();
    std::fs::write(locked.join("a.png"), b"png").unwrap();
    set_mode(&locked, 0o555);

    let lister = lister_for(temp.path());
    let result = lister.try_list(&locked.to_string_lossy()).await;
    if running_as_root() {
        // access(2) grants root write access to a 0555 directory.
        let listing = result.unwrap();
        assert_eq!(listing.len(), 1);
    } else {
        let err = result.unwrap_err();
        assert!(matches!(err, ListError::Inaccessible(e) if e.is_permission_denied()));
        assert!(lister.list(&locked.to_string_lossy()).await.is_empty());
    }

    set_mode(&locked, 0o755);
}

#[cfg(not(unix))]
#[tokio::test]
async fn readonly_directory_lists_empty() {
    let temp = TempDir::new().unwrap();
    let locked = temp.path().join("locked");
    std::fs::create_dir(&locked).unwrap();
    set_readonly(&locked);

    let lister = lister_for(temp.path());
    let err = lister.try_list(&locked.to_string_lossy()).await.unwrap_err();
    assert!(matches!(err, ListError::Inaccessible(e) if e.is_permission_denied()));

    let mut perms = std::fs::metadata(&locked).unwrap().permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(false);
    std::fs::set_permissions(&locked, perms).unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn inaccessible_children_are_dropped() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    std::fs::write(dir.join("a.png"), b"png").unwrap();
    std::fs::write(dir.join("b.txt"), b"txt").unwrap();
    std::fs::create_dir(dir.join("sub")).unwrap();

    // No permission bits at all: only root gets through access(2).
    std::fs::write(dir.join("locked.jpg"), b"jpg").unwrap();
    set_mode(&dir.join("locked.jpg"), 0o000);
    // Readable but not writable by anyone but root.
    std::fs::write(dir.join("locked.png"), b"png").unwrap();
    set_mode(&dir.join("locked.png"), 0o444);

    std::os::unix::fs::symlink(dir.join("gone.png"), dir.join("dangling.png")).unwrap();

    let mut listing = lister_for(dir).list(&dir.to_string_lossy()).await;
    listing.sort_by(|a, b| a.filename.cmp(&b.filename));

    let sub = dir.join("sub");
    let mut expected = vec![
        DirEntry::file("a.png"),
        DirEntry::file("b.txt"),
        DirEntry::directory(sub.to_string_lossy()),
    ];
    if running_as_root() {
        expected.push(DirEntry::file("locked.jpg"));
        expected.push(DirEntry::file("locked.png"));
    }
    expected.sort_by(|a, b| a.filename.cmp(&b.filename));
    assert_eq!(listing, expected);
}

#[cfg(unix)]
#[tokio::test]
async fn sockets_are_neither_files_nor_directories() {
    use pictor_fs::EntryError;
    use std::os::unix::net::UnixListener;

    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    std::fs::write(dir.join("a.png"), b"png").unwrap();
    let socket = dir.join("viewer.sock");
    let _listener = UnixListener::bind(&socket).unwrap();

    let lister = lister_for(dir);
    let err = lister.classify(socket.clone()).await.unwrap_err();
    assert!(matches!(err, EntryError::Unsupported { path } if path == socket));

    let listing = lister.list(&dir.to_string_lossy()).await;
    assert_eq!(listing, vec![DirEntry::file("a.png")]);
}

#[tokio::test]
async fn every_entry_has_exactly_one_flag() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    for name in ["one", "two"] {
        std::fs::create_dir(dir.join(name)).unwrap();
    }
    for name in ["x.jpg", "y.png", "z"] {
        std::fs::write(dir.join(name), b"data").unwrap();
    }

    let listing = lister_for(dir).list(&dir.to_string_lossy()).await;
    assert_eq!(listing.len(), 5);
    for entry in &listing {
        assert!(entry.is_directory ^ entry.is_file, "{entry:?}");
    }
    assert_eq!(listing.iter().filter(|e| e.is_directory).count(), 2);
}

#[tokio::test]
async fn files_are_relative_to_asset_root_and_dirs_absolute() {
    let temp = TempDir::new().unwrap();
    let assets = temp.path().join("renderer");
    let photos = temp.path().join("photos");
    std::fs::create_dir(&assets).unwrap();
    std::fs::create_dir(&photos).unwrap();
    std::fs::create_dir(photos.join("2024")).unwrap();
    std::fs::write(photos.join("cat.jpg"), b"jpg").unwrap();

    // Unnormalized input with a `..` detour and a trailing separator.
    let raw = format!("{}/../photos/", assets.display());
    let mut listing = lister_for(&assets).list(&raw).await;
    listing.sort_by_key(|e| e.is_file);

    let dir = &listing[0];
    assert!(dir.is_directory);
    assert!(Path::new(&dir.filename).is_absolute());
    assert_eq!(Path::new(&dir.filename), photos.join("2024"));

    let file = &listing[1];
    assert!(file.is_file);
    assert_eq!(
        Path::new(&file.filename),
        Path::new("..").join("photos").join("cat.jpg")
    );
}

#[tokio::test]
async fn empty_directory_lists_empty_without_error() {
    let temp = TempDir::new().unwrap();
    let listing = lister_for(temp.path())
        .try_list(&temp.path().to_string_lossy())
        .await
        .unwrap();
    assert!(listing.is_empty());
}
