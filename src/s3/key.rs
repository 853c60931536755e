use std::path::{Path, PathBuf};

/// Final `/`-separated component of an object key
pub fn filename(key: &str) -> Option<&str> {
    match key.rsplit_once('/') {
        None if !key.is_empty() => Some(key),
        None => None,
        Some((_, "")) => None,
        Some((_, filename)) => Some(filename),
    }
}

/// Object key used when uploading `path` without an explicit name
pub fn from_local_path(path: &Path) -> Result<String, super::Error> {
    path.to_str()
        .map(str::to_owned)
        .ok_or(super::Error::LocalFilenameNotUnicode)
}

/// Local file an object is downloaded to, `directory` defaulting to the working directory
pub fn download_target(directory: Option<&Path>, key: &str) -> Result<PathBuf, super::Error> {
    let filename = filename(key).ok_or(super::Error::NoFilename)?;
    if filename == "." || filename == ".." {
        return Err(super::Error::NoFilename);
    }
    Ok(match directory {
        Some(directory) => directory.join(filename),
        None => PathBuf::from(filename),
    })
}

#[test]
fn test_filename() {
    assert_eq!(filename("report.csv"), Some("report.csv"));
    assert_eq!(filename("a/b/report.csv"), Some("report.csv"));
    assert_eq!(filename("a/b/"), None);
    assert_eq!(filename(""), None);
}

#[test]
fn test_download_target() {
    assert_eq!(download_target(None, "dir/report.csv").unwrap(), PathBuf::from("report.csv"));
    assert_eq!(download_target(Some(Path::new("/tmp/out")), "report.csv").unwrap(), PathBuf::from("/tmp/out/report.csv"));
    assert!(matches!(download_target(None, "dir/"), Err(super::Error::NoFilename)));
    assert!(matches!(download_target(None, "dir/.."), Err(super::Error::NoFilename)));
}

#[test]
fn test_from_local_path() {
    assert_eq!(from_local_path(Path::new("data/report.csv")).unwrap(), "data/report.csv");
}
