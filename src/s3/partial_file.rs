use std::path::PathBuf;

/// Download written beside its target, renamed into place once complete
pub struct PartialFile {
    pub writer: tokio::io::BufWriter<tokio::fs::File>,
    path_partial: PathBuf,
    path_final: PathBuf,
}

impl PartialFile {
    pub async fn new(path_final: PathBuf) -> Result<PartialFile, super::Error> {
        let mut path_string_temporary = path_final.as_os_str().to_owned();
        path_string_temporary.push(".ks3.partial");
        let path_partial = PathBuf::from(path_string_temporary);
        let local_file = tokio::fs::File::create(&path_partial).await?;
        Ok(PartialFile {
            writer: tokio::io::BufWriter::new(local_file),
            path_partial,
            path_final,
        })
    }
    /// Writer must already be flushed
    pub async fn finished(self) -> Result<PathBuf, super::Error> {
        drop(self.writer);
        tokio::fs::rename(&self.path_partial, &self.path_final).await?;
        Ok(self.path_final)
    }
    /// Removes only the partial file; an existing target is left untouched
    pub async fn cancelled(self) -> Result<(), super::Error> {
        drop(self.writer);
        tokio::fs::remove_file(&self.path_partial).await?;
        Ok(())
    }
    pub fn path_printable(&self) -> std::borrow::Cow<'_, str> {
        self.path_final.to_string_lossy()
    }
}
