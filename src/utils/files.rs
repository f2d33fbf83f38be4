use std::fs;
use std::path::Path;

pub fn file_exists(path: &Path) -> bool {
    return path.is_file();
}

/* Make sure the parent directory of a file we are about to write
exists. */
pub fn create_parent_directories(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
