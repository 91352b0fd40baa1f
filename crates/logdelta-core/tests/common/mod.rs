use logdelta_core::loader::{load_snapshot_from_reader, LoadOptions};
use logdelta_core::model::Snapshot;
use std::fs;
use std::path::{Path, PathBuf};

/// Load an inline `;`-delimited source keyed by `id`
#[allow(dead_code)]
pub fn snapshot(content: &str) -> Snapshot {
    load_snapshot_from_reader(content.as_bytes(), "inline", &LoadOptions::default()).unwrap()
}

/// Write `content` to `dir/name` and return the path
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Create `logs/<log_type>/<name>` files for a catalog fixture
#[allow(dead_code)]
pub fn write_version(logs: &Path, log_type: &str, stamp: &str, content: &str) -> PathBuf {
    let folder = logs.join(log_type);
    fs::create_dir_all(&folder).unwrap();
    write_file(&folder, &format!("{}_{}.csv", stamp, log_type), content)
}
