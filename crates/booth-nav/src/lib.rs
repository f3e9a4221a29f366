use std::{
    cmp::Ordering,
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tokio::task::{JoinError, spawn_blocking};

pub mod gesture;
pub mod nav;
pub mod preload;
pub mod slides;

pub use gesture::{GestureInterpreter, GestureOutcome};
pub use nav::NavState;
pub use preload::PreloadManager;
pub use slides::{SlideList, SlideListBuilder};

pub const EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "avif"];

/// Discovered promo assets: file path -> image source.
pub type AssetMap = BTreeMap<String, String>;

/// Scans `dir` for promo images. A missing or unreadable directory yields no assets.
pub async fn discover_assets(dir: &Path) -> AssetMap {
    let dir = dir.to_path_buf();

    let scan_dir = dir.clone();
    finish_scan(spawn_blocking(move || discover_assets_sync(&scan_dir)).await, &dir)
}

fn finish_scan(joined: Result<AssetMap, JoinError>, dir: &Path) -> AssetMap {
    match joined {
        Ok(assets) => assets,
        Err(e) => {
            tracing::error!("asset scan of {} did not finish: {e}", dir.display());
            AssetMap::new()
        }
    }
}

pub fn discover_assets_sync(dir: &Path) -> AssetMap {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("cannot read asset directory {}: {e}", dir.display());
            return AssetMap::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            if let Some(name) = path.file_name().and_then(|name| name.to_str())
                && name.starts_with('.')
            {
                return false;
            }
            is_supported_image(path)
        })
        .map(|path| {
            let src = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            (
                path.to_string_lossy().into_owned(),
                src.to_string_lossy().into_owned(),
            )
        })
        .collect()
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn file_name(path: &str) -> Option<&str> {
    Path::new(path).file_name().and_then(|name| name.to_str())
}

/// Resolves an image source back to a filesystem path.
pub fn source_path(src: &str) -> PathBuf {
    PathBuf::from(src.strip_prefix("file://").unwrap_or(src))
}

/// Numeric-aware, case-insensitive ordering: `slide2` sorts before `slide10`.
pub fn human_sort(a: &str, b: &str) -> Ordering {
    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();

    loop {
        match (a_chars.peek().copied(), b_chars.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ac), Some(bc)) if ac.is_ascii_digit() && bc.is_ascii_digit() => {
                let a_num = take_digits(&mut a_chars);
                let b_num = take_digits(&mut b_chars);

                match compare_digit_runs(&a_num, &b_num) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            (Some(ac), Some(bc)) => {
                a_chars.next();
                b_chars.next();

                match ac.to_lowercase().cmp(bc.to_lowercase()) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        digits.push(c);
    }
    digits
}

// Digit runs of any length, compared by value without overflow.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');

    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
