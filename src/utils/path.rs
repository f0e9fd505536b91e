//! Path utilities: expand ~ and resolve names against a base directory.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `~` is expanded; relative names land inside `base`.
pub fn resolve_in(base: &Path, name: &str) -> PathBuf {
    let p = expand_tilde(name);
    if p.is_absolute() { p } else { base.join(p) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_names_resolve_inside_base() {
        let base = Path::new("/data/openbrd");
        assert_eq!(resolve_in(base, "tracks.sqlite"), base.join("tracks.sqlite"));
        assert_eq!(resolve_in(base, "/tmp/x.sqlite"), PathBuf::from("/tmp/x.sqlite"));
    }
}
