use crate::config::Config;
use crate::db::log::{AuditOp, ttlog_quiet};
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::fs::ensure_writable;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the track database to `dest_file`, optionally zipped.
    /// Returns the path of the file actually written.
    pub fn backup(cfg: &Config, dest_file: &str, compress: bool, force: bool) -> AppResult<PathBuf> {
        let src = Path::new(&cfg.database);
        let dest = Path::new(dest_file);

        // 1️⃣ Check DB exists
        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // 3️⃣ Ask before overwriting
        let final_path = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };
        ensure_writable(&final_path, force, "Backup")?;

        // 4️⃣ Copy database (staging copy when compressing)
        if compress {
            let staging = dest.with_extension("sqlite.tmp");
            fs::copy(src, &staging)?;
            let res = compress_backup(&staging, &final_path);
            if let Err(e) = fs::remove_file(&staging) {
                warning(format!("Failed to remove staging copy: {}", e));
            }
            res?;
        } else {
            fs::copy(src, &final_path)?;
        }

        success(format!("Backup created: {}", final_path.display()));

        // 5️⃣ Log in DB
        if let Ok(conn) = Connection::open(src) {
            ttlog_quiet(
                &conn,
                AuditOp::Backup,
                &final_path.to_string_lossy(),
                if compress {
                    "Backup created and compressed"
                } else {
                    "Backup created"
                },
            );
        }

        Ok(final_path)
    }
}

/// Compress `src` into the zip archive `zip_path`.
fn compress_backup(src: &Path, zip_path: &Path) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(src)?;
    zip.start_file("openbrd.sqlite", options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    success(format!("📦 Compressed: {}", zip_path.display()));
    Ok(())
}
