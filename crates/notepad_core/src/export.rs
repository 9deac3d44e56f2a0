//! Plain-text export of posts, one file per post.
//!
//! # Invariants
//! - File name is `<Type>_<YYYY-MM-DD_HH-MM-SS>.txt` from the creation time.
//! - Each `to_lines()` entry is written followed by a newline, UTF-8 encoded.

use crate::model::post::Post;
use log::{error, info};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const EXPORT_STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Export file name for `post`.
pub fn export_file_name(post: &dyn Post) -> String {
    format!(
        "{}_{}.txt",
        post.type_name(),
        post.created_at().format(EXPORT_STAMP_FORMAT)
    )
}

/// Writes `post` into `dir`, creating the directory when needed.
///
/// Returns the path of the written file. An existing file with the same name
/// is overwritten.
pub fn export_post(post: &dyn Post, dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(export_file_name(post));
    match write_lines(&path, &post.to_lines()) {
        Ok(()) => {
            info!(
                "event=post_export module=export status=ok type={} path={}",
                post.type_name(),
                path.display()
            );
            Ok(path)
        }
        Err(err) => {
            error!(
                "event=post_export module=export status=error type={} path={} error={}",
                post.type_name(),
                path.display(),
                err
            );
            Err(err)
        }
    }
}

fn write_lines(path: &Path, lines: &[String]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::export_file_name;
    use crate::model::memo::Memo;
    use crate::model::post::Post;

    #[test]
    fn file_name_uses_type_and_creation_stamp() {
        let memo = Memo::with_body("x");
        let expected = format!(
            "Memo_{}.txt",
            memo.base().created_at().format("%Y-%m-%d_%H-%M-%S")
        );
        assert_eq!(export_file_name(&memo), expected);
    }
}
