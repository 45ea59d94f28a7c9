//! Listing-only mode: print what a scan found, no window.

use std::io::{self, Write};

use crate::photos::PhotoList;

/// Write `Found <n> photos` followed by one path per line.
///
/// # Errors
/// Propagates write failures from `out`.
pub fn write_listing<T, W: Write>(out: &mut W, photos: &PhotoList<T>) -> io::Result<()> {
    writeln!(out, "Found {} photos", photos.len())?;
    for path in photos.paths() {
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn empty_list_reports_zero() {
        let mut out = Vec::new();
        write_listing(&mut out, &PhotoList::<()>::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Found 0 photos\n");
    }

    #[test]
    fn lists_paths_in_order() {
        let photos = PhotoList::<()>::from_paths(vec![
            PathBuf::from("dir/b.png"),
            PathBuf::from("dir/a.jpg"),
        ]);
        let mut out = Vec::new();
        write_listing(&mut out, &photos).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Found 2 photos\ndir/b.png\ndir/a.jpg\n"
        );
    }
}
