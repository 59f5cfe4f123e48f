//! Building and saving workbooks to disk

use std::fs;
use std::path::{Path, PathBuf};

use gridsmith_core::Workbook;

use crate::catalog::WorkbookKind;
use crate::error::{Error, Result};

/// Whether this build can write XLSX files
pub fn xlsx_available() -> bool {
    cfg!(feature = "xlsx")
}

/// Save `workbook` as an XLSX file at `path`
#[cfg(feature = "xlsx")]
pub fn save_workbook(workbook: &Workbook, path: &Path) -> Result<()> {
    gridsmith_xlsx::XlsxWriter::write_file(workbook, path).map_err(|source| Error::Save {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), sheets = workbook.sheet_count(), "saved workbook");
    Ok(())
}

/// Save `workbook` as an XLSX file at `path`
#[cfg(not(feature = "xlsx"))]
pub fn save_workbook(_workbook: &Workbook, _path: &Path) -> Result<()> {
    Err(Error::XlsxUnavailable)
}

/// Read an XLSX file back into memory
#[cfg(feature = "xlsx")]
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    gridsmith_xlsx::XlsxReader::read_file(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(not(feature = "xlsx"))]
pub fn read_workbook(_path: &Path) -> Result<Workbook> {
    Err(Error::XlsxUnavailable)
}

/// Build one workbook and save it into `out_dir`, returning its path
pub fn generate(kind: WorkbookKind, out_dir: &Path) -> Result<PathBuf> {
    if !xlsx_available() {
        return Err(Error::XlsxUnavailable);
    }

    fs::create_dir_all(out_dir).map_err(|source| Error::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let workbook = kind.build()?;
    let path = out_dir.join(kind.file_name());
    save_workbook(&workbook, &path)?;
    Ok(path)
}

/// Generate `kinds` in order, calling `on_created` after each file.
///
/// Stops at the first failure; files already written are left in place.
pub fn generate_all<F>(
    out_dir: &Path,
    kinds: &[WorkbookKind],
    mut on_created: F,
) -> Result<Vec<PathBuf>>
where
    F: FnMut(WorkbookKind, &Path),
{
    let mut written = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        let path = generate(kind, out_dir)?;
        on_created(kind, &path);
        written.push(path);
    }
    Ok(written)
}

#[cfg(all(test, feature = "xlsx"))]
mod tests {
    use super::*;

    #[test]
    fn test_generate_all_reports_each_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("demos");
        let mut seen = Vec::new();

        let paths = generate_all(&out, &WorkbookKind::ALL, |kind, _| seen.push(kind)).unwrap();

        assert_eq!(seen, WorkbookKind::ALL.to_vec());
        assert_eq!(paths.len(), 3);
        assert!(out.join("data-analysis.xlsx").is_file());
    }

    #[test]
    fn test_generate_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("occupied");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = generate(WorkbookKind::FinancialModel, &blocker).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = generate(WorkbookKind::FinancialModel, dir.path()).unwrap();

        let workbook = read_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), WorkbookKind::FinancialModel.sheet_names().to_vec());
    }
}
