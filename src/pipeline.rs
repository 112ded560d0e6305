// ==========================================
// Nominal Compounds - Import Pipeline
// ==========================================
// Orchestrates one full run: master workbook first (compound sheet,
// then duplicate sheet), then every work workbook found in the input
// directory. A failed workbook never stops the run.
// ==========================================

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::{error, info};

use crate::config::RunConfig;
use crate::domain::{RunSummary, WorkFileSummary};
use crate::graph::GraphStore;
use crate::importer::{
    CompoundSheetImporter, DuplicateSheetImporter, ImportError, ImportResult, SheetLayout,
    WorkSheetImporter,
};

pub struct Pipeline<'a> {
    store: &'a dyn GraphStore,
    config: &'a RunConfig,
}

impl<'a> Pipeline<'a> {
    pub fn new(store: &'a dyn GraphStore, config: &'a RunConfig) -> Self {
        Self { store, config }
    }

    /// Runs the whole import. Master-workbook and per-work failures are
    /// logged and reflected in the summary; only an unreadable input
    /// directory is fatal.
    pub async fn run(&self) -> ImportResult<RunSummary> {
        let mut summary = RunSummary::default();

        match self.import_master().await {
            Ok((compounds, duplicates)) => {
                summary.compounds = Some(compounds);
                summary.duplicates = Some(duplicates);
            }
            Err(err) => {
                error!(
                    file = %self.config.master_file.display(),
                    error = %err,
                    "master workbook failed; continuing with work files"
                );
            }
        }

        for path in self.work_files()? {
            summary.work_files_processed += 1;
            match self.import_work_file(&path).await {
                Ok(work_summary) => summary.works.push(WorkFileSummary {
                    file: path.display().to_string(),
                    summary: work_summary,
                }),
                Err(err) => {
                    error!(file = %path.display(), error = %err, "work workbook failed");
                    summary.work_files_failed += 1;
                }
            }
        }

        info!(
            work_files = summary.work_files_processed,
            failed = summary.work_files_failed,
            "import run done"
        );
        Ok(summary)
    }

    /// Master workbook: sheet 1 is the compound list, sheet 2 the
    /// duplicate groups.
    async fn import_master(
        &self,
    ) -> ImportResult<(
        crate::domain::CompoundSheetSummary,
        crate::domain::DuplicateSheetSummary,
    )> {
        info!(file = %self.config.master_file.display(), "importing master workbook");
        let mut workbook = open_workbook_auto(&self.config.master_file)?;
        let compound_sheet = sheet_at(&mut workbook, 0)?;
        let duplicate_sheet = sheet_at(&mut workbook, 1)?;

        let compounds = CompoundSheetImporter::new(self.store)
            .run(&compound_sheet)
            .await?;
        let duplicates = DuplicateSheetImporter::new(self.store)
            .run(&duplicate_sheet)
            .await?;
        Ok((compounds, duplicates))
    }

    async fn import_work_file(&self, path: &Path) -> ImportResult<crate::domain::WorkSheetSummary> {
        info!(file = %path.display(), "importing work workbook");
        let mut workbook = open_workbook_auto(path)?;
        let sheet = sheet_at(&mut workbook, 0)?;
        let layout = SheetLayout::detect(&sheet);
        WorkSheetImporter::new(self.store, layout).run(&sheet).await
    }

    /// Work workbooks in the input directory, sorted by name. Skips
    /// temporary/hidden files and the master workbook itself.
    fn work_files(&self) -> ImportResult<Vec<PathBuf>> {
        let master = self.config.master_file.canonicalize().ok();
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.config.input_dir)? {
            let path = entry?.path();
            if !path.is_file() || !is_workbook(&path) {
                continue;
            }
            if master.is_some() && path.canonicalize().ok() == master {
                continue;
            }
            files.push(path);
        }
        files.sort();
        Ok(files)
    }
}

fn is_workbook(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    // Excel lock files start with ~$
    if name.starts_with('.') || name.starts_with("~$") {
        return false;
    }
    matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref(),
        Some("xlsx") | Some("xls")
    )
}

fn sheet_at(
    workbook: &mut calamine::Sheets<std::io::BufReader<std::fs::File>>,
    index: usize,
) -> ImportResult<Range<Data>> {
    let name = workbook
        .sheet_names()
        .get(index)
        .cloned()
        .ok_or_else(|| ImportError::Workbook(format!("workbook has no sheet {}", index + 1)))?;
    Ok(workbook.worksheet_range(&name)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workbook_filter_accepts_excel_extensions_only() {
        assert!(is_workbook(Path::new("works/Ovidius.xlsx")));
        assert!(is_workbook(Path::new("works/PLAUTUS.XLS")));
        assert!(!is_workbook(Path::new("works/~$Ovidius.xlsx")));
        assert!(!is_workbook(Path::new("works/.hidden.xlsx")));
        assert!(!is_workbook(Path::new("works/notes.csv")));
    }
}
