//! PDF merge capability.
//!
//! Implements the merge behind a narrow trait so the orchestration layer (and
//! its tests) can swap the backend. The production implementation is
//! [`LopdfMerger`], built on `lopdf`: it accumulates pages into a fresh
//! in-memory document, one input at a time, and persists the result
//! atomically (write to a temp path, then rename) so a failed save never
//! leaves a truncated output file.
//!
//! Progress is reported through an optional callback with `(completed,
//! total)` pairs: once *before* each input is processed and a final
//! `(total, total)` after the loop, so a caller always sees a 100% report.
//! The callback must be `Send` because callers commonly run the merge on a
//! worker thread.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{Document, Object, ObjectId, dictionary};
use tracing::{debug, info};

use crate::error::{MergeMailError, Result};

/// Progress callback: invoked with `(completed, total)`.
///
/// Calls are synchronous and in input order; the callback is never invoked
/// concurrently with itself.
pub type Progress<'a> = &'a mut (dyn FnMut(usize, usize) + Send);

/// The merge operation contract.
///
/// A single production implementation exists ([`LopdfMerger`]); tests
/// substitute fakes satisfying the same contract.
pub trait PdfMerger {
    /// Merge `inputs`, in order, into a single document at `output`.
    ///
    /// Page order in the output mirrors input order exactly. On any failure
    /// the whole merge aborts and no output file is written.
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be loaded as a PDF, contains no
    /// pages, or the output cannot be persisted.
    fn merge_pdfs(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        on_progress: Option<Progress<'_>>,
    ) -> Result<()>;
}

/// Production merger built on `lopdf`.
///
/// Each call owns its own accumulating document; no state is shared across
/// calls, so independent merges (with distinct output paths) may run
/// concurrently.
#[derive(Debug, Clone, Default)]
pub struct LopdfMerger;

impl LopdfMerger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self
    }
}

impl PdfMerger for LopdfMerger {
    fn merge_pdfs(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        mut on_progress: Option<Progress<'_>>,
    ) -> Result<()> {
        let total = inputs.len();

        // Fresh accumulating document: empty page tree plus catalog.
        let mut merged = Document::with_version("1.5");
        let pages_id = merged.new_object_id();
        merged.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Object::Array(vec![]),
                "Count" => 0,
            }),
        );
        let catalog_id = merged.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        merged.trailer.set("Root", catalog_id);

        for (index, path) in inputs.iter().enumerate() {
            if let Some(cb) = on_progress.as_mut() {
                cb(index, total);
            }

            // The input document lives only for this iteration.
            let mut doc = Document::load(path).map_err(|e| {
                MergeMailError::failed_to_load_pdf(path.clone(), e.to_string())
            })?;

            doc.renumber_objects_with(merged.max_id + 1);
            merged.max_id = doc.max_id;

            let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
            if page_ids.is_empty() {
                return Err(MergeMailError::NoPages { path: path.clone() });
            }

            debug!(
                path = %path.display(),
                pages = page_ids.len(),
                "appending document"
            );

            merged.objects.extend(doc.objects);
            append_pages(&mut merged, pages_id, &page_ids)
                .map_err(|reason| MergeMailError::failed_to_load_pdf(path.clone(), reason))?;
        }

        // Final 100% report, independent of how many fired per item.
        if let Some(cb) = on_progress.as_mut() {
            cb(total, total);
        }

        // The source documents' own catalogs and page-tree nodes are now
        // unreachable from our root; drop them before writing.
        merged.prune_objects();
        merged.renumber_objects();

        save_atomic(&mut merged, output)?;

        info!(
            files = total,
            output = %output.display(),
            "merge complete"
        );

        Ok(())
    }
}

/// Re-parent `page_ids` onto the accumulator's page tree and register them
/// in its `Kids` array.
fn append_pages(
    merged: &mut Document,
    pages_id: ObjectId,
    page_ids: &[ObjectId],
) -> std::result::Result<(), String> {
    for &page_id in page_ids {
        let page = merged
            .get_object_mut(page_id)
            .and_then(|obj| obj.as_dict_mut())
            .map_err(|e| format!("invalid page object: {e}"))?;
        page.set("Parent", pages_id);
    }

    let pages = merged
        .get_object_mut(pages_id)
        .and_then(|obj| obj.as_dict_mut())
        .map_err(|e| format!("invalid page tree: {e}"))?;

    let count = pages
        .get(b"Count")
        .and_then(|c| c.as_i64())
        .unwrap_or(0);
    pages.set("Count", count + page_ids.len() as i64);

    let kids = pages
        .get_mut(b"Kids")
        .and_then(|k| k.as_array_mut())
        .map_err(|e| format!("page tree missing Kids array: {e}"))?;
    kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));

    Ok(())
}

/// Save to a temporary sibling path, then rename over the final path.
fn save_atomic(doc: &mut Document, output: &Path) -> Result<()> {
    let tmp = output.with_extension("pdf.tmp");

    if let Err(e) = doc.save(&tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(MergeMailError::failed_to_save(
            output.to_path_buf(),
            e.to_string(),
        ));
    }

    fs::rename(&tmp, output).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        MergeMailError::failed_to_save(output.to_path_buf(), e.to_string())
    })
}
