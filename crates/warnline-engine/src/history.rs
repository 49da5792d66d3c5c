//! History walker: reference build selection.

use warnline_core::errors::HistoryError;
use warnline_core::model::{BuildId, HistoryEntry, ResultRecord};
use warnline_core::traits::BuildHistory;

/// Walk back from `build` and return the nearest usable reference record.
///
/// Gap entries are skipped. With `stable_only`, records whose outcome is not
/// `Success` are skipped as well. `lookback` caps the number of entries
/// visited (gaps included); `None` walks to the start of the chain.
///
/// `Ok(None)` means there is no qualifying reference, which is the normal
/// state for the first build of a pipeline.
pub fn find_reference<H>(
    history: &H,
    build: BuildId,
    stable_only: bool,
    lookback: Option<usize>,
) -> Result<Option<ResultRecord>, HistoryError>
where
    H: BuildHistory + ?Sized,
{
    let mut cursor = build;
    let mut visited = 0usize;
    loop {
        if lookback.is_some_and(|limit| visited >= limit) {
            tracing::debug!(build = %build, visited, "lookback exhausted without a reference");
            return Ok(None);
        }
        let Some(entry) = history.previous(cursor)? else {
            return Ok(None);
        };
        if entry.build_id >= cursor {
            return Err(HistoryError::NonMonotonic {
                cursor: cursor.get(),
                returned: entry.build_id.get(),
            });
        }
        visited += 1;
        cursor = entry.build_id;
        match entry.record {
            Some(record) if qualifies(&record, stable_only) => return Ok(Some(record)),
            Some(record) => {
                tracing::trace!(candidate = %record.build_id, outcome = %record.outcome, "skipping unstable candidate");
            }
            None => {
                tracing::trace!(candidate = %entry.build_id, "skipping build without analysis data");
            }
        }
    }
}

/// The nearest preceding record with analysis data, whatever its outcome.
pub fn find_previous<H>(
    history: &H,
    build: BuildId,
    lookback: Option<usize>,
) -> Result<Option<ResultRecord>, HistoryError>
where
    H: BuildHistory + ?Sized,
{
    find_reference(history, build, false, lookback)
}

/// Pure form of the walk over entries already ordered newest first.
pub fn select_reference<'a, I>(entries: I, stable_only: bool) -> Option<&'a ResultRecord>
where
    I: IntoIterator<Item = &'a HistoryEntry>,
{
    entries
        .into_iter()
        .filter_map(|e| e.record.as_ref())
        .find(|r| qualifies(r, stable_only))
}

fn qualifies(record: &ResultRecord, stable_only: bool) -> bool {
    !stable_only || record.outcome.is_success()
}
