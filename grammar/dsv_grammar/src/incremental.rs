//! Incremental re-parsing.
//!
//! Rows are parsed left to right and each row depends only on the input up
//! to one byte past its line terminator. After an edit, every row whose
//! successor starts strictly before the edit is unchanged and can be
//! reused; parsing resumes at the first affected row with the scanner
//! state recorded there.
//!
//! The empty-field scanner's recorded state is always zero bytes, so the
//! restore step is trivially correct. It is still performed so that any
//! [`Scanner`] implementation gets the same treatment.

use dsv_scanner::Scanner;
use tracing::debug;

use crate::parser::Parser;
use crate::syntax::Tree;

/// A single text replacement, in byte offsets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edit {
    /// Where the replaced range starts (same in old and new text).
    pub start: u32,
    /// End of the replaced range in the old text.
    pub old_end: u32,
    /// End of the replacement in the new text.
    pub new_end: u32,
}

impl Edit {
    /// Replace `old_end - start` bytes at `start` with `inserted` bytes.
    pub fn replace(start: u32, old_end: u32, inserted: u32) -> Self {
        Edit {
            start,
            old_end,
            new_end: start.saturating_add(inserted),
        }
    }
}

/// Reuse statistics of one re-parse.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReparseStats {
    pub reused_rows: usize,
    pub reparsed_rows: usize,
}

impl<S: Scanner> Parser<S> {
    /// Re-parse `new_source` after `edit`, reusing rows of `old` the edit
    /// cannot affect.
    ///
    /// The result is identical to `self.parse(new_source)`.
    #[tracing::instrument(level = "debug", skip_all, fields(dialect = %self.dialect(), start = edit.start))]
    pub fn reparse(&mut self, old: &Tree, new_source: &str, edit: &Edit) -> (Tree, ReparseStats) {
        if old.dialect() != self.dialect() {
            let tree = self.parse(new_source);
            let stats = ReparseStats {
                reused_rows: 0,
                reparsed_rows: tree.rows().len(),
            };
            return (tree, stats);
        }

        let checkpoints = old.checkpoints();
        // Row `i` is reusable when row `i + 1` starts before the edit.
        let reused = checkpoints
            .windows(2)
            .take_while(|pair| pair[1].start < edit.start)
            .count();

        let resume = checkpoints.get(reused).cloned();
        let (start, state) = match &resume {
            Some(checkpoint) => (checkpoint.start, &checkpoint.scanner_state[..]),
            None => (0, &[][..]),
        };
        let reused = if resume.is_some() { reused } else { 0 };

        self.scanner_mut().deserialize(state);

        let rows = old.rows()[..reused].to_vec();
        let kept_checkpoints = checkpoints[..reused].to_vec();
        let kept_errors = old
            .errors()
            .iter()
            .filter(|e| e.span().start < start)
            .cloned()
            .collect();

        let tree = self.parse_from(new_source, start, rows, kept_checkpoints, kept_errors);
        let stats = ReparseStats {
            reused_rows: reused,
            reparsed_rows: tree.rows().len() - reused,
        };
        debug!(
            reused = stats.reused_rows,
            reparsed = stats.reparsed_rows,
            "reparse complete"
        );
        (tree, stats)
    }
}
