use std::ops::AddAssign;

use crate::error::Severity;

/// Counters accumulated by a phase and merged across a run.
///
/// Any hard error makes the run fail; warnings never do.
///
/// # Examples
///
/// ```
/// use dotfiles_link::tasks::Tally;
///
/// let mut total = Tally { changed: 3, already_ok: 10, ..Tally::default() };
/// total += Tally { warnings: 1, ..Tally::default() };
///
/// assert_eq!(total.summary(false), "3 changed, 10 already ok, 1 warning(s)");
/// assert!(!total.has_errors());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    /// Items created, removed, or run.
    pub changed: u32,
    /// Items already in the desired state.
    pub already_ok: u32,
    /// Items skipped because of a warning or error.
    pub skipped: u32,
    /// Warning-level events.
    pub warnings: u32,
    /// Hard errors.
    pub errors: u32,
}

impl Tally {
    /// Count one reported event of the given severity.
    pub const fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Warning => self.warnings += 1,
            Severity::Error => self.errors += 1,
        }
    }

    /// Whether any hard error was recorded.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Format the counters (e.g. "3 changed, 10 already ok, 1 skipped").
    ///
    /// Zero skip, warning, and error counts are left out.
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        let mut out = format!("{} {verb}, {} already ok", self.changed, self.already_ok);
        for (count, label) in [
            (self.skipped, "skipped"),
            (self.warnings, "warning(s)"),
            (self.errors, "error(s)"),
        ] {
            if count > 0 {
                out.push_str(&format!(", {count} {label}"));
            }
        }
        out
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        self.changed += other.changed;
        self.already_ok += other.already_ok;
        self.skipped += other.skipped;
        self.warnings += other.warnings;
        self.errors += other.errors;
    }
}
