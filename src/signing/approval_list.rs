//! Canonical ordering for CCLA approval lists (GitHub orgs, emails, domains).
//!
//! Entries are trimmed, then ordered with the Unicode Collation Algorithm
//! using the CLDR root collation, the order browsers use for
//! `localeCompare`. Punctuation and symbols are not ignored: they sort
//! before digits, digits before letters, lower case before upper case.
//! Code point order breaks any remaining ties so the ordering is total and
//! exact duplicates end up adjacent.

use feruca::{Collator, Locale, Tailoring};
use std::cmp::Ordering;

/// CLDR root, non-ignorable punctuation, with the NFD tie-break.
fn root_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}

fn compare(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| a.cmp(b))
}

/// Locale-aware comparison of two (already trimmed) entries.
pub fn collate(a: &str, b: &str) -> Ordering {
    compare(&mut root_collator(), a, b)
}

/// Trim, sort with [`collate`], then drop exact duplicates.
pub fn normalize<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    let mut out: Vec<String> = entries
        .iter()
        .map(|e| e.as_ref().trim().to_string())
        .collect();

    let mut collator = root_collator();
    out.sort_by(|a, b| compare(&mut collator, a, b));
    out.dedup();
    out
}
