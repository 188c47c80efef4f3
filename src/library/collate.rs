//! Locale-aware string ordering for title and author sorts.

use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;

thread_local! {
    // Root-locale UCA collator. `None` only if the compiled data is unusable,
    // in which case comparisons fall back to code point order.
    static COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

/// Compare two strings using Unicode collation.
pub fn compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}
