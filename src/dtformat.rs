//! Translation of the `%`-escaped datetime format mini-language into
//! chrono's format vocabulary, with a memoizing cache.
//!
//! The same user-supplied format string is typically applied to every
//! row of a scan, so translations are cached behind a read-write lock
//! with get-or-compute semantics. The cache is owned by callers and
//! injected wherever datetime parsing happens; it is never process
//! state, and `clear` resets it between independent runs.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Translate one format string.
///
/// `%` begins an escape; recognized escapes map to chrono specifiers,
/// unrecognized escapes emit the escaped character itself, and plain
/// characters pass through. A passed-through `%` is re-escaped to `%%`
/// because `%` is the escape rune of the target vocabulary too.
pub fn convert_datetime_format(format: &str) -> String {
    let mut out = String::with_capacity(format.len() + 8);
    let mut escaped = false;

    for r in format.chars() {
        if !escaped {
            match r {
                '%' => escaped = true,
                _ => out.push(r),
            }
            continue;
        }

        match r {
            'a' => out.push_str("%a"),
            'b' => out.push_str("%b"),
            'c' => out.push_str("%-m"),
            'd' => out.push_str("%d"),
            'E' => out.push_str("%e"),
            'e' => out.push_str("%-d"),
            'F' => out.push_str("%.f"),
            'f' => out.push_str("%.6f"),
            'H' => out.push_str("%H"),
            'h' => out.push_str("%I"),
            'i' => out.push_str("%M"),
            'l' => out.push_str("%-I"),
            'M' => out.push_str("%B"),
            'm' => out.push_str("%m"),
            'N' => out.push_str("%.f"),
            'n' => out.push_str("%.9f"),
            'p' => out.push_str("%p"),
            'r' => out.push_str("%I:%M:%S %p"),
            's' => out.push_str("%S"),
            'T' => out.push_str("%H:%M:%S"),
            'W' => out.push_str("%A"),
            'Y' => out.push_str("%Y"),
            'y' => out.push_str("%y"),
            'Z' => out.push_str("%:z"),
            'z' => out.push_str("%Z"),
            '%' => out.push_str("%%"),
            _ => out.push(r),
        }
        escaped = false;
    }

    out
}

/// Concurrency-safe memoization of [`convert_datetime_format`].
#[derive(Debug, Default)]
pub struct DatetimeFormatMap {
    map: RwLock<HashMap<String, String>>,
}

impl DatetimeFormatMap {
    pub fn new() -> DatetimeFormatMap {
        DatetimeFormatMap {
            map: RwLock::new(HashMap::new()),
        }
    }

    /// Return the translated layout for `format`, computing and storing
    /// it on first use.
    pub fn get(&self, format: &str) -> String {
        if let Some(layout) = self
            .map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(format)
        {
            return layout.clone();
        }

        tracing::trace!(format, "datetime format cache miss");
        let layout = convert_datetime_format(format);
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(format.to_string(), layout.clone());
        layout
    }

    /// Drop all cached translations. Intended for test isolation and
    /// between independent runs.
    pub fn clear(&self) {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
