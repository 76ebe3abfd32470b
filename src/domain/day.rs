//! Route day slugs and their backend day numbers.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Fixed slug table used by the content routes.
static DAY_NUMBERS: Lazy<HashMap<&'static str, u8>> = Lazy::new(|| {
    HashMap::from([
        ("day_1", 1),
        ("day_2", 2),
        ("day_3", 3),
        ("day_4", 4),
        ("day_5", 5),
        ("day_6", 6),
        ("day_7", 7),
    ])
});

/// Maps a route slug such as `day_3` to its 1-based day number.
///
/// Slugs outside the table yield `None`; callers send the request without a
/// day number in that case and let the backend reject it.
pub fn day_number(slug: &str) -> Option<u8> {
    DAY_NUMBERS.get(slug).copied()
}
