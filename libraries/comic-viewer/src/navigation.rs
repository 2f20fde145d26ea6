//! Page stepping under a navigation policy
//!
//! Pure functions over `(index, page_count)`. Callers guarantee
//! `page_count > 0` and `index < page_count`.

use crate::types::NavigationPolicy;

/// Index after moving one page forward
pub fn step_forward(index: usize, page_count: usize, policy: NavigationPolicy) -> usize {
    debug_assert!(page_count > 0 && index < page_count);
    match policy {
        NavigationPolicy::Wrap => (index + 1) % page_count,
        NavigationPolicy::Clamp => (index + 1).min(page_count - 1),
    }
}

/// Index after moving one page back
pub fn step_back(index: usize, page_count: usize, policy: NavigationPolicy) -> usize {
    debug_assert!(page_count > 0 && index < page_count);
    match policy {
        NavigationPolicy::Wrap => (index + page_count - 1) % page_count,
        NavigationPolicy::Clamp => index.saturating_sub(1),
    }
}

/// Bring a stale index back into `[0, page_count)` (0 for an empty collection)
pub fn clamp_index(index: usize, page_count: usize) -> usize {
    index.min(page_count.saturating_sub(1))
}
