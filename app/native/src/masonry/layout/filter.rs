//! Item list filtering.
//!
//! Grids are commonly narrowed by category (a blog grid showing only "Design"
//! posts, for example). Filtering produces a new list; the engine treats it as
//! an item-list change and animates the survivors to their new slots.

use crate::masonry::state::Item;

/// Category name that disables filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Returns the items belonging to `category`, preserving order.
///
/// `"All"` (case-insensitive) returns every item. Matching is
/// case-insensitive; items without a category only appear under `"All"`.
#[must_use]
pub fn filter_by_category(items: &[Item], category: &str) -> Vec<Item> {
    if category.eq_ignore_ascii_case(ALL_CATEGORIES) {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| {
            item.category.as_deref().is_some_and(|value| value.eq_ignore_ascii_case(category))
        })
        .cloned()
        .collect()
}

/// Distinct categories in first-seen order, prefixed with `"All"`.
#[must_use]
pub fn categories(items: &[Item]) -> Vec<String> {
    let mut result = vec![ALL_CATEGORIES.to_string()];
    for category in items.iter().filter_map(|item| item.category.as_deref()) {
        if !result.iter().any(|known| known.eq_ignore_ascii_case(category)) {
            result.push(category.to_string());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts() -> Vec<Item> {
        vec![
            Item::new(1, 600.0).with_category("Design"),
            Item::new(2, 700.0).with_category("Development"),
            Item::new(3, 800.0).with_category("Inspiration"),
            Item::new(4, 520.0).with_category("Design"),
            Item::new(5, 400.0),
        ]
    }

    #[test]
    fn test_filter_all_returns_everything() {
        assert_eq!(filter_by_category(&posts(), "All").len(), 5);
        assert_eq!(filter_by_category(&posts(), "all").len(), 5);
    }

    #[test]
    fn test_filter_keeps_order() {
        let design = filter_by_category(&posts(), "design");
        let ids: Vec<_> = design.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_filter_unknown_category_is_empty() {
        assert!(filter_by_category(&posts(), "Lifestyle").is_empty());
    }

    #[test]
    fn test_categories_are_distinct() {
        assert_eq!(categories(&posts()), vec!["All", "Design", "Development", "Inspiration"]);
    }
}
