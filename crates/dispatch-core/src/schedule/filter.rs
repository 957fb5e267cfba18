//! Filter stage over the normalized sequence.
//!
//! All set fields must match (AND semantics); unset fields constrain nothing.
//! Filtering is order-preserving and has no error path — an empty result is a
//! valid result.

use crate::model::item::WorkItem;

/// Filter criteria for the normalized schedule sequence.
///
/// `status`, `priority`, and `customer` are exact string equality. `assignee`
/// requires exact membership in `assigned_to`. `search` and `location` are
/// case-insensitive substring matches.
///
/// A field set to an empty or whitespace-only string counts as unset: the
/// upstream UI sends `""` for "any", so it must constrain nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    /// Free-text search over id, title, customer, and description.
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub customer: Option<String>,
    pub assignee: Option<String>,
    /// Substring match against the item location. Items without a location
    /// fail this filter whenever it is set.
    pub location: Option<String>,
}

impl ScheduleFilter {
    /// Returns `true` when no field is set, i.e. every item passes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.search,
            &self.status,
            &self.priority,
            &self.customer,
            &self.assignee,
            &self.location,
        ]
        .into_iter()
        .all(|field| set_value(field).is_none())
    }

    /// Returns `true` when `item` satisfies every set field.
    #[must_use]
    pub fn matches(&self, item: &WorkItem) -> bool {
        if let Some(needle) = set_value(&self.search) {
            if !search_matches(needle, item) {
                return false;
            }
        }

        if let Some(status) = set_value(&self.status) {
            if item.status != status {
                return false;
            }
        }

        if let Some(priority) = set_value(&self.priority) {
            if item.priority.as_deref() != Some(priority) {
                return false;
            }
        }

        if let Some(customer) = set_value(&self.customer) {
            if item.customer != customer {
                return false;
            }
        }

        if let Some(assignee) = set_value(&self.assignee) {
            if !item.assigned_to.iter().any(|a| a == assignee) {
                return false;
            }
        }

        if let Some(fragment) = set_value(&self.location) {
            let Some(ref location) = item.location else {
                return false;
            };
            if !contains_ignore_case(location, fragment) {
                return false;
            }
        }

        true
    }

    /// Apply the filter, keeping source order.
    #[must_use]
    pub fn apply(&self, items: &[WorkItem]) -> Vec<WorkItem> {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

/// A criterion's effective value: `None` for unset, empty, or whitespace.
fn set_value(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn search_matches(needle: &str, item: &WorkItem) -> bool {
    contains_ignore_case(&item.id, needle)
        || contains_ignore_case(&item.title, needle)
        || contains_ignore_case(&item.customer, needle)
        || item
            .description
            .as_deref()
            .is_some_and(|d| contains_ignore_case(d, needle))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_lowercase()
        .contains(needle.to_lowercase().as_str())
}
