//! Pure derivations over the option list: search gating, filtering and lookups.

use crate::{OptionValue, SelectOption};

/// Whether the popup offers a search box for this many options
pub fn should_show_search(options: &[SelectOption], threshold: usize) -> bool {
    options.len() > threshold
}

/// Trimmed, lower-cased form of the raw search text
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Case-insensitive substring match against label, description and meta.
///
/// `normalized` must already be passed through [`normalize_query`].
pub fn option_matches(option: &SelectOption, normalized: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(normalized);
    contains(&option.label)
        || option.description.as_deref().is_some_and(contains)
        || option.meta.as_deref().is_some_and(contains)
}

/// Indices into `options` of the rows currently eligible for display.
///
/// Without a search box, or with an empty query, every option is visible.
pub fn visible_indices(options: &[SelectOption], query: &str, threshold: usize) -> Vec<usize> {
    let normalized = normalize_query(query);
    if !should_show_search(options, threshold) || normalized.is_empty() {
        return (0..options.len()).collect();
    }
    options
        .iter()
        .enumerate()
        .filter(|(_, option)| option_matches(option, &normalized))
        .map(|(i, _)| i)
        .collect()
}

/// The option whose value equals `value`, if any
pub fn selected_option<'a>(
    options: &'a [SelectOption],
    value: Option<&OptionValue>,
) -> Option<&'a SelectOption> {
    let value = value?;
    options.iter().find(|option| option.value == *value)
}

/// Position of `value` within the visible rows
pub fn position_of(
    options: &[SelectOption],
    visible: &[usize],
    value: Option<&OptionValue>,
) -> Option<usize> {
    let value = value?;
    visible.iter().position(|&i| options[i].value == *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projects(n: i64) -> Vec<SelectOption> {
        (1..=n)
            .map(|i| SelectOption::new(i, format!("Project {}", i)))
            .collect()
    }

    #[test]
    fn test_search_hidden_at_threshold() {
        assert!(!should_show_search(&projects(6), 6));
        assert!(should_show_search(&projects(7), 6));
        assert!(!should_show_search(&[], 6));
    }

    #[test]
    fn test_small_list_ignores_query() {
        let options = projects(6);
        for query in ["", "zzz", "Project 3", "   "] {
            assert_eq!(visible_indices(&options, query, 6), vec![0, 1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let options = projects(8);
        assert_eq!(visible_indices(&options, "  ", 6).len(), 8);
    }

    #[test]
    fn test_filters_label_description_and_meta() {
        let mut options = projects(7);
        options[1] = options[1].clone().with_description("Billing backend");
        options[4] = options[4].clone().with_meta("BILLING");
        options[6].label = "Billing UI".into();

        assert_eq!(visible_indices(&options, "  Billing ", 6), vec![1, 4, 6]);
    }

    #[test]
    fn test_filter_matches_exactly_the_containing_entries() {
        let options = projects(12);
        let visible = visible_indices(&options, "project 1", 6);
        let labels: Vec<_> = visible.iter().map(|&i| options[i].label.as_str()).collect();
        assert_eq!(labels, vec!["Project 1", "Project 10", "Project 11", "Project 12"]);
    }

    #[test]
    fn test_no_match() {
        assert!(visible_indices(&projects(8), "xyz", 6).is_empty());
    }

    #[test]
    fn test_selected_and_position() {
        let options = projects(8);
        let value = OptionValue::Int(5);
        assert_eq!(
            selected_option(&options, Some(&value)).map(|o| o.label.as_str()),
            Some("Project 5")
        );
        assert_eq!(selected_option(&options, None), None);

        let visible = visible_indices(&options, "5", 6);
        assert_eq!(position_of(&options, &visible, Some(&value)), Some(0));
        let visible = visible_indices(&options, "7", 6);
        assert_eq!(position_of(&options, &visible, Some(&value)), None);
    }
}
