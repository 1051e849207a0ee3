//! Name search over the patient store.

use crate::models::PatientRecord;
use crate::text::trim_input;

/// Whether `query` imposes no filter (empty or whitespace only).
pub fn is_blank_query(query: &str) -> bool {
    trim_input(query).is_empty()
}

/// Records whose name contains `query`, ignoring case, in store order.
///
/// A blank query returns every record. The query is not trimmed before
/// matching, so surrounding spaces are part of the needle.
pub fn filter_patients<'a>(store: &'a [PatientRecord], query: &str) -> Vec<&'a PatientRecord> {
    if is_blank_query(query) {
        return store.iter().collect();
    }

    let needle = query.to_lowercase();
    store.iter().filter(|p| p.name_matches(&needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Vec<PatientRecord> {
        ["Leanne Graham", "Ervin Howell", "Clementine Bauch", "Patricia Lebsack"]
            .iter()
            .enumerate()
            .map(|(i, name)| PatientRecord {
                id: i as u64 + 1,
                name: name.to_string(),
                age: 20,
                contact: String::new(),
                email: String::new(),
                address: String::new(),
                notes: String::new(),
            })
            .collect()
    }

    fn names(visible: &[&PatientRecord]) -> Vec<String> {
        visible.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_blank_query_returns_store() {
        let store = store();
        assert_eq!(filter_patients(&store, "").len(), 4);
        assert_eq!(filter_patients(&store, " \t ").len(), 4);
        assert_eq!(filter_patients(&store, "\u{feff} ").len(), 4);
        assert_eq!(names(&filter_patients(&store, "")), names(&store.iter().collect::<Vec<_>>()));
    }

    #[test]
    fn test_case_insensitive_substring() {
        let store = store();
        assert_eq!(names(&filter_patients(&store, "GRAHAM")), vec!["Leanne Graham"]);
        assert_eq!(
            names(&filter_patients(&store, "an")),
            vec!["Leanne Graham", "Clementine Bauch"]
        );
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let store = store();
        assert_eq!(names(&filter_patients(&store, " howell")), vec!["Ervin Howell"]);
        assert!(filter_patients(&store, "howell ").is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(filter_patients(&store(), "zzz").is_empty());
    }
}
