// src/search.rs
//
// Shared search behavior of the list screens: case-insensitive substring
// match over a per-entity list of fields. An item matches when at least one
// field contains the query; an empty query keeps the full set.

/// Implemented by rows that can be searched; returns the string form of every
/// field the entity's list screen searches over.
pub trait Searchable {
    fn search_fields(&self) -> Vec<String>;
}

pub fn matches(query: &str, fields: &[String]) -> bool {
    let query = query.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

pub fn filter<T: Searchable>(items: Vec<T>, query: Option<&str>) -> Vec<T> {
    match query.map(str::trim) {
        None | Some("") => items,
        Some(q) => items
            .into_iter()
            .filter(|item| matches(q, &item.search_fields()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: String,
        city: String,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<String> {
            vec![self.name.clone(), self.city.clone()]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "Jan Kowalski".into(),
                city: "Warszawa".into(),
            },
            Row {
                name: "Anna Nowak".into(),
                city: "Gdynia".into(),
            },
            Row {
                name: "Piotr Wiśniewski".into(),
                city: "warszawa".into(),
            },
        ]
    }

    #[test]
    fn empty_query_returns_full_set() {
        assert_eq!(filter(rows(), None).len(), 3);
        assert_eq!(filter(rows(), Some("")).len(), 3);
        assert_eq!(filter(rows(), Some("   ")).len(), 3);
    }

    #[test]
    fn match_is_case_insensitive() {
        let hit = filter(rows(), Some("WARSZ"));
        assert_eq!(hit.len(), 2);
    }

    #[test]
    fn any_configured_field_can_match() {
        assert_eq!(filter(rows(), Some("nowak")).len(), 1);
        assert_eq!(filter(rows(), Some("gdynia")).len(), 1);
    }

    #[test]
    fn substring_not_prefix() {
        assert_eq!(filter(rows(), Some("owal")).len(), 1);
    }

    #[test]
    fn no_match_yields_empty_set() {
        assert!(filter(rows(), Some("kraków")).is_empty());
    }
}
