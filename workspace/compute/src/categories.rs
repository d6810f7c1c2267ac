use std::collections::HashSet;

use model::entities::category;

/// Drops categories whose trimmed, lowercased name was already seen.
/// The first occurrence in the input order wins.
pub fn unique_by_name(categories: Vec<category::Model>) -> Vec<category::Model> {
    let mut seen = HashSet::new();
    categories
        .into_iter()
        .filter(|c| seen.insert(c.name.trim().to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(id: i32, name: &str) -> category::Model {
        category::Model {
            id,
            user_id: 1,
            name: name.to_string(),
            icon: None,
            color: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let unique = unique_by_name(vec![
            category(1, "Food"),
            category(2, " food "),
            category(3, "Rent"),
            category(4, "FOOD"),
        ]);
        let ids: Vec<i32> = unique.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_keeps_order() {
        let unique = unique_by_name(vec![category(5, "b"), category(2, "a")]);
        let ids: Vec<i32> = unique.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 2]);
    }
}
