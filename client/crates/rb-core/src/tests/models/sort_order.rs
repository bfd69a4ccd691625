use crate::{FavoriteRecipe, SortOrder};

use std::str::FromStr;

fn favorite(id: i64, date_added: &str) -> FavoriteRecipe {
    FavoriteRecipe {
        id,
        title: format!("Recipe {id}"),
        content: format!("<h3>Recipe {id}</h3>"),
        date_added: date_added.to_string(),
        starred: true,
    }
}

fn ids(favorites: &[FavoriteRecipe]) -> Vec<i64> {
    favorites.iter().map(|f| f.id).collect()
}

#[test]
fn test_sort_order_default_is_latest() {
    assert_eq!(SortOrder::default(), SortOrder::Latest);
}

#[test]
fn test_sort_order_from_str() {
    assert_eq!(SortOrder::from_str("latest").unwrap(), SortOrder::Latest);
    assert_eq!(SortOrder::from_str("Oldest").unwrap(), SortOrder::Oldest);
    assert!(SortOrder::from_str("random").is_err());
}

#[test]
fn test_sort_order_toggle() {
    assert_eq!(SortOrder::Latest.toggle(), SortOrder::Oldest);
    assert_eq!(SortOrder::Oldest.toggle(), SortOrder::Latest);
}

#[test]
fn given_latest_when_sort_then_newest_first() {
    let mut favorites = vec![
        favorite(1, "2024-01-01T10:00:00.000000"),
        favorite(2, "2024-03-01T10:00:00.000000"),
        favorite(3, "2024-02-01T10:00:00"),
    ];

    SortOrder::Latest.sort(&mut favorites);

    assert_eq!(ids(&favorites), vec![2, 3, 1]);
}

#[test]
fn given_oldest_when_sort_then_oldest_first() {
    let mut favorites = vec![
        favorite(1, "2024-03-01 10:00:00"),
        favorite(2, "2024-01-01T10:00:00Z"),
        favorite(3, "2024-02-01T10:00:00+00:00"),
    ];

    SortOrder::Oldest.sort(&mut favorites);

    assert_eq!(ids(&favorites), vec![2, 3, 1]);
}

#[test]
fn given_unparseable_dates_when_sort_then_they_go_last() {
    let mut favorites = vec![
        favorite(1, "yesterday"),
        favorite(2, "2024-01-01T10:00:00"),
        favorite(3, ""),
        favorite(4, "2024-05-01T10:00:00"),
    ];

    SortOrder::Latest.sort(&mut favorites);

    assert_eq!(ids(&favorites), vec![4, 2, 1, 3]);
}
