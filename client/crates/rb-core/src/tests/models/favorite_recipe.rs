use crate::FavoriteRecipe;

use serde_json::json;

#[test]
fn test_favorite_deserializes_service_payload() {
    let favorite: FavoriteRecipe = serde_json::from_value(json!({
        "id": 3,
        "title": "Shakshuka",
        "content": "<h3>Shakshuka</h3>",
        "date_added": "2024-06-01T08:30:15.123456",
        "starred": true
    }))
    .unwrap();

    assert_eq!(favorite.id, 3);
    assert!(favorite.starred);
    assert_eq!(favorite.added_date_label(), "2024-06-01");
}

#[test]
fn test_favorite_missing_starred_defaults_to_false() {
    let favorite: FavoriteRecipe = serde_json::from_value(json!({
        "id": 1,
        "title": "Toast",
        "content": "toast",
        "date_added": "2024-06-01 08:30:15"
    }))
    .unwrap();

    assert!(!favorite.starred);
    assert!(favorite.added_at().is_some());
}

#[test]
fn test_favorite_unparseable_date_label_falls_back_to_raw() {
    let favorite = FavoriteRecipe {
        id: 1,
        title: "Toast".into(),
        content: "toast".into(),
        date_added: "sometime".into(),
        starred: false,
    };

    assert!(favorite.added_at().is_none());
    assert_eq!(favorite.added_date_label(), "sometime");
}
