use crate::Theme;

use std::str::FromStr;

#[test]
fn test_theme_default_is_light() {
    assert_eq!(Theme::default(), Theme::Light);
}

#[test]
fn test_theme_toggle_round_trip() {
    assert_eq!(Theme::Light.toggle(), Theme::Dark);
    assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
}

#[test]
fn test_theme_from_str() {
    assert_eq!(Theme::from_str("dark").unwrap(), Theme::Dark);
    assert!(Theme::from_str("sepia").is_err());
}
