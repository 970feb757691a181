#[cfg(test)]
mod tests {
    use std::fs;

    use relmap::config::{RegexRule, Settings, SettingsError};
    use relmap::mapping::TypeMap;
    use relmap::Dialect;

    const CONFIG: &str = r##"
database = "postgres"
table_prefix = "app_"
schema = "${RELMAP_IT_SCHEMA}"

[type_map."::std::string"]
type = "TEXT"
id_type = "VARCHAR(128)"

[type_map."int"]
type = "SMALLINT"

[include]
prefix = "models"
regex = [
    "#^models/(.+)\\.hxx$#gen/\\1-odb.hxx#",
    "/^(.+)\\.hxx$/never-$1/",
]
"##;

    #[test]
    fn test_from_file_round_trip() {
        std::env::set_var("RELMAP_IT_SCHEMA", "accounting");
        let path = std::env::temp_dir().join("relmap_settings_test.toml");
        fs::write(&path, CONFIG).unwrap();

        let settings = Settings::from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.database, Dialect::Postgres);
        assert_eq!(
            settings.resolved_schema().unwrap().as_deref(),
            Some("accounting")
        );
        assert_eq!(settings.resolved_include_prefix().unwrap(), "models");
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("relmap_does_not_exist.toml");
        let err = Settings::from_file(&path).unwrap_err();
        assert!(matches!(err, SettingsError::FileNotFound(p) if p == path));
    }

    #[test]
    fn test_type_map_overrides_dialect_defaults() {
        let settings = Settings::parse(CONFIG).unwrap();
        let map = TypeMap::new(settings.database, &settings.type_map);

        let string = map.get("::std::string").unwrap();
        assert_eq!(string.select(false), "TEXT");
        assert_eq!(string.select(true), "VARCHAR(128)");
        assert_eq!(map.get("int").unwrap().select(true), "SMALLINT");
        assert_eq!(map.get("long int").unwrap().select(false), "BIGINT");
        assert!(map.get("::money").is_none());
    }

    #[test]
    fn test_include_rules_first_match_wins() {
        let settings = Settings::parse(CONFIG).unwrap();
        let rw = settings.include_rewriter().unwrap();

        assert_eq!(
            rw.process("person.hxx", true, None),
            "\"gen/person-odb.hxx\""
        );
        assert_eq!(rw.process("person.hxx", false, None), "\"never-person\"");
        assert_eq!(rw.process("person.h", false, Some('<')), "<person.h>");
    }

    #[test]
    fn test_bad_include_rule_is_reported() {
        let settings = Settings::parse(
            r#"
[include]
regex = ["/(unclosed/x/"]
"#,
        )
        .unwrap();

        let err = settings.include_rewriter().unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidIncludeRegex { ref rule, .. } if rule == "/(unclosed/x/"
        ));
        assert!(RegexRule::parse("|a|b|").is_ok());
    }
}
