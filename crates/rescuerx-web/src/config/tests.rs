#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = RescueConfig::from_toml("").unwrap();
        assert_eq!(config.data.source, SourceKind::Dir);
        assert_eq!(config.data.root, "./public/data");
        assert_eq!(config.data.request_timeout_secs, 15);
        assert_eq!(config.server.bind, "127.0.0.1:3001");
        assert_eq!(config.logging.filter, "rescuerx=debug,info");
    }

    #[test]
    fn test_partial_sections_keep_field_defaults() {
        let config = RescueConfig::from_toml(
            r#"
            [data]
            source = "http"
            root = "http://localhost:5173/data"

            [server]
            static_dir = "./dist"
            "#,
        )
        .unwrap();
        assert_eq!(config.data.source, SourceKind::Http);
        assert_eq!(config.data.request_timeout_secs, 15);
        assert_eq!(config.server.bind, "127.0.0.1:3001");
        assert_eq!(config.server.static_dir, "./dist");
    }

    #[test]
    fn test_unknown_source_kind_rejected() {
        assert!(RescueConfig::from_toml("[data]\nsource = \"s3\"").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = RescueConfig::load_from("/definitely/not/here/rescuerx.toml").unwrap();
        assert_eq!(config.server.bind, default_bind());
        assert!(config.loaded_from.is_none());
    }

    #[test]
    fn test_bind_override() {
        let config = RescueConfig::default().with_bind_override(Some("0.0.0.0:8080".into()));
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        let config = RescueConfig::default().with_bind_override(Some("  ".into()));
        assert_eq!(config.server.bind, "127.0.0.1:3001");
    }

    #[test]
    fn test_build_source() {
        let mut data = DataConfig::default();
        assert!(data.build_source().unwrap().describe().starts_with("dir "));

        data.source = SourceKind::Http;
        data.root = "http://localhost:5173/data".into();
        assert_eq!(data.build_source().unwrap().describe(), "http http://localhost:5173/data/");

        data.root = "not a url".into();
        assert!(data.build_source().is_err());
        data.root = String::new();
        assert!(data.build_source().is_err());
    }

    #[test]
    fn test_load_from_file_records_origin() {
        let path = std::env::temp_dir().join(format!("rescuerx-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[server]\nbind = \"0.0.0.0:9000\"\n").unwrap();
        let config = RescueConfig::load_from(&path).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.loaded_from.as_deref(), Some(path.as_path()));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_example_config_parses() {
        let example = include_str!("../../../../rescuerx.example.toml");
        let config = RescueConfig::from_toml(example).unwrap();
        assert_eq!(config.data.source, SourceKind::Dir);
    }
}
