#[cfg(test)]
mod tests {
    use std::io::Write;

    use insta::assert_snapshot;
    use relmap::ident::{
        escape, flat_name, public_name, public_name_db, strlit, upcase, KeywordSet, OutputError,
        OutputStack, Sink,
    };
    use relmap::Settings;

    #[test]
    fn test_escape_rules() {
        let kw = KeywordSet::new();
        assert_eq!(escape("person", &kw), "person");
        assert_eq!(escape("2nd", &kw), "cxx_2nd");
        assert_eq!(escape("-x", &kw), "cxx_x");
        assert_eq!(escape("first name", &kw), "first_name");
        assert_eq!(escape("", &kw), "cxx");
        assert_eq!(escape("class", &kw), "class_");
        assert_eq!(escape("class", &KeywordSet::empty()), "class");
    }

    #[test]
    fn test_settings_reserved_words_extend_keywords() {
        let settings = Settings {
            reserved_words: vec!["select".to_string()],
            ..Settings::default()
        };
        let kw = settings.keyword_set();
        assert!(kw.contains("select"));
        assert!(kw.contains("delete"));
        assert_eq!(public_name("m_select", &kw), "select_");
        assert_eq!(public_name("m_order", &kw), "order");
    }

    #[test]
    fn test_public_names() {
        assert_eq!(public_name_db("_x_"), "x");
        assert_eq!(public_name_db("m_id"), "id");
        assert_eq!(public_name_db("id_"), "id");
        assert_eq!(upcase("person_pk"), "PERSON_PK");
        assert_eq!(flat_name("::hr::person"), "hr_person");
    }

    #[test]
    fn test_deferred_block_with_literals() {
        let mut out = OutputStack::new(Sink::buffer());
        writeln!(out, "// tables").unwrap();

        out.diverge_buffer();
        for name in ["person", "say \"hi\"", "line\nbreak"] {
            writeln!(out, "{},", strlit(name)).unwrap();
        }
        let table_list = out.restore().unwrap().into_string().unwrap();

        writeln!(out, "const char* names[] = {{").unwrap();
        out.write_all(table_list.as_bytes()).unwrap();
        writeln!(out, "}};").unwrap();

        let text = out.into_inner().unwrap().into_string().unwrap();
        assert_snapshot!(text.trim_end(), @r#"
        // tables
        const char* names[] = {
        "person",
        "say \"hi\"",
        "line\nbreak",
        };
        "#);
    }

    #[test]
    fn test_restore_without_diverge() {
        let mut out = OutputStack::new(Sink::buffer());
        assert_eq!(out.restore().unwrap_err(), OutputError::UnbalancedRestore);
        assert!(Sink::writer(Vec::new()).into_string().is_none());
    }
}
