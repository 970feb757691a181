mod fixture;

#[cfg(test)]
mod tests {
    use super::fixture::{Fixture, People};
    use relmap::mapping::{ClassKind, TablePrefix};
    use relmap::semantic::keys;
    use relmap::{Context, Settings};

    #[test]
    fn test_column_override_beats_type_default() {
        let mut f = Fixture::new();
        let person = f.object("person");
        let money = f.class("money");
        f.g.annotate(money, keys::COLUMN, "bar");
        let a = f.member(person, "salary", money);
        f.g.annotate(a, keys::COLUMN, "foo");
        let b = f.member(person, "bonus", money);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        assert_eq!(ctx.column_name(a).unwrap(), "foo");
        assert_eq!(ctx.column_name(b).unwrap(), "bar");
    }

    #[test]
    fn test_column_name_falls_back_to_public_name() {
        let mut f = Fixture::new();
        let person = f.object("person");
        let a = f.member(person, "m_age", f.int);
        let b = f.member(person, "_score_", f.int);
        let c = f.member(person, "__", f.int);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        assert_eq!(ctx.column_name(a).unwrap(), "age");
        assert_eq!(ctx.column_name(b).unwrap(), "score");
        assert_eq!(ctx.column_name(c).unwrap(), "__");
    }

    #[test]
    fn test_public_name_is_escaped() {
        let mut f = Fixture::new();
        let person = f.object("person");
        let a = f.member(person, "m_class", f.int);
        let b = f.member(person, "m_limit", f.int);

        let settings = Settings {
            reserved_words: vec!["limit".to_string()],
            ..Settings::default()
        };
        let ctx = Context::new(&f.g, &settings).unwrap();
        assert_eq!(ctx.public_name(a), "class_");
        assert_eq!(ctx.public_name(b), "limit_");
        assert_eq!(ctx.public_name_db(a), "class");
    }

    #[test]
    fn test_schema_qualified_table_names() {
        let p = People::new();
        let settings = Settings {
            schema: Some("hr".to_string()),
            table_prefix: "t_".to_string(),
            ..Settings::default()
        };
        let ctx = Context::new(&p.f.g, &settings).unwrap();

        assert_eq!(ctx.table_name(p.person), "t_person");
        assert_eq!(ctx.table_qname(p.person).to_string(), "hr.t_person");

        let prefix = TablePrefix::for_object(&ctx, p.person);
        assert_eq!(
            ctx.table_qname_for_member(p.person_tags, &prefix)
                .unwrap()
                .to_string(),
            "hr.t_person_tags"
        );
    }

    #[test]
    fn test_empty_schema_is_unqualified() {
        let p = People::new();
        let settings = Settings {
            schema: Some(String::new()),
            ..Settings::default()
        };
        let ctx = Context::new(&p.f.g, &settings).unwrap();
        assert_eq!(ctx.schema(), None);
        assert_eq!(ctx.table_qname(p.person).to_string(), "person");
    }

    #[test]
    fn test_container_table_nested_in_composite() {
        let mut f = Fixture::new();
        let contact = f.composite("contact");
        let emails_t = f.vector(f.string);
        f.member(contact, "emails", emails_t);
        let person = f.object("person");
        f.id(person, "id", f.long);
        f.member(person, "contact", contact);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        let resolved = ctx.resolve_class(person).unwrap();

        assert_eq!(resolved.containers.len(), 1);
        let emails = &resolved.containers[0];
        assert_eq!(emails.member, "contact.emails");
        assert_eq!(
            emails.table.as_ref().map(|t| t.to_string()).as_deref(),
            Some("person_contact_emails")
        );
    }

    #[test]
    fn test_table_annotation_disqualifies_composite() {
        let mut f = Fixture::new();
        let plain = f.composite("plain");
        let tabled = f.composite("tabled");
        f.g.annotate(tabled, keys::TABLE, "tabled_values");

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        assert_eq!(ctx.class_kind(plain), ClassKind::Composite);
        assert_eq!(ctx.class_kind(tabled), ClassKind::Other);
    }
}
