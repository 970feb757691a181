#[cfg(test)]
mod tests {
    use relmap::relational::{QName, RelKind, RelationalError, RelationalGraph, UName};

    fn names(g: &RelationalGraph, scope: relmap::graph::NodeIndex) -> Vec<String> {
        g.members(scope)
            .into_iter()
            .filter_map(|n| g.name(n))
            .collect()
    }

    #[test]
    fn test_build_table_with_keys() {
        let mut g = RelationalGraph::new();
        let person = g.add_table("::person");
        g.add_qnames(person, QName::from("hr.person")).unwrap();

        let id = g.add_column("id", "BIGINT", false, "");
        g.add_unames(person, id, "id").unwrap();
        let pk = g.add_primary_key("::person");
        g.add_unames(person, pk, "person_pk").unwrap();
        g.add_contains(pk, id).unwrap();

        // A column added after the key still lands before it.
        let name = g.add_column("name", "TEXT", true, "");
        g.add_unames(person, name, "name").unwrap();

        assert_eq!(names(&g, person), ["id", "name", "person_pk"]);
        assert_eq!(g.columns(person), [id, name]);
        assert_eq!(g.primary_key(person), Some(pk));
        assert_eq!(g.key_columns(pk), [id]);
        assert_eq!(g.scope_of(name), Some(person));
        assert!(g.scope_is_consistent(person));

        assert_eq!(g.find_table(&QName::from("hr.person")), Some(person));
        assert_eq!(g.find_table(&QName::from("person")), None);
        assert_eq!(g.qname(person).unwrap().to_string(), "hr.person");
        assert_eq!(
            g.qname(person).unwrap().qualifier(),
            Some(QName::from("hr"))
        );
    }

    #[test]
    fn test_duplicates_leave_graph_unchanged() {
        let mut g = RelationalGraph::new();
        let t = g.add_table("::person");
        g.add_qnames(t, QName::from("person")).unwrap();
        let a = g.add_column("m_name", "TEXT", false, "");
        g.add_unames(t, a, "name").unwrap();
        let b = g.add_column("name_", "TEXT", false, "");

        let err = g.add_unames(t, b, "name").unwrap_err();
        assert!(!err.is_fatal());
        let dup = err.as_duplicate().unwrap();
        assert_eq!(dup.scope, t);
        assert_eq!(dup.orig, a);
        assert_eq!(dup.dup, b);
        assert_eq!(dup.name, "name");

        assert_eq!(g.columns(t), [a]);
        assert_eq!(g.uname(b), None);

        // The rejected column can still be named under another name.
        g.add_unames(t, b, UName::new("name_2")).unwrap();
        assert_eq!(names(&g, t), ["name", "name_2"]);
    }

    #[test]
    fn test_correlation_ids_identify_nodes() {
        let mut g = RelationalGraph::new();
        let t = g.add_table("::person");
        g.add_qnames(t, QName::from("person")).unwrap();
        let col = g.add_column("employer", "BIGINT", true, "");
        g.add_unames(t, col, "employer").unwrap();
        let fk = g.add_foreign_key("employer", QName::from("employer"), vec!["id".into()]);
        g.add_unames(t, fk, "person_employer_fk").unwrap();
        g.add_contains(fk, col).unwrap();

        assert_eq!(g.find_by_id(t, "column", "employer"), Some(col));
        assert_eq!(g.find_by_id(t, "foreign key", "employer"), Some(fk));
        assert_eq!(g.find_by_id(t, "index", "employer"), None);
        assert_eq!(g.find_by_id(g.model(), "table", "::person"), Some(t));

        match g.node(fk).kind() {
            RelKind::ForeignKey {
                referenced_table,
                referenced_columns,
            } => {
                assert_eq!(referenced_table.to_string(), "employer");
                assert_eq!(referenced_columns, &["id".to_string()]);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_contract_violations_are_fatal() {
        let mut g = RelationalGraph::new();
        let t = g.add_table("::person");
        let c = g.add_column("id", "BIGINT", false, "");

        // Only tables carry qualified names.
        let err = g.add_qnames(c, QName::from("x")).unwrap_err();
        assert!(matches!(err, RelationalError::NotNameable { .. }));
        assert!(err.is_fatal());

        g.add_qnames(t, QName::from("person")).unwrap();
        g.add_unames(t, c, "id").unwrap();
        let err = g.add_unames(t, c, "id2").unwrap_err();
        assert_eq!(err, RelationalError::AlreadyNamed(c));

        let other = g.add_column("x", "INTEGER", false, "");
        let err = g.add_contains(c, other).unwrap_err();
        assert!(matches!(err, RelationalError::InvalidContains { .. }));
    }
}
