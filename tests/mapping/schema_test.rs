mod fixture;

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use super::fixture::{Fixture, People};
    use insta::assert_snapshot;
    use relmap::diagnostics::Diagnostic;
    use relmap::graph::NodeIndex;
    use relmap::relational::{RelKind, RelationalGraph};
    use relmap::semantic::keys;
    use relmap::{Context, Dialect, Settings};

    fn column_list(model: &RelationalGraph, key: NodeIndex) -> String {
        model
            .key_columns(key)
            .into_iter()
            .filter_map(|c| model.uname(c).map(|n| n.to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn dump(model: &RelationalGraph) -> String {
        let mut out = String::new();
        for t in model.tables() {
            let table = model.qname(t).map(|q| q.to_string()).unwrap_or_default();
            writeln!(out, "table {}", table).unwrap();
            for n in model.members(t) {
                let name = model.uname(n).map(|u| u.to_string()).unwrap_or_default();
                match model.node(n).kind() {
                    RelKind::Column {
                        type_,
                        null,
                        options,
                    } => {
                        let null = if *null { "NULL" } else { "NOT NULL" };
                        if options.is_empty() {
                            writeln!(out, "  column {} {} {}", name, type_, null).unwrap();
                        } else {
                            writeln!(out, "  column {} {} {} {}", name, type_, null, options)
                                .unwrap();
                        }
                    }
                    RelKind::PrimaryKey => {
                        writeln!(out, "  primary key {} ({})", name, column_list(model, n))
                            .unwrap();
                    }
                    RelKind::ForeignKey {
                        referenced_table,
                        referenced_columns,
                    } => {
                        writeln!(
                            out,
                            "  foreign key {} ({}) -> {} ({})",
                            name,
                            column_list(model, n),
                            referenced_table,
                            referenced_columns.join(", ")
                        )
                        .unwrap();
                    }
                    RelKind::Index { unique } => {
                        let kind = if *unique { "unique index" } else { "index" };
                        writeln!(out, "  {} {} ({})", kind, name, column_list(model, n)).unwrap();
                    }
                    RelKind::Model | RelKind::Table => {}
                }
            }
        }
        out
    }

    #[test]
    fn test_people_schema() {
        let p = People::new();
        let settings = Settings::default();
        let ctx = Context::new(&p.f.g, &settings).unwrap();

        let build = ctx.build_schema().unwrap();
        assert!(!build.has_conflicts());
        assert!(!build.has_errors());
        assert_snapshot!(dump(&build.model).trim_end(), @r"
        table employer
          column id BIGINT NOT NULL
          column name VARCHAR NOT NULL
          column founded INTEGER NOT NULL
          primary key employer_pk (id)
        table person
          column id BIGINT NOT NULL
          column name_first VARCHAR NOT NULL
          column name_last VARCHAR NOT NULL
          column employer BIGINT NULL
          primary key person_pk (id)
          foreign key person_employer_fk (employer) -> employer (id)
        table person_tags
          column object_id BIGINT NOT NULL
          column index UBIGINT NOT NULL
          column value VARCHAR NOT NULL
          index person_tags_object_id_i (object_id)
          foreign key person_tags_object_id_fk (object_id) -> person (id)
        table empty
        ");
    }

    #[test]
    fn test_table_columns_match_in_column_count() {
        let p = People::new();
        let settings = Settings::default();
        let ctx = Context::new(&p.f.g, &settings).unwrap();
        let build = ctx.build_schema().unwrap();

        for class in [p.person, p.employer, p.empty] {
            let qname = ctx.table_qname(class);
            let table = build.model.find_table(&qname).unwrap();
            assert_eq!(
                build.model.columns(table).len(),
                ctx.in_column_count(class).unwrap(),
                "{}",
                qname
            );
            assert!(build.model.scope_is_consistent(table));
        }
    }

    #[test]
    fn test_auto_id_gets_identity_clause() {
        let p = People::new();
        let settings = Settings {
            database: Dialect::Postgres,
            ..Settings::default()
        };
        let ctx = Context::new(&p.f.g, &settings).unwrap();
        let resolved = ctx.resolve_class(p.person).unwrap();

        let id = resolved.id_column().unwrap();
        assert_eq!(id.name, "id");
        assert_eq!(id.type_, "BIGINT");
        assert_eq!(id.options, "GENERATED BY DEFAULT AS IDENTITY");
    }

    #[test]
    fn test_duplicate_column_names_are_conflicts() {
        let mut f = Fixture::new();
        let clash = f.object("clash");
        f.id(clash, "id", f.long);
        f.member(clash, "m_name", f.string);
        let dup = f.member(clash, "name_", f.string);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        let build = ctx.build_schema().unwrap();

        assert_eq!(build.conflicts.len(), 1);
        let conflict = &build.conflicts[0];
        assert_eq!(conflict.duplicate.name, "name");
        assert_eq!(&conflict.location, f.g.node(dup).location());

        let table = build.model.tables()[0];
        assert_eq!(build.model.columns(table).len(), 2);

        let d = Diagnostic::from_conflict(&build.model, conflict);
        assert!(d
            .to_string()
            .ends_with("error: name 'name' in table 'clash' is already used by column 'm_name'"));
    }

    #[test]
    fn test_duplicate_table_names_are_conflicts() {
        let mut f = Fixture::new();
        let a = f.object("a");
        f.id(a, "id", f.long);
        f.g.annotate(a, keys::TABLE, "shared");
        let b = f.object("b");
        f.id(b, "id", f.long);
        f.g.annotate(b, keys::TABLE, "shared");

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        let build = ctx.build_schema().unwrap();

        assert_eq!(build.model.tables().len(), 1);
        assert_eq!(build.conflicts.len(), 1);
        assert_eq!(&build.conflicts[0].location, f.g.node(b).location());
    }

    #[test]
    fn test_unmapped_members_are_collected_per_class() {
        let mut f = Fixture::new();
        let blob = f.class("blob");
        let a = f.object("a");
        f.id(a, "id", f.long);
        let a_data = f.member(a, "data", blob);
        let b = f.object("b");
        f.id(b, "id", f.long);
        let b_data = f.member(b, "data", blob);
        let c = f.object("c");
        f.id(c, "id", f.long);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        let build = ctx.build_schema().unwrap();

        assert!(build.has_errors());
        let locations: Vec<_> = build.errors.iter().map(|e| e.location()).collect();
        assert_eq!(
            locations,
            [Some(f.g.node(a_data).location()), Some(f.g.node(b_data).location())]
        );
        assert!(build.errors.iter().all(|e| !e.is_fatal()));

        // Classes with misses get no table; the rest are still built.
        let tables: Vec<_> = build
            .model
            .tables()
            .into_iter()
            .filter_map(|t| build.model.qname(t).map(|q| q.to_string()))
            .collect();
        assert_eq!(tables, ["c"]);
    }

    #[test]
    fn test_missing_id_aborts_build() {
        let mut f = Fixture::new();
        let a = f.object("a");
        f.member(a, "name", f.string);
        let b = f.object("b");
        f.id(b, "id", f.long);
        let to_a = f.pointer(a);
        f.member(b, "a", to_a);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        let err = ctx.build_schema().unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_map_container_columns() {
        let mut f = Fixture::new();
        let person = f.object("person");
        f.id(person, "id", f.long);
        let scores_t = f.map(f.string, f.int);
        let scores = f.member(person, "scores", scores_t);
        f.g.annotate(scores, keys::KEY_COLUMN, "subject");

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        let resolved = ctx.resolve_class(person).unwrap();

        let container = &resolved.containers[0];
        let names: Vec<_> = container.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["object_id", "subject", "value"]);
        assert_eq!(container.columns[1].type_, "VARCHAR");
        assert_eq!(container.columns[2].type_, "INTEGER");
    }

    #[test]
    fn test_resolved_class_json() {
        let p = People::new();
        let settings = Settings::default();
        let ctx = Context::new(&p.f.g, &settings).unwrap();
        let resolved = ctx.resolve_class(p.employer).unwrap();

        let json: serde_json::Value = serde_json::from_str(&resolved.to_json().unwrap()).unwrap();
        assert_eq!(json["name"], "::employer");
        assert_eq!(json["kind"], "object");
        assert_eq!(json["in_column_count"], 3);
        assert_eq!(json["out_column_count"], 4);
        assert_eq!(json["columns"][3]["name"], "ceo");
        assert_eq!(json["columns"][3]["inverse"], true);
        assert_eq!(json["containers"][0]["inverse"], true);
        assert!(json["containers"][0]["table"].is_null());
    }
}
