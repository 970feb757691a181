mod fixture;

#[cfg(test)]
mod tests {
    use super::fixture::{Fixture, People};
    use relmap::graph::Fact;
    use relmap::mapping::MemberTest;
    use relmap::semantic::keys;
    use relmap::{Context, Settings};

    #[test]
    fn test_counts_with_composite_and_pointer() {
        let p = People::new();
        let settings = Settings::default();
        let ctx = Context::new(&p.f.g, &settings).unwrap();

        // id, name.first, name.last, employer; the container and the
        // transient member do not count.
        assert_eq!(ctx.in_column_count(p.person).unwrap(), 4);
        assert_eq!(ctx.out_column_count(p.person).unwrap(), 4);
    }

    #[test]
    fn test_inverse_member_only_counts_out() {
        let p = People::new();
        let settings = Settings::default();
        let ctx = Context::new(&p.f.g, &settings).unwrap();

        assert_eq!(ctx.in_column_count(p.employer).unwrap(), 3);
        assert_eq!(ctx.out_column_count(p.employer).unwrap(), 4);
    }

    #[test]
    fn test_empty_class() {
        let p = People::new();
        let settings = Settings::default();
        let ctx = Context::new(&p.f.g, &settings).unwrap();

        assert_eq!(ctx.in_column_count(p.empty).unwrap(), 0);
        assert_eq!(ctx.out_column_count(p.empty).unwrap(), 0);
    }

    #[test]
    fn test_composite_counts_are_memoized() {
        let p = People::new();
        let settings = Settings::default();
        let ctx = Context::new(&p.f.g, &settings).unwrap();

        let facts = p.f.g.node(p.name_t).facts();
        assert!(!facts.is_cached(Fact::InColumnCount));

        ctx.in_column_count(p.person).unwrap();
        assert!(facts.is_cached(Fact::InColumnCount));
        assert!(!facts.is_cached(Fact::OutColumnCount));
        assert_eq!(ctx.in_column_count(p.name_t).unwrap(), 2);
    }

    #[test]
    fn test_value_with_column_type_is_a_single_column() {
        let mut f = Fixture::new();
        let money = f.composite("money");
        f.member(money, "cents", f.long);
        f.member(money, "currency", f.string);
        let account = f.object("account");
        f.id(account, "id", f.long);
        f.member(account, "balance", money);

        {
            let settings = Settings::default();
            let ctx = Context::new(&f.g, &settings).unwrap();
            assert!(ctx.composite(money));
        }

        // The same class mapped to one database type stops being a
        // composite.
        let mut f2 = Fixture::new();
        let money2 = f2.composite("money");
        f2.g.annotate(money2, keys::TYPE, "DECIMAL(12, 2)");
        f2.member(money2, "cents", f2.long);
        let account2 = f2.object("account");
        f2.id(account2, "id", f2.long);
        let balance = f2.member(account2, "balance", money2);

        let settings = Settings::default();
        let ctx = Context::new(&f2.g, &settings).unwrap();
        assert!(!ctx.composite(money2));
        assert_eq!(ctx.in_column_count(account2).unwrap(), 2);
        assert_eq!(ctx.column_type(balance, "").unwrap(), "DECIMAL(12, 2)");

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        assert_eq!(ctx.in_column_count(account).unwrap(), 3);
    }

    #[test]
    fn test_composite_base_is_counted() {
        let mut f = Fixture::new();
        let stamps = f.composite("timestamps");
        f.member(stamps, "created", f.long);
        f.member(stamps, "updated", f.long);
        let audited = f.object("audited");
        f.g.new_inherits(audited, stamps, relmap::semantic::Access::Public, false)
            .unwrap();
        f.id(audited, "id", f.long);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        assert_eq!(ctx.in_column_count(audited).unwrap(), 3);

        let resolved = ctx.resolve_class(audited).unwrap();
        let names: Vec<_> = resolved.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["created", "updated", "id"]);
    }

    #[test]
    fn test_id_member() {
        let p = People::new();
        let settings = Settings::default();
        let ctx = Context::new(&p.f.g, &settings).unwrap();

        assert_eq!(ctx.id_member(p.person).unwrap(), Some(p.person_id));
        assert_eq!(ctx.id_member(p.empty).unwrap(), None);
        assert!(p.f.g.node(p.person).facts().is_cached(Fact::IdMember));
    }

    #[test]
    fn test_has_a() {
        let p = People::new();
        let settings = Settings::default();
        let ctx = Context::new(&p.f.g, &settings).unwrap();

        assert!(ctx.has_a(p.person, MemberTest::POINTER).unwrap());
        assert!(ctx.has_a(p.person, MemberTest::EAGER_POINTER).unwrap());
        assert!(!ctx.has_a(p.person, MemberTest::LAZY_POINTER).unwrap());
        assert!(ctx.has_a(p.person, MemberTest::STRAIGHT_CONTAINER).unwrap());
        assert!(!ctx.has_a(p.person, MemberTest::INVERSE_CONTAINER).unwrap());

        assert!(ctx.has_a(p.employer, MemberTest::INVERSE_CONTAINER).unwrap());
        assert!(!ctx.has_a(p.employer, MemberTest::STRAIGHT_CONTAINER).unwrap());
        assert!(!ctx.has_a(p.empty, MemberTest::POINTER | MemberTest::CONTAINER).unwrap());
        assert!(!ctx.has_a(p.name_t, MemberTest::POINTER).unwrap());
    }

    #[test]
    fn test_is_a_containers() {
        let p = People::new();
        let settings = Settings::default();
        let ctx = Context::new(&p.f.g, &settings).unwrap();

        assert!(ctx.is_a(p.person_tags, MemberTest::CONTAINER).unwrap());
        assert!(!ctx.is_a(p.person_tags, MemberTest::POINTER).unwrap());
        assert!(!ctx.is_a(p.person_name, MemberTest::CONTAINER).unwrap());

        let vt = ctx.member_type(p.employer_staff, "value").unwrap();
        assert!(ctx
            .is_a_typed(p.employer_staff, MemberTest::INVERSE_CONTAINER, vt, "value")
            .unwrap());
        assert!(ctx.inverse(p.employer_ceo, "").unwrap());
        assert!(!ctx.inverse(p.person_employer, "").unwrap());
        assert!(ctx.transient(p.person_scratch));
    }
}
