mod fixture;

#[cfg(test)]
mod tests {
    use super::fixture::{Fixture, People};
    use relmap::semantic::keys;
    use relmap::{Context, Settings};

    #[test]
    fn test_pointer_defaults_to_null() {
        let p = People::new();
        let settings = Settings::default();
        let ctx = Context::new(&p.f.g, &settings).unwrap();

        assert!(ctx.null(p.person_employer, "").unwrap());
        assert!(!ctx.null(p.person_id, "").unwrap());
    }

    #[test]
    fn test_member_not_null_beats_type_null() {
        let mut f = Fixture::new();
        let person = f.object("person");
        let m = f.member(person, "nickname", f.string);
        f.g.flag(f.string, keys::NULL);
        f.g.flag(m, keys::NOT_NULL);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        assert!(!ctx.null(m, "").unwrap());
    }

    #[test]
    fn test_member_null_beats_type_not_null() {
        let mut f = Fixture::new();
        let person = f.object("person");
        let m = f.member(person, "nickname", f.string);
        f.g.flag(f.string, keys::NOT_NULL);
        f.g.flag(m, keys::NULL);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        assert!(ctx.null(m, "").unwrap());
    }

    #[test]
    fn test_type_annotation_applies_without_member_annotation() {
        let mut f = Fixture::new();
        let person = f.object("person");
        let m = f.member(person, "nickname", f.string);
        f.g.flag(f.string, keys::NULL);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        assert!(ctx.null(m, "").unwrap());
    }

    #[test]
    fn test_not_null_pointer() {
        let mut f = Fixture::new();
        let employer = f.object("employer");
        let person = f.object("person");
        let ptr = f.pointer(employer);
        let m = f.member(person, "employer", ptr);
        f.g.flag(m, keys::NOT_NULL);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        assert!(!ctx.null(m, "").unwrap());
    }

    #[test]
    fn test_wrapper_of_null_type_is_null() {
        let mut f = Fixture::new();
        let person = f.object("person");
        let inner = f.class("maybe_int");
        f.g.flag(inner, keys::NULL);
        let wrapper = f.class("holder");
        f.g.annotate(wrapper, keys::WRAPPER, true);
        f.g.annotate(wrapper, keys::WRAPPER_TYPE, inner);
        let m = f.member(person, "score", wrapper);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        assert!(ctx.null(m, "").unwrap());
    }

    #[test]
    fn test_wrapper_fallback_is_single_level() {
        let mut f = Fixture::new();
        let person = f.object("person");

        // holder<holder<T>> where only the innermost holder defaults to null.
        let inner = f.class("inner_holder");
        f.g.annotate(inner, keys::WRAPPER, true);
        f.g.annotate(inner, keys::WRAPPER_TYPE, f.int);
        f.g.annotate(inner, keys::WRAPPER_NULL_HANDLER, true);
        f.g.annotate(inner, keys::WRAPPER_NULL_DEFAULT, true);
        let outer = f.class("outer_holder");
        f.g.annotate(outer, keys::WRAPPER, true);
        f.g.annotate(outer, keys::WRAPPER_TYPE, inner);

        let a = f.member(person, "a", inner);
        let b = f.member(person, "b", outer);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        assert!(ctx.null(a, "").unwrap());
        assert!(!ctx.null(b, "").unwrap());
    }

    #[test]
    fn test_keyed_precedence() {
        let mut f = Fixture::new();
        let person = f.object("person");
        let v = f.vector(f.string);
        let a = f.member(person, "a", v);
        let b = f.member(person, "b", v);
        let c = f.member(person, "c", v);

        // Container type says null, member b overrides, c falls through
        // to the container type.
        f.g.flag(v, keys::VALUE_NULL);
        f.g.flag(b, keys::VALUE_NOT_NULL);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        assert!(ctx.null(a, "value").unwrap());
        assert!(!ctx.null(b, "value").unwrap());
        assert!(ctx.null(c, "value").unwrap());
    }

    #[test]
    fn test_keyed_falls_back_to_value_type() {
        let mut f = Fixture::new();
        let employer = f.object("employer");
        let person = f.object("person");
        let ptr = f.pointer(employer);
        let strings = f.vector(f.string);
        let pointers = f.vector(ptr);
        let a = f.member(person, "a", strings);
        let b = f.member(person, "b", pointers);

        let settings = Settings::default();
        let ctx = Context::new(&f.g, &settings).unwrap();
        assert!(!ctx.null(a, "value").unwrap());
        assert!(ctx.null(b, "value").unwrap());
    }
}
