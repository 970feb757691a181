//! Semantic graph builders shared by the mapping tests.
//!
//! Stands in for the front end: declares classes and members and attaches
//! the annotations the front end would derive from pragmas.

#![allow(dead_code)]

use relmap::graph::{Location, NodeIndex};
use relmap::semantic::{keys, SemanticGraph};

pub const FILE: &str = "person.hxx";

pub struct Fixture {
    pub g: SemanticGraph,
    pub int: NodeIndex,
    pub long: NodeIndex,
    pub ulong: NodeIndex,
    pub string: NodeIndex,
    line: usize,
}

impl Fixture {
    pub fn new() -> Self {
        let mut g = SemanticGraph::new(FILE);
        let unit = g.unit();
        let std = g.add_namespace(Location::new(FILE, 1, 1));
        g.define(unit, std, "std").unwrap();
        let string = g.add_class(Location::new(FILE, 2, 1));
        g.define(std, string, "string").unwrap();

        let int = g.add_fundamental("int");
        let long = g.add_fundamental("long int");
        let ulong = g.add_fundamental("long unsigned int");

        Self {
            g,
            int,
            long,
            ulong,
            string,
            line: 10,
        }
    }

    pub fn next_loc(&mut self) -> Location {
        self.line += 1;
        Location::new(FILE, self.line, 1)
    }

    pub fn class(&mut self, name: &str) -> NodeIndex {
        let unit = self.g.unit();
        let loc = self.next_loc();
        let c = self.g.add_class(loc);
        self.g.define(unit, c, name).unwrap();
        c
    }

    pub fn object(&mut self, name: &str) -> NodeIndex {
        let c = self.class(name);
        self.g.flag(c, keys::OBJECT);
        c
    }

    pub fn composite(&mut self, name: &str) -> NodeIndex {
        let c = self.class(name);
        self.g.flag(c, keys::VALUE);
        c
    }

    pub fn member(&mut self, class: NodeIndex, name: &str, type_: NodeIndex) -> NodeIndex {
        let loc = self.next_loc();
        let m = self.g.add_data_member(loc);
        self.g.define(class, m, name).unwrap();
        self.g.new_belongs(m, type_, None).unwrap();
        m
    }

    /// Member annotated as the object id.
    pub fn id(&mut self, class: NodeIndex, name: &str, type_: NodeIndex) -> NodeIndex {
        let m = self.member(class, name, type_);
        self.g.flag(m, keys::ID);
        m
    }

    pub fn pointer(&mut self, to: NodeIndex) -> NodeIndex {
        let loc = self.next_loc();
        let p = self.g.add_type_instantiation(loc, vec![self.g.name(to)]);
        self.g.annotate(p, keys::ELEMENT_TYPE, to);
        p
    }

    pub fn lazy_pointer(&mut self, to: NodeIndex) -> NodeIndex {
        let p = self.pointer(to);
        self.g.annotate(p, keys::POINTER_LAZY, true);
        p
    }

    /// `vector<value>` with an unsigned index.
    pub fn vector(&mut self, value: NodeIndex) -> NodeIndex {
        let loc = self.next_loc();
        let v = self
            .g
            .add_type_instantiation(loc, vec![self.g.fq_name(value)]);
        self.g.annotate(v, keys::CONTAINER_KIND, "vector");
        self.g.annotate(v, "value-tree-type", value);
        self.g.annotate(v, "index-tree-type", self.ulong);
        v
    }

    pub fn map(&mut self, key: NodeIndex, value: NodeIndex) -> NodeIndex {
        let loc = self.next_loc();
        let m = self.g.add_type_instantiation(
            loc,
            vec![self.g.fq_name(key), self.g.fq_name(value)],
        );
        self.g.annotate(m, keys::CONTAINER_KIND, "map");
        self.g.annotate(m, "key-tree-type", key);
        self.g.annotate(m, "value-tree-type", value);
        m
    }
}

/// The people/employers model most tests share.
///
/// ```text
/// value  name_t   { first: string, last: string }
/// object employer { id: long (id), name: string, founded: int,
///                   ceo: person* (inverse),
///                   staff: vector<person*> (value inverse) }
/// object person   { id: long (id, auto), name: name_t,
///                   employer: employer*, tags: vector<string>,
///                   scratch: int (transient) }
/// object empty    { }
/// ```
pub struct People {
    pub f: Fixture,
    pub name_t: NodeIndex,
    pub employer: NodeIndex,
    pub person: NodeIndex,
    pub empty: NodeIndex,
    pub person_id: NodeIndex,
    pub person_name: NodeIndex,
    pub person_employer: NodeIndex,
    pub person_tags: NodeIndex,
    pub person_scratch: NodeIndex,
    pub employer_ceo: NodeIndex,
    pub employer_staff: NodeIndex,
}

impl People {
    pub fn new() -> Self {
        let mut f = Fixture::new();

        let name_t = f.composite("name_t");
        let employer = f.object("employer");
        let person = f.object("person");
        let empty = f.object("empty");

        f.member(name_t, "first", f.string);
        f.member(name_t, "last", f.string);

        f.id(employer, "id", f.long);
        f.member(employer, "name", f.string);
        f.member(employer, "founded", f.int);
        let to_person = f.pointer(person);
        let employer_ceo = f.member(employer, "ceo", to_person);
        f.g.annotate(employer_ceo, keys::INVERSE, "employer");
        let staff_t = f.vector(to_person);
        let employer_staff = f.member(employer, "staff", staff_t);
        f.g.annotate(employer_staff, "value-inverse", "employer");

        let person_id = f.id(person, "id", f.long);
        f.g.flag(person_id, keys::AUTO);
        let person_name = f.member(person, "name", name_t);
        let to_employer = f.pointer(employer);
        let person_employer = f.member(person, "employer", to_employer);
        let tags_t = f.vector(f.string);
        let person_tags = f.member(person, "tags", tags_t);
        let person_scratch = f.member(person, "scratch", f.int);
        f.g.flag(person_scratch, keys::TRANSIENT);

        Self {
            f,
            name_t,
            employer,
            person,
            empty,
            person_id,
            person_name,
            person_employer,
            person_tags,
            person_scratch,
            employer_ceo,
            employer_staff,
        }
    }
}
