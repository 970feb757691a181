//! Member tests: "is this member a pointer / container", and "does this
//! class have any such member".

use std::fmt;
use std::ops::{BitAnd, BitOr};

use crate::graph::NodeIndex;
use crate::semantic::{keyed, keys};

use super::traversal::MemberVisitor;
use super::{Context, MappingError, MappingResult};

/// Set of member tests, combined with `|`. A query succeeds if any test
/// in the set holds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MemberTest(u16);

impl MemberTest {
    pub const POINTER: MemberTest = MemberTest(0x01);
    pub const EAGER_POINTER: MemberTest = MemberTest(0x02);
    pub const LAZY_POINTER: MemberTest = MemberTest(0x04);
    pub const CONTAINER: MemberTest = MemberTest(0x08);
    pub const STRAIGHT_CONTAINER: MemberTest = MemberTest(0x10);
    pub const INVERSE_CONTAINER: MemberTest = MemberTest(0x20);

    /// Every container test.
    pub const ANY_CONTAINER: MemberTest = MemberTest(0x08 | 0x10 | 0x20);

    pub const fn empty() -> Self {
        MemberTest(0)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every test in `other` is in `self`.
    pub const fn contains(self, other: MemberTest) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for MemberTest {
    type Output = MemberTest;

    fn bitor(self, rhs: MemberTest) -> MemberTest {
        MemberTest(self.0 | rhs.0)
    }
}

impl BitAnd for MemberTest {
    type Output = MemberTest;

    fn bitand(self, rhs: MemberTest) -> MemberTest {
        MemberTest(self.0 & rhs.0)
    }
}

impl fmt::Debug for MemberTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: &[(MemberTest, &str)] = &[
            (MemberTest::POINTER, "POINTER"),
            (MemberTest::EAGER_POINTER, "EAGER_POINTER"),
            (MemberTest::LAZY_POINTER, "LAZY_POINTER"),
            (MemberTest::CONTAINER, "CONTAINER"),
            (MemberTest::STRAIGHT_CONTAINER, "STRAIGHT_CONTAINER"),
            (MemberTest::INVERSE_CONTAINER, "INVERSE_CONTAINER"),
        ];
        let set: Vec<_> = NAMES
            .iter()
            .filter(|(t, _)| self.contains(*t))
            .map(|(_, n)| *n)
            .collect();
        write!(f, "MemberTest({})", set.join(" | "))
    }
}

/// Looks for the first member passing a test; stops the walk once found.
/// Container members are tested but never entered.
struct HasA {
    tests: MemberTest,
    found: bool,
}

impl MemberVisitor for HasA {
    fn simple(&mut self, ctx: &Context<'_>, member: NodeIndex) -> MappingResult<()> {
        self.found = ctx.is_a(member, self.tests)?;
        Ok(())
    }

    fn container(
        &mut self,
        ctx: &Context<'_>,
        member: NodeIndex,
        container: NodeIndex,
    ) -> MappingResult<()> {
        let vt = ctx.container_vt(container)?;
        self.found = ctx.is_a_typed(
            member,
            self.tests & MemberTest::ANY_CONTAINER,
            vt,
            keys::VALUE,
        )?;
        Ok(())
    }

    fn done(&self) -> bool {
        self.found
    }
}

impl Context<'_> {
    /// Value type of container type `c`.
    pub fn container_vt(&self, c: NodeIndex) -> MappingResult<NodeIndex> {
        self.annotations(c)
            .get_node(&keyed(keys::VALUE, keys::TREE_TYPE))
            .ok_or_else(|| MappingError::internal(c, "container has no value type"))
    }

    /// Whether member `m` passes any of `tests`.
    pub fn is_a(&self, m: NodeIndex, tests: MemberTest) -> MappingResult<bool> {
        self.is_a_typed(m, tests, self.member_type(m, "")?, "")
    }

    /// Pointer tests are applied to `t`; container tests to the member's
    /// own type, with inverseness read through key prefix `kp`.
    pub fn is_a_typed(
        &self,
        m: NodeIndex,
        tests: MemberTest,
        t: NodeIndex,
        kp: &str,
    ) -> MappingResult<bool> {
        if self.object_pointer(t).is_some() {
            let lazy = self.lazy_pointer(t);
            if tests.contains(MemberTest::POINTER)
                || (tests.contains(MemberTest::EAGER_POINTER) && !lazy)
                || (tests.contains(MemberTest::LAZY_POINTER) && lazy)
            {
                return Ok(true);
            }
        }

        if (tests & MemberTest::ANY_CONTAINER).is_empty() {
            return Ok(false);
        }
        if self.container_wrapper(self.member_type(m, "")?).is_none() {
            return Ok(false);
        }
        if tests.contains(MemberTest::CONTAINER) {
            return Ok(true);
        }

        let inverse = self.inverse(m, kp)?;
        Ok((tests.contains(MemberTest::STRAIGHT_CONTAINER) && !inverse)
            || (tests.contains(MemberTest::INVERSE_CONTAINER) && inverse))
    }

    /// Whether any persistent member of `c`, including members of bases
    /// and composite members, passes any of `tests`.
    pub fn has_a(&self, c: NodeIndex, tests: MemberTest) -> MappingResult<bool> {
        let mut visitor = HasA {
            tests,
            found: false,
        };
        visitor.class(self, c)?;
        Ok(visitor.found)
    }
}
