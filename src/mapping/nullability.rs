//! Column nullability.

use crate::graph::NodeIndex;
use crate::semantic::{keyed, keys, Annotations};

use super::{Context, MappingResult};

/// Explicit nullability on one node. `not-null` wins over `null`.
fn explicit(a: &Annotations, null: &str, not_null: &str) -> Option<bool> {
    if a.has(not_null) {
        Some(false)
    } else if a.has(null) {
        Some(true)
    } else {
        None
    }
}

impl Context<'_> {
    /// Whether the column for `m` (or its `kp` sub-value) may be NULL.
    ///
    /// Checked in order, first hit wins: the member's own annotations, the
    /// container type's `<kp>-` annotations, the value type's annotations,
    /// then the default. Object pointers default to nullable. Other types
    /// are not-null unless they are a wrapper whose null handler defaults
    /// to null, or whose wrapped type is annotated `null`.
    pub fn null(&self, m: NodeIndex, kp: &str) -> MappingResult<bool> {
        let null_key = keyed(kp, keys::NULL);
        let not_null_key = keyed(kp, keys::NOT_NULL);

        if let Some(r) = explicit(self.annotations(m), &null_key, &not_null_key) {
            return Ok(r);
        }

        if !kp.is_empty() {
            let c = self.unqualified(self.member_type(m, "")?);
            if let Some(r) = explicit(self.annotations(c), &null_key, &not_null_key) {
                return Ok(r);
            }
        }

        let t = self.member_type(m, kp)?;
        if let Some(r) = explicit(
            self.annotations(self.unqualified(t)),
            keys::NULL,
            keys::NOT_NULL,
        ) {
            return Ok(r);
        }

        if self.object_pointer(t).is_some() {
            return Ok(true);
        }

        Ok(self.wrapper_null(t))
    }

    fn wrapper_null(&self, t: NodeIndex) -> bool {
        let Some(wt) = self.wrapper(t) else {
            return false;
        };
        let a = self.annotations(self.unqualified(t));
        (a.get_bool(keys::WRAPPER_NULL_HANDLER) && a.get_bool(keys::WRAPPER_NULL_DEFAULT))
            || self.annotations(self.unqualified(wt)).has(keys::NULL)
    }
}
