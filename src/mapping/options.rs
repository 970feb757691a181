//! Column options (`NOT NULL`-style trailing clauses supplied by pragmas).

use crate::graph::NodeIndex;
use crate::semantic::{keyed, keys, Annotations};

use super::{Context, MappingResult};

/// Append `key`'s option tokens to `out`. An empty token discards
/// everything accumulated so far.
fn accumulate(out: &mut String, a: &Annotations, key: &str) {
    let Some(tokens) = a.get_strings(key) else {
        return;
    };
    for token in tokens {
        if token.is_empty() {
            out.clear();
        } else {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(token);
        }
    }
}

impl Context<'_> {
    /// Options for the column of `m` (or of its `kp` sub-value).
    ///
    /// Without a key prefix: the type's `options`, then the member's.
    /// With one: the value type's `options`, then the container type's
    /// `<kp>-options`, then the member's `<kp>-options`.
    pub fn column_options(&self, m: NodeIndex, kp: &str) -> MappingResult<String> {
        let mut r = String::new();

        if kp.is_empty() {
            let t = self.unqualified(self.member_type(m, "")?);
            accumulate(&mut r, self.annotations(t), keys::OPTIONS);
            accumulate(&mut r, self.annotations(m), keys::OPTIONS);
        } else {
            let key = keyed(kp, keys::OPTIONS);
            let t = self.unqualified(self.member_type(m, kp)?);
            let c = self.unqualified(self.member_type(m, "")?);
            accumulate(&mut r, self.annotations(t), keys::OPTIONS);
            accumulate(&mut r, self.annotations(c), &key);
            accumulate(&mut r, self.annotations(m), &key);
        }

        Ok(r)
    }

    /// Options for the object id column of container member `m`'s table.
    /// The id has no value type of its own, so only the container type's
    /// and the member's `id-options` apply.
    pub fn container_id_options(&self, m: NodeIndex) -> MappingResult<String> {
        let mut r = String::new();
        let c = self.unqualified(self.member_type(m, "")?);
        accumulate(&mut r, self.annotations(c), keys::ID_OPTIONS);
        accumulate(&mut r, self.annotations(m), keys::ID_OPTIONS);
        Ok(r)
    }
}
