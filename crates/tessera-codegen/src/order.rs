//! Emission order for struct types. The generated Ruby resolves the base
//! class of a declaration when it reads it, so every base must be declared
//! before anything that extends it.

use std::collections::{HashSet, VecDeque};

use tessera_model::{Model, StructType};

/// Orders the struct types of `model` so that names are lexicographic except
/// where a base has to precede one of its derivations.
///
/// The queue starts name-sorted; a type is accepted when its base is absent
/// or already accepted, and requeued at the back otherwise. This terminates
/// only under the upstream guarantee that the base graph is acyclic.
pub fn inheritance_order(model: &Model) -> Vec<&StructType> {
    let mut seed: Vec<&StructType> = model.struct_types().collect();
    seed.sort_by(|a, b| a.name.cmp(&b.name));

    let mut pending: VecDeque<&StructType> = seed.into();
    let mut accepted: HashSet<&str> = HashSet::with_capacity(pending.len());
    let mut sorted: Vec<&StructType> = Vec::with_capacity(pending.len());

    while let Some(current) = pending.pop_front() {
        match &current.base {
            Some(base) if !accepted.contains(base.as_str()) => pending.push_back(current),
            _ => {
                accepted.insert(current.name.as_str());
                sorted.push(current);
            }
        }
    }

    sorted
}
