//! Enumeration of the paths a definition validates against a given model.

use crate::{
    path::{Path, Segment},
    value::Value,
};

use super::ValidationDefinition;

/// Every path the definition validates in `model`.
///
/// Mapping keys absent from the model are skipped along with their subtrees.
/// An array node contributes its own path only when it has a whole-array
/// validator, and recurses into each element that exists when it has an item
/// definition. A function node contributes its path unconditionally.
pub fn validation_paths(model: &Value, definition: &ValidationDefinition) -> Vec<Path> {
    let mut paths = Vec::new();
    collect(definition, model, Path::root(), &mut paths);
    paths
}

fn collect(definition: &ValidationDefinition, value: &Value, path: Path, out: &mut Vec<Path>) {
    match definition {
        ValidationDefinition::Function(_) => out.push(path),
        ValidationDefinition::Array(array) => {
            if array.array.is_some() {
                out.push(path.clone());
            }
            if let (Some(item), Some(elements)) = (&array.item, value.as_list()) {
                for (index, element) in elements.iter().enumerate() {
                    collect(item, element, path.join(index), out);
                }
            }
        }
        ValidationDefinition::Mapping(children) => {
            for (key, child) in children {
                let segment = Segment::parse(key);
                if let Some(child_value) = value.child(&segment) {
                    collect(child, child_value, path.join(segment), out);
                }
            }
        }
    }
}
