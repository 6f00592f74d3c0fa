//! Dotted-path get/set/add over [`Tree`]
//!
//! Paths use `.` as the nesting separator; purely numeric segments address
//! list indices. There is no escaping mechanism for literal dots in keys.

use crate::tree::{Map, Tree};

/// Resolve a dotted path to a subtree, if present.
///
/// The empty path resolves to the tree itself.
pub fn get<'a>(tree: &'a Tree, path: &str) -> Option<&'a Tree> {
    if path.is_empty() {
        return Some(tree);
    }
    let mut node = tree;
    for seg in path.split('.') {
        node = match node {
            Tree::Map(map) => map.get(seg)?,
            Tree::List(list) => list.get(parse_index(seg)?)?,
            Tree::Scalar(_) => return None,
        };
    }
    Some(node)
}

/// Write `value` at a dotted path, replacing whatever was there.
///
/// Missing intermediate segments are created as maps; scalar intermediates
/// are overwritten with maps. A numeric segment one past the end of a list
/// appends to it; a non-numeric or sparse segment coerces the list to a map
/// with the existing elements kept under their index keys. Never fails.
pub fn set(tree: &mut Tree, path: &str, value: Tree) {
    if path.is_empty() {
        *tree = value;
        return;
    }
    match path.split_once('.') {
        None => set_segment(tree, path, value),
        Some((head, rest)) => set(descend(tree, head), rest, value),
    }
}

/// Write `value` at a dotted path only when the path is currently absent.
pub fn add(tree: &mut Tree, path: &str, value: Tree) {
    if get(tree, path).is_none() {
        set(tree, path, value);
    }
}

fn parse_index(seg: &str) -> Option<usize> {
    if seg.is_empty() || !seg.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    seg.parse().ok()
}

fn set_segment(node: &mut Tree, seg: &str, value: Tree) {
    if let (Tree::List(list), Some(idx)) = (&mut *node, parse_index(seg)) {
        if idx < list.len() {
            if let Some(slot) = list.get_mut(idx) {
                *slot = value;
            }
            return;
        }
        if idx == list.len() {
            list.push(value);
            return;
        }
        // sparse index: fall through and key the map by the numeric string
    }
    force_map(node).insert(seg, value);
}

fn descend<'a>(node: &'a mut Tree, seg: &str) -> &'a mut Tree {
    let list_idx = match (&*node, parse_index(seg)) {
        (Tree::List(list), Some(idx)) if idx <= list.len() => Some(idx),
        _ => None,
    };
    let slot = match (node, list_idx) {
        (Tree::List(list), Some(idx)) => {
            if idx == list.len() {
                list.push(Tree::Map(Map::new()));
            }
            // idx < len after the conditional push
            #[allow(clippy::indexing_slicing)]
            let slot = &mut list.0[idx];
            slot
        }
        (node, _) => force_map(node)
            .0
            .entry(seg.to_string())
            .or_insert_with(|| Tree::Map(Map::new())),
    };
    if slot.is_scalar() {
        *slot = Tree::Map(Map::new());
    }
    slot
}

#[allow(clippy::unreachable)]
fn force_map(node: &mut Tree) -> &mut Map {
    if let Tree::List(list) = node {
        // keying into a list coerces it to a map, elements kept under
        // their index
        let items = std::mem::take(&mut list.0);
        *node = Tree::Map(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item))
                .collect(),
        );
    }
    if !node.is_map() {
        *node = Tree::Map(Map::new());
    }
    match node {
        Tree::Map(map) => map,
        _ => unreachable!("node was just replaced with a map"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(s: &str) -> Tree {
        Tree::Scalar(s.to_string())
    }

    #[test]
    fn test_get_after_set() {
        let mut tree = Tree::default();
        set(&mut tree, "a.b", scalar("v"));
        assert_eq!(get(&tree, "a.b"), Some(&scalar("v")));
    }

    #[test]
    fn test_set_replaces() {
        let mut tree = Tree::default();
        set(&mut tree, "a", scalar("1"));
        set(&mut tree, "a", scalar("2"));
        assert_eq!(get(&tree, "a"), Some(&scalar("2")));
    }

    #[test]
    fn test_add_never_overwrites() {
        let mut tree = Tree::default();
        set(&mut tree, "a", scalar("1"));
        add(&mut tree, "a", scalar("2"));
        assert_eq!(get(&tree, "a"), Some(&scalar("1")));

        add(&mut tree, "b", scalar("3"));
        assert_eq!(get(&tree, "b"), Some(&scalar("3")));
    }

    #[test]
    fn test_numeric_segments_index_lists() {
        let mut tree = Tree::default();
        set(
            &mut tree,
            "items",
            Tree::from(vec![scalar("a"), scalar("b")]),
        );
        assert_eq!(get(&tree, "items.0"), Some(&scalar("a")));
        assert_eq!(get(&tree, "items.1"), Some(&scalar("b")));
        assert_eq!(get(&tree, "items.2"), None);

        set(&mut tree, "items.1", scalar("c"));
        assert_eq!(get(&tree, "items.1"), Some(&scalar("c")));

        // one past the end appends
        set(&mut tree, "items.2", scalar("d"));
        assert_eq!(get(&tree, "items.2"), Some(&scalar("d")));
    }

    #[test]
    fn test_scalar_intermediate_is_overwritten() {
        let mut tree = Tree::default();
        set(&mut tree, "a", scalar("leaf"));
        set(&mut tree, "a.b", scalar("deep"));
        assert_eq!(get(&tree, "a.b"), Some(&scalar("deep")));
    }

    #[test]
    fn test_missing_path_yields_none() {
        let tree = Tree::default();
        assert_eq!(get(&tree, "nope"), None);
        assert_eq!(get(&tree, "a.b.c"), None);
    }

    #[test]
    fn test_empty_path_is_whole_tree() {
        let mut tree = Tree::default();
        set(&mut tree, "a", scalar("1"));
        assert_eq!(get(&tree, ""), Some(&tree));
    }

    #[test]
    fn test_descend_into_existing_list_slots() {
        let mut tree = Tree::default();
        set(&mut tree, "rows", Tree::from(vec![scalar("a")]));
        set(&mut tree, "rows.0.name", scalar("first"));
        set(&mut tree, "rows.1.name", scalar("second"));
        assert_eq!(get(&tree, "rows.0.name"), Some(&scalar("first")));
        assert_eq!(get(&tree, "rows.1.name"), Some(&scalar("second")));
        assert!(get(&tree, "rows").is_some_and(Tree::is_list));
    }

    #[test]
    fn test_map_key_into_list_keeps_elements() {
        let mut tree = Tree::default();
        set(
            &mut tree,
            "items",
            Tree::from(vec![scalar("a"), scalar("b")]),
        );
        set(&mut tree, "items.name", scalar("v"));
        assert_eq!(get(&tree, "items.name"), Some(&scalar("v")));
        assert_eq!(get(&tree, "items.0"), Some(&scalar("a")));
        assert_eq!(get(&tree, "items.1"), Some(&scalar("b")));
    }

    #[test]
    fn test_sparse_index_into_list_keeps_elements() {
        let mut tree = Tree::default();
        set(&mut tree, "items", Tree::from(vec![scalar("a")]));
        set(&mut tree, "items.5", scalar("far"));
        assert_eq!(get(&tree, "items.0"), Some(&scalar("a")));
        assert_eq!(get(&tree, "items.5"), Some(&scalar("far")));
    }

    #[test]
    fn test_nested_numeric_keys_create_maps() {
        let mut tree = Tree::default();
        set(&mut tree, "rows.0.name", scalar("first"));
        set(&mut tree, "rows.1.name", scalar("second"));
        assert_eq!(get(&tree, "rows.0.name"), Some(&scalar("first")));
        assert_eq!(get(&tree, "rows.1.name"), Some(&scalar("second")));
    }
}
