use std::hash::Hash;

use hashbrown::HashMap;

use crate::types::Position;

/// Key to the ordered positions sharing that key.
pub type VecIndex<K> = HashMap<K, Vec<Position>>;

/// Appends `position` to the bucket for `key`, creating it on first use.
pub fn push_position<K: Eq + Hash>(index: &mut VecIndex<K>, key: K, position: Position) {
    index.entry(key).or_default().push(position);
}

/// Borrowed view of the bucket for `key`, `None` when the key was never seen.
pub fn positions<'a, K, Q>(index: &'a VecIndex<K>, key: &Q) -> Option<&'a [Position]>
where
    K: Eq + Hash + std::borrow::Borrow<Q>,
    Q: Eq + Hash + ?Sized,
{
    index.get(key).map(Vec::as_slice)
}
