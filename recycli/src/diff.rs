use alloc::vec;
use alloc::vec::Vec;

use crate::fenwick::Fenwick;
use crate::key::BorrowedIndex;
use crate::{RecyclerItem, UpdateBatcher, UpdateSink};

/// One step of an [`EditScript`].
///
/// Positions refer to the list as it stands after all previous operations were applied.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditOp<I> {
    Insert { position: usize, item: I },
    Remove { position: usize },
    /// Removes the item at `from`, then re-inserts it at `to`.
    Move { from: usize, to: usize },
    /// Same identity, different content.
    Change { position: usize, item: I },
}

/// An ordered list of operations turning one sequence into another.
///
/// Scripts produced by [`reconcile`] emit removals (back to front), then moves, then
/// insertions (front to back), then content changes in final coordinates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditScript<I> {
    ops: Vec<EditOp<I>>,
}

impl<I> Default for EditScript<I> {
    fn default() -> Self {
        Self { ops: Vec::new() }
    }
}

impl<I> EditScript<I> {
    pub fn ops(&self) -> &[EditOp<I>] {
        &self.ops
    }

    pub fn iter(&self) -> core::slice::Iter<'_, EditOp<I>> {
        self.ops.iter()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn into_ops(self) -> Vec<EditOp<I>> {
        self.ops
    }

    /// Forwards the script to `sink`, coalescing adjacent operations into ranges.
    pub fn dispatch_to<S: UpdateSink + ?Sized>(&self, sink: &mut S) {
        let mut batch = UpdateBatcher::new(sink);
        for op in &self.ops {
            match *op {
                EditOp::Insert { position, .. } => batch.inserted(position, 1),
                EditOp::Remove { position } => batch.removed(position, 1),
                EditOp::Move { from, to } => batch.moved(from, to),
                EditOp::Change { position, .. } => batch.changed(position, 1),
            }
        }
        batch.flush();
    }
}

impl<I: Clone> EditScript<I> {
    /// Applies the script to `list` in place.
    ///
    /// # Panics
    ///
    /// Panics if an operation addresses a position outside `list`; that means the script was
    /// computed against a different sequence.
    pub fn apply_to(&self, list: &mut Vec<I>) {
        for op in &self.ops {
            match op {
                EditOp::Insert { position, item } => {
                    assert!(
                        *position <= list.len(),
                        "edit script: insert at {position} past end {}",
                        list.len()
                    );
                    list.insert(*position, item.clone());
                }
                EditOp::Remove { position } => {
                    assert!(
                        *position < list.len(),
                        "edit script: remove at {position} out of range {}",
                        list.len()
                    );
                    list.remove(*position);
                }
                EditOp::Move { from, to } => {
                    assert!(
                        *from < list.len() && *to < list.len(),
                        "edit script: move {from} -> {to} out of range {}",
                        list.len()
                    );
                    let item = list.remove(*from);
                    list.insert(*to, item);
                }
                EditOp::Change { position, item } => {
                    assert!(
                        *position < list.len(),
                        "edit script: change at {position} out of range {}",
                        list.len()
                    );
                    list[*position] = item.clone();
                }
            }
        }
    }
}

impl<'a, I> IntoIterator for &'a EditScript<I> {
    type Item = &'a EditOp<I>;
    type IntoIter = core::slice::Iter<'a, EditOp<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// Computes the edit script from `old` to `new`, matching items by identity.
///
/// Matched items whose relative order is preserved (a longest increasing subsequence) stay
/// put; every other matched item gets exactly one move. Unmatched old items are removed and
/// unmatched new items inserted in sequence order.
///
/// # Panics
///
/// Panics if `new` repeats an identity, or if `old` repeats one that `new` keeps.
pub fn reconcile<I: RecyclerItem>(old: &[I], new: &[I]) -> EditScript<I> {
    let mut ops = Vec::new();

    let new_index = index_by_identity(new);
    let matched: Vec<Option<usize>> = old
        .iter()
        .map(|item| new_index.get(item.id()).copied())
        .collect();

    let mut has_old = vec![false; new.len()];
    for (item, m) in old.iter().zip(&matched) {
        if let Some(j) = *m {
            assert!(
                !has_old[j],
                "reconcile: identity `{}` repeats in the old sequence",
                item.id()
            );
            has_old[j] = true;
        }
    }

    for (position, m) in matched.iter().enumerate().rev() {
        if m.is_none() {
            ops.push(EditOp::Remove { position });
        }
    }

    // Surviving old items, identified by their index in `new`, in old order.
    let survivors: Vec<usize> = matched.iter().filter_map(|m| *m).collect();
    push_moves(&survivors, &has_old, &mut ops);

    for (position, item) in new.iter().enumerate() {
        if !has_old[position] {
            ops.push(EditOp::Insert {
                position,
                item: item.clone(),
            });
        }
    }

    let mut changed: Vec<usize> = old
        .iter()
        .zip(&matched)
        .filter_map(|(item, &m)| m.filter(|&j| new[j] != *item))
        .collect();
    changed.sort_unstable();
    for position in changed {
        ops.push(EditOp::Change {
            position,
            item: new[position].clone(),
        });
    }

    rtrace!(
        old = old.len(),
        new = new.len(),
        ops = ops.len(),
        "reconcile"
    );
    EditScript { ops }
}

fn index_by_identity<I: RecyclerItem>(items: &[I]) -> BorrowedIndex<'_> {
    let mut index = BorrowedIndex::new();
    for (i, item) in items.iter().enumerate() {
        let prev = index.insert(item.id(), i);
        assert!(
            prev.is_none(),
            "reconcile: identity `{}` repeats in the new sequence",
            item.id()
        );
    }
    index
}

/// Emits one move per unstable survivor, walking survivors in new order and placing each
/// right behind its predecessor (or at the front).
///
/// Every survivor owns its old slot; a moving one also owns a target slot laid out right
/// behind its predecessor's final slot. Positions are ranks among live slots.
fn push_moves<I>(survivors: &[usize], has_old: &[bool], ops: &mut Vec<EditOp<I>>) {
    let len = has_old.len();
    let stable = stable_positions(survivors, len);
    let moves = |j: usize| !stable[j];

    let order: Vec<usize> = (0..len).filter(|&j| has_old[j]).collect();
    let mut follower: Vec<Option<usize>> = vec![None; len];
    for pair in order.windows(2) {
        if moves(pair[1]) {
            follower[pair[0]] = Some(pair[1]);
        }
    }
    let head = order.first().copied().filter(|&j| moves(j));

    let mut old_slot = vec![0usize; len];
    let mut target_slot = vec![0usize; len];
    let mut slots = 0;
    place_chain(head, &follower, &mut target_slot, &mut slots);
    for &j in survivors {
        old_slot[j] = slots;
        slots += 1;
        if !moves(j) {
            place_chain(follower[j], &follower, &mut target_slot, &mut slots);
        }
    }

    let mut live = Fenwick::new(slots);
    for &j in survivors {
        live.add(old_slot[j], 1);
    }
    for &j in &order {
        if !moves(j) {
            continue;
        }
        let from = live.prefix_sum(old_slot[j]);
        live.add(old_slot[j], -1);
        let to = live.prefix_sum(target_slot[j]);
        live.add(target_slot[j], 1);
        if from != to {
            ops.push(EditOp::Move { from, to });
        }
    }
}

fn place_chain(
    mut next: Option<usize>,
    follower: &[Option<usize>],
    target_slot: &mut [usize],
    slots: &mut usize,
) {
    while let Some(k) = next {
        target_slot[k] = *slots;
        *slots += 1;
        next = follower[k];
    }
}

/// Marks the members of a longest increasing subsequence of `seq`, by value.
fn stable_positions(seq: &[usize], len: usize) -> Vec<bool> {
    let mut tails: Vec<usize> = Vec::new();
    let mut parent: Vec<Option<usize>> = vec![None; seq.len()];
    for (i, &v) in seq.iter().enumerate() {
        let k = tails.partition_point(|&t| seq[t] < v);
        if k > 0 {
            parent[i] = Some(tails[k - 1]);
        }
        if k == tails.len() {
            tails.push(i);
        } else {
            tails[k] = i;
        }
    }

    let mut stable = vec![false; len];
    let mut cur = tails.last().copied();
    while let Some(i) = cur {
        stable[seq[i]] = true;
        cur = parent[i];
    }
    stable
}
