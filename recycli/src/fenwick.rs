use alloc::vec::Vec;

/// Counts live slots; answers "how many live slots precede this one" in `O(log n)`.
#[derive(Clone, Debug)]
pub(crate) struct Fenwick {
    tree: Vec<isize>, // 1-indexed
}

impl Fenwick {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            tree: alloc::vec![0; n + 1],
        }
    }

    pub(crate) fn add(&mut self, index: usize, delta: isize) {
        let mut i = index + 1;
        while i < self.tree.len() {
            self.tree[i] += delta;
            i += lsb(i);
        }
    }

    /// Sum over `0..index`.
    pub(crate) fn prefix_sum(&self, index: usize) -> usize {
        let mut i = index.min(self.tree.len() - 1);
        let mut sum = 0isize;
        while i > 0 {
            sum += self.tree[i];
            i -= lsb(i);
        }
        debug_assert!(sum >= 0);
        sum as usize
    }
}

#[inline]
fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}
