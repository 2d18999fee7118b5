use crate::interval::Interval;

pub(crate) type Link<K> = Option<Box<Node<K>>>;

#[derive(Debug, PartialEq)]
pub(crate) struct Node<K> {
    pub key: Interval<K>,
    pub left: Link<K>,  // Intervals ending at or before `key.start`.
    pub right: Link<K>, // Intervals starting at or after `key.end`.
}

impl<K> Node<K> {
    pub fn new(key: Interval<K>) -> Node<K> {
        Node {
            key,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Attaches `candidate` as a new leaf below `self`, unless it overlaps an
    /// interval on its descent path. On failure the subtree is left untouched
    /// and `candidate` is handed back.
    pub fn place(&mut self, candidate: Interval<K>) -> Result<(), Interval<K>>
    where
        K: Ord,
    {
        let mut node = self;
        loop {
            let child = if candidate.is_after(&node.key) {
                &mut node.right
            } else if candidate.is_before(&node.key) {
                &mut node.left
            } else {
                return Err(candidate);
            };

            match child {
                Some(next) => node = &mut **next,
                None => {
                    *child = Some(Box::new(Node::new(candidate)));
                    return Ok(());
                }
            }
        }
    }

    /// First interval on the descent path of `candidate` that overlaps it.
    pub fn find_conflict(&self, candidate: &Interval<K>) -> Option<&Interval<K>>
    where
        K: Ord,
    {
        let mut node = self;
        loop {
            let child = if candidate.is_after(&node.key) {
                &node.right
            } else if candidate.is_before(&node.key) {
                &node.left
            } else {
                return Some(&node.key);
            };

            node = child.as_deref()?;
        }
    }

    /// Number of nodes on the longest downward path starting at `self`.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            if node.is_leaf() {
                deepest = deepest.max(level);
            }
            let children = [node.left.as_deref(), node.right.as_deref()];
            for child in children.into_iter().flatten() {
                stack.push((child, level + 1));
            }
        }

        deepest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(start: i32, end: i32) -> Interval<i32> {
        Interval::new(start, end).unwrap()
    }

    #[test]
    fn place_goes_right_then_left() {
        let mut root = Node::new(interval(10, 20));

        assert_eq!(root.place(interval(30, 40)), Ok(()));
        assert_eq!(root.place(interval(20, 30)), Ok(()));

        let right = root.right.as_ref().unwrap();
        assert_eq!(right.key, interval(30, 40));
        assert_eq!(right.left.as_ref().unwrap().key, interval(20, 30));
        assert!(right.left.as_ref().unwrap().is_leaf());
        assert!(root.left.is_none());
    }

    #[test]
    fn place_rejects_overlap_deep_in_the_tree() {
        let mut root = Node::new(interval(10, 20));
        assert_eq!(root.place(interval(0, 5)), Ok(()));
        assert_eq!(root.place(interval(5, 10)), Ok(()));

        let before = format!("{:?}", root);
        assert_eq!(root.place(interval(7, 8)), Err(interval(7, 8)));
        assert_eq!(format!("{:?}", root), before);
        assert_eq!(root.find_conflict(&interval(7, 8)), Some(&interval(5, 10)));
    }

    #[test]
    fn find_conflict_reports_first_blocking_node() {
        let mut root = Node::new(interval(10, 20));
        assert_eq!(root.place(interval(20, 30)), Ok(()));

        assert_eq!(root.find_conflict(&interval(15, 25)), Some(&interval(10, 20)));
        assert_eq!(root.find_conflict(&interval(25, 26)), Some(&interval(20, 30)));
        assert_eq!(root.find_conflict(&interval(30, 31)), None);
        assert_eq!(root.find_conflict(&interval(0, 10)), None);
    }

    #[test]
    fn depth_counts_longest_path() {
        let mut root = Node::new(interval(50, 60));
        assert_eq!(root.depth(), 1);

        assert_eq!(root.place(interval(10, 20)), Ok(()));
        assert_eq!(root.place(interval(70, 80)), Ok(()));
        assert_eq!(root.depth(), 2);

        assert_eq!(root.place(interval(80, 90)), Ok(()));
        assert_eq!(root.place(interval(90, 100)), Ok(()));
        assert_eq!(root.depth(), 4);
    }
}
