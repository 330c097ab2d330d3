#![forbid(unsafe_code)]

//! Weighted recursive split layout.
//!
//! A [`Layout`] is a tree of horizontal and vertical splits with panels at
//! the leaves. [`Layout::position`] walks the tree, assigns each panel its
//! [`Rect`], and returns the leaves in depth-first order. That order is
//! stable and defines panel indexing: Tab cycling and focus-by-index both
//! follow it.
//!
//! Along a split axis, the child with weight `w` out of total weight `W`
//! receives `w * size / W` cells rounded down, except the last child,
//! which receives whatever remains. No cell is ever lost to integer
//! division.
//!
//! The tree is built once but may be swapped between frames (for example
//! to toggle a side panel) by replacing a subtree and re-running
//! `position`.

use trellis_core::Rect;
use trellis_panels::PanelHandle;

/// A node of the layout tree.
///
/// Cloning is cheap: leaves share their panel handles, so a cloned tree
/// positions the same panels.
#[derive(Clone)]
pub enum Layout {
    /// A single panel filling the node's area.
    Leaf(PanelHandle),
    /// Children side by side, splitting the width.
    HSplit(Vec<Child>),
    /// Children stacked, splitting the height.
    VSplit(Vec<Child>),
}

/// A child of a split and its share of the axis.
#[derive(Clone)]
pub struct Child {
    /// The subtree.
    pub node: Layout,
    /// Positive share of the split axis. Zero is normalised to 1.
    pub weight: u32,
}

impl Child {
    /// A child with the default weight of 1.
    #[must_use]
    pub fn new(node: Layout) -> Self {
        Self { node, weight: 1 }
    }

    /// A child with an explicit weight. Zero is normalised to 1.
    #[must_use]
    pub fn weighted(node: Layout, weight: u32) -> Self {
        Self {
            node,
            weight: weight.max(1),
        }
    }
}

impl Layout {
    /// A leaf node around a panel handle.
    #[must_use]
    pub fn leaf(panel: PanelHandle) -> Self {
        Self::Leaf(panel)
    }

    /// A horizontal split (children left to right).
    #[must_use]
    pub fn hsplit(children: Vec<Child>) -> Self {
        Self::HSplit(children)
    }

    /// A vertical split (children top to bottom).
    #[must_use]
    pub fn vsplit(children: Vec<Child>) -> Self {
        Self::VSplit(children)
    }

    /// Assign geometry to every leaf panel and return them depth-first.
    ///
    /// An empty split contributes no panels and leaves its area blank.
    pub fn position(&self, x: u16, y: u16, width: u16, height: u16) -> Vec<PanelHandle> {
        let mut panels = Vec::new();
        self.position_into(x, y, width, height, &mut panels);
        panels
    }

    fn position_into(&self, x: u16, y: u16, width: u16, height: u16, out: &mut Vec<PanelHandle>) {
        match self {
            Layout::Leaf(panel) => {
                panel
                    .borrow_mut()
                    .base_mut()
                    .set_rect(Rect::new(x, y, width, height));
                out.push(panel.clone());
            }
            Layout::HSplit(children) => {
                let mut cursor = x;
                for (child, size) in children.iter().zip(split_sizes(children, width)) {
                    child.node.position_into(cursor, y, size, height, out);
                    cursor += size;
                }
            }
            Layout::VSplit(children) => {
                let mut cursor = y;
                for (child, size) in children.iter().zip(split_sizes(children, height)) {
                    child.node.position_into(x, cursor, width, size, out);
                    cursor += size;
                }
            }
        }
    }
}

/// Sizes along the split axis: floor shares for all but the last child,
/// which absorbs the remainder.
fn split_sizes(children: &[Child], total: u16) -> Vec<u16> {
    let weights: Vec<u64> = children.iter().map(|c| u64::from(c.weight.max(1))).collect();
    let sum: u64 = weights.iter().sum();
    if sum == 0 {
        return Vec::new();
    }

    let mut sizes = Vec::with_capacity(children.len());
    let mut used: u64 = 0;
    for (i, weight) in weights.iter().enumerate() {
        let size = if i == weights.len() - 1 {
            u64::from(total) - used
        } else {
            weight * u64::from(total) / sum
        };
        used += size;
        sizes.push(size as u16);
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_panels::{handle, PanelBase};

    fn leaf() -> (PanelHandle, Layout) {
        let h = handle(PanelBase::new());
        (h.clone(), Layout::leaf(h))
    }

    fn rect_of(panel: &PanelHandle) -> Rect {
        panel.borrow().base().rect()
    }

    #[test]
    fn leaf_fills_the_area() {
        let (h, layout) = leaf();
        let panels = layout.position(2, 3, 20, 10);
        assert_eq!(panels.len(), 1);
        assert_eq!(rect_of(&h), Rect::new(2, 3, 20, 10));
    }

    #[test]
    fn weighted_hsplit_gives_exact_shares() {
        let (a, la) = leaf();
        let (b, lb) = leaf();
        let (c, lc) = leaf();
        let layout = Layout::hsplit(vec![
            Child::weighted(la, 1),
            Child::weighted(lb, 2),
            Child::weighted(lc, 4),
        ]);
        let panels = layout.position(0, 0, 70, 10);
        assert_eq!(panels.len(), 3);
        assert_eq!(rect_of(&a), Rect::new(0, 0, 10, 10));
        assert_eq!(rect_of(&b), Rect::new(10, 0, 20, 10));
        assert_eq!(rect_of(&c), Rect::new(30, 0, 40, 10));
    }

    #[test]
    fn last_child_absorbs_the_remainder() {
        let (a, la) = leaf();
        let (b, lb) = leaf();
        let (c, lc) = leaf();
        let layout = Layout::vsplit(vec![Child::new(la), Child::new(lb), Child::new(lc)]);
        layout.position(0, 0, 10, 10);
        // 10 / 3 = 3 rows each, the last child takes 4.
        assert_eq!(rect_of(&a).height, 3);
        assert_eq!(rect_of(&b).height, 3);
        assert_eq!(rect_of(&c).height, 4);
        assert_eq!(rect_of(&c).bottom(), 10);
    }

    #[test]
    fn zero_weight_is_normalised_to_one() {
        let (a, la) = leaf();
        let (b, lb) = leaf();
        let layout = Layout::hsplit(vec![Child::weighted(la, 0), Child::weighted(lb, 0)]);
        layout.position(0, 0, 10, 4);
        assert_eq!(rect_of(&a).width, 5);
        assert_eq!(rect_of(&b).width, 5);
    }

    #[test]
    fn depth_first_order_defines_indexing() {
        let (a, la) = leaf();
        let (b, lb) = leaf();
        let (c, lc) = leaf();
        let layout = Layout::hsplit(vec![
            Child::new(la),
            Child::new(Layout::vsplit(vec![Child::new(lb), Child::new(lc)])),
        ]);
        let panels = layout.position(0, 0, 40, 10);
        assert_eq!(panels.len(), 3);
        assert!(std::rc::Rc::ptr_eq(&panels[0], &a));
        assert!(std::rc::Rc::ptr_eq(&panels[1], &b));
        assert!(std::rc::Rc::ptr_eq(&panels[2], &c));
    }

    #[test]
    fn empty_split_yields_no_panels() {
        let layout = Layout::hsplit(Vec::new());
        assert!(layout.position(0, 0, 80, 24).is_empty());
    }

    #[test]
    fn nested_splits_tile_without_overlap() {
        let (a, la) = leaf();
        let (b, lb) = leaf();
        let (c, lc) = leaf();
        let layout = Layout::hsplit(vec![
            Child::weighted(la, 1),
            Child::weighted(
                Layout::vsplit(vec![Child::new(lb), Child::weighted(lc, 3)]),
                2,
            ),
        ]);
        layout.position(0, 0, 30, 16);
        assert_eq!(rect_of(&a), Rect::new(0, 0, 10, 16));
        assert_eq!(rect_of(&b), Rect::new(10, 0, 20, 4));
        assert_eq!(rect_of(&c), Rect::new(10, 4, 20, 12));
        assert!(!rect_of(&b).intersects(&rect_of(&c)));
        assert!(!rect_of(&a).intersects(&rect_of(&b)));
    }

    #[test]
    fn repositioning_reassigns_geometry() {
        let (a, la) = leaf();
        let layout = Layout::hsplit(vec![Child::new(la)]);
        layout.position(0, 0, 80, 24);
        assert_eq!(rect_of(&a).width, 80);
        layout.position(0, 0, 40, 12);
        assert_eq!(rect_of(&a), Rect::new(0, 0, 40, 12));
    }
}
