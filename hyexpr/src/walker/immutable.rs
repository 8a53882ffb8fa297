use crate::{expr::Expression, walker::internal::WalkStack};

/// What a [`walk`] callback wants to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkControl {
    /// Visit the children of the current node.
    #[default]
    Continue,
    /// Do not descend into the current node; siblings are still visited.
    SkipChildren,
    /// Stop the walk entirely.
    Break,
}

/// Walk `expr` in depth-first pre-order, children left to right.
///
/// The callback receives each node together with its depth (the root has depth 0). Nodes are
/// borrowed from `expr`; walking never clones or allocates nodes.
pub fn walk<'a, F>(expr: &'a Expression, visitor: F)
where
    F: FnMut(&'a Expression, usize) -> WalkControl,
{
    walk_with(expr, visitor, Order::DepthFirst);
}

/// Walk `expr` level by level, children left to right.
pub fn walk_breadth_first<'a, F>(expr: &'a Expression, visitor: F)
where
    F: FnMut(&'a Expression, usize) -> WalkControl,
{
    walk_with(expr, visitor, Order::BreadthFirst);
}

#[derive(Clone, Copy)]
enum Order {
    DepthFirst,
    BreadthFirst,
}

fn walk_with<'a, F>(expr: &'a Expression, mut visitor: F, order: Order)
where
    F: FnMut(&'a Expression, usize) -> WalkControl,
{
    let mut stack = WalkStack::new();
    stack.push_front((expr, 0));

    while let Some((node, depth)) = stack.pop_front() {
        match visitor(node, depth) {
            WalkControl::Continue => match order {
                // Pushed in reverse so the first child is popped first.
                Order::DepthFirst => node
                    .children()
                    .iter()
                    .rev()
                    .for_each(|child| stack.push_front((child, depth + 1))),
                Order::BreadthFirst => node
                    .children()
                    .iter()
                    .for_each(|child| stack.push_back((child, depth + 1))),
            },
            WalkControl::SkipChildren => {}
            WalkControl::Break => break,
        }
    }
}

/// First node, in depth-first pre-order, matching `predicate`.
pub fn find<'a, P>(expr: &'a Expression, mut predicate: P) -> Option<&'a Expression>
where
    P: FnMut(&Expression) -> bool,
{
    let mut found = None;
    walk(expr, |node, _| {
        if predicate(node) {
            found = Some(node);
            WalkControl::Break
        } else {
            WalkControl::Continue
        }
    });
    found
}
