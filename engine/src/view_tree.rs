use serde::{Deserialize, Serialize};

use crate::graphics::Color;
use crate::ui::Rect;

/// Flat, back-to-front list of everything on screen for one frame.
///
/// Later nodes are drawn on top of earlier ones, and hit testing walks the list in reverse so
/// the topmost enabled button wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewTree<A> {
    pub nodes: Vec<ViewNode<A>>,
}

impl<A> Default for ViewTree<A> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<A> ViewTree<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: ViewNode<A>) {
        self.nodes.push(node);
    }

    pub fn buttons(&self) -> impl Iterator<Item = &ButtonNode<A>> {
        self.nodes.iter().filter_map(|node| match node {
            ViewNode::Button(button) => Some(button),
            _ => None,
        })
    }

    pub fn button(&self, id: u32) -> Option<&ButtonNode<A>> {
        self.buttons().find(|b| b.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ViewNode<A> {
    Button(ButtonNode<A>),
    Text(TextNode),
    Panel(PanelNode),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonNode<A> {
    pub id: u32,
    pub rect: Rect,
    pub label: String,
    pub fill: Color,
    pub action: A,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextNode {
    pub pos: (u32, u32),
    pub text: String,
    pub color: Color,
    pub scale: u32,
}

/// A filled rect. `alpha < 255` blends over what is already drawn (modal scrims).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelNode {
    pub rect: Rect,
    pub color: Color,
    pub alpha: u8,
}

/// Topmost enabled button under `pos`.
///
/// Panels are opaque to input: a panel drawn over a button shields it, which is how modal
/// overlays block the controls underneath.
pub fn hit_test<A: Clone>(view: &ViewTree<A>, pos: Option<(u32, u32)>) -> Option<A> {
    let (x, y) = pos?;
    for node in view.nodes.iter().rev() {
        match node {
            ViewNode::Button(button) if button.rect.contains(x, y) => {
                return button.enabled.then(|| button.action.clone());
            }
            ViewNode::Panel(panel) if panel.rect.contains(x, y) => return None,
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(id: u32, rect: Rect, action: u8, enabled: bool) -> ViewNode<u8> {
        ViewNode::Button(ButtonNode {
            id,
            rect,
            label: String::new(),
            fill: [0, 0, 0, 255],
            action,
            enabled,
        })
    }

    #[test]
    fn hit_test_returns_topmost_button() {
        let mut view = ViewTree::new();
        view.push(button(1, Rect::new(0, 0, 10, 10), 1, true));
        view.push(button(2, Rect::new(5, 5, 10, 10), 2, true));

        assert_eq!(hit_test(&view, Some((2, 2))), Some(1));
        assert_eq!(hit_test(&view, Some((6, 6))), Some(2));
        assert_eq!(hit_test(&view, Some((50, 50))), None);
        assert_eq!(hit_test(&view, None), None);
    }

    #[test]
    fn disabled_buttons_and_panels_swallow_hits() {
        let mut view = ViewTree::new();
        view.push(button(1, Rect::new(0, 0, 10, 10), 1, true));
        view.push(button(2, Rect::new(0, 0, 4, 4), 2, false));
        view.push(ViewNode::Panel(PanelNode {
            rect: Rect::new(6, 6, 4, 4),
            color: [0, 0, 0, 255],
            alpha: 128,
        }));

        assert_eq!(hit_test(&view, Some((1, 1))), None);
        assert_eq!(hit_test(&view, Some((7, 7))), None);
        assert_eq!(hit_test(&view, Some((5, 1))), Some(1));
    }

    #[test]
    fn button_lookup_by_id() {
        let mut view = ViewTree::new();
        view.push(button(7, Rect::new(0, 0, 1, 1), 3, true));
        assert_eq!(view.button(7).map(|b| b.action), Some(3));
        assert!(view.button(8).is_none());
    }
}
