use crate::graphics::{Color, Renderer2d, text_height, text_width};
use crate::ui::Anchor;
use crate::view_tree::{ButtonNode, ViewNode, ViewTree};

pub const COLOR_BACKGROUND: Color = [16, 16, 22, 255];
pub const COLOR_TEXT: Color = [235, 235, 240, 255];
const COLOR_OUTLINE: Color = [60, 60, 76, 255];
const COLOR_DISABLED_TEXT: Color = [110, 110, 120, 255];

pub const BUTTON_TEXT_SCALE: u32 = 3;

/// Draws every node of `view` in order over a cleared background.
pub fn draw_view_tree<A>(gfx: &mut dyn Renderer2d, view: &ViewTree<A>) {
    gfx.clear(COLOR_BACKGROUND);
    for node in &view.nodes {
        match node {
            ViewNode::Panel(panel) => gfx.blend_rect(panel.rect, panel.color, panel.alpha),
            ViewNode::Text(text) => {
                gfx.draw_text_scaled(text.pos.0, text.pos.1, &text.text, text.color, text.scale)
            }
            ViewNode::Button(button) => draw_button(gfx, button),
        }
    }
}

pub fn draw_button<A>(gfx: &mut dyn Renderer2d, button: &ButtonNode<A>) {
    gfx.fill_rect(button.rect, button.fill);
    gfx.rect_outline(button.rect, COLOR_OUTLINE);

    if button.label.is_empty() {
        return;
    }
    let w = text_width(&button.label, BUTTON_TEXT_SCALE);
    let h = text_height(BUTTON_TEXT_SCALE);
    let at = button.rect.place(w, h, Anchor::Center);
    let color = if button.enabled {
        COLOR_TEXT
    } else {
        COLOR_DISABLED_TEXT
    };
    gfx.draw_text_scaled(at.x, at.y, &button.label, color, BUTTON_TEXT_SCALE);
}
