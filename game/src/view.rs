use engine::graphics::{Color, SurfaceSize, text_width};
use engine::render::COLOR_TEXT;
use engine::ui::{Anchor, Insets, Rect};
use engine::view_tree::{ButtonNode, PanelNode, TextNode, ViewNode, ViewTree};
use rand::Rng;

use crate::button::ButtonId;
use crate::controller::{GameController, Notification};
use crate::tone::ToneOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimonAction {
    Clue(ButtonId),
    ToggleGame,
    DismissNotice,
}

pub const CONTROL_BUTTON_ID: u32 = 10;
pub const DISMISS_BUTTON_ID: u32 = 20;

const TITLE_SCALE: u32 = 5;
const STATUS_SCALE: u32 = 3;
const NOTICE_SCALE: u32 = 2;
const COLOR_CONTROL: Color = [44, 44, 58, 255];
const COLOR_NOTICE: Color = [32, 32, 44, 255];
const COLOR_SCRIM: Color = [0, 0, 0, 255];

pub fn clue_button_id(button: ButtonId) -> u32 {
    button.index() as u32 + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub header: Rect,
    pub clues: [Rect; 4],
    pub control: Rect,
}

pub fn compute_layout(size: SurfaceSize) -> Layout {
    let outer = size.bounds().inset(Insets::all(24));
    let (header, rest) = outer.split_top(96);
    let (board_area, footer) = rest.split_top(rest.h.saturating_sub(96));

    let side = board_area.w.min(board_area.h);
    let board = board_area.place(side, side, Anchor::Center);
    let cells = board.grid(2, 2, 16);
    let clues = [0, 1, 2, 3].map(|i| cells.get(i).copied().unwrap_or_default());

    Layout {
        header,
        clues,
        control: footer.place(220, 64, Anchor::Center),
    }
}

/// Everything on screen: title, round status, the four clue pads, the start/stop control, and
/// the win/lose notice on top when one is showing.
pub fn build_view<O: ToneOutput, R: Rng>(
    game: &GameController<O, R>,
    notice: Option<Notification>,
    size: SurfaceSize,
) -> ViewTree<SimonAction> {
    let layout = compute_layout(size);
    let mut tree = ViewTree::new();

    push_centered_text(&mut tree, layout.header, 0, "SIMON", TITLE_SCALE);
    let status = if game.is_playing() {
        format!("ROUND {}/{}", game.round(), game.sequence().len())
    } else {
        "PRESS START".to_string()
    };
    push_centered_text(&mut tree, layout.header, 48, &status, STATUS_SCALE);

    for button in ButtonId::ALL {
        tree.push(ViewNode::Button(ButtonNode {
            id: clue_button_id(button),
            rect: layout.clues[button.index()],
            label: String::new(),
            fill: game.visuals().background(button),
            action: SimonAction::Clue(button),
            enabled: game.is_playing(),
        }));
    }

    tree.push(ViewNode::Button(ButtonNode {
        id: CONTROL_BUTTON_ID,
        rect: layout.control,
        label: game.control_label().to_uppercase(),
        fill: COLOR_CONTROL,
        action: SimonAction::ToggleGame,
        enabled: true,
    }));

    if let Some(notice) = notice {
        push_notice(&mut tree, size, notice);
    }
    tree
}

fn push_notice(tree: &mut ViewTree<SimonAction>, size: SurfaceSize, notice: Notification) {
    let bounds = size.bounds();
    tree.push(ViewNode::Panel(PanelNode {
        rect: bounds,
        color: COLOR_SCRIM,
        alpha: 160,
    }));

    let panel = bounds.place(bounds.w.saturating_sub(40).min(560), 200, Anchor::Center);
    tree.push(ViewNode::Panel(PanelNode {
        rect: panel,
        color: COLOR_NOTICE,
        alpha: 255,
    }));
    let body = panel.inset(Insets::symmetric(16, 24));
    push_centered_text(tree, body, 16, notice.message(), NOTICE_SCALE);

    tree.push(ViewNode::Button(ButtonNode {
        id: DISMISS_BUTTON_ID,
        rect: body.place(120, 48, Anchor::BottomCenter),
        label: "OK".to_string(),
        fill: COLOR_CONTROL,
        action: SimonAction::DismissNotice,
        enabled: true,
    }));
}

fn push_centered_text(
    tree: &mut ViewTree<SimonAction>,
    area: Rect,
    dy: u32,
    text: &str,
    scale: u32,
) {
    let w = text_width(text, scale);
    let x = area.x + area.w.saturating_sub(w) / 2;
    tree.push(ViewNode::Text(TextNode {
        pos: (x, area.y + dy),
        text: text.to_string(),
        color: COLOR_TEXT,
        scale,
    }));
}
