use engine::graphics::{CpuRenderer, SurfaceSize};
use engine::render::{COLOR_BACKGROUND, draw_view_tree};
use engine::ui::Rect;
use engine::view_tree::{ButtonNode, PanelNode, ViewNode, ViewTree};

fn pixel(frame: &[u8], size: SurfaceSize, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * size.width + x) * 4) as usize;
    [frame[i], frame[i + 1], frame[i + 2], frame[i + 3]]
}

fn button(rect: Rect, fill: [u8; 4], label: &str) -> ViewNode<()> {
    ViewNode::Button(ButtonNode {
        id: 1,
        rect,
        label: label.to_string(),
        fill,
        action: (),
        enabled: true,
    })
}

#[test]
fn empty_view_clears_to_background() {
    let size = SurfaceSize::new(16, 16);
    let mut frame = vec![0u8; size.rgba_len()];
    let mut gfx = CpuRenderer::new(&mut frame, size);
    draw_view_tree::<()>(&mut gfx, &ViewTree::new());

    assert_eq!(pixel(&frame, size, 0, 0), COLOR_BACKGROUND);
    assert_eq!(pixel(&frame, size, 15, 15), COLOR_BACKGROUND);
}

#[test]
fn button_fill_shows_inside_its_outline() {
    let size = SurfaceSize::new(64, 64);
    let mut frame = vec![0u8; size.rgba_len()];
    let fill = [200, 10, 10, 255];

    let mut view = ViewTree::new();
    view.push(button(Rect::new(8, 8, 40, 40), fill, ""));
    let mut gfx = CpuRenderer::new(&mut frame, size);
    draw_view_tree(&mut gfx, &view);

    assert_eq!(pixel(&frame, size, 20, 20), fill);
    assert_ne!(pixel(&frame, size, 8, 8), fill, "outline should cover the edge");
    assert_eq!(pixel(&frame, size, 2, 2), COLOR_BACKGROUND);
}

#[test]
fn translucent_panel_dims_content_underneath() {
    let size = SurfaceSize::new(32, 32);
    let mut frame = vec![0u8; size.rgba_len()];
    let fill = [240, 240, 240, 255];

    let mut view = ViewTree::new();
    view.push(button(Rect::new(0, 0, 32, 32), fill, ""));
    view.push(ViewNode::Panel(PanelNode {
        rect: Rect::new(0, 0, 32, 32),
        color: [0, 0, 0, 255],
        alpha: 128,
    }));
    let mut gfx = CpuRenderer::new(&mut frame, size);
    draw_view_tree(&mut gfx, &view);

    let [r, g, b, _] = pixel(&frame, size, 16, 16);
    assert!(r < 130 && g < 130 && b < 130, "expected dimmed pixel, got {r},{g},{b}");
    assert!(r > 100);
}

#[test]
fn button_label_is_drawn_centered() {
    let size = SurfaceSize::new(100, 60);
    let mut frame = vec![0u8; size.rgba_len()];
    let fill = [0, 0, 120, 255];

    let mut view = ViewTree::new();
    view.push(button(Rect::new(0, 0, 100, 60), fill, "I"));
    let mut gfx = CpuRenderer::new(&mut frame, size);
    draw_view_tree(&mut gfx, &view);

    // "I" at scale 3 is 9x15 centered: top bar spans x 46..55 at y 22..25.
    assert_ne!(pixel(&frame, size, 50, 23), fill);
    assert_eq!(pixel(&frame, size, 10, 10), fill);
}
