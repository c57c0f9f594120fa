use crate::constants::CLICK_SLOP_PX;
use glam::Vec2;
use web_sys as web;

/// Tracks one press on the canvas so a release can be told apart from a drag.
#[derive(Default, Clone, Copy)]
pub struct PressState {
    pub down_px: Option<Vec2>,
    pub travel_px: f32,
    pub last_px: Vec2,
}

impl PressState {
    pub fn press(&mut self, px: Vec2) {
        self.down_px = Some(px);
        self.last_px = px;
        self.travel_px = 0.0;
    }

    pub fn moved(&mut self, px: Vec2) {
        if self.down_px.is_some() {
            self.travel_px += px.distance(self.last_px);
            self.last_px = px;
        }
    }

    /// Returns the press position if the release counts as a click.
    pub fn release(&mut self) -> Option<Vec2> {
        let down = self.down_px.take()?;
        (self.travel_px < CLICK_SLOP_PX).then_some(down)
    }
}

/// Pointer position relative to the canvas box in CSS pixels, plus the box size.
fn css_offset(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> (Vec2, Vec2) {
    let rect = canvas.get_bounding_client_rect();
    let offset = Vec2::new(
        (ev.client_x() as f64 - rect.left()) as f32,
        (ev.client_y() as f64 - rect.top()) as f32,
    );
    (offset, Vec2::new(rect.width() as f32, rect.height() as f32))
}

/// Pointer in backing-store pixels, the space `PickCamera` expects.
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let (offset, size) = css_offset(ev, canvas);
    let backing = Vec2::new(canvas.width() as f32, canvas.height() as f32);
    offset / size.max(Vec2::ONE) * backing
}

/// Pointer in unit canvas coordinates. Not clamped, so a drag may leave the canvas.
pub fn pointer_canvas_uv(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let (offset, size) = css_offset(ev, canvas);
    if size.min_element() > 0.0 {
        offset / size
    } else {
        Vec2::splat(0.5)
    }
}
