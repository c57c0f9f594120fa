use crate::bridge::Callbacks;
use crate::camera::PickCamera;
use crate::frame::FrameContext;
use crate::input::{self, PressState};
use globe_core::{FactQuery, GLOBE_RADIUS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub ctx: Rc<RefCell<FrameContext>>,
    pub callbacks: Rc<Callbacks>,
    pub camera: PickCamera,
    pub press: Rc<RefCell<PressState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let px = input::pointer_canvas_px(&ev, &w.canvas);
        let uv = input::pointer_canvas_uv(&ev, &w.canvas);
        w.press.borrow_mut().press(px);
        if w.ctx.borrow_mut().globe.begin_manual_drag(uv) {
            log::debug!("[mouse] begin drag");
        } else {
            log::debug!("[mouse] ignored: hand drag in progress");
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !w.canvas.is_connected() {
            return;
        }
        let px = input::pointer_canvas_px(&ev, &w.canvas);
        let uv = input::pointer_canvas_uv(&ev, &w.canvas);
        w.press.borrow_mut().moved(px);
        w.ctx.borrow_mut().globe.move_manual_drag(uv);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let click = w.press.borrow_mut().release();
        let picked = {
            let mut ctx = w.ctx.borrow_mut();
            ctx.globe.end_manual_drag();
            click.and_then(|px| {
                let width = w.canvas.width() as f32;
                let height = w.canvas.height() as f32;
                let hit = w.camera.pick_sphere(width, height, px.x, px.y, GLOBE_RADIUS)?;
                ctx.globe.pick_world(hit).ok()
            })
        };
        if let Some(coord) = picked {
            w.callbacks.fact_query(&FactQuery::Location(coord));
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
