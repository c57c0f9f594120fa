#![cfg(target_arch = "wasm32")]
use globe_core::{FactQuery, FrameLoop, Globe, LoopControl, PointerReader};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod bridge;
mod camera;
mod constants;
mod detector;
mod dom;
mod events;
mod frame;
mod input;

use bridge::Callbacks;
use camera::PickCamera;
use constants::{CAMERA_FOVY, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR};
use detector::JsLandmarkSource;
use frame::{FrameContext, FrameDriver};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("globe-web starting");
    Ok(())
}

/// Handle owned by the page. Camera capture, the detector model and rendering
/// stay on the JavaScript side; this drives the gesture pipeline and rotation.
#[wasm_bindgen]
pub struct GlobeApp {
    ctx: Rc<RefCell<FrameContext>>,
    callbacks: Rc<Callbacks>,
    control: LoopControl,
    driver: FrameDriver,
    pointer: PointerReader,
}

#[wasm_bindgen]
impl GlobeApp {
    /// `detect(timestampMs)` returns the current hand (or null), `on_frame(view)`
    /// receives the render state, `on_fact_query(query)` receives picks and
    /// category requests for the fact-lookup service, and `on_fact_result(result)`
    /// receives whatever `show_facts` was given, with citations cleaned up.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        detect: js_sys::Function,
        on_frame: js_sys::Function,
        on_fact_query: js_sys::Function,
        on_fact_result: js_sys::Function,
    ) -> Result<GlobeApp, JsValue> {
        init(canvas_id, detect, on_frame, on_fact_query, on_fact_result).map_err(|e| {
            log::error!("init error: {:?}", e);
            JsValue::from_str(&e.to_string())
        })
    }

    /// Start (or resume) the per-frame loop.
    pub fn run(&self) -> Result<(), JsValue> {
        if self.ctx.borrow().source.is_none() {
            return Err(JsValue::from_str("no landmark detector attached"));
        }
        self.control.start();
        self.driver.schedule();
        Ok(())
    }

    /// Tear the loop down. Any frame already scheduled becomes a no-op.
    pub fn stop(&self) {
        self.control.stop();
        if let Ok(mut ctx) = self.ctx.try_borrow_mut() {
            ctx.source = None;
        }
    }

    /// Attach a fresh detector, e.g. after the camera was restarted.
    pub fn set_detector(&self, detect: js_sys::Function) {
        self.ctx.borrow_mut().source = Some(JsLandmarkSource::new(detect));
    }

    pub fn query_category(&self, category: String) {
        self.callbacks.fact_query(&FactQuery::Category(category));
    }

    /// Hand back a `{text, sources}` answer from the fact service for display.
    pub fn show_facts(&self, result: JsValue) -> Result<(), JsValue> {
        let result = bridge::fact_result_from_js(&result).map_err(|e| {
            log::warn!("[facts] rejected result: {}", e);
            JsValue::from_str(&e.to_string())
        })?;
        self.callbacks.fact_result(&result);
        Ok(())
    }

    pub fn unpin(&self) -> bool {
        self.ctx.borrow_mut().globe.unpin().is_some()
    }

    /// Latest gesture pointer `{x, y, active}` for status displays.
    pub fn pointer(&self) -> JsValue {
        bridge::pointer_to_js(&self.pointer.snapshot())
    }

    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }
}

fn init(
    canvas_id: &str,
    detect: js_sys::Function,
    on_frame: js_sys::Function,
    on_fact_query: js_sys::Function,
    on_fact_result: js_sys::Function,
) -> anyhow::Result<GlobeApp> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    dom::wire_canvas_resize(&canvas);

    let globe = Globe::default();
    let pointer = globe.pointer_reader();
    let control = LoopControl::new();
    let ctx = Rc::new(RefCell::new(FrameContext {
        globe,
        frame_loop: FrameLoop::new(control.clone()),
        source: Some(JsLandmarkSource::new(detect)),
    }));
    let callbacks = Rc::new(Callbacks {
        on_frame,
        on_fact_query,
        on_fact_result,
    });

    events::wire_global_keydown(ctx.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        ctx: ctx.clone(),
        callbacks: callbacks.clone(),
        camera: PickCamera {
            camera_z: CAMERA_Z,
            fovy_radians: CAMERA_FOVY,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        },
        press: Rc::new(RefCell::new(input::PressState::default())),
    });

    let driver = FrameDriver::new(ctx.clone(), callbacks.clone());
    log::info!("[loop] ready on #{}", canvas_id);
    Ok(GlobeApp {
        ctx,
        callbacks,
        control,
        driver,
        pointer,
    })
}
