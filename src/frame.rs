use crate::bridge::{Callbacks, FrameView};
use crate::detector::JsLandmarkSource;
use globe_core::{FrameLoop, FrameReport, Globe, TickOutcome};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub globe: Globe,
    pub frame_loop: FrameLoop,
    /// Dropped on teardown so a stale detector can never be called again.
    pub source: Option<JsLandmarkSource>,
}

impl FrameContext {
    /// One scheduler tick. `None` means the loop is stopped and must not be rescheduled.
    pub fn advance(&mut self, now_ms: f64) -> Option<FrameView> {
        let outcome = match self.source.as_mut() {
            Some(source) => self.frame_loop.tick(now_ms, source, &mut self.globe),
            None => {
                if self.frame_loop.control().is_running() {
                    log::warn!("[loop] no landmark source attached");
                    self.frame_loop.control().stop();
                }
                TickOutcome::Stopped
            }
        };
        match outcome {
            TickOutcome::Continue(report) => Some(self.view(report)),
            TickOutcome::Stopped => {
                self.source = None;
                None
            }
        }
    }

    pub fn view(&self, report: FrameReport) -> FrameView {
        let rotation = self.globe.rotation();
        FrameView {
            report,
            orientation: rotation.orientation(),
            cloud_yaw: rotation.cloud_yaw(),
            marker: rotation.marker_world(),
            pinned: rotation.pinned(),
            manual_controls: self.globe.manual_controls_enabled(),
        }
    }
}

/// RAF-driven owner of the frame loop.
#[derive(Clone)]
pub struct FrameDriver {
    ctx: Rc<RefCell<FrameContext>>,
    callbacks: Rc<Callbacks>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    scheduled: Rc<Cell<bool>>,
}

impl FrameDriver {
    pub fn new(ctx: Rc<RefCell<FrameContext>>, callbacks: Rc<Callbacks>) -> Self {
        Self {
            ctx,
            callbacks,
            tick: Rc::new(RefCell::new(None)),
            scheduled: Rc::new(Cell::new(false)),
        }
    }

    /// Schedule the next frame unless one is already pending.
    pub fn schedule(&self) {
        if self.scheduled.get() {
            return;
        }
        if self.tick.borrow().is_none() {
            let driver = self.clone();
            *self.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                driver.scheduled.set(false);
                let view = driver.ctx.borrow_mut().advance(instant::now());
                // Callbacks run with the context released so the page may call
                // back into the app (stop, unpin) from inside them.
                if let Some(view) = view {
                    driver.callbacks.frame(&view);
                    driver.schedule();
                }
            }) as Box<dyn FnMut()>));
        }
        let Some(w) = web::window() else {
            return;
        };
        if let Some(cb) = self.tick.borrow().as_ref() {
            if w.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok() {
                self.scheduled.set(true);
            }
        }
    }
}
