use crate::constants::MAX_FRAME_DT_SEC;
use crate::fetch;
use crate::render;
use crate::App;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub app: Rc<App>,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: Option<web::HtmlCanvasElement>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        let wall_ms = js_sys::Date::now();

        self.app.drain_audio();
        let order = self
            .app
            .with_stage(|session, stage| session.frame(dt_sec, wall_ms, stage));
        if let Some(order) = order {
            fetch::spawn_load(self.app.clone(), order, None);
        }

        if let (Some(g), Some(canvas)) = (&mut self.gpu, &self.canvas) {
            g.resize_if_needed(canvas.width(), canvas.height());
            let session = self.app.session.borrow();
            match g.render(&session.scene, &session.rig.camera) {
                Ok(()) => {}
                // reconfigured on the next resize; skip this frame
                Err(wgpu::SurfaceError::Outdated) | Err(wgpu::SurfaceError::Lost) => {
                    log::debug!("[render] surface lost; frame skipped");
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // the surface borrows the canvas for the life of the page
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(tick: &Tick) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Tick = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
