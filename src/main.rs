//! Valentine Card entry point
//!
//! Wires the page's DOM to the evasion core and runs the effects loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_card {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement};

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use valentine_card::card::{CardEvent, EvasionController, Feedback, Rect, Viewport, YesStyle};
    use valentine_card::consts::*;
    use valentine_card::fx::{
        Celebration, FloatingHeart, ParticleField, explosion_burst, origin_from_rect,
        scatter_hearts, single_celebration_burst,
    };
    use valentine_card::renderer::{ConfettiRenderer, shapes};
    use valentine_card::{CardError, Settings};

    /// Card instance holding all page state
    struct Card {
        settings: Settings,
        controller: EvasionController,
        field: ParticleField,
        celebration: Option<Celebration>,
        hearts: Vec<(FloatingHeart, HtmlElement)>,
        fx_rng: Pcg32,
        renderer: Option<ConfettiRenderer>,
        accumulator: f32,
        last_time: f64,
        start_time: f64,
    }

    impl Card {
        fn new(settings: Settings, seed: u64, viewport: Viewport) -> Self {
            Self {
                controller: EvasionController::new(settings.evasion(), seed),
                field: ParticleField::new(seed ^ 0x5eed, settings.max_particles(), viewport),
                celebration: None,
                hearts: Vec::new(),
                fx_rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
                renderer: None,
                accumulator: 0.0,
                last_time: 0.0,
                start_time: 0.0,
                settings,
            }
        }

        /// React to a core event
        fn handle(&mut self, event: CardEvent) {
            match event {
                CardEvent::Evaded { to, final_dodge, .. } => {
                    log::debug!("No evaded to ({:.0}, {:.0}) final={}", to.x, to.y, final_dodge);
                }
                CardEvent::Exploded { burst: true } => {
                    if let Some(no_btn) = element("no-btn") {
                        let rect = dom_rect(&no_btn);
                        let origin = origin_from_rect(&rect, &self.field.viewport());
                        self.field.burst(&explosion_burst(origin));
                    }
                }
                CardEvent::Exploded { burst: false } => {}
                CardEvent::Accepted => {
                    if self.settings.effective_celebration_volley() {
                        self.celebration = Some(Celebration::new());
                    } else {
                        self.field.burst(&single_celebration_burst());
                    }
                    show("success");
                    hide("ask");
                }
            }
            self.update_dom();
        }

        /// Push counter-derived styling into the page
        fn update_dom(&self) {
            let state = self.controller.state();

            if let Some(no_btn) = html_element("no-btn") {
                let scale = if self.controller.is_suppressed() { 0.0 } else { 1.0 };
                let _ = no_btn.style().set_property(
                    "transform",
                    &format!(
                        "translate({}px, {}px) scale({})",
                        state.position.x, state.position.y, scale
                    ),
                );
            }

            if let Some(yes_btn) = html_element("yes-btn") {
                let style = YesStyle::from_state(state);
                let _ = yes_btn
                    .style()
                    .set_property("transform", &format!("scale({})", style.scale));
                let _ = yes_btn
                    .style()
                    .set_property("font-size", &format!("{}rem", style.font_size_rem));
            }

            if let Some(feedback) = element("feedback") {
                match Feedback::for_count(state.interaction_count, self.controller.config().threshold) {
                    Some(line) => {
                        feedback.set_text_content(Some(line.text()));
                        let _ = feedback.set_attribute("class", "feedback");
                    }
                    None => {
                        let _ = feedback.set_attribute("class", "feedback hidden");
                    }
                }
            }
        }

        /// Step effects on the fixed timestep
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= FX_DT && substeps < MAX_SUBSTEPS {
                if let Some(celebration) = self.celebration.as_mut() {
                    for burst in celebration.update(FX_DT, &mut self.fx_rng) {
                        self.field.burst(&burst);
                    }
                    if celebration.is_finished() {
                        self.celebration = None;
                    }
                }
                self.field.step();
                self.accumulator -= FX_DT;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }
        }

        fn update_hearts(&self, time: f64) {
            let t = ((time - self.start_time) / 1000.0) as f32;
            for (heart, el) in &self.hearts {
                let style = el.style();
                match heart.frame_at(t) {
                    Some(frame) => {
                        let _ = style.set_property("transform", &format!("translateY({}vh)", frame.y_vh));
                        let _ = style.set_property("opacity", &frame.opacity.to_string());
                    }
                    None => {
                        let _ = style.set_property("opacity", "0");
                    }
                }
            }
        }

        fn render(&mut self) {
            let segments = self.settings.quality.circle_segments();
            if let Some(ref mut renderer) = self.renderer {
                let vertices = shapes::confetti(&self.field.particles, segments);
                match renderer.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        renderer.resize(renderer.size.0, renderer.size.1, renderer.css_size);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    fn element(id: &str) -> Option<web_sys::Element> {
        document()?.get_element_by_id(id)
    }

    fn html_element(id: &str) -> Option<HtmlElement> {
        element(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn show(id: &str) {
        if let Some(el) = element(id) {
            let _ = el.class_list().remove_1("hidden");
        }
    }

    fn hide(id: &str) {
        if let Some(el) = element(id) {
            let _ = el.class_list().add_1("hidden");
        }
    }

    fn dom_rect(el: &web_sys::Element) -> Rect {
        let r = el.get_bounding_client_rect();
        Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
    }

    fn viewport() -> Viewport {
        let window = web_sys::window();
        let dim = |v: Option<Result<JsValue, JsValue>>| {
            v.and_then(|r| r.ok()).and_then(|j| j.as_f64()).unwrap_or(0.0) as f32
        };
        Viewport::new(
            dim(window.as_ref().map(|w| w.inner_width())),
            dim(window.as_ref().map(|w| w.inner_height())),
        )
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Valentine card starting...");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let hearts_enabled = settings.effective_hearts();

        if let Some(headline) = element("headline") {
            headline.set_text_content(Some(&settings.headline()));
        }
        hide("loading");

        let card = Rc::new(RefCell::new(Card::new(settings, seed, viewport())));
        log::info!("Card initialized with seed: {}", seed);

        // Bounds are measured once, now that the buttons are laid out
        if let Some(no_btn) = element("no-btn") {
            let rect = dom_rect(&no_btn);
            if let Err(e) = card.borrow_mut().controller.initialize(rect, viewport()) {
                log::warn!("{}", e);
            }
        }

        if hearts_enabled {
            setup_hearts(&card);
        }
        setup_buttons(card.clone());
        setup_resize(card.clone());

        match init_renderer().await {
            Ok(renderer) => card.borrow_mut().renderer = Some(renderer),
            Err(e) => log::warn!("Confetti disabled: {}", e),
        }

        card.borrow_mut().start_time = js_sys::Date::now();
        request_animation_frame(card);

        log::info!("Valentine card running!");
    }

    async fn init_renderer() -> Result<ConfettiRenderer, CardError> {
        let window = web_sys::window().ok_or(CardError::MissingElement("window"))?;
        let canvas: HtmlCanvasElement = element("confetti")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(CardError::MissingElement("#confetti canvas"))?;

        let (width, height, css) = canvas_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        ConfettiRenderer::new(surface, &adapter, width, height, css).await
    }

    /// Backing size in physical pixels plus the CSS size
    fn canvas_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32, (f32, f32)) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = ((client_w as f64 * dpr) as u32).max(1);
        let height = ((client_h as f64 * dpr) as u32).max(1);
        (width, height, (client_w as f32, client_h as f32))
    }

    fn setup_hearts(card: &Rc<RefCell<Card>>) {
        let Some(document) = document() else { return };
        let Some(container) = document.get_element_by_id("hearts") else {
            return;
        };

        let mut c = card.borrow_mut();
        let layout = scatter_hearts(&mut c.fx_rng);
        for heart in layout {
            let Ok(el) = document.create_element("div") else {
                continue;
            };
            let _ = el.set_attribute("class", "heart");
            el.set_text_content(Some("💜"));
            if container.append_child(&el).is_err() {
                continue;
            }
            if let Ok(el) = el.dyn_into::<HtmlElement>() {
                let _ = el.style().set_property("left", &format!("{}vw", heart.x_vw));
                let _ = el.style().set_property("opacity", "0");
                c.hearts.push((heart, el));
            }
        }
    }

    fn setup_buttons(card: Rc<RefCell<Card>>) {
        // No button evades on pointer enter, before it can be clicked
        if let Some(btn) = element("no-btn") {
            let card = card.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                let mut c = card.borrow_mut();
                if let Some(event) = c.controller.pointer_enter() {
                    c.handle(event);
                }
            });
            let _ = btn.add_event_listener_with_callback("pointerenter", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = element("yes-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut c = card.borrow_mut();
                if let Some(event) = c.controller.accept() {
                    c.handle(event);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(card: Rc<RefCell<Card>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut c = card.borrow_mut();
            // Evasion bounds stay as measured at load; only the overlay follows the window
            c.field.set_viewport(viewport());
            if let (Some(window), Some(canvas)) = (
                web_sys::window(),
                element("confetti").and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok()),
            ) {
                let (width, height, css) = canvas_size(&window, &canvas);
                canvas.set_width(width);
                canvas.set_height(height);
                if let Some(ref mut renderer) = c.renderer {
                    renderer.resize(width, height, css);
                }
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(card: Rc<RefCell<Card>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            frame_loop(card, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(card: Rc<RefCell<Card>>, time: f64) {
        {
            let mut c = card.borrow_mut();

            let dt = if c.last_time > 0.0 {
                ((time - c.last_time) / 1000.0) as f32
            } else {
                FX_DT
            };
            c.last_time = time;

            c.update(dt);
            c.update_hearts(js_sys::Date::now());
            c.render();
        }

        request_animation_frame(card);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_card::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Valentine card (native) starting...");
    log::info!("The card itself runs in the browser - use `trunk serve` for the web version");

    headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a scripted session against a simulated 1280x800 page
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use valentine_card::Settings;
    use valentine_card::card::{CardEvent, EvasionController, Feedback, Rect, Viewport};
    use valentine_card::fx::{Celebration, ParticleField, explosion_burst, origin_from_rect};

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or(0x0214);
    let viewport = Viewport::new(1280.0, 800.0);
    let no_btn = Rect::new(700.0, 520.0, 120.0, 56.0);

    let mut controller = EvasionController::new(settings.evasion(), seed);
    let mut field = ParticleField::new(seed, settings.max_particles(), viewport);
    if let Err(e) = controller.initialize(no_btn, viewport) {
        log::warn!("{}", e);
        return;
    }

    let threshold = controller.config().threshold;
    for _ in 0..=threshold {
        let Some(event) = controller.pointer_enter() else {
            break;
        };
        match event {
            CardEvent::Evaded { to, final_dodge, .. } => println!(
                "No #{:>2} -> ({:>6.1}, {:>6.1}){}",
                controller.interaction_count(),
                to.x,
                to.y,
                if final_dodge { "  big final dodge!" } else { "" }
            ),
            CardEvent::Exploded { burst } => {
                let rect = no_btn.translated(controller.position());
                let spawned = if burst {
                    field.burst(&explosion_burst(origin_from_rect(&rect, &viewport)))
                } else {
                    0
                };
                println!("No exploded into {} pieces", spawned);
            }
            CardEvent::Accepted => {}
        }
        if let Some(line) = Feedback::for_count(controller.interaction_count(), threshold) {
            println!("    {}", line.text());
        }
    }

    if controller.accept().is_some() {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut celebration = Celebration::new();
        let mut volleys = 0;
        while !celebration.is_finished() {
            for burst in celebration.update(valentine_card::consts::FX_DT, &mut rng) {
                field.burst(&burst);
                volleys += 1;
            }
            field.step();
        }
        println!("Yay! 💜");
        log::info!("Celebration fired {} bursts", volleys);
    }
}
