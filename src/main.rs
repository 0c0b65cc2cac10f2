//! Twinloop site entry point
//!
//! WASM: mounts the hero reveal and drives it from animation frames.
//! Native: serves the contact endpoint.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_hero {
    use std::cell::RefCell;
    use std::rc::Rc;
    use gloo_events::EventListener;
    use wasm_bindgen::prelude::*;
    use web_sys::PageTransitionEvent;

    use twinloop_site::HeroConfig;
    use twinloop_site::lifecycle::FrameLoop;
    use twinloop_site::platform::{HeroDom, Interception, measure, now_ms};
    use twinloop_site::sequencer::{
        HoldChange, MountContext, SequenceEvent, Sequencer, tick, twin_deck,
    };
    use twinloop_site::session;

    const HERO_ID: &str = "hero";

    /// Hero instance holding all page-view state
    struct Hero {
        seq: Rc<RefCell<Sequencer>>,
        dom: HeroDom,
        /// Held while the sequence owns scrolling; dropping it releases
        interception: Option<Interception>,
        frames: FrameLoop,
    }

    impl Hero {
        /// Acquire or release interception to match the guard
        fn sync_interception(&mut self) {
            let change = self.seq.borrow().hold_change(self.interception.is_some());
            match change {
                HoldChange::Engage => self.interception = Interception::engage(&self.seq),
                HoldChange::Release => self.interception = None,
                HoldChange::Keep => {}
            }
        }

        fn unmount(&mut self) {
            self.seq.borrow_mut().finish();
            self.seq.borrow_mut().drain_events();
            self.interception = None;
            self.dom.render(&self.seq.borrow());
            self.frames.hide();
            log::info!("Hero unmounted");
        }

        /// Advance the sequencer for this frame and redraw if anything moved
        fn frame(&mut self, time: f64) {
            let input = measure(self.dom.root());
            let events = {
                let mut seq = self.seq.borrow_mut();
                tick(&mut seq, &input, time);
                seq.drain_events()
            };

            for event in &events {
                match event {
                    SequenceEvent::PhaseChanged { from, to } => {
                        log::info!("Hero phase {:?} -> {:?}", from, to)
                    }
                    SequenceEvent::LayoutComputed { cards, breakpoint } => {
                        log::debug!("Laid out {} cards ({:?})", cards, breakpoint)
                    }
                    SequenceEvent::CardRevealed { .. } => {}
                }
            }

            self.sync_interception();
            if !events.is_empty() {
                self.dom.render(&self.seq.borrow());
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        let Some(mut dom) = HeroDom::find(HERO_ID) else {
            log::warn!("No #{} element on this page; hero disabled", HERO_ID);
            return;
        };

        let config = HeroConfig::load(HERO_ID);
        let input = measure(dom.root());
        let (container_width, container_height) = input.container.unwrap_or((0.0, 0.0));
        let ctx = MountContext {
            container_width,
            container_height,
            viewport_width: input.viewport_width.unwrap_or(container_width as f64),
            scroll_y: input.scroll_y.unwrap_or(0.0),
            already_played: session::has_played(),
            now_ms: now_ms(),
        };

        let mut seq = Sequencer::mount(twin_deck(), config, ctx);
        if seq.is_playing_fresh() {
            session::mark_played();
            log::info!("Hero sequence starting");
        } else {
            log::info!("Hero starts unlocked ({:?})", seq.skip_reason());
        }
        seq.drain_events();

        dom.build_cards(seq.placed_cards());
        dom.render(&seq);

        let hero = Rc::new(RefCell::new(Hero {
            seq: Rc::new(RefCell::new(seq)),
            dom,
            interception: None,
            frames: FrameLoop::new(),
        }));
        hero.borrow_mut().sync_interception();

        setup_page_lifecycle(&hero);
        request_animation_frame(hero);
    }

    fn request_animation_frame(hero: Rc<RefCell<Hero>>) {
        let claimed = hero.borrow_mut().frames.request();
        if claimed {
            schedule_frame(hero);
        }
    }

    /// Register the rAF callback for a frame already claimed on `frames`
    fn schedule_frame(hero: Rc<RefCell<Hero>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(hero, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Keeps running after unlock so resizes still relayout the pile
    fn frame_loop(hero: Rc<RefCell<Hero>>, time: f64) {
        if !hero.borrow_mut().frames.begin_frame() {
            return;
        }
        hero.borrow_mut().frame(time);
        request_animation_frame(hero);
    }

    /// Leaving the page finishes the sequence and releases everything, so a
    /// page restored from the back/forward cache is never left half-played.
    /// The restored page gets its frame loop back so resizes still relayout.
    fn setup_page_lifecycle(hero: &Rc<RefCell<Hero>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let on_hide = hero.clone();
        EventListener::new(&window, "pagehide", move |_event| {
            on_hide.borrow_mut().unmount();
        })
        .forget();

        let on_show = hero.clone();
        EventListener::new(&window, "pageshow", move |event| {
            let persisted = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(|e| e.persisted());
            // show() claims the frame request itself
            let restart = on_show.borrow_mut().frames.show(persisted);
            if restart {
                log::info!("Hero restored from page cache");
                schedule_frame(on_show.clone());
            }
        })
        .forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_hero::run();
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() {
    use clap::Parser;
    use twinloop_site::contact::{ServerConfig, serve};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Twinloop contact endpoint starting...");

    let config = ServerConfig::parse();
    if let Err(e) = serve(config).await {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
