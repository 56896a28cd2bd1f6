use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::accessibility::Preferences;
use crate::burst::Burst;
use crate::config::Config;
use crate::error::RunError;
use crate::gpu::GpuState;
use crate::palette::BACKGROUND;
use crate::pointer::Pointer;
use crate::preloader::Preloader;
use crate::render::{Canvas, HighContrast};
use crate::scheduler::Signal;
use crate::spawn::SpawnContext;
use crate::time::Time;
use crate::trail::CodeRain;
use crate::viewport::Viewport;

/// Open a window and play the preloader in it.
///
/// Returns once the preloader has completed or the window was closed. The
/// returned preferences include any toggles made while running.
pub fn run(config: Config, prefs: Preferences) -> Result<Preferences, RunError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, prefs);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(app.prefs),
    }
}

struct App {
    config: Config,
    prefs: Preferences,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    preloader: Option<Preloader>,
    rain: Option<CodeRain>,
    bursts: Vec<Burst>,
    pointer: Pointer,
    ctx: SpawnContext,
    time: Time,
    error: Option<RunError>,
}

impl App {
    fn new(config: Config, prefs: Preferences) -> Self {
        let ctx = SpawnContext::from_seed(config.seed.map(|s| s.wrapping_add(1)));
        Self {
            config,
            prefs,
            window: None,
            gpu_state: None,
            preloader: None,
            rain: None,
            bursts: Vec::new(),
            pointer: Pointer::new(),
            ctx,
            time: Time::new(),
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.as_str())
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu_state = pollster::block_on(GpuState::new(window.clone()))?;

        let size = window.inner_size();
        let mut builder = Preloader::builder()
            .with_config(self.config.preloader)
            .with_surface_size(size.width as f32, size.height as f32)
            .with_reduced_motion(self.prefs.reduced_motion)
            .with_pointer(self.pointer.clone())
            .on_complete(|| log::info!("preloader finished, handing over"));
        if let Some(seed) = self.config.seed {
            builder = builder.with_seed(seed);
        }
        let preloader = builder.activate();

        let area = Viewport::new(size.width.max(1) as f32, size.height.max(1) as f32);
        self.rain = Some(CodeRain::new(
            area,
            self.config.trail,
            self.prefs.reduced_motion,
            self.ctx.fork(),
        ));

        self.time.reset();
        self.preloader = Some(preloader);
        self.gpu_state = Some(gpu_state);
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RunError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    /// Step every effect by one wall-clock frame. Returns `true` once the
    /// preloader has handed over.
    fn update(&mut self) -> bool {
        let delta = self.time.update();
        let frames = self.time.frame_scale();

        if let Some(rain) = &mut self.rain {
            rain.step(frames);
        }
        self.bursts.retain_mut(|b| b.step(frames));

        match &mut self.preloader {
            Some(preloader) => {
                let frame = preloader.tick(delta);
                if frame.completed {
                    return true;
                }
                if frame.signals.contains(&Signal::ShowText) {
                    if let Some(window) = &self.window {
                        let overlay = preloader.overlay();
                        window.set_title(&format!("{} | {} | {}", overlay.greeting, overlay.title, overlay.subtitle));
                    }
                }
                !preloader.is_running()
            }
            None => false,
        }
    }

    fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.clear(BACKGROUND);
        if let Some(rain) = &self.rain {
            rain.draw(canvas);
        }
        if let Some(preloader) = &self.preloader {
            preloader.draw(canvas);
        }
        for burst in &self.bursts {
            burst.draw(canvas);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.update() {
            event_loop.exit();
            return;
        }

        let Some(mut gpu_state) = self.gpu_state.take() else {
            return;
        };
        if self.prefs.high_contrast {
            self.draw(&mut HighContrast(&mut gpu_state));
        } else {
            self.draw(&mut gpu_state);
        }

        match gpu_state.render() {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => gpu_state.resize(winit::dpi::PhysicalSize {
                width: gpu_state.config.width,
                height: gpu_state.config.height,
            }),
            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
            Err(e) => log::warn!("render error: {:?}", e),
        }
        self.gpu_state = Some(gpu_state);

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn on_key(&mut self, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.logical_key.as_ref() {
            Key::Character("m") | Key::Character("M") => {
                self.prefs.toggle_reduced_motion();
                // the preloader read the preference at activation; only the trail follows
                if let (Some(rain), Some(gpu_state)) = (&mut self.rain, &self.gpu_state) {
                    let area = Viewport::new(gpu_state.config.width as f32, gpu_state.config.height as f32);
                    *rain = CodeRain::new(area, self.config.trail, self.prefs.reduced_motion, self.ctx.fork());
                }
                log::info!("reduced motion: {}", self.prefs.reduced_motion);
            }
            Key::Character("h") | Key::Character("H") => {
                self.prefs.toggle_high_contrast();
                log::info!("high contrast: {}", self.prefs.high_contrast);
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.start(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(preloader) = &mut self.preloader {
                    preloader.teardown();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                if let (Some(rain), Some(area)) = (
                    &mut self.rain,
                    Viewport::usable(physical_size.width as f32, physical_size.height as f32),
                ) {
                    rain.resize(area);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.set(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer.reset();
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if self.pointer.has_moved() {
                    let burst = Burst::new(self.pointer.get(), self.config.burst, &mut self.ctx);
                    self.bursts.push(burst);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.logical_key == Key::Named(NamedKey::Escape) && event.state == ElementState::Pressed {
                    if let Some(preloader) = &mut self.preloader {
                        preloader.teardown();
                    }
                    event_loop.exit();
                } else {
                    self.on_key(event);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
