//! Tab Triage - a viewer/editor for browser tab session JSON exports
//!
//! Paste or load an exported session, browse it as a collapsible tree of
//! windows, groups, and tabs, search and prune it, then export the result.

mod app;
mod config;
mod renderer;
mod session;
mod text_buffer;
mod theme;
mod ui;

use app::App;
use config::scroll;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use std::ffi::CString;
use std::num::NonZeroU32;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, ModifiersState, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

fn main() {
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut handler = AppHandler::new();
    event_loop.run_app(&mut handler).expect("Event loop failed");
}

struct AppHandler {
    state: Option<AppState>,
    modifiers: ModifiersState,
    mouse_position: (f64, f64),
}

struct AppState {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    app: App,
}

impl AppHandler {
    fn new() -> Self {
        Self {
            state: None,
            modifiers: ModifiersState::default(),
            mouse_position: (0.0, 0.0),
        }
    }
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title("Tab Triage")
            .with_inner_size(LogicalSize::new(1100.0, 720.0));

        // OpenGL config with 4x MSAA for smooth text and edges
        let config_template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_multisampling(4);

        let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

        let (window, gl_config) = display_builder
            .build(event_loop, config_template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("No GL configs found")
            })
            .expect("Failed to create window");

        let window = window.expect("Window not created");
        let gl_display = gl_config.display();

        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(None))
            .build(Some(
                window
                    .window_handle()
                    .expect("Failed to get window handle")
                    .as_raw(),
            ));

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attrs)
                .expect("Failed to create GL context")
        };

        let size = window.inner_size();
        let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            window
                .window_handle()
                .expect("Failed to get window handle")
                .as_raw(),
            NonZeroU32::new(size.width.max(1)).unwrap(),
            NonZeroU32::new(size.height.max(1)).unwrap(),
        );

        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &surface_attrs)
                .expect("Failed to create surface")
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .expect("Failed to make context current");

        let gl_renderer = unsafe {
            femtovg::renderer::OpenGl::new_from_function_cstr(|name| {
                let cstr = CString::new(name.to_bytes()).unwrap();
                gl_display.get_proc_address(&cstr) as *const _
            })
            .expect("Failed to create renderer")
        };

        let scale = window.scale_factor() as f32;
        let app = App::new(gl_renderer, size.width as f32, size.height as f32, scale);

        self.state = Some(AppState {
            window,
            gl_context,
            gl_surface,
            app,
        });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    state.gl_surface.resize(
                        &state.gl_context,
                        NonZeroU32::new(size.width).unwrap(),
                        NonZeroU32::new(size.height).unwrap(),
                    );
                    let scale = state.window.scale_factor() as f32;
                    state
                        .app
                        .resize(size.width as f32, size.height as f32, scale);
                    state.window.request_redraw();
                }
            }

            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    let ctrl = self.modifiers.control_key();
                    let shift = self.modifiers.shift_key();

                    let result = match &event.logical_key {
                        Key::Named(NamedKey::Escape) => state.app.handle_escape(),
                        Key::Named(NamedKey::Enter) if ctrl => state.app.handle_load_shortcut(),
                        Key::Named(NamedKey::Enter) => state.app.handle_enter(),
                        Key::Named(NamedKey::Tab) => state.app.handle_tab_key(),
                        Key::Named(NamedKey::Backspace) => state.app.handle_backspace(),
                        Key::Named(NamedKey::Delete) => state.app.handle_delete(),
                        Key::Named(NamedKey::ArrowLeft) => state.app.handle_arrow_left(shift),
                        Key::Named(NamedKey::ArrowRight) => state.app.handle_arrow_right(shift),
                        Key::Named(NamedKey::ArrowUp) => state.app.handle_arrow_up(shift),
                        Key::Named(NamedKey::ArrowDown) => state.app.handle_arrow_down(shift),
                        Key::Named(NamedKey::Home) => state.app.handle_home(shift, ctrl),
                        Key::Named(NamedKey::End) => state.app.handle_end(shift, ctrl),
                        Key::Named(NamedKey::PageUp) => state.app.handle_page_up(),
                        Key::Named(NamedKey::PageDown) => state.app.handle_page_down(),
                        Key::Named(NamedKey::Space) => state.app.handle_char(' '),
                        Key::Character(c) if ctrl => match c.as_str() {
                            "a" => state.app.handle_select_all(),
                            "c" => state.app.handle_copy(),
                            "x" => state.app.handle_cut(),
                            "v" => state.app.handle_paste(),
                            _ => crate::app::AppResult::Ok,
                        },
                        Key::Character(c) => {
                            let mut result = crate::app::AppResult::Ok;
                            for ch in c.as_str().chars() {
                                result = result.merge(state.app.handle_char(ch));
                            }
                            result
                        }
                        _ => crate::app::AppResult::Ok,
                    };

                    if result.needs_redraw() {
                        state.window.request_redraw();
                    }
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll_lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => {
                        -y as i32 * scroll::LINES_PER_WHEEL_TICK as i32
                    }
                    MouseScrollDelta::PixelDelta(pos) => -(pos.y / 24.0) as i32,
                };
                if state.app.scroll_lines(scroll_lines).needs_redraw() {
                    state.window.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = (position.x, position.y);
                if state
                    .app
                    .handle_mouse_move(position.x as f32, position.y as f32)
                    .needs_redraw()
                {
                    state.window.request_redraw();
                }
            }

            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                if button == MouseButton::Left {
                    let result = if button_state == ElementState::Pressed {
                        state.app.click_at(
                            self.mouse_position.0 as f32,
                            self.mouse_position.1 as f32,
                            self.modifiers.shift_key(),
                        )
                    } else {
                        state.app.release()
                    };
                    if result.needs_redraw() {
                        state.window.request_redraw();
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                state.app.render();
                state
                    .gl_surface
                    .swap_buffers(&state.gl_context)
                    .expect("Failed to swap buffers");
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            if state.app.tick().needs_redraw() {
                state.window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::Poll);
    }
}
