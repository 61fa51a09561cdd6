use crate::debug_print;
use crate::engine::{Game, GameConfig, InputManager, Renderer};
use log::info;
use sokol::{app as sapp, gfx as sg, glue as sglue};
use std::ffi::{self, CString};

pub struct App<T: Game> {
    game: T,
    config: GameConfig,
}

// State structure that will be passed through sokol callbacks
struct AppState<T: Game> {
    game: T,
    config: GameConfig,
    pass_action: sg::PassAction,
    renderer: Renderer,
    input: InputManager,
}

impl<T: Game> App<T> {
    pub fn new(game: T) -> Self {
        let config = game.config();
        Self { game, config }
    }

    pub fn run(self) {
        let mut pass_action = sg::PassAction::new();
        pass_action.colors[0] = sg::ColorAttachmentAction {
            load_action: sg::LoadAction::Clear,
            clear_value: self.config.background_color,
            ..Default::default()
        };

        // Interior NULs can't come from our own titles, strip them rather than fail
        let title = CString::new(self.config.window_title.replace('\0', "")).unwrap_or_default();
        let width = self.config.window_width;
        let height = self.config.window_height;
        let sample_count = self.config.sample_count;
        let high_dpi = self.config.high_dpi;

        let state = Box::new(AppState {
            game: self.game,
            config: self.config,
            pass_action,
            renderer: Renderer::new(),
            input: InputManager::new(),
        });

        let user_data = Box::into_raw(state) as *mut ffi::c_void;

        sapp::run(&sapp::Desc {
            init_userdata_cb: Some(init::<T>),
            frame_userdata_cb: Some(frame::<T>),
            cleanup_userdata_cb: Some(cleanup::<T>),
            event_userdata_cb: Some(event::<T>),
            user_data,
            window_title: title.as_ptr(),
            width,
            height,
            sample_count,
            high_dpi,
            logger: sapp::Logger {
                func: Some(sokol::log::slog_func),
                ..Default::default()
            },
            icon: sapp::IconDesc {
                sokol_default: true,
                ..Default::default()
            },
            ..Default::default()
        });
    }
}

extern "C" fn init<T: Game>(user_data: *mut ffi::c_void) {
    let state = unsafe { &mut *(user_data as *mut AppState<T>) };

    sg::setup(&sg::Desc {
        environment: sglue::environment(),
        logger: sg::Logger {
            func: Some(sokol::log::slog_func),
            ..Default::default()
        },
        ..Default::default()
    });

    let backend = sg::query_backend();
    match &backend {
        sg::Backend::Glcore | sg::Backend::Gles3 => info!("Using GL Backend: {:?}", backend),
        sg::Backend::D3d11 => info!("Using D3D11 Backend"),
        sg::Backend::MetalIos | sg::Backend::MetalMacos | sg::Backend::MetalSimulator => {
            info!("Using Metal Backend: {:?}", backend)
        }
        sg::Backend::Wgpu => info!("Using WGPU Backend"),
        sg::Backend::Dummy => info!("Using Dummy Backend"),
    }

    state.renderer.init();
    state
        .renderer
        .set_viewport_size(sapp::width() as f32, sapp::height() as f32);

    let config = state.config.clone();
    state.game.init(&config, &mut state.renderer);

    debug_print!("Window size: {}x{}", sapp::width(), sapp::height());
}

extern "C" fn frame<T: Game>(user_data: *mut ffi::c_void) {
    let state = unsafe { &mut *(user_data as *mut AppState<T>) };
    let dt = sapp::frame_duration() as f32;

    state.game.update(dt, &mut state.input);

    sg::begin_pass(&sg::Pass {
        action: state.pass_action,
        swapchain: sglue::swapchain(),
        ..Default::default()
    });

    state.renderer.begin_frame();
    state.game.render(&mut state.renderer);
    state.renderer.flush();

    sg::end_pass();
    sg::commit();

    state.input.new_frame();

    if state.game.wants_quit() {
        sapp::request_quit();
    }
}

extern "C" fn cleanup<T: Game>(user_data: *mut ffi::c_void) {
    sg::shutdown();
    let _state = unsafe { Box::from_raw(user_data as *mut AppState<T>) };
    // State will be dropped automatically, cleaning up the game
}

extern "C" fn event<T: Game>(event: *const sapp::Event, user_data: *mut ffi::c_void) {
    let state = unsafe { &mut *(user_data as *mut AppState<T>) };
    let event = unsafe { &*event };

    process_input_events(state, event);
    state.game.handle_event(event);
}

fn process_input_events<T: Game>(state: &mut AppState<T>, event: &sapp::Event) {
    match event._type {
        sapp::EventType::KeyDown => state.input.handle_key_down(event.key_code),
        sapp::EventType::KeyUp => state.input.handle_key_up(event.key_code),
        sapp::EventType::MouseMove => state.input.handle_mouse_move(event.mouse_x, event.mouse_y),
        sapp::EventType::MouseDown => {
            state
                .input
                .handle_mouse_button_down(event.mouse_button, event.mouse_x, event.mouse_y)
        }
        sapp::EventType::MouseUp => state.input.handle_mouse_button_up(event.mouse_button),
        sapp::EventType::QuitRequested => state.input.handle_quit_requested(),
        sapp::EventType::Resized => {
            state
                .renderer
                .set_viewport_size(event.window_width as f32, event.window_height as f32);
        }
        _ => {}
    }
}
