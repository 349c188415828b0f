use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use eframe::egui::{self, mutex::Mutex};

use crate::config::{self, Config, OptionOverrides};
use crate::deck::{Deck, DeckOptions};
use crate::gesture::SwipeRecognizer;
use crate::history::{Location, MemoryHistory};
use crate::keyboard::{KeyAction, Keyboard, KeyboardRouter};
use crate::presenter::{
    PresenterPayload, PresenterProps, PresenterWindow, WindowFeatures, WindowHost,
};
use crate::render::{self, image_cache::ImageCache, presenter::PresenterView};
use crate::slide::{SlideSequence, SlideUnit};
use crate::source;
use crate::theme::Theme;

const ESC_DOUBLE_TAP_SECS: f32 = 1.0;

fn presenter_viewport_id() -> egui::ViewportId {
    egui::ViewportId::from_hash_of("diorama-presenter")
}

/// Contents of the presenter viewport, shared with its deferred render
/// callback.
#[derive(Default)]
struct PresenterDocument {
    view: Option<PresenterView>,
    styles: Option<Theme>,
    title: String,
    size: [f32; 2],
    closed: bool,
}

/// Deck-window state the window host reads from and writes to.
struct HostState {
    title: String,
    theme: Theme,
    alerts: VecDeque<String>,
    presenter: Option<Arc<Mutex<PresenterDocument>>>,
}

/// Opens presenter windows as egui viewports.
struct EguiWindowHost {
    ctx: egui::Context,
    state: Rc<RefCell<HostState>>,
}

impl WindowHost for EguiWindowHost {
    fn open_window(
        &mut self,
        name: &str,
        features: &WindowFeatures,
    ) -> Option<Box<dyn PresenterWindow>> {
        // Backends without multi-viewport support would draw the window
        // inside the deck; treat that as a refusal.
        if self.ctx.embed_viewports() {
            tracing::debug!(name, "backend cannot open native windows");
            return None;
        }

        tracing::debug!(name, %features, "opening native window");
        let document = Arc::new(Mutex::new(PresenterDocument {
            title: name.to_string(),
            size: [features.width as f32, features.height as f32],
            ..PresenterDocument::default()
        }));
        self.state.borrow_mut().presenter = Some(document.clone());
        self.ctx.request_repaint();
        Some(Box::new(ViewportWindow {
            document,
            ctx: self.ctx.clone(),
        }))
    }

    fn alert(&mut self, message: &str) {
        self.state.borrow_mut().alerts.push_back(message.to_string());
        self.ctx.request_repaint();
    }

    fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    fn style_sheets(&self) -> Theme {
        self.state.borrow().theme.clone()
    }
}

struct ViewportWindow {
    document: Arc<Mutex<PresenterDocument>>,
    ctx: egui::Context,
}

impl ViewportWindow {
    fn repaint(&self) {
        self.ctx.request_repaint_of(presenter_viewport_id());
    }
}

impl PresenterWindow for ViewportWindow {
    fn is_closed(&self) -> bool {
        self.document.lock().closed
    }

    fn adopt_styles(&mut self, styles: &Theme) {
        self.document.lock().styles = Some(styles.clone());
    }

    fn mount(&mut self, props: PresenterProps) {
        self.document.lock().view = Some(PresenterView::mount(props));
        self.repaint();
    }

    fn update(&mut self, payload: PresenterPayload) {
        if let Some(view) = self.document.lock().view.as_mut() {
            view.update(payload);
        }
        self.repaint();
    }

    fn set_title(&mut self, title: &str) {
        self.document.lock().title = title.to_string();
        self.repaint();
    }

    fn close(&mut self) {
        self.document.lock().closed = true;
        self.ctx.request_repaint();
    }
}

fn draw_presenter_document(
    ctx: &egui::Context,
    document: &Mutex<PresenterDocument>,
    images: &ImageCache,
) {
    if ctx.input(|i| i.viewport().close_requested()) {
        tracing::info!("presenter window closed by the user");
        document.lock().closed = true;
        ctx.request_repaint_of(egui::ViewportId::ROOT);
        return;
    }

    let doc = document.lock();
    let bg = doc
        .styles
        .as_ref()
        .map_or(egui::Color32::BLACK, |styles| styles.background);
    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
        .show(ctx, |ui| {
            if let Some(view) = &doc.view {
                view.draw(ui, images, ui.max_rect());
            }
        });
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let duration = 1.5;
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / (duration - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= 1.5
    }
}

/// Input gathered inside `ctx.input`, applied after the closure returns.
enum Command {
    Key(KeyAction),
    First,
    Last,
    OpenPresenter,
    ToggleTheme,
    Escape,
    Viewport(egui::ViewportCommand),
}

fn key_action(key: egui::Key) -> Option<KeyAction> {
    match key {
        egui::Key::ArrowLeft => Some(KeyAction::Left),
        egui::Key::ArrowRight => Some(KeyAction::Right),
        egui::Key::PageUp => Some(KeyAction::PageUp),
        egui::Key::PageDown => Some(KeyAction::PageDown),
        _ => None,
    }
}

/// A slide's own `dark` / `light` class wins over the deck theme.
fn slide_theme(slide: &SlideUnit, deck_theme: &Theme) -> Theme {
    Theme::from_class_name(slide.class_name(), &deck_theme.name)
}

struct Launch {
    title: String,
    slides: SlideSequence,
    base_path: PathBuf,
    options: DeckOptions,
    theme: String,
    location: Location,
}

struct DioramaApp {
    deck: Deck,
    keyboard: Rc<Keyboard>,
    swipe: SwipeRecognizer,
    host: Rc<RefCell<HostState>>,
    images: Arc<ImageCache>,
    theme: Theme,
    toast: Option<Toast>,
    last_esc: Option<Instant>,
}

impl DioramaApp {
    fn new(ctx: &egui::Context, launch: Launch) -> Self {
        let theme = Theme::from_class_name(&launch.options.class_name, &launch.theme);
        let host = Rc::new(RefCell::new(HostState {
            title: launch.title,
            theme: theme.clone(),
            alerts: VecDeque::new(),
            presenter: None,
        }));

        let keyboard = Rc::new(Keyboard::new());
        let router: Rc<dyn KeyboardRouter> = keyboard.clone();
        let window_host = EguiWindowHost {
            ctx: ctx.clone(),
            state: host.clone(),
        };
        let deck = Deck::mount(
            launch.slides,
            launch.options,
            router,
            Box::new(MemoryHistory::new(launch.location)),
            Box::new(window_host),
        );

        let mut swipe = SwipeRecognizer::default();
        swipe.attach(deck.swipe_handlers());

        Self {
            deck,
            keyboard,
            swipe,
            host,
            images: Arc::new(ImageCache::new(launch.base_path)),
            theme,
            toast: None,
            last_esc: None,
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.host.borrow_mut().theme = self.theme.clone();
        tracing::debug!(theme = %self.theme.name, "theme toggled");
    }

    fn open_presenter(&mut self) {
        if self.deck.open_presenter_notes() {
            self.toast = Some(Toast::new("Presenter notes open"));
        }
    }

    fn collect_commands(ctx: &egui::Context) -> Vec<Command> {
        ctx.input(|i| {
            let mut commands = Vec::new();
            if i.key_pressed(egui::Key::Q) {
                commands.push(Command::Viewport(egui::ViewportCommand::Close));
                return commands;
            }
            if i.key_pressed(egui::Key::Escape) {
                commands.push(Command::Escape);
            }
            if i.key_pressed(egui::Key::F) {
                commands.push(Command::Viewport(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                )));
            }
            if i.key_pressed(egui::Key::D) {
                commands.push(Command::ToggleTheme);
            }
            if i.key_pressed(egui::Key::S) {
                commands.push(Command::OpenPresenter);
            }
            if i.key_pressed(egui::Key::Home) {
                commands.push(Command::First);
            }
            if i.key_pressed(egui::Key::End) {
                commands.push(Command::Last);
            }
            for event in &i.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    ..
                } = event
                {
                    if let Some(action) = key_action(*key) {
                        commands.push(Command::Key(action));
                    }
                }
            }
            commands
        })
    }

    fn apply(&mut self, ctx: &egui::Context, command: Command) {
        match command {
            Command::Key(action) => {
                let called = self.keyboard.dispatch(action);
                tracing::trace!(%action, called, "key dispatched");
            }
            Command::First => self.deck.navigator().go_to(0),
            Command::Last => self
                .deck
                .navigator()
                .go_to(self.deck.slides().last_index()),
            Command::OpenPresenter => self.open_presenter(),
            Command::ToggleTheme => self.toggle_theme(),
            Command::Escape => {
                if self
                    .last_esc
                    .is_some_and(|last| last.elapsed().as_secs_f32() < ESC_DOUBLE_TAP_SECS)
                {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                } else {
                    self.last_esc = Some(Instant::now());
                    self.toast = Some(Toast::new("Press Esc again to exit"));
                }
            }
            Command::Viewport(cmd) => ctx.send_viewport_cmd(cmd),
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context) {
        let (pressed, latest, released) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.latest_pos(),
                i.pointer.primary_released(),
            )
        });
        let Some(pos) = latest else {
            return;
        };
        if pressed {
            self.swipe.press(pos);
        }
        self.swipe.move_to(pos);
        if released {
            if let Some(direction) = self.swipe.release(pos) {
                tracing::debug!(?direction, "swipe");
            }
        }
    }

    fn show_presenter(&self, ctx: &egui::Context) {
        let Some(document) = self.host.borrow().presenter.clone() else {
            return;
        };
        let (title, size, closed) = {
            let doc = document.lock();
            (doc.title.clone(), doc.size, doc.closed)
        };
        if closed {
            self.host.borrow_mut().presenter = None;
            return;
        }

        let images = self.images.clone();
        ctx.show_viewport_deferred(
            presenter_viewport_id(),
            egui::ViewportBuilder::default()
                .with_title(title)
                .with_inner_size(size),
            move |ctx, _class| draw_presenter_document(ctx, &document, &images),
        );
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.host.borrow().alerts.front().cloned() else {
            return;
        };
        let mut dismissed = false;
        let modal = egui::Modal::new(egui::Id::new("diorama-alert")).show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.label(&message);
            ui.add_space(12.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
        if dismissed || modal.should_close() {
            self.host.borrow_mut().alerts.pop_front();
        }
    }
}

fn draw_toast(ui: &egui::Ui, toast: &Toast, theme: &Theme, rect: egui::Rect, scale: f32) {
    let opacity = toast.opacity();
    if opacity <= 0.0 {
        return;
    }
    let toast_color = Theme::with_opacity(theme.foreground, opacity * 0.9);
    let toast_bg = Theme::with_opacity(theme.panel_background, opacity * 0.9);
    let galley = ui.painter().layout_no_wrap(
        toast.message.clone(),
        egui::FontId::proportional(20.0 * scale),
        toast_color,
    );
    let padding = 16.0 * scale;
    let toast_rect = egui::Rect::from_min_size(
        egui::pos2(
            rect.center().x - galley.rect.width() / 2.0 - padding,
            rect.bottom() - 80.0 * scale,
        ),
        egui::vec2(
            galley.rect.width() + padding * 2.0,
            galley.rect.height() + padding * 2.0,
        ),
    );
    ui.painter().rect_filled(toast_rect, 8.0 * scale, toast_bg);
    let text_pos = egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding);
    ui.painter().galley(text_pos, galley, toast_color);
}

impl eframe::App for DioramaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // The alert blocks the deck until dismissed
        let alert_open = !self.host.borrow().alerts.is_empty();
        if !alert_open {
            let commands = Self::collect_commands(ctx);
            for command in commands {
                self.apply(ctx, command);
            }
            self.handle_pointer(ctx);
        }
        self.deck.process_events();

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.theme.background).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let scale = render::compute_scale(rect);
                let rendered = self.deck.render();
                let theme = slide_theme(rendered.slide, &self.theme);
                ui.painter().rect_filled(rect, 0.0, theme.background);

                render::render_slide(ui, rendered.slide, &theme, rect, &self.images, scale);
                render::draw_chrome(
                    ui,
                    &rendered,
                    self.deck.slides().len(),
                    self.deck.options(),
                    &theme,
                    rect,
                    scale,
                );

                if let Some(toast) = &self.toast {
                    draw_toast(ui, toast, &self.theme, rect, scale);
                    ctx.request_repaint();
                }
            });

        // Clicks on links and navigation buttons
        if self.deck.process_events() > 0 {
            ctx.request_repaint();
        }

        self.show_presenter(ctx);
        self.show_alert(ctx);
    }
}

pub fn run(
    file: PathBuf,
    windowed: bool,
    url: Option<String>,
    overrides: OptionOverrides,
) -> anyhow::Result<()> {
    let deck = source::load(&file)?;
    let config = Config::load_or_default();
    let options = config::resolve_options(&[&config.option_overrides(), &deck.options, &overrides]);
    let location = match url {
        Some(url) => Location::parse(&url)?,
        None => Location::default(),
    };
    tracing::info!(
        file = %file.display(),
        slides = deck.slides.len(),
        %location,
        "starting deck"
    );

    let title = deck.title.clone();
    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let launch = Launch {
        title: deck.title,
        slides: deck.slides,
        base_path: deck.base_path,
        options,
        theme: config.theme().to_string(),
        location,
    };
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Ok(Box::new(DioramaApp::new(&cc.egui_ctx, launch)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
