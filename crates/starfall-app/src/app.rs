use std::cell::RefCell;
use std::rc::Rc;

use starfall_auth::{AuthForm, AuthProvider, FederatedProvider, FormOutcome, Identity, MemoryAuthProvider, Subscription};
use starfall_engine::coords::{Vec2, Viewport};
use starfall_engine::core::{App, AppControl, FrameCtx};
use starfall_engine::input::{InputEvent, Key, KeyState};
use starfall_engine::paint::Color;
use starfall_engine::render::shapes::circle::CircleRenderer;
use starfall_engine::render::shapes::rect::RectRenderer;
use starfall_engine::scene::DrawList;
use starfall_fx::{BackgroundMode, BoundElements, FrameStatus, RenderLoop, StarfieldConfig};

use crate::caption::CaptionElement;
use crate::logo::LogoElement;
use crate::overlay::StatusOverlay;

/// Page color behind a transparent starfield.
const PAGE_BACKGROUND: u32 = 0x0b0d17;

/// Vertical gap between the logo and the caption.
const LOGO_CAPTION_GAP: f32 = 36.0;

/// Which screen is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Starfield only, no auth.
    Standalone,
    /// Starfield behind the login/signup overlay.
    SignIn,
    /// Logo and `Welcome, {email}` caption over the starfield.
    Welcome { email: String },
}

/// Picks the view for the current session.
pub fn select_view(standalone: bool, session: Option<&Identity>) -> View {
    match (standalone, session) {
        (true, _) => View::Standalone,
        (false, None) => View::SignIn,
        (false, Some(identity)) => View::Welcome { email: identity.email.clone() },
    }
}

/// Outcome of a key press in the current view.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum KeyAction {
    None,
    Exit,
}

struct Renderers {
    rect: RectRenderer,
    circle: CircleRenderer,
}

impl Renderers {
    fn new() -> Self {
        Self { rect: RectRenderer::new(), circle: CircleRenderer::new() }
    }
}

pub struct StarfallApp {
    config: StarfieldConfig,
    standalone: bool,

    provider: MemoryAuthProvider,
    session: Rc<RefCell<Option<Identity>>>,
    _subscription: Option<Subscription>,
    form: AuthForm,

    font: Option<Rc<fontdue::Font>>,
    view: Option<View>,
    title: String,
    starfield: Option<RenderLoop>,
    logo: LogoElement,
    caption: Option<CaptionElement>,
    overlay: StatusOverlay,

    /// Stars and background.
    back: DrawList,
    /// Glow, elements and overlay.
    front: DrawList,
    back_renderers: Renderers,
    front_renderers: Renderers,
}

impl StarfallApp {
    pub fn new(
        config: StarfieldConfig,
        standalone: bool,
        provider: MemoryAuthProvider,
        form: AuthForm,
        font: Option<Rc<fontdue::Font>>,
    ) -> Self {
        let session = Rc::new(RefCell::new(None));

        let subscription = (!standalone).then(|| {
            let sink = session.clone();
            provider.on_auth_state_change(Box::new(move |identity: Option<&Identity>| {
                *sink.borrow_mut() = identity.cloned();
            }))
        });

        Self {
            config,
            standalone,
            provider,
            session,
            _subscription: subscription,
            form,
            overlay: StatusOverlay::new(font.clone()),
            font,
            view: None,
            title: String::new(),
            starfield: None,
            logo: LogoElement::new(),
            caption: None,
            back: DrawList::new(),
            front: DrawList::new(),
            back_renderers: Renderers::new(),
            front_renderers: Renderers::new(),
        }
    }

    /// Remounts when the session no longer matches the mounted view. A
    /// remount deactivates the old loop and activates a fresh one.
    fn sync_view(&mut self, viewport: Viewport, pointer: Option<(f32, f32)>) -> bool {
        let wanted = select_view(self.standalone, self.session.borrow().as_ref());
        if self.view.as_ref() == Some(&wanted) {
            return false;
        }

        if let Some(old) = self.starfield.as_mut() {
            old.deactivate();
        }

        log::info!("mounting {wanted:?}");
        let mut starfield = RenderLoop::activate(self.config.clone(), viewport);
        if let Some((x, y)) = pointer {
            starfield.pointer_moved(x, y);
        }
        self.starfield = Some(starfield);

        self.caption = match (&wanted, &self.font) {
            (View::Welcome { email }, Some(font)) => Some(CaptionElement::new(font, &format!("Welcome, {email}"))),
            _ => None,
        };

        self.view = Some(wanted);
        true
    }

    fn handle_key(&mut self, key: Key) -> KeyAction {
        let welcome = matches!(self.view, Some(View::Welcome { .. }));
        let editing = self.view == Some(View::SignIn) && self.session.borrow().is_none();

        match key {
            Key::Escape if welcome => self.provider.sign_out(),
            Key::Escape => return KeyAction::Exit,
            _ if !editing => {}
            Key::Tab => self.form.toggle_focus(),
            Key::Backspace => self.form.backspace(),
            Key::F2 => self.form.toggle_mode(),
            Key::Enter => self.report(|form, provider| form.submit(provider)),
            Key::F3 => self.report(|form, provider| form.continue_with(provider, FederatedProvider::Google)),
            Key::Unknown(_) => {}
        }
        KeyAction::None
    }

    fn report<F>(&mut self, op: F)
    where
        F: FnOnce(&mut AuthForm, &dyn AuthProvider) -> FormOutcome,
    {
        match op(&mut self.form, &self.provider) {
            FormOutcome::SignedIn(identity) => log::info!("welcome, {}", identity.email),
            FormOutcome::Rejected => log::warn!("auth failed: {}", self.form.error().unwrap_or_default()),
            FormOutcome::Incomplete => log::debug!("form incomplete"),
        }
    }

    /// Applies this frame's input in arrival order.
    fn apply_input(&mut self, events: &[InputEvent]) -> KeyAction {
        for ev in events {
            match ev {
                InputEvent::PointerMoved(p) => {
                    if let Some(sf) = self.starfield.as_mut() {
                        sf.pointer_moved(p.x, p.y);
                    }
                }
                InputEvent::Resized(r) => {
                    if let Some(sf) = self.starfield.as_mut() {
                        sf.resized(Viewport::new(r.width, r.height));
                    }
                }
                InputEvent::Text(t) => {
                    if self.view == Some(View::SignIn) {
                        self.form.insert_text(&t.text);
                    }
                }
                InputEvent::Key { key, state: KeyState::Pressed, .. } => {
                    if self.handle_key(*key) == KeyAction::Exit {
                        return KeyAction::Exit;
                    }
                }
                _ => {}
            }
        }
        KeyAction::None
    }

    fn window_title(&self) -> String {
        match &self.view {
            Some(View::SignIn) => match self.form.error() {
                Some(err) => format!("starfall · {} · {err}", self.form.heading()),
                None => format!("starfall · {}", self.form.heading()),
            },
            Some(View::Welcome { email }) => format!("starfall · {email}"),
            _ => "starfall".to_string(),
        }
    }

    /// Records elements and overlay into the front list.
    fn paint_front(&mut self, viewport: Viewport) {
        self.front.clear();
        let center = viewport.center();

        match &self.view {
            Some(View::Welcome { .. }) => {
                let caption_h = self.caption.as_ref().map_or(0.0, CaptionElement::height);
                let logo_r = self.logo.extent();
                let total = logo_r * 2.0 + LOGO_CAPTION_GAP + caption_h;
                let top = center.y - total / 2.0;

                self.logo.paint(&mut self.front, Vec2::new(center.x, top + logo_r));
                if let Some(caption) = &self.caption {
                    let y = top + logo_r * 2.0 + LOGO_CAPTION_GAP + caption_h / 2.0;
                    caption.paint(&mut self.front, Vec2::new(center.x, y));
                }
            }
            Some(View::SignIn) => {
                self.overlay.update(&self.form);
                self.overlay.paint(&mut self.front, viewport);
            }
            _ => {}
        }
    }
}

impl App for StarfallApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();
        let pointer = ctx.input.pointer_pos;
        if ctx.time.frame_index == 0 {
            log::info!("first frame at {}x{}", viewport.width, viewport.height);
        }

        self.sync_view(viewport, pointer);
        if self.apply_input(&ctx.input_frame.events) == KeyAction::Exit {
            return AppControl::Exit;
        }
        // Sign-in or sign-out during input takes effect this frame.
        self.sync_view(viewport, pointer);

        let title = self.window_title();
        if title != self.title {
            ctx.runtime.set_title(title.clone());
            self.title = title;
        }

        let now_ms = ctx.time.elapsed_ms();
        let status = match self.starfield.as_mut() {
            Some(sf) => {
                let mut elements = BoundElements::none();
                if matches!(self.view, Some(View::Welcome { .. })) {
                    elements = elements.with_logo(&mut self.logo);
                    if let Some(caption) = self.caption.as_mut() {
                        elements = elements.with_caption(caption);
                    }
                }
                sf.frame(now_ms, &mut self.back, elements)
            }
            None => FrameStatus::Stopped,
        };

        self.paint_front(viewport);

        let clear = match self.config.background {
            BackgroundMode::Opaque(c) => c,
            BackgroundMode::Transparent => Color::from_hex(PAGE_BACKGROUND),
        };

        let back = &mut self.back;
        let front = &mut self.front;
        let br = &mut self.back_renderers;
        let fr = &mut self.front_renderers;

        let control = ctx.render(clear, |rctx, target| {
            br.rect.render(rctx, target, back);
            br.circle.render(rctx, target, back);
            fr.rect.render(rctx, target, front);
            fr.circle.render(rctx, target, front);
        });

        match (control, status) {
            (AppControl::Exit, _) => AppControl::Exit,
            (_, FrameStatus::Continue) => AppControl::Continue,
            (_, FrameStatus::Stopped) => AppControl::Idle,
        }
    }

    fn on_exit(&mut self) {
        if let Some(sf) = self.starfield.as_mut() {
            sf.deactivate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(standalone: bool, provider: MemoryAuthProvider) -> StarfallApp {
        StarfallApp::new(
            StarfieldConfig::interactive().with_seed(3).with_star_count(10),
            standalone,
            provider,
            AuthForm::new(),
            None,
        )
    }

    fn type_text(app: &mut StarfallApp, text: &str) {
        app.apply_input(&[InputEvent::Text(starfall_engine::input::TextEvent { text: text.to_string() })]);
    }

    fn press(app: &mut StarfallApp, key: Key) -> KeyAction {
        app.apply_input(&[InputEvent::Key { key, state: KeyState::Pressed, repeat: false }])
    }

    #[test]
    fn view_follows_session() {
        let id = Identity { uid: "u".into(), email: "ada@example.com".into() };
        assert_eq!(select_view(true, Some(&id)), View::Standalone);
        assert_eq!(select_view(false, None), View::SignIn);
        assert_eq!(select_view(false, Some(&id)), View::Welcome { email: "ada@example.com".into() });
    }

    #[test]
    fn keyboard_signup_mounts_welcome_with_fresh_loop() {
        let vp = Viewport::new(800.0, 600.0);
        let mut app = app(false, MemoryAuthProvider::new());
        assert!(app.sync_view(vp, None));
        assert_eq!(app.view, Some(View::SignIn));

        type_text(&mut app, "ada@example.com");
        press(&mut app, Key::Tab);
        type_text(&mut app, "hunter22");
        press(&mut app, Key::F2);
        press(&mut app, Key::Enter);

        assert!(app.session.borrow().is_some());
        assert!(app.sync_view(vp, Some((400.0, 300.0))));
        assert_eq!(app.view, Some(View::Welcome { email: "ada@example.com".into() }));
        assert!(app.starfield.as_ref().is_some_and(|sf| sf.is_active()));
    }

    #[test]
    fn escape_signs_out_then_exits() {
        let provider = MemoryAuthProvider::new().with_account("ada@example.com", "hunter22").unwrap();
        provider.sign_in("ada@example.com", "hunter22").unwrap();

        let vp = Viewport::new(800.0, 600.0);
        let mut app = app(false, provider);
        app.sync_view(vp, None);
        assert!(matches!(app.view, Some(View::Welcome { .. })));

        assert_eq!(press(&mut app, Key::Escape), KeyAction::None);
        assert!(app.session.borrow().is_none());
        app.sync_view(vp, None);
        assert_eq!(app.view, Some(View::SignIn));

        assert_eq!(press(&mut app, Key::Escape), KeyAction::Exit);
    }

    #[test]
    fn failed_login_keeps_form_state() {
        let mut app = app(false, MemoryAuthProvider::new());
        app.sync_view(Viewport::new(800.0, 600.0), None);

        type_text(&mut app, "ghost@example.com");
        press(&mut app, Key::Tab);
        type_text(&mut app, "secret1");
        press(&mut app, Key::Enter);

        assert_eq!(app.form.error(), Some("Error (auth/user-not-found)."));
        assert_eq!(app.form.email(), "ghost@example.com");
        assert_eq!(app.view, Some(View::SignIn));
        assert!(app.window_title().ends_with("Error (auth/user-not-found)."));
    }

    #[test]
    fn standalone_ignores_typing() {
        let mut app = app(true, MemoryAuthProvider::new());
        app.sync_view(Viewport::new(800.0, 600.0), None);
        type_text(&mut app, "abc");
        assert_eq!(app.form.email(), "");
        assert_eq!(press(&mut app, Key::Escape), KeyAction::Exit);
    }
}
