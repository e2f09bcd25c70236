//! Application state and page management
//!
//! Fixed set of pages, each with its own persistent state. The game page is
//! the exception: it is mounted on start and torn down for good once the
//! visitor leaves it.

use crate::game::{GamePage, GamePageAction, GameSettings, LevelDef, TimerQueue};
use crate::pages::{ChatroomPage, DashboardPage, PassionPage, ProjectsPage};
use crate::ui::{draw_nav_bar, layout as nav_layout, menu_rect, NavState, Rect, UiContext};
use macroquad::logging::info;
use macroquad::prelude::Font;

/// The available pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Game,
    Dashboard,
    Projects,
    Chatroom,
    Passion,
}

impl Page {
    /// Pages reachable from the nav bar, in tab order
    pub const NAV: [Page; 4] = [Page::Dashboard, Page::Projects, Page::Chatroom, Page::Passion];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Game => "Game",
            Page::Dashboard => "Dashboard",
            Page::Projects => "Projects",
            Page::Chatroom => "Chatroom",
            Page::Passion => "My Passion",
        }
    }

    pub fn labels() -> [&'static str; 4] {
        Page::NAV.map(|p| p.label())
    }

    pub fn from_nav_index(i: usize) -> Option<Page> {
        Page::NAV.get(i).copied()
    }

    pub fn nav_index(&self) -> Option<usize> {
        Page::NAV.iter().position(|p| p == self)
    }
}

/// Main application state containing all page states
pub struct AppState {
    /// Currently shown page
    active: Page,

    /// Set once the completion notification has arrived
    pub game_completed: bool,

    /// Collapsed nav menu state
    pub nav: NavState,

    level: LevelDef,
    settings: GameSettings,

    /// Mounted while the game page is shown
    game: Option<GamePage>,

    /// Deferred page switches (after completion)
    switches: TimerQueue<Page>,

    pub dashboard: DashboardPage,
    pub projects: ProjectsPage,
    pub chatroom: ChatroomPage,
    pub passion: PassionPage,

    /// Icon font (Lucide)
    pub icon_font: Option<Font>,
}

impl AppState {
    /// Start on the game page with `level` mounted
    pub fn new(
        level: LevelDef,
        settings: GameSettings,
        dashboard: DashboardPage,
        icon_font: Option<Font>,
        now_unix: f64,
    ) -> Self {
        let game = GamePage::mount(&level, settings.clone());
        Self {
            active: Page::Game,
            game_completed: false,
            nav: NavState::default(),
            level,
            settings,
            game: Some(game),
            switches: TimerQueue::new(),
            dashboard,
            projects: ProjectsPage::new(),
            chatroom: ChatroomPage::new(now_unix),
            passion: PassionPage::new(),
            icon_font,
        }
    }

    pub fn active(&self) -> Page {
        self.active
    }

    #[cfg(test)]
    pub fn is_game_mounted(&self) -> bool {
        self.game.is_some()
    }

    #[cfg(test)]
    pub fn has_pending_switch(&self) -> bool {
        !self.switches.is_empty()
    }

    /// Show `page`. Leaving the game tears it down; any pending switch is dropped.
    pub fn navigate(&mut self, page: Page) {
        if page == self.active {
            return;
        }
        self.switches.cancel_all();

        if let Some(mut game) = self.game.take() {
            game.teardown();
        }
        if page == Page::Game {
            self.game = Some(GamePage::mount(&self.level, self.settings.clone()));
        }

        info!("Page: {} -> {}", self.active.label(), page.label());
        self.active = page;
    }

    /// "Skip Game": straight to the dashboard
    pub fn skip(&mut self) {
        self.navigate(Page::Dashboard);
    }

    /// Completion notification: remember it and switch to the dashboard shortly
    pub fn on_complete(&mut self, now: f64) {
        self.game_completed = true;
        self.switches.schedule(now, self.settings.page_switch_delay, Page::Dashboard);
    }

    /// Apply any page switch that has come due
    pub fn poll_switches(&mut self, now: f64) {
        for page in self.switches.poll(now) {
            self.navigate(page);
        }
    }

    /// Run and draw the game page full screen
    pub fn draw_game(&mut self, ctx: &mut UiContext, rect: Rect, now: f64) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        match game.frame(ctx, rect, now) {
            GamePageAction::None => {}
            GamePageAction::Skip => self.skip(),
            GamePageAction::Complete => self.on_complete(now),
        }
    }

    /// Nav bar plus the active content page
    pub fn draw_portfolio(&mut self, ctx: &mut UiContext, screen: Rect, now_unix: f64) {
        let bar = Rect::new(screen.x, screen.y, screen.w, nav_layout::BAR_HEIGHT);
        let content = Rect::new(screen.x, bar.bottom(), screen.w, screen.h - bar.h);

        // Content first so the dropdown menu lands on top; clicks under the
        // open menu are held back from the content
        let pressed = ctx.mouse.left_pressed;
        if menu_rect(bar, Page::NAV.len(), &self.nav).is_some_and(|menu| ctx.mouse.inside(&menu)) {
            ctx.mouse.left_pressed = false;
        }
        match self.active {
            Page::Game => {}
            Page::Dashboard => self.dashboard.draw(ctx, content, self.icon_font.as_ref()),
            Page::Projects => self.projects.draw(ctx, content),
            Page::Chatroom => self.chatroom.draw(ctx, content, now_unix),
            Page::Passion => self.passion.draw(ctx, content),
        }
        ctx.mouse.left_pressed = pressed;

        let active_index = self.active.nav_index().unwrap_or(0);
        if let Some(clicked) = draw_nav_bar(ctx, bar, &Page::labels(), active_index, &mut self.nav) {
            if let Some(page) = Page::from_nav_index(clicked) {
                self.navigate(page);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{AudioEngine, MusicPlayer};

    fn app() -> AppState {
        let dashboard = DashboardPage::new(MusicPlayer::new(AudioEngine::without_output()));
        AppState::new(LevelDef::gate(), GameSettings::default(), dashboard, None, 1_700_000_000.0)
    }

    #[test]
    fn test_nav_labels() {
        assert_eq!(Page::labels(), ["Dashboard", "Projects", "Chatroom", "My Passion"]);
        assert_eq!(Page::from_nav_index(3), Some(Page::Passion));
        assert_eq!(Page::from_nav_index(4), None);
        assert_eq!(Page::Game.nav_index(), None);
    }

    #[test]
    fn test_starts_on_game() {
        let app = app();
        assert_eq!(app.active(), Page::Game);
        assert!(app.is_game_mounted());
        assert!(!app.game_completed);
    }

    #[test]
    fn test_skip_tears_down_game() {
        let mut app = app();
        app.skip();
        assert_eq!(app.active(), Page::Dashboard);
        assert!(!app.is_game_mounted());
    }

    #[test]
    fn test_completion_switches_after_delay() {
        let mut app = app();
        app.on_complete(10.0);
        assert!(app.game_completed);
        assert_eq!(app.active(), Page::Game);

        app.poll_switches(11.9);
        assert_eq!(app.active(), Page::Game);

        app.poll_switches(12.0);
        assert_eq!(app.active(), Page::Dashboard);
        assert!(!app.is_game_mounted());
        assert!(!app.has_pending_switch());
    }

    #[test]
    fn test_leaving_cancels_pending_switch() {
        let mut app = app();
        app.on_complete(0.0);
        app.navigate(Page::Projects);
        assert!(!app.has_pending_switch());

        app.poll_switches(100.0);
        assert_eq!(app.active(), Page::Projects);
    }

    #[test]
    fn test_navigate_to_same_page_is_noop() {
        let mut app = app();
        app.on_complete(0.0);
        app.navigate(Page::Game);
        assert!(app.has_pending_switch());
        assert!(app.is_game_mounted());
    }
}
