use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::*;
use crate::config::DashConfig;
use crate::git::{LookupError, StaticRemotes};
use crate::search::{Row, SectionKind};

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl Recorder {
    fn last(&self) -> String {
        self.0.borrow().last().cloned().unwrap_or_default()
    }
}

impl SearchClient for Recorder {
    fn search(&self, _kind: SectionKind, query: &str, _limit: u32) -> anyhow::Result<Vec<Row>> {
        self.0.borrow_mut().push(query.to_string());
        Ok(Vec::new())
    }
}

#[derive(Clone)]
struct SharedRemotes(Rc<RefCell<StaticRemotes>>);

impl RemoteLookup for SharedRemotes {
    fn list_remotes(&self, dir: &Path) -> Result<Vec<String>, LookupError> {
        self.0.borrow().list_remotes(dir)
    }

    fn remote_url(&self, dir: &Path, name: &str) -> Result<String, LookupError> {
        self.0.borrow().remote_url(dir, name)
    }
}

fn fork_remotes() -> StaticRemotes {
    StaticRemotes::new()
        .with("origin", "git@github.com:me/widgets.git")
        .with("upstream", "https://github.com/acme/widgets")
}

fn app_with(remotes: SharedRemotes, recorder: Recorder) -> App {
    App::new(
        &DashConfig::default(),
        PathBuf::from("."),
        Box::new(remotes),
        Box::new(recorder),
    )
}

fn press(app: &mut App, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[test]
fn keys_drive_the_effective_query() {
    let rec = Recorder::default();
    let remotes = SharedRemotes(Rc::new(RefCell::new(fork_remotes())));
    let mut app = app_with(remotes, rec.clone());

    app.refresh_active();
    assert_eq!(rec.last(), "repo:me/widgets is:open author:@me");

    press(&mut app, KeyCode::Char('t'));
    assert_eq!(rec.last(), "repo:acme/widgets is:open author:@me");

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(rec.last(), "repo:acme/widgets is:open");

    press(&mut app, KeyCode::Char('p'));
    assert_eq!(app.picker.as_ref().map(|p| p.cursor), Some(1));
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Enter);
    assert!(app.picker.is_none());
    assert_eq!(rec.last(), "is:open");

    press(&mut app, KeyCode::Char('/'));
    assert_eq!(app.focus, Focus::Search);
    assert_eq!(app.input.buf, "is:open author:@me");
    type_text(&mut app, " repo:c/d");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.focus, Focus::Table);
    assert_eq!(rec.last(), "repo:c/d is:open");
    assert_eq!(app.query_summary().map(|(_, label)| label).as_deref(), Some("c/d"));

    press(&mut app, KeyCode::Char('u'));
    assert_eq!(rec.last(), "repo:me/widgets is:open author:@me");

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.active, 1);
    assert_eq!(rec.last(), "repo:me/widgets is:open review-requested:@me");

    press(&mut app, KeyCode::Char('q'));
    assert!(app.quit);
}

#[test]
fn escape_discards_search_edits() {
    let rec = Recorder::default();
    let remotes = SharedRemotes(Rc::new(RefCell::new(fork_remotes())));
    let mut app = app_with(remotes, rec.clone());

    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, " label:bug");
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.focus, Focus::Table);
    assert!(rec.0.borrow().is_empty());
    assert_eq!(
        app.section().map(|s| s.search_value()),
        Some("repo:me/widgets is:open author:@me")
    );
}

#[test]
fn unedited_search_commit_keeps_author_toggle() {
    let rec = Recorder::default();
    let remotes = SharedRemotes(Rc::new(RefCell::new(fork_remotes())));
    let mut app = app_with(remotes, rec.clone());

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(rec.last(), "repo:me/widgets is:open");

    press(&mut app, KeyCode::Char('/'));
    assert_eq!(app.input.buf, "repo:me/widgets is:open author:@me");
    press(&mut app, KeyCode::Enter);
    assert_eq!(rec.last(), "repo:me/widgets is:open");

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(rec.last(), "repo:me/widgets is:open author:@me");
}

#[test]
fn picker_custom_entry_scopes_to_typed_repo() {
    let rec = Recorder::default();
    let remotes = SharedRemotes(Rc::new(RefCell::new(fork_remotes())));
    let mut app = app_with(remotes, rec.clone());

    press(&mut app, KeyCode::Char('p'));
    press(&mut app, KeyCode::Char('c'));
    type_text(&mut app, "other/repo");
    press(&mut app, KeyCode::Enter);
    assert_eq!(rec.last(), "repo:other/repo is:open author:@me");
}

#[test]
fn remotes_are_looked_up_again_on_each_action() {
    let rec = Recorder::default();
    let shared = Rc::new(RefCell::new(fork_remotes()));
    let mut app = app_with(SharedRemotes(shared.clone()), rec.clone());

    *shared.borrow_mut() = StaticRemotes::new().with("origin", "git@github.com:me/widgets.git");
    press(&mut app, KeyCode::Char('t'));
    assert_eq!(rec.last(), "is:open author:@me");
    assert!(app.identities.upstream.is_none());
}

#[test]
fn ctrl_c_quits_from_search() {
    let remotes = SharedRemotes(Rc::new(RefCell::new(StaticRemotes::new())));
    let mut app = app_with(remotes, Recorder::default());
    press(&mut app, KeyCode::Char('/'));
    handle_key(
        &mut app,
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
    );
    assert!(app.quit);
}
