use std::path::PathBuf;

use super::*;
use crate::config::DashConfig;
use crate::search::SectionKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Focus {
    Table,
    Search,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum StatusKind {
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub(super) struct Status {
    pub(super) kind: StatusKind,
    pub(super) text: String,
}

pub(super) struct App {
    pub(super) sections: Vec<Section>,
    pub(super) active: usize,
    pub(super) focus: Focus,
    pub(super) input: Input,
    pub(super) picker: Option<RepoPicker>,
    pub(super) status: Option<Status>,
    /// Last resolved remotes, for drawing. Actions resolve them again.
    pub(super) identities: Identities,
    pub(super) quit: bool,

    repo_dir: PathBuf,
    lookup: Box<dyn RemoteLookup>,
    client: Box<dyn SearchClient>,
}

impl App {
    pub(super) fn new(
        config: &DashConfig,
        repo_dir: PathBuf,
        lookup: Box<dyn RemoteLookup>,
        client: Box<dyn SearchClient>,
    ) -> Self {
        let identities = Identities::resolve(lookup.as_ref(), &repo_dir);
        tracing::info!(
            dir = %repo_dir.display(),
            origin = ?identities.origin.as_ref().map(|id| id.slug()),
            upstream = ?identities.upstream.as_ref().map(|id| id.slug()),
            "resolved remotes"
        );

        let smart = config.smart_filtering_at_launch;
        let pr = config
            .pr_sections
            .iter()
            .map(|c| (SectionKind::PullRequests, c));
        let issues = config
            .issues_sections
            .iter()
            .map(|c| (SectionKind::Issues, c));
        let sections = pr
            .chain(issues)
            .enumerate()
            .map(|(id, (kind, cfg))| Section::new(id, kind, cfg.clone(), smart, &identities))
            .collect();

        Self {
            sections,
            active: 0,
            focus: Focus::Table,
            input: Input::default(),
            picker: None,
            status: None,
            identities,
            quit: false,
            repo_dir,
            lookup,
            client,
        }
    }

    pub(super) fn section(&self) -> Option<&Section> {
        self.sections.get(self.active)
    }

    fn section_mut(&mut self) -> Option<&mut Section> {
        self.sections.get_mut(self.active)
    }

    /// Remotes can change while the dashboard runs; look them up again.
    fn resolve_identities(&mut self) -> Identities {
        self.identities = Identities::resolve(self.lookup.as_ref(), &self.repo_dir);
        self.identities.clone()
    }

    pub(super) fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    pub(super) fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }

    pub(super) fn next_section(&mut self) {
        if self.sections.is_empty() {
            return;
        }
        self.active = (self.active + 1) % self.sections.len();
        self.refresh_if_stale();
    }

    pub(super) fn prev_section(&mut self) {
        if self.sections.is_empty() {
            return;
        }
        self.active = (self.active + self.sections.len() - 1) % self.sections.len();
        self.refresh_if_stale();
    }

    fn refresh_if_stale(&mut self) {
        if self.section().is_some_and(|s| s.fetched_at.is_none()) {
            self.refresh_active();
        }
    }

    pub(super) fn refresh_active(&mut self) {
        let ids = self.resolve_identities();
        let Some(section) = self.sections.get_mut(self.active) else {
            return;
        };
        match section.refresh(self.client.as_ref(), &ids) {
            Ok(n) => {
                let msg = format!("{} {} for {}", n, section.kind.plural(), section.title());
                self.set_info(msg);
            }
            Err(err) => {
                tracing::warn!(section = section.id, error = %format!("{:#}", err), "fetch failed");
                let msg = format!("fetch failed: {:#}", err);
                self.set_error(msg);
            }
        }
    }

    pub(super) fn toggle_scope(&mut self) {
        let ids = self.resolve_identities();
        let Some(section) = self.section_mut() else {
            return;
        };
        if section.config().pins_repo() {
            self.set_info("repo is set by the section's configured filter");
            return;
        }
        section.toggle_scope(&ids);
        self.refresh_active();
    }

    pub(super) fn toggle_author_filter(&mut self) {
        let Some(section) = self.section_mut() else {
            return;
        };
        section.toggle_author_filter();
        self.refresh_active();
    }

    pub(super) fn reset_filters(&mut self) {
        let ids = self.resolve_identities();
        let Some(section) = self.section_mut() else {
            return;
        };
        section.reset_filters(&ids);
        self.refresh_active();
    }

    pub(super) fn begin_search(&mut self) {
        let ids = self.resolve_identities();
        let Some(text) = self.section().map(|s| s.edit_query(&ids)) else {
            return;
        };
        self.input.set(text);
        self.focus = Focus::Search;
    }

    pub(super) fn cancel_search(&mut self) {
        self.input.clear();
        self.focus = Focus::Table;
    }

    pub(super) fn commit_search(&mut self) {
        let text = self.input.buf.clone();
        self.input.push_history(&text);
        self.input.clear();
        self.focus = Focus::Table;

        let ids = self.resolve_identities();
        let Some(section) = self.section_mut() else {
            return;
        };
        section.commit_search(&text, &ids);
        self.refresh_active();
    }

    pub(super) fn open_picker(&mut self) {
        let ids = self.resolve_identities();
        let Some(section) = self.section() else {
            return;
        };
        if section.config().pins_repo() {
            self.set_info("repo is set by the section's configured filter");
            return;
        }
        let current = section.current_repo_filter(&ids);
        self.picker = Some(RepoPicker::new(section.picker_options(&ids), &current));
    }

    pub(super) fn picker_key(&mut self, key: KeyEvent) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        match picker.handle_key(key) {
            PickerOutcome::Pending => {}
            PickerOutcome::Cancelled => self.picker = None,
            PickerOutcome::Selected { value, is_custom } => {
                self.picker = None;
                let ids = self.resolve_identities();
                if let Some(section) = self.section_mut() {
                    section.select_repo(&value, is_custom, &ids);
                }
                self.refresh_active();
            }
        }
    }

    /// Effective query and scope label of the active section, for drawing.
    pub(super) fn query_summary(&self) -> Option<(String, String)> {
        let section = self.section()?;
        Some((
            section.display_query(&self.identities),
            section.scope_label(&self.identities),
        ))
    }
}
