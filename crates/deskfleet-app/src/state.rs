// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::time::Duration;

use crate::{AssignmentCreated, Category, Computer, ComputerId, Employee, EmployeeId, Summary};

/// How long a notice stays up before it is dismissed.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    None,
    Employee(EmployeeId),
    Computer(ComputerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddView {
    Selector,
    Employee,
    Computer,
    Assign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateView {
    Selector,
    Employee,
    Computer,
    Assignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse(Selection),
    Add { view: AddView, via_selector: bool },
    Update { view: UpdateView, via_selector: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub open: bool,
    pub input: String,
    pub term: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub token: u64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: Mode,
    pub category: Category,
    pub search: SearchState,
    pub notice: Option<Notice>,
    notice_token: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Category::Computers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SelectCategory(Category),
    ToggleSearch,
    EditSearch(String),
    SubmitSearch,
    ClearSearch,
    CloseSearch,
    OpenAddSelector,
    OpenUpdateSelector,
    /// Opens a sub-view directly, bypassing its selector.
    OpenAdd(AddView),
    OpenUpdate(UpdateView),
    ChooseAdd(AddView),
    ChooseUpdate(UpdateView),
    CloseView,
    SelectEmployee(EmployeeId),
    SelectComputer(ComputerId),
    BackToList,
    EmployeeSaved { record: Employee, created: bool },
    ComputerSaved { record: Computer, created: bool },
    AssignmentCreated(AssignmentCreated),
    AssignmentRemoved(Summary),
    DismissNotice(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(Mode),
    CategoryChanged(Category),
    SearchVisibilityChanged(bool),
    SearchTermChanged(String),
    MergeEmployee(Employee),
    MergeComputer(Computer),
    NoticeShown(Notice),
    NoticeCleared,
}

impl AppState {
    pub fn new(category: Category) -> Self {
        Self {
            mode: Mode::Browse(Selection::None),
            category,
            search: SearchState::default(),
            notice: None,
            notice_token: 0,
        }
    }

    pub fn selection(&self) -> Selection {
        match self.mode {
            Mode::Browse(selection) => selection,
            _ => Selection::None,
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SelectCategory(category) => {
                let mut events = self.set_mode(Mode::Browse(Selection::None));
                if self.category != category {
                    self.category = category;
                    events.push(AppEvent::CategoryChanged(category));
                }
                events
            }
            AppCommand::ToggleSearch => self.toggle_search(),
            AppCommand::EditSearch(input) => {
                self.search.input = input;
                Vec::new()
            }
            AppCommand::SubmitSearch => {
                let term = self.search.input.trim().to_owned();
                self.set_term(term)
            }
            AppCommand::ClearSearch => {
                self.search.input.clear();
                self.set_term(String::new())
            }
            AppCommand::CloseSearch => {
                if !self.search.open {
                    return Vec::new();
                }
                self.search.open = false;
                self.search.input.clear();
                let mut events = vec![AppEvent::SearchVisibilityChanged(false)];
                events.extend(self.set_term(String::new()));
                events
            }
            AppCommand::OpenAddSelector => {
                let next = match self.mode {
                    Mode::Add {
                        view: AddView::Selector,
                        ..
                    } => Mode::Browse(Selection::None),
                    _ => Mode::Add {
                        view: AddView::Selector,
                        via_selector: false,
                    },
                };
                self.set_mode(next)
            }
            AppCommand::OpenUpdateSelector => {
                let next = match self.mode {
                    Mode::Update {
                        view: UpdateView::Selector,
                        ..
                    } => Mode::Browse(Selection::None),
                    _ => Mode::Update {
                        view: UpdateView::Selector,
                        via_selector: false,
                    },
                };
                self.set_mode(next)
            }
            AppCommand::OpenAdd(view) => self.enter_add(view, false),
            AppCommand::OpenUpdate(view) => self.set_mode(Mode::Update {
                view,
                via_selector: false,
            }),
            AppCommand::ChooseAdd(view) => self.enter_add(view, true),
            AppCommand::ChooseUpdate(view) => self.set_mode(Mode::Update {
                view,
                via_selector: true,
            }),
            AppCommand::CloseView => {
                let next = match self.mode {
                    Mode::Add {
                        view: AddView::Selector,
                        ..
                    }
                    | Mode::Update {
                        view: UpdateView::Selector,
                        ..
                    } => Mode::Browse(Selection::None),
                    Mode::Add {
                        via_selector: true, ..
                    } => Mode::Add {
                        view: AddView::Selector,
                        via_selector: false,
                    },
                    Mode::Update {
                        via_selector: true, ..
                    } => Mode::Update {
                        view: UpdateView::Selector,
                        via_selector: false,
                    },
                    _ => Mode::Browse(Selection::None),
                };
                self.set_mode(next)
            }
            AppCommand::SelectEmployee(id) => {
                self.set_mode(Mode::Browse(Selection::Employee(id)))
            }
            AppCommand::SelectComputer(id) => {
                self.set_mode(Mode::Browse(Selection::Computer(id)))
            }
            AppCommand::BackToList => self.set_mode(Mode::Browse(Selection::None)),
            AppCommand::EmployeeSaved { record, created } => {
                let message = if created {
                    let name = record.display_name();
                    if name.is_empty() {
                        "Employee added successfully.".to_owned()
                    } else {
                        format!("{name} added successfully.")
                    }
                } else {
                    "Employee updated successfully.".to_owned()
                };
                let mut events = self.set_mode(Mode::Browse(Selection::None));
                events.extend(self.force_category(Category::Employee));
                events.push(AppEvent::MergeEmployee(record));
                events.push(self.show_notice(message));
                events
            }
            AppCommand::ComputerSaved { record, created } => {
                let message = if created {
                    if record.name.trim().is_empty() {
                        "Computer added successfully.".to_owned()
                    } else {
                        format!("{} added successfully.", record.name.trim())
                    }
                } else {
                    "Computer updated successfully.".to_owned()
                };
                let mut events = self.set_mode(Mode::Browse(Selection::None));
                events.extend(self.force_category(Category::Computers));
                events.push(AppEvent::MergeComputer(record));
                events.push(self.show_notice(message));
                events
            }
            AppCommand::AssignmentCreated(created) => {
                let mut events = self.set_mode(Mode::Browse(Selection::None));
                events.push(AppEvent::MergeEmployee(created.employee));
                events.push(AppEvent::MergeComputer(created.computer));
                events.push(self.show_notice("Assignment created successfully.".to_owned()));
                events
            }
            AppCommand::AssignmentRemoved(summary) => {
                let message = if summary.computer.is_some() {
                    "Assignment updated successfully."
                } else {
                    "Computer unassigned successfully."
                };
                let mut events = self.set_mode(Mode::Browse(Selection::None));
                if let Some(employee) = summary.employee {
                    events.push(AppEvent::MergeEmployee(employee));
                }
                if let Some(computer) = summary.computer {
                    events.push(AppEvent::MergeComputer(computer));
                }
                events.push(self.show_notice(message.to_owned()));
                events
            }
            AppCommand::DismissNotice(token) => match &self.notice {
                Some(notice) if notice.token == token => {
                    self.notice = None;
                    vec![AppEvent::NoticeCleared]
                }
                _ => Vec::new(),
            },
        }
    }

    fn enter_add(&mut self, view: AddView, via_selector: bool) -> Vec<AppEvent> {
        let mut events = self.set_mode(Mode::Add { view, via_selector });
        match view {
            AddView::Employee => events.extend(self.force_category(Category::Employee)),
            AddView::Computer => events.extend(self.force_category(Category::Computers)),
            AddView::Selector | AddView::Assign => {}
        }
        events
    }

    fn toggle_search(&mut self) -> Vec<AppEvent> {
        let mut events = match self.mode {
            Mode::Browse(_) => Vec::new(),
            _ => self.set_mode(Mode::Browse(Selection::None)),
        };
        self.search.open = !self.search.open;
        events.push(AppEvent::SearchVisibilityChanged(self.search.open));
        if self.search.open {
            if self.search.input.is_empty() {
                self.search.input = self.search.term.clone();
            }
        } else {
            self.search.input.clear();
            events.extend(self.set_term(String::new()));
        }
        events
    }

    fn set_term(&mut self, term: String) -> Vec<AppEvent> {
        if self.search.term == term {
            return Vec::new();
        }
        self.search.term = term.clone();
        vec![AppEvent::SearchTermChanged(term)]
    }

    fn set_mode(&mut self, mode: Mode) -> Vec<AppEvent> {
        if self.mode == mode {
            return Vec::new();
        }
        self.mode = mode;
        vec![AppEvent::ModeChanged(mode)]
    }

    fn force_category(&mut self, category: Category) -> Option<AppEvent> {
        if self.category == category {
            return None;
        }
        self.category = category;
        Some(AppEvent::CategoryChanged(category))
    }

    fn show_notice(&mut self, message: String) -> AppEvent {
        self.notice_token += 1;
        let notice = Notice {
            token: self.notice_token,
            message,
        };
        self.notice = Some(notice.clone());
        AppEvent::NoticeShown(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::{AddView, AppCommand, AppEvent, AppState, Mode, Selection, UpdateView};
    use crate::{
        Assignment, AssignmentCreated, AssignmentId, Category, Computer, ComputerId, Employee,
        EmployeeId, Summary,
    };

    fn employee() -> Employee {
        Employee {
            id: EmployeeId::new(5),
            first_name: "Tomas".to_owned(),
            last_name: "Herrera".to_owned(),
            full_name: None,
            email: "tomas@example.com".to_owned(),
            office: "Utah Valley".to_owned(),
            department: "Field".to_owned(),
            status: None,
            extension: None,
            cell_phone: None,
        }
    }

    fn computer() -> Computer {
        Computer {
            id: ComputerId::new(6),
            model: "Surface Pro".to_owned(),
            name: "UV-TB-06".to_owned(),
            serial_no: "SP006".to_owned(),
            office: "Utah Valley".to_owned(),
            division: None,
            ram: None,
            processor: None,
            os: None,
        }
    }

    #[test]
    fn opening_selector_clears_selection_and_toggles() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SelectEmployee(EmployeeId::new(1)));
        assert_eq!(state.selection(), Selection::Employee(EmployeeId::new(1)));

        state.dispatch(AppCommand::OpenAddSelector);
        assert_eq!(
            state.mode,
            Mode::Add {
                view: AddView::Selector,
                via_selector: false
            }
        );
        assert_eq!(state.selection(), Selection::None);

        state.dispatch(AppCommand::OpenUpdateSelector);
        assert!(matches!(
            state.mode,
            Mode::Update {
                view: UpdateView::Selector,
                ..
            }
        ));

        state.dispatch(AppCommand::OpenUpdateSelector);
        assert_eq!(state.mode, Mode::Browse(Selection::None));
    }

    #[test]
    fn selecting_one_entity_clears_the_other() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SelectEmployee(EmployeeId::new(1)));
        state.dispatch(AppCommand::SelectComputer(ComputerId::new(2)));
        assert_eq!(state.selection(), Selection::Computer(ComputerId::new(2)));
        state.dispatch(AppCommand::BackToList);
        assert_eq!(state.selection(), Selection::None);
    }

    #[test]
    fn closing_returns_to_selector_only_when_reached_through_it() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenAddSelector);
        state.dispatch(AppCommand::ChooseAdd(AddView::Assign));
        state.dispatch(AppCommand::CloseView);
        assert!(matches!(
            state.mode,
            Mode::Add {
                view: AddView::Selector,
                ..
            }
        ));
        state.dispatch(AppCommand::CloseView);
        assert_eq!(state.mode, Mode::Browse(Selection::None));

        state.dispatch(AppCommand::OpenAdd(AddView::Assign));
        state.dispatch(AppCommand::CloseView);
        assert_eq!(state.mode, Mode::Browse(Selection::None));

        state.dispatch(AppCommand::OpenUpdateSelector);
        state.dispatch(AppCommand::ChooseUpdate(UpdateView::Computer));
        state.dispatch(AppCommand::CloseView);
        assert!(matches!(
            state.mode,
            Mode::Update {
                view: UpdateView::Selector,
                ..
            }
        ));
    }

    #[test]
    fn choosing_add_form_forces_category() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenAddSelector);
        let events = state.dispatch(AppCommand::ChooseAdd(AddView::Employee));
        assert_eq!(state.category, Category::Employee);
        assert!(events.contains(&AppEvent::CategoryChanged(Category::Employee)));
    }

    #[test]
    fn saved_employee_returns_to_browse_with_merge_and_notice() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenUpdate(UpdateView::Employee));
        let events = state.dispatch(AppCommand::EmployeeSaved {
            record: employee(),
            created: true,
        });
        assert_eq!(state.mode, Mode::Browse(Selection::None));
        assert_eq!(state.category, Category::Employee);
        assert!(events.contains(&AppEvent::MergeEmployee(employee())));
        let notice = state.notice.clone().expect("notice shown");
        assert_eq!(notice.message, "Tomas Herrera added successfully.");
        assert_eq!(events.last(), Some(&AppEvent::NoticeShown(notice)));
    }

    #[test]
    fn saved_computer_update_uses_update_wording() {
        let mut state = AppState::new(Category::Employee);
        let events = state.dispatch(AppCommand::ComputerSaved {
            record: computer(),
            created: false,
        });
        assert_eq!(state.category, Category::Computers);
        assert!(events.contains(&AppEvent::MergeComputer(computer())));
        assert_eq!(
            state.notice.as_ref().map(|notice| notice.message.as_str()),
            Some("Computer updated successfully.")
        );
    }

    #[test]
    fn assignment_events_merge_both_sides() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenAdd(AddView::Assign));
        let events = state.dispatch(AppCommand::AssignmentCreated(AssignmentCreated {
            assignment: Assignment {
                id: AssignmentId::new(1),
                employee_id: EmployeeId::new(5),
                computer_id: ComputerId::new(6),
                assigned_at: None,
            },
            employee: employee(),
            computer: computer(),
        }));
        assert_eq!(state.mode, Mode::Browse(Selection::None));
        assert!(events.contains(&AppEvent::MergeEmployee(employee())));
        assert!(events.contains(&AppEvent::MergeComputer(computer())));

        state.dispatch(AppCommand::OpenUpdate(UpdateView::Assignment));
        state.dispatch(AppCommand::AssignmentRemoved(Summary {
            employee: Some(employee()),
            computer: None,
            assignment: None,
        }));
        assert_eq!(state.mode, Mode::Browse(Selection::None));
        assert_eq!(
            state.notice.as_ref().map(|notice| notice.message.as_str()),
            Some("Computer unassigned successfully.")
        );
    }

    #[test]
    fn new_notice_replaces_old_and_stale_dismiss_is_ignored() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::ComputerSaved {
            record: computer(),
            created: true,
        });
        let first = state.notice.clone().expect("notice shown");
        state.dispatch(AppCommand::ComputerSaved {
            record: computer(),
            created: false,
        });
        let second = state.notice.clone().expect("notice shown");
        assert!(second.token > first.token);

        assert!(state.dispatch(AppCommand::DismissNotice(first.token)).is_empty());
        assert_eq!(state.notice, Some(second.clone()));
        assert_eq!(
            state.dispatch(AppCommand::DismissNotice(second.token)),
            vec![AppEvent::NoticeCleared]
        );
        assert_eq!(state.notice, None);
    }

    #[test]
    fn search_toggle_restores_and_clears_term() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::ToggleSearch);
        assert!(state.search.open);
        state.dispatch(AppCommand::EditSearch("  latitude ".to_owned()));
        let events = state.dispatch(AppCommand::SubmitSearch);
        assert_eq!(events, vec![AppEvent::SearchTermChanged("latitude".to_owned())]);

        state.dispatch(AppCommand::EditSearch(String::new()));
        state.dispatch(AppCommand::ToggleSearch);
        assert!(!state.search.open);
        assert!(state.search.term.is_empty());

        state.dispatch(AppCommand::EditSearch("x".to_owned()));
        state.dispatch(AppCommand::SubmitSearch);
        state.dispatch(AppCommand::EditSearch(String::new()));
        state.dispatch(AppCommand::ToggleSearch);
        assert_eq!(state.search.input, "x");
    }

    #[test]
    fn category_change_resets_mode() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenAddSelector);
        let events = state.dispatch(AppCommand::SelectCategory(Category::Survey));
        assert_eq!(state.mode, Mode::Browse(Selection::None));
        assert_eq!(
            events,
            vec![
                AppEvent::ModeChanged(Mode::Browse(Selection::None)),
                AppEvent::CategoryChanged(Category::Survey),
            ]
        );
    }
}
