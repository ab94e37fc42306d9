// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod render;

use anyhow::{Context, Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use deskfleet_app::{
    AddView, ApiError, AppCommand, AppEvent, AppState, Assignment, AssignmentBrowser,
    AssignmentListing, AssignmentQuery, AssignPanel, Category, Computer, ComputerFormInput,
    ComputerId, ComputerPayload, ConfirmOutcome, Employee, EmployeeFormInput, EmployeeId,
    EmployeePayload, FormField, FormInput, FormState, ListItem, ListView, Mode, NOTICE_TTL, Page,
    PageData, PageQuery, ProfileQuery, ProfileTarget, ProfileView, Selection, Submission, Summary,
    SyncStatus, UpdatePanel, UpdateView,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// One backend call the UI wants made. Every request is answered by exactly
/// one [`ApiResponse`] delivered through the internal event channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    LoadPage(PageQuery),
    LoadProfile(ProfileQuery),
    SyncCandidates { seq: u64 },
    CreateAssignment {
        employee_id: EmployeeId,
        computer_id: ComputerId,
    },
    SaveEmployee(Submission<EmployeeId, EmployeePayload>),
    SaveComputer(Submission<ComputerId, ComputerPayload>),
    ListEmployees,
    ListComputers,
    FetchEmployee(EmployeeId),
    FetchComputer(ComputerId),
    LoadAssignments(AssignmentQuery),
    LoadAssignmentDetail { seq: u64, employee_id: EmployeeId },
    Unassign(EmployeeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    Page {
        seq: u64,
        result: Result<PageData, ApiError>,
    },
    Profile {
        seq: u64,
        result: Result<Option<Summary>, ApiError>,
    },
    Candidates {
        seq: u64,
        result: Result<SyncStatus, ApiError>,
    },
    AssignmentCreated(Result<Assignment, ApiError>),
    EmployeeSaved {
        created: bool,
        result: Result<Employee, ApiError>,
    },
    ComputerSaved {
        created: bool,
        result: Result<Computer, ApiError>,
    },
    EmployeeList(Result<Vec<Employee>, ApiError>),
    ComputerList(Result<Vec<Computer>, ApiError>),
    EmployeeFetched {
        id: EmployeeId,
        result: Result<Employee, ApiError>,
    },
    ComputerFetched {
        id: ComputerId,
        result: Result<Computer, ApiError>,
    },
    Assignments {
        seq: u64,
        result: Result<Page<AssignmentListing>, ApiError>,
    },
    AssignmentDetail {
        seq: u64,
        result: Result<Option<Summary>, ApiError>,
    },
    Unassigned(Result<Option<Summary>, ApiError>),
}

pub trait AppRuntime {
    /// Performs the request on the calling thread.
    fn execute(&mut self, request: ApiRequest) -> ApiResponse;

    /// Hands the request off and reports the response through `tx`.
    /// Runtimes that talk to a real backend override this to run off the
    /// UI thread.
    fn dispatch(&mut self, request: ApiRequest, tx: &Sender<InternalEvent>) -> Result<()> {
        let response = self.execute(request);
        tx.send(InternalEvent::Api(response))
            .map_err(|_| anyhow!("api event channel closed"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearNotice { token: u64 },
    Api(ApiResponse),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdateFocus {
    List,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormKeyOutcome {
    Handled,
    Submit,
    Leave,
    Ignored,
}

const ADD_OPTIONS: [(AddView, &str); 3] = [
    (AddView::Employee, "Add employee"),
    (AddView::Computer, "Add computer"),
    (AddView::Assign, "Assign a computer"),
];

const UPDATE_OPTIONS: [(UpdateView, &str); 3] = [
    (UpdateView::Employee, "Update employee"),
    (UpdateView::Computer, "Update computer"),
    (UpdateView::Assignment, "Update assignment"),
];

#[derive(Debug)]
struct ViewData {
    list: ListView,
    profile: ProfileView,
    selector_cursor: usize,
    field_cursor: usize,
    add_employee: FormState<EmployeeFormInput>,
    add_computer: FormState<ComputerFormInput>,
    update_employee: UpdatePanel<EmployeeFormInput>,
    update_computer: UpdatePanel<ComputerFormInput>,
    update_focus: UpdateFocus,
    assign: AssignPanel,
    assignments: AssignmentBrowser,
    assignment_input: Option<String>,
}

impl ViewData {
    fn new(category: Category) -> Self {
        Self {
            list: ListView::new(category),
            profile: ProfileView::default(),
            selector_cursor: 0,
            field_cursor: 0,
            add_employee: FormState::create(),
            add_computer: FormState::create(),
            update_employee: UpdatePanel::new(),
            update_computer: UpdatePanel::new(),
            update_focus: UpdateFocus::List,
            assign: AssignPanel::default(),
            assignments: AssignmentBrowser::default(),
            assignment_input: None,
        }
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(state.category);
    let (internal_tx, internal_rx) = mpsc::channel();
    start_session(runtime, &mut view_data, &internal_tx);

    let mut result = Ok(());
    loop {
        process_internal_events(state, runtime, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render::render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn start_session<R: AppRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
) {
    if let Some(query) = view_data.list.load() {
        send_request(runtime, tx, ApiRequest::LoadPage(query));
    }
}

fn send_request<R: AppRuntime>(runtime: &mut R, tx: &Sender<InternalEvent>, request: ApiRequest) {
    debug!(?request, "dispatching api request");
    if let Err(error) = runtime.dispatch(request, tx) {
        warn!(error = %error, "api request dispatch failed");
    }
}

fn schedule_notice_clear(tx: &Sender<InternalEvent>, token: u64) {
    let sender = tx.clone();
    thread::spawn(move || {
        thread::sleep(NOTICE_TTL);
        let _ = sender.send(InternalEvent::ClearNotice { token });
    });
}

fn process_internal_events<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearNotice { token } => {
                let events = state.dispatch(AppCommand::DismissNotice(token));
                handle_app_events(runtime, view_data, tx, events);
            }
            InternalEvent::Api(response) => {
                handle_api_response(state, runtime, view_data, tx, response);
            }
        }
    }
}

fn apply_command<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let events = state.dispatch(command);
    handle_app_events(runtime, view_data, tx, events);
}

fn handle_app_events<R: AppRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    events: Vec<AppEvent>,
) {
    for event in events {
        match event {
            AppEvent::ModeChanged(mode) => enter_mode(runtime, view_data, tx, mode),
            AppEvent::CategoryChanged(category) => {
                if let Some(query) = view_data.list.set_category(category) {
                    send_request(runtime, tx, ApiRequest::LoadPage(query));
                }
            }
            AppEvent::SearchTermChanged(term) => {
                if let Some(query) = view_data.list.set_term(&term) {
                    send_request(runtime, tx, ApiRequest::LoadPage(query));
                }
            }
            AppEvent::MergeEmployee(employee) => {
                view_data.list.merge(ListItem::Employee(employee));
            }
            AppEvent::MergeComputer(computer) => {
                view_data.list.merge(ListItem::Computer(computer));
            }
            AppEvent::NoticeShown(notice) => schedule_notice_clear(tx, notice.token),
            AppEvent::SearchVisibilityChanged(_) | AppEvent::NoticeCleared => {}
        }
    }
}

/// Resets the state owned by the view being entered and starts its loads.
fn enter_mode<R: AppRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    mode: Mode,
) {
    match mode {
        Mode::Browse(Selection::None) => view_data.profile.close(),
        Mode::Browse(Selection::Employee(id)) => {
            let query = view_data.profile.open(ProfileTarget::Employee(id));
            send_request(runtime, tx, ApiRequest::LoadProfile(query));
        }
        Mode::Browse(Selection::Computer(id)) => {
            let query = view_data.profile.open(ProfileTarget::Computer(id));
            send_request(runtime, tx, ApiRequest::LoadProfile(query));
        }
        Mode::Add {
            view: AddView::Selector,
            ..
        }
        | Mode::Update {
            view: UpdateView::Selector,
            ..
        } => {
            view_data.profile.close();
            view_data.selector_cursor = 0;
        }
        Mode::Add {
            view: AddView::Employee,
            ..
        } => {
            view_data.add_employee = FormState::create();
            view_data.field_cursor = 0;
        }
        Mode::Add {
            view: AddView::Computer,
            ..
        } => {
            view_data.add_computer = FormState::create();
            view_data.field_cursor = 0;
        }
        Mode::Add {
            view: AddView::Assign,
            ..
        } => {
            view_data.assign = AssignPanel::default();
            let seq = view_data.assign.begin_sync();
            send_request(runtime, tx, ApiRequest::SyncCandidates { seq });
        }
        Mode::Update {
            view: UpdateView::Employee,
            ..
        } => {
            view_data.update_employee = UpdatePanel::new();
            view_data.update_focus = UpdateFocus::List;
            view_data.field_cursor = 0;
            send_request(runtime, tx, ApiRequest::ListEmployees);
        }
        Mode::Update {
            view: UpdateView::Computer,
            ..
        } => {
            view_data.update_computer = UpdatePanel::new();
            view_data.update_focus = UpdateFocus::List;
            view_data.field_cursor = 0;
            send_request(runtime, tx, ApiRequest::ListComputers);
        }
        Mode::Update {
            view: UpdateView::Assignment,
            ..
        } => {
            view_data.assignments = AssignmentBrowser::default();
            view_data.assignment_input = None;
            let query = view_data.assignments.load();
            send_request(runtime, tx, ApiRequest::LoadAssignments(query));
        }
    }
}

fn handle_api_response<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    response: ApiResponse,
) {
    match response {
        ApiResponse::Page { seq, result } => {
            view_data.list.apply(seq, result);
        }
        ApiResponse::Profile { seq, result } => {
            view_data.profile.apply(seq, result);
        }
        ApiResponse::Candidates { seq, result } => {
            view_data.assign.finish_sync(seq, result);
        }
        ApiResponse::AssignmentCreated(result) => match view_data.assign.finish_confirm(result) {
            ConfirmOutcome::Assigned(created) => {
                apply_command(
                    state,
                    runtime,
                    view_data,
                    tx,
                    AppCommand::AssignmentCreated(created),
                );
            }
            ConfirmOutcome::Resync(seq) => {
                send_request(runtime, tx, ApiRequest::SyncCandidates { seq });
            }
            ConfirmOutcome::Rejected => {}
        },
        ApiResponse::EmployeeSaved { created, result } => {
            let saved = if created {
                view_data.add_employee.finish_submit(result)
            } else {
                view_data.update_employee.finish_submit(result)
            };
            if let Some(record) = saved {
                apply_command(
                    state,
                    runtime,
                    view_data,
                    tx,
                    AppCommand::EmployeeSaved { record, created },
                );
            }
        }
        ApiResponse::ComputerSaved { created, result } => {
            let saved = if created {
                view_data.add_computer.finish_submit(result)
            } else {
                view_data.update_computer.finish_submit(result)
            };
            if let Some(record) = saved {
                apply_command(
                    state,
                    runtime,
                    view_data,
                    tx,
                    AppCommand::ComputerSaved { record, created },
                );
            }
        }
        ApiResponse::EmployeeList(result) => view_data.update_employee.apply_records(result),
        ApiResponse::ComputerList(result) => view_data.update_computer.apply_records(result),
        ApiResponse::EmployeeFetched { id, result } => {
            view_data.update_employee.form.finish_load(id, result);
        }
        ApiResponse::ComputerFetched { id, result } => {
            view_data.update_computer.form.finish_load(id, result);
        }
        ApiResponse::Assignments { seq, result } => {
            view_data.assignments.apply(seq, result);
        }
        ApiResponse::AssignmentDetail { seq, result } => {
            view_data.assignments.apply_detail(seq, result);
        }
        ApiResponse::Unassigned(result) => {
            let Some((summary, reload)) = view_data.assignments.finish_unassign(result) else {
                return;
            };
            send_request(runtime, tx, ApiRequest::LoadAssignments(reload));
            apply_command(
                state,
                runtime,
                view_data,
                tx,
                AppCommand::AssignmentRemoved(summary),
            );
        }
    }
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    {
        return true;
    }

    match state.mode {
        Mode::Browse(Selection::None) => {
            if state.search.open && handle_search_key(state, runtime, view_data, tx, key) {
                return false;
            }
            handle_browse_key(state, runtime, view_data, tx, key);
        }
        Mode::Browse(_) => handle_profile_key(state, runtime, view_data, tx, key),
        Mode::Add {
            view: AddView::Selector,
            ..
        } => {
            if let Some(index) = handle_selector_key(view_data, key, ADD_OPTIONS.len()) {
                apply_command(
                    state,
                    runtime,
                    view_data,
                    tx,
                    AppCommand::ChooseAdd(ADD_OPTIONS[index].0),
                );
            } else if is_leave_key(key) {
                apply_command(state, runtime, view_data, tx, AppCommand::CloseView);
            } else if key.code == KeyCode::Char('a') {
                apply_command(state, runtime, view_data, tx, AppCommand::OpenAddSelector);
            }
        }
        Mode::Update {
            view: UpdateView::Selector,
            ..
        } => {
            if let Some(index) = handle_selector_key(view_data, key, UPDATE_OPTIONS.len()) {
                apply_command(
                    state,
                    runtime,
                    view_data,
                    tx,
                    AppCommand::ChooseUpdate(UPDATE_OPTIONS[index].0),
                );
            } else if is_leave_key(key) {
                apply_command(state, runtime, view_data, tx, AppCommand::CloseView);
            } else if key.code == KeyCode::Char('u') {
                apply_command(state, runtime, view_data, tx, AppCommand::OpenUpdateSelector);
            }
        }
        Mode::Add {
            view: AddView::Employee,
            ..
        } => {
            match handle_form_key(&mut view_data.add_employee, &mut view_data.field_cursor, key) {
                FormKeyOutcome::Submit => {
                    if let Some(submission) = view_data.add_employee.begin_submit() {
                        send_request(runtime, tx, ApiRequest::SaveEmployee(submission));
                    }
                }
                FormKeyOutcome::Leave => {
                    apply_command(state, runtime, view_data, tx, AppCommand::CloseView);
                }
                FormKeyOutcome::Handled | FormKeyOutcome::Ignored => {}
            }
        }
        Mode::Add {
            view: AddView::Computer,
            ..
        } => {
            match handle_form_key(&mut view_data.add_computer, &mut view_data.field_cursor, key) {
                FormKeyOutcome::Submit => {
                    if let Some(submission) = view_data.add_computer.begin_submit() {
                        send_request(runtime, tx, ApiRequest::SaveComputer(submission));
                    }
                }
                FormKeyOutcome::Leave => {
                    apply_command(state, runtime, view_data, tx, AppCommand::CloseView);
                }
                FormKeyOutcome::Handled | FormKeyOutcome::Ignored => {}
            }
        }
        Mode::Add {
            view: AddView::Assign,
            ..
        } => handle_assign_key(state, runtime, view_data, tx, key),
        Mode::Update {
            view: UpdateView::Employee,
            ..
        } => handle_update_employee_key(state, runtime, view_data, tx, key),
        Mode::Update {
            view: UpdateView::Computer,
            ..
        } => handle_update_computer_key(state, runtime, view_data, tx, key),
        Mode::Update {
            view: UpdateView::Assignment,
            ..
        } => handle_assignments_key(state, runtime, view_data, tx, key),
    }
    false
}

fn is_leave_key(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
}

fn is_plain(key: KeyEvent) -> bool {
    !key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT)
}

/// Returns true when the search bar consumed the key.
fn handle_search_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    let command = match key.code {
        KeyCode::Esc => AppCommand::CloseSearch,
        KeyCode::Enter => AppCommand::SubmitSearch,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            AppCommand::ClearSearch
        }
        KeyCode::Backspace => {
            let mut input = state.search.input.clone();
            input.pop();
            AppCommand::EditSearch(input)
        }
        KeyCode::Char(ch) if is_plain(key) => {
            let mut input = state.search.input.clone();
            input.push(ch);
            AppCommand::EditSearch(input)
        }
        _ => return false,
    };
    apply_command(state, runtime, view_data, tx, command);
    true
}

fn handle_browse_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => view_data.list.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => view_data.list.move_cursor(-1),
        KeyCode::Char(']') | KeyCode::Right | KeyCode::PageDown => {
            if let Some(query) = view_data.list.next_page() {
                send_request(runtime, tx, ApiRequest::LoadPage(query));
            }
        }
        KeyCode::Char('[') | KeyCode::Left | KeyCode::PageUp => {
            if let Some(query) = view_data.list.prev_page() {
                send_request(runtime, tx, ApiRequest::LoadPage(query));
            }
        }
        KeyCode::Char('r') => {
            if let Some(query) = view_data.list.refresh() {
                send_request(runtime, tx, ApiRequest::LoadPage(query));
            }
        }
        KeyCode::Tab => {
            let next = step_category(state.category, 1);
            apply_command(state, runtime, view_data, tx, AppCommand::SelectCategory(next));
        }
        KeyCode::BackTab => {
            let prev = step_category(state.category, -1);
            apply_command(state, runtime, view_data, tx, AppCommand::SelectCategory(prev));
        }
        KeyCode::Enter => {
            let command = match view_data.list.selected() {
                Some(ListItem::Employee(employee)) => AppCommand::SelectEmployee(employee.id),
                Some(ListItem::Computer(computer)) => AppCommand::SelectComputer(computer.id),
                None => return,
            };
            apply_command(state, runtime, view_data, tx, command);
        }
        _ => handle_global_key(state, runtime, view_data, tx, key),
    }
}

fn handle_profile_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
            apply_command(state, runtime, view_data, tx, AppCommand::BackToList);
        }
        KeyCode::Char('r') => {
            if let Some(target) = view_data.profile.target {
                let query = view_data.profile.open(target);
                send_request(runtime, tx, ApiRequest::LoadProfile(query));
            }
        }
        _ => handle_global_key(state, runtime, view_data, tx, key),
    }
}

/// Keys that work from any browse view.
fn handle_global_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let command = match key.code {
        KeyCode::Char('/') => AppCommand::ToggleSearch,
        KeyCode::Char('a') => AppCommand::OpenAddSelector,
        KeyCode::Char('u') => AppCommand::OpenUpdateSelector,
        KeyCode::Char('m') => AppCommand::OpenAdd(AddView::Assign),
        KeyCode::Char('x') => AppCommand::OpenUpdate(UpdateView::Assignment),
        _ => return,
    };
    apply_command(state, runtime, view_data, tx, command);
}

fn step_category(current: Category, delta: isize) -> Category {
    let len = Category::ALL.len() as isize;
    let index = Category::ALL
        .iter()
        .position(|category| *category == current)
        .unwrap_or(0) as isize;
    Category::ALL[(index + delta).rem_euclid(len) as usize]
}

/// Moves the selector cursor and returns the chosen index on Enter or a
/// digit shortcut.
fn handle_selector_key(view_data: &mut ViewData, key: KeyEvent, len: usize) -> Option<usize> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            view_data.selector_cursor = (view_data.selector_cursor + 1).min(len.saturating_sub(1));
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.selector_cursor = view_data.selector_cursor.saturating_sub(1);
            None
        }
        KeyCode::Enter => (view_data.selector_cursor < len).then_some(view_data.selector_cursor),
        KeyCode::Char(digit @ '1'..='9') => {
            let index = digit as usize - '1' as usize;
            (index < len).then_some(index)
        }
        _ => None,
    }
}

fn handle_form_key<I: FormInput>(
    form: &mut FormState<I>,
    cursor: &mut usize,
    key: KeyEvent,
) -> FormKeyOutcome {
    let fields = <I::Field as FormField>::ALL;
    let Some(last) = fields.len().checked_sub(1) else {
        return FormKeyOutcome::Ignored;
    };
    *cursor = (*cursor).min(last);
    let field = fields[*cursor];
    let choices = field.choices();

    match key.code {
        KeyCode::Esc => FormKeyOutcome::Leave,
        KeyCode::Enter => FormKeyOutcome::Submit,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            FormKeyOutcome::Submit
        }
        KeyCode::Tab | KeyCode::Down => {
            *cursor = if *cursor == last { 0 } else { *cursor + 1 };
            FormKeyOutcome::Handled
        }
        KeyCode::BackTab | KeyCode::Up => {
            *cursor = if *cursor == 0 { last } else { *cursor - 1 };
            FormKeyOutcome::Handled
        }
        KeyCode::Left | KeyCode::Right if !choices.is_empty() => {
            let delta = if key.code == KeyCode::Right { 1 } else { -1 };
            match cycle_choice(choices, form.input.value(field), delta) {
                Some(next) => {
                    form.edit(field, next.to_owned());
                    FormKeyOutcome::Handled
                }
                None => FormKeyOutcome::Ignored,
            }
        }
        KeyCode::Backspace if choices.is_empty() => {
            let mut value = form.input.value(field).to_owned();
            value.pop();
            form.edit(field, value);
            FormKeyOutcome::Handled
        }
        KeyCode::Char(ch) if choices.is_empty() && is_plain(key) => {
            let mut value = form.input.value(field).to_owned();
            value.push(ch);
            form.edit(field, value);
            FormKeyOutcome::Handled
        }
        _ => FormKeyOutcome::Ignored,
    }
}

fn cycle_choice<'a>(choices: &[&'a str], current: &str, delta: isize) -> Option<&'a str> {
    let len = choices.len() as isize;
    let index = match choices.iter().position(|choice| *choice == current) {
        Some(index) => (index as isize + delta).rem_euclid(len),
        None if delta >= 0 => 0,
        None => len - 1,
    };
    choices.get(index as usize).copied()
}

fn handle_update_employee_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    if view_data.update_focus == UpdateFocus::Form {
        let panel = &mut view_data.update_employee;
        match handle_form_key(&mut panel.form, &mut view_data.field_cursor, key) {
            FormKeyOutcome::Submit => {
                if let Some(submission) = panel.form.begin_submit() {
                    send_request(runtime, tx, ApiRequest::SaveEmployee(submission));
                }
            }
            FormKeyOutcome::Leave => view_data.update_focus = UpdateFocus::List,
            FormKeyOutcome::Handled | FormKeyOutcome::Ignored => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => view_data.update_employee.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => view_data.update_employee.move_cursor(-1),
        KeyCode::Tab => {
            view_data.update_focus = UpdateFocus::Form;
            view_data.field_cursor = 0;
        }
        KeyCode::Enter => {
            if let Some(id) = view_data.update_employee.choose() {
                view_data.update_focus = UpdateFocus::Form;
                view_data.field_cursor = 0;
                send_request(runtime, tx, ApiRequest::FetchEmployee(id));
            }
        }
        KeyCode::Char('r') => {
            view_data.update_employee.loading = true;
            send_request(runtime, tx, ApiRequest::ListEmployees);
        }
        KeyCode::Esc => apply_command(state, runtime, view_data, tx, AppCommand::CloseView),
        _ => {}
    }
}

fn handle_update_computer_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    if view_data.update_focus == UpdateFocus::Form {
        let panel = &mut view_data.update_computer;
        match handle_form_key(&mut panel.form, &mut view_data.field_cursor, key) {
            FormKeyOutcome::Submit => {
                if let Some(submission) = panel.form.begin_submit() {
                    send_request(runtime, tx, ApiRequest::SaveComputer(submission));
                }
            }
            FormKeyOutcome::Leave => view_data.update_focus = UpdateFocus::List,
            FormKeyOutcome::Handled | FormKeyOutcome::Ignored => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => view_data.update_computer.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => view_data.update_computer.move_cursor(-1),
        KeyCode::Tab => {
            view_data.update_focus = UpdateFocus::Form;
            view_data.field_cursor = 0;
        }
        KeyCode::Enter => {
            if let Some(id) = view_data.update_computer.choose() {
                view_data.update_focus = UpdateFocus::Form;
                view_data.field_cursor = 0;
                send_request(runtime, tx, ApiRequest::FetchComputer(id));
            }
        }
        KeyCode::Char('r') => {
            view_data.update_computer.loading = true;
            send_request(runtime, tx, ApiRequest::ListComputers);
        }
        KeyCode::Esc => apply_command(state, runtime, view_data, tx, AppCommand::CloseView),
        _ => {}
    }
}

fn handle_assign_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let panel = &mut view_data.assign;
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => panel.toggle_column(),
        KeyCode::Char('j') | KeyCode::Down => panel.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => panel.move_cursor(-1),
        KeyCode::Char(' ') | KeyCode::Enter => {
            panel.select_at_cursor();
        }
        KeyCode::Char('s') => {
            let seq = panel.begin_sync();
            send_request(runtime, tx, ApiRequest::SyncCandidates { seq });
        }
        KeyCode::Char('c') => {
            if let Some((employee_id, computer_id)) = panel.begin_confirm() {
                send_request(
                    runtime,
                    tx,
                    ApiRequest::CreateAssignment {
                        employee_id,
                        computer_id,
                    },
                );
            }
        }
        KeyCode::Esc => apply_command(state, runtime, view_data, tx, AppCommand::CloseView),
        _ => {}
    }
}

fn handle_assignments_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    if let Some(input) = view_data.assignment_input.as_mut() {
        match key.code {
            KeyCode::Esc => view_data.assignment_input = None,
            KeyCode::Enter => {
                let query = view_data.assignments.submit_search(input);
                view_data.assignment_input = None;
                send_request(runtime, tx, ApiRequest::LoadAssignments(query));
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(ch) if is_plain(key) => input.push(ch),
            _ => {}
        }
        return;
    }

    let browser = &mut view_data.assignments;
    let request = match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            browser.move_cursor(1);
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            browser.move_cursor(-1);
            None
        }
        KeyCode::Char(']') | KeyCode::Right => browser.next_page().map(ApiRequest::LoadAssignments),
        KeyCode::Char('[') | KeyCode::Left => browser.prev_page().map(ApiRequest::LoadAssignments),
        KeyCode::Char('o') => Some(ApiRequest::LoadAssignments(browser.cycle_office())),
        KeyCode::Char('c') => Some(ApiRequest::LoadAssignments(browser.clear_filters())),
        KeyCode::Char('r') => Some(ApiRequest::LoadAssignments(browser.load())),
        KeyCode::Char('/') => {
            view_data.assignment_input = Some(browser.term.clone());
            None
        }
        KeyCode::Enter => browser
            .select_at_cursor()
            .map(|(seq, employee_id)| ApiRequest::LoadAssignmentDetail { seq, employee_id }),
        KeyCode::Char('x') => browser.begin_unassign().map(ApiRequest::Unassign),
        KeyCode::Esc => {
            apply_command(state, runtime, view_data, tx, AppCommand::CloseView);
            None
        }
        _ => None,
    };
    if let Some(request) = request {
        send_request(runtime, tx, request);
    }
}
