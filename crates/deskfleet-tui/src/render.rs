// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use deskfleet_app::{
    AddView, AppState, AssignColumn, AssignPanel, AssignmentBrowser, Category, DetailStatus,
    FormField, FormInput, FormPhase, FormState, ListItem, ListView, Mode, ProfileStatus,
    ProfileTarget, ProfileView, Selection, Summary, UpdatePanel, UpdateView, format_short_date,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};

use super::{ADD_OPTIONS, UPDATE_OPTIONS, UpdateFocus, ViewData};

const APP_TITLE: &str = "deskfleet";

pub(crate) fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let search_height = if state.search.open { 3 } else { 0 };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(search_height),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let selected = Category::ALL
        .iter()
        .position(|category| *category == state.category)
        .unwrap_or(0);
    let titles = Category::ALL
        .iter()
        .map(|category| category.label())
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .block(Block::default().title(APP_TITLE).borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    if state.search.open {
        let search = Paragraph::new(render_search_text(state))
            .block(Block::default().title("search").borders(Borders::ALL));
        frame.render_widget(search, layout[1]);
    }

    render_body(frame, layout[2], state, view_data);

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[3]);
}

fn render_body(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState, view_data: &ViewData) {
    match state.mode {
        Mode::Browse(Selection::None) => {
            let title = format!(
                "{} - {}",
                view_data.list.category.label(),
                view_data.list.page_label()
            );
            let list = Paragraph::new(render_list_text(&view_data.list))
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(list, area);
        }
        Mode::Browse(_) => {
            let profile = Paragraph::new(render_profile_text(&view_data.profile))
                .wrap(Wrap { trim: false })
                .block(Block::default().title("profile").borders(Borders::ALL));
            frame.render_widget(profile, area);
        }
        Mode::Add {
            view: AddView::Selector,
            ..
        } => {
            let options = ADD_OPTIONS.map(|(_, label)| label);
            render_selector(frame, area, "add", &options, view_data.selector_cursor);
        }
        Mode::Update {
            view: UpdateView::Selector,
            ..
        } => {
            let options = UPDATE_OPTIONS.map(|(_, label)| label);
            render_selector(frame, area, "update", &options, view_data.selector_cursor);
        }
        Mode::Add {
            view: AddView::Employee,
            ..
        } => {
            let form = Paragraph::new(render_form_text(
                &view_data.add_employee,
                Some(view_data.field_cursor),
            ))
            .block(Block::default().title("add employee").borders(Borders::ALL));
            frame.render_widget(form, area);
        }
        Mode::Add {
            view: AddView::Computer,
            ..
        } => {
            let form = Paragraph::new(render_form_text(
                &view_data.add_computer,
                Some(view_data.field_cursor),
            ))
            .block(Block::default().title("add computer").borders(Borders::ALL));
            frame.render_widget(form, area);
        }
        Mode::Add {
            view: AddView::Assign,
            ..
        } => render_assign(frame, area, &view_data.assign),
        Mode::Update {
            view: UpdateView::Employee,
            ..
        } => render_update_panel(
            frame,
            area,
            "employees",
            &view_data.update_employee,
            view_data,
            |employee| format!("{}  {}", employee.display_name(), employee.email),
        ),
        Mode::Update {
            view: UpdateView::Computer,
            ..
        } => render_update_panel(
            frame,
            area,
            "computers",
            &view_data.update_computer,
            view_data,
            |computer| format!("{}  {}", computer.name, computer.serial_no),
        ),
        Mode::Update {
            view: UpdateView::Assignment,
            ..
        } => render_assignments(frame, area, view_data),
    }
}

fn render_selector(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    options: &[&str],
    cursor: usize,
) {
    let popup = centered_rect(40, 40, area);
    frame.render_widget(Clear, popup);
    let selector = Paragraph::new(render_selector_text(options, cursor)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(selector, popup);
}

fn render_update_panel<I: FormInput>(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    noun: &str,
    panel: &UpdatePanel<I>,
    view_data: &ViewData,
    label: impl Fn(&I::Record) -> String,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let list_focused = view_data.update_focus == UpdateFocus::List;
    let list = Paragraph::new(render_update_list_text(panel, list_focused, label)).block(
        Block::default()
            .title(noun.to_owned())
            .borders(Borders::ALL)
            .style(focus_style(list_focused)),
    );
    frame.render_widget(list, columns[0]);

    let cursor = (!list_focused).then_some(view_data.field_cursor);
    let form = Paragraph::new(render_form_text(&panel.form, cursor)).block(
        Block::default()
            .title(format!("update {}", I::NOUN))
            .borders(Borders::ALL)
            .style(focus_style(!list_focused)),
    );
    frame.render_widget(form, columns[1]);
}

fn render_assign(frame: &mut ratatui::Frame<'_>, area: Rect, panel: &AssignPanel) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(4)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let employees_focused = panel.column == AssignColumn::Employees;
    let employees = Paragraph::new(render_assign_column_text(panel, AssignColumn::Employees))
        .block(
            Block::default()
                .title("employees without a computer")
                .borders(Borders::ALL)
                .style(focus_style(employees_focused)),
        );
    frame.render_widget(employees, columns[0]);

    let computers = Paragraph::new(render_assign_column_text(panel, AssignColumn::Computers))
        .block(
            Block::default()
                .title("computers without an employee")
                .borders(Borders::ALL)
                .style(focus_style(!employees_focused)),
        );
    frame.render_widget(computers, columns[1]);

    let summary = Paragraph::new(render_assign_status_text(panel))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("assign").borders(Borders::ALL));
    frame.render_widget(summary, rows[1]);
}

fn render_assignments(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let browser = &view_data.assignments;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let title = match &view_data.assignment_input {
        Some(input) => format!("assignments - search: {input}_"),
        None => format!("assignments - {}", browser.page_label()),
    };
    let list = Paragraph::new(render_assignments_text(browser))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(list, columns[0]);

    let detail = Paragraph::new(render_assignment_detail_text(browser))
        .wrap(Wrap { trim: false })
        .block(Block::default().title("detail").borders(Borders::ALL));
    frame.render_widget(detail, columns[1]);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn cursor_marker(active: bool) -> &'static str {
    if active { "> " } else { "  " }
}

pub(crate) fn render_search_text(state: &AppState) -> String {
    format!("/{}_", state.search.input)
}

pub(crate) fn render_list_text(list: &ListView) -> String {
    if !list.category.is_backed() {
        return format!("{} is not available yet.", list.category.label());
    }
    if list.loading && list.items.is_empty() {
        return "Loading...".to_owned();
    }
    if list.items.is_empty() {
        return if list.term.is_empty() {
            "No records yet. Press a to add one.".to_owned()
        } else {
            format!("Nothing matches \"{}\".", list.term)
        };
    }

    list.items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let marker = cursor_marker(index == list.cursor);
            match item {
                ListItem::Employee(employee) => format!(
                    "{marker}{:<24} {:<18} {}",
                    employee.display_name(),
                    employee.department,
                    employee.office
                ),
                ListItem::Computer(computer) => format!(
                    "{marker}{:<14} {:<26} {:<12} {}",
                    computer.name, computer.model, computer.serial_no, computer.office
                ),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn render_profile_text(profile: &ProfileView) -> String {
    let Some(target) = profile.target else {
        return String::new();
    };
    match &profile.status {
        ProfileStatus::Loading => format!("Loading {}...", target.noun()),
        ProfileStatus::Failed { headline, detail } => format!("{headline}\n\n{detail}"),
        ProfileStatus::NotFound => match target {
            ProfileTarget::Employee(_) => "Employee not found.".to_owned(),
            ProfileTarget::Computer(_) => "Computer not found.".to_owned(),
        },
        ProfileStatus::Loaded(summary) => render_summary_text(target, summary),
    }
}

fn render_summary_text(target: ProfileTarget, summary: &Summary) -> String {
    let mut lines = Vec::new();
    let employee_lines = |lines: &mut Vec<String>| {
        if let Some(employee) = &summary.employee {
            lines.push(employee.display_name());
            lines.push(format!("  Email       {}", employee.email));
            lines.push(format!("  Office      {}", employee.office));
            lines.push(format!("  Department  {}", employee.department));
            if let Some(status) = employee.status {
                lines.push(format!("  Status      {}", status.as_str()));
            }
            if let Some(extension) = &employee.extension {
                lines.push(format!("  Extension   {extension}"));
            }
            if let Some(cell_phone) = &employee.cell_phone {
                lines.push(format!("  Cell        {cell_phone}"));
            }
        }
    };
    let computer_lines = |lines: &mut Vec<String>| {
        if let Some(computer) = &summary.computer {
            lines.push(computer.name.clone());
            lines.push(format!("  Model       {}", computer.model));
            lines.push(format!("  Serial      {}", computer.serial_no));
            lines.push(format!("  Office      {}", computer.office));
            let extras = [
                ("Division", &computer.division),
                ("RAM", &computer.ram),
                ("Processor", &computer.processor),
                ("OS", &computer.os),
            ];
            for (label, value) in extras {
                if let Some(value) = value {
                    lines.push(format!("  {label:<11} {value}"));
                }
            }
        }
    };

    match target {
        ProfileTarget::Employee(_) => {
            employee_lines(&mut lines);
            lines.push(String::new());
            if summary.computer.is_some() {
                lines.push("Assigned computer".to_owned());
                computer_lines(&mut lines);
            } else {
                lines.push("No computer assigned.".to_owned());
            }
        }
        ProfileTarget::Computer(_) => {
            computer_lines(&mut lines);
            lines.push(String::new());
            if summary.employee.is_some() {
                lines.push("Assigned to".to_owned());
                employee_lines(&mut lines);
            } else {
                lines.push("Not assigned to anyone.".to_owned());
            }
        }
    }

    if let Some(date) = summary
        .assignment
        .as_ref()
        .and_then(|assignment| assignment.assigned_on())
    {
        lines.push(format!("Assigned on {}", format_short_date(date)));
    }
    lines.join("\n")
}

pub(crate) fn render_selector_text(options: &[&str], cursor: usize) -> String {
    options
        .iter()
        .enumerate()
        .map(|(index, label)| format!("{}{}. {label}", cursor_marker(index == cursor), index + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders every field with its value and inline error. `cursor` is `None`
/// when the form does not have focus.
pub(crate) fn render_form_text<I: FormInput>(form: &FormState<I>, cursor: Option<usize>) -> String {
    let mut lines = Vec::new();
    if let Some(banner) = &form.banner {
        lines.push(format!("! {banner}"));
        lines.push(String::new());
    }
    if form.is_update() && form.selected().is_none() {
        lines.push(format!("Pick a {} from the list to edit.", I::NOUN));
        lines.push(String::new());
    }

    for (index, field) in <I::Field as FormField>::ALL.iter().enumerate() {
        let required = if field.required() { "*" } else { " " };
        let value = form.input.value(*field);
        let value = if field.choices().is_empty() {
            value.to_owned()
        } else {
            format!("< {value} >")
        };
        lines.push(format!(
            "{}{:<17}{required} {value}",
            cursor_marker(cursor == Some(index)),
            field.label()
        ));
        if let Some(error) = form.error(*field) {
            lines.push(format!("    {error}"));
        }
    }

    lines.push(String::new());
    lines.push(
        if form.phase == FormPhase::Submitting {
            "Saving..."
        } else {
            "enter save  esc close"
        }
        .to_owned(),
    );
    lines.join("\n")
}

pub(crate) fn render_update_list_text<I: FormInput>(
    panel: &UpdatePanel<I>,
    focused: bool,
    label: impl Fn(&I::Record) -> String,
) -> String {
    if panel.loading {
        return "Loading...".to_owned();
    }
    if let Some(error) = &panel.list_error {
        return error.clone();
    }
    if panel.records.is_empty() {
        return format!("No {} records.", I::NOUN);
    }
    let selected = panel.form.selected();
    panel
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let marker = cursor_marker(focused && index == panel.cursor);
            let picked = if Some(I::record_id(record)) == selected {
                "* "
            } else {
                "  "
            };
            format!("{marker}{picked}{}", label(record))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn render_assign_column_text(panel: &AssignPanel, column: AssignColumn) -> String {
    if panel.syncing {
        return "Syncing...".to_owned();
    }
    let focused = panel.column == column;
    let rows: Vec<String> = match column {
        AssignColumn::Employees => panel
            .employees
            .iter()
            .enumerate()
            .map(|(index, employee)| {
                let picked = if panel.selected_employee == Some(employee.id) {
                    "[x]"
                } else {
                    "[ ]"
                };
                format!(
                    "{}{picked} {}  {}",
                    cursor_marker(focused && index == panel.employee_cursor),
                    employee.display_name(),
                    employee.office
                )
            })
            .collect(),
        AssignColumn::Computers => panel
            .computers
            .iter()
            .enumerate()
            .map(|(index, computer)| {
                let picked = if panel.selected_computer == Some(computer.id) {
                    "[x]"
                } else {
                    "[ ]"
                };
                format!(
                    "{}{picked} {}  {}",
                    cursor_marker(focused && index == panel.computer_cursor),
                    computer.name,
                    computer.model
                )
            })
            .collect(),
    };
    if rows.is_empty() {
        return match column {
            AssignColumn::Employees => "Every employee has a computer.".to_owned(),
            AssignColumn::Computers => "Every computer is assigned.".to_owned(),
        };
    }
    rows.join("\n")
}

pub(crate) fn render_assign_status_text(panel: &AssignPanel) -> String {
    if let Some(error) = &panel.sync_error {
        return error.clone();
    }
    let employee = panel
        .selected_employee_record()
        .map(|employee| employee.display_name())
        .unwrap_or_else(|| "no employee".to_owned());
    let computer = panel
        .selected_computer_record()
        .map(|computer| computer.name.clone())
        .unwrap_or_else(|| "no computer".to_owned());
    let mut text = if panel.submitting {
        format!("Assigning {computer} to {employee}...")
    } else {
        format!("{employee} <- {computer}")
    };
    if let Some(message) = &panel.message {
        text.push('\n');
        text.push_str(message);
    }
    text
}

pub(crate) fn render_assignments_text(browser: &AssignmentBrowser) -> String {
    let mut lines = Vec::new();
    let mut filters = Vec::new();
    if !browser.term.is_empty() {
        filters.push(format!("search \"{}\"", browser.term));
    }
    if let Some(office) = browser.office {
        filters.push(format!("office {}", office.as_str()));
    }
    if !filters.is_empty() {
        lines.push(format!("Filtered by {}", filters.join(", ")));
        lines.push(String::new());
    }

    if browser.loading && browser.items.is_empty() {
        lines.push("Loading...".to_owned());
    } else if let Some(error) = &browser.list_error {
        lines.push(error.clone());
    } else if browser.items.is_empty() {
        lines.push("No assignments found.".to_owned());
    } else {
        for (index, item) in browser.items.iter().enumerate() {
            let employee = item
                .employee
                .as_ref()
                .map(|employee| employee.display_name())
                .unwrap_or_else(|| "(unknown employee)".to_owned());
            let computer = item
                .computer
                .as_ref()
                .map(|computer| computer.name.as_str())
                .unwrap_or("(no computer)");
            let picked = if item.employee_id().is_some() && item.employee_id() == browser.selected
            {
                "* "
            } else {
                "  "
            };
            lines.push(format!(
                "{}{picked}{employee:<24} {computer}",
                cursor_marker(index == browser.cursor)
            ));
        }
    }
    lines.join("\n")
}

pub(crate) fn render_assignment_detail_text(browser: &AssignmentBrowser) -> String {
    let mut lines = match &browser.detail {
        DetailStatus::Idle => vec!["Press enter on an assignment to see it here.".to_owned()],
        DetailStatus::Loading => vec!["Loading...".to_owned()],
        DetailStatus::Failed(message) => vec![message.clone()],
        DetailStatus::Loaded(summary) => {
            let mut lines = Vec::new();
            match &summary.employee {
                Some(employee) => {
                    lines.push(employee.display_name());
                    lines.push(format!("  {}  {}", employee.email, employee.office));
                }
                None => lines.push("No employee on record.".to_owned()),
            }
            match &summary.computer {
                Some(computer) => {
                    lines.push(format!("Computer: {} ({})", computer.name, computer.serial_no));
                }
                None => lines.push("No computer assigned.".to_owned()),
            }
            if let Some(date) = summary
                .assignment
                .as_ref()
                .and_then(|assignment| assignment.assigned_on())
            {
                lines.push(format!("Assigned on {}", format_short_date(date)));
            }
            lines
        }
    };
    if browser.unassigning {
        lines.push(String::new());
        lines.push("Unassigning...".to_owned());
    }
    if let Some(error) = &browser.unassign_error {
        lines.push(String::new());
        lines.push(error.clone());
    }
    lines.join("\n")
}

pub(crate) fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if let Some(notice) = &state.notice {
        return notice.message.clone();
    }
    match state.mode {
        Mode::Browse(Selection::None) if state.search.open => {
            "enter search  ctrl+u clear  esc close".to_owned()
        }
        Mode::Browse(Selection::None) => format!(
            "{}  j/k move  [/] page  tab category  enter open  / search  a add  u update  m assign  ctrl+q quit",
            view_data.list.page_label()
        ),
        Mode::Browse(_) => "esc back  r reload  a add  u update".to_owned(),
        Mode::Add {
            view: AddView::Selector,
            ..
        }
        | Mode::Update {
            view: UpdateView::Selector,
            ..
        } => "j/k move  enter choose  1-3 jump  esc close".to_owned(),
        Mode::Add {
            view: AddView::Employee | AddView::Computer,
            ..
        } => "tab next field  left/right choose  enter save  esc close".to_owned(),
        Mode::Add {
            view: AddView::Assign,
            ..
        } => "tab switch list  space select  c confirm  s sync  esc close".to_owned(),
        Mode::Update {
            view: UpdateView::Employee | UpdateView::Computer,
            ..
        } => match view_data.update_focus {
            UpdateFocus::List => "j/k move  enter edit  tab form  r reload  esc close".to_owned(),
            UpdateFocus::Form => "tab next field  enter save  esc back to list".to_owned(),
        },
        Mode::Update {
            view: UpdateView::Assignment,
            ..
        } if view_data.assignment_input.is_some() => "enter search  esc cancel".to_owned(),
        Mode::Update {
            view: UpdateView::Assignment,
            ..
        } => "j/k move  enter detail  x unassign  / search  o office  c clear  [/] page  esc close"
            .to_owned(),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        render_assign_column_text, render_assign_status_text, render_assignment_detail_text,
        render_assignments_text, render_form_text, render_list_text, render_profile_text,
        render_selector_text, render_update_list_text, status_text,
    };
    use crate::ViewData;
    use deskfleet_app::{
        AppCommand, AppState, AssignColumn, AssignPanel, AssignmentBrowser, Category,
        ComputerFormInput, ComputerId, DetailStatus, EmployeeField, EmployeeFormInput,
        EmployeeId, FormState, ListItem, ListView, Office, PageData, ProfileTarget,
        ProfileView, Summary, UpdatePanel,
    };
    use deskfleet_testkit::{
        page_of, sample_computer, sample_employee, sample_listing, sample_summary, sample_sync,
    };

    #[test]
    fn list_text_marks_cursor_and_handles_empty_states() {
        let mut list = ListView::new(Category::Monitors);
        assert_eq!(render_list_text(&list), "Monitors is not available yet.");

        list = ListView::new(Category::Computers);
        let query = list.load().expect("computers are backed");
        assert_eq!(render_list_text(&list), "Loading...");

        list.apply(
            query.seq,
            Ok(PageData {
                items: vec![
                    ListItem::Computer(sample_computer(1)),
                    ListItem::Computer(sample_computer(2)),
                ],
                total_pages: 1,
            }),
        );
        list.move_cursor(1);
        let text = render_list_text(&list);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  "));
        assert!(lines[1].starts_with("> "));
        assert!(lines[1].contains(&sample_computer(2).serial_no));

        let query = list.set_term("nope").expect("backed");
        list.apply(query.seq, Ok(PageData::default()));
        assert_eq!(render_list_text(&list), "Nothing matches \"nope\".");
    }

    #[test]
    fn profile_text_covers_each_state() {
        let mut profile = ProfileView::default();
        assert_eq!(render_profile_text(&profile), "");

        let query = profile.open(ProfileTarget::Employee(EmployeeId::new(3)));
        assert_eq!(render_profile_text(&profile), "Loading employee...");

        profile.apply(query.seq, Ok(None));
        assert_eq!(render_profile_text(&profile), "Employee not found.");

        let query = profile.open(ProfileTarget::Employee(EmployeeId::new(3)));
        let summary = sample_summary(sample_employee(3), Some(sample_computer(8)));
        profile.apply(query.seq, Ok(Some(summary)));
        let text = render_profile_text(&profile);
        assert!(text.contains("Assigned computer"));
        assert!(text.contains(&sample_computer(8).serial_no));

        let query = profile.open(ProfileTarget::Computer(ComputerId::new(8)));
        profile.apply(
            query.seq,
            Ok(Some(Summary {
                computer: Some(sample_computer(8)),
                ..Summary::default()
            })),
        );
        assert!(render_profile_text(&profile).contains("Not assigned to anyone."));
    }

    #[test]
    fn selector_text_numbers_options() {
        assert_eq!(
            render_selector_text(&["Add employee", "Add computer"], 1),
            "  1. Add employee\n> 2. Add computer"
        );
    }

    #[test]
    fn form_text_shows_errors_and_choices() {
        let mut form = FormState::<EmployeeFormInput>::create();
        form.edit(EmployeeField::Office, Office::SouthIdaho.as_str().to_owned());
        assert!(form.begin_submit().is_none());

        let text = render_form_text(&form, Some(0));
        assert!(text.lines().next().is_some_and(|line| line.starts_with("> First name")));
        assert!(text.contains("    Please enter the first name."));
        assert!(text.contains("< So. Idaho >"));
        assert!(text.contains("< Active >"));
        assert!(!text.contains("Select an office."));
    }

    #[test]
    fn update_form_without_selection_prompts_for_one() {
        let mut form = FormState::<ComputerFormInput>::update();
        assert!(form.begin_submit().is_none());
        let text = render_form_text(&form, None);
        assert!(text.starts_with("! Select a computer first."));
        assert!(text.contains("Pick a computer from the list to edit."));
        assert!(!text.contains("> "));
    }

    #[test]
    fn update_list_marks_the_picked_record() {
        let mut panel = UpdatePanel::<EmployeeFormInput>::new();
        assert_eq!(
            render_update_list_text(&panel, true, |employee| employee.display_name()),
            "Loading..."
        );
        panel.apply_records(Ok(vec![sample_employee(1), sample_employee(2)]));
        panel.move_cursor(1);
        panel.choose();

        let text = render_update_list_text(&panel, true, |employee| employee.id.to_string());
        assert_eq!(text, "    1\n> * 2");
        let unfocused = render_update_list_text(&panel, false, |employee| employee.id.to_string());
        assert_eq!(unfocused, "    1\n  * 2");
    }

    #[test]
    fn assign_texts_show_selection_and_messages() {
        let mut panel = AssignPanel::default();
        let seq = panel.begin_sync();
        assert_eq!(
            render_assign_column_text(&panel, AssignColumn::Employees),
            "Syncing..."
        );
        panel.finish_sync(seq, Ok(sample_sync(vec![sample_employee(1)], Vec::new())));
        panel.select_at_cursor();

        let employees = render_assign_column_text(&panel, AssignColumn::Employees);
        assert!(employees.starts_with("> [x] "));
        assert_eq!(
            render_assign_column_text(&panel, AssignColumn::Computers),
            "Every computer is assigned."
        );
        let status = render_assign_status_text(&panel);
        assert!(status.ends_with("<- no computer"));
    }

    #[test]
    fn assignment_texts_include_filters_and_detail() {
        let mut browser = AssignmentBrowser::default();
        let query = browser.submit_search("ana");
        browser.apply(
            query.seq,
            Ok(page_of(
                vec![sample_listing(sample_employee(4), sample_computer(9))],
                1,
            )),
        );
        let query = browser.cycle_office();
        browser.apply(
            query.seq,
            Ok(page_of(
                vec![sample_listing(sample_employee(4), sample_computer(9))],
                1,
            )),
        );
        let text = render_assignments_text(&browser);
        assert!(text.starts_with("Filtered by search \"ana\", office Heber City Office"));
        assert!(text.contains(&sample_computer(9).name));

        assert_eq!(
            render_assignment_detail_text(&browser),
            "Press enter on an assignment to see it here."
        );
        browser.detail = DetailStatus::Loaded(sample_summary(sample_employee(4), None));
        assert!(render_assignment_detail_text(&browser).contains("No computer assigned."));
    }

    #[test]
    fn status_text_prefers_notice_over_hints() {
        let mut state = AppState::new(Category::Computers);
        let view_data = ViewData::new(Category::Computers);
        assert!(status_text(&state, &view_data).starts_with("Page 1 of 1"));

        state.dispatch(AppCommand::ToggleSearch);
        assert_eq!(
            status_text(&state, &view_data),
            "enter search  ctrl+u clear  esc close"
        );

        state.dispatch(AppCommand::ComputerSaved {
            record: sample_computer(2),
            created: false,
        });
        assert_eq!(
            status_text(&state, &view_data),
            "Computer updated successfully."
        );
    }
}
