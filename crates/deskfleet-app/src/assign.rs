// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::{debug, warn};

use crate::{
    ApiError, ApiErrorKind, Assignment, Computer, ComputerId, Employee, EmployeeId, SyncStatus,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentCreated {
    pub assignment: Assignment,
    pub employee: Employee,
    pub computer: Computer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Assigned(AssignmentCreated),
    /// The panel needs a fresh candidate sync with this sequence.
    Resync(u64),
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignColumn {
    Employees,
    Computers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignPanel {
    pub employees: Vec<Employee>,
    pub computers: Vec<Computer>,
    pub selected_employee: Option<EmployeeId>,
    pub selected_computer: Option<ComputerId>,
    pub syncing: bool,
    pub submitting: bool,
    pub sync_error: Option<String>,
    pub message: Option<String>,
    pub column: AssignColumn,
    pub employee_cursor: usize,
    pub computer_cursor: usize,
    sync_seq: u64,
    /// Records captured when a confirm goes out.
    pending: Option<(Employee, Computer)>,
}

impl Default for AssignPanel {
    fn default() -> Self {
        Self {
            employees: Vec::new(),
            computers: Vec::new(),
            selected_employee: None,
            selected_computer: None,
            syncing: false,
            submitting: false,
            sync_error: None,
            message: None,
            column: AssignColumn::Employees,
            employee_cursor: 0,
            computer_cursor: 0,
            sync_seq: 0,
            pending: None,
        }
    }
}

impl AssignPanel {
    /// Starts a candidate refresh. Selections survive a sync.
    pub fn begin_sync(&mut self) -> u64 {
        self.sync_seq += 1;
        self.syncing = true;
        self.sync_error = None;
        self.sync_seq
    }

    pub fn finish_sync(&mut self, seq: u64, result: Result<SyncStatus, ApiError>) -> bool {
        if seq != self.sync_seq {
            debug!(seq, current = self.sync_seq, "dropping stale sync");
            return false;
        }
        self.syncing = false;
        match result {
            Ok(status) => {
                self.employees = status.employees_without_computer;
                self.computers = status.computers_without_employee;
            }
            Err(error) => {
                warn!(error = %error, "candidate sync failed");
                self.employees.clear();
                self.computers.clear();
                self.sync_error = Some(
                    error
                        .message_or("We couldn't retrieve the current status. Try again shortly.")
                        .to_owned(),
                );
            }
        }
        self.clamp_cursors();
        true
    }

    pub fn select_employee(&mut self, id: EmployeeId) -> bool {
        if self.submitting || !self.employees.iter().any(|employee| employee.id == id) {
            return false;
        }
        self.selected_employee = Some(id);
        self.message = None;
        true
    }

    pub fn select_computer(&mut self, id: ComputerId) -> bool {
        if self.submitting || !self.computers.iter().any(|computer| computer.id == id) {
            return false;
        }
        self.selected_computer = Some(id);
        self.message = None;
        true
    }

    /// Selects whatever sits under the cursor of the focused column.
    pub fn select_at_cursor(&mut self) -> bool {
        match self.column {
            AssignColumn::Employees => match self.employees.get(self.employee_cursor) {
                Some(employee) => self.select_employee(employee.id),
                None => false,
            },
            AssignColumn::Computers => match self.computers.get(self.computer_cursor) {
                Some(computer) => self.select_computer(computer.id),
                None => false,
            },
        }
    }

    pub fn toggle_column(&mut self) {
        self.column = match self.column {
            AssignColumn::Employees => AssignColumn::Computers,
            AssignColumn::Computers => AssignColumn::Employees,
        };
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match self.column {
            AssignColumn::Employees => (&mut self.employee_cursor, self.employees.len()),
            AssignColumn::Computers => (&mut self.computer_cursor, self.computers.len()),
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = (*cursor as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    pub fn selected_employee_record(&self) -> Option<&Employee> {
        let id = self.selected_employee?;
        self.employees.iter().find(|employee| employee.id == id)
    }

    pub fn selected_computer_record(&self) -> Option<&Computer> {
        let id = self.selected_computer?;
        self.computers.iter().find(|computer| computer.id == id)
    }

    /// Both selections must still be listed as candidates.
    pub fn can_confirm(&self) -> bool {
        !self.submitting
            && self.selected_employee_record().is_some()
            && self.selected_computer_record().is_some()
    }

    pub fn begin_confirm(&mut self) -> Option<(EmployeeId, ComputerId)> {
        if self.submitting {
            return None;
        }
        let employee = self.selected_employee_record()?.clone();
        let computer = self.selected_computer_record()?.clone();
        let pair = (employee.id, computer.id);
        self.pending = Some((employee, computer));
        self.submitting = true;
        self.message = None;
        Some(pair)
    }

    pub fn finish_confirm(&mut self, result: Result<Assignment, ApiError>) -> ConfirmOutcome {
        self.submitting = false;
        let pending = self.pending.take();
        let error = match result {
            Ok(assignment) => return self.complete(assignment, pending),
            Err(error) => error,
        };
        warn!(status = error.status, error = %error, "assignment confirm failed");

        match error.kind {
            ApiErrorKind::AlreadyAssigned => {
                self.message = Some("One of the selected records is no longer available.".to_owned());
                self.selected_employee = None;
                self.selected_computer = None;
                ConfirmOutcome::Resync(self.begin_sync())
            }
            ApiErrorKind::Validation => {
                self.message = Some(
                    error
                        .joined_field_messages()
                        .unwrap_or_else(|| "Please review the selected records.".to_owned()),
                );
                ConfirmOutcome::Rejected
            }
            _ if error.is_server_failure() => {
                self.message =
                    Some("We couldn't create the assignment. Try again in a few minutes.".to_owned());
                ConfirmOutcome::Rejected
            }
            _ => {
                self.message = Some(
                    error
                        .message_or("Unable to create assignment. Please try again.")
                        .to_owned(),
                );
                ConfirmOutcome::Rejected
            }
        }
    }

    fn complete(
        &mut self,
        assignment: Assignment,
        pending: Option<(Employee, Computer)>,
    ) -> ConfirmOutcome {
        self.selected_employee = None;
        self.selected_computer = None;
        let Some((employee, computer)) = pending else {
            warn!("assignment confirmed without a pending pair");
            return ConfirmOutcome::Resync(self.begin_sync());
        };
        self.employees.retain(|candidate| candidate.id != employee.id);
        self.computers.retain(|candidate| candidate.id != computer.id);
        self.clamp_cursors();
        ConfirmOutcome::Assigned(AssignmentCreated {
            assignment,
            employee,
            computer,
        })
    }

    fn clamp_cursors(&mut self) {
        self.employee_cursor = self
            .employee_cursor
            .min(self.employees.len().saturating_sub(1));
        self.computer_cursor = self
            .computer_cursor
            .min(self.computers.len().saturating_sub(1));
    }
}
