// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::{debug, warn};

use crate::{ApiError, AssignmentListing, EmployeeId, Office, PAGE_SIZE, Page, Summary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentQuery {
    pub seq: u64,
    pub page: usize,
    pub size: usize,
    pub term: String,
    pub office: Option<Office>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailStatus {
    Idle,
    Loading,
    Loaded(Summary),
    Failed(String),
}

/// Paged list of current assignments with a detail pane and an unassign
/// action for the selected employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentBrowser {
    pub items: Vec<AssignmentListing>,
    pub page: usize,
    pub total_pages: usize,
    pub term: String,
    pub office: Option<Office>,
    pub loading: bool,
    pub list_error: Option<String>,
    pub cursor: usize,
    pub selected: Option<EmployeeId>,
    pub detail: DetailStatus,
    pub unassigning: bool,
    pub unassign_error: Option<String>,
    seq: u64,
    detail_seq: u64,
}

impl Default for AssignmentBrowser {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            total_pages: 0,
            term: String::new(),
            office: None,
            loading: false,
            list_error: None,
            cursor: 0,
            selected: None,
            detail: DetailStatus::Idle,
            unassigning: false,
            unassign_error: None,
            seq: 0,
            detail_seq: 0,
        }
    }
}

impl AssignmentBrowser {
    pub fn load(&mut self) -> AssignmentQuery {
        self.seq += 1;
        self.loading = true;
        self.list_error = None;
        AssignmentQuery {
            seq: self.seq,
            page: self.page,
            size: PAGE_SIZE,
            term: self.term.clone(),
            office: self.office,
        }
    }

    pub fn submit_search(&mut self, input: &str) -> AssignmentQuery {
        self.term = input.trim().to_owned();
        self.page = 0;
        self.cursor = 0;
        self.load()
    }

    pub fn cycle_office(&mut self) -> AssignmentQuery {
        self.office = Office::cycle(self.office);
        self.page = 0;
        self.cursor = 0;
        self.load()
    }

    pub fn clear_filters(&mut self) -> AssignmentQuery {
        self.term.clear();
        self.office = None;
        self.page = 0;
        self.cursor = 0;
        self.load()
    }

    pub fn next_page(&mut self) -> Option<AssignmentQuery> {
        if self.page + 1 >= self.total_pages {
            return None;
        }
        self.page += 1;
        self.cursor = 0;
        Some(self.load())
    }

    pub fn prev_page(&mut self) -> Option<AssignmentQuery> {
        if self.page == 0 {
            return None;
        }
        self.page -= 1;
        self.cursor = 0;
        Some(self.load())
    }

    pub fn apply(&mut self, seq: u64, result: Result<Page<AssignmentListing>, ApiError>) -> bool {
        if seq != self.seq {
            debug!(seq, current = self.seq, "dropping stale assignment page");
            return false;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.items = page.content;
                self.total_pages = page.total_pages;
            }
            Err(error) => {
                warn!(error = %error, "assignment list failed");
                self.items.clear();
                self.total_pages = 0;
                self.list_error = Some(
                    error
                        .message_or("We couldn't load the assignments. Please try again.")
                        .to_owned(),
                );
            }
        }
        self.cursor = self.cursor.min(self.items.len().saturating_sub(1));
        true
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.items.is_empty() {
            self.cursor = 0;
            return;
        }
        let max = self.items.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, max) as usize;
    }

    /// Selects the entry under the cursor and returns the detail fetch to run.
    pub fn select_at_cursor(&mut self) -> Option<(u64, EmployeeId)> {
        let employee_id = self.items.get(self.cursor)?.employee_id()?;
        self.detail_seq += 1;
        self.selected = Some(employee_id);
        self.detail = DetailStatus::Loading;
        self.unassign_error = None;
        Some((self.detail_seq, employee_id))
    }

    pub fn apply_detail(&mut self, seq: u64, result: Result<Option<Summary>, ApiError>) -> bool {
        if seq != self.detail_seq {
            debug!(seq, current = self.detail_seq, "dropping stale assignment detail");
            return false;
        }
        self.detail = match result {
            Ok(summary) => DetailStatus::Loaded(summary.unwrap_or_default()),
            Err(error) => {
                warn!(error = %error, "assignment detail failed");
                DetailStatus::Failed(
                    error
                        .message_or("We couldn't load the assignment information.")
                        .to_owned(),
                )
            }
        };
        true
    }

    pub fn begin_unassign(&mut self) -> Option<EmployeeId> {
        if self.unassigning {
            return None;
        }
        let employee_id = self.selected?;
        self.unassigning = true;
        self.unassign_error = None;
        Some(employee_id)
    }

    /// On success the list jumps back to the first page and the post-removal
    /// summary is handed back with the reload to run.
    pub fn finish_unassign(
        &mut self,
        result: Result<Option<Summary>, ApiError>,
    ) -> Option<(Summary, AssignmentQuery)> {
        self.unassigning = false;
        match result {
            Ok(summary) => {
                let summary = summary.unwrap_or_default();
                self.detail_seq += 1;
                self.detail = DetailStatus::Loaded(summary.clone());
                self.selected = None;
                self.page = 0;
                self.cursor = 0;
                Some((summary, self.load()))
            }
            Err(error) => {
                warn!(error = %error, "unassign failed");
                self.unassign_error = Some(
                    error
                        .message_or("We couldn't remove the assignment. Please try again.")
                        .to_owned(),
                );
                None
            }
        }
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page + 1, self.total_pages.max(1))
    }
}
