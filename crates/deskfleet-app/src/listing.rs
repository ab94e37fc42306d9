// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::{debug, warn};

use crate::{ApiError, Category, Computer, Employee};

pub const PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    Employee(Employee),
    Computer(Computer),
}

impl ListItem {
    pub fn id(&self) -> i64 {
        match self {
            Self::Employee(employee) => employee.id.get(),
            Self::Computer(computer) => computer.id.get(),
        }
    }

    /// Same record type and id.
    pub fn same_record(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Employee(a), Self::Employee(b)) => a.id == b.id,
            (Self::Computer(a), Self::Computer(b)) => a.id == b.id,
            _ => false,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Employee(_) => Category::Employee,
            Self::Computer(_) => Category::Computers,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::Employee(employee) => employee.display_name(),
            Self::Computer(computer) => computer.name.clone(),
        }
    }

    pub fn secondary(&self) -> &str {
        match self {
            Self::Employee(employee) => &employee.department,
            Self::Computer(computer) => &computer.model,
        }
    }

    /// Case-insensitive substring match over the fields the server searches.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let haystacks: Vec<String> = match self {
            Self::Employee(employee) => vec![employee.display_name(), employee.email.clone()],
            Self::Computer(computer) => vec![
                computer.name.clone(),
                computer.model.clone(),
                computer.serial_no.clone(),
            ],
        };
        haystacks
            .iter()
            .any(|value| value.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub seq: u64,
    pub category: Category,
    pub page: usize,
    pub size: usize,
    /// Committed search term, empty when none.
    pub term: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageData {
    pub items: Vec<ListItem>,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub category: Category,
    pub term: String,
    pub page: usize,
    pub items: Vec<ListItem>,
    pub total_pages: usize,
    pub loading: bool,
    pub cursor: usize,
    seq: u64,
}

impl ListView {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            term: String::new(),
            page: 0,
            items: Vec::new(),
            total_pages: 0,
            loading: false,
            cursor: 0,
            seq: 0,
        }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Issues a fetch for the current category, term, and page. Every call
    /// supersedes whatever is still in flight.
    pub fn load(&mut self) -> Option<PageQuery> {
        self.seq += 1;
        if !self.category.is_backed() {
            self.items.clear();
            self.total_pages = 0;
            self.loading = false;
            self.cursor = 0;
            return None;
        }
        self.loading = true;
        Some(PageQuery {
            seq: self.seq,
            category: self.category,
            page: self.page,
            size: PAGE_SIZE,
            term: self.term.clone(),
        })
    }

    pub fn set_category(&mut self, category: Category) -> Option<PageQuery> {
        if self.category != category {
            self.items.clear();
            self.total_pages = 0;
        }
        self.category = category;
        self.page = 0;
        self.cursor = 0;
        self.load()
    }

    pub fn set_term(&mut self, term: &str) -> Option<PageQuery> {
        self.term = term.trim().to_owned();
        self.page = 0;
        self.cursor = 0;
        self.load()
    }

    pub fn set_page(&mut self, page: usize) -> Option<PageQuery> {
        self.page = page;
        self.cursor = 0;
        self.load()
    }

    pub fn next_page(&mut self) -> Option<PageQuery> {
        if self.page + 1 >= self.total_pages {
            return None;
        }
        self.set_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> Option<PageQuery> {
        if self.page == 0 {
            return None;
        }
        self.set_page(self.page - 1)
    }

    pub fn refresh(&mut self) -> Option<PageQuery> {
        self.load()
    }

    /// Applies a fetch result. Results from superseded fetches are dropped
    /// and `false` is returned.
    pub fn apply(&mut self, seq: u64, result: Result<PageData, ApiError>) -> bool {
        if seq != self.seq {
            debug!(seq, current = self.seq, "dropping stale page");
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.items = data.items;
                self.total_pages = data.total_pages;
            }
            Err(error) => {
                warn!(
                    category = self.category.as_str(),
                    page = self.page,
                    error = %error,
                    "page load failed"
                );
                self.items.clear();
                self.total_pages = 0;
            }
        }
        self.cursor = self.cursor.min(self.items.len().saturating_sub(1));
        true
    }

    /// Patches a freshly written record into the visible page without a
    /// refetch. Page totals are only nudged, and server order is not
    /// respected; the next full load restores both.
    pub fn merge(&mut self, item: ListItem) -> bool {
        if item.category() != self.category {
            return false;
        }
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|current| current.same_record(&item))
        {
            *existing = item;
            return true;
        }
        if !item.matches(&self.term) {
            return false;
        }
        self.items.insert(0, item);
        self.items.truncate(PAGE_SIZE);
        self.total_pages = self.total_pages.max(1);
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

    pub fn selected(&self) -> Option<&ListItem> {
        self.items.get(self.cursor)
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page + 1, self.total_pages.max(1))
    }
}
