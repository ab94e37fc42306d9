// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use deskfleet_app::{
    ApiError, Assignment, AssignmentListing, Computer, ComputerId, ComputerPayload, Employee,
    EmployeeId, EmployeePayload, Office, Page, Summary, SyncStatus,
};
use serde_json::json;
use tracing::debug;

use crate::{Client, Params, decode, decode_optional};

/// Page size used when walking every page of a listing.
pub const LIST_ALL_PAGE_SIZE: usize = 100;

pub const DEFAULT_COMPUTER_SORT: &str = "updatedAt,desc";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: usize,
    pub size: usize,
    pub search: Option<String>,
    pub office: Option<Office>,
    pub sort: Option<String>,
}

impl ListQuery {
    pub fn page(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            ..Self::default()
        }
    }

    pub fn search(mut self, term: &str) -> Self {
        self.search = Some(term.trim().to_owned());
        self
    }

    pub fn office(mut self, office: Option<Office>) -> Self {
        self.office = office;
        self
    }

    pub fn sort(mut self, sort: &str) -> Self {
        self.sort = Some(sort.to_owned());
        self
    }

    fn params(&self) -> Params {
        Params::new()
            .with("page", self.page)
            .with("size", self.size)
            .maybe("search", self.search.as_deref())
            .maybe("office", self.office.map(Office::as_str))
            .maybe("sort", self.sort.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputerSearch {
    pub name: Option<String>,
    pub office: Option<Office>,
    pub division: Option<String>,
    pub page: usize,
    pub size: usize,
    pub sort: Option<String>,
}

impl ComputerSearch {
    fn params(&self) -> Params {
        Params::new()
            .maybe("name", self.name.as_deref().map(str::trim))
            .maybe("office", self.office.map(Office::as_str))
            .maybe("division", self.division.as_deref().map(str::trim))
            .with("page", self.page)
            .with("size", self.size)
            .with(
                "sort",
                self.sort.as_deref().unwrap_or(DEFAULT_COMPUTER_SORT),
            )
    }
}

pub struct Employees<'a> {
    pub(crate) client: &'a Client,
}

impl Employees<'_> {
    pub fn list(&self, query: &ListQuery) -> Result<Page<Employee>, ApiError> {
        decode(
            self.client.get(&["employees"], &query.params())?,
            "employee page",
        )
    }

    /// Walks pages of [`LIST_ALL_PAGE_SIZE`] until the server reports the last one.
    pub fn list_all(&self) -> Result<Vec<Employee>, ApiError> {
        let mut all = Vec::new();
        let mut page = 0;
        loop {
            let chunk = self.list(&ListQuery::page(page, LIST_ALL_PAGE_SIZE))?;
            let done = chunk.content.is_empty() || chunk.is_last(page, LIST_ALL_PAGE_SIZE);
            all.extend(chunk.content);
            if done {
                break;
            }
            page += 1;
        }
        debug!(count = all.len(), pages = page + 1, "listed all employees");
        Ok(all)
    }

    pub fn get(&self, id: EmployeeId) -> Result<Employee, ApiError> {
        decode(
            self.client.get(&["employees", &id.to_string()], &Params::new())?,
            "employee",
        )
    }

    pub fn create(&self, payload: &EmployeePayload) -> Result<Employee, ApiError> {
        decode(self.client.post(&["employees"], payload)?, "created employee")
    }

    pub fn update(&self, id: EmployeeId, payload: &EmployeePayload) -> Result<Employee, ApiError> {
        decode(
            self.client.put(&["employees", &id.to_string()], payload)?,
            "updated employee",
        )
    }
}

pub struct Computers<'a> {
    pub(crate) client: &'a Client,
}

impl Computers<'_> {
    pub fn page(&self, page: usize, size: usize, sort: Option<&str>) -> Result<Page<Computer>, ApiError> {
        let params = Params::new()
            .with("page", page)
            .with("size", size)
            .with("sort", sort.unwrap_or(DEFAULT_COMPUTER_SORT));
        decode(self.client.get(&["computers", "page"], &params)?, "computer page")
    }

    pub fn search(&self, search: &ComputerSearch) -> Result<Page<Computer>, ApiError> {
        decode(
            self.client.get(&["computers", "search"], &search.params())?,
            "computer search",
        )
    }

    pub fn search_by_office(
        &self,
        office: Office,
        page: usize,
        size: usize,
    ) -> Result<Page<Computer>, ApiError> {
        self.search(&ComputerSearch {
            office: Some(office),
            page,
            size,
            ..ComputerSearch::default()
        })
    }

    pub fn list_all(&self) -> Result<Vec<Computer>, ApiError> {
        Ok(decode_optional(self.client.get(&["computers"], &Params::new())?, "computers")?
            .unwrap_or_default())
    }

    pub fn get(&self, id: ComputerId) -> Result<Computer, ApiError> {
        decode(
            self.client.get(&["computers", &id.to_string()], &Params::new())?,
            "computer",
        )
    }

    pub fn by_serial(&self, serial_no: &str) -> Result<Computer, ApiError> {
        decode(
            self.client
                .get(&["computers", "by-serial", serial_no.trim()], &Params::new())?,
            "computer",
        )
    }

    pub fn by_priority(&self, priority: &str) -> Result<Vec<Computer>, ApiError> {
        let segments = ["computers", "by-priority", priority.trim()];
        Ok(decode_optional(self.client.get(&segments, &Params::new())?, "computers")?
            .unwrap_or_default())
    }

    pub fn create(&self, payload: &ComputerPayload) -> Result<Computer, ApiError> {
        decode(self.client.post(&["computers"], payload)?, "created computer")
    }

    pub fn update(&self, id: ComputerId, payload: &ComputerPayload) -> Result<Computer, ApiError> {
        decode(
            self.client.put(&["computers", &id.to_string()], payload)?,
            "updated computer",
        )
    }
}

pub struct Summaries<'a> {
    pub(crate) client: &'a Client,
}

impl Summaries<'_> {
    pub fn employee(&self, id: EmployeeId) -> Result<Option<Summary>, ApiError> {
        decode_optional(
            self.client.get(&["summary", &id.to_string()], &Params::new())?,
            "employee summary",
        )
    }

    pub fn computer(&self, id: ComputerId) -> Result<Option<Summary>, ApiError> {
        decode_optional(
            self.client
                .get(&["summary", "computer", &id.to_string()], &Params::new())?,
            "computer summary",
        )
    }
}

pub struct Assignments<'a> {
    pub(crate) client: &'a Client,
}

impl Assignments<'_> {
    pub fn list(&self, query: &ListQuery) -> Result<Page<AssignmentListing>, ApiError> {
        decode(
            self.client.get(&["assignments"], &query.params())?,
            "assignment page",
        )
    }

    pub fn employee_summary(&self, employee_id: EmployeeId) -> Result<Option<Summary>, ApiError> {
        decode_optional(
            self.client
                .get(&["assignments", "employees", &employee_id.to_string()], &Params::new())?,
            "assignment summary",
        )
    }

    pub fn create(
        &self,
        employee_id: EmployeeId,
        computer_id: ComputerId,
    ) -> Result<Assignment, ApiError> {
        let body = json!({ "employeeId": employee_id, "computerId": computer_id });
        decode(self.client.post(&["assignments"], &body)?, "assignment")
    }

    /// Removes the employee's current assignment and returns the summary
    /// afterwards.
    pub fn remove(&self, employee_id: EmployeeId) -> Result<Option<Summary>, ApiError> {
        decode_optional(
            self.client.delete(&["assignments", &employee_id.to_string()])?,
            "assignment summary",
        )
    }
}

pub struct SyncStatuses<'a> {
    pub(crate) client: &'a Client,
}

impl SyncStatuses<'_> {
    pub fn status(&self) -> Result<SyncStatus, ApiError> {
        Ok(decode_optional(self.client.get(&["sync-status"], &Params::new())?, "sync status")?
            .unwrap_or_default())
    }
}
