// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use deskfleet_api::{Client, ComputerSearch, ListQuery};
use deskfleet_app::{Category, ListItem, PageData, ProfileTarget, UPDATE_LIST_SIZE};
use deskfleet_tui::{ApiRequest, ApiResponse, AppRuntime, InternalEvent};
use std::sync::mpsc::Sender;
use std::thread;
use tracing::debug;

const EMPLOYEE_PICKER_SORT: &str = "firstName,asc";
const COMPUTER_PICKER_SORT: &str = "name,asc";

/// Runs UI requests against the REST API, one worker thread per request.
pub struct ApiRuntime {
    client: Client,
}

impl ApiRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl AppRuntime for ApiRuntime {
    fn execute(&mut self, request: ApiRequest) -> ApiResponse {
        perform(&self.client, request)
    }

    fn dispatch(&mut self, request: ApiRequest, tx: &Sender<InternalEvent>) -> Result<()> {
        let client = self.client.clone();
        let sender = tx.clone();
        thread::Builder::new()
            .name("deskfleet-api".to_owned())
            .spawn(move || {
                let response = perform(&client, request);
                if sender.send(InternalEvent::Api(response)).is_err() {
                    debug!("ui went away before the api response arrived");
                }
            })
            .map_err(|error| anyhow!("spawn api worker: {error}"))?;
        Ok(())
    }
}

pub fn perform(client: &Client, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::LoadPage(query) => {
            let result = match query.category {
                Category::Employee => client
                    .employees()
                    .list(&ListQuery::page(query.page, query.size).search(&query.term))
                    .map(|page| PageData {
                        items: page.content.into_iter().map(ListItem::Employee).collect(),
                        total_pages: page.total_pages,
                    }),
                Category::Computers => {
                    let page = if query.term.trim().is_empty() {
                        client.computers().page(query.page, query.size, None)
                    } else {
                        client.computers().search(&ComputerSearch {
                            name: Some(query.term.clone()),
                            page: query.page,
                            size: query.size,
                            ..ComputerSearch::default()
                        })
                    };
                    page.map(|page| PageData {
                        items: page.content.into_iter().map(ListItem::Computer).collect(),
                        total_pages: page.total_pages,
                    })
                }
                _ => Ok(PageData::default()),
            };
            ApiResponse::Page {
                seq: query.seq,
                result,
            }
        }
        ApiRequest::LoadProfile(query) => {
            let result = match query.target {
                ProfileTarget::Employee(id) => client.summaries().employee(id),
                ProfileTarget::Computer(id) => client.summaries().computer(id),
            };
            ApiResponse::Profile {
                seq: query.seq,
                result,
            }
        }
        ApiRequest::SyncCandidates { seq } => ApiResponse::Candidates {
            seq,
            result: client.sync().status(),
        },
        ApiRequest::CreateAssignment {
            employee_id,
            computer_id,
        } => ApiResponse::AssignmentCreated(client.assignments().create(employee_id, computer_id)),
        ApiRequest::SaveEmployee(submission) => {
            let employees = client.employees();
            let result = match submission.target {
                None => employees.create(&submission.payload),
                Some(id) => employees.update(id, &submission.payload),
            };
            ApiResponse::EmployeeSaved {
                created: submission.target.is_none(),
                result,
            }
        }
        ApiRequest::SaveComputer(submission) => {
            let computers = client.computers();
            let result = match submission.target {
                None => computers.create(&submission.payload),
                Some(id) => computers.update(id, &submission.payload),
            };
            ApiResponse::ComputerSaved {
                created: submission.target.is_none(),
                result,
            }
        }
        ApiRequest::ListEmployees => ApiResponse::EmployeeList(
            client
                .employees()
                .list(&ListQuery::page(0, UPDATE_LIST_SIZE).sort(EMPLOYEE_PICKER_SORT))
                .map(|page| page.content),
        ),
        ApiRequest::ListComputers => ApiResponse::ComputerList(
            client
                .computers()
                .page(0, UPDATE_LIST_SIZE, Some(COMPUTER_PICKER_SORT))
                .map(|page| page.content),
        ),
        ApiRequest::FetchEmployee(id) => ApiResponse::EmployeeFetched {
            id,
            result: client.employees().get(id),
        },
        ApiRequest::FetchComputer(id) => ApiResponse::ComputerFetched {
            id,
            result: client.computers().get(id),
        },
        ApiRequest::LoadAssignments(query) => ApiResponse::Assignments {
            seq: query.seq,
            result: client.assignments().list(
                &ListQuery::page(query.page, query.size)
                    .search(&query.term)
                    .office(query.office),
            ),
        },
        ApiRequest::LoadAssignmentDetail { seq, employee_id } => ApiResponse::AssignmentDetail {
            seq,
            result: client.assignments().employee_summary(employee_id),
        },
        ApiRequest::Unassign(employee_id) => {
            ApiResponse::Unassigned(client.assignments().remove(employee_id))
        }
    }
}
