// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use deskfleet_app::{
    Assignment, AssignmentId, AssignmentListing, Computer, ComputerId, Employee, EmployeeId,
    EmployeeStatus, Office, Page, Summary, SyncStatus,
};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tiny_http::{Header, Response, Server};

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];
const DEPARTMENTS: [&str; 9] = [
    "Accounting",
    "Dispatch",
    "Engineering",
    "Field Services",
    "Human Resources",
    "IT",
    "Legal",
    "Operations",
    "Sales",
];
const COMPUTER_MODELS: [&str; 10] = [
    "Dell Latitude 7440",
    "Dell OptiPlex 7010",
    "HP EliteBook 840",
    "HP ProDesk 400",
    "Lenovo ThinkPad T14",
    "Lenovo ThinkCentre M70q",
    "Microsoft Surface Pro 9",
    "Apple MacBook Air M2",
    "Apple Mac mini M2",
    "Framework Laptop 13",
];
const PROCESSORS: [&str; 6] = [
    "Intel Core i5-1345U",
    "Intel Core i7-1365U",
    "Intel Core i5-13500T",
    "AMD Ryzen 5 PRO 7540U",
    "AMD Ryzen 7 PRO 7840U",
    "Apple M2",
];
const RAM_SIZES: [&str; 4] = ["8 GB", "16 GB", "32 GB", "64 GB"];
const OPERATING_SYSTEMS: [&str; 4] = ["Windows 11 Pro", "Windows 10 Pro", "macOS 14", "Ubuntu 24.04"];
const DIVISIONS: [&str; 5] = ["Corporate", "Field", "Retail", "Warehouse", "Support"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Generates plausible inventory records from a fixed seed.
#[derive(Debug, Clone)]
pub struct FleetFaker {
    rng: DeterministicRng,
    next_id: i64,
}

impl FleetFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_id: 1,
        }
    }

    pub fn employee(&mut self) -> Employee {
        let id = self.take_id();
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let office = Office::ALL[self.rng.int_n(Office::ALL.len())];
        Employee {
            id: EmployeeId::new(id),
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            full_name: Some(format!("{first} {last}")),
            email: format!(
                "{}.{}{id}@example.com",
                first.to_ascii_lowercase(),
                last.to_ascii_lowercase()
            ),
            office: office.as_str().to_owned(),
            department: self.pick(&DEPARTMENTS).to_owned(),
            status: Some(if self.rng.int_n(5) == 0 {
                EmployeeStatus::Inactive
            } else {
                EmployeeStatus::Active
            }),
            extension: Some(format!("{}", 1000 + self.rng.int_n(9000))),
            cell_phone: None,
        }
    }

    pub fn computer(&mut self) -> Computer {
        let id = self.take_id();
        let model = self.pick(&COMPUTER_MODELS);
        let office = Office::ALL[self.rng.int_n(Office::ALL.len())];
        let prefix: String = office
            .as_str()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .filter(char::is_ascii_alphabetic)
            .collect::<String>()
            .to_ascii_uppercase();
        Computer {
            id: ComputerId::new(id),
            model: model.to_owned(),
            name: format!("{prefix}-{id:03}"),
            serial_no: format!("{:X}", self.rng.next_u64() & 0xFFFF_FFFF),
            office: office.as_str().to_owned(),
            division: Some(self.pick(&DIVISIONS).to_owned()),
            ram: Some(self.pick(&RAM_SIZES).to_owned()),
            processor: Some(self.pick(&PROCESSORS).to_owned()),
            os: Some(self.pick(&OPERATING_SYSTEMS).to_owned()),
        }
    }

    pub fn employees(&mut self, count: usize) -> Vec<Employee> {
        (0..count).map(|_| self.employee()).collect()
    }

    pub fn computers(&mut self, count: usize) -> Vec<Computer> {
        (0..count).map(|_| self.computer()).collect()
    }

    fn take_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

pub fn sample_employee(id: i64) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        first_name: "Jordan".to_owned(),
        last_name: "Reed".to_owned(),
        full_name: Some("Jordan Reed".to_owned()),
        email: format!("jordan.reed{id}@example.com"),
        office: Office::UtahValley.as_str().to_owned(),
        department: "Accounting".to_owned(),
        status: Some(EmployeeStatus::Active),
        extension: Some("2201".to_owned()),
        cell_phone: Some("(801) 555-0142".to_owned()),
    }
}

pub fn sample_computer(id: i64) -> Computer {
    Computer {
        id: ComputerId::new(id),
        model: "Dell Latitude 7440".to_owned(),
        name: format!("UV-{id:03}"),
        serial_no: format!("7HX{id:04}"),
        office: Office::UtahValley.as_str().to_owned(),
        division: Some("Corporate".to_owned()),
        ram: Some("16 GB".to_owned()),
        processor: Some("Intel Core i7-1365U".to_owned()),
        os: Some("Windows 11 Pro".to_owned()),
    }
}

pub fn sample_assignment(id: i64, employee: &Employee, computer: &Computer) -> Assignment {
    Assignment {
        id: AssignmentId::new(id),
        employee_id: employee.id,
        computer_id: computer.id,
        assigned_at: Some(fixture_datetime().to_owned()),
    }
}

pub fn sample_summary(employee: Employee, computer: Option<Computer>) -> Summary {
    let assignment = computer
        .as_ref()
        .map(|computer| sample_assignment(employee.id.get() * 100, &employee, computer));
    Summary {
        employee: Some(employee),
        computer,
        assignment,
    }
}

pub fn sample_listing(employee: Employee, computer: Computer) -> AssignmentListing {
    AssignmentListing {
        assignment_id: Some(AssignmentId::new(employee.id.get() * 100)),
        employee: Some(employee),
        computer: Some(computer),
        assigned_at: Some(fixture_datetime().to_owned()),
    }
}

pub fn sample_sync(employees: Vec<Employee>, computers: Vec<Computer>) -> SyncStatus {
    SyncStatus {
        employees_without_computer: employees,
        computers_without_employee: computers,
    }
}

pub fn page_of<T>(content: Vec<T>, total_pages: usize) -> Page<T> {
    Page {
        content,
        total_pages,
        last: None,
    }
}

pub fn fixture_datetime() -> &'static str {
    "2026-01-15T09:30:00Z"
}

pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("config.toml");
    Ok((dir, path))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).with_context(|| format!("decode body {:?}", self.body))
    }
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    status: u16,
    body: String,
    content_type: Option<&'static str>,
}

impl MockResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: Some("application/json"),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
            content_type: Some("text/plain"),
        }
    }

    /// A body sent verbatim under an arbitrary content type.
    pub fn raw(status: u16, content_type: &'static str, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
            content_type: Some(content_type),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            content_type: None,
        }
    }
}

/// Scripted HTTP server: answers one request per queued response, in order,
/// and records what it received.
pub struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<JoinHandle<()>>,
}

impl MockServer {
    pub fn start(responses: Vec<MockResponse>) -> Result<Self> {
        let server =
            Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
        let base_url = format!("http://{}/api", server.server_addr());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        let handle = thread::spawn(move || {
            for scripted in responses {
                let mut request = match server.recv_timeout(Duration::from_secs(5)) {
                    Ok(Some(request)) => request,
                    _ => return,
                };
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let content_type = request
                    .headers()
                    .iter()
                    .find(|header| header.field.equiv("Content-Type"))
                    .map(|header| header.value.as_str().to_owned());
                if let Ok(mut log) = recorded.lock() {
                    log.push(RecordedRequest {
                        method: request.method().as_str().to_owned(),
                        url: request.url().to_owned(),
                        content_type,
                        body,
                    });
                }

                let mut response =
                    Response::from_string(scripted.body).with_status_code(scripted.status);
                if let Some(content_type) = scripted.content_type
                    && let Ok(header) = Header::from_bytes("Content-Type", content_type)
                {
                    response = response.with_header(header);
                }
                let _ = request.respond(response);
            }
        });

        Ok(Self {
            base_url,
            requests,
            handle: Some(handle),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Waits for the scripted responses to drain and returns the requests.
    pub fn finish(mut self) -> Result<Vec<RecordedRequest>> {
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| anyhow!("mock server thread panicked"))?;
        }
        let requests = self
            .requests
            .lock()
            .map_err(|_| anyhow!("mock server request log poisoned"))?;
        Ok(requests.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{FleetFaker, sample_employee, sample_summary};
    use deskfleet_app::{Office, forms::is_valid_email, forms::is_valid_serial};
    use std::collections::BTreeSet;

    #[test]
    fn faker_ids_are_unique_and_increasing() {
        let mut faker = FleetFaker::new(7);
        let employees = faker.employees(5);
        let computers = faker.computers(5);
        let ids: Vec<i64> = employees
            .iter()
            .map(|employee| employee.id.get())
            .chain(computers.iter().map(|computer| computer.id.get()))
            .collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn faker_records_pass_form_rules() {
        let mut faker = FleetFaker::new(11);
        for employee in faker.employees(20) {
            assert!(is_valid_email(&employee.email), "email {}", employee.email);
            assert!(Office::parse(&employee.office).is_some());
        }
        for computer in faker.computers(20) {
            assert!(is_valid_serial(&computer.serial_no), "serial {}", computer.serial_no);
            assert!(!computer.name.is_empty());
        }
    }

    #[test]
    fn variety_across_seeds() {
        let mut names = BTreeSet::new();
        for seed in 0_u64..20_u64 {
            let mut faker = FleetFaker::new(seed);
            names.insert(faker.employee().display_name());
        }
        assert!(names.len() >= 10, "got {}", names.len());
    }

    #[test]
    fn summary_links_assignment_to_both_sides() {
        let summary = sample_summary(sample_employee(3), Some(super::sample_computer(4)));
        let assignment = summary.assignment.expect("assignment present");
        assert_eq!(assignment.employee_id.get(), 3);
        assert_eq!(assignment.computer_id.get(), 4);
    }
}
