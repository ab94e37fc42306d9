// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Office {
    #[serde(rename = "Heber City Office")]
    HeberCity,
    #[serde(rename = "West Valley Office")]
    WestValley,
    #[serde(rename = "So. Idaho")]
    SouthIdaho,
    #[serde(rename = "Utah Valley")]
    UtahValley,
}

impl Office {
    pub const ALL: [Self; 4] = [
        Self::HeberCity,
        Self::WestValley,
        Self::SouthIdaho,
        Self::UtahValley,
    ];

    pub const LABELS: [&'static str; 4] = [
        "Heber City Office",
        "West Valley Office",
        "So. Idaho",
        "Utah Valley",
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HeberCity => "Heber City Office",
            Self::WestValley => "West Valley Office",
            Self::SouthIdaho => "So. Idaho",
            Self::UtahValley => "Utah Valley",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|office| office.as_str() == value.trim())
    }

    /// Cycles through no filter and then each office in order.
    pub fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::ALL[0]),
            Some(office) => {
                let index = Self::ALL
                    .iter()
                    .position(|candidate| *candidate == office)
                    .unwrap_or(0);
                Self::ALL.get(index + 1).copied()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub const LABELS: [&'static str; 2] = ["Active", "Inactive"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Active" => Some(Self::Active),
            "Inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Employee,
    Computers,
    Monitors,
    BatteryBackup,
    Peripheral,
    Survey,
}

impl Category {
    pub const ALL: [Self; 6] = [
        Self::Employee,
        Self::Computers,
        Self::Monitors,
        Self::BatteryBackup,
        Self::Peripheral,
        Self::Survey,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Computers => "computers",
            Self::Monitors => "monitors",
            Self::BatteryBackup => "battery_backup",
            Self::Peripheral => "peripheral",
            Self::Survey => "survey",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "employee" => Some(Self::Employee),
            "computers" => Some(Self::Computers),
            "monitors" => Some(Self::Monitors),
            "battery_backup" => Some(Self::BatteryBackup),
            "peripheral" => Some(Self::Peripheral),
            "survey" => Some(Self::Survey),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Computers => "Computers",
            Self::Monitors => "Monitors",
            Self::BatteryBackup => "Battery Backup",
            Self::Peripheral => "Peripheral",
            Self::Survey => "Survey",
        }
    }

    /// Only employees and computers have server endpoints behind them.
    pub const fn is_backed(self) -> bool {
        matches!(self, Self::Employee | Self::Computers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub office: String,
    #[serde(default)]
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_phone: Option<String>,
}

impl Employee {
    pub fn display_name(&self) -> String {
        if let Some(full_name) = self.full_name.as_deref()
            && !full_name.trim().is_empty()
        {
            return full_name.trim().to_owned();
        }
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Computer {
    pub id: ComputerId,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub serial_no: String,
    #[serde(default)]
    pub office: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: AssignmentId,
    pub employee_id: EmployeeId,
    pub computer_id: ComputerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<String>,
}

impl Assignment {
    pub fn assigned_on(&self) -> Option<Date> {
        self.assigned_at.as_deref().and_then(parse_timestamp_date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub employee: Option<Employee>,
    #[serde(default)]
    pub computer: Option<Computer>,
    #[serde(default)]
    pub assignment: Option<Assignment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    #[serde(default)]
    pub employees_without_computer: Vec<Employee>,
    #[serde(default)]
    pub computers_without_employee: Vec<Computer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentListing {
    #[serde(default)]
    pub assignment_id: Option<AssignmentId>,
    #[serde(default)]
    pub employee: Option<Employee>,
    #[serde(default)]
    pub computer: Option<Computer>,
    #[serde(default)]
    pub assigned_at: Option<String>,
}

impl AssignmentListing {
    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.employee.as_ref().map(|employee| employee.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub last: Option<bool>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
            last: None,
        }
    }
}

impl<T> Page<T> {
    /// A page without an explicit `last` flag is the last one when it is
    /// short or the reported page count is exhausted.
    pub fn is_last(&self, page: usize, size: usize) -> bool {
        match self.last {
            Some(last) => last,
            None => self.content.len() < size || page + 1 >= self.total_pages,
        }
    }
}

pub fn parse_timestamp_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(value) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(value.date());
    }
    if let Ok(value) = PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT) {
        return Some(value.date());
    }
    Date::parse(raw, &Iso8601::DEFAULT).ok()
}

pub fn format_short_date(date: Date) -> String {
    let month = match date.month() {
        time::Month::January => "Jan",
        time::Month::February => "Feb",
        time::Month::March => "Mar",
        time::Month::April => "Apr",
        time::Month::May => "May",
        time::Month::June => "Jun",
        time::Month::July => "Jul",
        time::Month::August => "Aug",
        time::Month::September => "Sep",
        time::Month::October => "Oct",
        time::Month::November => "Nov",
        time::Month::December => "Dec",
    };
    format!("{month} {}, {}", date.day(), date.year())
}
