// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use std::fmt::Debug;
use tracing::warn;

use crate::{
    ApiError, ApiErrorKind, Computer, ComputerId, Employee, EmployeeId, EmployeeStatus,
    FieldErrors, Office,
};

/// Key used for errors that belong to the whole form rather than one field.
pub const FORM_ERROR_KEY: &str = "form";

pub trait FormField: Copy + Eq + Debug + 'static {
    const ALL: &'static [Self];

    /// Field name as the server spells it.
    fn as_str(self) -> &'static str;
    fn label(self) -> &'static str;
    fn required(self) -> bool;

    /// Fixed options for select-style fields, empty for free text.
    fn choices(self) -> &'static [&'static str] {
        &[]
    }
}

pub trait FormInput: Clone + Default + PartialEq + Debug {
    type Field: FormField;
    type Record: Clone + Debug + PartialEq;
    type Id: Copy + Eq + Debug;
    type Payload: Serialize + Clone + PartialEq + Debug;

    const NOUN: &'static str;
    const SELECT_FIRST: &'static str;

    fn value(&self, field: Self::Field) -> &str;
    fn set_value(&mut self, field: Self::Field, value: String);
    fn validate(&self) -> FieldErrors;
    fn sanitize(&self) -> Self::Payload;
    fn from_record(record: &Self::Record) -> Self;
    fn record_id(record: &Self::Record) -> Self::Id;
    fn record_label(record: &Self::Record) -> String;

    /// Field that absorbs a uniqueness conflict of the given kind.
    fn conflict_field(kind: ApiErrorKind) -> Option<(Self::Field, &'static str)>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EmployeeField {
    FirstName,
    LastName,
    Email,
    Office,
    Department,
    Status,
    Extension,
    CellPhone,
}

impl FormField for EmployeeField {
    const ALL: &'static [Self] = &[
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Office,
        Self::Department,
        Self::Status,
        Self::Extension,
        Self::CellPhone,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Office => "office",
            Self::Department => "department",
            Self::Status => "status",
            Self::Extension => "extension",
            Self::CellPhone => "cellPhone",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::Office => "Office",
            Self::Department => "Department",
            Self::Status => "Status",
            Self::Extension => "Extension",
            Self::CellPhone => "Cell phone",
        }
    }

    fn required(self) -> bool {
        matches!(
            self,
            Self::FirstName | Self::LastName | Self::Email | Self::Office | Self::Department
        )
    }

    fn choices(self) -> &'static [&'static str] {
        match self {
            Self::Office => &Office::LABELS,
            Self::Status => &EmployeeStatus::LABELS,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ComputerField {
    Model,
    Name,
    SerialNo,
    Office,
    Division,
    Ram,
    Processor,
    Os,
}

impl FormField for ComputerField {
    const ALL: &'static [Self] = &[
        Self::Model,
        Self::Name,
        Self::SerialNo,
        Self::Office,
        Self::Division,
        Self::Ram,
        Self::Processor,
        Self::Os,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Name => "name",
            Self::SerialNo => "serialNo",
            Self::Office => "office",
            Self::Division => "division",
            Self::Ram => "ram",
            Self::Processor => "processor",
            Self::Os => "os",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::Name => "Name",
            Self::SerialNo => "Serial number",
            Self::Office => "Office",
            Self::Division => "Division",
            Self::Ram => "RAM",
            Self::Processor => "Processor",
            Self::Os => "Operating system",
        }
    }

    fn required(self) -> bool {
        matches!(
            self,
            Self::Model | Self::Name | Self::SerialNo | Self::Office
        )
    }

    fn choices(self) -> &'static [&'static str] {
        match self {
            Self::Office => &Office::LABELS,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFormInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub office: String,
    pub department: String,
    pub status: String,
    pub extension: String,
    pub cell_phone: String,
}

impl Default for EmployeeFormInput {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            office: String::new(),
            department: String::new(),
            status: EmployeeStatus::Active.as_str().to_owned(),
            extension: String::new(),
            cell_phone: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub office: String,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_phone: Option<String>,
}

impl FormInput for EmployeeFormInput {
    type Field = EmployeeField;
    type Record = Employee;
    type Id = EmployeeId;
    type Payload = EmployeePayload;

    const NOUN: &'static str = "employee";
    const SELECT_FIRST: &'static str = "Select an employee first.";

    fn value(&self, field: EmployeeField) -> &str {
        match field {
            EmployeeField::FirstName => &self.first_name,
            EmployeeField::LastName => &self.last_name,
            EmployeeField::Email => &self.email,
            EmployeeField::Office => &self.office,
            EmployeeField::Department => &self.department,
            EmployeeField::Status => &self.status,
            EmployeeField::Extension => &self.extension,
            EmployeeField::CellPhone => &self.cell_phone,
        }
    }

    fn set_value(&mut self, field: EmployeeField, value: String) {
        let slot = match field {
            EmployeeField::FirstName => &mut self.first_name,
            EmployeeField::LastName => &mut self.last_name,
            EmployeeField::Email => &mut self.email,
            EmployeeField::Office => &mut self.office,
            EmployeeField::Department => &mut self.department,
            EmployeeField::Status => &mut self.status,
            EmployeeField::Extension => &mut self.extension,
            EmployeeField::CellPhone => &mut self.cell_phone,
        };
        *slot = value;
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let mut fail = |field: EmployeeField, message: &str| {
            errors.insert(field.as_str().to_owned(), message.to_owned());
        };

        if self.first_name.trim().is_empty() {
            fail(EmployeeField::FirstName, "Please enter the first name.");
        }
        if self.last_name.trim().is_empty() {
            fail(EmployeeField::LastName, "Please enter the last name.");
        }
        let email = self.email.trim();
        if email.is_empty() {
            fail(EmployeeField::Email, "Please enter the email address.");
        } else if !is_valid_email(email) {
            fail(EmployeeField::Email, "Enter a valid email.");
        }
        if self.office.trim().is_empty() {
            fail(EmployeeField::Office, "Select an office.");
        }
        if self.department.trim().is_empty() {
            fail(EmployeeField::Department, "Enter a department.");
        }
        let extension = self.extension.trim();
        if !extension.is_empty() && !is_valid_extension(extension) {
            fail(EmployeeField::Extension, "Use only numbers, spaces, or dashes.");
        }
        let cell_phone = self.cell_phone.trim();
        if !cell_phone.is_empty() && !is_valid_phone(cell_phone) {
            fail(
                EmployeeField::CellPhone,
                "Use only numbers, spaces, parentheses, or dashes.",
            );
        }
        errors
    }

    fn sanitize(&self) -> EmployeePayload {
        EmployeePayload {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            office: self.office.trim().to_owned(),
            department: self.department.trim().to_owned(),
            status: non_empty(&self.status),
            extension: non_empty(&self.extension),
            cell_phone: non_empty(&self.cell_phone),
        }
    }

    fn from_record(record: &Employee) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            office: record.office.clone(),
            department: record.department.clone(),
            status: record
                .status
                .unwrap_or(EmployeeStatus::Active)
                .as_str()
                .to_owned(),
            extension: record.extension.clone().unwrap_or_default(),
            cell_phone: record.cell_phone.clone().unwrap_or_default(),
        }
    }

    fn record_id(record: &Employee) -> EmployeeId {
        record.id
    }

    fn record_label(record: &Employee) -> String {
        record.display_name()
    }

    fn conflict_field(kind: ApiErrorKind) -> Option<(EmployeeField, &'static str)> {
        match kind {
            ApiErrorKind::EmailTaken => {
                Some((EmployeeField::Email, "This email is already registered."))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputerFormInput {
    pub model: String,
    pub name: String,
    pub serial_no: String,
    pub office: String,
    pub division: String,
    pub ram: String,
    pub processor: String,
    pub os: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerPayload {
    pub model: String,
    pub name: String,
    pub serial_no: String,
    pub office: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
}

impl FormInput for ComputerFormInput {
    type Field = ComputerField;
    type Record = Computer;
    type Id = ComputerId;
    type Payload = ComputerPayload;

    const NOUN: &'static str = "computer";
    const SELECT_FIRST: &'static str = "Select a computer first.";

    fn value(&self, field: ComputerField) -> &str {
        match field {
            ComputerField::Model => &self.model,
            ComputerField::Name => &self.name,
            ComputerField::SerialNo => &self.serial_no,
            ComputerField::Office => &self.office,
            ComputerField::Division => &self.division,
            ComputerField::Ram => &self.ram,
            ComputerField::Processor => &self.processor,
            ComputerField::Os => &self.os,
        }
    }

    fn set_value(&mut self, field: ComputerField, value: String) {
        let slot = match field {
            ComputerField::Model => &mut self.model,
            ComputerField::Name => &mut self.name,
            ComputerField::SerialNo => &mut self.serial_no,
            ComputerField::Office => &mut self.office,
            ComputerField::Division => &mut self.division,
            ComputerField::Ram => &mut self.ram,
            ComputerField::Processor => &mut self.processor,
            ComputerField::Os => &mut self.os,
        };
        *slot = value;
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let mut fail = |field: ComputerField, message: &str| {
            errors.insert(field.as_str().to_owned(), message.to_owned());
        };

        if self.model.trim().is_empty() {
            fail(ComputerField::Model, "Enter the model.");
        }
        if self.name.trim().is_empty() {
            fail(ComputerField::Name, "Enter the computer name.");
        }
        let serial = self.serial_no.trim();
        if serial.is_empty() {
            fail(ComputerField::SerialNo, "Enter the serial number.");
        } else if !is_valid_serial(serial) {
            fail(ComputerField::SerialNo, "Use only letters, numbers, or dashes.");
        }
        if self.office.trim().is_empty() {
            fail(ComputerField::Office, "Select an office.");
        }
        errors
    }

    fn sanitize(&self) -> ComputerPayload {
        ComputerPayload {
            model: self.model.trim().to_owned(),
            name: self.name.trim().to_owned(),
            serial_no: self.serial_no.trim().to_uppercase(),
            office: self.office.trim().to_owned(),
            division: non_empty(&self.division),
            ram: non_empty(&self.ram),
            processor: non_empty(&self.processor),
            os: non_empty(&self.os),
        }
    }

    fn from_record(record: &Computer) -> Self {
        Self {
            model: record.model.clone(),
            name: record.name.clone(),
            serial_no: record.serial_no.clone(),
            office: record.office.clone(),
            division: record.division.clone().unwrap_or_default(),
            ram: record.ram.clone().unwrap_or_default(),
            processor: record.processor.clone().unwrap_or_default(),
            os: record.os.clone().unwrap_or_default(),
        }
    }

    fn record_id(record: &Computer) -> ComputerId {
        record.id
    }

    fn record_label(record: &Computer) -> String {
        record.name.clone()
    }

    fn conflict_field(kind: ApiErrorKind) -> Option<(ComputerField, &'static str)> {
        match kind {
            ApiErrorKind::SerialTaken | ApiErrorKind::DataIntegrity => Some((
                ComputerField::SerialNo,
                "This serial number is already registered.",
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    /// Fields stay locked until a record is selected and loaded.
    Update { selected: Option<Id>, loading: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission<Id, Payload> {
    /// `None` for a create, the record being replaced for an update.
    pub target: Option<Id>,
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState<I: FormInput> {
    pub input: I,
    pub mode: FormMode<I::Id>,
    pub phase: FormPhase,
    pub errors: FieldErrors,
    pub banner: Option<String>,
}

impl<I: FormInput> FormState<I> {
    pub fn create() -> Self {
        Self {
            input: I::default(),
            mode: FormMode::Create,
            phase: FormPhase::Idle,
            errors: FieldErrors::new(),
            banner: None,
        }
    }

    pub fn update() -> Self {
        Self {
            mode: FormMode::Update {
                selected: None,
                loading: false,
            },
            ..Self::create()
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self.mode, FormMode::Update { .. })
    }

    pub fn selected(&self) -> Option<I::Id> {
        match self.mode {
            FormMode::Create => None,
            FormMode::Update { selected, .. } => selected,
        }
    }

    pub fn is_editable(&self) -> bool {
        if self.phase == FormPhase::Submitting {
            return false;
        }
        match self.mode {
            FormMode::Create => true,
            FormMode::Update { selected, loading } => selected.is_some() && !loading,
        }
    }

    pub fn error(&self, field: I::Field) -> Option<&str> {
        self.errors.get(field.as_str()).map(String::as_str)
    }

    /// Replaces one field and drops only that field's error.
    pub fn edit(&mut self, field: I::Field, value: String) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.input.set_value(field, value);
        self.errors.remove(field.as_str());
        true
    }

    pub fn begin_submit(&mut self) -> Option<Submission<I::Id, I::Payload>> {
        if self.phase == FormPhase::Submitting {
            return None;
        }
        let target = match self.mode {
            FormMode::Create => None,
            FormMode::Update { selected: None, .. } => {
                self.errors
                    .insert(FORM_ERROR_KEY.to_owned(), I::SELECT_FIRST.to_owned());
                self.banner = Some(I::SELECT_FIRST.to_owned());
                return None;
            }
            FormMode::Update { loading: true, .. } => return None,
            FormMode::Update { selected, .. } => selected,
        };

        let errors = self.input.validate();
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }

        self.errors.clear();
        self.banner = None;
        self.phase = FormPhase::Submitting;
        Some(Submission {
            target,
            payload: self.input.sanitize(),
        })
    }

    pub fn finish_submit(&mut self, result: Result<I::Record, ApiError>) -> Option<I::Record> {
        self.phase = FormPhase::Idle;
        match result {
            Ok(record) => {
                self.errors.clear();
                self.banner = None;
                match self.mode {
                    FormMode::Create => self.input = I::default(),
                    FormMode::Update { .. } => self.input = I::from_record(&record),
                }
                Some(record)
            }
            Err(error) => {
                warn!(noun = I::NOUN, status = error.status, error = %error, "form submit failed");
                self.absorb_error(&error);
                None
            }
        }
    }

    /// Locks the form and asks for a record to pre-populate from.
    pub fn begin_load(&mut self, id: I::Id) -> Option<I::Id> {
        if !self.is_update() || self.phase == FormPhase::Submitting {
            return None;
        }
        self.mode = FormMode::Update {
            selected: Some(id),
            loading: true,
        };
        self.errors.clear();
        self.banner = None;
        Some(id)
    }

    pub fn finish_load(&mut self, id: I::Id, result: Result<I::Record, ApiError>) {
        let FormMode::Update {
            selected: Some(current),
            ..
        } = self.mode
        else {
            return;
        };
        if current != id {
            return;
        }
        match result {
            Ok(record) => {
                self.input = I::from_record(&record);
                self.mode = FormMode::Update {
                    selected: Some(id),
                    loading: false,
                };
            }
            Err(error) => {
                warn!(noun = I::NOUN, error = %error, "form prefill failed");
                self.input = I::default();
                self.mode = FormMode::Update {
                    selected: None,
                    loading: false,
                };
                self.banner = Some(
                    error
                        .message_or(&format!("We couldn't load the {}.", I::NOUN))
                        .to_owned(),
                );
            }
        }
    }

    fn absorb_error(&mut self, error: &ApiError) {
        let verb = if self.is_update() { "update" } else { "create" };
        // Field details replace the banner; without them the message is shown.
        if error.kind == ApiErrorKind::Validation && !error.fields.is_empty() {
            for (field, message) in &error.fields {
                self.errors.insert(field.clone(), message.clone());
            }
            return;
        }
        if let Some((field, message)) = I::conflict_field(error.kind) {
            self.errors
                .insert(field.as_str().to_owned(), message.to_owned());
            return;
        }
        if error.is_server_failure() || error.kind == ApiErrorKind::DataIntegrity {
            self.banner = Some(format!(
                "We couldn't {verb} the {}. Try again in a few minutes.",
                I::NOUN
            ));
            return;
        }
        let fallback = format!("We couldn't {verb} the {}. Please try again.", I::NOUN);
        self.banner = Some(error.message_or(&fallback).to_owned());
    }
}

/// Side list of existing records that an update form picks from.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePanel<I: FormInput> {
    pub form: FormState<I>,
    pub records: Vec<I::Record>,
    pub cursor: usize,
    pub loading: bool,
    pub list_error: Option<String>,
}

/// Size of the record list shown beside an update form.
pub const UPDATE_LIST_SIZE: usize = 100;

impl<I: FormInput> Default for UpdatePanel<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: FormInput> UpdatePanel<I> {
    pub fn new() -> Self {
        Self {
            form: FormState::update(),
            records: Vec::new(),
            cursor: 0,
            loading: true,
            list_error: None,
        }
    }

    pub fn apply_records(&mut self, result: Result<Vec<I::Record>, ApiError>) {
        self.loading = false;
        match result {
            Ok(records) => {
                self.records = records;
                self.list_error = None;
            }
            Err(error) => {
                warn!(noun = I::NOUN, error = %error, "record list failed");
                self.records.clear();
                self.list_error = Some(
                    error
                        .message_or(&format!("We couldn't load the {} list.", I::NOUN))
                        .to_owned(),
                );
            }
        }
        self.cursor = self.cursor.min(self.records.len().saturating_sub(1));
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.records.is_empty() {
            self.cursor = 0;
            return;
        }
        let max = self.records.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, max) as usize;
    }

    /// Starts a prefill for the record under the cursor.
    pub fn choose(&mut self) -> Option<I::Id> {
        let id = self.records.get(self.cursor).map(I::record_id)?;
        self.form.begin_load(id)
    }

    pub fn finish_submit(&mut self, result: Result<I::Record, ApiError>) -> Option<I::Record> {
        let record = self.form.finish_submit(result)?;
        let id = I::record_id(&record);
        if let Some(existing) = self
            .records
            .iter_mut()
            .find(|candidate| I::record_id(candidate) == id)
        {
            *existing = record.clone();
        }
        Some(record)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len())
}

pub fn is_valid_serial(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

pub fn is_valid_extension(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || c == '-')
}

pub fn is_valid_phone(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| {
            c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '(' | ')')
        })
}

#[cfg(test)]
mod tests {
    use super::{
        ComputerField, ComputerFormInput, EmployeeField, EmployeeFormInput, FORM_ERROR_KEY,
        FormInput, FormMode, FormPhase, FormState, UpdatePanel, is_valid_email,
        is_valid_phone,
    };
    use crate::{ApiError, Computer, ComputerId, Employee, EmployeeId, EmployeeStatus};
    use serde_json::json;

    fn filled_employee() -> EmployeeFormInput {
        EmployeeFormInput {
            first_name: " Ana ".to_owned(),
            last_name: "Reyes".to_owned(),
            email: "ana.reyes@example.com".to_owned(),
            office: "Utah Valley".to_owned(),
            department: "Finance".to_owned(),
            status: "Active".to_owned(),
            extension: String::new(),
            cell_phone: "(801) 555-0101".to_owned(),
        }
    }

    fn filled_computer() -> ComputerFormInput {
        ComputerFormInput {
            model: "Latitude 7440".to_owned(),
            name: "FIN-LT-04".to_owned(),
            serial_no: "abc-123".to_owned(),
            office: "So. Idaho".to_owned(),
            ..ComputerFormInput::default()
        }
    }

    fn stored_employee() -> Employee {
        Employee {
            id: EmployeeId::new(9),
            first_name: "Ana".to_owned(),
            last_name: "Reyes".to_owned(),
            full_name: None,
            email: "ana.reyes@example.com".to_owned(),
            office: "Utah Valley".to_owned(),
            department: "Finance".to_owned(),
            status: Some(EmployeeStatus::Inactive),
            extension: Some("42".to_owned()),
            cell_phone: None,
        }
    }

    fn server_error(status: u16, body: serde_json::Value) -> ApiError {
        ApiError::from_response(status, "", Some(&body))
    }

    #[test]
    fn empty_first_name_blocks_submit() {
        let mut form = FormState::<EmployeeFormInput>::create();
        form.input = EmployeeFormInput {
            first_name: "   ".to_owned(),
            ..filled_employee()
        };

        assert!(form.begin_submit().is_none());
        assert_eq!(
            form.error(EmployeeField::FirstName),
            Some("Please enter the first name.")
        );
        assert_eq!(form.phase, FormPhase::Idle);
    }

    #[test]
    fn employee_validation_covers_contact_fields() {
        let input = EmployeeFormInput {
            email: "ana@example".to_owned(),
            extension: "12a".to_owned(),
            cell_phone: "555+0101".to_owned(),
            office: String::new(),
            ..filled_employee()
        };
        let errors = input.validate();
        assert_eq!(errors["email"], "Enter a valid email.");
        assert_eq!(errors["extension"], "Use only numbers, spaces, or dashes.");
        assert_eq!(
            errors["cellPhone"],
            "Use only numbers, spaces, parentheses, or dashes."
        );
        assert_eq!(errors["office"], "Select an office.");
        assert!(!errors.contains_key("firstName"));
    }

    #[test]
    fn editing_clears_only_that_field_error() {
        let mut form = FormState::<EmployeeFormInput>::create();
        assert!(form.begin_submit().is_none());
        assert!(form.error(EmployeeField::FirstName).is_some());
        assert!(form.error(EmployeeField::LastName).is_some());

        assert!(form.edit(EmployeeField::FirstName, "Ana".to_owned()));
        assert!(form.error(EmployeeField::FirstName).is_none());
        assert!(form.error(EmployeeField::LastName).is_some());
    }

    #[test]
    fn employee_payload_is_trimmed_and_omits_empty_optionals() {
        let mut form = FormState::<EmployeeFormInput>::create();
        form.input = filled_employee();
        let submission = form.begin_submit().expect("valid form submits");
        assert_eq!(submission.target, None);
        assert_eq!(form.phase, FormPhase::Submitting);

        let body = serde_json::to_value(&submission.payload).expect("encode payload");
        assert_eq!(
            body,
            json!({
                "firstName": "Ana",
                "lastName": "Reyes",
                "email": "ana.reyes@example.com",
                "office": "Utah Valley",
                "department": "Finance",
                "status": "Active",
                "cellPhone": "(801) 555-0101",
            })
        );
    }

    #[test]
    fn computer_serial_is_uppercased() {
        let mut form = FormState::<ComputerFormInput>::create();
        form.input = filled_computer();
        let submission = form.begin_submit().expect("valid form submits");
        assert_eq!(submission.payload.serial_no, "ABC-123");
        let body = serde_json::to_value(&submission.payload).expect("encode payload");
        assert!(body.get("division").is_none());
        assert_eq!(body["serialNo"], "ABC-123");
    }

    #[test]
    fn computer_serial_rejects_other_characters() {
        let input = ComputerFormInput {
            serial_no: "ABC 123".to_owned(),
            ..filled_computer()
        };
        assert_eq!(
            input.validate()["serialNo"],
            "Use only letters, numbers, or dashes."
        );
    }

    #[test]
    fn submitting_twice_is_ignored() {
        let mut form = FormState::<ComputerFormInput>::create();
        form.input = filled_computer();
        assert!(form.begin_submit().is_some());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn create_success_resets_input() {
        let mut form = FormState::<ComputerFormInput>::create();
        form.input = filled_computer();
        form.begin_submit().expect("valid form submits");
        let record = Computer {
            id: ComputerId::new(4),
            model: "Latitude 7440".to_owned(),
            name: "FIN-LT-04".to_owned(),
            serial_no: "ABC-123".to_owned(),
            office: "So. Idaho".to_owned(),
            division: None,
            ram: None,
            processor: None,
            os: None,
        };
        let saved = form.finish_submit(Ok(record.clone()));
        assert_eq!(saved, Some(record));
        assert_eq!(form.input, ComputerFormInput::default());
        assert_eq!(form.phase, FormPhase::Idle);
    }

    #[test]
    fn server_validation_merges_into_field_errors() {
        let mut form = FormState::<EmployeeFormInput>::create();
        form.input = filled_employee();
        form.begin_submit().expect("valid form submits");
        form.finish_submit(Err(server_error(
            400,
            json!({
                "code": "VALIDATION_ERROR",
                "message": "Validation failed",
                "details": {"department": ["is unknown"]},
            }),
        )));
        assert_eq!(form.error(EmployeeField::Department), Some("is unknown"));
        assert!(form.banner.is_none());
    }

    #[test]
    fn server_validation_without_details_uses_the_banner() {
        let mut form = FormState::<EmployeeFormInput>::create();
        form.input = filled_employee();
        form.begin_submit().expect("valid form submits");
        form.finish_submit(Err(server_error(
            400,
            json!({"code": "VALIDATION_ERROR", "message": "Office is closed"}),
        )));
        assert!(form.errors.is_empty());
        assert_eq!(form.banner.as_deref(), Some("Office is closed"));
    }

    #[test]
    fn data_integrity_lands_on_serial_for_computers_only() {
        let body = json!({"code": "DATA_INTEGRITY_ERROR", "message": "constraint"});

        let mut computer = FormState::<ComputerFormInput>::create();
        computer.input = filled_computer();
        computer.begin_submit().expect("valid form submits");
        computer.finish_submit(Err(server_error(409, body.clone())));
        assert_eq!(
            computer.error(ComputerField::SerialNo),
            Some("This serial number is already registered.")
        );
        assert!(computer.banner.is_none());

        let mut employee = FormState::<EmployeeFormInput>::create();
        employee.input = filled_employee();
        employee.begin_submit().expect("valid form submits");
        employee.finish_submit(Err(server_error(409, body)));
        assert_eq!(
            employee.banner.as_deref(),
            Some("We couldn't create the employee. Try again in a few minutes.")
        );
    }

    #[test]
    fn uniqueness_conflicts_land_on_their_field() {
        let mut employee = FormState::<EmployeeFormInput>::create();
        employee.input = filled_employee();
        employee.begin_submit().expect("valid form submits");
        employee.finish_submit(Err(server_error(
            409,
            json!({"code": "EMAIL_ALREADY_EXISTS", "message": "duplicate"}),
        )));
        assert_eq!(
            employee.error(EmployeeField::Email),
            Some("This email is already registered.")
        );

        let mut computer = FormState::<ComputerFormInput>::create();
        computer.input = filled_computer();
        computer.begin_submit().expect("valid form submits");
        computer.finish_submit(Err(server_error(
            409,
            json!({"code": "SERIAL_ALREADY_EXISTS", "message": "duplicate"}),
        )));
        assert_eq!(
            computer.error(ComputerField::SerialNo),
            Some("This serial number is already registered.")
        );
    }

    #[test]
    fn server_failures_show_generic_banner() {
        let mut form = FormState::<EmployeeFormInput>::create();
        form.input = filled_employee();
        form.begin_submit().expect("valid form submits");
        form.finish_submit(Err(server_error(
            500,
            json!({"code": "INTERNAL_ERROR", "message": "stack trace"}),
        )));
        assert_eq!(
            form.banner.as_deref(),
            Some("We couldn't create the employee. Try again in a few minutes.")
        );
        assert!(form.errors.is_empty());
    }

    #[test]
    fn other_failures_show_their_message() {
        let mut form = FormState::<EmployeeFormInput>::create();
        form.input = filled_employee();
        form.begin_submit().expect("valid form submits");
        form.finish_submit(Err(ApiError::network("http://127.0.0.1:1", "refused")));
        let banner = form.banner.expect("banner set");
        assert!(banner.starts_with("cannot reach http://127.0.0.1:1"));
    }

    #[test]
    fn update_without_selection_is_rejected_locally() {
        let mut form = FormState::<EmployeeFormInput>::update();
        form.input = filled_employee();
        assert!(!form.is_editable());
        assert!(form.begin_submit().is_none());
        assert_eq!(
            form.errors.get(FORM_ERROR_KEY).map(String::as_str),
            Some("Select an employee first.")
        );
        assert_eq!(form.banner.as_deref(), Some("Select an employee first."));
    }

    #[test]
    fn update_prefills_after_load_and_targets_selection() {
        let mut panel = UpdatePanel::<EmployeeFormInput>::new();
        panel.apply_records(Ok(vec![stored_employee()]));
        let id = panel.choose().expect("record under cursor");
        assert_eq!(
            panel.form.mode,
            FormMode::Update {
                selected: Some(id),
                loading: true
            }
        );
        assert!(!panel.form.edit(EmployeeField::Department, "Ops".to_owned()));

        panel.form.finish_load(id, Ok(stored_employee()));
        assert_eq!(panel.form.input.status, "Inactive");
        assert_eq!(panel.form.input.extension, "42");
        assert!(panel.form.edit(EmployeeField::Department, "Ops".to_owned()));

        let submission = panel.form.begin_submit().expect("valid form submits");
        assert_eq!(submission.target, Some(EmployeeId::new(9)));

        let mut updated = stored_employee();
        updated.department = "Ops".to_owned();
        let saved = panel.finish_submit(Ok(updated.clone()));
        assert_eq!(saved, Some(updated.clone()));
        assert_eq!(panel.records, vec![updated]);
        assert_eq!(panel.form.input.department, "Ops");
    }

    #[test]
    fn stale_prefill_is_ignored() {
        let mut form = FormState::<EmployeeFormInput>::update();
        form.begin_load(EmployeeId::new(1));
        form.begin_load(EmployeeId::new(9));
        let mut other = stored_employee();
        other.id = EmployeeId::new(1);
        other.first_name = "Stale".to_owned();
        form.finish_load(EmployeeId::new(1), Ok(other));
        assert_eq!(form.input, EmployeeFormInput::default());
        form.finish_load(EmployeeId::new(9), Ok(stored_employee()));
        assert_eq!(form.input.first_name, "Ana");
    }

    #[test]
    fn update_banner_uses_update_wording() {
        let mut form = FormState::<ComputerFormInput>::update();
        form.begin_load(ComputerId::new(2));
        form.finish_load(
            ComputerId::new(2),
            Ok(Computer {
                id: ComputerId::new(2),
                model: "OptiPlex".to_owned(),
                name: "HQ-DT-02".to_owned(),
                serial_no: "SN-2".to_owned(),
                office: "Utah Valley".to_owned(),
                division: None,
                ram: None,
                processor: None,
                os: None,
            }),
        );
        form.begin_submit().expect("valid form submits");
        form.finish_submit(Err(ApiError::from_response(503, "503 Service Unavailable", None)));
        assert_eq!(
            form.banner.as_deref(),
            Some("We couldn't update the computer. Try again in a few minutes.")
        );
    }

    #[test]
    fn pattern_helpers() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@b@c.de"));
        assert!(is_valid_phone("(801) 555-0101"));
        assert!(!is_valid_phone("+1 801"));
    }
}
