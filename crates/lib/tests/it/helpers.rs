use std::cell::Cell;
use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use remap::Error;
use remap::adaptor::{Adaptor, AdaptorError, Handle, InMemory, Record};
use remap::mapping::{BindKey, BindOptions, Mapping, MappingContext};
use remap::value::{KeyPathBuf, Value};

// ==========================
// TEST DOMAIN MODEL
// ==========================
// A two-level company → employees model exercising scalar, date, optional
// relationship and collection bindings over in-memory stores.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Employee {
    pub uuid: String,
    pub name: String,
    pub join_date: DateTime<Utc>,
    pub salary: i64,
    pub is_employee_of_month: bool,
    pub percent_yearly_raise: f64,
}

impl Record for Employee {
    fn field(&self, keypath: &str) -> Option<Value> {
        match keypath {
            "uuid" => Some(Value::from(self.uuid.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Company {
    pub uuid: String,
    pub name: String,
    pub founding_date: DateTime<Utc>,
    pub founder: Option<Handle<Employee>>,
    pub employees: Vec<Handle<Employee>>,
    pub pending_lawsuits: i64,
}

impl Record for Company {
    fn field(&self, keypath: &str) -> Option<Value> {
        match keypath {
            "data.uuid" => Some(Value::from(self.uuid.clone())),
            _ => None,
        }
    }
}

pub struct EmployeeMapping<'a, A = InMemory<Employee>>
where
    A: Adaptor<Object = Handle<Employee>>,
{
    pub adaptor: &'a A,
}

impl<'a, A> Mapping for EmployeeMapping<'a, A>
where
    A: Adaptor<Object = Handle<Employee>>,
{
    type Object = Handle<Employee>;
    type Storage = A;

    fn adaptor(&self) -> &A {
        self.adaptor
    }

    fn primary_keys(&self) -> Vec<KeyPathBuf> {
        vec![KeyPathBuf::from("uuid")]
    }

    fn bind(&self, object: &mut Handle<Employee>, ctx: &mut MappingContext) {
        let mut employee = object.borrow_mut();
        let Employee {
            uuid,
            name,
            join_date,
            salary,
            is_employee_of_month,
            percent_yearly_raise,
        } = &mut *employee;

        ctx.field(join_date, "joinDate")
            .field(uuid, "uuid")
            .field(name, "name")
            .field(salary, "data.salary")
            .field(is_employee_of_month, "data.is_employee_of_month")
            .field(percent_yearly_raise, "data.percent_yearly_raise");
    }
}

pub struct CompanyMapping<'a, CA = InMemory<Company>, EA = InMemory<Employee>>
where
    CA: Adaptor<Object = Handle<Company>>,
    EA: Adaptor<Object = Handle<Employee>>,
{
    pub companies: &'a CA,
    pub employees: &'a EA,
    /// Pass duplicate collection elements through instead of suppressing them.
    pub duplicate_employees: bool,
}

impl<'a, CA, EA> Mapping for CompanyMapping<'a, CA, EA>
where
    CA: Adaptor<Object = Handle<Company>>,
    EA: Adaptor<Object = Handle<Employee>>,
{
    type Object = Handle<Company>;
    type Storage = CA;

    fn adaptor(&self) -> &CA {
        self.companies
    }

    fn primary_keys(&self) -> Vec<KeyPathBuf> {
        vec![KeyPathBuf::from("data.uuid")]
    }

    fn bind(&self, object: &mut Handle<Company>, ctx: &mut MappingContext) {
        let employee_mapping = EmployeeMapping {
            adaptor: self.employees,
        };
        let mut company = object.borrow_mut();
        let Company {
            uuid,
            name,
            founding_date,
            founder,
            employees,
            pending_lawsuits,
        } = &mut *company;

        let mut employees_key = BindKey::nested("employees", &employee_mapping);
        if self.duplicate_employees {
            employees_key = employees_key.with_options(BindOptions::new().allow_duplicates());
        }

        ctx.collection(employees, employees_key)
            .nested_opt(founder, ("founder", &employee_mapping))
            .field(uuid, "data.uuid")
            .field(name, "name")
            .field(founding_date, "data.founding_date")
            .field(pending_lawsuits, "data.lawsuits.pending");
    }
}

/// The pair of stores backing one test scenario.
pub struct Stores {
    pub companies: InMemory<Company>,
    pub employees: InMemory<Employee>,
}

impl Stores {
    pub fn new() -> Self {
        Self {
            companies: InMemory::new(),
            employees: InMemory::new(),
        }
    }

    pub fn company_mapping(&self) -> CompanyMapping<'_> {
        CompanyMapping {
            companies: &self.companies,
            employees: &self.employees,
            duplicate_employees: false,
        }
    }

    pub fn company_mapping_with_dupes(&self) -> CompanyMapping<'_> {
        CompanyMapping {
            duplicate_employees: true,
            ..self.company_mapping()
        }
    }

    pub fn employee_mapping(&self) -> EmployeeMapping<'_> {
        EmployeeMapping {
            adaptor: &self.employees,
        }
    }
}

// ==========================
// JSON STUBS
// ==========================

pub fn join_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 6, 1, 9, 0, 0).unwrap()
}

pub fn founding_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2010, 3, 15, 0, 0, 0).unwrap()
}

pub fn employee_json(uuid: &str, name: &str) -> Value {
    Value::try_from(serde_json::json!({
        "uuid": uuid,
        "name": name,
        "joinDate": "2015-06-01T09:00:00.000Z",
        "data": {
            "salary": 50000,
            "is_employee_of_month": false,
            "percent_yearly_raise": 3.5
        }
    }))
    .unwrap()
}

pub fn company_json(uuid: &str, name: &str, employees: Vec<Value>) -> Value {
    let mut json = Value::try_from(serde_json::json!({
        "name": name,
        "founder": null,
        "data": {
            "uuid": uuid,
            "founding_date": "2010-03-15T00:00:00.000Z",
            "lawsuits": { "pending": 5 }
        }
    }))
    .unwrap();
    json.set("employees", Value::Array(employees));
    json
}

// ==========================
// SESSION SPY
// ==========================

/// An adaptor wrapper counting session-hook invocations, with switchable
/// begin/commit failures.
pub struct SpyAdaptor<A> {
    pub inner: A,
    pub begins: Cell<usize>,
    pub commits: Cell<usize>,
    pub aborts: Cell<usize>,
    pub fail_begin: Cell<bool>,
    pub fail_commit: Cell<bool>,
}

impl<A> SpyAdaptor<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            begins: Cell::new(0),
            commits: Cell::new(0),
            aborts: Cell::new(0),
            fail_begin: Cell::new(false),
            fail_commit: Cell::new(false),
        }
    }

    pub fn session_calls(&self) -> (usize, usize, usize) {
        (self.begins.get(), self.commits.get(), self.aborts.get())
    }
}

impl<A: Adaptor> Adaptor for SpyAdaptor<A> {
    type Object = A::Object;

    fn begin_session(&self) -> Result<(), AdaptorError> {
        self.begins.set(self.begins.get() + 1);
        if self.fail_begin.get() {
            return Err(AdaptorError::Begin {
                reason: "forced begin failure".to_string(),
            });
        }
        self.inner.begin_session()
    }

    fn commit_session(&self) -> Result<(), AdaptorError> {
        self.commits.set(self.commits.get() + 1);
        if self.fail_commit.get() {
            return Err(AdaptorError::Commit {
                reason: "forced commit failure".to_string(),
            });
        }
        self.inner.commit_session()
    }

    fn abort_session(&self, error: &Error) {
        self.aborts.set(self.aborts.get() + 1);
        self.inner.abort_session(error);
    }

    fn fetch(&self, key_values: &BTreeMap<String, Value>) -> Option<Self::Object> {
        self.inner.fetch(key_values)
    }

    fn create(&self) -> Result<Self::Object, AdaptorError> {
        self.inner.create()
    }

    fn save(&self, objects: &[Self::Object]) -> Result<(), AdaptorError> {
        self.inner.save(objects)
    }

    fn delete(&self, object: &Self::Object) -> Result<(), AdaptorError> {
        self.inner.delete(object)
    }
}
