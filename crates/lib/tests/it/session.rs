use remap::adaptor::{Adaptor, Handle, InMemory};
use remap::mapping::Mapper;

use crate::helpers::{
    Company, CompanyMapping, Employee, SpyAdaptor, company_json, employee_json,
};

struct SpiedStores {
    companies: SpyAdaptor<InMemory<Company>>,
    employees: SpyAdaptor<InMemory<Employee>>,
}

impl SpiedStores {
    fn new() -> Self {
        Self {
            companies: SpyAdaptor::new(InMemory::new()),
            employees: SpyAdaptor::new(InMemory::new()),
        }
    }

    fn mapping(&self) -> CompanyMapping<'_, SpyAdaptor<InMemory<Company>>, SpyAdaptor<InMemory<Employee>>> {
        CompanyMapping {
            companies: &self.companies,
            employees: &self.employees,
            duplicate_employees: false,
        }
    }
}

#[test]
fn test_successful_root_call_begins_and_commits_once() {
    let stores = SpiedStores::new();
    let json = company_json("u1", "Acme", vec![employee_json("e1", "Bob")]);

    Mapper::map_existing_or_new(&json, &stores.mapping()).unwrap();

    assert_eq!(stores.companies.session_calls(), (1, 1, 0));
    // Nested employee mappings never touch their adaptor's session hooks
    assert_eq!(stores.employees.session_calls(), (0, 0, 0));
}

#[test]
fn test_nested_failure_aborts_exactly_once_and_never_commits() {
    let stores = SpiedStores::new();
    let mut employee = employee_json("e1", "Bob");
    employee.set("name", 7.0);
    let json = company_json("u1", "Acme", vec![employee]);

    let err = Mapper::map_existing_or_new(&json, &stores.mapping()).unwrap_err();
    assert!(err.is_conversion());

    assert_eq!(stores.companies.session_calls(), (1, 0, 1));
    assert_eq!(stores.employees.session_calls(), (0, 0, 0));
}

#[test]
fn test_begin_failure_stops_before_any_binding() {
    let stores = SpiedStores::new();
    stores.companies.fail_begin.set(true);
    let json = company_json("u1", "Acme", vec![employee_json("e1", "Bob")]);

    let err = Mapper::map_existing_or_new(&json, &stores.mapping()).unwrap_err();
    assert!(err.is_adaptor_error());

    // No binding ran: the employee payload was never touched
    assert_eq!(stores.employees.inner.len(), 0);
    assert_eq!(stores.companies.session_calls(), (1, 0, 0));
}

#[test]
fn test_commit_failure_surfaces_as_adaptor_error() {
    let stores = SpiedStores::new();
    stores.companies.fail_commit.set(true);
    let json = company_json("u1", "Acme", vec![]);

    let err = Mapper::map_existing_or_new(&json, &stores.mapping()).unwrap_err();
    assert!(err.is_adaptor_error());
    assert_eq!(stores.companies.session_calls(), (1, 1, 0));
}

#[test]
fn test_to_json_runs_inside_a_session_too() {
    let stores = SpiedStores::new();
    let json = company_json("u1", "Acme", vec![]);
    let mut company = Mapper::map_existing_or_new(&json, &stores.mapping()).unwrap();
    assert_eq!(stores.companies.session_calls(), (1, 1, 0));

    Mapper::map_to_json(&mut company, &stores.mapping()).unwrap();
    assert_eq!(stores.companies.session_calls(), (2, 2, 0));
    assert_eq!(stores.employees.session_calls(), (0, 0, 0));
}

#[test]
fn test_abort_rolls_back_the_store() {
    let companies = InMemory::new();
    let employees = InMemory::new();
    let mapping = CompanyMapping {
        companies: &companies,
        employees: &employees,
        duplicate_employees: false,
    };

    let seeded = Handle::new(Company {
        uuid: "u1".to_string(),
        name: "Original".to_string(),
        ..Company::default()
    });
    companies.save(&[seeded.clone()]).unwrap();

    // The name binds before the founding date, so by the time the bad date
    // is rejected the seeded object has already been mutated in place.
    let mut json = company_json("u1", "Changed", vec![]);
    json.set("data.founding_date", "not a date");

    let err = Mapper::map_existing_or_new(&json, &mapping).unwrap_err();
    assert!(err.is_conversion());

    // The abort snapshot restored the pre-session state
    assert_eq!(companies.len(), 1);
    assert_eq!(seeded.borrow().name, "Original");
}
