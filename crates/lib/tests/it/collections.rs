use remap::mapping::Mapper;

use crate::helpers::{Stores, company_json, employee_json};

#[test]
fn test_duplicate_elements_collapse_to_single_entry() {
    let stores = Stores::new();
    // Three elements sharing one primary key; the third differs in its
    // non-key fields.
    let json = company_json(
        "u1",
        "Acme",
        vec![
            employee_json("e1", "Bob"),
            employee_json("e1", "Bob"),
            employee_json("e1", "Robert"),
        ],
    );

    let company = Mapper::map_existing_or_new(&json, &stores.company_mapping()).unwrap();

    let company = company.borrow();
    assert_eq!(company.employees.len(), 1);
    assert_eq!(stores.employees.len(), 1);

    // A suppressed duplicate is dropped before mapping, so the second
    // occurrence's differing fields are not applied.
    assert_eq!(company.employees[0].borrow().name, "Bob");
}

#[test]
fn test_allow_duplicates_keeps_every_entry() {
    let stores = Stores::new();
    let json = company_json(
        "u1",
        "Acme",
        vec![
            employee_json("e1", "Bob"),
            employee_json("e1", "Bob"),
            employee_json("e1", "Robert"),
        ],
    );

    let company =
        Mapper::map_existing_or_new(&json, &stores.company_mapping_with_dupes()).unwrap();

    let company = company.borrow();
    assert_eq!(company.employees.len(), 3);
    // Every element resolved to the same identity, so the entries are equal
    assert!(company.employees[0].ptr_eq(&company.employees[1]));
    assert!(company.employees[1].ptr_eq(&company.employees[2]));
    assert_eq!(stores.employees.len(), 1);

    // With duplicates allowed each occurrence is mapped; the last one's
    // fields win on the shared object.
    assert_eq!(company.employees[0].borrow().name, "Robert");
}

#[test]
fn test_distinct_elements_all_appear_in_order() {
    let stores = Stores::new();
    let json = company_json(
        "u1",
        "Acme",
        vec![
            employee_json("e1", "Bob"),
            employee_json("e2", "Carol"),
            employee_json("e3", "Dan"),
        ],
    );

    let company = Mapper::map_existing_or_new(&json, &stores.company_mapping()).unwrap();

    let company = company.borrow();
    let names: Vec<String> = company
        .employees
        .iter()
        .map(|employee| employee.borrow().name.clone())
        .collect();
    assert_eq!(names, ["Bob", "Carol", "Dan"]);
    assert_eq!(stores.employees.len(), 3);
}

#[test]
fn test_collection_merge_is_additive_across_calls() {
    let stores = Stores::new();
    let json = company_json("u1", "Acme", vec![employee_json("e1", "Bob")]);

    let company = Mapper::map_existing_or_new(&json, &stores.company_mapping()).unwrap();
    assert_eq!(company.borrow().employees.len(), 1);

    // Re-running the same mapping against the same object appends the
    // resolved element again; pre-existing entries are never removed. The
    // store still holds a single employee.
    let again = Mapper::map_existing_or_new(&json, &stores.company_mapping()).unwrap();
    assert!(again.ptr_eq(&company));
    assert_eq!(company.borrow().employees.len(), 2);
    assert!(company.borrow().employees[0].ptr_eq(&company.borrow().employees[1]));
    assert_eq!(stores.employees.len(), 1);
}

#[test]
fn test_duplicates_against_preexisting_store_object() {
    let stores = Stores::new();

    // Seed the employee store by mapping e1 once on its own.
    Mapper::map_existing_or_new(&employee_json("e1", "Bob"), &stores.employee_mapping()).unwrap();
    assert_eq!(stores.employees.len(), 1);

    // A collection containing e1 twice still yields one entry: the first
    // occurrence resolves to the stored object, the second is suppressed.
    let json = company_json(
        "u1",
        "Acme",
        vec![employee_json("e1", "Bobby"), employee_json("e1", "Bob III")],
    );
    let company = Mapper::map_existing_or_new(&json, &stores.company_mapping()).unwrap();

    let company = company.borrow();
    assert_eq!(company.employees.len(), 1);
    assert_eq!(stores.employees.len(), 1);
    assert_eq!(company.employees[0].borrow().name, "Bobby");
}
