use roster_core::{
    CsvEmployeeRepository, Employee, EmployeeRepository, EmployeeStore, EmployeeUpdate,
    EmployeeValidationError, NameField, NewEmployee, RepoError, RepoResult, StoreError,
    EMPTY_ROSTER_MESSAGE,
};
use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;

fn new_employee(id: &str, first: &str, last: &str, dept: &str, phone: &str) -> NewEmployee {
    NewEmployee {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        department: dept.to_string(),
        phone: phone.to_string(),
    }
}

fn ada() -> NewEmployee {
    new_employee("1", "ada", "LOVELACE", "eng", "317-555-1212")
}

fn alan() -> NewEmployee {
    new_employee("2", "alan", "turing", "mat", "4415550199")
}

fn open_store(dir: &tempfile::TempDir) -> EmployeeStore<CsvEmployeeRepository> {
    EmployeeStore::load(CsvEmployeeRepository::new(dir.path().join("employees.csv"))).unwrap()
}

/// Repository that keeps rows in memory and can be told to fail saves.
#[derive(Default)]
struct MemoryRepository {
    rows: RefCell<Vec<Employee>>,
    fail_saves: Cell<bool>,
    saves: Cell<usize>,
}

impl EmployeeRepository for &MemoryRepository {
    fn load_all(&self) -> RepoResult<Vec<Employee>> {
        Ok(self.rows.borrow().clone())
    }

    fn save_all(&self, employees: &[Employee]) -> RepoResult<()> {
        if self.fail_saves.get() {
            return Err(RepoError::Io {
                path: PathBuf::from("memory"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.saves.set(self.saves.get() + 1);
        *self.rows.borrow_mut() = employees.to_vec();
        Ok(())
    }
}

#[test]
fn load_of_missing_file_yields_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);

    assert!(store.is_empty());
    assert_eq!(store.display(), EMPTY_ROSTER_MESSAGE);
    assert!(dir.path().join("employees.csv").exists());
}

#[test]
fn create_normalizes_appends_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    let created = store.create(ada()).unwrap();
    assert_eq!(created.first_name(), "Ada");
    assert_eq!(created.last_name(), "Lovelace");
    assert_eq!(created.department(), "ENG");
    assert_eq!(created.phone(), "(317)555-1212");

    let reloaded = open_store(&dir);
    assert_eq!(reloaded.employees(), store.employees());
}

#[test]
fn create_rejects_invalid_name_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    let err = store
        .create(new_employee("1", "A9a", "Lovelace", "ENG", "3175551212"))
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Validation(EmployeeValidationError::InvalidName {
            field: NameField::First,
            ..
        })
    ));
    assert!(store.is_empty());
}

#[test]
fn create_rejects_duplicate_id_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    store.create(ada()).unwrap();

    let err = store
        .create(new_employee("1", "Grace", "Hopper", "NAV", "2025550143"))
        .unwrap_err();

    assert!(matches!(err, StoreError::DuplicateId(ref id) if id == "1"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(0).unwrap().first_name(), "Ada");
    assert_eq!(open_store(&dir).len(), 1);
}

#[test]
fn edit_applies_provided_fields_and_keeps_others() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    store.create(ada()).unwrap();

    let update = EmployeeUpdate {
        last_name: Some("king".to_string()),
        phone: Some("(212) 555-0000".to_string()),
        ..EmployeeUpdate::default()
    };
    let edited = store.edit(0, &update).unwrap();

    assert_eq!(edited.id(), "1");
    assert_eq!(edited.first_name(), "Ada");
    assert_eq!(edited.last_name(), "King");
    assert_eq!(edited.department(), "ENG");
    assert_eq!(edited.phone(), "(212)555-0000");
    assert_eq!(open_store(&dir).employees(), store.employees());
}

#[test]
fn edit_is_all_or_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    store.create(ada()).unwrap();
    let before = store.employees().to_vec();

    let update = EmployeeUpdate {
        first_name: Some("Augusta".to_string()),
        department: Some("Engineering".to_string()),
        phone: Some("2125550000".to_string()),
        ..EmployeeUpdate::default()
    };
    let err = store.edit(0, &update).unwrap_err();

    assert!(matches!(
        err,
        StoreError::Validation(EmployeeValidationError::InvalidDepartment(_))
    ));
    assert_eq!(store.employees(), before.as_slice());
    assert_eq!(open_store(&dir).employees(), before.as_slice());
}

#[test]
fn edit_and_delete_reject_out_of_range_index() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    store.create(ada()).unwrap();
    let before = store.employees().to_vec();

    let err = store.edit(1, &EmployeeUpdate::default()).unwrap_err();
    assert!(matches!(err, StoreError::IndexOutOfRange { index: 1, len: 1 }));

    let err = store.delete(5).unwrap_err();
    assert!(matches!(err, StoreError::IndexOutOfRange { index: 5, len: 1 }));

    assert_eq!(store.employees(), before.as_slice());
}

#[test]
fn delete_removes_by_position_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    store.create(ada()).unwrap();
    store.create(alan()).unwrap();

    let removed = store.delete(0).unwrap();

    assert_eq!(removed.id(), "1");
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(0).unwrap().id(), "2");
    assert_eq!(open_store(&dir).employees(), store.employees());
}

#[test]
fn display_lists_employees_with_one_based_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    store.create(ada()).unwrap();
    store.create(alan()).unwrap();

    assert_eq!(
        store.display(),
        "1. 1 - Lovelace, Ada - ENG - (317)555-1212\n2. 2 - Turing, Alan - MAT - (441)555-0199"
    );
}

#[test]
fn load_propagates_malformed_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.csv");
    std::fs::write(&path, "id,firstName,lastName,department,phone\n1,Ada,Lovelace,ENG,12\n")
        .unwrap();

    let err = EmployeeStore::load(CsvEmployeeRepository::new(&path))
        .err()
        .unwrap();

    assert!(matches!(
        err,
        StoreError::Repo(RepoError::InvalidRow {
            source: EmployeeValidationError::InvalidPhone { digits: 2 },
            ..
        })
    ));
}

#[test]
fn every_mutation_saves_once() {
    let repo = MemoryRepository::default();
    let mut store = EmployeeStore::load(&repo).unwrap();

    store.create(ada()).unwrap();
    store.create(alan()).unwrap();
    store
        .edit(
            1,
            &EmployeeUpdate {
                department: Some("eng".to_string()),
                ..EmployeeUpdate::default()
            },
        )
        .unwrap();
    store.delete(0).unwrap();

    assert_eq!(repo.saves.get(), 4);
    assert_eq!(repo.rows.borrow().as_slice(), store.employees());
}

#[test]
fn failed_save_rolls_back_in_memory_changes() {
    let repo = MemoryRepository::default();
    let mut store = EmployeeStore::load(&repo).unwrap();
    store.create(ada()).unwrap();
    let before = store.employees().to_vec();
    repo.fail_saves.set(true);

    assert!(matches!(store.create(alan()), Err(StoreError::Repo(_))));
    assert_eq!(store.employees(), before.as_slice());

    let update = EmployeeUpdate {
        first_name: Some("Augusta".to_string()),
        ..EmployeeUpdate::default()
    };
    assert!(matches!(store.edit(0, &update), Err(StoreError::Repo(_))));
    assert_eq!(store.employees(), before.as_slice());

    assert!(matches!(store.delete(0), Err(StoreError::Repo(_))));
    assert_eq!(store.employees(), before.as_slice());

    assert!(store.save().is_err());
}

#[test]
fn empty_edit_returns_record_without_saving() {
    let repo = MemoryRepository::default();
    let mut store = EmployeeStore::load(&repo).unwrap();
    store.create(ada()).unwrap();

    let unchanged = store.edit(0, &EmployeeUpdate::default()).unwrap();
    assert_eq!(unchanged.first_name(), "Ada");
    assert_eq!(repo.saves.get(), 1);

    let err = store.edit(3, &EmployeeUpdate::default()).unwrap_err();
    assert!(matches!(err, StoreError::IndexOutOfRange { index: 3, len: 1 }));
}
