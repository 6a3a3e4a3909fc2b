use json_users::{Error, User, UserStore};

fn named(name: &str) -> User {
    User {
        name: name.into(),
        ..User::default()
    }
}

#[test]
fn open_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    let store = UserStore::open(&path).unwrap();
    assert!(store.list().is_empty());
    // opening alone does not create the file
    assert!(!path.exists());
}

#[test]
fn path_accessor() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    let store = UserStore::open(&path).unwrap();
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn corrupt_file_refuses_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    std::fs::write(&path, r#"{"users": [{"ID": 1,"#).unwrap();

    let err = UserStore::open(&path).unwrap_err();
    assert!(matches!(err, Error::Deserialize(_)), "{err}");
}

#[test]
fn empty_file_refuses_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    std::fs::write(&path, "").unwrap();
    assert!(UserStore::open(&path).is_err());
}

#[test]
fn directory_in_place_of_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = UserStore::open(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "{err}");
}

#[test]
fn loads_file_written_by_hand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    std::fs::write(
        &path,
        r#"{
  "users": [
    {"ID": 8, "Name": "Romario", "Type": "Autor", "Age": 18,
     "Email": "romario@gmail.com", "Phone": 32458798, "City": "Rio de Janeiro"},
    {"ID": 2, "Name": "NoCity"}
  ]
}"#,
    )
    .unwrap();

    let store = UserStore::open(&path).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(8).unwrap().city, "Rio de Janeiro");
    assert_eq!(store.get(2).unwrap().city, "");
}

#[test]
fn no_tmp_file_left_after_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    let store = UserStore::open(&path).unwrap();
    store.create(named("a")).unwrap();

    assert!(path.exists());
    assert!(!dir.path().join("users.json.tmp").exists());
}

// A failed write is reported, but the in-memory change is kept.
#[test]
fn failed_write_keeps_memory_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gone").join("users.json");
    let store = UserStore::open(&path).unwrap();

    let err = store.create(named("a")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(store.len(), 1);

    store.extend(vec![User { id: 2, ..named("b") }]).unwrap_err();
    assert!(store.remove(1).is_err());
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.list()[0].id, 2);
}
