use super::support::Fixture;
use fsv::{same_kind, ErrorKind, Flag, FlagSet};

#[test]
fn removes_regular_file() {
    let fx = Fixture::new();
    let file = fx.file("case01/file", "x");
    let result = file.rm(&[]);
    assert!(same_kind(None, result.as_ref().err()));
    assert!(!file.exists());
}

#[cfg(unix)]
#[test]
fn removes_symlink_but_not_its_target() {
    let fx = Fixture::new();
    let target = fx.file("case02/target", "keep me");
    let link = fx.symlink("case02/symlink", &target);

    link.rm(&[]).unwrap();
    assert!(link.stat().map(|s| !s.exists).unwrap());
    assert!(target.exists());
}

#[cfg(unix)]
#[test]
fn removes_symlink_to_directory_without_recursive_flag() {
    let fx = Fixture::new();
    let dir = fx.dir("real");
    fx.file("real/inner", "x");
    let link = fx.symlink("link", &dir);

    link.rm(&[]).unwrap();
    assert!(fx.path("real/inner").exists());
}

#[cfg(unix)]
#[test]
fn removes_dangling_symlink() {
    let fx = Fixture::new();
    let link = fx.symlink("dangling", &fx.path("nowhere"));
    link.rm(&[]).unwrap();
    assert!(!link.stat().unwrap().exists);
}

#[test]
fn missing_path_is_success() {
    let fx = Fixture::new();
    assert!(fx.path("case03/none").rm(&[]).is_ok());
    assert!(fx.path("case03/none").rm(&['r']).is_ok());
}

#[test]
fn directory_without_recursive_flag_is_refused() {
    let fx = Fixture::new();
    let dir = fx.dir("case04/dir");
    fx.file("case04/dir/child", "x");

    let err = dir.rm(&[]).unwrap_err();
    assert!(ErrorKind::MissingRecFlag.is_type_of(Some(&err)));
    assert_eq!(err.path(), Some(&dir));
    assert!(dir.exists());
    assert!(fx.path("case04/dir/child").exists());
}

#[test]
fn directory_with_recursive_flag_is_removed() {
    let fx = Fixture::new();
    let dir = fx.dir("case05/dir");
    fx.file("case05/dir/a", "a");
    fx.file("case05/dir/nested/b", "b");

    dir.rm(&['r']).unwrap();
    assert!(!dir.exists());
    assert!(fx.path("case05").exists());
}

#[test]
fn rm_with_typed_flags() {
    let fx = Fixture::new();
    let dir = fx.dir("typed");
    dir.rm_with(FlagSet::from(Flag::Recursive)).unwrap();
    assert!(!dir.exists());
}

#[test]
fn unknown_flag_is_rejected_before_touching_disk() {
    let fx = Fixture::new();
    let file = fx.file("keep", "x");

    let err = file.rm(&['x']).unwrap_err();
    assert!(ErrorKind::InvalidFlag.is_type_of(Some(&err)));
    assert_eq!(err.flag(), Some('x'));
    assert!(file.exists());

    let err = fx.path("absent").rm(&['r', 'q']).unwrap_err();
    assert_eq!(err.flag(), Some('q'));
}

#[cfg(unix)]
#[test]
fn listed_entries_with_non_utf8_names_are_removed() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let fx = Fixture::new();
    let dir = fx.dir("raw");
    let name = OsStr::from_bytes(b"bad\xffname");
    std::fs::write(dir.as_std_path().join(name), "x").unwrap();

    let listing = dir.ls().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing.iter().next().map(|p| p.base()), Some(name));
    assert!(listing.iter().all(|p| p.exists()));

    let failures = listing.each(|p| p.rm(&[]));
    assert!(failures.is_empty());
    assert!(dir.ls().unwrap().is_empty());
}
