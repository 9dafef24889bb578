use super::support::Fixture;

#[test]
fn target_of_non_symlink_is_unchanged() {
    let fx = Fixture::new();
    let file = fx.file("plain", "x");
    assert_eq!(file.target().unwrap(), file);

    let dir = fx.dir("d");
    assert_eq!(dir.target().unwrap(), dir);
}

#[test]
fn target_of_missing_path_fails() {
    let fx = Fixture::new();
    assert!(fx.path("missing").target().is_err());
}

#[cfg(unix)]
#[test]
fn target_follows_chain_of_three() {
    let fx = Fixture::new();
    let file = fx.file("file", "payload");
    let c = fx.symlink("c", &file);
    let b = fx.symlink("b", &c);
    let a = fx.symlink("a", &b);

    assert_eq!(a.follow().unwrap(), b);
    assert_eq!(a.target().unwrap(), file);
}

#[cfg(unix)]
#[test]
fn target_reports_cycle() {
    use fsv::ErrorKind;

    let fx = Fixture::new();
    let a = fx.path("a");
    let b = fx.symlink("b", &a);
    fx.symlink("a", &b);

    let err = a.target().unwrap_err();
    assert!(ErrorKind::SymlinkCycle.is_type_of(Some(&err)));
}

#[cfg(unix)]
#[test]
fn target_of_dangling_link_fails() {
    let fx = Fixture::new();
    let link = fx.symlink("dangling", &fx.path("gone"));
    assert!(link.target().is_err());
}

#[cfg(unix)]
#[test]
fn same_info_distinguishes_links_from_copies() {
    let fx = Fixture::new();
    let file = fx.file("file", "same bytes");
    let copy = fx.file("copy", "same bytes");
    let link = fx.symlink("link", &file);

    assert!(file.same_info_as(&file).unwrap());
    assert!(!file.same_info_as(&copy).unwrap());
    // lstat semantics: the link is its own inode
    assert!(!file.same_info_as(&link).unwrap());
    assert!(file.same_info_as(&link.target().unwrap()).unwrap());
}

#[cfg(unix)]
#[test]
fn target_keeps_non_utf8_link_destination() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let fx = Fixture::new();
    let name = OsStr::from_bytes(b"caf\xe9");
    let file = fsv::Path::from(fx.dir.path()).join(name);
    std::fs::write(file.as_std_path(), "x").unwrap();
    std::os::unix::fs::symlink(name, fx.path("link").as_std_path()).unwrap();

    let link = fx.path("link");
    assert_eq!(link.follow().unwrap().as_os_str(), name);
    let target = link.target().unwrap();
    assert_eq!(target, file);
    assert!(target.is_file().unwrap());
}
