use notifications_permission_engine::{PermissionStatus, STATUS_SET_VERSION};

/// Hosts match on these strings. Any change here must bump the set version.
#[test]
fn status_set_is_stable() {
    assert_eq!(STATUS_SET_VERSION, 1);
    let statuses: Vec<&str> = PermissionStatus::ALL.iter().map(|s| s.as_str()).collect();
    insta::assert_yaml_snapshot!("status_set", statuses);
}
