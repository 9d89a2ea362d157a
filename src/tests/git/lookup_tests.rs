use super::*;

#[test]
fn static_remotes_return_first_url_of_exact_name() {
    let remotes = StaticRemotes::new()
        .with(ORIGIN, "git@github.com:me/widgets.git")
        .with(ORIGIN, "https://mirror.example.com/me/widgets")
        .with(UPSTREAM, "https://github.com/acme/widgets.git");
    let dir = Path::new(".");

    assert_eq!(
        remotes.find_remote_url(dir, ORIGIN).unwrap(),
        "git@github.com:me/widgets.git"
    );
    assert_eq!(
        remotes.find_remote_url(dir, UPSTREAM).unwrap(),
        "https://github.com/acme/widgets.git"
    );
}

#[test]
fn remote_names_are_case_sensitive() {
    let remotes = StaticRemotes::new().with("Origin", "git@github.com:me/widgets.git");
    let err = remotes.find_remote_url(Path::new("."), ORIGIN).unwrap_err();
    assert!(matches!(err, LookupError::NoSuchRemote { ref name } if name == "origin"));
    assert_eq!(err.to_string(), "no origin remote found");
}

#[test]
fn missing_binary_is_a_spawn_error() {
    let git = GitCli::with_binary("/nonexistent/scopedash-git");
    let err = git.list_remotes(Path::new(".")).unwrap_err();
    assert!(matches!(err, LookupError::Spawn { .. }), "{err}");
}
