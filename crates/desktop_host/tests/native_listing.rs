use desktop_host::{HostContext, ListingError, NativeMetadataResolver, SystemIdentityResolver};
use futures::executor::block_on;
use platform_host::{
    EntryType, FileSystemEntryMetadata, FolderBrowserService, MemorySettingsStore,
    UnknownIdentityResolver,
};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("{prefix}_{}_{}", process::id(), nanos));
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

fn find<'a>(entries: &'a [FileSystemEntryMetadata], name: &str) -> &'a FileSystemEntryMetadata {
    entries
        .iter()
        .find(|entry| entry.name == name)
        .unwrap_or_else(|| panic!("missing entry `{name}` in {entries:?}"))
}

#[test]
fn listing_reports_one_record_per_child_with_types_and_sizes() {
    let root = temp_dir("native_listing_types");
    fs::write(root.join("notes.txt"), "hello").expect("write notes");
    fs::write(root.join("Makefile"), "all:\n").expect("write makefile");
    fs::create_dir(root.join("nested")).expect("create nested");
    fs::write(root.join("nested").join("deep.txt"), "x").expect("write nested child");

    let resolver = NativeMetadataResolver::new(SystemIdentityResolver);
    let entries = resolver.list_dir(&root).expect("list dir");

    assert_eq!(entries.len(), 3, "listing must not recurse: {entries:?}");

    let notes = find(&entries, "notes.txt");
    assert_eq!(notes.size, 5);
    assert_eq!(notes.entry_type.label(), "TXT File");
    assert_eq!(
        notes.location,
        root.join("notes.txt").to_string_lossy().into_owned()
    );
    assert!(notes.permissions.read);
    assert!(notes.permissions.write);
    assert!(notes.modified_at_unix_ms > 0);
    assert!(!notes.owner.is_empty());
    assert!(!notes.group.is_empty());

    assert_eq!(find(&entries, "Makefile").entry_type.label(), "File");

    let nested = find(&entries, "nested");
    assert_eq!(nested.entry_type, EntryType::Directory);
    assert!(nested.permissions.execute);
    assert!(nested.navigable);
    assert!(!notes.navigable);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn locations_are_resolved_when_the_request_has_dot_segments() {
    let root = temp_dir("native_listing_dot_segments");
    fs::create_dir(root.join("a")).expect("create a");
    fs::create_dir(root.join("b")).expect("create b");
    fs::write(root.join("b").join("x.txt"), "x").expect("write x");

    let resolver = NativeMetadataResolver::new(UnknownIdentityResolver);
    let entries = resolver
        .list_dir(&root.join("a").join("..").join(".").join("b"))
        .expect("list dir");

    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].location,
        root.join("b").join("x.txt").to_string_lossy().into_owned()
    );

    let _ = fs::remove_dir_all(root);
}

#[test]
fn listing_an_empty_directory_yields_no_entries() {
    let root = temp_dir("native_listing_empty");
    let resolver = NativeMetadataResolver::new(UnknownIdentityResolver);
    assert!(resolver.list_dir(&root).expect("list dir").is_empty());
    let _ = fs::remove_dir_all(root);
}

#[test]
fn listing_fails_as_a_whole_for_missing_or_non_directory_paths() {
    let root = temp_dir("native_listing_errors");
    let file = root.join("plain.txt");
    fs::write(&file, "x").expect("write file");
    let resolver = NativeMetadataResolver::new(UnknownIdentityResolver);

    let missing = resolver
        .list_dir(&root.join("missing"))
        .expect_err("missing dir should fail");
    assert!(matches!(missing, ListingError::Stat { .. }), "{missing:?}");

    let not_dir = resolver
        .list_dir(&file)
        .expect_err("file should not list as a dir");
    assert_eq!(
        not_dir.to_string(),
        format!("path `{}` is not a directory", file.display())
    );

    let _ = fs::remove_dir_all(root);
}

#[test]
fn unknown_identity_resolver_labels_owner_and_group_unknown() {
    let root = temp_dir("native_listing_unknown_identity");
    fs::write(root.join("a.md"), "# a").expect("write file");

    let resolver = NativeMetadataResolver::new(UnknownIdentityResolver);
    let entries = resolver.list_dir(&root).expect("list dir");
    assert_eq!(entries[0].owner, "Unknown");
    assert_eq!(entries[0].group, "Unknown");

    let _ = fs::remove_dir_all(root);
}

#[cfg(unix)]
#[test]
fn symlinks_are_reported_without_following_even_when_dangling() {
    use std::os::unix::fs::symlink;

    let root = temp_dir("native_listing_symlinks");
    fs::write(root.join("target.txt"), "payload").expect("write target");
    symlink(root.join("target.txt"), root.join("link")).expect("create link");
    symlink(root.join("gone"), root.join("dangling")).expect("create dangling link");

    let resolver = NativeMetadataResolver::new(SystemIdentityResolver);
    let entries = resolver.list_dir(&root).expect("list dir");

    assert_eq!(entries.len(), 3);
    assert_eq!(find(&entries, "link").entry_type, EntryType::SymbolicLink);
    assert_eq!(find(&entries, "dangling").entry_type.label(), "Symbolic Link");
    assert!(!find(&entries, "dangling").navigable);

    let _ = fs::remove_dir_all(root);
}

#[cfg(unix)]
#[test]
fn links_to_folders_stay_links_but_can_be_opened() {
    use std::os::unix::fs::symlink;

    let root = temp_dir("native_listing_folder_links");
    fs::create_dir(root.join("real")).expect("create real dir");
    fs::write(root.join("real").join("inside.txt"), "x").expect("write inside");
    symlink(root.join("real"), root.join("shortcut")).expect("create dir link");
    fs::write(root.join("plain.txt"), "x").expect("write plain");
    symlink(root.join("plain.txt"), root.join("file_link")).expect("create file link");

    let resolver = NativeMetadataResolver::new(UnknownIdentityResolver);
    let entries = resolver.list_dir(&root).expect("list dir");

    let shortcut = find(&entries, "shortcut");
    assert_eq!(shortcut.entry_type, EntryType::SymbolicLink);
    assert!(shortcut.navigable);
    assert!(!find(&entries, "file_link").navigable);

    let opened = resolver
        .list_dir(std::path::Path::new(&shortcut.location))
        .expect("list through link");
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].name, "inside.txt");

    let _ = fs::remove_dir_all(root);
}

#[cfg(unix)]
#[test]
fn fifos_and_sockets_are_classified() {
    use nix::sys::stat::Mode;
    use nix::unistd::mkfifo;
    use std::os::unix::net::UnixListener;

    let root = temp_dir("native_listing_special");
    mkfifo(&root.join("pipe"), Mode::S_IRUSR | Mode::S_IWUSR).expect("create fifo");
    let _listener = UnixListener::bind(root.join("sock")).expect("bind socket");

    let resolver = NativeMetadataResolver::new(UnknownIdentityResolver);
    let entries = resolver.list_dir(&root).expect("list dir");

    assert_eq!(find(&entries, "pipe").entry_type.label(), "FIFO special file");
    assert_eq!(find(&entries, "sock").entry_type.label(), "Socket");

    let _ = fs::remove_dir_all(root);
}

#[test]
fn host_commands_list_a_directory_as_json() {
    let root = temp_dir("native_listing_commands");
    fs::write(root.join("readme.md"), "hi").expect("write file");
    let home = root.to_string_lossy().into_owned();

    let host = block_on(HostContext::init(
        MemorySettingsStore::default(),
        &home,
        UnknownIdentityResolver,
    ))
    .expect("init host");

    let listing = block_on(host.invoke("fs_list_dir_with_metadata", json!({ "path": home })))
        .expect("list via command");
    let entries: Vec<FileSystemEntryMetadata> =
        serde_json::from_value(listing).expect("listing payload");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "readme.md");
    assert_eq!(entries[0].entry_type.label(), "MD File");

    let err = block_on(host.invoke(
        "fs_list_dir_with_metadata",
        json!({ "path": root.join("missing").to_string_lossy() }),
    ))
    .expect_err("missing dir should fail");
    assert!(err.starts_with("failed to read "), "unexpected error: {err}");

    let _ = fs::remove_dir_all(root);
}

#[test]
fn selected_folder_defaults_to_home_and_lists_through_the_service() {
    let root = temp_dir("native_listing_selected");
    fs::create_dir(root.join("Documents")).expect("create documents");
    let home = root.to_string_lossy().into_owned();

    let host = block_on(HostContext::init(
        MemorySettingsStore::default(),
        &home,
        UnknownIdentityResolver,
    ))
    .expect("init host");

    let selected = block_on(host.selected_folder()).expect("selected folder");
    assert_eq!(selected, home);
    let entries = block_on(host.list_dir_with_metadata(&selected)).expect("list selected");
    assert_eq!(entries[0].entry_type, EntryType::Directory);

    let favorites = block_on(host.favorites()).expect("favorites");
    assert_eq!(
        favorites[1],
        root.join("Documents").to_string_lossy().into_owned()
    );

    let _ = fs::remove_dir_all(root);
}
