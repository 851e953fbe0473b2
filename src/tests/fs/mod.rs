// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::date::ModTime;
use crate::entry::{Entry, EntryKind, Metadata};
use crate::error::TarFsError;
use crate::fs::{OpenFile, TarFs, TarFsBuilder};
use crate::table::TableBuilder;
use crate::tests::archive;

use std::io::{BufRead, Read, Seek, SeekFrom};

fn sample() -> TarFs {
    let data = archive(&[
        ("readme.txt", "This archive contains some text files."),
        ("gopher.txt", "Gopher names:\nGeorge\nGeoffrey\nGonzo\n"),
        ("subdir/", ""),
        ("subdir/subreadme.txt", "An otherwise empty sub directory."),
    ]);

    TarFs::new(data.as_slice()).expect("failed to build filesystem")
}

fn stored(path: &str, content: &str, kind: EntryKind) -> Entry {
    let metadata = Metadata {
        path: path.to_owned(),
        name: crate::entry::base_name(path).to_owned(),
        size: content.len() as u64,
        mode: 0o644,
        modified: ModTime::default(),
        kind,
        link_name: None,
        uid: 0,
        gid: 0,
    };

    Entry { content: content.as_bytes().to_vec(), metadata }
}

#[test]
fn open_regular_file() {
    let fs = sample();
    let mut file = fs.open("readme.txt").expect("failed to open 'readme.txt'");

    let mut buffer = String::new();
    file.read_to_string(&mut buffer).expect("failed to read 'readme.txt'");

    assert_eq!("This archive contains some text files.", buffer);
    assert!(!file.stat().expect("failed to stat 'readme.txt'").is_dir());
    assert!(file.children().is_none());
}

#[test]
fn open_missing_file() {
    let fs = sample();

    let err = fs.open("nosuchfile").expect_err("opened a missing file");
    assert!(err.is_not_found());
    assert_eq!(std::io::ErrorKind::NotFound, err.kind());
}

#[test]
fn open_is_verbatim() {
    let fs = sample();

    for name in ["/readme.txt", "./readme.txt", "subdir/../readme.txt", "README.TXT", "subdir", ""] {
        let result = fs.open(name);
        assert!(matches!(result, Err(TarFsError::NotFound)), "for {name:?}, expected not found");
    }
}

#[test]
fn open_with_nul_byte() {
    let fs = sample();

    let result = fs.open("foo\0bar");
    assert!(matches!(result, Err(TarFsError::InvalidPath)));
}

#[test]
fn open_with_nul_byte_colliding_key() {
    let mut builder = TableBuilder::new();
    builder.insert(stored("foo\0bar", "hidden", EntryKind::Regular));
    let fs = TarFs::from_table(builder.build());

    assert!(fs.table().contains("foo\0bar"));
    assert!(matches!(fs.open("foo\0bar"), Err(TarFsError::InvalidPath)));
    assert!(matches!(fs.metadata("foo\0bar"), Err(TarFsError::InvalidPath)));
    assert!(!fs.contains("foo\0bar"));
}

#[test]
fn contains_is_verbatim() {
    let fs = sample();

    assert!(fs.contains("readme.txt"));
    assert!(fs.contains("subdir/"));
    assert!(!fs.contains("subdir"));
    assert!(!fs.contains("/readme.txt"));
}

#[cfg(windows)]
#[test]
fn open_with_platform_separator() {
    let fs = sample();
    assert!(matches!(fs.open("subdir\\subreadme.txt"), Err(TarFsError::InvalidPath)));
}

#[cfg(not(windows))]
#[test]
fn open_with_backslash() {
    let mut builder = TableBuilder::new();
    builder.insert(stored("back\\slash.txt", "ok", EntryKind::Regular));
    let fs = TarFs::from_table(builder.build());

    // A backslash is an ordinary character where it isn't the platform separator.
    assert!(fs.open("back\\slash.txt").is_ok());
}

#[test]
fn readdir_includes_self() {
    let fs = sample();
    let mut dir = fs.open("subdir/").expect("failed to open 'subdir/'");

    assert!(dir.stat().expect("failed to stat 'subdir/'").is_dir());

    let listing = dir.readdir(2).expect("failed to list 'subdir/'");
    let paths: Vec<_> = listing.iter().map(Metadata::path).collect();

    assert_eq!(vec!["subdir/", "subdir/subreadme.txt"], paths);
}

#[test]
fn readdir_ignores_count() {
    let fs = sample();
    let mut dir = fs.open("subdir/").expect("failed to open 'subdir/'");

    assert_eq!(2, dir.readdir(1).expect("failed to list 'subdir/'").len());
    assert_eq!(2, dir.readdir(0).expect("failed to list 'subdir/'").len());
    // Repeated calls return the whole listing again rather than continuing from where the last left off.
    assert_eq!(2, dir.readdir(1).expect("failed to list 'subdir/'").len());
}

#[test]
fn readdir_matches_plain_prefix() {
    let mut builder = TableBuilder::new();
    builder.insert(stored("sub", "", EntryKind::Directory));
    builder.insert(stored("subdir/x", "x", EntryKind::Regular));
    builder.insert(stored("other/y", "y", EntryKind::Regular));
    let fs = TarFs::from_table(builder.build());

    let mut dir = fs.open("sub").expect("failed to open 'sub'");
    let listing = dir.readdir(0).expect("failed to list 'sub'");
    let paths: Vec<_> = listing.iter().map(Metadata::path).collect();

    assert_eq!(vec!["sub", "subdir/x"], paths);
}

#[test]
fn readdir_on_file() {
    let fs = sample();
    let mut file = fs.open("readme.txt").expect("failed to open 'readme.txt'");

    assert!(matches!(file.readdir(1), Err(TarFsError::NotFound)));
}

#[test]
fn seek_within_content() {
    let fs = sample();
    let mut file = fs.open("readme.txt").expect("failed to open 'readme.txt'");

    assert_eq!(5, file.seek(SeekFrom::Start(5)).expect("failed to seek"));
    let mut buffer = [0; 7];
    file.read_exact(&mut buffer).expect("failed to read");
    assert_eq!(b"archive", &buffer);

    assert_eq!(13, file.seek(SeekFrom::Current(1)).expect("failed to seek"));
    let end = file.seek(SeekFrom::End(-6)).expect("failed to seek");
    assert_eq!(file.len() - 6, end);

    let mut tail = String::new();
    file.read_to_string(&mut tail).expect("failed to read");
    assert_eq!("files.", tail);
}

#[test]
fn seek_past_end() {
    let fs = sample();
    let mut file = fs.open("readme.txt").expect("failed to open 'readme.txt'");

    assert_eq!(1000, file.seek(SeekFrom::Start(1000)).expect("failed to seek"));
    assert_eq!(1010, file.seek(SeekFrom::End(972)).expect("failed to seek"));

    let mut buffer = [0; 8];
    assert_eq!(0, file.read(&mut buffer).expect("failed to read"));
    assert_eq!(1010, file.position());
}

#[test]
fn seek_before_start() {
    let fs = sample();
    let mut file = fs.open("readme.txt").expect("failed to open 'readme.txt'");
    file.seek(SeekFrom::Start(3)).expect("failed to seek");

    let err = file.seek(SeekFrom::Current(-4)).expect_err("seeked before the start");
    assert_eq!(std::io::ErrorKind::InvalidInput, err.kind());

    let inner = err.get_ref().and_then(|inner| inner.downcast_ref::<TarFsError>());
    assert!(matches!(inner, Some(TarFsError::InvalidOffset)));

    // A failed seek leaves the position untouched.
    assert_eq!(3, file.position());
    assert!(file.seek(SeekFrom::End(-1000)).is_err());
}

#[test]
fn buf_read_lines() {
    let fs = sample();
    let file = fs.open("gopher.txt").expect("failed to open 'gopher.txt'");

    let lines: Vec<String> = file.lines().collect::<std::io::Result<_>>().expect("failed to read lines");
    assert_eq!(vec!["Gopher names:", "George", "Geoffrey", "Gonzo"], lines);
}

#[test]
fn handles_are_independent() {
    let fs = sample();
    let mut first = fs.open("readme.txt").expect("failed to open 'readme.txt'");
    let mut second = fs.open("readme.txt").expect("failed to open 'readme.txt'");

    let mut buffer = [0; 4];
    first.read_exact(&mut buffer).expect("failed to read");
    assert_eq!(4, first.position());
    assert_eq!(0, second.position());

    second.read_exact(&mut buffer).expect("failed to read");
    assert_eq!(b"This", &buffer);
}

#[test]
fn close_is_idempotent() {
    let fs = sample();
    let mut file = fs.open("readme.txt").expect("failed to open 'readme.txt'");

    file.close().expect("failed to close");
    file.close().expect("failed to close twice");
    assert!(file.is_closed());

    // Reads continue to succeed against the in-memory buffer.
    let mut buffer = [0; 4];
    file.read_exact(&mut buffer).expect("failed to read after close");
    assert_eq!(b"This", &buffer);
}

#[test]
fn metadata_without_open() {
    let fs = sample();

    let metadata = fs.metadata("subdir/subreadme.txt").expect("failed to fetch metadata");
    assert_eq!("subreadme.txt", metadata.name());
    assert_eq!(33, metadata.size());
    assert!(fs.metadata("nosuchfile").expect_err("found a missing file").is_not_found());
}

#[test]
fn entries_are_ordered() {
    let fs = sample();

    assert_eq!(4, fs.len());
    assert!(!fs.is_empty());

    let paths: Vec<_> = fs.entries().map(Entry::path).collect();
    assert_eq!(vec!["gopher.txt", "readme.txt", "subdir/", "subdir/subreadme.txt"], paths);
}

#[test]
fn builder_ignore_zeros() {
    let mut data = archive(&[("first.txt", "1")]);
    data.extend(archive(&[("second.txt", "2")]));

    let fs = TarFsBuilder::new().ignore_zeros(true).build(data.as_slice()).expect("failed to build filesystem");
    assert!(fs.open("second.txt").is_ok());
}

#[test]
fn async_read_and_seek() {
    use futures_lite::io::{AsyncReadExt, AsyncSeekExt};

    let fs = sample();

    futures_lite::future::block_on(async {
        let mut file = fs.open("readme.txt").expect("failed to open 'readme.txt'");
        AsyncSeekExt::seek(&mut file, SeekFrom::Start(5)).await.expect("failed to seek");

        let mut buffer = String::new();
        AsyncReadExt::read_to_string(&mut file, &mut buffer).await.expect("failed to read");
        assert_eq!("archive contains some text files.", buffer);

        assert!(AsyncSeekExt::seek(&mut file, SeekFrom::Current(-100)).await.is_err());
    });
}

#[test]
fn from_async_source() {
    let data = archive(&[("readme.txt", "hello")]);
    let fs = futures_lite::future::block_on(TarFs::from_async(data.as_slice())).expect("failed to build filesystem");

    let mut buffer = String::new();
    fs.open("readme.txt").expect("failed to open 'readme.txt'").read_to_string(&mut buffer).expect("failed to read");
    assert_eq!("hello", buffer);
}
