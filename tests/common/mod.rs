// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

#![allow(dead_code)]

use std::io::Read;

use tarfs::{FileSystem, OpenFile};

pub const FILE_LIST: &[(&str, &str)] = &[
    ("readme.txt", "This archive contains some text files."),
    ("gopher.txt", "Gopher names:\nGeorge\nGeoffrey\nGonzo\n"),
    ("todo.txt", "Get animal handling licence."),
    ("subdir/", ""),
    ("subdir/subreadme.txt", "An otherwise empty sub directory."),
];

/// Writes a tar archive holding the provided (path, body) pairs in order, treating paths ending in `/` as directories.
pub fn archive(files: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());

    for (path, body) in files {
        let mut header = tar::Header::new_ustar();
        header.set_size(body.len() as u64);
        header.set_mtime(1_700_000_000);
        header.set_uid(0);
        header.set_gid(0);

        if path.ends_with('/') {
            header.set_entry_type(tar::EntryType::Directory);
            header.set_mode(0o755);
        } else {
            header.set_entry_type(tar::EntryType::Regular);
            header.set_mode(0o644);
        }

        builder.append_data(&mut header, path, body.as_bytes()).unwrap();
    }

    builder.into_inner().unwrap()
}

/// Opens and fully reads every file within the list through any filesystem, asserting the content matches.
pub fn check_files<F: FileSystem>(fs: &F, files: &[(&str, &str)]) {
    for (path, body) in files {
        let mut file = fs.open(path).unwrap();
        let stat = file.stat().unwrap();
        assert_eq!(path.ends_with('/'), stat.is_dir(), "for {path}, expect directory flag to match");

        let mut output = String::new();
        file.read_to_string(&mut output).unwrap();
        assert_eq!(*body, output, "for {path}, expect archive data to match written data");

        file.close().unwrap();
    }
}
