use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        if let Ok(read_dir) = fs::read_dir(&dir) {
            for entry in read_dir.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
                    files.push(path);
                }
            }
        }
    }
    files
}

fn file_contains_any(path: &Path, needles: &[&str]) -> bool {
    fs::read_to_string(path)
        .map(|c| needles.iter().any(|n| c.contains(n)))
        .unwrap_or(false)
}

/// Every write to the follows and post_reactions tables must go through
/// its repository. The uniqueness and set-semantics invariants live in
/// those two files; SQL scattered elsewhere would bypass them.
#[test]
fn graph_and_reaction_writes_only_from_repositories() {
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");

    let cases: &[(&str, &[&str])] = &[
        (
            "db/follow_repo.rs",
            &[
                "INSERT INTO follows",
                "DELETE FROM follows",
                "UPDATE follows",
            ],
        ),
        (
            "db/reaction_repo.rs",
            &[
                "INSERT INTO post_reactions",
                "DELETE FROM post_reactions",
                "UPDATE post_reactions",
            ],
        ),
    ];

    let mut offenders = Vec::new();
    for file in collect_rs_files(&src_root) {
        let path_str = file.to_string_lossy();
        for (allowed, needles) in cases {
            if path_str.ends_with(allowed) {
                continue;
            }
            if file_contains_any(&file, needles) {
                offenders.push(format!("{} (writes belong in {})", path_str, allowed));
            }
        }
    }

    if !offenders.is_empty() {
        panic!(
            "Follow and reaction writes must go through their repositories. Offenders: {:?}",
            offenders
        );
    }
}
