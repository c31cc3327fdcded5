// SPDX-License-Identifier: MIT
//! Sorts and deduplicates the lines of its inputs using `sorted_term_set`
//!
//! Inputs are supplied as paths via command line arguments; with no
//! arguments, standard input is read instead. Work is split across a worker
//! per available core, each retrying its `add` calls against a shared
//! [Handle] whenever the container's non-blocking lock is contended.

use sorted_term_set::{api, Config, Error, RawTerm, Term};

fn retry<T>(mut op: impl FnMut() -> Result<T, Error>) -> T {
    loop {
        match op() {
            Ok(value) => return value,
            Err(Error::LockFail) => std::thread::yield_now(),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}

fn main() {
    use std::io::BufRead;
    use std::sync::{Arc, Mutex};

    // Pre-collect the arguments (minus the progname) since ArgsOs is
    // both `!Send` and `!Sync`.
    let args: Vec<_> = std::env::args_os().skip(1).collect();

    let handle = api::new(Config::default());

    if !args.is_empty() {
        let paths: Arc<Mutex<_>> = Mutex::new(args.into_iter()).into();

        let workers: Vec<_> = (0..std::thread::available_parallelism().map(|n| n.get()).unwrap_or(2))
            .map(|_| {
                let paths = paths.clone();
                let handle = handle.clone();
                std::thread::spawn(move || {
                    while let Some(path) = paths.lock().unwrap().next() {
                        let file = std::fs::File::open(path).unwrap();
                        for line in std::io::BufReader::new(file).lines() {
                            let bytes = line.unwrap().into_bytes();
                            retry(|| api::add(&handle, RawTerm::Bitstring(bytes.clone())));
                        }
                    }
                })
            })
            .collect();

        workers.into_iter().try_for_each(|t| t.join()).unwrap();
    } else {
        for line in std::io::stdin().lock().lines() {
            let bytes = line.unwrap().into_bytes();
            retry(|| api::add(&handle, RawTerm::Bitstring(bytes.clone())));
        }
    }

    match api::to_list(&handle).unwrap() {
        sorted_term_set::OpOutcome::Sequence(terms) => {
            for term in terms {
                if let Term::Bitstring(bytes) = term {
                    println!("{}", String::from_utf8_lossy(&bytes));
                }
            }
        }
        other => panic!("expected Sequence, got {other:?}"),
    }
}
