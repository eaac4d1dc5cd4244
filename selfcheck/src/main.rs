use std::env;
use std::process;

use log::{info, warn, error, LevelFilter, SetLoggerError};
use simplelog::{TermLogger, Config, TerminalMode, ColorChoice};
use thiserror::Error;

use containers::{BinarySearchTree, LinkedList, Error as ContainerError};

/// Environment variable holding the log level filter
const LOG_ENV: &str = "SELFCHECK_LOG";
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Debug, Error)]
enum CheckError {
    #[error("check failed: {check}")]
    Mismatch {check: &'static str},
    #[error("unexpected container error: {0}")]
    Container(#[from] ContainerError),
    #[error("unable to install logger: {0}")]
    Logger(#[from] SetLoggerError),
}

type CheckResult = Result<(), CheckError>;

fn check(check: &'static str, passed: bool) -> CheckResult {
    if !passed {
        return Err(CheckError::Mismatch {check});
    }

    info!("ok: {}", check);
    Ok(())
}

fn init_logging() -> CheckResult {
    let configured = env::var(LOG_ENV).ok();
    let parsed = configured.as_deref().map(str::parse::<LevelFilter>);
    let level = match parsed {
        Some(Ok(level)) => level,
        _ => DEFAULT_LEVEL,
    };

    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

    if let (Some(value), Some(Err(_))) = (&configured, &parsed) {
        warn!("ignoring invalid {} value {:?}, using {}", LOG_ENV, value, DEFAULT_LEVEL);
    }

    Ok(())
}

fn check_list() -> CheckResult {
    let mut list = LinkedList::from(vec![1, 2, 3, 4, 5]);
    println!("{}", list);

    list.push(6);
    list.add_first(0);
    println!("{}", list);

    check("list holds 0 through 6 in order", list.iter().copied().eq(0..=6))?;
    check("list size is 7", list.len() == 7)?;
    check("first element is 0", *list.get_first()? == 0)?;
    check("last element is 6", *list.get_last()? == 6)?;
    check("index of 3 is 3", list.index_of(&3) == Some(3))?;

    list.set(3, 8)?;
    check("3 is gone after set(3, 8)", !list.contains(&3))?;
    list.set(3, 3)?;
    check("3 is back after set(3, 3)", list.contains(&3))?;

    Ok(())
}

fn check_list_bounds() -> CheckResult {
    let mut list = LinkedList::from(vec![10, 20, 30]);

    check("get past the end is out of range",
        matches!(list.get(3), Err(ContainerError::OutOfRange {..})))?;
    check("add past the end is out of range",
        matches!(list.add(4, 40), Err(ContainerError::OutOfRange {..})))?;
    list.add(3, 40)?;
    check("add at the end appends", list.get_last() == Ok(&40) && list.len() == 4)?;

    let mut empty: LinkedList<i32> = LinkedList::new();
    check("first of an empty list fails",
        empty.get_first() == Err(ContainerError::EmptyCollection))?;
    check("removing last of an empty list fails",
        empty.remove_last() == Err(ContainerError::EmptyCollection))?;

    Ok(())
}

fn check_tree() -> CheckResult {
    let mut tree = BinarySearchTree::new();
    for &key in &[2, 1, 4, 3, 5] {
        tree.insert(key);
    }
    print!("{}", tree);

    check("tree height is 3", tree.height() == 3)?;
    check("4 is found", tree.search(&4))?;
    check("6 is not found", !tree.search(&6))?;
    check("inorder walk is sorted", tree.inorder_walk() == [1, 2, 3, 4, 5])?;
    check("preorder walk visits the root first", tree.preorder_walk() == [2, 1, 4, 3, 5])?;
    check("postorder walk visits the root last", tree.postorder_walk() == [1, 3, 5, 4, 2])?;

    tree.remove(&4)?;
    print!("{}", tree);

    check("4 is not found after removal", !tree.search(&4))?;
    check("inorder walk after removal", tree.inorder_walk() == [1, 2, 3, 5])?;
    check("removing 4 again is not found", tree.remove(&4) == Err(ContainerError::NotFound))?;
    check("failed removal leaves the tree alone", tree.len() == 4)?;

    Ok(())
}

fn run() -> CheckResult {
    check_list()?;
    check_list_bounds()?;
    check_tree()?;

    info!("all checks passed");
    Ok(())
}

fn main() {
    if let Err(err) = init_logging() {
        eprintln!("{}", err);
        process::exit(2);
    }

    if let Err(err) = run() {
        error!("{}", err);
        process::exit(1);
    }
}
