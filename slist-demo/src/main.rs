//! Builds a list from the command line, applies positional operations and
//! prints the chain after each step.
//!
//! Run with: cargo run -p slist-demo -- --item x --item y --insert 1=z
//!
//! Set `RUST_LOG=slist=trace` to watch nodes being linked and released.

use std::error::Error;

use clap::Parser;
use slist::{LinkedList, ListError};

#[derive(Parser, Debug)]
#[clap(about = "Drive a sentinel-bounded singly linked list from the command line")]
pub struct Args {
    /// Element appended with `add`, in the order given.
    #[clap(long = "item", default_values = ["x", "y"])]
    pub items: Vec<String>,

    /// Insert VALUE so it becomes the element at INDEX. Format: INDEX=VALUE.
    #[clap(long, value_parser = parse_key_val::<usize, String>)]
    pub insert: Vec<(usize, String)>,

    /// Replace the element at INDEX with VALUE. Format: INDEX=VALUE.
    #[clap(long, value_parser = parse_key_val::<usize, String>)]
    pub set: Vec<(usize, String)>,

    /// Remove the element at INDEX. Applied after inserts and sets.
    #[clap(long)]
    pub remove: Vec<usize>,

    /// Elements to reserve room for up front.
    #[clap(long, env = "SLIST_CAPACITY", default_value_t = 0)]
    pub capacity: usize,
}

/// Parse a single key-value pair
fn parse_key_val<T, U>(s: &str) -> Result<(T, U), Box<dyn Error + Send + Sync + 'static>>
where
    T: std::str::FromStr,
    T::Err: Error + Send + Sync + 'static,
    U: std::str::FromStr,
    U::Err: Error + Send + Sync + 'static,
{
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid INDEX=VALUE: no `=` found in `{s}`"))?;
    Ok((s[..pos].parse()?, s[pos + 1..].parse()?))
}

fn show(list: &LinkedList<String>) -> String {
    list.display_with(|s| s.clone()).to_string()
}

/// Applies `args` to a fresh list and returns one report line per step.
fn run(args: &Args) -> Result<Vec<String>, ListError> {
    let mut list = LinkedList::try_with_capacity(args.capacity)?;
    for item in &args.items {
        list.add(item.clone())?;
    }
    let mut report = vec![format!("add: {}", show(&list))];

    for (index, value) in &args.insert {
        list.insert(*index, value.clone())?;
        report.push(format!("insert {index}={value}: {}", show(&list)));
    }
    for (index, value) in &args.set {
        let old = list.set(*index, value.clone())?;
        report.push(format!("set {index}={value} (was {old}): {}", show(&list)));
    }
    for index in &args.remove {
        let removed = list.remove(*index)?;
        report.push(format!("remove {index} ({removed}): {}", show(&list)));
    }
    report.push(format!("count: {}", list.count()));

    let released = list.destroy()?;
    log::info!("released {released} nodes");
    Ok(report)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    log::debug!("{args:?}");

    for line in run(&args)? {
        println!("{line}");
    }
    Ok(())
}
