use super::Settings;

use abst_fs::AbstPath;
use fd_tree::{self as tree, ExcludeList, Node};

use anyhow::{Context, Result};
use tracing::info;

/// Operand that makes the previous tree be replaced by one of its subtrees
pub const SUBTREE_INDICATOR: &str = ":";

#[derive(Debug, PartialEq)]
pub enum Operand {
    /// A directory to scan or a saved tree to load
    Tree(AbstPath),
    /// Path of a subtree of the previous operand
    Subtree(String),
}

pub fn parse_operands(args: &[String]) -> Result<Vec<Operand>> {
    let mut operands: Vec<Operand> = Vec::new();
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        if arg == SUBTREE_INDICATOR {
            if operands.is_empty() {
                anyhow::bail!("'{SUBTREE_INDICATOR}' must follow a directory or a saved tree")
            }
            let path = args.next().with_context(|| {
                format!("'{SUBTREE_INDICATOR}' must be followed by the path of a subtree")
            })?;
            operands.push(Operand::Subtree(path.clone()));
        } else {
            operands.push(Operand::Tree(AbstPath::from(arg)));
        }
    }
    Ok(operands)
}

/// Scan the directory at path, or load the tree saved at path
pub fn open(path: &AbstPath, exclude_list: &ExcludeList) -> Result<Node> {
    let target = path.to_path_buf();
    if target.is_dir() {
        tree::scan(path, exclude_list).with_context(|| format!("failed to scan [{path}]"))
    } else if target.is_file() {
        tree::load(path).with_context(|| format!("failed to load tree saved at [{path}]"))
    } else {
        anyhow::bail!("[{path}] is neither a directory nor a saved tree")
    }
}

/// Resolve the operands to trees and subtract them left to right
pub fn build(operands: &[Operand], exclude_list: &ExcludeList) -> Result<Node> {
    let mut trees: Vec<Node> = Vec::new();
    for operand in operands {
        match operand {
            Operand::Tree(path) => trees.push(open(path, exclude_list)?),
            Operand::Subtree(subpath) => {
                let parent = trees
                    .pop()
                    .context("subtree selection without a tree to select from")?;
                let subtree = parent
                    .subtree(subpath)
                    .with_context(|| format!("failed to select subtree [{subpath}]"))?
                    .clone();
                trees.push(subtree);
            }
        }
    }

    let mut trees = trees.into_iter();
    let first = trees.next().context("no tree to work on")?;
    let rest: Vec<Node> = trees.collect();
    if !rest.is_empty() {
        info!(count = rest.len() + 1, "subtracting trees");
    }
    tree::csub_fold(first, &rest).context("failed to subtract trees")
}

/// Run the whole process, returning what should be printed
pub fn run(args: &[String], settings: &Settings) -> Result<String> {
    let operands = parse_operands(args)?;
    let result = build(&operands, &settings.exclude_list)?;

    match &settings.serialize {
        Some(path) => {
            let saved = tree::save(path, &result).context("failed to save tree")?;
            Ok(format!("Saved: {saved}\n\n"))
        }
        None => Ok(settings.renderer.render(&result)),
    }
}
