use clap::{Args, ValueEnum};
use itertools::Itertools;
use lh_pack::PackFile;
use miette::{miette, Result};
use owo_colors::OwoColorize;
use similar::{Algorithm, DiffTag};
use std::{
    cmp::Ordering,
    collections::BTreeSet,
    fmt::Display,
    path::PathBuf,
    time::{Duration, Instant},
};

use crate::commands::open_pack;

const DIFF_DEADLINE: Duration = Duration::from_secs(2);

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Mode {
    /// Compare block names, sizes and resolved record counts
    #[default]
    Semantic,
    /// Also locate the changed bytes within blocks
    Full,
}

#[derive(Debug, Eq, PartialEq)]
enum Change {
    Added(String, String),
    Removed(String, String),
    Comparison(String, String, String),
    Context(Vec<String>),
    Modified(String, String, Vec<Change>, Vec<Change>),
}

impl Change {
    fn modified(key: &str, name: &str) -> Self {
        Change::Modified(key.into(), name.into(), Vec::new(), Vec::new())
    }

    pub fn with_children(&mut self, children: Vec<Change>) -> Result<()> {
        match self {
            Change::Modified(_, _, vec, _) => {
                vec.extend(children);
                vec.sort();
                Ok(())
            }
            _ => Err(miette!("tried to add children to an addition or removal")),
        }
    }

    pub fn with_related(&mut self, related: Vec<Change>) -> Result<()> {
        match self {
            Change::Modified(_, _, _, vec) => {
                vec.extend(related);
                Ok(())
            }
            _ => Err(miette!("tried to add related to an addition or removal")),
        }
    }
}

impl Ord for Change {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

#[allow(clippy::non_canonical_partial_ord_impl)]
impl PartialOrd for Change {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Change::Added(key, value), Change::Added(other_key, other_value))
            | (Change::Removed(key, value), Change::Removed(other_key, other_value))
            | (Change::Modified(key, value, _, _), Change::Modified(other_key, other_value, _, _)) => {
                Some(key.cmp(other_key).then(value.cmp(other_value)))
            }
            (Change::Comparison(key, _, _), Change::Comparison(other_key, _, _)) => {
                Some(key.cmp(other_key))
            }
            (Change::Added(..), _) => Some(Ordering::Less),
            (_, Change::Added(..)) => Some(Ordering::Greater),
            (Change::Removed(..), _) => Some(Ordering::Less),
            (_, Change::Removed(..)) => Some(Ordering::Greater),
            _ => None,
        }
    }
}

impl Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Change::Added(_, v) => {
                writeln!(f, "✅ {}", v.green())
            }
            Change::Removed(_, v) => {
                writeln!(f, "❌ {}", v.red())
            }
            Change::Comparison(key, old, new) => {
                writeln!(f, "* {}: {} vs {}", key, old.red(), new.green())
            }
            Change::Context(values) => {
                writeln!(f, "{}", values.iter().map(|l| format!(" {l}")).join("\n"))
            }
            Change::Modified(_, v, children, related) => {
                let mut txt_final = related.iter().map(|c| format!("{}", c)).join("");

                let mut current_key = String::new();
                for c in children {
                    let key = match c {
                        Change::Added(key, _) => format!("* {} added:\n", key),
                        Change::Removed(key, _) => format!("* {} removed:\n", key),
                        Change::Modified(key, _, _, _) => format!("* {} modified:\n", key),
                        _ => current_key.clone(),
                    };

                    if current_key != key {
                        txt_final.push_str(&key);
                        current_key = key
                    }

                    txt_final.push_str(&format!("{}", c).lines().map(|l| format!("  {l}\n")).join(""));
                }

                writeln!(f, "🔃 {}", v.blue())?;
                writeln!(
                    f,
                    "{}",
                    txt_final
                        .lines()
                        .filter(|l| l.trim().len() > 1)
                        .map(|l| "  ".to_string() + l)
                        .join("\n")
                )
            }
        }
    }
}

#[derive(Args)]
pub struct DiffArgs {
    /// An input pack file
    #[arg(short, long, value_name = "FILE")]
    left: PathBuf,

    /// An input pack file
    #[arg(short, long, value_name = "FILE")]
    right: PathBuf,

    /// Comparison mode
    #[arg(short, long, value_enum, default_value_t = Mode::Semantic)]
    mode: Mode,
}

impl DiffArgs {
    fn handle_block(&self, name: &str, left: &[u8], right: &[u8]) -> Result<Option<Change>> {
        if left == right {
            return Ok(None);
        }

        let mut result = Change::modified("blocks", name);
        if left.len() != right.len() {
            result.with_related(vec![Change::Comparison(
                "size".into(),
                left.len().to_string(),
                right.len().to_string(),
            )])?;
        }

        if self.mode == Mode::Full {
            let deadline = Instant::now() + DIFF_DEADLINE;
            let ranges = similar::capture_diff_slices_deadline(
                Algorithm::Myers,
                left,
                right,
                Some(deadline),
            )
            .into_iter()
            .filter(|op| op.tag() != DiffTag::Equal)
            .map(|op| {
                format!(
                    "{} {:#x}..{:#x} -> {:#x}..{:#x}",
                    format!("{:?}", op.tag()).dimmed(),
                    op.old_range().start,
                    op.old_range().end,
                    op.new_range().start,
                    op.new_range().end,
                )
            })
            .collect::<Vec<_>>();

            result.with_related(vec![Change::Context(ranges)])?;
        }

        Ok(Some(result))
    }

    fn handle_pack(&self, name: &str, left: &PackFile, right: &PackFile) -> Result<Option<Change>> {
        let mut result: Option<Change> = None;

        let counts = [
            ("textures", left.texture_count(), right.texture_count()),
            ("meshes", left.mesh_count(), right.mesh_count()),
            ("animations", left.animations().len(), right.animations().len()),
            ("samples", left.samples().len(), right.samples().len()),
        ];
        for (key, l, r) in counts.into_iter().filter(|(_, l, r)| l != r) {
            result
                .get_or_insert_with(|| Change::modified("pack", name))
                .with_related(vec![Change::Comparison(
                    key.into(),
                    l.to_string(),
                    r.to_string(),
                )])?;
        }

        let left_names = left.directory().names().collect::<BTreeSet<_>>();
        let right_names = right.directory().names().collect::<BTreeSet<_>>();

        let blocks_added = right_names
            .difference(&left_names)
            .map(|k| Change::Added("blocks".into(), k.to_string()))
            .collect::<Vec<_>>();
        if !blocks_added.is_empty() {
            result
                .get_or_insert_with(|| Change::modified("pack", name))
                .with_children(blocks_added)?;
        }

        let blocks_removed = left_names
            .difference(&right_names)
            .map(|k| Change::Removed("blocks".into(), k.to_string()))
            .collect::<Vec<_>>();
        if !blocks_removed.is_empty() {
            result
                .get_or_insert_with(|| Change::modified("pack", name))
                .with_children(blocks_removed)?;
        }

        for block in left_names.intersection(&right_names) {
            let modified =
                self.handle_block(block, left.block(block)?, right.block(block)?)?;
            if let Some(c) = modified {
                result
                    .get_or_insert_with(|| Change::modified("pack", name))
                    .with_children(vec![c])?;
            }
        }

        Ok(result)
    }

    pub fn handle(&self) -> Result<()> {
        let left = open_pack(&self.left)?;
        let right = open_pack(&self.right)?;

        let difference = self.handle_pack(&self.left.to_string_lossy(), &left, &right)?;

        if let Some(d) = difference {
            println!("{}", d);
        }

        Ok(())
    }
}
