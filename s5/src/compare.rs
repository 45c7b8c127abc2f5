//! Section-by-section comparison of two files
//!
//! Files are compared after decoding, so a compressed save and its
//! uncompressed copy compare equal.

use std::fmt;

use crate::S5Error;
use crate::file::{S5File, SectionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareMode {
    /// Stop at the first differing section
    #[default]
    FirstDifference,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difference {
    OnlyLeft,
    OnlyRight,
    /// Sections at the same position are of different kinds
    Kind { right: SectionKind },
    /// First differing byte, or the end of the shorter section
    Bytes {
        offset: usize,
        left_len: usize,
        right_len: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionDiff {
    /// Position in stream order
    pub index: usize,
    pub kind: SectionKind,
    pub difference: Difference,
}

impl fmt::Display for SectionDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}: ", self.index, self.kind)?;
        match self.difference {
            Difference::OnlyLeft => f.write_str("only in left file"),
            Difference::OnlyRight => f.write_str("only in right file"),
            Difference::Kind { right } => write!(f, "right file has {right}"),
            Difference::Bytes {
                offset,
                left_len,
                right_len,
            } if left_len == right_len => {
                write!(f, "differs at byte {offset:#X} ({left_len} bytes)")
            }
            Difference::Bytes {
                offset,
                left_len,
                right_len,
            } => write!(
                f,
                "differs at byte {offset:#X} ({left_len} vs {right_len} bytes)"
            ),
        }
    }
}

/// Compare the decoded sections of two files.
///
/// An empty result means the files hold identical data.
pub fn compare_files(
    left: &S5File,
    right: &S5File,
    mode: CompareMode,
) -> Result<Vec<SectionDiff>, S5Error> {
    let left = left.sections()?;
    let right = right.sections()?;
    let mut diffs = Vec::new();

    for index in 0..left.len().max(right.len()) {
        let diff = match (left.get(index), right.get(index)) {
            (Some(l), None) => Some((l.kind, Difference::OnlyLeft)),
            (None, Some(r)) => Some((r.kind, Difference::OnlyRight)),
            (Some(l), Some(r)) if l.kind != r.kind => {
                Some((l.kind, Difference::Kind { right: r.kind }))
            }
            (Some(l), Some(r)) => first_difference(&l.data, &r.data).map(|offset| {
                (
                    l.kind,
                    Difference::Bytes {
                        offset,
                        left_len: l.data.len(),
                        right_len: r.data.len(),
                    },
                )
            }),
            (None, None) => None,
        };

        if let Some((kind, difference)) = diff {
            diffs.push(SectionDiff {
                index,
                kind,
                difference,
            });
            if mode == CompareMode::FirstDifference {
                break;
            }
        }
    }

    Ok(diffs)
}

fn first_difference(left: &[u8], right: &[u8]) -> Option<usize> {
    match left.iter().zip(right).position(|(a, b)| a != b) {
        Some(offset) => Some(offset),
        None if left.len() != right.len() => Some(left.len().min(right.len())),
        None => None,
    }
}
