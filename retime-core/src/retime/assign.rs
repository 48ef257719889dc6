use crate::{
    foundation::error::{RetimeError, RetimeResult},
    retime::frame::{Frame, provenance_line},
    retime::plan::{Instruction, InstructionKind},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How the slots after the first one of an extend are filled.
pub enum ExtendMode {
    /// Each slot shows the source frame after the previous slot's source frame.
    #[default]
    Advance,
    /// Every slot repeats the first extended slot's source frame.
    Freeze,
    /// Every slot shows the source frame after the first extended slot's source frame, so a run
    /// of `K` reads `anchor, anchor + 1, anchor + 1, ..`.
    Hold,
}

impl ExtendMode {
    /// All modes, in declaration order.
    pub const ALL: [ExtendMode; 3] = [ExtendMode::Advance, ExtendMode::Freeze, ExtendMode::Hold];
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Bookkeeping for one assignment walk.
pub struct AssignReport {
    /// Instructions applied before the walk ended.
    pub steps_applied: usize,
    /// Destination cursor at the start of every applied step (strictly increasing).
    pub cursor_trail: Vec<usize>,
    /// Number of slot copies performed.
    pub copies: usize,
    /// Cursor after the last applied step; may exceed the frame count.
    pub final_cursor: usize,
    /// `true` when instructions remained after the cursor ran past the last slot.
    pub terminated_early: bool,
}

/// Applies a plan to destination slots, reading content from the source slots.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameAssigner {
    mode: ExtendMode,
}

impl FrameAssigner {
    /// Assigner using `mode` for extends.
    pub fn new(mode: ExtendMode) -> Self {
        Self { mode }
    }

    /// Extend behavior in use.
    pub fn mode(&self) -> ExtendMode {
        self.mode
    }

    /// Walk `instructions` once, rewriting `dst` in place.
    ///
    /// Inputs are validated before the first write, so an error leaves `dst` untouched.
    pub fn apply(
        &self,
        instructions: &[Instruction],
        src: &[Frame],
        dst: &mut [Frame],
    ) -> RetimeResult<AssignReport> {
        if src.len() != dst.len() {
            return Err(RetimeError::validation(format!(
                "source has {} frames but destination has {}",
                src.len(),
                dst.len()
            )));
        }
        if src.is_empty() {
            return Err(RetimeError::validation("frame sequence must be non-empty"));
        }

        let mut walk = Walk {
            mode: self.mode,
            src,
            dst,
            copies: 0,
        };
        let n = src.len();
        let mut report = AssignReport::default();
        let mut cursor = 0usize;

        for (step, &instruction) in instructions.iter().enumerate() {
            if cursor >= n {
                report.terminated_early = true;
                break;
            }
            report.cursor_trail.push(cursor);
            let delta = instruction.value();

            match instruction.kind() {
                InstructionKind::Jump(by) => {
                    let target = if cursor > 0 && walk.dst[cursor - 1].overwritten {
                        walk.extend(cursor, 1, delta);
                        let target = walk.dst[cursor].src_index.saturating_add(by);
                        cursor += 1;
                        target
                    } else {
                        by
                    };
                    if cursor < n {
                        walk.copy(target.min(n - 1), cursor, delta);
                    }
                    cursor += 1;
                }
                InstructionKind::Extend(count) => {
                    walk.extend(cursor, count, delta);
                    cursor = cursor.saturating_add(count);
                }
                InstructionKind::Advance => {
                    walk.extend(cursor, 1, delta);
                    cursor += 1;
                }
            }

            report.steps_applied += 1;
            tracing::trace!(
                step,
                delta,
                cursor,
                slots = %provenance_line(&walk.dst[..cursor.min(n)]),
                "instruction applied"
            );
        }

        report.copies = walk.copies;
        report.final_cursor = cursor;
        Ok(report)
    }
}

struct Walk<'a> {
    mode: ExtendMode,
    src: &'a [Frame],
    dst: &'a mut [Frame],
    copies: usize,
}

impl Walk<'_> {
    // Successor of `src_index`, or `src_index` itself at the end of the source range.
    fn next_src(&self, src_index: usize) -> usize {
        if src_index + 1 < self.src.len() {
            src_index + 1
        } else {
            src_index
        }
    }

    fn extend(&mut self, cursor: usize, count: usize, delta: i32) {
        let n = self.dst.len();
        if cursor == 0 || cursor >= n {
            return;
        }

        let prev = &self.dst[cursor - 1];
        if prev.overwritten {
            let from = self.next_src(prev.src_index);
            self.copy(from, cursor, delta);
        }

        let anchor = self.dst[cursor].src_index;
        let end = cursor.saturating_add(count).min(n);
        for slot in cursor + 1..end {
            let from = match self.mode {
                ExtendMode::Advance => self.next_src(self.dst[slot - 1].src_index),
                ExtendMode::Freeze => anchor,
                ExtendMode::Hold => self.next_src(anchor),
            };
            self.copy(from, slot, delta);
        }
    }

    fn copy(&mut self, src_index: usize, dst_index: usize, delta: i32) {
        copy_source_into_destination(self.src, self.dst, src_index, dst_index, delta);
        self.copies += 1;
    }
}

/// Deep-copy source slot `src_index` into destination slot `dst_index` and record provenance.
///
/// Indices are the caller's responsibility: debug builds assert, release builds clamp the source
/// index and ignore an out-of-range destination.
pub fn copy_source_into_destination(
    src: &[Frame],
    dst: &mut [Frame],
    src_index: usize,
    dst_index: usize,
    delta: i32,
) {
    debug_assert!(src_index < src.len(), "source index {src_index} out of range");
    debug_assert!(dst_index < dst.len(), "destination index {dst_index} out of range");
    let Some(last) = src.len().checked_sub(1) else {
        return;
    };
    let src_index = src_index.min(last);
    let Some(slot) = dst.get_mut(dst_index) else {
        return;
    };

    slot.image.clone_from(&src[src_index].image);
    slot.src_index = src_index;
    slot.overwritten = true;
    slot.delta = delta;
}

#[cfg(test)]
#[path = "../../tests/unit/retime/assign.rs"]
mod tests;
