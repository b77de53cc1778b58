// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coalescing frame task queue.
//!
//! Behaviours never ask the host for an animation frame directly. They
//! [`request`](FrameQueue::request) a [`FrameTask`]; the host checks
//! [`is_idle`](FrameQueue::is_idle) after each event and arms a single frame
//! callback while work is pending. When the frame fires, the host calls
//! [`Landing::on_frame`](crate::landing::Landing::on_frame), which
//! [`take`](FrameQueue::take)s the batch and runs it.
//!
//! A task that is already pending is not queued again, so however many scroll
//! events arrive before the next frame, parallax recomputes once.

use alloc::vec::Vec;

use crate::node::NodeId;

/// Work to run on the next display frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameTask {
    /// Recompute hero opacity and decorative layer offsets.
    Parallax,
    /// Advance the counter animation on a stat element.
    Counter(NodeId),
    /// Move the cursor-trail follower one step.
    CursorTrail,
    /// Finish hiding the loading overlay once its fade has elapsed.
    LoaderFade,
}

/// Pending frame tasks in registration order.
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    pending: Vec<FrameTask>,
}

impl FrameQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests `task` for the next frame.
    ///
    /// Returns `false` if an identical task is already pending; the request is
    /// merged into it.
    pub fn request(&mut self, task: FrameTask) -> bool {
        if self.pending.contains(&task) {
            return false;
        }
        self.pending.push(task);
        true
    }

    /// Takes every pending task, leaving the queue empty.
    ///
    /// Tasks requested while the returned batch runs belong to the following
    /// frame.
    #[must_use]
    pub fn take(&mut self) -> Vec<FrameTask> {
        core::mem::take(&mut self.pending)
    }

    /// Returns `true` if no task is waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_requests_coalesce() {
        let mut queue = FrameQueue::new();
        assert!(queue.request(FrameTask::Parallax));
        assert!(!queue.request(FrameTask::Parallax));
        assert!(!queue.request(FrameTask::Parallax));
        assert_eq!(queue.take(), [FrameTask::Parallax]);
    }

    #[test]
    fn distinct_counters_do_not_coalesce() {
        let mut queue = FrameQueue::new();
        assert!(queue.request(FrameTask::Counter(NodeId(1))));
        assert!(queue.request(FrameTask::Counter(NodeId(2))));
        assert!(!queue.request(FrameTask::Counter(NodeId(1))));
        assert_eq!(queue.take().len(), 2);
    }

    #[test]
    fn take_preserves_registration_order_and_empties() {
        let mut queue = FrameQueue::new();
        queue.request(FrameTask::Counter(NodeId(7)));
        queue.request(FrameTask::Parallax);
        queue.request(FrameTask::LoaderFade);

        let batch = queue.take();
        assert_eq!(
            batch,
            [
                FrameTask::Counter(NodeId(7)),
                FrameTask::Parallax,
                FrameTask::LoaderFade
            ]
        );
        assert!(queue.is_idle());
        assert!(queue.request(FrameTask::Parallax), "a new frame may be requested");
    }
}
