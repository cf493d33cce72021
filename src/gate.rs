//! Per-form in-flight guard.
//!
//! A submission holds a permit for its form kind from validation until the
//! outcome is rendered; a second submission of the same form while the
//! permit is held is rejected instead of interleaving with the first. The
//! permit is released on drop, so every exit path releases it.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use enrolldesk_enquiry::FormKind;

#[derive(Clone, Default)]
pub struct SubmissionGate {
    in_flight: Arc<Mutex<HashSet<FormKind>>>,
}

impl SubmissionGate {
    pub fn try_acquire(&self, kind: FormKind) -> Option<SubmissionPermit> {
        let mut in_flight = self.in_flight.lock().expect("gate lock");
        if !in_flight.insert(kind) {
            return None;
        }
        Some(SubmissionPermit {
            kind,
            gate: self.clone(),
        })
    }

    pub fn is_busy(&self, kind: FormKind) -> bool {
        self.in_flight.lock().expect("gate lock").contains(&kind)
    }

    fn release(&self, kind: FormKind) {
        self.in_flight.lock().expect("gate lock").remove(&kind);
    }
}

pub struct SubmissionPermit {
    kind: FormKind,
    gate: SubmissionGate,
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        self.gate.release(self.kind);
    }
}
