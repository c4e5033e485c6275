//! `SharedWorld` — month counter plus one atomic slot per field.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use eco_core::{AgentId, FieldId, Month};

use crate::{FieldKind, FieldWrite, Schema, Value, WorldError, WorldResult, WorldSnapshot};

/// Marks a slot that still holds its initial value.
const NEVER_WRITTEN: u64 = u64::MAX;

pub(crate) struct Slot {
    kind:    FieldKind,
    bits:    AtomicU64,
    /// Month of the tick whose commit phase last wrote this slot.
    written: AtomicU64,
    owner:   Option<AgentId>,
}

impl Slot {
    pub(crate) fn new(initial: Value) -> Self {
        Self {
            kind:    initial.kind(),
            bits:    AtomicU64::new(initial.to_bits()),
            written: AtomicU64::new(NEVER_WRITTEN),
            owner:   None,
        }
    }

    fn load(&self) -> Value {
        Value::from_bits(self.kind, self.bits.load(Ordering::Acquire))
    }
}

/// The mutable state shared by the whole team.
///
/// Constructed once by [`WorldBuilder`][crate::WorldBuilder], given owners
/// while still exclusively held by the driver, then shared behind an `Arc`
/// for the life of the run.  It is mutated in place every tick and never
/// rebuilt.
///
/// Ownership rules:
///
/// | Mutation                         | Who may perform it                 |
/// |----------------------------------|------------------------------------|
/// | [`commit`][Self::commit]         | the field's single owner           |
/// | [`advance_month`][Self::advance_month] | the clock owner              |
/// | [`assign_owner`][Self::assign_owner]   | the driver, before sharing   |
pub struct SharedWorld {
    schema:      Arc<Schema>,
    month:       AtomicU64,
    clock_owner: Option<AgentId>,
    slots:       Vec<Slot>,
}

impl SharedWorld {
    pub(crate) fn from_parts(schema: Schema, slots: Vec<Slot>) -> Self {
        Self {
            schema: Arc::new(schema),
            month: AtomicU64::new(0),
            clock_owner: None,
            slots,
        }
    }

    // ── Setup (exclusive access) ──────────────────────────────────────────

    /// Give `agent` the sole right to commit `field`.
    ///
    /// Re-assigning a field to its current owner is a no-op; a second owner
    /// is a configuration error.
    pub fn assign_owner(&mut self, field: FieldId, agent: AgentId) -> WorldResult<()> {
        let slot = self
            .slots
            .get_mut(field.index())
            .ok_or(WorldError::UnknownField(field))?;
        match slot.owner {
            Some(owner) if owner != agent => Err(WorldError::AlreadyOwned {
                field,
                owner,
                claimant: agent,
            }),
            _ => {
                slot.owner = Some(agent);
                Ok(())
            }
        }
    }

    /// Give `agent` the sole right to advance the month counter.
    pub fn assign_clock(&mut self, agent: AgentId) -> WorldResult<()> {
        match self.clock_owner {
            Some(owner) if owner != agent => Err(WorldError::ClockAlreadyOwned {
                owner,
                claimant: agent,
            }),
            _ => {
                self.clock_owner = Some(agent);
                Ok(())
            }
        }
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn month(&self) -> Month {
        Month(self.month.load(Ordering::Acquire))
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn owner(&self, field: FieldId) -> Option<AgentId> {
        self.slots.get(field.index()).and_then(|s| s.owner)
    }

    pub fn clock_owner(&self) -> Option<AgentId> {
        self.clock_owner
    }

    /// Fields `agent` may commit, in declaration order.
    pub fn fields_owned_by(&self, agent: AgentId) -> Vec<FieldId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.owner == Some(agent))
            .map(|(i, _)| FieldId(i as u16))
            .collect()
    }

    /// Current value of one field.
    pub fn get(&self, field: FieldId) -> WorldResult<Value> {
        self.slots
            .get(field.index())
            .map(Slot::load)
            .ok_or(WorldError::UnknownField(field))
    }

    /// Copy the month counter and every field.
    pub fn snapshot(&self) -> WorldSnapshot {
        let month = self.month();
        let mut values = Vec::with_capacity(self.slots.len());
        let mut written = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            let tag = slot.written.load(Ordering::Acquire);
            written.push((tag != NEVER_WRITTEN).then_some(Month(tag)));
            values.push(slot.load());
        }
        WorldSnapshot::new(month, Arc::clone(&self.schema), values, written)
    }

    // ── Writes (phase-restricted) ─────────────────────────────────────────

    /// Apply one write on behalf of `agent` during the commit phase.
    ///
    /// The write is tagged with the current month.  Nothing is stored when
    /// the agent does not own the field or the value has the wrong kind.
    pub fn commit(&self, agent: AgentId, write: FieldWrite) -> WorldResult<()> {
        let field = write.field;
        let slot = self
            .slots
            .get(field.index())
            .ok_or(WorldError::UnknownField(field))?;
        if slot.owner != Some(agent) {
            return Err(WorldError::NotOwner { field, agent });
        }
        if write.value.kind() != slot.kind {
            return Err(WorldError::KindMismatch {
                field,
                expected: slot.kind,
                got:      write.value.kind(),
            });
        }
        slot.bits.store(write.value.to_bits(), Ordering::Release);
        slot.written.store(self.month.load(Ordering::Acquire), Ordering::Release);
        Ok(())
    }

    /// Advance the month counter on behalf of the clock owner.  Returns the
    /// new month.
    pub fn advance_month(&self, agent: AgentId) -> WorldResult<Month> {
        if self.clock_owner != Some(agent) {
            return Err(WorldError::NotClockOwner(agent));
        }
        let next = self.month.fetch_add(1, Ordering::AcqRel) + 1;
        Ok(Month(next))
    }
}
