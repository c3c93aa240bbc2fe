//! Controller: owns the slot row of one rendered number.
//!
//! Methods:
//! - new, set_value (format → reconcile → position separators and point →
//!   plan), complete,
//!   complete_pass, frame, reconfigure
//!
//! Every call returns `&Outputs`: the new descriptor row (when a pass started
//! or settled) plus the events raised by the call.

use hashbrown::HashSet;
use log::{debug, trace};
use uuid::Uuid;

use crate::config::{Mode, Settings, SlotsConfig};
use crate::continuous::{self, ContinuousRow};
use crate::discrete;
use crate::error::SlotsResult;
use crate::format::{decimal_point_after, format_fixed, FormattedNumber};
use crate::frame::{slot_key, Frame, Outputs, SlotDescriptor, SlotEvent};
use crate::ids::{IdAllocator, PassId, SlotId};
use crate::reconcile::reconcile;
use crate::separators::{
    point_holder, position_point, position_separators, settle_separators, SeparatorPhase,
};
use crate::slot::{exiting_prefix, settle, Slot};

/// Pass waiting for completion reports.
#[derive(Debug, Clone)]
struct InFlight {
    id: PassId,
    awaiting: HashSet<SlotId>,
}

/// Slot-number controller.
#[derive(Debug, Clone)]
pub struct SlotNumbers {
    instance: Uuid,
    settings: Settings,
    ids: IdAllocator,
    /// Last value passed to `set_value`, kept for `reconfigure`.
    requested: Option<f64>,
    value: Option<FormattedNumber>,
    slots: Vec<Slot>,
    separators: Vec<SeparatorPhase>,
    points: Vec<SeparatorPhase>,
    in_flight: Option<InFlight>,
    queued: Option<FormattedNumber>,
    strips: ContinuousRow,
    frame: Frame,
    outputs: Outputs,
}

impl SlotNumbers {
    /// Validate `config` and create an empty controller.
    pub fn new(config: SlotsConfig) -> SlotsResult<Self> {
        let settings = config.validate()?;
        Ok(Self::with_settings(settings))
    }

    /// Controller from already validated settings.
    pub fn with_settings(settings: Settings) -> Self {
        let instance = Uuid::new_v4();
        let mut ids = IdAllocator::new();
        let idle = ids.alloc_pass();
        let frame = Frame {
            instance,
            pass: idle,
            prefix: settings.prefix.clone(),
            text: String::new(),
            parse_from_left: true,
            slots: Vec::new(),
        };
        Self {
            instance,
            settings,
            ids,
            requested: None,
            value: None,
            slots: Vec::new(),
            separators: Vec::new(),
            points: Vec::new(),
            in_flight: None,
            queued: None,
            strips: ContinuousRow::new(),
            frame,
            outputs: Outputs::default(),
        }
    }

    #[inline]
    pub fn instance(&self) -> Uuid {
        self.instance
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Value of the current pass (not a queued one).
    #[inline]
    pub fn value(&self) -> Option<&FormattedNumber> {
        self.value.as_ref()
    }

    /// Value waiting for the in-flight pass to settle.
    #[inline]
    pub fn queued(&self) -> Option<&FormattedNumber> {
        self.queued.as_ref()
    }

    /// Slot row of the current pass.
    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Separator phases, aligned 1:1 with `slots()`.
    #[inline]
    pub fn separators(&self) -> &[SeparatorPhase] {
        &self.separators
    }

    /// Decimal point phases, aligned 1:1 with `slots()`.
    #[inline]
    pub fn decimal_points(&self) -> &[SeparatorPhase] {
        &self.points
    }

    #[inline]
    pub fn pass_in_flight(&self) -> Option<PassId> {
        self.in_flight.as_ref().map(|f| f.id)
    }

    /// Snapshot of the current descriptor row.
    #[inline]
    pub fn frame(&self) -> Frame {
        self.frame.clone()
    }

    /// Outputs of the most recent call.
    #[inline]
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Render a new value.
    ///
    /// Invalid values are rejected before any state changes. In discrete mode
    /// a value arriving while a pass is in flight replaces any earlier queued
    /// value and starts once the pass settles.
    pub fn set_value(&mut self, value: f64) -> SlotsResult<&Outputs> {
        let formatted = format_fixed(value, self.settings.precision, self.settings.grouping)?;
        self.outputs.clear();
        self.requested = Some(value);

        if let (Mode::Discrete, Some(flight)) = (self.settings.mode, &self.in_flight) {
            debug!(
                "set_value: pass {} in flight; queueing '{}'",
                flight.id, formatted.text
            );
            self.outputs.push_event(SlotEvent::ValueQueued {
                pass: flight.id,
                text: formatted.text.clone(),
            });
            self.queued = Some(formatted);
            return Ok(&self.outputs);
        }

        if let Some(flight) = self.in_flight.take() {
            trace!("set_value: pass {} superseded", flight.id);
            self.commit();
        }
        self.start_pass(formatted);
        Ok(&self.outputs)
    }

    /// Report that one slot of `pass` finished animating.
    ///
    /// Reports for a stale pass, an unknown slot or a slot already reported are
    /// ignored.
    pub fn complete(&mut self, pass: PassId, slot: SlotId) -> &Outputs {
        self.outputs.clear();
        let accepted = match self.in_flight.as_mut() {
            Some(flight) if flight.id == pass => flight
                .awaiting
                .remove(&slot)
                .then(|| flight.awaiting.is_empty()),
            _ => None,
        };
        match accepted {
            Some(true) => self.finish_pass(),
            Some(false) => trace!("complete: pass {pass}, slot {slot}"),
            None => {
                debug!("complete: stale report for pass {pass}, slot {slot}");
                self.outputs.push_event(SlotEvent::StaleCompletion {
                    pass,
                    slot: Some(slot),
                });
            }
        }
        &self.outputs
    }

    /// Report that every slot of `pass` finished animating.
    pub fn complete_pass(&mut self, pass: PassId) -> &Outputs {
        self.outputs.clear();
        if self.pass_in_flight() == Some(pass) {
            self.finish_pass();
        } else {
            debug!("complete_pass: stale report for pass {pass}");
            self.outputs
                .push_event(SlotEvent::StaleCompletion { pass, slot: None });
        }
        &self.outputs
    }

    /// Swap in a new configuration.
    ///
    /// Slot state is reset and the last requested value is painted again
    /// under the new settings; separators appear without an entrance.
    pub fn reconfigure(&mut self, config: SlotsConfig) -> SlotsResult<&Outputs> {
        let settings = config.validate()?;
        let formatted = self
            .requested
            .map(|v| format_fixed(v, settings.precision, settings.grouping))
            .transpose()?;

        debug!("reconfigure: instance {}", self.instance);
        self.outputs.clear();
        self.settings = settings;
        self.slots.clear();
        self.separators.clear();
        self.points.clear();
        self.strips.clear();
        self.in_flight = None;
        self.queued = None;
        self.value = None;
        self.frame.prefix = self.settings.prefix.clone();

        match formatted {
            Some(formatted) => self.start_pass(formatted),
            None => {
                self.frame.slots.clear();
                self.frame.text.clear();
            }
        }
        Ok(&self.outputs)
    }

    fn start_pass(&mut self, formatted: FormattedNumber) {
        let pass = self.ids.alloc_pass();
        let rec = reconcile(&formatted.digits, &self.slots, None, &mut self.ids);
        let separators = if self.settings.grouping {
            position_separators(
                formatted.len(),
                &self.separators,
                rec.parse_from_left,
                self.settings.precision,
            )
        } else {
            vec![SeparatorPhase::Absent; rec.slots.len()]
        };
        // New digits sit at the front of a left-aligned row, at the back otherwise.
        let start = if rec.parse_from_left {
            0
        } else {
            rec.slots.len().saturating_sub(formatted.len())
        };
        let point = decimal_point_after(formatted.len(), self.settings.precision).map(|i| start + i);
        let points = position_point(&rec.slots, point, point_holder(&self.slots, &self.points));

        let awaiting: HashSet<SlotId> = rec
            .slots
            .iter()
            .filter(|s| s.value.is_animating())
            .map(|s| s.id)
            .collect();
        debug!(
            "start_pass: pass {} '{}' ({} slots, {} animating, from_left={})",
            pass,
            formatted.text,
            rec.slots.len(),
            awaiting.len(),
            rec.parse_from_left
        );

        self.frame = self.describe(
            pass,
            &rec.slots,
            &separators,
            &points,
            rec.parse_from_left,
            &formatted.text,
        );
        self.outputs.frame = Some(self.frame.clone());
        self.outputs.push_event(SlotEvent::PassStarted {
            pass,
            text: formatted.text.clone(),
            animating: awaiting.len(),
        });

        self.slots = rec.slots;
        self.separators = separators;
        self.points = points;
        self.value = Some(formatted);
        let idle = awaiting.is_empty();
        self.in_flight = Some(InFlight { id: pass, awaiting });
        if idle {
            self.finish_pass();
        }
    }

    /// Settle the in-flight pass and start any queued value.
    fn finish_pass(&mut self) {
        let Some(flight) = self.in_flight.take() else {
            return;
        };
        self.commit();
        let text = self
            .value
            .as_ref()
            .map(|v| v.text.clone())
            .unwrap_or_default();
        debug!("finish_pass: pass {} settled at '{}'", flight.id, text);

        self.frame = self.describe_settled(flight.id, &text);
        self.outputs.frame = Some(self.frame.clone());
        self.outputs.push_event(SlotEvent::PassSettled {
            pass: flight.id,
            text,
        });

        if let Some(next) = self.queued.take() {
            self.start_pass(next);
        }
    }

    /// Apply every completion of the current row in one update.
    fn commit(&mut self) {
        let removed_left = exiting_prefix(&self.slots);
        let settled = settle(&self.slots);
        self.separators = settle_separators(&self.separators, removed_left, settled.len());
        self.points = settle_separators(&self.points, removed_left, settled.len());
        if self.settings.mode == Mode::Continuous {
            self.strips.retain(&settled);
        }
        self.slots = settled;
    }

    fn describe(
        &mut self,
        pass: PassId,
        slots: &[Slot],
        separators: &[SeparatorPhase],
        points: &[SeparatorPhase],
        parse_from_left: bool,
        text: &str,
    ) -> Frame {
        let Settings {
            ref metrics,
            ref timing,
            mode,
            ..
        } = self.settings;
        let descriptors = slots
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let phase = separators.get(i).copied().unwrap_or_default();
                let point = points.get(i).copied().unwrap_or_default();
                let ((transition, width), separator, decimal_point) = match mode {
                    Mode::Discrete => (
                        discrete::plan_slot(&slot.value, metrics, timing),
                        discrete::describe_separator(phase, metrics, timing),
                        discrete::describe_point(point, metrics, timing),
                    ),
                    Mode::Continuous => (
                        self.strips.plan_slot(slot, metrics, timing),
                        continuous::describe_separator(phase, metrics, timing),
                        continuous::describe_point(point, metrics, timing),
                    ),
                };
                SlotDescriptor {
                    key: slot_key(&self.instance, slot.id),
                    id: slot.id,
                    value: slot.value,
                    transition,
                    width,
                    separator,
                    decimal_point,
                }
            })
            .collect();
        Frame {
            instance: self.instance,
            pass,
            prefix: self.settings.prefix.clone(),
            text: text.to_string(),
            parse_from_left,
            slots: descriptors,
        }
    }

    /// Resting row: every glyph held, widths and separators snapped.
    fn describe_settled(&self, pass: PassId, text: &str) -> Frame {
        let Settings {
            ref metrics,
            ref timing,
            ..
        } = self.settings;
        let descriptors = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let phase = self.separators.get(i).copied().unwrap_or_default();
                let point = self.points.get(i).copied().unwrap_or_default();
                let (transition, width) = discrete::plan_slot(&slot.value, metrics, timing);
                SlotDescriptor {
                    key: slot_key(&self.instance, slot.id),
                    id: slot.id,
                    value: slot.value,
                    transition,
                    width,
                    separator: discrete::describe_separator(phase.settled(), metrics, timing),
                    decimal_point: discrete::describe_point(point.settled(), metrics, timing),
                }
            })
            .collect();
        Frame {
            instance: self.instance,
            pass,
            prefix: self.settings.prefix.clone(),
            text: text.to_string(),
            parse_from_left: self.frame.parse_from_left,
            slots: descriptors,
        }
    }
}
