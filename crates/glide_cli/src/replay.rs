//! Scenario runner that drives a scroll view and records its trace.

use crate::scenario::{Scenario, ScenarioStep};
use anyhow::{bail, Result};
use glide_core::{Point, TouchEvent, WheelEvent};
use glide_scroll::{FixedGeometry, ScrollConfig, ScrollNotification, ScrollView};
use serde::Serialize;
use std::io::Write;

/// View state after one scenario step.
#[derive(Debug, Clone, Serialize)]
pub struct TraceRecord {
    pub step: usize,
    pub kind: &'static str,
    /// Virtual clock in milliseconds
    pub time: f64,
    pub offset: Point,
    pub scale: f32,
    pub phase: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<ScrollNotification>,
}

impl TraceRecord {
    fn capture(
        step: usize,
        kind: &'static str,
        view: &mut ScrollView<FixedGeometry>,
    ) -> Self {
        view.end_turn();
        Self {
            step,
            kind,
            time: view.now(),
            offset: view.current_offset(),
            scale: view.current_scale(),
            phase: view.phase().name(),
            notifications: view.take_notifications(),
        }
    }

    /// One human-readable line
    pub fn to_line(&self) -> String {
        format!(
            "{:>4} {:>9.1}ms {:<12} offset=({:.2}, {:.2}) scale={:.3} {}",
            self.step,
            self.time,
            self.kind,
            self.offset.x,
            self.offset.y,
            self.scale,
            self.phase
        )
    }
}

/// Run every step of `scenario` against a fresh view.
///
/// Step times must not go backwards; a scenario that rewinds the clock is
/// rejected at the offending step.
pub fn run_scenario(scenario: &Scenario, config: ScrollConfig) -> Result<Vec<TraceRecord>> {
    let geometry = FixedGeometry::new(scenario.container, scenario.content)
        .with_frame_origin(scenario.frame_origin);
    let mut view = ScrollView::try_new(geometry, config)?;
    let mut trace = Vec::with_capacity(scenario.steps.len());

    tracing::info!(
        steps = scenario.steps.len(),
        "replaying scenario: container {}x{}, content {}x{}",
        scenario.container.width,
        scenario.container.height,
        scenario.content.width,
        scenario.content.height
    );

    for (index, step) in scenario.steps.iter().enumerate() {
        if let Some(at) = step_time(step) {
            if at < view.now() {
                bail!(
                    "step {} ({}) at {}ms is earlier than the clock ({}ms)",
                    index,
                    step.name(),
                    at,
                    view.now()
                );
            }
        }

        apply_step(&mut view, step);
        let record = TraceRecord::capture(index, step.name(), &mut view);
        tracing::debug!(step = index, kind = record.kind, "{}", record.to_line());
        trace.push(record);
    }

    Ok(trace)
}

fn step_time(step: &ScenarioStep) -> Option<f64> {
    match step {
        ScenarioStep::TouchStart { at, .. }
        | ScenarioStep::TouchMove { at, .. }
        | ScenarioStep::TouchEnd { at, .. }
        | ScenarioStep::TouchCancel { at }
        | ScenarioStep::Wheel { at, .. } => Some(*at),
        _ => None,
    }
}

fn apply_step(view: &mut ScrollView<FixedGeometry>, step: &ScenarioStep) {
    match step {
        ScenarioStep::TouchStart { at, touches } => {
            view.touch_start(&TouchEvent::new(*at, touches.iter().copied()));
        }
        ScenarioStep::TouchMove { at, touches } => {
            view.touch_move(&TouchEvent::new(*at, touches.iter().copied()));
        }
        ScenarioStep::TouchEnd { at, touches } => {
            view.touch_end(&TouchEvent::new(*at, touches.iter().copied()));
        }
        ScenarioStep::TouchCancel { at } => {
            view.touch_cancel(&TouchEvent::released(*at));
        }
        ScenarioStep::Wheel { at, dx, dy } => {
            if !view.wheel(&WheelEvent::new(*at, *dx, *dy)) {
                tracing::debug!("wheel event not handled, nothing to scroll");
            }
        }
        ScenarioStep::ScrollTo { x, y } => view.scroll_to(*x, *y),
        ScenarioStep::ScrollBy { dx, dy } => view.scroll_by(*dx, *dy),
        ScenarioStep::SetScale { scale } => {
            view.set_scale(*scale);
        }
        ScenarioStep::Wait { ms } => {
            let now = view.now();
            view.advance_to(now + ms.max(0.0));
        }
    }
}

/// Print a trace as text lines or as one JSON object per line.
pub fn write_trace<W: Write>(trace: &[TraceRecord], json: bool, writer: &mut W) -> Result<()> {
    for record in trace {
        if json {
            serde_json::to_writer(&mut *writer, record)?;
            writer.write_all(b"\n")?;
        } else {
            writeln!(writer, "{}", record.to_line())?;
        }
    }
    Ok(())
}
