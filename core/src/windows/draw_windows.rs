use super::FightBounds;
use crate::actors::ActorId;
use crate::combat_log::{CombatEvent, EventKind};
use crate::game_data::{DrawKind, draw_action, drawn_card_name};

/// Largest gap between a draw cast and its drawn-card buff that still pairs them
const DRAW_PAIRING_MS: i64 = 1_000;

/// Interval between two consecutive draw-type events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawWindow {
    /// Actor whose draw opened the window. The opening window takes the
    /// source of the first draw.
    pub source_id: ActorId,
    pub start: i64,
    pub end: i64,
    pub start_kind: DrawKind,
    pub end_kind: DrawKind,
    /// Drawn-card buff held during the window
    pub drawn_card: Option<i64>,
    pub redraws: u32,
}

impl DrawWindow {
    fn open(source_id: ActorId, start: i64, start_kind: DrawKind) -> Self {
        Self {
            source_id,
            start,
            end: start,
            start_kind,
            end_kind: DrawKind::FightEnd,
            drawn_card: None,
            redraws: 0,
        }
    }

    pub fn duration_ms(&self) -> i64 {
        self.end - self.start
    }

    pub fn drawn_card_name(&self) -> Option<&'static str> {
        self.drawn_card.and_then(drawn_card_name)
    }
}

#[derive(Debug)]
pub struct DrawReconstruction {
    pub windows: Vec<DrawWindow>,
    /// Draw-type boundaries seen, including draws implied by a card buff
    pub draw_count: usize,
    /// Draw-type casts actually logged
    pub cast_count: usize,
}

/// Drawn-card buff seen before the cast that explains it.
#[derive(Debug, Clone, Copy)]
struct PendingCard {
    source_id: ActorId,
    timestamp: i64,
    buff: i64,
}

#[derive(Debug)]
struct DrawWindowBuilder {
    bounds: FightBounds,
    closed: Vec<DrawWindow>,
    active: DrawWindow,
    pending: Option<PendingCard>,
    last_redraw: Option<(ActorId, i64)>,
    draw_count: usize,
    cast_count: usize,
}

impl DrawWindowBuilder {
    fn new(bounds: FightBounds) -> Self {
        Self {
            bounds,
            closed: Vec::new(),
            active: DrawWindow::open(0, bounds.start, DrawKind::FightStart),
            pending: None,
            last_redraw: None,
            draw_count: 0,
            cast_count: 0,
        }
    }

    fn boundary(&mut self, source_id: ActorId, timestamp: i64, kind: DrawKind) {
        let mut finished = self.active;
        finished.end = timestamp.max(finished.start);
        finished.end_kind = kind;
        if finished.start_kind == DrawKind::FightStart {
            finished.source_id = source_id;
        }
        self.closed.push(finished);

        self.active = DrawWindow::open(source_id, timestamp, kind);
        self.draw_count += 1;
    }

    /// A pending card with no matching cast inside the pairing gap implies a
    /// draw whose cast was not logged. Close the active window at the
    /// card's timestamp.
    fn settle(&mut self, now: i64) {
        let Some(pending) = self.pending else {
            return;
        };
        if now - pending.timestamp <= DRAW_PAIRING_MS {
            return;
        }
        self.pending = None;

        tracing::debug!(
            source = pending.source_id,
            timestamp = pending.timestamp,
            "Drawn card without a draw cast, treating as a draw"
        );
        self.boundary(pending.source_id, pending.timestamp, DrawKind::Draw);
        self.active.drawn_card = Some(pending.buff);
    }

    fn take_pending(&mut self, source_id: ActorId, timestamp: i64) -> Option<i64> {
        let pending = self.pending?;
        if pending.source_id != source_id || (timestamp - pending.timestamp).abs() > DRAW_PAIRING_MS {
            return None;
        }
        self.pending = None;
        Some(pending.buff)
    }

    fn handle(&mut self, event: &CombatEvent) {
        self.settle(event.timestamp);

        match event.kind {
            EventKind::Cast => {
                if let Some(kind) = DrawKind::from_cast(event.ability_id) {
                    let card = self.take_pending(event.source_id, event.timestamp);
                    self.settle(i64::MAX);
                    self.boundary(event.source_id, event.timestamp, kind);
                    self.active.drawn_card = card;
                    self.cast_count += 1;
                } else if event.ability_id == draw_action::REDRAW {
                    self.active.redraws += 1;
                    match self.take_pending(event.source_id, event.timestamp) {
                        Some(buff) => self.active.drawn_card = Some(buff),
                        None => self.last_redraw = Some((event.source_id, event.timestamp)),
                    }
                }
            }
            EventKind::ApplyBuff | EventKind::RefreshBuff
                if drawn_card_name(event.ability_id).is_some() =>
            {
                self.card_drawn(event.source_id, event.timestamp, event.ability_id);
            }
            _ => {}
        }
    }

    fn card_drawn(&mut self, source_id: ActorId, timestamp: i64, buff: i64) {
        let within = |at: i64| (timestamp - at).abs() <= DRAW_PAIRING_MS;

        if let Some((redraw_source, at)) = self.last_redraw
            && redraw_source == source_id
            && within(at)
        {
            self.last_redraw = None;
            self.active.drawn_card = Some(buff);
            return;
        }

        let opened_by_draw = matches!(self.active.start_kind, DrawKind::Draw | DrawKind::SleeveDraw);
        if opened_by_draw
            && self.active.source_id == source_id
            && self.active.drawn_card.is_none()
            && within(self.active.start)
        {
            self.active.drawn_card = Some(buff);
            return;
        }

        // A second unexplained card replaces the first one as a draw of its own
        self.settle(i64::MAX);
        self.pending = Some(PendingCard {
            source_id,
            timestamp,
            buff,
        });
    }

    fn finish(mut self) -> DrawReconstruction {
        self.settle(i64::MAX);

        let mut last = self.active;
        last.end = self.bounds.end.max(last.start);
        last.end_kind = DrawKind::FightEnd;
        self.closed.push(last);

        DrawReconstruction {
            windows: self.closed,
            draw_count: self.draw_count,
            cast_count: self.cast_count,
        }
    }
}

/// Rebuild draw windows from the draw event stream.
///
/// The first window opens at fight start and the last closes at fight end.
/// A draw cast and its drawn-card buff may arrive in either order, and a
/// card buff with no cast at all still counts as a draw.
pub fn reconstruct_draw_windows(events: &[CombatEvent], bounds: FightBounds) -> DrawReconstruction {
    let mut builder = DrawWindowBuilder::new(bounds);
    for event in events {
        builder.handle(event);
    }

    let result = builder.finish();
    tracing::debug!(
        events = events.len(),
        draws = result.draw_count,
        casts = result.cast_count,
        windows = result.windows.len(),
        "Reconstructed draw windows"
    );
    result
}
