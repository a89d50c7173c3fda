//! Show/hide lifecycle shared by the tutorial, coming-soon and story overlays.
//!
//! The sequencer never touches the DOM or a clock. Every operation that starts
//! an animation hands back a [`Ticket`]; the caller arms a timer for
//! `ticket.delay_ms` and feeds the ticket back through [`OverlaySequencer::complete`].
//! Tickets carry the generation of the instance that issued them, so a timer
//! that outlives its instance is refused instead of mutating the replacement.

use crate::error::UiError;

/// Gap between the trigger's bottom edge and the bubble.
pub const ANCHOR_OFFSET_PX: f64 = 10.0;
/// Anchored overlays never sit closer than this to the viewport edge.
pub const VIEWPORT_MARGIN_PX: f64 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Tutorial,
    ComingSoon,
    Story,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionTiming {
    pub enter_ms: u32,
    /// Extra hold after the entrance animation before input is accepted.
    pub settle_ms: u32,
    pub exit_ms: u32,
    pub slide_ms: u32,
}

impl OverlayKind {
    pub const fn timing(self) -> TransitionTiming {
        match self {
            OverlayKind::Tutorial => TransitionTiming {
                enter_ms: 800,
                settle_ms: 100,
                exit_ms: 500,
                slide_ms: 0,
            },
            OverlayKind::ComingSoon => TransitionTiming {
                enter_ms: 500,
                settle_ms: 0,
                exit_ms: 300,
                slide_ms: 0,
            },
            OverlayKind::Story => TransitionTiming {
                enter_ms: 500,
                settle_ms: 0,
                exit_ms: 500,
                slide_ms: 500,
            },
        }
    }

    pub const fn has_slides(self) -> bool {
        matches!(self, OverlayKind::Story)
    }

    pub fn css_name(self) -> &'static str {
        match self {
            OverlayKind::Tutorial => "tutorial",
            OverlayKind::ComingSoon => "coming-soon",
            OverlayKind::Story => "story",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisibilityState {
    #[default]
    Hidden,
    Entering,
    Visible,
    Exiting,
}

impl VisibilityState {
    pub fn css_class(self) -> &'static str {
        match self {
            VisibilityState::Hidden => "hidden",
            VisibilityState::Entering => "entering",
            VisibilityState::Visible => "visible",
            VisibilityState::Exiting => "exiting",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Enter,
    Exit,
    Slide,
}

/// Receipt for one scheduled transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub transition: TransitionKind,
    pub delay_ms: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Horizontally centred on `left`, top edge at `top`, in viewport pixels.
    Anchored { left: f64, top: f64 },
    Centered,
}

impl Placement {
    pub fn compute(anchor: Option<Rect>, viewport: Viewport) -> Self {
        let Some(rect) = anchor else {
            return Placement::Centered;
        };
        if viewport.width <= 2.0 * VIEWPORT_MARGIN_PX {
            return Placement::Centered;
        }
        let left = rect
            .center_x()
            .clamp(VIEWPORT_MARGIN_PX, viewport.width - VIEWPORT_MARGIN_PX);
        let top = (rect.bottom() + ANCHOR_OFFSET_PX).max(VIEWPORT_MARGIN_PX);
        Placement::Anchored { left, top }
    }

    pub fn style(&self) -> String {
        match self {
            Placement::Anchored { left, top } => {
                format!("left:{left:.0}px; top:{top:.0}px; transform:translateX(-50%);")
            }
            Placement::Centered => {
                "left:50%; top:50%; transform:translate(-50%, -50%);".to_string()
            }
        }
    }
}

/// What the host found when asked to attach an overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostInfo {
    pub viewport: Viewport,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShowRequest {
    /// `None` when the attachment point is missing from the document.
    pub host: Option<HostInfo>,
    pub anchor: Option<Rect>,
}

/// Bounded cursor over N slides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideCursor {
    index: usize,
    len: usize,
}

impl SlideCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_terminal(&self) -> bool {
        self.index + 1 >= self.len
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimaryAction {
    Next,
    Ready,
}

#[derive(Clone, Debug)]
pub struct OverlaySequencer {
    kind: OverlayKind,
    state: VisibilityState,
    placement: Option<Placement>,
    cursor: Option<SlideCursor>,
    slide_count: usize,
    generation: u64,
    pending: Option<Ticket>,
    hide_queued: bool,
    /// Bumped on every observable change so views can diff cheaply.
    revision: u64,
}

impl OverlaySequencer {
    pub fn new(kind: OverlayKind) -> Self {
        Self {
            kind,
            state: VisibilityState::Hidden,
            placement: None,
            cursor: None,
            slide_count: 0,
            generation: 0,
            pending: None,
            hide_queued: false,
            revision: 0,
        }
    }

    /// Story overlays walk `count` slides on every show.
    pub fn with_slides(kind: OverlayKind, count: usize) -> Self {
        let mut seq = Self::new(kind);
        seq.slide_count = count;
        seq
    }

    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn cursor(&self) -> Option<SlideCursor> {
        self.cursor
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    pub fn is_attached(&self) -> bool {
        self.state != VisibilityState::Hidden
    }

    pub fn is_sliding(&self) -> bool {
        matches!(
            self.pending,
            Some(Ticket {
                transition: TransitionKind::Slide,
                ..
            })
        )
    }

    pub fn hide_queued(&self) -> bool {
        self.hide_queued
    }

    /// Only the coming-soon bubble closes on outside clicks, and only once it
    /// has finished appearing.
    pub fn dismisses_on_outside_click(&self) -> bool {
        self.kind == OverlayKind::ComingSoon && self.state == VisibilityState::Visible
    }

    pub fn primary_action(&self) -> Option<PrimaryAction> {
        let cursor = self.cursor?;
        Some(if cursor.is_terminal() {
            PrimaryAction::Ready
        } else {
            PrimaryAction::Next
        })
    }

    /// Attaches a fresh instance, replacing any live one.
    pub fn show(&mut self, request: ShowRequest) -> Result<Ticket, UiError> {
        let host = request.host.ok_or_else(|| UiError::HostNotReady {
            host: crate::platform::OVERLAY_HOST_ID.to_string(),
        })?;
        if self.is_attached() {
            self.teardown();
        }
        self.generation += 1;
        self.placement = Some(Placement::compute(request.anchor, host.viewport));
        self.cursor = self
            .kind
            .has_slides()
            .then(|| SlideCursor::new(self.slide_count));
        self.state = VisibilityState::Entering;
        let t = self.kind.timing();
        Ok(self.schedule(TransitionKind::Enter, t.enter_ms + t.settle_ms))
    }

    /// Starts the exit, or queues it behind the transition in flight.
    /// Returns `None` when nothing new was scheduled.
    pub fn hide(&mut self) -> Result<Option<Ticket>, UiError> {
        match self.state {
            VisibilityState::Hidden => Err(UiError::InvalidTransition {
                kind: self.kind,
                op: "hide",
                from: self.state,
            }),
            VisibilityState::Exiting => Ok(None),
            VisibilityState::Entering => {
                self.hide_queued = true;
                self.touch();
                Ok(None)
            }
            VisibilityState::Visible if self.pending.is_some() => {
                self.hide_queued = true;
                self.touch();
                Ok(None)
            }
            VisibilityState::Visible => Ok(Some(self.begin_exit())),
        }
    }

    pub fn advance(&mut self) -> Result<Ticket, UiError> {
        let Some(cursor) = self.cursor else {
            return Err(UiError::Unsupported {
                kind: self.kind,
                op: "advance",
            });
        };
        if self.state != VisibilityState::Visible {
            return Err(UiError::InvalidTransition {
                kind: self.kind,
                op: "advance",
                from: self.state,
            });
        }
        if cursor.is_terminal() {
            return Err(UiError::TerminalSlide { kind: self.kind });
        }
        if self.pending.is_some() || self.hide_queued {
            return Err(UiError::TransitionInFlight { kind: self.kind });
        }
        self.cursor = Some(SlideCursor {
            index: cursor.index + 1,
            len: cursor.len,
        });
        let ms = self.kind.timing().slide_ms;
        Ok(self.schedule(TransitionKind::Slide, ms))
    }

    /// Applies a timer that fired. A queued hide starts here and its ticket is
    /// returned for the caller to arm.
    pub fn complete(&mut self, ticket: Ticket) -> Result<Option<Ticket>, UiError> {
        if ticket.generation != self.generation || self.pending != Some(ticket) {
            return Err(UiError::StaleCallback {
                kind: self.kind,
                ticket,
                live: self.generation,
            });
        }
        self.pending = None;
        match ticket.transition {
            TransitionKind::Enter => {
                self.state = VisibilityState::Visible;
            }
            TransitionKind::Slide => {}
            TransitionKind::Exit => {
                self.detach();
                return Ok(None);
            }
        }
        if self.hide_queued {
            return Ok(Some(self.begin_exit()));
        }
        self.touch();
        Ok(None)
    }

    /// Drops the instance immediately and invalidates every outstanding ticket.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.detach();
    }

    fn begin_exit(&mut self) -> Ticket {
        self.hide_queued = false;
        self.state = VisibilityState::Exiting;
        let ms = self.kind.timing().exit_ms;
        self.schedule(TransitionKind::Exit, ms)
    }

    fn schedule(&mut self, transition: TransitionKind, delay_ms: u32) -> Ticket {
        let ticket = Ticket {
            generation: self.generation,
            transition,
            delay_ms,
        };
        self.pending = Some(ticket);
        self.touch();
        ticket
    }

    fn detach(&mut self) {
        self.state = VisibilityState::Hidden;
        self.placement = None;
        self.cursor = None;
        self.pending = None;
        self.hide_queued = false;
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> ShowRequest {
        ShowRequest {
            host: Some(HostInfo {
                viewport: Viewport {
                    width: 800.0,
                    height: 600.0,
                },
            }),
            anchor: None,
        }
    }

    #[test]
    fn tutorial_entrance_includes_settle() {
        let mut seq = OverlaySequencer::new(OverlayKind::Tutorial);
        let t = seq.show(host()).unwrap();
        assert_eq!(t.delay_ms, 900);
        assert_eq!(t.transition, TransitionKind::Enter);
        assert_eq!(seq.state(), VisibilityState::Entering);
    }

    #[test]
    fn missing_host_is_reported() {
        let mut seq = OverlaySequencer::new(OverlayKind::ComingSoon);
        let err = seq.show(ShowRequest::default()).unwrap_err();
        assert!(matches!(err, UiError::HostNotReady { .. }));
        assert_eq!(seq.state(), VisibilityState::Hidden);
    }

    #[test]
    fn hide_during_entrance_is_queued() {
        let mut seq = OverlaySequencer::new(OverlayKind::ComingSoon);
        let enter = seq.show(host()).unwrap();
        assert_eq!(seq.hide().unwrap(), None);
        assert!(seq.hide_queued());
        let exit = seq.complete(enter).unwrap().expect("queued exit");
        assert_eq!(exit.transition, TransitionKind::Exit);
        assert_eq!(exit.delay_ms, 300);
        assert_eq!(seq.state(), VisibilityState::Exiting);
        assert_eq!(seq.complete(exit).unwrap(), None);
        assert_eq!(seq.state(), VisibilityState::Hidden);
    }

    #[test]
    fn hide_from_hidden_is_rejected() {
        let mut seq = OverlaySequencer::new(OverlayKind::Tutorial);
        assert!(matches!(
            seq.hide(),
            Err(UiError::InvalidTransition { op: "hide", .. })
        ));
    }

    #[test]
    fn teardown_makes_pending_ticket_stale() {
        let mut seq = OverlaySequencer::new(OverlayKind::Tutorial);
        let t = seq.show(host()).unwrap();
        seq.teardown();
        assert!(matches!(seq.complete(t), Err(UiError::StaleCallback { .. })));
        assert_eq!(seq.state(), VisibilityState::Hidden);
    }

    #[test]
    fn anchored_placement_is_clamped() {
        let vp = Viewport {
            width: 400.0,
            height: 300.0,
        };
        let near_edge = Rect {
            left: 390.0,
            top: 20.0,
            width: 40.0,
            height: 30.0,
        };
        assert_eq!(
            Placement::compute(Some(near_edge), vp),
            Placement::Anchored {
                left: 388.0,
                top: 60.0
            }
        );
        assert_eq!(Placement::compute(None, vp), Placement::Centered);
    }

    #[test]
    fn advance_is_story_only() {
        let mut seq = OverlaySequencer::new(OverlayKind::ComingSoon);
        let t = seq.show(host()).unwrap();
        seq.complete(t).unwrap();
        assert!(matches!(seq.advance(), Err(UiError::Unsupported { .. })));
        assert_eq!(seq.primary_action(), None);
    }

    #[test]
    fn outside_click_dismissal_waits_for_visible() {
        let mut seq = OverlaySequencer::new(OverlayKind::ComingSoon);
        let t = seq.show(host()).unwrap();
        assert!(!seq.dismisses_on_outside_click());
        seq.complete(t).unwrap();
        assert!(seq.dismisses_on_outside_click());
    }
}
